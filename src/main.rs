use log::{error, info};
use timetable_engine::{EngineError, Timetable, TimetableConfig, server};

fn load_config() -> Result<TimetableConfig, EngineError> {
    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var("TIMETABLE_CONFIG").ok());

    match path {
        Some(path) => {
            info!("Loading timetable configuration from {}", path);
            Ok(TimetableConfig::load(path)?)
        }
        None => {
            info!("No configuration given; using the built-in catalog.");
            Ok(TimetableConfig::default())
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server::run_server(Timetable::new(config)).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
}
