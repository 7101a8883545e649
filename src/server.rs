use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use log::info;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::data::{
    Conflict, Course, CourseId, LecturerWorkload, Room, RoomId, RoomUsage, SchedulingOutput,
    Statistics, ValidationReport,
};
use crate::error::EngineError;
use crate::export::{schedule_to_json, timestamped_filename};
use crate::schedule::Schedule;
use crate::timetable::Timetable;

type SharedTimetable = Arc<Mutex<Timetable>>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AssignRequest {
    day: String,
    time_slot: String,
    course_id: CourseId,
    room_id: RoomId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TimetableView {
    schedule: Schedule,
    conflicts: Vec<Conflict>,
}

impl TimetableView {
    fn of(timetable: &Timetable) -> Self {
        TimetableView {
            schedule: timetable.schedule().clone(),
            conflicts: timetable.conflicts().to_vec(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CatalogView {
    courses: Vec<Course>,
    rooms: Vec<Room>,
    days: Vec<String>,
    time_slots: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatisticsView {
    statistics: Statistics,
    room_utilization: Vec<RoomUsage>,
    lecturer_workload: Vec<LecturerWorkload>,
    completion: u32,
}

async fn catalog_handler(State(timetable): State<SharedTimetable>) -> Json<CatalogView> {
    let timetable = timetable.lock().await;
    let config = timetable.config();
    Json(CatalogView {
        courses: config.courses.clone(),
        rooms: config.rooms.clone(),
        days: config.days.clone(),
        time_slots: config.time_slots.clone(),
    })
}

async fn timetable_handler(State(timetable): State<SharedTimetable>) -> Json<TimetableView> {
    Json(TimetableView::of(&*timetable.lock().await))
}

async fn assign_handler(
    State(timetable): State<SharedTimetable>,
    Json(req): Json<AssignRequest>,
) -> Result<Json<TimetableView>, (StatusCode, String)> {
    let mut timetable = timetable.lock().await;
    let assigned = timetable
        .assign_course(&req.day, &req.time_slot, req.course_id, req.room_id)
        .map(|_| ());
    match assigned {
        Ok(()) => Ok(Json(TimetableView::of(&timetable))),
        Err(e @ EngineError::Validation(_)) => Err((StatusCode::BAD_REQUEST, e.to_string())),
        Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string())),
    }
}

async fn remove_handler(
    State(timetable): State<SharedTimetable>,
    Path((day, time_slot)): Path<(String, String)>,
) -> Json<TimetableView> {
    let mut timetable = timetable.lock().await;
    timetable.remove_assignment(&day, &time_slot);
    Json(TimetableView::of(&timetable))
}

async fn generate_handler(State(timetable): State<SharedTimetable>) -> Json<SchedulingOutput> {
    Json(timetable.lock().await.auto_generate())
}

async fn clear_handler(State(timetable): State<SharedTimetable>) -> Json<TimetableView> {
    let mut timetable = timetable.lock().await;
    timetable.clear();
    Json(TimetableView::of(&timetable))
}

async fn validate_handler(
    State(timetable): State<SharedTimetable>,
    Json(req): Json<AssignRequest>,
) -> Json<ValidationReport> {
    let timetable = timetable.lock().await;
    Json(timetable.validate_assignment(req.course_id, req.room_id, &req.day, &req.time_slot))
}

async fn statistics_handler(State(timetable): State<SharedTimetable>) -> Json<StatisticsView> {
    let timetable = timetable.lock().await;
    Json(StatisticsView {
        statistics: timetable.statistics(),
        room_utilization: timetable.room_utilization(),
        lecturer_workload: timetable.lecturer_workload(),
        completion: timetable.completion(),
    })
}

async fn export_csv_handler(State(timetable): State<SharedTimetable>) -> impl IntoResponse {
    let csv = timetable.lock().await.export_csv();
    let disposition = format!(
        "attachment; filename=\"{}\"",
        timestamped_filename("timetable", "csv")
    );
    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        csv,
    )
}

async fn export_json_handler(
    State(timetable): State<SharedTimetable>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let json = schedule_to_json(timetable.lock().await.schedule())
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    let disposition = format!(
        "attachment; filename=\"{}\"",
        timestamped_filename("timetable", "json")
    );
    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        json,
    ))
}

pub fn router(timetable: Timetable) -> Router {
    let state: SharedTimetable = Arc::new(Mutex::new(timetable));
    Router::new()
        .route("/v1/catalog", get(catalog_handler))
        .route("/v1/timetable", get(timetable_handler))
        .route("/v1/timetable/assignments", post(assign_handler))
        .route(
            "/v1/timetable/assignments/:day/:time_slot",
            delete(remove_handler),
        )
        .route("/v1/timetable/generate", post(generate_handler))
        .route("/v1/timetable/clear", post(clear_handler))
        .route("/v1/timetable/validate", post(validate_handler))
        .route("/v1/timetable/statistics", get(statistics_handler))
        .route("/v1/timetable/export.csv", get(export_csv_handler))
        .route("/v1/timetable/export.json", get(export_json_handler))
        .with_state(state)
}

pub async fn run_server(timetable: Timetable) -> std::io::Result<()> {
    let bind = timetable.config().server.bind.clone();
    let app = router(timetable);

    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!("Server running at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TimetableConfig;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn app() -> Router {
        let mut config = TimetableConfig::default();
        config.solver.seed = Some(5);
        router(Timetable::new(config))
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn assign_returns_updated_schedule() {
        let response = app()
            .oneshot(post_json(
                "/v1/timetable/assignments",
                json!({"day": "Monday", "timeSlot": "08:00-10:00", "courseId": 1, "roomId": 1}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["schedule"]["Monday-08:00-10:00"]["code"], "CS101");
        assert_eq!(body["conflicts"], json!([]));
    }

    #[tokio::test]
    async fn unknown_course_is_bad_request() {
        let response = app()
            .oneshot(post_json(
                "/v1/timetable/assignments",
                json!({"day": "Monday", "timeSlot": "08:00-10:00", "courseId": 42, "roomId": 1}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("Unknown course id 42"));
    }

    #[tokio::test]
    async fn generate_fills_default_catalog() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/timetable/generate")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["schedule"].as_object().unwrap().len(), 4);
        assert_eq!(body["unscheduled"], json!([]));
    }

    #[tokio::test]
    async fn validate_reports_missing_fields() {
        let response = app()
            .oneshot(post_json(
                "/v1/timetable/validate",
                json!({"day": "", "timeSlot": "08:00-10:00", "courseId": 1, "roomId": 1}),
            ))
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["isValid"], false);
        assert_eq!(body["errors"], json!(["Day is required"]));
    }

    #[tokio::test]
    async fn statistics_on_empty_timetable() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/v1/timetable/statistics")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["statistics"]["totalCourses"], 4);
        assert_eq!(body["statistics"]["utilizationRate"], 0.0);
        assert_eq!(body["roomUtilization"].as_array().unwrap().len(), 4);
        assert_eq!(body["completion"], 0);
    }

    #[tokio::test]
    async fn export_is_csv_attachment() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/v1/timetable/export.csv")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/csv");
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(String::from_utf8_lossy(&bytes).lines().count(), 26);
    }
}
