use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::server::endpoints::{schedule, status};
use crate::types::AppState;

mod endpoints;
pub mod types;

/// Creates a router that can be used by `axum`.
///
/// # Parameters
/// - `app_state`: The app server state.
///
/// # Returns
/// The router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(status::get_health))
        .route("/conflicts", post(schedule::post_conflicts))
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn app(max_courses: usize) -> Router {
        let config = Config {
            max_courses,
            ..Config::default()
        };
        create_router(Arc::new(AppState::new(&config)))
    }

    async fn post_json(router: Router, body: Value) -> (StatusCode, Value) {
        post_raw(router, body.to_string()).await
    }

    async fn post_raw(router: Router, body: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri("/conflicts")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("application/json"), "{content_type}");

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let response = app(50).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_post_conflicts_reports_clash() {
        let body = json!({
            "courses": [
                {
                    "id": "CSE101",
                    "code": "CSE 101",
                    "schedule": [{"day": "Mon", "start": "09:00", "end": "10:30"}]
                },
                {
                    "id": "CSE202",
                    "code": "CSE 202",
                    "schedule": [{"day": "Mon", "start": "10:00", "end": "11:00"}]
                }
            ]
        });

        let (status, json) = post_json(app(50), body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["conflicts"].as_array().unwrap().len(), 1);
        assert_eq!(json["conflicts"][0]["first"], "CSE101");
        assert_eq!(json["conflicts"][0]["overlaps"][0]["window"]["start"], "10:00");
        assert_eq!(json["conflicts"][0]["overlaps"][0]["window"]["end"], "10:30");
        assert_eq!(
            json["summary"][0],
            "CSE 101 and CSE 202 clash on Monday 10:00-10:30"
        );
    }

    #[tokio::test]
    async fn test_post_conflicts_no_schedule() {
        let body = json!({
            "courses": [
                {"id": "A", "schedule": []},
                {"id": "B", "schedule": [{"day": "Tue", "start": "09:00", "end": "10:00"}]}
            ]
        });

        let (status, json) = post_json(app(50), body).await;
        assert_eq!(status, StatusCode::OK);
        assert!(json["conflicts"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_post_conflicts_collects_errors() {
        let body = json!({
            "courses": [
                {"id": 1, "schedule": [{"day": "M", "start": "10:00", "end": "09:00"}]},
                {"id": 1, "schedule": [{"days": "TuTh", "start": "11:00", "end": "11:00"}]},
                {"id": 2}
            ]
        });

        let (status, json) = post_json(app(2), body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let details = json["details"].as_array().unwrap();
        assert_eq!(details.len(), 5);
        let invalid_input = details.iter().filter(|d| d["kind"] == "invalid_input").count();
        let invalid_slot = details
            .iter()
            .filter(|d| d["kind"] == "invalid_time_slot")
            .count();
        assert_eq!(invalid_input, 2);
        assert_eq!(invalid_slot, 3);
    }

    #[tokio::test]
    async fn test_post_conflicts_reports_bad_time_with_other_errors() {
        let body = json!({
            "courses": [
                {"id": "A", "schedule": [{"day": "Mon", "start": "25:00", "end": "26:00"}]},
                {"id": "A", "schedule": [{"day": "Mon", "start": "10:00", "end": "09:00"}]}
            ]
        });

        let (status, json) = post_json(app(50), body).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"], "Invalid course selection");

        let details = json["details"].as_array().unwrap();
        let messages: Vec<&str> = details
            .iter()
            .map(|d| d["message"].as_str().unwrap())
            .collect();
        assert_eq!(details.len(), 4, "{messages:?}");
        assert_eq!(details[0]["kind"], "invalid_input");
        assert!(messages[0].contains("Duplicate course id: A"));
        assert!(details[1..].iter().all(|d| d["kind"] == "invalid_time_slot"));
        assert!(messages[1].contains("25:00"));
        assert!(messages[2].contains("26:00"));
        assert!(messages[3].contains("10:00-09:00"));
    }

    #[tokio::test]
    async fn test_post_conflicts_malformed_body_is_json() {
        let (status, json) = post_raw(app(50), r#"{"courses": ["#.to_string()).await;
        assert!(status.is_client_error());
        assert_eq!(json["error"], "Malformed request body");
        assert!(json["context"].is_string());

        let (status, json) = post_json(app(50), json!({"courses": {"id": "A"}})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(json["error"], "Malformed request body");
    }

    #[tokio::test]
    async fn test_post_conflicts_allows_midnight_end() {
        let body = json!({
            "courses": [
                {"id": "A", "schedule": [{"days": "FSa", "start": "22:00", "end": "24:00"}]},
                {"id": "B", "schedule": [{"days": ["Sat"], "start": "23:30", "end": "24:00"}]}
            ]
        });

        let (status, json) = post_json(app(50), body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["conflicts"][0]["overlaps"][0]["window"]["end"], "24:00");
    }
}
