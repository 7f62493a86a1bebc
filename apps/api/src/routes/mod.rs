pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::generation::handlers as generation;
use crate::history::handlers as history;
use crate::planner::handlers as planner;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Content generation
        .route(
            "/api/v1/content/generate",
            post(generation::handle_generate),
        )
        .route("/api/v1/images", post(generation::handle_generate_image))
        .route("/api/v1/share", post(generation::handle_share_link))
        // History
        .route("/api/v1/history", get(history::handle_list_history))
        .route(
            "/api/v1/history/:id",
            put(history::handle_update_history).delete(history::handle_delete_history),
        )
        // Content planner
        .route("/api/v1/plans", post(planner::handle_generate_plan))
        .route("/api/v1/plans/export", post(planner::handle_export_plan))
        .route("/api/v1/plans/edit", post(planner::handle_edit_plan))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use uuid::Uuid;

    use super::*;
    use crate::config::Config;
    use crate::llm_client::LlmError;
    use crate::test_support::{test_config, InMemoryHistoryStore, ScriptedGenerator};

    fn app(script: Vec<Result<String, LlmError>>) -> Router {
        build_router(AppState {
            config: test_config(),
            generator: Arc::new(ScriptedGenerator::new(script)),
            history: Arc::new(InMemoryHistoryStore::default()),
        })
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();
        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = send(&app(vec![]), "GET", "/health", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_plan_normalizes_generator_text() {
        let text = "Here is your content plan for the week\n\nLaunch: We are live today\nHi\nBehind the scenes: Meet the team";
        let app = app(vec![Ok(text.to_string())]);

        let response = send(
            &app,
            "POST",
            "/api/v1/plans",
            Some(json!({ "industry": "coffee", "duration": "1 week" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["duration"], "1 week");
        assert_eq!(body["duration_days"], 7);
        let entries = body["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 7);
        assert_eq!(entries[0]["topic"], "Here is your content plan for the week");
        assert_eq!(entries[1]["topic"], "Launch");
        assert_eq!(entries[2]["topic"], "Behind the scenes");
        assert_eq!(body["placeholder_count"], 4);
    }

    #[tokio::test]
    async fn test_plan_degrades_to_placeholders_on_provider_failure() {
        let app = app(vec![Err(LlmError::Api {
            status: 429,
            message: "quota".into(),
        })]);

        let response = send(&app, "POST", "/api/v1/plans", Some(json!({ "duration": "2 weeks" }))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["entries"].as_array().unwrap().len(), 14);
        assert_eq!(body["placeholder_count"], 14);
        assert_eq!(body["entries"][13]["topic"], "Content Topic 14");
    }

    #[tokio::test]
    async fn test_generate_then_list_update_and_delete_history() {
        let app = app(vec![Ok("LinkedIn post body".into())]);
        let user_id = Uuid::new_v4();

        let response = send(
            &app,
            "POST",
            "/api/v1/content/generate",
            Some(json!({
                "user_id": user_id,
                "prompt": "our seed round",
                "platforms": ["linkedin"]
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let generated = body_json(response).await;
        assert_eq!(generated["results"][0]["kind"], "text");
        assert_eq!(generated["results"][0]["content"], "LinkedIn post body");
        let id = generated["history_id"].as_str().unwrap().to_string();

        let response = send(&app, "GET", &format!("/api/v1/history?user_id={user_id}"), None).await;
        let listed = body_json(response).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert_eq!(listed[0]["prompt"], "our seed round");

        let response = send(
            &app,
            "PUT",
            &format!("/api/v1/history/{id}"),
            Some(json!({
                "user_id": user_id,
                "prompt": "our seed round (edited)",
                "platforms": ["linkedin"],
                "results": [{ "kind": "text", "platform": "linkedin", "content": "Edited body" }]
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["results"][0]["content"], "Edited body");

        let uri = format!("/api/v1/history/{id}?user_id={user_id}");
        assert_eq!(send(&app, "DELETE", &uri, None).await.status(), StatusCode::NO_CONTENT);
        assert_eq!(send(&app, "DELETE", &uri, None).await.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_history_is_scoped_to_user() {
        let app = app(vec![Ok("post".into())]);
        let owner = Uuid::new_v4();
        send(
            &app,
            "POST",
            "/api/v1/content/generate",
            Some(json!({ "user_id": owner, "prompt": "p", "platforms": ["email"] })),
        )
        .await;

        let other = Uuid::new_v4();
        let response = send(&app, "GET", &format!("/api/v1/history?user_id={other}"), None).await;
        assert!(body_json(response).await.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_generate_without_platforms_is_bad_request() {
        let response = send(
            &app(vec![]),
            "POST",
            "/api/v1/content/generate",
            Some(json!({ "user_id": Uuid::new_v4(), "prompt": "hello", "platforms": [] })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_generate_provider_failure_is_bad_gateway() {
        let app = app(vec![Err(LlmError::Api {
            status: 401,
            message: "API key not valid".into(),
        })]);
        let response = send(
            &app,
            "POST",
            "/api/v1/content/generate",
            Some(json!({ "user_id": Uuid::new_v4(), "prompt": "hello", "platforms": ["facebook"] })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(body_json(response).await["error"]["code"], "LLM_ERROR");
    }

    #[tokio::test]
    async fn test_image_endpoint_returns_data_url() {
        let app = app(vec![Ok("data:image/jpeg;base64,AAAA".into())]);
        let response = send(&app, "POST", "/api/v1/images", Some(json!({ "prompt": "a latte" }))).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["image_url"], "data:image/jpeg;base64,AAAA");

        let response = send(&app, "POST", "/api/v1/images", Some(json!({ "prompt": " " }))).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_share_link_per_platform() {
        let app = app(vec![]);

        let response = send(
            &app,
            "POST",
            "/api/v1/share",
            Some(json!({ "platform": "whatsapp", "content": "Hello world" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await["share_url"],
            "https://wa.me/?text=Hello%20world"
        );

        let response = send(
            &app,
            "POST",
            "/api/v1/share",
            Some(json!({ "platform": "instagram", "content": "Hello world" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_json(response).await["share_url"].is_null());
    }

    #[tokio::test]
    async fn test_plan_dates_follow_frequency_when_enabled() {
        use chrono::{Datelike, NaiveDate, Weekday};

        let app = build_router(AppState {
            config: Config {
                plan_frequency_aware_dates: true,
                ..test_config()
            },
            generator: Arc::new(ScriptedGenerator::new(vec![])),
            history: Arc::new(InMemoryHistoryStore::default()),
        });

        let response = send(
            &app,
            "POST",
            "/api/v1/plans",
            Some(json!({ "duration": "1 week", "posting_frequency": "weekdays only" })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let dates: Vec<NaiveDate> = body["entries"]
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["date"].as_str().unwrap().parse().unwrap())
            .collect();
        assert_eq!(dates.len(), 7);
        assert!(dates
            .iter()
            .all(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun)));
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }

    #[tokio::test]
    async fn test_export_download_is_attachment() {
        let response = send(
            &app(vec![]),
            "POST",
            "/api/v1/plans/export",
            Some(json!({
                "format": "download",
                "duration": "1 week",
                "entries": [{ "date": "2026-10-16", "topic": "Launch", "caption": "Live now" }]
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"content-plan-1-week.txt\""
        );
        assert!(body_text(response).await.starts_with("Date: 2026-10-16\nTopic: Launch\n"));
    }

    #[tokio::test]
    async fn test_export_share_is_inline() {
        let response = send(
            &app(vec![]),
            "POST",
            "/api/v1/plans/export",
            Some(json!({
                "format": "share",
                "entries": [{ "date": "2026-10-16", "topic": "Launch", "caption": "Live now" }]
            })),
        )
        .await;
        assert!(response.headers().get(header::CONTENT_DISPOSITION).is_none());
        assert_eq!(body_text(response).await, "2026-10-16: Launch");
    }

    #[tokio::test]
    async fn test_edit_plan_replaces_matching_entry() {
        let entries = json!([
            { "date": "2026-10-16", "topic": "Launch", "caption": "Live now" },
            { "date": "2026-10-17", "topic": "Tips", "caption": "Three tips" }
        ]);
        let app = app(vec![]);

        let response = send(
            &app,
            "POST",
            "/api/v1/plans/edit",
            Some(json!({
                "entries": entries,
                "original_date": "2026-10-17",
                "original_topic": "Tips",
                "edited": { "date": "2026-10-18", "topic": "Five tips", "caption": "More tips", "platform": "LinkedIn" }
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["replaced"], 1);
        assert_eq!(body["entries"][1]["date"], "2026-10-18");
        assert_eq!(body["entries"][1]["platform"], "LinkedIn");

        let response = send(
            &app,
            "POST",
            "/api/v1/plans/edit",
            Some(json!({
                "entries": entries,
                "original_date": "2026-10-20",
                "original_topic": "Missing",
                "edited": { "date": "2026-10-20", "topic": "x", "caption": "y" }
            })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
