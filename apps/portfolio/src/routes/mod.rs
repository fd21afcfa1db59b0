pub mod health;
pub mod page;
pub mod reveal;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::features::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState, static_dir: &str) -> Router {
    Router::new()
        .route("/", get(page::page_handler))
        .route("/health", get(health::health_handler))
        // Feature forms (redirect back to the page)
        .route("/features/:feature", post(handlers::handle_run_feature))
        .route(
            "/features/:feature/dismiss",
            post(handlers::handle_dismiss_feature),
        )
        // Feature state API
        .route("/api/v1/features", get(handlers::handle_list_features))
        .route("/api/v1/features/:feature", get(handlers::handle_get_feature))
        .route("/api/v1/reveal/:section", post(reveal::reveal_handler))
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::features::board::tests::wait_until_settled;
    use crate::features::board::{Feature, FeatureBoard};
    use crate::llm_client::tests::{client_with, success_body, FakeTransport, GatedTransport};
    use crate::llm_client::{CompletionClient, Transport};
    use crate::sessions::VISITOR_COOKIE;

    const ALICE: &str = "00000000-0000-4000-8000-00000000a11c";
    const BOB: &str = "00000000-0000-4000-8000-000000000b0b";

    fn app_with(transport: Arc<dyn Transport>) -> (Router, AppState) {
        let state = AppState::new(client_with(transport), 16);
        (build_router(state.clone(), "static"), state)
    }

    async fn board_of(state: &AppState, visitor: &str) -> Arc<FeatureBoard> {
        let id = Uuid::parse_str(visitor).unwrap();
        Arc::clone(&state.sessions.session(id).await.features)
    }

    fn form_post_as(visitor: &str, uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .header(header::COOKIE, format!("{VISITOR_COOKIE}={visitor}"))
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn form_post(uri: &str, body: &str) -> Request<Body> {
        form_post_as(ALICE, uri, body)
    }

    fn get_as(visitor: &str, uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .header(header::COOKIE, format!("{VISITOR_COOKIE}={visitor}"))
            .body(Body::empty())
            .unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        get_as(ALICE, uri)
    }

    async fn body_text(response: Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_str(&body_text(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_index_renders_portfolio() {
        let (app, _) = app_with(FakeTransport::replying(200, "{}"));
        let response = app.oneshot(get_request("/")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("I build intelligent systems."));
    }

    #[tokio::test]
    async fn test_first_visit_is_issued_a_visitor_cookie() {
        let (app, state) = app_with(FakeTransport::replying(200, "{}"));
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with(&format!("{VISITOR_COOKIE}=")));
        assert!(cookie.contains("HttpOnly"));
        assert_eq!(state.sessions.len().await, 1);
    }

    #[tokio::test]
    async fn test_health_reports_key_presence() {
        let (app, _) = app_with(FakeTransport::replying(200, "{}"));
        let response = app.oneshot(get_request("/health")).await.unwrap();

        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
        assert_eq!(json["api_key_configured"], true);
        assert_eq!(json["model"], "test-model");
        assert_eq!(json["visitors"], 0);
    }

    #[tokio::test]
    async fn test_career_coach_post_settles_and_redirects_to_about() {
        let transport = FakeTransport::replying(200, &success_body("Learn **MLOps**."));
        let (app, state) = app_with(transport.clone());

        let response = app
            .oneshot(form_post("/features/career-coach", ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/#about");

        let board = board_of(&state, ALICE).await;
        let snap = wait_until_settled(&board, Feature::CareerCoach).await;
        assert_eq!(snap.copyable_text(), Some("Learn **MLOps**."));
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_redirect_returns_before_the_call_and_the_call_still_finishes() {
        let transport = GatedTransport::new("Learn **Rust**.");
        let (app, state) = app_with(transport.clone());

        let response = app
            .clone()
            .oneshot(form_post("/features/career-coach", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        drop(response);
        transport.wait_for_calls(1).await;
        assert_eq!(transport.finished(), 0);

        // The submitting visitor sees Pending on the page they are sent back to.
        let html = body_text(app.clone().oneshot(get_request("/")).await.unwrap()).await;
        assert!(html.contains("Analyzing profile..."));
        assert!(html.contains(r#"http-equiv="refresh""#));

        transport.open();
        let board = board_of(&state, ALICE).await;
        let snap = wait_until_settled(&board, Feature::CareerCoach).await;
        assert_eq!(transport.finished(), 1);
        assert_eq!(snap.copyable_text(), Some("Learn **Rust**."));

        // A fresh submission is accepted once the cycle has settled.
        app.oneshot(form_post("/features/career-coach", ""))
            .await
            .unwrap();
        transport.wait_for_calls(2).await;
        transport.open();
    }

    #[tokio::test]
    async fn test_status_probe_always_leaves_checking() {
        let transport = GatedTransport::new("hi");
        let (app, state) = app_with(transport.clone());

        app.oneshot(form_post("/features/service-status", ""))
            .await
            .unwrap();
        transport.wait_for_calls(1).await;
        transport.open();

        let board = board_of(&state, ALICE).await;
        wait_until_settled(&board, Feature::ServiceStatus).await;
        assert_eq!(
            board.snapshot().await.service_status_summary,
            crate::features::status::ServiceStatus::Operational
        );
    }

    #[tokio::test]
    async fn test_visitors_do_not_share_feature_state() {
        let transport = GatedTransport::new("Subject: hi");
        let (app, state) = app_with(transport.clone());

        app.clone()
            .oneshot(form_post_as(ALICE, "/features/message-draft", "topic=Rust"))
            .await
            .unwrap();
        transport.wait_for_calls(1).await;

        // Bob is not blocked by Alice's pending draft and does not see her topic.
        app.clone()
            .oneshot(form_post_as(BOB, "/features/message-draft", "topic=Go"))
            .await
            .unwrap();
        transport.wait_for_calls(2).await;

        let bob_page = body_text(app.clone().oneshot(get_as(BOB, "/")).await.unwrap()).await;
        assert!(bob_page.contains(r#"value="Go""#));
        assert!(!bob_page.contains(r#"value="Rust""#));

        transport.open();
        transport.open();
        let alice = board_of(&state, ALICE).await;
        let bob = board_of(&state, BOB).await;
        wait_until_settled(&alice, Feature::MessageDraft).await;
        wait_until_settled(&bob, Feature::MessageDraft).await;

        // Bob dismissing his draft leaves Alice's in place.
        app.oneshot(form_post_as(BOB, "/features/message-draft/dismiss", ""))
            .await
            .unwrap();
        assert!(alice.feature_snapshot(Feature::MessageDraft).await.outcome().is_some());
        assert!(bob.feature_snapshot(Feature::MessageDraft).await.outcome().is_none());
    }

    #[tokio::test]
    async fn test_settled_result_appears_on_next_page_load() {
        let transport = FakeTransport::replying(200, &success_body("**Technical Breakdown**"));
        let (app, state) = app_with(transport);

        app.clone()
            .oneshot(form_post("/features/project-insights", "project=1"))
            .await
            .unwrap();
        let board = board_of(&state, ALICE).await;
        wait_until_settled(&board, Feature::ProjectInsights).await;
        let html = body_text(app.oneshot(get_request("/")).await.unwrap()).await;

        assert!(html.contains("AI Project Insights: Crop Disease Prediction Model"));
        assert!(html.contains("<strong>Technical Breakdown</strong>"));
    }

    #[tokio::test]
    async fn test_unknown_project_is_404_without_a_call() {
        let transport = FakeTransport::replying(200, &success_body("unused"));
        let (app, _) = app_with(transport.clone());

        let response = app
            .oneshot(form_post("/features/project-insights", "project=99"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_blank_draft_topic_is_rejected() {
        let transport = FakeTransport::replying(200, &success_body("unused"));
        let (app, _) = app_with(transport.clone());

        let response = app
            .oneshot(form_post("/features/message-draft", "topic=+++"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_unknown_feature_returns_json_404() {
        let (app, _) = app_with(FakeTransport::replying(200, "{}"));
        let response = app
            .oneshot(form_post("/features/horoscope", ""))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_dismiss_returns_feature_to_idle() {
        let transport = FakeTransport::replying(200, &success_body("Subject: hi"));
        let (app, state) = app_with(transport);

        app.clone()
            .oneshot(form_post("/features/message-draft", "topic=Rust"))
            .await
            .unwrap();
        let board = board_of(&state, ALICE).await;
        wait_until_settled(&board, Feature::MessageDraft).await;

        let response = app
            .clone()
            .oneshot(form_post("/features/message-draft/dismiss", ""))
            .await
            .unwrap();
        assert_eq!(response.headers()[header::LOCATION], "/#contact");

        let json = body_json(
            app.oneshot(get_request("/api/v1/features/message-draft"))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(json["state"], "idle");
        assert_eq!(json["subject"], Value::Null);
    }

    #[tokio::test]
    async fn test_status_probe_without_key_reports_connection_failed() {
        let transport = FakeTransport::replying(200, &success_body("unused"));
        let llm = CompletionClient::with_transport(
            transport.clone(),
            None,
            "http://localhost/v1beta",
            "test-model",
        );
        let state = AppState::new(llm, 16);
        let app = build_router(state.clone(), "static");

        app.clone()
            .oneshot(form_post("/features/service-status", ""))
            .await
            .unwrap();
        let board = board_of(&state, ALICE).await;
        wait_until_settled(&board, Feature::ServiceStatus).await;
        let json = body_json(app.oneshot(get_request("/api/v1/features")).await.unwrap()).await;

        assert_eq!(transport.calls(), 0);
        assert_eq!(json["service_status_summary"], "connection_failed");
        assert_eq!(json["service_status"]["state"], "settled");
        assert_eq!(json["service_status"]["kind"], "failure");
    }

    #[tokio::test]
    async fn test_revealed_section_stays_revealed_on_reload() {
        let (app, _) = app_with(FakeTransport::replying(200, "{}"));
        let report = |ratio: f64| {
            Request::builder()
                .method("POST")
                .uri("/api/v1/reveal/skills")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::COOKIE, format!("{VISITOR_COOKIE}={ALICE}"))
                .body(Body::from(format!(
                    r#"{{"intersection_ratio": {ratio}, "is_intersecting": true}}"#
                )))
                .unwrap()
        };

        let below = body_json(app.clone().oneshot(report(0.05)).await.unwrap()).await;
        assert_eq!(below["visible"], false);

        let json = body_json(app.clone().oneshot(report(0.4)).await.unwrap()).await;
        assert_eq!(json["visible"], true);
        assert_eq!(json["revealed_now"], true);

        let html = body_text(app.clone().oneshot(get_request("/")).await.unwrap()).await;
        assert!(html.contains(r#"<section id="skills" class="section reveal revealed ">"#));

        let other = body_text(app.oneshot(get_as(BOB, "/")).await.unwrap()).await;
        assert!(other.contains(r#"<section id="skills" class="section reveal concealed ""#));
    }

    #[tokio::test]
    async fn test_reveal_of_unknown_section_is_404() {
        let (app, _) = app_with(FakeTransport::replying(200, "{}"));
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/reveal/footer")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"intersection_ratio": 1.0, "is_intersecting": true}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
