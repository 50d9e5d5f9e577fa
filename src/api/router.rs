//! Intake API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! Routes are nested under `/api/`.
//!
//! Middleware stack (outermost → innermost):
//! 1. CORS → 2. Audit logger

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the intake API router.
///
/// Endpoint handlers use `State<ApiContext>` (provided via `with_state`).
pub fn intake_api_router(core: Arc<CoreState>) -> Router {
    let ctx = ApiContext::new(core);
    build_router(ctx)
}

fn build_router(ctx: ApiContext) -> Router {
    // NOTE: Path params use `:param` syntax (matchit 0.7 / axum 0.7).
    let api = Router::new()
        .route("/health", get(endpoints::health::check))
        .route("/symptoms", get(endpoints::catalog::symptoms))
        .route("/symptoms/red-flags", get(endpoints::catalog::red_flags))
        .route("/conditions", get(endpoints::catalog::conditions))
        .route("/triage/evaluate", post(endpoints::triage::evaluate))
        .route("/intake", post(endpoints::intake::create))
        .route(
            "/intake/:id",
            get(endpoints::intake::view).delete(endpoints::intake::discard),
        )
        .route("/intake/:id/search", get(endpoints::intake::search))
        .route("/intake/:id/toggle", post(endpoints::intake::toggle))
        .route("/intake/:id/annotate", post(endpoints::intake::annotate))
        .route("/intake/:id/advance", post(endpoints::intake::advance))
        .route("/intake/:id/back", post(endpoints::intake::back))
        .route("/intake/:id/reset", post(endpoints::intake::reset))
        .with_state(ctx)
        // Middleware stack (innermost first, outermost last):
        .layer(axum::middleware::from_fn(middleware::audit::log_access))
        .layer(CorsLayer::permissive());

    Router::new().nest("/api", api)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::ServerConfig;

    fn test_app() -> Router {
        intake_api_router(Arc::new(CoreState::new(ServerConfig::default())))
    }

    fn make_request(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(json) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(make_request(method, uri, body))
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1 << 20).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    async fn start_intake(app: &Router) -> String {
        let (status, json) = send(app, "POST", "/api/intake", None).await;
        assert_eq!(status, StatusCode::CREATED);
        json["id"].as_str().unwrap().to_string()
    }

    async fn toggle(app: &Router, id: &str, symptom: &str) -> (StatusCode, Value) {
        send(
            app,
            "POST",
            &format!("/api/intake/{id}/toggle"),
            Some(json!({ "symptomId": symptom })),
        )
        .await
    }

    // ── Catalog ─────────────────────────────────────────────

    #[tokio::test]
    async fn health_reports_version() {
        let app = test_app();
        let (status, json) = send(&app, "GET", "/api/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], crate::config::APP_VERSION);
        assert_eq!(json["activeIntakes"], 0);
        assert_eq!(json["maxIntakes"], 10_000);
        assert!(json["uptimeSecs"].as_i64().unwrap() >= 0);
    }

    #[tokio::test]
    async fn symptoms_listing_and_filters() {
        let app = test_app();
        let (_, all) = send(&app, "GET", "/api/symptoms", None).await;
        assert_eq!(all.as_array().unwrap().len(), 26);
        assert_eq!(all[0]["id"], "sadness");
        assert_eq!(all[0]["style"]["accent"], "blue");
        let insomnia = all
            .as_array()
            .unwrap()
            .iter()
            .find(|s| s["id"] == "insomnia")
            .unwrap();
        assert_eq!(
            insomnia["relatedConditions"],
            json!(["depression", "gad", "burnout"])
        );

        let (_, cognitive) = send(&app, "GET", "/api/symptoms?category=cognitive", None).await;
        assert!(cognitive
            .as_array()
            .unwrap()
            .iter()
            .all(|s| s["category"] == "cognitive"));

        let (_, hits) = send(&app, "GET", "/api/symptoms?q=sleep", None).await;
        assert_eq!(hits.as_array().unwrap().len(), 1);
        assert_eq!(hits[0]["id"], "oversleeping");
    }

    #[tokio::test]
    async fn unknown_category_is_bad_request() {
        let app = test_app();
        let (status, json) = send(&app, "GET", "/api/symptoms?category=spiritual", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn red_flags_and_conditions() {
        let app = test_app();
        let (_, flags) = send(&app, "GET", "/api/symptoms/red-flags", None).await;
        assert_eq!(flags["symptomIds"], json!(["suicidal_thoughts", "hallucinations"]));

        let (_, conditions) = send(&app, "GET", "/api/conditions", None).await;
        assert_eq!(conditions.as_array().unwrap().len(), 5);
        assert_eq!(conditions[0]["id"], "depression");
        assert_eq!(conditions[0]["articleId"], "1");
    }

    // ── Stateless triage ────────────────────────────────────

    #[tokio::test]
    async fn evaluate_ranks_matches() {
        let app = test_app();
        let (status, json) = send(
            &app,
            "POST",
            "/api/triage/evaluate",
            Some(json!({ "symptomIds": ["fatigue", "insomnia", "irritability", "brain_fog", "xyz"] })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["isCrisis"], false);
        assert_eq!(json["conditions"][0]["id"], "burnout");
        assert_eq!(json["conditions"][0]["matchRate"], 57);
        assert!(json.get("crisisResources").is_none());
    }

    #[tokio::test]
    async fn evaluate_without_symptom_ids_is_bad_request() {
        let app = test_app();
        let (status, json) =
            send(&app, "POST", "/api/triage/evaluate", Some(json!({ "ids": [] }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
        assert!(json["error"]["message"].as_str().unwrap().contains("symptomIds"));
    }

    #[tokio::test]
    async fn evaluate_crisis_includes_resources() {
        let app = test_app();
        let (_, json) = send(
            &app,
            "POST",
            "/api/triage/evaluate",
            Some(json!({ "symptomIds": ["sadness", "suicidal_thoughts"] })),
        )
        .await;
        assert_eq!(json["isCrisis"], true);
        assert!(json.get("conditions").is_none());
        assert_eq!(json["crisisResources"]["primary"]["contact"], "988");
    }

    // ── Intake sessions ─────────────────────────────────────

    #[tokio::test]
    async fn intake_walkthrough() {
        let app = test_app();
        let id = start_intake(&app).await;

        let (_, view) = send(&app, "GET", &format!("/api/intake/{id}"), None).await;
        assert_eq!(view["step"], "search");
        assert_eq!(view["progress"], json!({ "currentStep": 1, "totalSteps": 3 }));
        assert_eq!(view["canAdvance"], false);
        assert_eq!(view["suggestions"].as_array().unwrap().len(), 8);

        let (status, json) = send(&app, "POST", &format!("/api/intake/{id}/advance"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["transition"], json!({ "status": "blocked", "detail": "emptySelection" }));

        for symptom in ["intrusive_thoughts", "compulsions", "anxiety", "worry"] {
            let (status, json) = toggle(&app, &id, symptom).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(json["selected"], true);
        }

        let (_, json) = send(&app, "POST", &format!("/api/intake/{id}/advance"), None).await;
        assert_eq!(json["transition"]["detail"], "refine");
        assert_eq!(json["intake"]["selected"].as_array().unwrap().len(), 4);

        let (status, view) = send(
            &app,
            "POST",
            &format!("/api/intake/{id}/annotate"),
            Some(json!({ "symptomId": "worry", "severity": 8, "duration": "months+" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(view["selected"][3]["annotation"]["severity"], 8);

        let (_, json) = send(&app, "POST", &format!("/api/intake/{id}/advance"), None).await;
        assert_eq!(json["transition"]["detail"], "analyze");
        let result = &json["intake"]["result"];
        assert_eq!(result["isCrisis"], false);
        assert_eq!(result["conditions"][0]["id"], "ocd");
        assert_eq!(result["conditions"][0]["matchRate"], 100);
    }

    #[tokio::test]
    async fn red_flag_goes_straight_to_crisis() {
        let app = test_app();
        let id = start_intake(&app).await;
        toggle(&app, &id, "hallucinations").await;
        let (_, json) = send(&app, "POST", &format!("/api/intake/{id}/advance"), None).await;
        assert_eq!(json["intake"]["step"], "analyze");
        assert_eq!(json["intake"]["result"]["isCrisis"], true);
        assert_eq!(
            json["intake"]["result"]["crisisResources"]["others"][0]["keyword"],
            "HOME"
        );
    }

    #[tokio::test]
    async fn wrong_step_is_conflict() {
        let app = test_app();
        let id = start_intake(&app).await;
        let (status, json) = send(
            &app,
            "POST",
            &format!("/api/intake/{id}/annotate"),
            Some(json!({ "symptomId": "fatigue", "severity": 3 })),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["error"]["code"], "WRONG_STEP");
    }

    #[tokio::test]
    async fn malformed_annotation_bodies_are_bad_request() {
        let app = test_app();
        let id = start_intake(&app).await;
        toggle(&app, &id, "fatigue").await;
        send(&app, "POST", &format!("/api/intake/{id}/advance"), None).await;

        for body in [
            json!({ "symptomId": "fatigue", "severity": 300 }),
            json!({ "symptomId": "fatigue", "duration": "years" }),
        ] {
            let (status, json) =
                send(&app, "POST", &format!("/api/intake/{id}/annotate"), Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["error"]["code"], "BAD_REQUEST");
        }

        let (_, view) = send(&app, "GET", &format!("/api/intake/{id}"), None).await;
        assert!(view["selected"][0]["annotation"]["severity"].is_null());
        assert_eq!(view["selected"][0]["slider"], 5);
        assert_eq!(view["selected"][0]["severityBand"], "moderate");
    }

    #[tokio::test]
    async fn intake_search_hides_selected_symptoms() {
        let app = test_app();
        let id = start_intake(&app).await;

        let (_, hits) = send(&app, "GET", &format!("/api/intake/{id}/search?q=worr"), None).await;
        let ids: Vec<&str> = hits
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["anxiety", "worry"]);

        toggle(&app, &id, "anxiety").await;
        let (status, hits) =
            send(&app, "GET", &format!("/api/intake/{id}/search?q=worr"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(hits.as_array().unwrap().len(), 1);
        assert_eq!(hits[0]["id"], "worry");
        assert_eq!(hits[0]["relatedConditions"], json!(["gad", "ocd"]));

        let (_, empty) = send(&app, "GET", &format!("/api/intake/{id}/search"), None).await;
        assert_eq!(empty, json!([]));
    }

    #[tokio::test]
    async fn unknown_symptom_is_bad_request() {
        let app = test_app();
        let id = start_intake(&app).await;
        let (status, _) = toggle(&app, &id, "no_such_symptom").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn back_from_search_ends_session() {
        let app = test_app();
        let id = start_intake(&app).await;
        toggle(&app, &id, "fatigue").await;
        send(&app, "POST", &format!("/api/intake/{id}/advance"), None).await;

        let (_, json) = send(&app, "POST", &format!("/api/intake/{id}/back"), None).await;
        assert_eq!(json["exited"], false);
        assert_eq!(json["intake"]["step"], "search");
        assert_eq!(json["intake"]["selected"][0]["symptom"]["id"], "fatigue");

        let (_, json) = send(&app, "POST", &format!("/api/intake/{id}/back"), None).await;
        assert_eq!(json, json!({ "exited": true }));

        let (status, _) = send(&app, "GET", &format!("/api/intake/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn reset_clears_selection() {
        let app = test_app();
        let id = start_intake(&app).await;
        toggle(&app, &id, "fatigue").await;
        send(&app, "POST", &format!("/api/intake/{id}/advance"), None).await;
        let (_, view) = send(&app, "POST", &format!("/api/intake/{id}/reset"), None).await;
        assert_eq!(view["step"], "search");
        assert_eq!(view["selected"], json!([]));
    }

    #[tokio::test]
    async fn delete_discards_session() {
        let app = test_app();
        let id = start_intake(&app).await;
        let (status, _) = send(&app, "DELETE", &format!("/api/intake/{id}"), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, "DELETE", &format!("/api/intake/{id}"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn malformed_intake_id_is_bad_request() {
        let app = test_app();
        let (status, json) = send(&app, "GET", "/api/intake/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn capacity_limit_returns_503() {
        let core = Arc::new(CoreState::new(ServerConfig {
            max_sessions: 1,
            ..ServerConfig::default()
        }));
        let app = intake_api_router(core);
        start_intake(&app).await;
        let (status, json) = send(&app, "POST", "/api/intake", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(json["error"]["code"], "AT_CAPACITY");
    }

    #[tokio::test]
    async fn not_found_for_unknown_route() {
        let app = test_app();
        let response = app
            .oneshot(make_request("GET", "/api/nonexistent", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
