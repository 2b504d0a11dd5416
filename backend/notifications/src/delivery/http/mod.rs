pub mod v1;

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, put},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::delivery::http::v1::notifications::{
    create_notification, get_category_style, get_notification, get_unread_count, list_notifications,
    mark_all_as_read, mark_as_read, remove_notification,
};
use crate::delivery::http::v1::preferences::{get_preferences, update_preferences};
use crate::AppState;

/// Static segments under `/api/v1/notifications` win over `{id}`; the create
/// handler refuses ids equal to them (see `RESERVED_IDS`).
pub fn router(state: Arc<AppState>) -> Router {
    let notifications_api = Router::new()
        .route(
            "/api/v1/notifications",
            get(list_notifications).post(create_notification),
        )
        .route("/api/v1/notifications/unread-count", get(get_unread_count))
        .route("/api/v1/notifications/read-all", put(mark_all_as_read))
        .route(
            "/api/v1/notifications/preferences",
            get(get_preferences).put(update_preferences),
        )
        .route("/api/v1/notifications/styles/{kind}", get(get_category_style))
        .route(
            "/api/v1/notifications/{id}",
            get(get_notification).delete(remove_notification),
        )
        .route("/api/v1/notifications/{id}/read", put(mark_as_read));

    Router::new()
        .route("/healthz", get(healthz))
        .route("/metrics", get(metrics))
        .merge(notifications_api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn metrics(State(state): State<Arc<AppState>>) -> String {
    metrics_process::Collector::default().collect();
    state.metrics_handle.render()
}

#[tracing::instrument]
async fn healthz() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request, StatusCode};
    use axum::response::Response;
    use chrono::Utc;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use tower::ServiceExt;

    use super::*;
    use crate::repository::memory::NotificationStore;
    use crate::usecase::notifications::NotificationsUseCase;
    use crate::usecase::seed::demo_inbox;

    fn make_router() -> Router {
        let store = NotificationStore::seeded(demo_inbox(Utc::now())).unwrap();
        router(Arc::new(AppState {
            notifications_usecase: NotificationsUseCase::new(store),
            metrics_handle: PrometheusBuilder::new().build_recorder().handle(),
        }))
    }

    async fn send(app: &Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => request
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn create_body(id: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "title": "Lab Results",
            "message": "Your results are ready",
            "category": "message",
        })
    }

    #[tokio::test]
    async fn test_route_ids_are_refused_on_create() {
        let app = make_router();

        for id in ["read-all", "unread-count", "styles", "preferences", "a/b"] {
            let response = send(&app, Method::POST, "/api/v1/notifications", Some(create_body(id))).await;
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "id {id}");
        }

        let response = send(&app, Method::GET, "/api/v1/notifications/unread-count", None).await;
        assert_eq!(body_json(response).await["unread_count"], 3);
    }

    #[tokio::test]
    async fn test_created_item_is_addressable_by_id() {
        let app = make_router();

        let response = send(&app, Method::POST, "/api/v1/notifications", Some(create_body("read-all-2"))).await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = send(&app, Method::GET, "/api/v1/notifications/read-all-2", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["style"]["icon"], "message-square");

        let response = send(&app, Method::PUT, "/api/v1/notifications/read-all-2/read", None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(&app, Method::DELETE, "/api/v1/notifications/read-all-2", None).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(&app, Method::GET, "/api/v1/notifications/read-all-2", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_collection_routes() {
        let app = make_router();

        let response = send(&app, Method::GET, "/api/v1/notifications?sort=newest&read=false", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["notifications"].as_array().unwrap().len(), 3);

        let response = send(&app, Method::GET, "/api/v1/notifications/styles/system", None).await;
        assert_eq!(body_json(response).await["icon"], "clock");

        let response = send(&app, Method::PUT, "/api/v1/notifications/read-all", None).await;
        assert_eq!(body_json(response).await["updated"], 3);

        let response = send(&app, Method::GET, "/healthz", None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_preferences_routes_gate_create() {
        let app = make_router();

        let response = send(&app, Method::GET, "/api/v1/notifications/preferences", None).await;
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["enabled"], true);
        assert_eq!(json["sms"], false);

        let response = send(
            &app,
            Method::PUT,
            "/api/v1/notifications/preferences",
            Some(serde_json::json!({ "message": false })),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], false);

        let response = send(&app, Method::POST, "/api/v1/notifications", Some(create_body("m-1"))).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = send(&app, Method::GET, "/api/v1/notifications/m-1", None).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
