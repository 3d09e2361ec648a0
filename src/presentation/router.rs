// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    add_component, check_compatibility, compact_dashboard, create_dashboard, delete_dashboard,
    evaluate_filters, get_dashboard, health_check, list_dashboards, remove_component,
    update_component,
};
use axum::{
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/dashboards", get(list_dashboards).post(create_dashboard))
        .route("/dashboards/:id", get(get_dashboard).delete(delete_dashboard))
        .route("/dashboards/:id/components", post(add_component))
        .route(
            "/dashboards/:id/components/:component_id",
            patch(update_component).delete(remove_component),
        )
        .route("/dashboards/:id/compact", post(compact_dashboard))
        .route("/filters/compatibility", post(check_compatibility))
        .route("/filters/evaluate", post(evaluate_filters))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
