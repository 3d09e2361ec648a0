// HTTP request handlers
use crate::application::canvas_service::{CanvasError, ComponentPatch, NewComponent};
use crate::application::filter_service::{CompatibilitySummary, DatasetSample};
use crate::domain::canvas::{Component, Dashboard, GridSpec};
use crate::domain::dataset::flatten_dataset;
use crate::domain::filter::{FilterGroup, FilterOutcome};
use crate::presentation::app_state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct CreateDashboardRequest {
    pub name: String,
    #[serde(default)]
    pub grid: Option<GridSpec>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetPayload {
    pub dataset_id: String,
    /// Raw data function output, flattened before use
    #[serde(default)]
    pub records: Value,
}

#[derive(Deserialize)]
pub struct CompatibilityRequest {
    #[serde(default)]
    pub datasets: Vec<DatasetPayload>,
}

#[derive(Deserialize)]
pub struct EvaluateRequest {
    #[serde(default)]
    pub records: Value,
    #[serde(default)]
    pub groups: Vec<FilterGroup>,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn list_dashboards(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Dashboard>>, CanvasError> {
    Ok(Json(state.canvas_service.list_dashboards().await?))
}

pub async fn create_dashboard(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateDashboardRequest>,
) -> Result<(StatusCode, Json<Dashboard>), CanvasError> {
    let dashboard = state
        .canvas_service
        .create_dashboard(&request.name, request.grid)
        .await?;
    Ok((StatusCode::CREATED, Json(dashboard)))
}

pub async fn get_dashboard(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Dashboard>, CanvasError> {
    Ok(Json(state.canvas_service.get_dashboard(&id).await?))
}

pub async fn delete_dashboard(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, CanvasError> {
    state.canvas_service.delete_dashboard(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn add_component(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(request): Json<NewComponent>,
) -> Result<(StatusCode, Json<Component>), CanvasError> {
    let component = state.canvas_service.add_component(&id, request).await?;
    Ok((StatusCode::CREATED, Json(component)))
}

/// Drag or resize a component; responds with the re-packed dashboard
pub async fn update_component(
    Path((id, component_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
    Json(patch): Json<ComponentPatch>,
) -> Result<Json<Dashboard>, CanvasError> {
    let dashboard = state
        .canvas_service
        .update_component(&id, &component_id, patch)
        .await?;
    Ok(Json(dashboard))
}

pub async fn remove_component(
    Path((id, component_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Dashboard>, CanvasError> {
    let dashboard = state
        .canvas_service
        .remove_component(&id, &component_id)
        .await?;
    Ok(Json(dashboard))
}

pub async fn compact_dashboard(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<Dashboard>, CanvasError> {
    Ok(Json(state.canvas_service.compact(&id).await?))
}

/// Filter kinds available per dataset and across all of them
pub async fn check_compatibility(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CompatibilityRequest>,
) -> Json<CompatibilitySummary> {
    let datasets: Vec<DatasetSample> = request
        .datasets
        .into_iter()
        .map(|d| DatasetSample {
            dataset_id: d.dataset_id,
            records: flatten_dataset(d.records),
        })
        .collect();

    Json(state.filter_service.analyze(&datasets))
}

pub async fn evaluate_filters(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EvaluateRequest>,
) -> Json<FilterOutcome> {
    let records = flatten_dataset(request.records);
    Json(state.filter_service.evaluate(&records, &request.groups))
}
