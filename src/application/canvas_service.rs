// Canvas service - use cases for placing, moving and removing dashboard components
use crate::application::dashboard_store::DashboardStore;
use crate::application::layout_compactor::compact;
use crate::application::position_allocator::find_position;
use crate::domain::canvas::{
    Component, ComponentKind, Dashboard, GridSpec, MAX_COLUMNS, MAX_ROWS, Position, Size,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CanvasError {
    #[error("dashboard {0} not found")]
    DashboardNotFound(String),
    #[error("component {component_id} not found on dashboard {dashboard_id}")]
    ComponentNotFound {
        dashboard_id: String,
        component_id: String,
    },
    #[error("component size {width}x{height} is outside the grid limits")]
    InvalidSize { width: u32, height: u32 },
    #[error("grid needs 1 to {} columns and a positive row height", MAX_COLUMNS)]
    InvalidGrid,
    #[error("dashboard store failure: {0}")]
    Store(#[from] anyhow::Error),
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewComponent {
    pub kind: ComponentKind,
    pub size: Size,
    #[serde(default)]
    pub payload: Value,
}

/// Drag / resize / payload edit. Absent fields are left alone.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComponentPatch {
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub size: Option<Size>,
    #[serde(default)]
    pub payload: Option<Value>,
}

#[derive(Clone)]
pub struct CanvasService {
    store: Arc<dyn DashboardStore>,
    default_grid: GridSpec,
    // Load-modify-save cycles run one at a time so each starts from the latest layout.
    write_lock: Arc<Mutex<()>>,
}

impl CanvasService {
    pub fn new(store: Arc<dyn DashboardStore>, default_grid: GridSpec) -> Self {
        Self {
            store,
            default_grid,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn create_dashboard(
        &self,
        name: &str,
        grid: Option<GridSpec>,
    ) -> Result<Dashboard, CanvasError> {
        let grid = grid.unwrap_or(self.default_grid);
        if !grid.is_valid() {
            return Err(CanvasError::InvalidGrid);
        }

        let dashboard = Dashboard::new(Uuid::new_v4().to_string(), name, grid);
        self.store.save(dashboard.clone()).await?;
        tracing::info!(dashboard_id = %dashboard.id, name, "dashboard created");
        Ok(dashboard)
    }

    pub async fn list_dashboards(&self) -> Result<Vec<Dashboard>, CanvasError> {
        Ok(self.store.list().await?)
    }

    pub async fn get_dashboard(&self, id: &str) -> Result<Dashboard, CanvasError> {
        self.store
            .load(id)
            .await?
            .ok_or_else(|| CanvasError::DashboardNotFound(id.to_string()))
    }

    pub async fn delete_dashboard(&self, id: &str) -> Result<(), CanvasError> {
        let _guard = self.write_lock.lock().await;
        if !self.store.delete(id).await? {
            return Err(CanvasError::DashboardNotFound(id.to_string()));
        }
        tracing::info!(dashboard_id = id, "dashboard deleted");
        Ok(())
    }

    /// Place a new component in the first free slot.
    pub async fn add_component(
        &self,
        dashboard_id: &str,
        new: NewComponent,
    ) -> Result<Component, CanvasError> {
        let _guard = self.write_lock.lock().await;
        let mut dashboard = self.get_dashboard(dashboard_id).await?;
        validate_size(new.size, &dashboard.grid)?;

        let size = new.size.clamped_to(&dashboard.grid);
        let position = find_position(&dashboard.components, size, &dashboard.grid);
        let mut component = Component::new(Uuid::new_v4().to_string(), new.kind, position, size);
        component.payload = new.payload;

        dashboard.components.push(component.clone());
        dashboard.updated_at = component.created_at;
        self.store.save(dashboard).await?;

        tracing::info!(
            dashboard_id,
            component_id = %component.id,
            x = position.x,
            y = position.y,
            width = size.width,
            "component placed"
        );
        Ok(component)
    }

    /// Apply a drag or resize, keep it inside the grid, then re-pack the layout.
    pub async fn update_component(
        &self,
        dashboard_id: &str,
        component_id: &str,
        patch: ComponentPatch,
    ) -> Result<Dashboard, CanvasError> {
        let _guard = self.write_lock.lock().await;
        let mut dashboard = self.get_dashboard(dashboard_id).await?;
        let grid = dashboard.grid;
        if let Some(size) = patch.size {
            validate_size(size, &grid)?;
        }

        let component = dashboard
            .components
            .iter_mut()
            .find(|c| c.id == component_id)
            .ok_or_else(|| CanvasError::ComponentNotFound {
                dashboard_id: dashboard_id.to_string(),
                component_id: component_id.to_string(),
            })?;

        if let Some(size) = patch.size {
            component.size = size.clamped_to(&grid);
        }
        if let Some(position) = patch.position {
            component.position = position;
        }
        if let Some(payload) = patch.payload {
            component.payload = payload;
        }
        let max_x = grid.columns.saturating_sub(component.size.width);
        component.position.x = component.position.x.min(max_x);
        component.position.y = component.position.y.min(MAX_ROWS);
        component.updated_at = Utc::now();

        tracing::info!(dashboard_id, component_id, "component updated");
        self.repack(dashboard).await
    }

    /// Remove a component and close the gap it leaves.
    pub async fn remove_component(
        &self,
        dashboard_id: &str,
        component_id: &str,
    ) -> Result<Dashboard, CanvasError> {
        let _guard = self.write_lock.lock().await;
        let mut dashboard = self.get_dashboard(dashboard_id).await?;

        let before = dashboard.components.len();
        dashboard.components.retain(|c| c.id != component_id);
        if dashboard.components.len() == before {
            return Err(CanvasError::ComponentNotFound {
                dashboard_id: dashboard_id.to_string(),
                component_id: component_id.to_string(),
            });
        }

        tracing::info!(dashboard_id, component_id, "component removed");
        self.repack(dashboard).await
    }

    pub async fn compact(&self, dashboard_id: &str) -> Result<Dashboard, CanvasError> {
        let _guard = self.write_lock.lock().await;
        let dashboard = self.get_dashboard(dashboard_id).await?;
        self.repack(dashboard).await
    }

    async fn repack(&self, mut dashboard: Dashboard) -> Result<Dashboard, CanvasError> {
        dashboard.components = compact(&dashboard.components, &dashboard.grid);
        dashboard.updated_at = Utc::now();
        self.store.save(dashboard.clone()).await?;
        tracing::debug!(
            dashboard_id = %dashboard.id,
            components = dashboard.components.len(),
            "layout saved"
        );
        Ok(dashboard)
    }
}

fn validate_size(size: Size, grid: &GridSpec) -> Result<(), CanvasError> {
    if size.fits(grid) {
        Ok(())
    } else {
        Err(CanvasError::InvalidSize {
            width: size.width,
            height: size.height,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::canvas::is_overlap_free;
    use crate::infrastructure::memory_store::InMemoryDashboardStore;
    use serde_json::json;

    fn service() -> CanvasService {
        CanvasService::new(Arc::new(InMemoryDashboardStore::new()), GridSpec::default())
    }

    fn chart(width: u32, height: u32) -> NewComponent {
        NewComponent {
            kind: ComponentKind::Chart,
            size: Size::new(width, height),
            payload: json!({ "title": "Power" }),
        }
    }

    #[tokio::test]
    async fn test_add_components_side_by_side() {
        let service = service();
        let dashboard = service.create_dashboard("Ops", None).await.unwrap();

        let first = service.add_component(&dashboard.id, chart(4, 200)).await.unwrap();
        let second = service.add_component(&dashboard.id, chart(4, 200)).await.unwrap();

        assert_eq!(first.position, Position::new(0, 0));
        assert_eq!(second.position, Position::new(4, 0));
        assert_eq!(second.payload, json!({ "title": "Power" }));

        let stored = service.get_dashboard(&dashboard.id).await.unwrap();
        assert_eq!(stored.components.len(), 2);
    }

    #[tokio::test]
    async fn test_add_clamps_width() {
        let service = service();
        let dashboard = service
            .create_dashboard("Mobile", Some(GridSpec::new(4, 100, 8)))
            .await
            .unwrap();
        let component = service.add_component(&dashboard.id, chart(12, 100)).await.unwrap();
        assert_eq!(component.size.width, 4);
        assert_eq!(component.position, Position::new(0, 0));
    }

    #[tokio::test]
    async fn test_rejects_invalid_input() {
        let service = service();
        assert!(matches!(
            service.create_dashboard("Bad", Some(GridSpec::new(0, 100, 0))).await,
            Err(CanvasError::InvalidGrid)
        ));

        let dashboard = service.create_dashboard("Ops", None).await.unwrap();
        assert!(matches!(
            service.add_component(&dashboard.id, chart(0, 100)).await,
            Err(CanvasError::InvalidSize { width: 0, height: 100 })
        ));
        assert!(matches!(
            service.add_component("missing", chart(2, 100)).await,
            Err(CanvasError::DashboardNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_rejects_oversized_grid_and_components() {
        let service = service();
        assert!(matches!(
            service.create_dashboard("Wide", Some(GridSpec::new(49, 100, 0))).await,
            Err(CanvasError::InvalidGrid)
        ));
        assert!(matches!(
            service.create_dashboard("Huge", Some(GridSpec::new(u32::MAX, 100, 0))).await,
            Err(CanvasError::InvalidGrid)
        ));

        let dashboard = service.create_dashboard("Ops", None).await.unwrap();
        assert!(matches!(
            service.add_component(&dashboard.id, chart(2, 100_001)).await,
            Err(CanvasError::InvalidSize { width: 2, height: 100_001 })
        ));
        assert!(matches!(
            service.add_component(&dashboard.id, chart(1, u32::MAX)).await,
            Err(CanvasError::InvalidSize { .. })
        ));

        let a = service.add_component(&dashboard.id, chart(2, 100_000)).await.unwrap();
        let resized = service
            .update_component(
                &dashboard.id,
                &a.id,
                ComponentPatch {
                    size: Some(Size::new(2, u32::MAX)),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(resized, Err(CanvasError::InvalidSize { .. })));
        let stored = service.get_dashboard(&dashboard.id).await.unwrap();
        assert_eq!(stored.component(&a.id).unwrap().size, Size::new(2, 100_000));
    }

    #[tokio::test]
    async fn test_update_clamps_drop_row() {
        let service = service();
        let dashboard = service.create_dashboard("Ops", None).await.unwrap();
        let a = service.add_component(&dashboard.id, chart(4, 100)).await.unwrap();

        let updated = service
            .update_component(
                &dashboard.id,
                &a.id,
                ComponentPatch {
                    position: Some(Position::new(0, u32::MAX)),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.component(&a.id).unwrap().position, Position::new(0, 0));
    }

    #[tokio::test]
    async fn test_remove_compacts_remainder() {
        let service = service();
        let dashboard = service.create_dashboard("Ops", None).await.unwrap();
        let a = service.add_component(&dashboard.id, chart(12, 100)).await.unwrap();
        let b = service.add_component(&dashboard.id, chart(12, 100)).await.unwrap();
        assert_eq!(b.position, Position::new(0, 1));

        let updated = service.remove_component(&dashboard.id, &a.id).await.unwrap();
        assert_eq!(updated.components.len(), 1);
        assert_eq!(updated.components[0].id, b.id);
        assert_eq!(updated.components[0].position, Position::new(0, 0));

        assert!(matches!(
            service.remove_component(&dashboard.id, &a.id).await,
            Err(CanvasError::ComponentNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_clamps_and_repacks() {
        let service = service();
        let dashboard = service.create_dashboard("Ops", None).await.unwrap();
        let a = service.add_component(&dashboard.id, chart(6, 100)).await.unwrap();
        let b = service.add_component(&dashboard.id, chart(6, 100)).await.unwrap();

        // Drag "a" far to the right and widen it: x is clamped to fit the grid.
        let updated = service
            .update_component(
                &dashboard.id,
                &a.id,
                ComponentPatch {
                    position: Some(Position::new(11, 0)),
                    size: Some(Size::new(8, 100)),
                    payload: None,
                },
            )
            .await
            .unwrap();

        assert!(is_overlap_free(&updated.components, &updated.grid));
        let moved = updated.component(&a.id).unwrap();
        assert_eq!(moved.size.width, 8);
        assert!(moved.position.x + moved.size.width <= 12);
        assert!(updated.component(&b.id).is_some());
    }

    #[tokio::test]
    async fn test_delete_dashboard() {
        let service = service();
        let dashboard = service.create_dashboard("Ops", None).await.unwrap();
        service.delete_dashboard(&dashboard.id).await.unwrap();
        assert!(service.list_dashboards().await.unwrap().is_empty());
        assert!(matches!(
            service.delete_dashboard(&dashboard.id).await,
            Err(CanvasError::DashboardNotFound(_))
        ));
    }
}
