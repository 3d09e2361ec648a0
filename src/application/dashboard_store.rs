// Repository trait for dashboard persistence
use crate::domain::canvas::Dashboard;
use async_trait::async_trait;

#[async_trait]
pub trait DashboardStore: Send + Sync {
    /// All stored dashboards, oldest first
    async fn list(&self) -> anyhow::Result<Vec<Dashboard>>;

    async fn load(&self, id: &str) -> anyhow::Result<Option<Dashboard>>;

    /// Insert or replace by id
    async fn save(&self, dashboard: Dashboard) -> anyhow::Result<()>;

    /// Returns false when nothing was stored under `id`
    async fn delete(&self, id: &str) -> anyhow::Result<bool>;
}
