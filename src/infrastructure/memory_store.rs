// In-process dashboard store
use crate::application::dashboard_store::DashboardStore;
use crate::domain::canvas::Dashboard;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct InMemoryDashboardStore {
    dashboards: RwLock<HashMap<String, Dashboard>>,
}

impl InMemoryDashboardStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DashboardStore for InMemoryDashboardStore {
    async fn list(&self) -> Result<Vec<Dashboard>> {
        let dashboards = self.dashboards.read().await;
        let mut all: Vec<Dashboard> = dashboards.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn load(&self, id: &str) -> Result<Option<Dashboard>> {
        Ok(self.dashboards.read().await.get(id).cloned())
    }

    async fn save(&self, dashboard: Dashboard) -> Result<()> {
        self.dashboards
            .write()
            .await
            .insert(dashboard.id.clone(), dashboard);
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.dashboards.write().await.remove(id).is_some())
    }
}
