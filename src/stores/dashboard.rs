use crate::api::GatewayClient;
use crate::error::ApiResult;
use crate::models::DashboardStats;
use async_trait::async_trait;
use reqwest::Method;

#[async_trait]
pub trait DashboardStore: Send + Sync {
    async fn dashboard_stats(&self) -> ApiResult<DashboardStats>;
}

#[async_trait]
impl DashboardStore for GatewayClient {
    async fn dashboard_stats(&self) -> ApiResult<DashboardStats> {
        let builder = self.authorized(Method::GET, "dashboard-stats")?;
        self.fetch("dashboard stats", builder).await
    }
}
