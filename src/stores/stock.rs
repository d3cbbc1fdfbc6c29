use crate::api::GatewayClient;
use crate::error::ApiResult;
use crate::models::{Ack, StockAdjustment};
use async_trait::async_trait;
use reqwest::Method;

#[async_trait]
pub trait StockStore: Send + Sync {
    async fn adjust_stock(&self, adjustment: &StockAdjustment) -> ApiResult<Ack>;
}

#[async_trait]
impl StockStore for GatewayClient {
    async fn adjust_stock(&self, adjustment: &StockAdjustment) -> ApiResult<Ack> {
        let builder = self.authorized(Method::POST, "adjust-stock")?.json(adjustment);
        self.acknowledge("adjust stock", builder).await
    }
}
