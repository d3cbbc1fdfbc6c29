use crate::api::GatewayClient;
use crate::error::ApiResult;
use crate::models::{Ack, Sale, SaleForm};
use async_trait::async_trait;
use reqwest::Method;

#[async_trait]
pub trait SaleStore: Send + Sync {
    /// Sales joined with the name of the part sold.
    async fn list_sales(&self) -> ApiResult<Vec<Sale>>;
    async fn store_sale(&self, form: &SaleForm) -> ApiResult<Ack>;
    async fn update_sale(&self, id: i64, form: &SaleForm) -> ApiResult<Ack>;
    async fn delete_sale(&self, id: i64) -> ApiResult<Ack>;
}

#[async_trait]
impl SaleStore for GatewayClient {
    async fn list_sales(&self) -> ApiResult<Vec<Sale>> {
        let builder = self.authorized(Method::GET, "sales-per-part")?;
        self.fetch("list sales", builder).await
    }

    async fn store_sale(&self, form: &SaleForm) -> ApiResult<Ack> {
        let builder = self.authorized(Method::POST, "store-sale")?.json(form);
        self.acknowledge("store sale", builder).await
    }

    async fn update_sale(&self, id: i64, form: &SaleForm) -> ApiResult<Ack> {
        let builder = self
            .authorized(Method::PUT, &format!("update-sale/{}", id))?
            .json(form);
        self.acknowledge("update sale", builder).await
    }

    async fn delete_sale(&self, id: i64) -> ApiResult<Ack> {
        let builder = self.authorized(Method::DELETE, &format!("delete-sale/{}", id))?;
        self.acknowledge("delete sale", builder).await
    }
}
