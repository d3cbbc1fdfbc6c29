use crate::api::GatewayClient;
use crate::error::ApiResult;
use crate::models::{Ack, Supplier, SupplierForm};
use async_trait::async_trait;
use reqwest::Method;

#[async_trait]
pub trait SupplierStore: Send + Sync {
    async fn list_suppliers(&self) -> ApiResult<Vec<Supplier>>;
    async fn store_supplier(&self, form: &SupplierForm) -> ApiResult<Ack>;
    async fn update_supplier(&self, id: i64, form: &SupplierForm) -> ApiResult<Ack>;
    async fn delete_supplier(&self, id: i64) -> ApiResult<Ack>;
}

#[async_trait]
impl SupplierStore for GatewayClient {
    async fn list_suppliers(&self) -> ApiResult<Vec<Supplier>> {
        let builder = self.authorized(Method::GET, "suppliers")?;
        self.fetch("list suppliers", builder).await
    }

    async fn store_supplier(&self, form: &SupplierForm) -> ApiResult<Ack> {
        let builder = self.authorized(Method::POST, "store-supplier")?.json(form);
        self.acknowledge("store supplier", builder).await
    }

    async fn update_supplier(&self, id: i64, form: &SupplierForm) -> ApiResult<Ack> {
        let builder = self
            .authorized(Method::PUT, &format!("updatesupplier/{}", id))?
            .json(form);
        self.acknowledge("update supplier", builder).await
    }

    async fn delete_supplier(&self, id: i64) -> ApiResult<Ack> {
        let builder = self.authorized(Method::DELETE, &format!("deletesupplier/{}", id))?;
        self.acknowledge("delete supplier", builder).await
    }
}
