use crate::api::GatewayClient;
use crate::error::ApiResult;
use crate::models::{Ack, Category, CategoryForm};
use async_trait::async_trait;
use reqwest::Method;

#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn list_categories(&self) -> ApiResult<Vec<Category>>;
    async fn store_category(&self, form: &CategoryForm) -> ApiResult<Ack>;
    async fn update_category(&self, id: i64, form: &CategoryForm) -> ApiResult<Ack>;
    async fn delete_category(&self, id: i64) -> ApiResult<Ack>;
}

#[async_trait]
impl CategoryStore for GatewayClient {
    async fn list_categories(&self) -> ApiResult<Vec<Category>> {
        let builder = self.authorized(Method::GET, "categories")?;
        self.fetch("list categories", builder).await
    }

    async fn store_category(&self, form: &CategoryForm) -> ApiResult<Ack> {
        let builder = self.authorized(Method::POST, "storecategory")?.json(form);
        self.acknowledge("store category", builder).await
    }

    async fn update_category(&self, id: i64, form: &CategoryForm) -> ApiResult<Ack> {
        let builder = self
            .authorized(Method::PUT, &format!("updatecategory/{}", id))?
            .json(form);
        self.acknowledge("update category", builder).await
    }

    async fn delete_category(&self, id: i64) -> ApiResult<Ack> {
        let builder = self.authorized(Method::DELETE, &format!("deletecategory/{}", id))?;
        self.acknowledge("delete category", builder).await
    }
}
