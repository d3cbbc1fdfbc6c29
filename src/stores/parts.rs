use crate::api::GatewayClient;
use crate::error::ApiResult;
use crate::models::{Ack, DataEnvelope, Part, PartPayload};
use async_trait::async_trait;
use reqwest::Method;

#[async_trait]
pub trait PartStore: Send + Sync {
    async fn list_parts(&self) -> ApiResult<Vec<Part>>;
    async fn store_part(&self, payload: &PartPayload) -> ApiResult<Ack>;
    async fn update_part(&self, id: i64, payload: &PartPayload) -> ApiResult<Ack>;
    async fn delete_part(&self, id: i64) -> ApiResult<Ack>;
}

#[async_trait]
impl PartStore for GatewayClient {
    async fn list_parts(&self) -> ApiResult<Vec<Part>> {
        let builder = self.authorized(Method::GET, "parts")?;
        let envelope: DataEnvelope<Vec<Part>> = self.fetch("list parts", builder).await?;
        Ok(envelope.data)
    }

    async fn store_part(&self, payload: &PartPayload) -> ApiResult<Ack> {
        let builder = self.multipart("store-part", payload)?;
        self.acknowledge("store part", builder).await
    }

    // The backend only accepts multipart on POST, hence no PUT here.
    async fn update_part(&self, id: i64, payload: &PartPayload) -> ApiResult<Ack> {
        let builder = self.multipart(&format!("update-part/{}", id), payload)?;
        self.acknowledge("update part", builder).await
    }

    async fn delete_part(&self, id: i64) -> ApiResult<Ack> {
        let builder = self.authorized(Method::DELETE, &format!("deletepart/{}", id))?;
        self.acknowledge("delete part", builder).await
    }
}
