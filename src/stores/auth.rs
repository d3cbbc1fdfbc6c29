use crate::api::GatewayClient;
use crate::error::ApiResult;
use crate::models::{LoginRequest, LoginResponse};
use async_trait::async_trait;
use reqwest::Method;
use tracing::{info, warn};

#[async_trait]
pub trait AuthStore: Send + Sync {
    /// Exchanges credentials for a token and makes it the active session.
    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse>;

    /// Ends the session. The local token is dropped even if the backend call fails.
    async fn logout(&self) -> ApiResult<()>;
}

#[async_trait]
impl AuthStore for GatewayClient {
    async fn login(&self, request: &LoginRequest) -> ApiResult<LoginResponse> {
        let builder = self.anonymous(Method::POST, "login").json(request);
        let response: LoginResponse = self.fetch("login", builder).await?;

        self.session().set_token(response.token.clone());
        info!("Logged in as {}", request.email);

        Ok(response)
    }

    async fn logout(&self) -> ApiResult<()> {
        if !self.session().is_authenticated() {
            return Ok(());
        }

        let result = match self.authorized(Method::POST, "logout") {
            Ok(builder) => self.acknowledge("logout", builder).await.map(|_| ()),
            Err(e) => Err(e),
        };

        self.session().clear();
        match &result {
            Ok(()) => info!("Logged out"),
            Err(e) => warn!("Backend logout failed, local session cleared anyway: {}", e),
        }

        result
    }
}
