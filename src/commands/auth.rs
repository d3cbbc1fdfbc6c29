use super::{AppStateExt, DialogConfirm};
use crate::error::ApiError;
use crate::models::LoginRequest;
use crate::stores::AuthStore;
use crate::views::Confirm;
use tauri::AppHandle;

#[tauri::command]
pub async fn login(app: AppHandle, email: String, password: String) -> Result<(), ApiError> {
    let request = LoginRequest { email, password };
    app.inventory().client.login(&request).await?;
    Ok(())
}

/// Returns `false` when the user backed out of the confirmation.
#[tauri::command]
pub async fn logout(app: AppHandle) -> Result<bool, ApiError> {
    if !DialogConfirm(app.clone()).confirm("Do you want to logout?").await {
        return Ok(false);
    }
    app.inventory().client.logout().await?;
    Ok(true)
}

#[tauri::command]
pub fn session_status(app: AppHandle) -> bool {
    app.inventory().client.session().is_authenticated()
}
