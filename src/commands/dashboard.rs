use super::{AppStateExt, Screen};
use crate::error::WorkflowError;
use crate::models::{DashboardStats, Part};
use crate::views::{DashboardView, LoadState};
use serde::Serialize;
use tauri::AppHandle;

#[derive(Debug, Serialize)]
pub struct DashboardSnapshot {
    pub stats: Option<DashboardStats>,
    pub low_stock: Vec<Part>,
    pub state: LoadState,
}

#[tauri::command]
pub async fn load_dashboard(app: AppHandle) -> Result<DashboardSnapshot, WorkflowError> {
    let state = app.inventory();
    let scope = state.remount(Screen::Dashboard);

    let mut view = state.dashboard.lock().await;
    *view = DashboardView::new(state.client.clone(), scope);
    // Other failures show up in `state`.
    if let Err(WorkflowError::Cancelled) = view.refresh().await {
        return Err(WorkflowError::Cancelled);
    }

    Ok(DashboardSnapshot {
        stats: view.stats().cloned(),
        low_stock: view.low_stock().to_vec(),
        state: view.load_state().clone(),
    })
}
