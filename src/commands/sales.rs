use super::{AppStateExt, DialogConfirm, ListSnapshot, Screen};
use crate::error::WorkflowError;
use crate::models::{Sale, SaleForm};
use serde::Serialize;
use tauri::AppHandle;

/// Sale row with its presentation-time total.
#[derive(Debug, Serialize)]
pub struct SaleRow {
    #[serde(flatten)]
    pub sale: Sale,
    pub total: f64,
}

#[derive(Debug, Serialize)]
pub struct SalesSnapshot {
    #[serde(flatten)]
    pub list: ListSnapshot<Sale, SaleForm>,
    pub rows: Vec<SaleRow>,
}

impl From<ListSnapshot<Sale, SaleForm>> for SalesSnapshot {
    fn from(list: ListSnapshot<Sale, SaleForm>) -> Self {
        let rows = list
            .items
            .iter()
            .map(|sale| SaleRow {
                total: sale.total(),
                sale: sale.clone(),
            })
            .collect();
        SalesSnapshot { list, rows }
    }
}

#[tauri::command]
pub async fn load_sales(app: AppHandle) -> Result<SalesSnapshot, WorkflowError> {
    let state = app.inventory();
    super::mount(state, Screen::Sales, &state.sales).await.map(Into::into)
}

#[tauri::command]
pub async fn search_sales(app: AppHandle, term: String) -> Result<SalesSnapshot, WorkflowError> {
    Ok(super::search(&app.inventory().sales, term).await.into())
}

#[tauri::command]
pub async fn save_sale(
    app: AppHandle,
    id: Option<i64>,
    sale: SaleForm,
) -> Result<SalesSnapshot, WorkflowError> {
    super::save(&app.inventory().sales, id, sale).await.map(Into::into)
}

#[tauri::command]
pub async fn delete_sale(app: AppHandle, id: i64) -> Result<SalesSnapshot, WorkflowError> {
    let confirm = DialogConfirm(app.clone());
    super::delete(&app.inventory().sales, id, &confirm)
        .await
        .map(Into::into)
}
