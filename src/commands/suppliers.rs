use super::{AppStateExt, DialogConfirm, ListSnapshot, Screen};
use crate::error::WorkflowError;
use crate::models::{Supplier, SupplierForm};
use tauri::AppHandle;

type Snapshot = ListSnapshot<Supplier, SupplierForm>;

#[tauri::command]
pub async fn load_suppliers(app: AppHandle) -> Result<Snapshot, WorkflowError> {
    let state = app.inventory();
    super::mount(state, Screen::Suppliers, &state.suppliers).await
}

#[tauri::command]
pub async fn search_suppliers(app: AppHandle, term: String) -> Result<Snapshot, WorkflowError> {
    Ok(super::search(&app.inventory().suppliers, term).await)
}

#[tauri::command]
pub async fn save_supplier(
    app: AppHandle,
    id: Option<i64>,
    supplier: SupplierForm,
) -> Result<Snapshot, WorkflowError> {
    super::save(&app.inventory().suppliers, id, supplier).await
}

#[tauri::command]
pub async fn delete_supplier(app: AppHandle, id: i64) -> Result<Snapshot, WorkflowError> {
    let confirm = DialogConfirm(app.clone());
    super::delete(&app.inventory().suppliers, id, &confirm).await
}
