use super::{AppStateExt, DialogConfirm, ListSnapshot, Screen};
use crate::error::WorkflowError;
use crate::models::{Category, CategoryForm};
use tauri::AppHandle;

type Snapshot = ListSnapshot<Category, CategoryForm>;

#[tauri::command]
pub async fn load_categories(app: AppHandle) -> Result<Snapshot, WorkflowError> {
    let state = app.inventory();
    super::mount(state, Screen::Categories, &state.categories).await
}

#[tauri::command]
pub async fn search_categories(app: AppHandle, term: String) -> Result<Snapshot, WorkflowError> {
    Ok(super::search(&app.inventory().categories, term).await)
}

#[tauri::command]
pub async fn save_category(
    app: AppHandle,
    id: Option<i64>,
    category: CategoryForm,
) -> Result<Snapshot, WorkflowError> {
    super::save(&app.inventory().categories, id, category).await
}

#[tauri::command]
pub async fn delete_category(app: AppHandle, id: i64) -> Result<Snapshot, WorkflowError> {
    let confirm = DialogConfirm(app.clone());
    super::delete(&app.inventory().categories, id, &confirm).await
}
