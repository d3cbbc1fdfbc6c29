use super::{AppStateExt, DialogConfirm, Screen};
use crate::api::GatewayClient;
use crate::config::ApiConfig;
use crate::error::WorkflowError;
use crate::models::{AdjustmentReason, Category, Part, PartForm, Supplier};
use crate::views::{confirm_and_delete_part, Banner, LoadState, PartsView};
use serde::Serialize;
use std::path::PathBuf;
use tauri::AppHandle;
use tauri_plugin_dialog::DialogExt;
use tauri_plugin_opener::OpenerExt;
use tokio::sync::oneshot;

#[derive(Debug, Serialize)]
pub struct PartCard {
    #[serde(flatten)]
    pub part: Part,
    pub image_src: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PartsSnapshot {
    pub parts: Vec<PartCard>,
    pub total: usize,
    pub search: String,
    pub categories: Vec<Category>,
    pub suppliers: Vec<Supplier>,
    pub state: LoadState,
    pub banner: Option<Banner>,
}

fn snapshot(view: &PartsView<GatewayClient>, config: &ApiConfig) -> PartsSnapshot {
    let parts = view
        .visible()
        .iter()
        .map(|part| PartCard {
            image_src: part
                .image_url
                .clone()
                .or_else(|| part.image_path.as_deref().map(|p| config.image_url(p))),
            part: part.clone(),
        })
        .collect();

    PartsSnapshot {
        parts,
        total: view.list().items().len(),
        search: view.list().search_term().to_string(),
        categories: view.categories().to_vec(),
        suppliers: view.suppliers().to_vec(),
        state: view.list().load_state().clone(),
        banner: view.list().banner().cloned(),
    }
}

#[tauri::command]
pub async fn load_parts(app: AppHandle) -> Result<PartsSnapshot, WorkflowError> {
    let state = app.inventory();
    let scope = state.remount(Screen::Parts);

    let mut view = state.parts.lock().await;
    *view = PartsView::new(state.client.clone(), scope);
    if let Err(WorkflowError::Cancelled) = view.refresh().await {
        return Err(WorkflowError::Cancelled);
    }
    Ok(snapshot(&view, state.client.config()))
}

#[tauri::command]
pub async fn search_parts(app: AppHandle, term: String) -> Result<PartsSnapshot, WorkflowError> {
    let state = app.inventory();
    let mut view = state.parts.lock().await;
    view.set_search(term);
    Ok(snapshot(&view, state.client.config()))
}

/// `id` is `None` for "Add New Part".
#[tauri::command]
pub async fn save_part(
    app: AppHandle,
    id: Option<i64>,
    part: PartForm,
) -> Result<PartsSnapshot, WorkflowError> {
    let state = app.inventory();
    let mut view = state.parts.lock().await;

    let editor = match id {
        Some(id) => view.begin_edit(id)?,
        None => view.begin_add(),
    };
    *editor.form_mut() = part;

    view.save_part().await?;
    Ok(snapshot(&view, state.client.config()))
}

#[tauri::command]
pub async fn delete_part(app: AppHandle, id: i64) -> Result<PartsSnapshot, WorkflowError> {
    let state = app.inventory();
    let confirm = DialogConfirm(app.clone());

    confirm_and_delete_part(&state.parts, id, &confirm).await?;
    let view = state.parts.lock().await;
    Ok(snapshot(&view, state.client.config()))
}

#[tauri::command]
pub async fn adjust_stock(
    app: AppHandle,
    id: i64,
    adjustment: i32,
    reason: AdjustmentReason,
) -> Result<PartsSnapshot, WorkflowError> {
    let state = app.inventory();
    let mut view = state.parts.lock().await;

    let adjuster = view.begin_adjust(id)?;
    adjuster.set_adjustment(adjustment);
    adjuster.set_reason(reason);

    view.submit_adjustment().await?;
    Ok(snapshot(&view, state.client.config()))
}

#[tauri::command]
pub async fn pick_part_image(app: AppHandle) -> Option<PathBuf> {
    let (tx, rx) = oneshot::channel();
    app.dialog()
        .file()
        .add_filter("Images", &["png", "jpg", "jpeg", "gif", "webp"])
        .pick_file(move |path| {
            let _ = tx.send(path.and_then(|p| p.into_path().ok()));
        });
    rx.await.ok().flatten()
}

#[tauri::command]
pub fn open_part_image(app: AppHandle, image_path: String) -> Result<(), String> {
    let url = app.inventory().client.config().image_url(&image_path);
    app.opener()
        .open_url(url, None::<&str>)
        .map_err(|e| e.to_string())
}
