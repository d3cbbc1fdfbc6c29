//! Tauri commands exposed to the webview.
//!
//! Each screen's view lives in [`AppState`] behind an async mutex. Its
//! [`ViewScope`] is kept separately so `unmount_screen` can cancel in-flight
//! work without waiting for the view lock.

pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod parts;
pub mod sales;
pub mod suppliers;

use crate::api::GatewayClient;
use crate::config::ApiConfig;
use crate::error::{ApiResult, WorkflowError};
use crate::session::Session;
use crate::views::{
    confirm_and_delete, Banner, CategoriesView, CollectionView, Confirm, CrudStore, DashboardView,
    Editor, LoadState, PartsView, Resource, SalesView, SuppliersView, ViewScope,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex};
use tauri::{AppHandle, Manager};
use tauri_plugin_dialog::{DialogExt, MessageDialogButtons, MessageDialogKind};
use tokio::sync::{oneshot, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Screen {
    Dashboard,
    Parts,
    Categories,
    Suppliers,
    Sales,
}

pub struct AppState {
    pub client: Arc<GatewayClient>,
    scopes: StdMutex<HashMap<Screen, ViewScope>>,
    pub dashboard: Mutex<DashboardView<GatewayClient>>,
    pub parts: Mutex<PartsView<GatewayClient>>,
    pub categories: Mutex<CategoriesView<GatewayClient>>,
    pub suppliers: Mutex<SuppliersView<GatewayClient>>,
    pub sales: Mutex<SalesView<GatewayClient>>,
}

impl AppState {
    pub fn new(config: ApiConfig, session: Session) -> ApiResult<Self> {
        let client = Arc::new(GatewayClient::new(config, session)?);

        Ok(AppState {
            dashboard: Mutex::new(DashboardView::new(client.clone(), ViewScope::new())),
            parts: Mutex::new(PartsView::new(client.clone(), ViewScope::new())),
            categories: Mutex::new(CollectionView::new(client.clone(), ViewScope::new())),
            suppliers: Mutex::new(CollectionView::new(client.clone(), ViewScope::new())),
            sales: Mutex::new(CollectionView::new(client.clone(), ViewScope::new())),
            scopes: StdMutex::new(HashMap::new()),
            client,
        })
    }

    /// Fresh scope for `screen`, tearing down the previous one.
    pub(crate) fn remount(&self, screen: Screen) -> ViewScope {
        let scope = ViewScope::new();
        let mut scopes = self.scopes.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(previous) = scopes.insert(screen, scope.clone()) {
            previous.teardown();
        }
        scope
    }

    pub(crate) fn unmount(&self, screen: Screen) {
        let mut scopes = self.scopes.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(scope) = scopes.remove(&screen) {
            scope.teardown();
        }
    }
}

pub trait AppStateExt {
    fn inventory(&self) -> &AppState;
}

impl AppStateExt for AppHandle {
    fn inventory(&self) -> &AppState {
        self.state::<AppState>().inner()
    }
}

/// Native OK/Cancel dialog.
pub struct DialogConfirm(pub AppHandle);

#[async_trait]
impl Confirm for DialogConfirm {
    async fn confirm(&self, message: &str) -> bool {
        let (tx, rx) = oneshot::channel();
        self.0
            .dialog()
            .message(message)
            .title("Confirm")
            .kind(MessageDialogKind::Warning)
            .buttons(MessageDialogButtons::OkCancel)
            .show(move |ok| {
                let _ = tx.send(ok);
            });
        rx.await.unwrap_or(false)
    }
}

/// What a list screen renders.
#[derive(Debug, Serialize)]
pub struct ListSnapshot<T, F> {
    pub items: Vec<T>,
    pub total: usize,
    pub search: String,
    pub state: LoadState,
    pub banner: Option<Banner>,
    pub empty_message: String,
    pub editor: Option<Editor<F>>,
}

pub(crate) fn snapshot<T>(view: &CollectionView<T, GatewayClient>) -> ListSnapshot<T, T::Form>
where
    T: Resource + Serialize,
    GatewayClient: CrudStore<T>,
{
    ListSnapshot {
        items: view.visible().to_vec(),
        total: view.list().items().len(),
        search: view.list().search_term().to_string(),
        state: view.list().load_state().clone(),
        banner: view.list().banner().cloned(),
        empty_message: view.empty_message(),
        editor: view.editor().cloned(),
    }
}

pub(crate) async fn mount<T>(
    app: &AppState,
    screen: Screen,
    view: &Mutex<CollectionView<T, GatewayClient>>,
) -> Result<ListSnapshot<T, T::Form>, WorkflowError>
where
    T: Resource + Serialize,
    GatewayClient: CrudStore<T>,
{
    let scope = app.remount(screen);
    let mut view = view.lock().await;
    *view = CollectionView::new(app.client.clone(), scope);
    // A failed fetch is reported through the snapshot's state and banner.
    match view.refresh().await {
        Err(WorkflowError::Cancelled) => Err(WorkflowError::Cancelled),
        _ => Ok(snapshot(&view)),
    }
}

pub(crate) async fn save<T>(
    view: &Mutex<CollectionView<T, GatewayClient>>,
    id: Option<i64>,
    form: T::Form,
) -> Result<ListSnapshot<T, T::Form>, WorkflowError>
where
    T: Resource + Serialize,
    GatewayClient: CrudStore<T>,
{
    let mut view = view.lock().await;
    let slot = match id {
        Some(id) => view.open_edit(id)?,
        None => view.open_create(),
    };
    *slot = form;
    view.submit().await?;
    Ok(snapshot(&view))
}

pub(crate) async fn delete<T>(
    view: &Mutex<CollectionView<T, GatewayClient>>,
    id: i64,
    confirm: &dyn Confirm,
) -> Result<ListSnapshot<T, T::Form>, WorkflowError>
where
    T: Resource + Serialize,
    GatewayClient: CrudStore<T>,
{
    // The dialog is answered before the view is locked.
    confirm_and_delete(view, id, confirm).await?;
    let view = view.lock().await;
    Ok(snapshot(&view))
}

pub(crate) async fn search<T>(
    view: &Mutex<CollectionView<T, GatewayClient>>,
    term: String,
) -> ListSnapshot<T, T::Form>
where
    T: Resource + Serialize,
    GatewayClient: CrudStore<T>,
{
    let mut view = view.lock().await;
    view.set_search(term);
    snapshot(&view)
}

#[tauri::command]
pub fn unmount_screen(app: AppHandle, screen: Screen) {
    app.inventory().unmount(screen);
}
