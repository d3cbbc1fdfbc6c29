//! Screen state: cached collection, search filter, load indicator, banners.
//!
//! Consistency model: after every mutation the view refetches its whole
//! collection. Nothing is patched in place.

mod collection;
mod dashboard;
mod parts;

pub use collection::{
    confirm_and_delete, CategoriesView, CollectionView, CrudStore, Editor, Resource, SalesView,
    SuppliersView,
};
pub use dashboard::{low_stock_parts, DashboardView, DEFAULT_LOW_STOCK_THRESHOLD};
pub use parts::{confirm_and_delete_part, PartsView, DELETE_PART_PROMPT};

use crate::error::{ApiError, WorkflowError};
use crate::filter::{filter_items, Searchable};
use async_trait::async_trait;
use serde::Serialize;
use std::future::Future;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "snake_case")]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerKind {
    Success,
    Error,
}

/// Dismissible inline alert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    pub fn success(message: impl Into<String>) -> Self {
        Banner {
            kind: BannerKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Banner {
            kind: BannerKind::Error,
            message: message.into(),
        }
    }
}

/// Lifetime of a mounted view.
///
/// Work started through [`ViewScope::run`] stops as soon as the scope is torn
/// down, and its result never reaches the view.
#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        ViewScope::default()
    }

    pub fn teardown(&self) {
        self.token.cancel();
    }

    pub fn is_torn_down(&self) -> bool {
        self.token.is_cancelled()
    }

    pub async fn run<F, T, E>(&self, work: F) -> Result<T, WorkflowError>
    where
        F: Future<Output = Result<T, E>>,
        E: Into<WorkflowError>,
    {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(WorkflowError::Cancelled),
            result = work => result.map_err(Into::into),
        }
    }
}

/// Asks the user before something destructive happens.
#[async_trait]
pub trait Confirm: Send + Sync {
    async fn confirm(&self, message: &str) -> bool;
}

#[async_trait]
impl<F> Confirm for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    async fn confirm(&self, message: &str) -> bool {
        (self)(message)
    }
}

/// Collection plus its filtered projection.
#[derive(Debug, Clone)]
pub struct ListState<T> {
    items: Vec<T>,
    term: String,
    visible: Vec<T>,
    load: LoadState,
    banner: Option<Banner>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        ListState {
            items: Vec::new(),
            term: String::new(),
            visible: Vec::new(),
            load: LoadState::Idle,
            banner: None,
        }
    }
}

impl<T: Searchable + Clone> ListState<T> {
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn visible(&self) -> &[T] {
        &self.visible
    }

    pub fn search_term(&self) -> &str {
        &self.term
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.term = term.into();
        self.recompute();
    }

    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        self.recompute();
    }

    fn recompute(&mut self) {
        self.visible = filter_items(&self.items, &self.term);
    }

    pub(crate) fn begin_load(&mut self) {
        self.load = LoadState::Loading;
    }

    pub(crate) fn loaded(&mut self, items: Vec<T>) {
        self.set_items(items);
        self.load = LoadState::Loaded;
    }

    pub(crate) fn failed(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.load = LoadState::Failed(message.clone());
        self.banner = Some(Banner::error(message));
    }

    pub(crate) fn notify(&mut self, banner: Banner) {
        self.banner = Some(banner);
    }
}

/// Backend validation text when there is one, `fallback` for other API
/// failures, and the workflow's own message otherwise.
pub(crate) fn failure_message(fallback: &str, err: &WorkflowError) -> String {
    match err {
        WorkflowError::Api(ApiError::Validation { message, .. }) => message.clone(),
        WorkflowError::Api(_) => fallback.to_string(),
        other => other.to_string(),
    }
}
