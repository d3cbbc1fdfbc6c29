use super::{LoadState, ViewScope};
use crate::error::WorkflowError;
use crate::models::{DashboardStats, Part};
use crate::stores::{DashboardStore, PartStore};
use std::sync::Arc;
use tracing::warn;

pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 5;

/// Parts at or below `threshold`, lowest stock first.
pub fn low_stock_parts(parts: &[Part], threshold: i32) -> Vec<Part> {
    let mut low: Vec<Part> = parts
        .iter()
        .filter(|p| p.quantity <= threshold)
        .cloned()
        .collect();
    low.sort_by(|a, b| a.quantity.cmp(&b.quantity).then_with(|| a.name.cmp(&b.name)));
    low
}

/// "Inventory Overview": headline counts and items needing restock.
pub struct DashboardView<B: ?Sized> {
    backend: Arc<B>,
    scope: ViewScope,
    threshold: i32,
    stats: Option<DashboardStats>,
    low_stock: Vec<Part>,
    load: LoadState,
}

impl<B> DashboardView<B>
where
    B: DashboardStore + PartStore + ?Sized,
{
    pub fn new(backend: Arc<B>, scope: ViewScope) -> Self {
        DashboardView {
            backend,
            scope,
            threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            stats: None,
            low_stock: Vec::new(),
            load: LoadState::Idle,
        }
    }

    pub fn with_threshold(mut self, threshold: i32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn stats(&self) -> Option<&DashboardStats> {
        self.stats.as_ref()
    }

    pub fn low_stock(&self) -> &[Part] {
        &self.low_stock
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub async fn refresh(&mut self) -> Result<(), WorkflowError> {
        self.load = LoadState::Loading;

        let backend = &*self.backend;
        let fetched = self
            .scope
            .run(async { tokio::try_join!(backend.dashboard_stats(), backend.list_parts()) })
            .await;

        match fetched {
            Ok((stats, parts)) => {
                self.low_stock = low_stock_parts(&parts, self.threshold);
                self.stats = Some(stats);
                self.load = LoadState::Loaded;
                Ok(())
            }
            Err(WorkflowError::Cancelled) => Err(WorkflowError::Cancelled),
            Err(e) => {
                warn!("Failed to load dashboard: {}", e);
                self.load = LoadState::Failed("Failed to load dashboard".to_string());
                Err(e)
            }
        }
    }
}
