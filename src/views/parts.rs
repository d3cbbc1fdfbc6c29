use super::{failure_message, Banner, Confirm, ListState, ViewScope};
use crate::error::WorkflowError;
use crate::models::{Category, Part, Supplier};
use crate::stores::{CategoryStore, PartStore, StockStore, SupplierStore};
use crate::workflows::{
    AdjustmentOutcome, EditState, PartEditWorkflow, SaveOutcome, StockAdjustmentWorkflow,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

pub const DELETE_PART_PROMPT: &str = "This motor part will be deleted!";

/// "Manage Parts" screen: the part grid plus its edit and stock modals.
pub struct PartsView<B: ?Sized> {
    backend: Arc<B>,
    scope: ViewScope,
    list: ListState<Part>,
    categories: Vec<Category>,
    suppliers: Vec<Supplier>,
    editor: PartEditWorkflow,
    adjuster: Option<StockAdjustmentWorkflow>,
}

impl<B> PartsView<B>
where
    B: PartStore + CategoryStore + SupplierStore + StockStore + ?Sized,
{
    pub fn new(backend: Arc<B>, scope: ViewScope) -> Self {
        PartsView {
            backend,
            scope,
            list: ListState::default(),
            categories: Vec::new(),
            suppliers: Vec::new(),
            editor: PartEditWorkflow::new(),
            adjuster: None,
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn list(&self) -> &ListState<Part> {
        &self.list
    }

    pub fn visible(&self) -> &[Part] {
        self.list.visible()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn suppliers(&self) -> &[Supplier] {
        &self.suppliers
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.list.set_search(term);
    }

    pub fn dismiss_banner(&mut self) {
        self.list.dismiss_banner();
    }

    pub fn category_name(&self, id: i64) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
    }

    pub fn supplier_name(&self, id: i64) -> Option<&str> {
        self.suppliers
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.name.as_str())
    }

    /// Loads parts, categories and suppliers together.
    pub async fn refresh(&mut self) -> Result<(), WorkflowError> {
        self.list.begin_load();

        let backend = &*self.backend;
        let fetched = self
            .scope
            .run(async {
                tokio::try_join!(
                    backend.list_parts(),
                    backend.list_categories(),
                    backend.list_suppliers()
                )
            })
            .await;

        match fetched {
            Ok((parts, categories, suppliers)) => {
                debug!(
                    "Loaded {} parts, {} categories, {} suppliers",
                    parts.len(),
                    categories.len(),
                    suppliers.len()
                );
                self.categories = categories;
                self.suppliers = suppliers;
                self.list.loaded(parts);
                Ok(())
            }
            Err(WorkflowError::Cancelled) => Err(WorkflowError::Cancelled),
            Err(e) => {
                warn!("Error fetching parts data: {}", e);
                self.list
                    .failed("Failed to load parts data. Please try again.");
                Err(e)
            }
        }
    }

    pub fn editor(&self) -> &PartEditWorkflow {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut PartEditWorkflow {
        &mut self.editor
    }

    pub fn begin_add(&mut self) -> &mut PartEditWorkflow {
        self.editor.open_create();
        &mut self.editor
    }

    pub fn begin_edit(&mut self, id: i64) -> Result<&mut PartEditWorkflow, WorkflowError> {
        let part = self
            .list
            .items()
            .iter()
            .find(|p| p.id == id)
            .ok_or(WorkflowError::UnknownItem("part"))?;
        self.editor.open_edit(part);
        Ok(&mut self.editor)
    }

    /// Submits the edit modal; on success closes it and refetches everything.
    pub async fn save_part(&mut self) -> Result<SaveOutcome, WorkflowError> {
        let result = self.scope.run(self.editor.submit(&*self.backend)).await;

        match result {
            Ok(outcome) => {
                self.list.notify(Banner::success(outcome.message()));
                self.editor.cancel();
                self.refetch().await?;
                Ok(outcome)
            }
            Err(WorkflowError::Cancelled) => {
                self.editor.interrupted();
                Err(WorkflowError::Cancelled)
            }
            Err(e) => {
                // Only failures from an open form are worth an inline banner.
                if self.editor.state() == EditState::Open {
                    self.list
                        .notify(Banner::error(failure_message("Failed to save part", &e)));
                }
                Err(e)
            }
        }
    }

    pub fn adjuster(&self) -> Option<&StockAdjustmentWorkflow> {
        self.adjuster.as_ref()
    }

    pub fn adjuster_mut(&mut self) -> Option<&mut StockAdjustmentWorkflow> {
        self.adjuster.as_mut()
    }

    pub fn begin_adjust(&mut self, id: i64) -> Result<&mut StockAdjustmentWorkflow, WorkflowError> {
        let part = self
            .list
            .items()
            .iter()
            .find(|p| p.id == id)
            .ok_or(WorkflowError::UnknownItem("part"))?;
        Ok(self.adjuster.insert(StockAdjustmentWorkflow::open(part)))
    }

    pub fn close_adjuster(&mut self) {
        self.adjuster = None;
    }

    pub async fn submit_adjustment(&mut self) -> Result<AdjustmentOutcome, WorkflowError> {
        let Some(adjuster) = self.adjuster.as_mut() else {
            return Err(WorkflowError::InvalidState {
                action: "adjust stock",
                state: "closed",
            });
        };

        let result = self.scope.run(adjuster.submit(&*self.backend)).await;
        match result {
            Ok(outcome) => {
                self.adjuster = None;
                self.list.notify(Banner::success("Stock adjusted successfully"));
                self.refetch().await?;
                Ok(outcome)
            }
            Err(WorkflowError::Cancelled) => Err(WorkflowError::Cancelled),
            Err(e) => {
                self.list
                    .notify(Banner::error(failure_message("Failed to adjust stock", &e)));
                Err(e)
            }
        }
    }

    pub async fn delete_part(&mut self, id: i64, confirm: &dyn Confirm) -> Result<bool, WorkflowError> {
        if !confirm.confirm(DELETE_PART_PROMPT).await {
            debug!("Delete of part {} declined", id);
            return Ok(false);
        }
        self.remove_part(id).await?;
        Ok(true)
    }

    /// Deletes without asking. The caller has already confirmed.
    pub async fn remove_part(&mut self, id: i64) -> Result<(), WorkflowError> {
        let result = self.scope.run(self.backend.delete_part(id)).await;
        match result {
            Ok(_) => {
                info!("Part {} deleted", id);
                self.list.notify(Banner::success("Part deleted successfully"));
                self.refetch().await
            }
            Err(WorkflowError::Cancelled) => Err(WorkflowError::Cancelled),
            Err(e) => {
                warn!("Error deleting part {}: {}", id, e);
                self.list.notify(Banner::error("Failed to delete part"));
                Err(e)
            }
        }
    }

    // The mutation already went through, so a failed refetch is only
    // reported through the load state and banner.
    async fn refetch(&mut self) -> Result<(), WorkflowError> {
        match self.refresh().await {
            Err(WorkflowError::Cancelled) => Err(WorkflowError::Cancelled),
            Err(e) => {
                warn!("Refetch after mutation failed: {}", e);
                Ok(())
            }
            Ok(()) => Ok(()),
        }
    }
}

/// Asks for confirmation before taking the view lock, so the screen stays
/// usable while the dialog is open.
pub async fn confirm_and_delete_part<B>(
    view: &Mutex<PartsView<B>>,
    id: i64,
    confirm: &dyn Confirm,
) -> Result<bool, WorkflowError>
where
    B: PartStore + CategoryStore + SupplierStore + StockStore + ?Sized,
{
    if !confirm.confirm(DELETE_PART_PROMPT).await {
        debug!("Delete of part {} declined", id);
        return Ok(false);
    }
    view.lock().await.remove_part(id).await?;
    Ok(true)
}
