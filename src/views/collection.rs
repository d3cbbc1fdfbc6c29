use super::{failure_message, Banner, Confirm, ListState, ViewScope};
use crate::error::{ApiResult, WorkflowError};
use crate::filter::Searchable;
use crate::models::{
    Ack, Category, CategoryForm, Sale, SaleForm, Supplier, SupplierForm,
};
use crate::stores::{CategoryStore, SaleStore, SupplierStore};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// An entity managed by a plain list + modal screen.
pub trait Resource: Searchable + Clone + Send + Sync + 'static {
    type Form: Clone + Default + Serialize + Send + Sync + 'static;

    /// Capitalised singular, used in banners ("Category created successfully").
    const LABEL: &'static str;
    const SINGULAR: &'static str;
    const PLURAL: &'static str;

    fn id(&self) -> i64;
    fn to_form(&self) -> Self::Form;
    fn validate(form: &Self::Form) -> Result<(), WorkflowError>;
}

impl Resource for Category {
    type Form = CategoryForm;

    const LABEL: &'static str = "Category";
    const SINGULAR: &'static str = "category";
    const PLURAL: &'static str = "categories";

    fn id(&self) -> i64 {
        self.id
    }

    fn to_form(&self) -> CategoryForm {
        CategoryForm {
            name: self.name.clone(),
        }
    }

    fn validate(form: &CategoryForm) -> Result<(), WorkflowError> {
        if form.name.trim().is_empty() {
            return Err(WorkflowError::MissingField("Category name"));
        }
        Ok(())
    }
}

impl Resource for Supplier {
    type Form = SupplierForm;

    const LABEL: &'static str = "Supplier";
    const SINGULAR: &'static str = "supplier";
    const PLURAL: &'static str = "suppliers";

    fn id(&self) -> i64 {
        self.id
    }

    fn to_form(&self) -> SupplierForm {
        SupplierForm::from(self)
    }

    fn validate(form: &SupplierForm) -> Result<(), WorkflowError> {
        if form.name.trim().is_empty() {
            return Err(WorkflowError::MissingField("Supplier name"));
        }
        Ok(())
    }
}

impl Resource for Sale {
    type Form = SaleForm;

    const LABEL: &'static str = "Sale";
    const SINGULAR: &'static str = "sale";
    const PLURAL: &'static str = "sales";

    fn id(&self) -> i64 {
        self.id
    }

    fn to_form(&self) -> SaleForm {
        SaleForm::from(self)
    }

    fn validate(form: &SaleForm) -> Result<(), WorkflowError> {
        if form.part_id <= 0 {
            return Err(WorkflowError::MissingField("Motor part"));
        }
        if form.quantity_sold <= 0 {
            return Err(WorkflowError::InvalidField(
                "Quantity sold must be at least 1".to_string(),
            ));
        }
        if !form.price_per_unit.is_finite() || form.price_per_unit < 0.0 {
            return Err(WorkflowError::InvalidField(
                "Price per unit must be zero or more".to_string(),
            ));
        }
        Ok(())
    }
}

/// Uniform list/create/update/delete over one resource's store.
#[async_trait]
pub trait CrudStore<T: Resource>: Send + Sync {
    async fn list(&self) -> ApiResult<Vec<T>>;
    async fn create(&self, form: &T::Form) -> ApiResult<Ack>;
    async fn update(&self, id: i64, form: &T::Form) -> ApiResult<Ack>;
    async fn delete(&self, id: i64) -> ApiResult<Ack>;
}

#[async_trait]
impl<B: CategoryStore + ?Sized> CrudStore<Category> for B {
    async fn list(&self) -> ApiResult<Vec<Category>> {
        self.list_categories().await
    }

    async fn create(&self, form: &CategoryForm) -> ApiResult<Ack> {
        self.store_category(form).await
    }

    async fn update(&self, id: i64, form: &CategoryForm) -> ApiResult<Ack> {
        self.update_category(id, form).await
    }

    async fn delete(&self, id: i64) -> ApiResult<Ack> {
        self.delete_category(id).await
    }
}

#[async_trait]
impl<B: SupplierStore + ?Sized> CrudStore<Supplier> for B {
    async fn list(&self) -> ApiResult<Vec<Supplier>> {
        self.list_suppliers().await
    }

    async fn create(&self, form: &SupplierForm) -> ApiResult<Ack> {
        self.store_supplier(form).await
    }

    async fn update(&self, id: i64, form: &SupplierForm) -> ApiResult<Ack> {
        self.update_supplier(id, form).await
    }

    async fn delete(&self, id: i64) -> ApiResult<Ack> {
        self.delete_supplier(id).await
    }
}

#[async_trait]
impl<B: SaleStore + ?Sized> CrudStore<Sale> for B {
    async fn list(&self) -> ApiResult<Vec<Sale>> {
        self.list_sales().await
    }

    async fn create(&self, form: &SaleForm) -> ApiResult<Ack> {
        self.store_sale(form).await
    }

    async fn update(&self, id: i64, form: &SaleForm) -> ApiResult<Ack> {
        self.update_sale(id, form).await
    }

    async fn delete(&self, id: i64) -> ApiResult<Ack> {
        self.delete_sale(id).await
    }
}

/// Form behind a screen's create/edit modal. `editing` is `None` for "Add".
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Editor<F> {
    pub editing: Option<i64>,
    pub form: F,
    pub error: Option<String>,
}

pub type CategoriesView<B> = CollectionView<Category, B>;
pub type SuppliersView<B> = CollectionView<Supplier, B>;
pub type SalesView<B> = CollectionView<Sale, B>;

pub struct CollectionView<T: Resource, B: ?Sized> {
    backend: Arc<B>,
    scope: ViewScope,
    list: ListState<T>,
    editor: Option<Editor<T::Form>>,
}

impl<T, B> CollectionView<T, B>
where
    T: Resource,
    B: CrudStore<T> + ?Sized,
{
    pub fn new(backend: Arc<B>, scope: ViewScope) -> Self {
        CollectionView {
            backend,
            scope,
            list: ListState::default(),
            editor: None,
        }
    }

    pub fn scope(&self) -> &ViewScope {
        &self.scope
    }

    pub fn list(&self) -> &ListState<T> {
        &self.list
    }

    pub fn visible(&self) -> &[T] {
        self.list.visible()
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.list.set_search(term);
    }

    pub fn dismiss_banner(&mut self) {
        self.list.dismiss_banner();
    }

    pub fn empty_message(&self) -> String {
        if self.list.search_term().is_empty() {
            format!("No {} available", T::PLURAL)
        } else {
            format!("No matching {} found", T::PLURAL)
        }
    }

    /// Fetches the whole collection, replacing the cached one.
    pub async fn refresh(&mut self) -> Result<(), WorkflowError> {
        self.list.begin_load();

        let result = self.scope.run(CrudStore::<T>::list(&*self.backend)).await;
        match result {
            Ok(items) => {
                debug!("Loaded {} {}", items.len(), T::PLURAL);
                self.list.loaded(items);
                Ok(())
            }
            Err(WorkflowError::Cancelled) => Err(WorkflowError::Cancelled),
            Err(e) => {
                warn!("Failed to fetch {}: {}", T::PLURAL, e);
                self.list.failed(format!("Failed to fetch {}", T::PLURAL));
                Err(e)
            }
        }
    }

    pub fn editor(&self) -> Option<&Editor<T::Form>> {
        self.editor.as_ref()
    }

    pub fn open_create(&mut self) -> &mut T::Form {
        let editor = self.editor.insert(Editor {
            editing: None,
            form: T::Form::default(),
            error: None,
        });
        &mut editor.form
    }

    pub fn open_edit(&mut self, id: i64) -> Result<&mut T::Form, WorkflowError> {
        let item = self
            .list
            .items()
            .iter()
            .find(|item| item.id() == id)
            .ok_or(WorkflowError::UnknownItem(T::SINGULAR))?;

        let editor = self.editor.insert(Editor {
            editing: Some(id),
            form: item.to_form(),
            error: None,
        });
        Ok(&mut editor.form)
    }

    pub fn form_mut(&mut self) -> Option<&mut T::Form> {
        self.editor.as_mut().map(|editor| &mut editor.form)
    }

    pub fn close_editor(&mut self) {
        self.editor = None;
    }

    /// Creates or updates from the open modal, then refetches.
    pub async fn submit(&mut self) -> Result<(), WorkflowError> {
        let Some(editor) = self.editor.as_mut() else {
            return Err(WorkflowError::InvalidState {
                action: "submit",
                state: "closed",
            });
        };

        editor.error = None;
        if let Err(e) = T::validate(&editor.form) {
            editor.error = Some(e.to_string());
            return Err(e);
        }

        let (result, verb) = match editor.editing {
            Some(id) => (
                self.scope
                    .run(CrudStore::<T>::update(&*self.backend, id, &editor.form))
                    .await,
                "updated",
            ),
            None => (
                self.scope
                    .run(CrudStore::<T>::create(&*self.backend, &editor.form))
                    .await,
                "created",
            ),
        };

        match result {
            Ok(_) => {
                info!("{} {}", T::LABEL, verb);
                self.editor = None;
                self.list
                    .notify(Banner::success(format!("{} {} successfully", T::LABEL, verb)));
                self.refetch().await
            }
            Err(WorkflowError::Cancelled) => Err(WorkflowError::Cancelled),
            Err(e) => {
                let message = failure_message("An error occurred", &e);
                editor.error = Some(message.clone());
                self.list.notify(Banner::error(message));
                Err(e)
            }
        }
    }

    /// Deletes after confirmation. Returns `false` when the user declined.
    pub async fn delete(&mut self, id: i64, confirm: &dyn Confirm) -> Result<bool, WorkflowError> {
        if !confirm.confirm(&delete_prompt::<T>()).await {
            debug!("Delete of {} {} declined", T::SINGULAR, id);
            return Ok(false);
        }
        self.remove(id).await?;
        Ok(true)
    }

    /// Deletes without asking. The caller has already confirmed.
    pub async fn remove(&mut self, id: i64) -> Result<(), WorkflowError> {
        let result = self.scope.run(CrudStore::<T>::delete(&*self.backend, id)).await;
        match result {
            Ok(_) => {
                info!("{} {} deleted", T::LABEL, id);
                self.list
                    .notify(Banner::success(format!("{} deleted successfully", T::LABEL)));
                self.refetch().await
            }
            Err(WorkflowError::Cancelled) => Err(WorkflowError::Cancelled),
            Err(e) => {
                warn!("Failed to delete {} {}: {}", T::SINGULAR, id, e);
                self.list
                    .notify(Banner::error(format!("Failed to delete {}", T::SINGULAR)));
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
                warn!("Refetch of {} after mutation failed: {}", T::PLURAL, e);
                Ok(())
            }
            Ok(()) => Ok(()),
        }
    }
}

fn delete_prompt<T: Resource>() -> String {
    format!("Are you sure you want to delete this {}?", T::SINGULAR)
}

/// Asks for confirmation before taking the view lock, so the screen stays
/// usable while the dialog is open.
pub async fn confirm_and_delete<T, B>(
    view: &Mutex<CollectionView<T, B>>,
    id: i64,
    confirm: &dyn Confirm,
) -> Result<bool, WorkflowError>
where
    T: Resource,
    B: CrudStore<T> + ?Sized,
{
    if !confirm.confirm(&delete_prompt::<T>()).await {
        debug!("Delete of {} {} declined", T::SINGULAR, id);
        return Ok(false);
    }
    view.lock().await.remove(id).await?;
    Ok(true)
}
