use crate::error::WorkflowError;
use crate::models::{Ack, ImageUpload, Part, PartForm, PartPayload};
use crate::stores::PartStore;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Whether the form targets a new part or an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EditMode {
    Create,
    Edit { id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EditState {
    Idle,
    Open,
    Submitting,
    Closed,
}

impl EditState {
    fn as_str(self) -> &'static str {
        match self {
            EditState::Idle => "closed",
            EditState::Open => "open",
            EditState::Submitting => "submitting",
            EditState::Closed => "closed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SaveOutcome {
    Created(Ack),
    Updated { id: i64, ack: Ack },
}

impl SaveOutcome {
    pub fn message(&self) -> &str {
        match self {
            SaveOutcome::Created(_) => "Part added successfully",
            SaveOutcome::Updated { .. } => "Part updated successfully",
        }
    }
}

/// Add/edit part modal.
///
/// `Idle -> Open -> Submitting -> Closed`, falling back to `Open` with an
/// error when the save fails so the user can retry.
#[derive(Debug, Clone)]
pub struct PartEditWorkflow {
    state: EditState,
    mode: EditMode,
    form: PartForm,
    error: Option<String>,
}

impl Default for PartEditWorkflow {
    fn default() -> Self {
        Self::new()
    }
}

impl PartEditWorkflow {
    pub fn new() -> Self {
        PartEditWorkflow {
            state: EditState::Idle,
            mode: EditMode::Create,
            form: PartForm::default(),
            error: None,
        }
    }

    /// "Add New Part": blank skeleton.
    pub fn open_create(&mut self) {
        self.mode = EditMode::Create;
        self.form = PartForm::default();
        self.error = None;
        self.state = EditState::Open;
    }

    /// "Edit": seeded from an existing part.
    pub fn open_edit(&mut self, part: &Part) {
        self.mode = EditMode::Edit { id: part.id };
        self.form = PartForm::from(part);
        self.error = None;
        self.state = EditState::Open;
    }

    pub fn cancel(&mut self) {
        self.error = None;
        self.state = EditState::Idle;
    }

    /// Back to `Open` after an in-flight submit was dropped.
    pub(crate) fn interrupted(&mut self) {
        if self.state == EditState::Submitting {
            self.state = EditState::Open;
        }
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            EditMode::Create => "Add New Part",
            EditMode::Edit { .. } => "Edit Part",
        }
    }

    pub fn form(&self) -> &PartForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut PartForm {
        &mut self.form
    }

    pub fn attach_image(&mut self, path: impl Into<PathBuf>) {
        self.form.image = Some(path.into());
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn validate(&self) -> Result<(), WorkflowError> {
        if self.form.name.trim().is_empty() {
            return Err(WorkflowError::MissingField("Part name"));
        }
        if self.form.category_id.is_none() {
            return Err(WorkflowError::MissingField("Category"));
        }
        if self.form.quantity < 0 {
            return Err(WorkflowError::InvalidField(
                "Quantity cannot be negative".to_string(),
            ));
        }
        if !self.form.price.is_finite() || self.form.price < 0.0 {
            return Err(WorkflowError::InvalidField(
                "Price must be zero or more".to_string(),
            ));
        }
        Ok(())
    }

    pub async fn submit<B>(&mut self, backend: &B) -> Result<SaveOutcome, WorkflowError>
    where
        B: PartStore + ?Sized,
    {
        if self.state != EditState::Open {
            return Err(WorkflowError::InvalidState {
                action: "submit",
                state: self.state.as_str(),
            });
        }

        self.error = None;
        if let Err(e) = self.validate() {
            self.error = Some(e.to_string());
            return Err(e);
        }

        self.state = EditState::Submitting;
        let result = self.save(backend).await;

        match &result {
            Ok(outcome) => {
                info!(mode = ?self.mode, "{}", outcome.message());
                self.state = EditState::Closed;
            }
            Err(e) => {
                warn!(mode = ?self.mode, "Failed to save part: {}", e);
                self.error = Some(e.to_string());
                self.state = EditState::Open;
            }
        }

        result
    }

    async fn save<B>(&self, backend: &B) -> Result<SaveOutcome, WorkflowError>
    where
        B: PartStore + ?Sized,
    {
        // An unreadable image aborts before anything reaches the backend.
        let image = match &self.form.image {
            Some(path) => Some(load_image(path).await?),
            None => None,
        };

        match self.mode {
            EditMode::Create => {
                let payload = PartPayload::from_form(&self.form, image);
                Ok(SaveOutcome::Created(backend.store_part(&payload).await?))
            }
            EditMode::Edit { id } => {
                let payload = PartPayload::for_update(&self.form, image);
                let ack = backend.update_part(id, &payload).await?;
                Ok(SaveOutcome::Updated { id, ack })
            }
        }
    }
}

async fn load_image(path: &Path) -> Result<ImageUpload, WorkflowError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| WorkflowError::Image {
            path: path.display().to_string(),
            source,
        })?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    debug!("Loaded image {} ({} bytes)", file_name, bytes.len());

    Ok(ImageUpload {
        mime: image_mime(path),
        file_name,
        bytes,
    })
}

fn image_mime(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
