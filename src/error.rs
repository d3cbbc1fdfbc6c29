use serde::{Serialize, Serializer};
use thiserror::Error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Failure of a single call to the inventory backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Validation { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Validation { status, .. } | ApiError::Server { status, .. } => Some(*status),
            ApiError::NotFound(_) => Some(404),
            ApiError::Unauthorized(_) => Some(401),
            ApiError::Transport(e) => e.status().map(|s| s.as_u16()),
            ApiError::Decode(_) => None,
        }
    }
}

/// Failure of a workflow or view action.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("{0} is required")]
    MissingField(&'static str),

    #[error("{0}")]
    InvalidField(String),

    #[error("Adjustment of {adjustment} would leave {name} with {resulting} in stock")]
    NegativeStock {
        name: String,
        resulting: i64,
        adjustment: i32,
    },

    #[error("Select a reason for the adjustment")]
    MissingReason,

    #[error("Failed to read image {path}: {source}")]
    Image {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot {action} while the form is {state}")]
    InvalidState {
        action: &'static str,
        state: &'static str,
    },

    #[error("No {0} with that id is loaded")]
    UnknownItem(&'static str),

    #[error("Request cancelled")]
    Cancelled,

    #[error(transparent)]
    Api(#[from] ApiError),
}

// Errors cross the desktop bridge as their display string.
impl Serialize for ApiError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl Serialize for WorkflowError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}
