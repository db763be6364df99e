use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Invalid input: {field} must not be blank")]
    Validation { field: &'static str },

    #[error("Permission denied: only admins can {action}")]
    PermissionDenied { action: &'static str },

    #[error("Track not found: {id}")]
    NotFound { id: u64 },

    #[error("No track id left above {}", u64::MAX)]
    IdsExhausted,
}

pub type Result<T> = std::result::Result<T, CatalogError>;
