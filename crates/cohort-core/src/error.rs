//! Error types for the Cohort engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CohortError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CohortError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Whether this error is an expected, caller-visible condition rather
    /// than a storage or collaborator failure.
    pub fn is_expected(&self) -> bool {
        !matches!(self, Self::Internal(_))
    }
}

pub type CohortResult<T> = Result<T, CohortError>;
