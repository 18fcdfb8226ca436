//! Domain error model.

use serde::Serialize;
use thiserror::Error;

use crate::validation::FieldsErrors;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// A supplied identifier does not match the canonical UUID format.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("ID must be a valid UUID")]
pub struct InvalidUuidError;

/// An entity failed validation of its declared field rules.
///
/// Carries every violated field with its messages so callers can surface all
/// problems at once. Only ever built from a failed validation run, so the
/// mapping is never empty.
#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize)]
#[error("Entity Validation Error")]
pub struct EntityValidationError {
    errors: FieldsErrors,
}

impl EntityValidationError {
    pub(crate) fn new(errors: FieldsErrors) -> Self {
        debug_assert!(!errors.is_empty());
        Self { errors }
    }

    /// Field name -> ordered violation messages.
    pub fn errors(&self) -> &FieldsErrors {
        &self.errors
    }

    pub fn into_errors(self) -> FieldsErrors {
        self.errors
    }
}

/// Domain-level error.
///
/// Keep this focused on deterministic, local failures (identifier format,
/// field validation, malformed stored snapshots). Translating them into a
/// user-facing response belongs to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error(transparent)]
    InvalidUuid(#[from] InvalidUuidError),

    #[error(transparent)]
    EntityValidation(#[from] EntityValidationError),

    /// A stored snapshot could not be read back into an entity.
    #[error("invalid snapshot: {0}")]
    InvalidSnapshot(String),
}

impl DomainError {
    pub fn invalid_snapshot(msg: impl Into<String>) -> Self {
        Self::InvalidSnapshot(msg.into())
    }
}
