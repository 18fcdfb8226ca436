//! `catalog-core` — domain foundation building blocks.
//!
//! Pure domain primitives (no infrastructure concerns): value objects, the
//! UUID identity, declarative field validation and the self-validating entity
//! contract.

pub mod entity;
pub mod error;
pub mod id;
pub mod validation;
pub mod value_object;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use entity::Entity;
pub use error::{DomainError, DomainResult, EntityValidationError, InvalidUuidError};
pub use id::Uuid;
pub use validation::{FieldRules, FieldValidator, FieldsErrors, Rule, ValidatorFields};
pub use value_object::ValueObject;
