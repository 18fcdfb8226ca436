//! Entity trait: identity + continuity across state changes, guarded by
//! declared field rules.

use serde::Serialize;
use serde_json::Value;

use crate::error::EntityValidationError;
use crate::validation::{FieldRules, FieldValidator};
use crate::value_object::ValueObject;

/// Self-validating entity.
///
/// Implementors declare their rule table once in [`Entity::RULES`] and call
/// [`Entity::check`] at the end of construction and of every state-changing
/// command that touches a validated field.
pub trait Entity: Serialize {
    /// Strongly-typed entity identifier.
    type Id: ValueObject + Eq + core::hash::Hash;

    /// Short name used in diagnostics.
    const KIND: &'static str;

    /// Field rules checked on every validation pass.
    const RULES: &'static [FieldRules];

    /// Returns the entity identifier.
    fn entity_id(&self) -> &Self::Id;

    /// JSON projection of the entity's current state.
    fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Run the rule table against the current state.
    ///
    /// A failed run is escalated into an [`EntityValidationError`] carrying
    /// every violated field.
    fn check(&self) -> Result<(), EntityValidationError> {
        let mut validator = FieldValidator::new(Self::RULES);
        if validator.validate(self) {
            return Ok(());
        }

        let errors = validator.into_errors().unwrap_or_default();
        tracing::debug!(
            entity = Self::KIND,
            fields = errors.len(),
            "entity validation failed"
        );
        Err(EntityValidationError::new(errors))
    }
}
