use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use catalog_core::{DomainError, DomainResult, Entity, EntityValidationError, FieldRules};

use crate::category_validator::CATEGORY_RULES;

catalog_core::define_uuid_id!(
    /// Category identifier.
    CategoryId
);

/// Attributes a category is built from.
///
/// Content fields are untyped JSON values because they arrive from outer
/// layers unchecked; [`Category::create`] is what guarantees their shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryProps {
    pub category_id: Option<CategoryId>,
    pub name: Value,
    pub description: Option<Value>,
    pub is_active: Option<Value>,
    pub created_at: Option<DateTime<Utc>>,
}

impl CategoryProps {
    pub fn named(name: impl Into<Value>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_category_id(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_description(mut self, description: impl Into<Value>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_is_active(mut self, is_active: impl Into<Value>) -> Self {
        self.is_active = Some(is_active.into());
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }
}

/// Entity: Category.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    category_id: CategoryId,
    name: Value,
    description: Value,
    is_active: Value,
    created_at: DateTime<Utc>,
    #[serde(skip)]
    validate_calls: u32,
}

/// Stored form read back by [`Category::restore`].
#[derive(Debug, Deserialize)]
struct CategorySnapshot {
    category_id: String,
    name: Value,
    #[serde(default)]
    description: Value,
    #[serde(default)]
    is_active: Option<Value>,
    created_at: DateTime<Utc>,
}

impl Category {
    /// Build a category with defaults applied, without validating it.
    ///
    /// Meant for state that is already trusted (e.g. read back from storage).
    /// Use [`Category::create`] for new categories.
    pub fn new(props: CategoryProps) -> Self {
        Self {
            category_id: props.category_id.unwrap_or_default(),
            name: props.name,
            description: props.description.unwrap_or(Value::Null),
            is_active: match props.is_active {
                None | Some(Value::Null) => Value::Bool(true),
                Some(is_active) => is_active,
            },
            created_at: props.created_at.unwrap_or_else(Utc::now),
            validate_calls: 0,
        }
    }

    /// Build and validate a new category.
    pub fn create(props: CategoryProps) -> Result<Self, EntityValidationError> {
        let mut category = Self::new(props);
        category.validate()?;
        Ok(category)
    }

    /// Rehydrate a category from its JSON projection.
    ///
    /// Field rules are not re-checked; only the identifier format is.
    pub fn restore(snapshot: &Value) -> DomainResult<Self> {
        let snapshot: CategorySnapshot = serde_json::from_value(snapshot.clone())
            .map_err(|e| DomainError::invalid_snapshot(format!("category: {e}")))?;

        let props = CategoryProps {
            category_id: Some(CategoryId::parse(snapshot.category_id)?),
            name: snapshot.name,
            description: Some(snapshot.description),
            is_active: snapshot.is_active,
            created_at: Some(snapshot.created_at),
        };
        let category = Self::new(props);
        tracing::trace!(category_id = %category.category_id, "restored category");
        Ok(category)
    }

    pub fn category_id(&self) -> &CategoryId {
        &self.category_id
    }

    /// `None` when the stored name is not a string.
    pub fn name(&self) -> Option<&str> {
        self.name.as_str()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_str()
    }

    pub fn is_active(&self) -> bool {
        self.is_active.as_bool().unwrap_or(false)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Validation passes performed on this instance.
    pub fn validate_calls(&self) -> u32 {
        self.validate_calls
    }

    /// Replace the name, then validate.
    ///
    /// On failure the new name is kept and the instance should be discarded.
    pub fn change_name(&mut self, name: impl Into<Value>) -> Result<(), EntityValidationError> {
        self.name = name.into();
        self.validate()
    }

    /// Replace the description, then validate.
    ///
    /// On failure the new description is kept and the instance should be discarded.
    pub fn change_description(
        &mut self,
        description: impl Into<Value>,
    ) -> Result<(), EntityValidationError> {
        self.description = description.into();
        self.validate()
    }

    pub fn activate(&mut self) {
        self.is_active = Value::Bool(true);
    }

    pub fn deactivate(&mut self) {
        self.is_active = Value::Bool(false);
    }

    fn validate(&mut self) -> Result<(), EntityValidationError> {
        self.validate_calls += 1;
        self.check()
    }
}

impl Entity for Category {
    type Id = CategoryId;

    const KIND: &'static str = "category";
    const RULES: &'static [FieldRules] = CATEGORY_RULES;

    fn entity_id(&self) -> &CategoryId {
        &self.category_id
    }
}
