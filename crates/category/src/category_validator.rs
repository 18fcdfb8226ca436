use catalog_core::{FieldRules, FieldValidator, Rule};

/// Field rules of a category.
pub const CATEGORY_RULES: &[FieldRules] = &[
    FieldRules::new(
        "name",
        &[Rule::IsNotEmpty, Rule::IsString, Rule::MaxLength(255)],
    ),
    FieldRules::new("description", &[Rule::IsOptional, Rule::IsString]),
    FieldRules::new("is_active", &[Rule::IsNotEmpty, Rule::IsBoolean]),
];

/// Builds standalone validators over [`CATEGORY_RULES`].
pub struct CategoryValidatorFactory;

impl CategoryValidatorFactory {
    pub fn create() -> FieldValidator {
        FieldValidator::new(CATEGORY_RULES)
    }
}
