//! Declarative field validation.
//!
//! Rules are declared once per entity kind as a static table of
//! [`FieldRules`] and interpreted by [`FieldValidator`] against any
//! serializable candidate. The validator only *reports*; escalating a failed
//! report into an error is the entity's decision (see [`crate::Entity::check`]).

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

/// Field name -> ordered violation messages.
///
/// A field is present only when it violated at least one rule, so the lists
/// are never empty.
pub type FieldsErrors = BTreeMap<String, Vec<String>>;

/// A single field constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Skip every other rule of the field when the value is absent or null.
    IsOptional,
    /// Rejects absent, null and `""`.
    IsNotEmpty,
    IsString,
    /// Rejects non-strings and strings longer than the limit (in characters).
    MaxLength(usize),
    IsBoolean,
}

impl Rule {
    fn is_satisfied_by(self, value: Option<&Value>) -> bool {
        match self {
            Rule::IsOptional => true,
            Rule::IsNotEmpty => !matches!(value, None | Some(Value::Null))
                && value.and_then(Value::as_str) != Some(""),
            Rule::IsString => matches!(value, Some(Value::String(_))),
            Rule::MaxLength(max) => value
                .and_then(Value::as_str)
                .is_some_and(|s| s.chars().count() <= max),
            Rule::IsBoolean => matches!(value, Some(Value::Bool(_))),
        }
    }

    fn message(self, field: &str) -> String {
        match self {
            Rule::IsOptional => String::new(),
            Rule::IsNotEmpty => format!("{field} should not be empty"),
            Rule::IsString => format!("{field} must be a string"),
            Rule::MaxLength(max) => {
                format!("{field} must be shorter than or equal to {max} characters")
            }
            Rule::IsBoolean => format!("{field} must be a boolean value"),
        }
    }
}

/// Ordered rules declared for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRules {
    pub field: &'static str,
    pub rules: &'static [Rule],
}

impl FieldRules {
    pub const fn new(field: &'static str, rules: &'static [Rule]) -> Self {
        Self { field, rules }
    }

    fn is_optional(&self) -> bool {
        self.rules.contains(&Rule::IsOptional)
    }

    fn violations(&self, value: Option<&Value>) -> Vec<String> {
        if self.is_optional() && matches!(value, None | Some(Value::Null)) {
            return Vec::new();
        }

        let mut messages: Vec<String> = Vec::new();
        for rule in self.rules.iter().filter(|r| **r != Rule::IsOptional) {
            if rule.is_satisfied_by(value) {
                continue;
            }
            let message = rule.message(self.field);
            if !messages.contains(&message) {
                messages.push(message);
            }
        }
        messages
    }
}

/// Evaluate every declared rule against a JSON object.
///
/// Missing keys are treated as absent values. The result holds one entry per
/// violated field and is empty when `data` satisfies the whole table.
pub fn validate_fields(rules: &[FieldRules], data: &Map<String, Value>) -> FieldsErrors {
    rules
        .iter()
        .filter_map(|field_rules| {
            let messages = field_rules.violations(data.get(field_rules.field));
            (!messages.is_empty()).then(|| (field_rules.field.to_string(), messages))
        })
        .collect()
}

/// Something that validates a `T` and reports per-field messages.
pub trait ValidatorFields<T: ?Sized> {
    /// Returns `true` when `data` satisfies every rule. Overwrites the previous run.
    fn validate(&mut self, data: &T) -> bool;

    /// Messages of the last run; `None` when it passed (or nothing ran yet).
    fn errors(&self) -> Option<&FieldsErrors>;
}

/// Generic rule-table interpreter.
#[derive(Debug, Clone)]
pub struct FieldValidator {
    rules: &'static [FieldRules],
    errors: Option<FieldsErrors>,
    validated_data: Option<Value>,
}

impl FieldValidator {
    pub fn new(rules: &'static [FieldRules]) -> Self {
        Self {
            rules,
            errors: None,
            validated_data: None,
        }
    }

    /// Validate any serializable candidate.
    ///
    /// The candidate is projected to JSON; a value that does not serialize to
    /// an object is treated as having every declared field absent.
    pub fn validate<T: Serialize + ?Sized>(&mut self, data: &T) -> bool {
        let snapshot = match serde_json::to_value(data) {
            Ok(Value::Object(map)) => map,
            Ok(_) => Map::new(),
            Err(err) => {
                tracing::trace!(error = %err, "validation candidate did not serialize");
                Map::new()
            }
        };

        let errors = validate_fields(self.rules, &snapshot);
        if errors.is_empty() {
            self.errors = None;
            self.validated_data = Some(Value::Object(snapshot));
            true
        } else {
            self.errors = Some(errors);
            self.validated_data = None;
            false
        }
    }

    pub fn errors(&self) -> Option<&FieldsErrors> {
        self.errors.as_ref()
    }

    /// The candidate of the last successful run, as validated.
    pub fn validated_data(&self) -> Option<&Value> {
        self.validated_data.as_ref()
    }

    pub fn into_errors(self) -> Option<FieldsErrors> {
        self.errors
    }
}

impl<T: Serialize + ?Sized> ValidatorFields<T> for FieldValidator {
    fn validate(&mut self, data: &T) -> bool {
        FieldValidator::validate(self, data)
    }

    fn errors(&self) -> Option<&FieldsErrors> {
        FieldValidator::errors(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    static RULES: &[FieldRules] = &[
        FieldRules::new(
            "title",
            &[Rule::IsNotEmpty, Rule::IsString, Rule::MaxLength(10)],
        ),
        FieldRules::new("note", &[Rule::IsOptional, Rule::IsString]),
        FieldRules::new("enabled", &[Rule::IsNotEmpty, Rule::IsBoolean]),
    ];

    fn run(data: Value) -> (bool, FieldValidator) {
        let mut validator = FieldValidator::new(RULES);
        let ok = validator.validate(&data);
        (ok, validator)
    }

    fn messages(validator: &FieldValidator, field: &str) -> Vec<String> {
        validator
            .errors()
            .and_then(|e| e.get(field))
            .cloned()
            .unwrap_or_default()
    }

    #[test]
    fn valid_data_has_no_errors_and_exposes_data() {
        let data = json!({ "title": "ok", "enabled": true });
        let (ok, validator) = run(data.clone());

        assert!(ok);
        assert!(validator.errors().is_none());
        assert_eq!(validator.validated_data(), Some(&data));
    }

    #[test]
    fn null_reports_every_violated_rule_in_declaration_order() {
        let (ok, validator) = run(json!({ "title": null, "enabled": true }));

        assert!(!ok);
        assert_eq!(
            messages(&validator, "title"),
            vec![
                "title should not be empty",
                "title must be a string",
                "title must be shorter than or equal to 10 characters",
            ]
        );
        assert!(validator.validated_data().is_none());
    }

    #[test]
    fn absent_field_behaves_like_null() {
        let (_, validator) = run(json!({ "enabled": true }));
        assert_eq!(messages(&validator, "title").len(), 3);
    }

    #[test]
    fn wrong_type_reports_type_and_length() {
        let (_, validator) = run(json!({ "title": 123, "enabled": true }));
        assert_eq!(
            messages(&validator, "title"),
            vec![
                "title must be a string",
                "title must be shorter than or equal to 10 characters",
            ]
        );
    }

    #[test]
    fn empty_string_only_reports_emptiness() {
        let (_, validator) = run(json!({ "title": "", "enabled": true }));
        assert_eq!(messages(&validator, "title"), vec!["title should not be empty"]);
    }

    #[test]
    fn length_counts_characters() {
        let (ok, _) = run(json!({ "title": "ééééééééé€", "enabled": true }));
        assert!(ok);

        let (_, validator) = run(json!({ "title": "a".repeat(11), "enabled": true }));
        assert_eq!(
            messages(&validator, "title"),
            vec!["title must be shorter than or equal to 10 characters"]
        );
    }

    #[test]
    fn optional_field_is_skipped_when_null_but_checked_when_present() {
        let (ok, _) = run(json!({ "title": "x", "note": null, "enabled": false }));
        assert!(ok);

        let (ok, validator) = run(json!({ "title": "x", "note": 5, "enabled": false }));
        assert!(!ok);
        assert_eq!(messages(&validator, "note"), vec!["note must be a string"]);
    }

    #[test]
    fn boolean_rule() {
        let (_, validator) = run(json!({ "title": "x", "enabled": 123 }));
        assert_eq!(
            messages(&validator, "enabled"),
            vec!["enabled must be a boolean value"]
        );
    }

    #[test]
    fn fields_without_violations_are_absent() {
        let (_, validator) = run(json!({ "title": "x", "enabled": "yes" }));
        let errors = validator.errors().unwrap();

        assert_eq!(errors.keys().collect::<Vec<_>>(), vec!["enabled"]);
        assert!(errors.values().all(|m| !m.is_empty()));
    }

    #[test]
    fn non_object_candidate_treats_fields_as_absent() {
        let (ok, validator) = run(json!("just a string"));
        assert!(!ok);
        let errors = validator.errors().unwrap();
        assert!(errors.contains_key("title"));
        assert!(errors.contains_key("enabled"));
        assert!(!errors.contains_key("note"));
    }

    #[test]
    fn rerun_overwrites_previous_state() {
        let mut validator = FieldValidator::new(RULES);
        assert!(!validator.validate(&json!({})));
        assert!(validator.errors().is_some());

        assert!(validator.validate(&json!({ "title": "x", "enabled": true })));
        assert!(validator.errors().is_none());
    }

    #[test]
    fn validates_serializable_structs_through_the_trait() {
        #[derive(Serialize)]
        struct Draft<'a> {
            title: &'a str,
            enabled: bool,
        }

        fn check<V: ValidatorFields<Draft<'static>>>(v: &mut V, d: &Draft<'static>) -> bool {
            v.validate(d)
        }

        let mut validator = FieldValidator::new(RULES);
        assert!(check(&mut validator, &Draft { title: "x", enabled: true }));
        assert!(!check(&mut validator, &Draft { title: "", enabled: true }));
        assert!(ValidatorFields::<Draft>::errors(&validator).is_some());
    }

    proptest! {
        #[test]
        fn validation_is_idempotent(
            title in proptest::option::of(".{0,15}"),
            enabled in any::<bool>(),
        ) {
            let data = json!({ "title": title, "enabled": enabled });
            let mut validator = FieldValidator::new(RULES);

            let first = validator.validate(&data);
            let first_errors = validator.errors().cloned();
            let second = validator.validate(&data);

            prop_assert_eq!(first, second);
            prop_assert_eq!(first_errors, validator.errors().cloned());
        }
    }
}
