//! Assertion helpers for validation tests.
//!
//! Matching is by containment: every field the test expects must be present in
//! the actual errors with the same message list, while extra fields in the
//! actual errors are ignored.

use serde::Serialize;
use serde_json::Value;

use crate::error::EntityValidationError;
use crate::validation::{FieldsErrors, ValidatorFields};

/// What to run to obtain the actual errors.
pub enum Expected<'a> {
    /// A command expected to fail with an [`EntityValidationError`].
    Command(Box<dyn FnOnce() -> Result<(), EntityValidationError> + 'a>),
    /// A validator run directly against `data`.
    Validator {
        validator: &'a mut dyn ValidatorFields<Value>,
        data: Value,
    },
}

impl<'a> Expected<'a> {
    pub fn command<T, F>(command: F) -> Self
    where
        F: FnOnce() -> Result<T, EntityValidationError> + 'a,
    {
        Self::Command(Box::new(move || command().map(|_| ())))
    }

    /// Panics when `data` does not serialize, so a broken fixture cannot
    /// pass as "every field absent".
    pub fn validator<V, T>(validator: &'a mut V, data: &T) -> Self
    where
        V: ValidatorFields<Value> + 'a,
        T: Serialize + ?Sized,
    {
        let data = serde_json::to_value(data)
            .unwrap_or_else(|err| panic!("validation data did not serialize: {err}"));
        Self::Validator { validator, data }
    }
}

/// Outcome of a containment match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Match {
    pub pass: bool,
    pub message: String,
}

impl Match {
    fn pass() -> Self {
        Self {
            pass: true,
            message: String::new(),
        }
    }

    fn fail(message: String) -> Self {
        Self {
            pass: false,
            message,
        }
    }
}

/// `true` when every expected field is present in `actual` with an equal
/// message list.
pub fn is_subset(expected: &FieldsErrors, actual: &FieldsErrors) -> bool {
    expected
        .iter()
        .all(|(field, messages)| actual.get(field) == Some(messages))
}

/// Run `subject` and check its errors contain `expected`.
pub fn contains_error_messages(subject: Expected<'_>, expected: &FieldsErrors) -> Match {
    let actual = match subject {
        Expected::Command(command) => match command() {
            Ok(()) => return unexpectedly_valid(expected),
            Err(err) => err.into_errors(),
        },
        Expected::Validator { validator, data } => {
            if validator.validate(&data) {
                return unexpectedly_valid(expected);
            }
            validator.errors().cloned().unwrap_or_default()
        }
    };

    if is_subset(expected, &actual) {
        Match::pass()
    } else {
        Match::fail(format!(
            "The validation errors not contains {}. Current: {}",
            to_json(expected),
            to_json(&actual)
        ))
    }
}

fn unexpectedly_valid(expected: &FieldsErrors) -> Match {
    Match::fail(format!(
        "Expected validation errors {} but the data is valid",
        to_json(expected)
    ))
}

fn to_json(errors: &FieldsErrors) -> String {
    serde_json::to_string(errors).unwrap_or_default()
}

/// Build a [`FieldsErrors`] literal.
///
/// ```ignore
/// let errors = catalog_core::fields_errors!({ "name" => ["name should not be empty"] });
/// assert_eq!(errors["name"], vec!["name should not be empty"]);
/// ```
#[macro_export]
macro_rules! fields_errors {
    ({ $($field:literal => [$($msg:expr),* $(,)?]),* $(,)? }) => {{
        let mut errors = $crate::FieldsErrors::new();
        $(
            errors.insert(
                ::std::string::String::from($field),
                ::std::vec![$(::std::string::String::from($msg)),*],
            );
        )*
        errors
    }};
}

/// Assert that `subject` fails with (at least) the given field messages.
///
/// `subject` is either a closure returning `Result<_, EntityValidationError>`
/// or an [`Expected`] value.
#[macro_export]
macro_rules! assert_contains_error_messages {
    ($subject:expr, { $($body:tt)* }) => {{
        let expected = $crate::fields_errors!({ $($body)* });
        let outcome = $crate::testing::contains_error_messages(
            $crate::testing::IntoExpected::into_expected($subject),
            &expected,
        );
        assert!(outcome.pass, "{}", outcome.message);
    }};
}

/// Conversion used by [`assert_contains_error_messages!`].
pub trait IntoExpected<'a> {
    fn into_expected(self) -> Expected<'a>;
}

impl<'a> IntoExpected<'a> for Expected<'a> {
    fn into_expected(self) -> Expected<'a> {
        self
    }
}

impl<'a, T, F> IntoExpected<'a> for F
where
    F: FnOnce() -> Result<T, EntityValidationError> + 'a,
{
    fn into_expected(self) -> Expected<'a> {
        Expected::command(self)
    }
}
