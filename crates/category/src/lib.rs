//! Category domain module.
//!
//! A self-validating entity: every construction through [`Category::create`]
//! and every content change is checked against the category rule table.

pub mod category;
pub mod category_validator;

pub use category::{Category, CategoryId, CategoryProps};
pub use category_validator::{CATEGORY_RULES, CategoryValidatorFactory};
