//! Value object trait: equality by value, not identity.
//!
//! Value objects carry no identity; they are defined entirely by their attribute
//! values. Two value objects of the same kind holding the same values are equal.

use core::any::Any;

/// Immutable data holder compared by structural content.
///
/// ## Value Object vs Entity
///
/// - **Value Object**: no identity, equal when every field is equal
/// - **Entity**: has identity, the same entity across state changes
///
/// ## Immutability
///
/// Value objects never change after construction. A "changed" value object is
/// always a brand-new instance.
///
/// ## Usage Pattern
///
/// ```
/// use catalog_core::ValueObject;
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Price {
///     amount: i64,
///     currency: String,
/// }
///
/// impl ValueObject for Price {}
///
/// let a = Price { amount: 100, currency: "USD".to_string() };
/// let b = Price { amount: 100, currency: "USD".to_string() };
/// assert!(a.equals(Some(&b)));
/// assert!(!a.equals(None));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {
    /// Structural comparison. An absent `other` is never equal.
    fn equals(&self, other: Option<&Self>) -> bool {
        other.is_some_and(|other| self == other)
    }

    /// Structural comparison against a value of unknown kind.
    ///
    /// Returns `false` when `other` is absent or is not the same concrete type.
    fn equals_any(&self, other: Option<&dyn Any>) -> bool
    where
        Self: 'static,
    {
        self.equals(other.and_then(|other| other.downcast_ref::<Self>()))
    }
}
