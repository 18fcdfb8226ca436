//! Identity value object and strongly-typed entity identifiers.

use core::str::FromStr;
use serde::{Deserialize, Serialize};
use uuid::Variant;

use crate::error::InvalidUuidError;
use crate::value_object::ValueObject;

/// Canonical UUID identifier (`xxxxxxxx-xxxx-Vxxx-Nxxx-xxxxxxxxxxxx`).
///
/// The wrapped string always satisfies the canonical format: 36 characters,
/// hyphens at fixed positions, hexadecimal segments, version nibble `1..=8`
/// and RFC 4122 variant nibble. The nil and max UUIDs are accepted as well.
/// A supplied value is stored verbatim (case preserved).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Uuid {
    id: String,
}

impl Uuid {
    /// Generate a fresh random (v4) identifier.
    pub fn new() -> Self {
        let id = uuid::Uuid::new_v4().to_string();
        // v4 generation always yields a canonical value.
        let valid = Self::validate(&id).is_ok();
        debug_assert!(valid, "generated uuid failed validation: {id}");
        Self { id }
    }

    /// Accept a caller-supplied identifier after validating its shape.
    pub fn parse(id: impl Into<String>) -> Result<Self, InvalidUuidError> {
        let id = id.into();
        Self::validate(&id).inspect_err(|_| {
            tracing::trace!(id = %id, "rejected malformed uuid");
        })?;
        Ok(Self { id })
    }

    pub fn as_str(&self) -> &str {
        &self.id
    }

    /// Runs exactly once per construction, generated or supplied.
    fn validate(id: &str) -> Result<(), InvalidUuidError> {
        #[cfg(any(test, feature = "testing"))]
        validate_calls::record();

        if is_canonical(id) {
            Ok(())
        } else {
            Err(InvalidUuidError)
        }
    }

    /// Number of validation passes performed on the current thread.
    #[cfg(any(test, feature = "testing"))]
    pub fn validate_calls() -> usize {
        validate_calls::get()
    }

    #[cfg(any(test, feature = "testing"))]
    pub fn reset_validate_calls() {
        validate_calls::reset();
    }
}

#[cfg(any(test, feature = "testing"))]
mod validate_calls {
    use std::cell::Cell;

    thread_local! {
        static CALLS: Cell<usize> = const { Cell::new(0) };
    }

    pub(super) fn record() {
        CALLS.with(|calls| calls.set(calls.get() + 1));
    }

    pub(super) fn get() -> usize {
        CALLS.with(Cell::get)
    }

    pub(super) fn reset() {
        CALLS.with(|calls| calls.set(0));
    }
}

fn is_canonical(id: &str) -> bool {
    let bytes = id.as_bytes();
    if bytes.len() != 36 {
        return false;
    }

    let shape_ok = bytes.iter().enumerate().all(|(i, b)| match i {
        8 | 13 | 18 | 23 => *b == b'-',
        _ => b.is_ascii_hexdigit(),
    });
    if !shape_ok {
        return false;
    }

    let Ok(parsed) = uuid::Uuid::try_parse(id) else {
        return false;
    };

    if parsed.is_nil() || parsed.as_bytes() == &[0xff; 16] {
        return true;
    }

    (1..=8).contains(&parsed.get_version_num()) && parsed.get_variant() == Variant::RFC4122
}

impl Default for Uuid {
    fn default() -> Self {
        Self::new()
    }
}

impl ValueObject for Uuid {}

impl core::fmt::Display for Uuid {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.id)
    }
}

impl FromStr for Uuid {
    type Err = InvalidUuidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Uuid {
    type Error = InvalidUuidError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Uuid> for String {
    fn from(value: Uuid) -> Self {
        value.id
    }
}

/// Declare a strongly-typed entity identifier backed by [`Uuid`].
///
/// ```
/// catalog_core::define_uuid_id!(
///     /// Identifier of a genre.
///     GenreId
/// );
///
/// let id = GenreId::new();
/// assert_eq!(GenreId::parse(id.as_str()).unwrap(), id);
/// ```
#[macro_export]
macro_rules! define_uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name($crate::Uuid);

        impl $name {
            /// Generate a fresh identifier.
            pub fn new() -> Self {
                Self($crate::Uuid::new())
            }

            pub fn parse(id: impl Into<String>) -> Result<Self, $crate::InvalidUuidError> {
                $crate::Uuid::parse(id).map(Self)
            }

            pub fn as_uuid(&self) -> &$crate::Uuid {
                &self.0
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl $crate::ValueObject for $name {}

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$crate::Uuid> for $name {
            fn from(value: $crate::Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $crate::Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl core::str::FromStr for $name {
            type Err = $crate::InvalidUuidError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }
    };
}
