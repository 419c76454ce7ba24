//! Shared resource metadata: type discriminants, identity, validated names.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Pattern every key name must match: DNS-label style, lowercase
/// alphanumeric with interior hyphens.
pub const KEY_NAME_PATTERN: &str = "^[a-z0-9]([-a-z0-9]*[a-z0-9])?$";

#[allow(clippy::expect_used)]
static KEY_NAME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(KEY_NAME_PATTERN).expect("key name pattern is a valid regex"));

/// The `kind`/`apiVersion` discriminant pair carried by every resource.
///
/// Probing a document for its `TypeMeta` is how mixed-kind config streams
/// are classified before any kind-specific parsing happens, so both fields
/// default to empty rather than failing on absence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeMeta {
    /// Resource kind, e.g. `ApiKey`.
    #[serde(default)]
    pub kind: String,
    /// API group and version, e.g. `kanali.io/v1`.
    #[serde(rename = "apiVersion", default)]
    pub api_version: String,
}

impl TypeMeta {
    /// Creates a `TypeMeta` for the given kind under the Kanali API group.
    #[must_use]
    pub fn kanali(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            api_version: crate::API_VERSION.to_string(),
        }
    }
}

/// Name/namespace identity of a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMeta {
    /// Resource name.
    #[serde(default)]
    pub name: String,
    /// Resource namespace.
    #[serde(default)]
    pub namespace: String,
}

impl ObjectMeta {
    /// Creates identity metadata from a name and namespace.
    #[must_use]
    pub fn new(name: impl Into<String>, namespace: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
        }
    }
}

/// A validated API key name.
///
/// Key names must match [`KEY_NAME_PATTERN`]: they begin and end with a
/// lowercase alphanumeric character and may contain hyphens in between.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct KeyName(String);

impl KeyName {
    /// Creates a new `KeyName` after validating the input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKeyName`] if the name does not match the
    /// required pattern.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if !KEY_NAME_REGEX.is_match(&name) {
            return Err(Error::InvalidKeyName {
                pattern: KEY_NAME_PATTERN,
            });
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for KeyName {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<KeyName> for String {
    fn from(name: KeyName) -> Self {
        name.0
    }
}

impl AsRef<str> for KeyName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
