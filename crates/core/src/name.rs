//! Item names: the collection's keys.

use serde::{Deserialize, Serialize};

use crate::value_object::ValueObject;

/// The name of an inventory item, used as the document key.
///
/// The string is preserved byte-for-byte: `"Apple"`, `"apple"` and
/// `" apple"` are three distinct keys, and the empty string is a legal
/// (degenerate) key. Display-time capitalization is a view concern and
/// never touches the stored name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemName(String);

impl ItemName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl ValueObject for ItemName {}

impl core::fmt::Display for ItemName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<&str> for ItemName {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ItemName {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for ItemName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
