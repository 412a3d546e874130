//! Account identifiers.

/// Key of an account in the state store.
///
/// Keys are opaque: any string is accepted, including the empty string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountKey(String);

impl AccountKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for AccountKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AccountKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AccountKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for AccountKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}
