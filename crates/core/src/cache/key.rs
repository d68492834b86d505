//! Normalized cache keys.

use std::fmt;

use super::hash::{compute_digest, normalize_field};

/// An ordered tuple of normalized key fields.
///
/// Every field is trimmed and lower-cased on construction, so two keys
/// compare equal exactly when their normalized fields do.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    fields: Vec<String>,
}

impl CacheKey {
    /// Build a key from raw fields, normalizing each one.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self { fields: fields.into_iter().map(|f| normalize_field(f.as_ref())).collect() }
    }

    /// Single-field key, e.g. a raw web query.
    pub fn single(field: &str) -> Self {
        Self::new([field])
    }

    /// The normalized fields in order.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Content hash addressing this key on disk.
    pub fn digest(&self) -> String {
        compute_digest(&self.fields)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.fields.join(", "))
    }
}
