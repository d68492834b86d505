//! Content-addressed digest generation.

use sha2::{Digest, Sha256};

/// Normalize a single key field: trim surrounding whitespace and lower-case.
pub fn normalize_field(field: &str) -> String {
    field.trim().to_lowercase()
}

/// Compute the digest for an ordered sequence of key fields.
///
/// Each normalized field is fed to SHA-256 as its byte length (u64, little
/// endian) followed by its bytes, so no two distinct field tuples share an
/// encoding. The result is always 64 lowercase hex characters.
pub fn compute_digest<I, S>(fields: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut hasher = Sha256::new();
    for field in fields {
        let field = normalize_field(field.as_ref());
        hasher.update((field.len() as u64).to_le_bytes());
        hasher.update(field.as_bytes());
    }
    hex::encode(hasher.finalize())
}
