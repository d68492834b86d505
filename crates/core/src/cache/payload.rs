//! Payload encodings for cache entries.
//!
//! A payload decides its own file extension and byte format. Decoding never
//! fails loudly: anything unparsable is reported as `None` so that the store
//! can treat it as a miss.

use crate::Error;

/// A value that can be persisted as a cache entry.
pub trait Payload: Sized {
    /// File extension used for entries of this payload type.
    const EXTENSION: &'static str;

    /// Serialize the payload to bytes.
    fn encode(&self) -> Result<Vec<u8>, Error>;

    /// Parse stored bytes, returning `None` when they are not a valid payload.
    fn decode(bytes: &[u8]) -> Option<Self>;
}

/// Raw text blob, stored verbatim as UTF-8.
impl Payload for String {
    const EXTENSION: &'static str = "txt";

    fn encode(&self) -> Result<Vec<u8>, Error> {
        Ok(self.as_bytes().to_vec())
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        String::from_utf8(bytes.to_vec()).ok()
    }
}

/// Ordered sequence of lines, stored as a pretty-printed JSON array.
impl Payload for Vec<String> {
    const EXTENSION: &'static str = "json";

    fn encode(&self) -> Result<Vec<u8>, Error> {
        serde_json::to_vec_pretty(self).map_err(|e| Error::Serialize(e.to_string()))
    }

    fn decode(bytes: &[u8]) -> Option<Self> {
        serde_json::from_slice(bytes).ok()
    }
}
