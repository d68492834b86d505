//! File-backed, content-addressed result cache.
//!
//! Each logical cache domain (web search results, doctor directory results)
//! owns one directory. Entries are stored as `<digest>.<ext>` where the
//! digest is a SHA-256 hash of the normalized key fields. It supports:
//!
//! - Deterministic addressing from normalized keys
//! - Atomic writes (temp file + rename) safe under concurrent writers
//! - Corrupt or unreadable entries treated as misses
//! - Optional single-flight collapsing of concurrent misses

pub mod flight;
pub mod hash;
pub mod key;
pub mod memo;
pub mod payload;
pub mod policy;
pub mod store;

pub use crate::Error;

pub use flight::FlightGroup;
pub use hash::compute_digest;
pub use key::CacheKey;
pub use memo::{Memoized, Memoizer};
pub use payload::Payload;
pub use policy::{CachePolicy, Outcome};
pub use store::ResultCache;
