//! Doctor directory collaborator.
//!
//! A directory turns a (specialty, city) pair into a handful of doctor
//! records. The records are formatted into cacheable lines by the doctor
//! search agent; the directory itself knows nothing about caching.

pub mod practo;

pub use practo::{PractoDirectory, parse_doctor_cards};

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::SearchError;

/// One doctor listing extracted from a directory page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorRecord {
    pub name: String,
    pub specialty: String,
    pub location: String,
    pub link: String,
}

impl DoctorRecord {
    /// Render as a cache line; `rank` is 1-based.
    pub fn to_line(&self, rank: usize) -> String {
        format!("{rank}. **{}** — {}\n📍 {}\n🔗 {}", self.name, self.specialty, self.location, self.link)
    }
}

/// Source of doctor listings.
#[async_trait::async_trait]
pub trait DoctorDirectory: Send + Sync {
    /// Fetch up to `limit` listings for `role` in `city`.
    async fn find_doctors(&self, role: &str, city: &str, limit: usize) -> Result<Vec<DoctorRecord>, SearchError>;

    /// Page a person can open to repeat the search by hand.
    fn search_url(&self, role: &str, city: &str) -> Url;
}

#[async_trait::async_trait]
impl<D: DoctorDirectory + ?Sized> DoctorDirectory for Arc<D> {
    async fn find_doctors(&self, role: &str, city: &str, limit: usize) -> Result<Vec<DoctorRecord>, SearchError> {
        (**self).find_doctors(role, city, limit).await
    }

    fn search_url(&self, role: &str, city: &str) -> Url {
        (**self).search_url(role, city)
    }
}

/// Build `<base>?results_for=doctor&query=<role>&city=<city>`.
pub fn manual_search_url(base: &Url, role: &str, city: &str) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .clear()
        .append_pair("results_for", "doctor")
        .append_pair("query", role)
        .append_pair("city", city);
    url
}
