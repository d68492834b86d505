//! Doctor search agent.
//!
//! Results are cached per (role, city) as the formatted lines shown to the
//! user. A search that finds nobody stores a single sentinel line linking to
//! the manual search page, so the slow browser round trip is not repeated
//! for specialties a city simply does not list.

use std::collections::HashSet;

use medi_core::{CacheKey, Error, Memoizer, Outcome};
use serde::{Deserialize, Serialize};

use crate::directory::DoctorDirectory;

/// Lines for one (role, city) search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoctorSearchResult {
    pub role: String,
    pub city: String,
    pub lines: Vec<String>,
    pub cache_hit: bool,
}

impl DoctorSearchResult {
    /// Headline (`"n. **Name** — Specialty"`) of every real doctor entry.
    ///
    /// Sentinel and failure lines are dropped.
    pub fn headlines(&self) -> Vec<String> {
        self.lines
            .iter()
            .filter(|line| line.contains("**") && line.contains('📍'))
            .filter_map(|line| line.lines().next())
            .map(str::to_string)
            .collect()
    }

    /// Plain-text rendering for chat or email bodies.
    pub fn to_text(&self) -> String {
        let body = self.lines.join("\n");
        if self.cache_hit {
            format!("✅ Loaded cached results for {} in {}\n\n{body}", self.role, self.city)
        } else {
            body
        }
    }
}

/// Doctors found for one requested specialty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialtyDoctors {
    pub specialty: String,
    pub doctors: Vec<String>,
}

/// Doctor directory search memoized by (role, city).
pub struct DoctorSearchAgent<D> {
    memo: Memoizer,
    directory: D,
    limit: usize,
}

impl<D: DoctorDirectory> DoctorSearchAgent<D> {
    pub fn new(memo: Memoizer, directory: D, limit: usize) -> Self {
        Self { memo, directory, limit }
    }

    pub fn memoizer(&self) -> &Memoizer {
        &self.memo
    }

    /// Look up doctors for `specialty` in `city`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if either argument is blank.
    pub async fn search(&self, specialty: &str, city: &str) -> Result<DoctorSearchResult, Error> {
        let key = CacheKey::new([specialty, city]);
        let (role, city) = match key.fields() {
            [role, city] if !role.is_empty() && !city.is_empty() => (role.as_str(), city.as_str()),
            _ => return Err(Error::InvalidInput("specialty and city cannot be empty".into())),
        };

        let directory = &self.directory;
        let limit = self.limit;
        let result = self
            .memo
            .get_or_compute(&key, move || find_lines(directory, role, city, limit))
            .await;

        if result.cache_hit {
            tracing::info!(role, city, "loaded cached doctor results");
        }

        Ok(DoctorSearchResult {
            role: role.to_string(),
            city: city.to_string(),
            lines: result.value,
            cache_hit: result.cache_hit,
        })
    }

    /// Search every specialty in `location` and keep only doctor headlines.
    ///
    /// Specialties are reported in the order given, duplicates (after
    /// normalization) once. A specialty with no doctors gets a single
    /// "not found" line with a manual search link.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidInput` if the location or any specialty is blank.
    pub async fn search_many(&self, specialties: &[String], location: &str) -> Result<Vec<SpecialtyDoctors>, Error> {
        let mut seen = HashSet::new();
        let mut out = Vec::with_capacity(specialties.len());

        for specialty in specialties {
            if !seen.insert(specialty.trim().to_lowercase()) {
                continue;
            }

            let result = self.search(specialty, location).await?;
            let headlines = result.headlines();
            let doctors = if headlines.is_empty() {
                tracing::info!("{} → not found", title_case(specialty.trim()));
                vec![not_found_line(
                    &title_case(specialty.trim()),
                    self.directory.search_url(&result.role, &result.city).as_str(),
                )]
            } else {
                tracing::info!("{} → found {} doctors", title_case(specialty.trim()), headlines.len());
                headlines
            };

            out.push(SpecialtyDoctors { specialty: specialty.clone(), doctors });
        }

        Ok(out)
    }
}

async fn find_lines<D: DoctorDirectory>(
    directory: &D, role: &str, city: &str, limit: usize,
) -> (Vec<String>, Outcome) {
    let manual = directory.search_url(role, city);

    match directory.find_doctors(role, city, limit).await {
        Ok(records) if records.is_empty() => (vec![not_found_line(role, manual.as_str())], Outcome::NotFound),
        Ok(records) => {
            let lines = records.iter().enumerate().map(|(i, r)| r.to_line(i + 1)).collect();
            (lines, Outcome::Found)
        }
        Err(e) => {
            tracing::warn!(role, city, "doctor search failed: {e}");
            (vec![not_found_line(role, manual.as_str())], Outcome::Failed)
        }
    }
}

fn not_found_line(role: &str, search_url: &str) -> String {
    format!("❌ No verified {role} found. [Search manually]({search_url})")
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::{DoctorRecord, manual_search_url};
    use crate::error::SearchError;
    use medi_core::{CachePolicy, ResultCache, compute_digest};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;
    use url::Url;

    enum Reply {
        Records(Vec<DoctorRecord>),
        Fail,
    }

    struct FakeDirectory {
        reply: Reply,
        calls: AtomicUsize,
        seen: Mutex<Vec<(String, String, usize)>>,
    }

    impl FakeDirectory {
        fn new(reply: Reply) -> Self {
            Self { reply, calls: AtomicUsize::new(0), seen: Mutex::new(Vec::new()) }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait::async_trait]
    impl DoctorDirectory for FakeDirectory {
        async fn find_doctors(&self, role: &str, city: &str, limit: usize) -> Result<Vec<DoctorRecord>, SearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push((role.to_string(), city.to_string(), limit));
            match &self.reply {
                Reply::Records(records) => Ok(records.iter().take(limit).cloned().collect()),
                Reply::Fail => Err(SearchError::Timeout),
            }
        }

        fn search_url(&self, role: &str, city: &str) -> Url {
            manual_search_url(&Url::parse("https://www.practo.com/search").unwrap(), role, city)
        }
    }

    fn dr_a() -> DoctorRecord {
        DoctorRecord {
            name: "Dr. A".into(),
            specialty: "Cardiologist".into(),
            location: "Mumbai".into(),
            link: "http://example/a".into(),
        }
    }

    fn agent(reply: Reply, policy: CachePolicy) -> (TempDir, DoctorSearchAgent<FakeDirectory>) {
        let dir = TempDir::new().unwrap();
        let memo = Memoizer::new(ResultCache::new(dir.path().join("cache_doctor")), policy);
        (dir, DoctorSearchAgent::new(memo, FakeDirectory::new(reply), 5))
    }

    #[tokio::test]
    async fn test_found_records_written_as_json_lines() {
        let (_dir, agent) = agent(Reply::Records(vec![dr_a()]), CachePolicy::default());
        let digest = compute_digest(["cardiologist", "mumbai"]);
        let path = agent.memoizer().cache().root().join(format!("{digest}.json"));
        assert!(!path.exists());

        let first = agent.search("Cardiologist", "Mumbai").await.unwrap();
        let expected = vec!["1. **Dr. A** — Cardiologist\n📍 Mumbai\n🔗 http://example/a".to_string()];
        assert!(!first.cache_hit);
        assert_eq!(first.lines, expected);

        let on_disk: Vec<String> = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(on_disk, expected);

        let second = agent.search("cardiologist", "mumbai").await.unwrap();
        assert!(second.cache_hit);
        assert_eq!(second.lines, expected);
        assert_eq!(agent.directory.calls(), 1);
    }

    #[tokio::test]
    async fn test_normalized_arguments_reach_directory() {
        let (_dir, agent) = agent(Reply::Records(vec![dr_a()]), CachePolicy::default());
        agent.search("  Cardiologist ", " MUMBAI").await.unwrap();

        let seen = agent.directory.seen.lock().unwrap();
        assert_eq!(seen.as_slice(), [("cardiologist".to_string(), "mumbai".to_string(), 5)]);
    }

    #[tokio::test]
    async fn test_zero_records_caches_sentinel() {
        let (_dir, agent) = agent(Reply::Records(vec![]), CachePolicy::default());

        let first = agent.search("Unicorn Healer", "Atlantis").await.unwrap();
        let sentinel = "❌ No verified unicorn healer found. \
            [Search manually](https://www.practo.com/search?results_for=doctor&query=unicorn+healer&city=atlantis)";
        assert_eq!(first.lines, vec![sentinel.to_string()]);

        let second = agent.search("unicorn healer", "atlantis").await.unwrap();
        assert!(second.cache_hit);
        assert_eq!(second.lines, vec![sentinel.to_string()]);
        assert_eq!(agent.directory.calls(), 1);
    }

    #[tokio::test]
    async fn test_zero_records_not_cached_without_negative_caching() {
        let policy = CachePolicy { cache_negative_results: false, cache_failed_searches: false };
        let (_dir, agent) = agent(Reply::Records(vec![]), policy);

        agent.search("unicorn healer", "atlantis").await.unwrap();
        agent.search("unicorn healer", "atlantis").await.unwrap();
        assert_eq!(agent.directory.calls(), 2);
    }

    #[tokio::test]
    async fn test_failure_yields_sentinel_without_caching() {
        let (_dir, agent) = agent(Reply::Fail, CachePolicy::default());

        let first = agent.search("neurologist", "pune").await.unwrap();
        assert_eq!(first.lines.len(), 1);
        assert!(first.lines[0].starts_with("❌ No verified neurologist found."));
        assert!(first.lines[0].contains("query=neurologist&city=pune"));

        agent.search("neurologist", "pune").await.unwrap();
        assert_eq!(agent.directory.calls(), 2);
    }

    #[tokio::test]
    async fn test_failure_cached_when_configured() {
        let policy = CachePolicy { cache_negative_results: true, cache_failed_searches: true };
        let (_dir, agent) = agent(Reply::Fail, policy);

        agent.search("neurologist", "pune").await.unwrap();
        assert!(agent.search("neurologist", "pune").await.unwrap().cache_hit);
        assert_eq!(agent.directory.calls(), 1);
    }

    #[tokio::test]
    async fn test_limit_passed_through() {
        let records: Vec<_> = (0..8).map(|i| DoctorRecord { name: format!("Dr. {i}"), ..dr_a() }).collect();
        let (_dir, agent) = agent(Reply::Records(records), CachePolicy::default());

        let result = agent.search("cardiologist", "mumbai").await.unwrap();
        assert_eq!(result.lines.len(), 5);
        assert!(result.lines[4].starts_with("5. **Dr. 4**"));
    }

    #[tokio::test]
    async fn test_blank_arguments_rejected() {
        let (_dir, agent) = agent(Reply::Records(vec![]), CachePolicy::default());
        assert!(matches!(agent.search(" ", "mumbai").await, Err(Error::InvalidInput(_))));
        assert!(matches!(agent.search("cardiologist", "").await, Err(Error::InvalidInput(_))));
        assert_eq!(agent.directory.calls(), 0);
    }

    #[tokio::test]
    async fn test_search_many_headlines_and_fallbacks() {
        let (_dir, agent) = agent(Reply::Records(vec![dr_a()]), CachePolicy::default());
        let seeded = CacheKey::new(["speech-language pathologist", "mumbai"]);
        agent
            .memoizer()
            .cache()
            .store(&seeded, &vec!["❌ No verified speech-language pathologist found. [Search manually](x)".to_string()])
            .unwrap();

        let specialties = vec![
            "Cardiologist".to_string(),
            "speech-language pathologist".to_string(),
            "cardiologist ".to_string(),
        ];
        let results = agent.search_many(&specialties, " Mumbai ").await.unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].specialty, "Cardiologist");
        assert_eq!(results[0].doctors, vec!["1. **Dr. A** — Cardiologist".to_string()]);
        assert_eq!(results[1].specialty, "speech-language pathologist");
        assert_eq!(
            results[1].doctors,
            vec![
                "❌ No verified Speech-Language Pathologist found. \
                 [Search manually](https://www.practo.com/search?results_for=doctor&query=speech-language+pathologist&city=mumbai)"
                    .to_string()
            ]
        );
        assert_eq!(agent.directory.calls(), 1);
    }

    #[test]
    fn test_headlines_skip_sentinels() {
        let result = DoctorSearchResult {
            role: "cardiologist".into(),
            city: "mumbai".into(),
            lines: vec![dr_a().to_line(1), "❌ No verified cardiologist found. [Search manually](u)".into()],
            cache_hit: false,
        };
        assert_eq!(result.headlines(), vec!["1. **Dr. A** — Cardiologist".to_string()]);
    }

    #[test]
    fn test_to_text_marks_cache_hits() {
        let mut result = DoctorSearchResult {
            role: "cardiologist".into(),
            city: "mumbai".into(),
            lines: vec!["a".into(), "b".into()],
            cache_hit: false,
        };
        assert_eq!(result.to_text(), "a\nb");

        result.cache_hit = true;
        assert_eq!(result.to_text(), "✅ Loaded cached results for cardiologist in mumbai\n\na\nb");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("speech-language pathologist"), "Speech-Language Pathologist");
        assert_eq!(title_case("NEUROLOGIST"), "Neurologist");
        assert_eq!(title_case("ent specialist"), "Ent Specialist");
    }
}
