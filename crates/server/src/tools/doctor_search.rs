//! doctor_search tool implementation.
//!
//! Looks up doctors for one or more specialties in a city.

use medi_client::{DoctorDirectory, DoctorSearchAgent};
use medi_core::Error;
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for doctor_search tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct DoctorSearchParams {
    /// Specialties to look for (e.g., "pediatrician", "neurologist").
    pub specialties: Vec<String>,

    /// City to search in.
    pub location: String,
}

/// Doctors found for one specialty.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SpecialtyResult {
    /// Specialty as requested.
    pub specialty: String,
    /// "n. **Name** — Specialty" headlines, or a single manual-search line.
    pub doctors: Vec<String>,
}

/// Output structure for doctor_search tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DoctorSearchOutput {
    pub results: Vec<SpecialtyResult>,
}

/// Implementation of the doctor_search tool.
pub async fn search_impl<D: DoctorDirectory>(
    agent: &DoctorSearchAgent<D>, params: DoctorSearchParams,
) -> Result<CallToolResult, McpError> {
    if params.specialties.is_empty() {
        return Err(Error::InvalidInput("specialties cannot be empty".into()).into());
    }

    let results = agent.search_many(&params.specialties, &params.location).await?;

    let output = DoctorSearchOutput {
        results: results
            .into_iter()
            .map(|r| SpecialtyResult { specialty: r.specialty, doctors: r.doctors })
            .collect(),
    };
    let json = serde_json::to_string_pretty(&output).map_err(|e| Error::Serialize(e.to_string()))?;

    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use medi_client::{DoctorRecord, SearchError, manual_search_url};
    use medi_core::{CachePolicy, Memoizer, ResultCache};
    use tempfile::TempDir;
    use url::Url;

    struct OneDoctor;

    #[async_trait::async_trait]
    impl DoctorDirectory for OneDoctor {
        async fn find_doctors(&self, role: &str, city: &str, _limit: usize) -> Result<Vec<DoctorRecord>, SearchError> {
            if role == "pediatrician" {
                Ok(vec![DoctorRecord {
                    name: "Dr. P".into(),
                    specialty: "Pediatrician".into(),
                    location: city.into(),
                    link: "https://directory.test/p".into(),
                }])
            } else {
                Ok(vec![])
            }
        }

        fn search_url(&self, role: &str, city: &str) -> Url {
            manual_search_url(&Url::parse("https://directory.test/search").unwrap(), role, city)
        }
    }

    fn agent() -> (TempDir, DoctorSearchAgent<OneDoctor>) {
        let dir = TempDir::new().unwrap();
        let memo = Memoizer::new(ResultCache::new(dir.path()), CachePolicy::default());
        (dir, DoctorSearchAgent::new(memo, OneDoctor, 5))
    }

    #[tokio::test]
    async fn test_empty_specialties() {
        let (_dir, agent) = agent();
        let params = DoctorSearchParams { specialties: vec![], location: "pune".into() };
        assert!(search_impl(&agent, params).await.is_err());
    }

    #[tokio::test]
    async fn test_blank_location() {
        let (_dir, agent) = agent();
        let params = DoctorSearchParams { specialties: vec!["pediatrician".into()], location: " ".into() };
        assert!(search_impl(&agent, params).await.is_err());
    }

    #[tokio::test]
    async fn test_found_and_missing_specialties() {
        let (_dir, agent) = agent();
        let params =
            DoctorSearchParams { specialties: vec!["Pediatrician".into(), "Neurologist".into()], location: "Pune".into() };

        let result = search_impl(&agent, params).await.unwrap();
        let content = serde_json::to_value(&result.content[0]).unwrap();
        let text = content.get("text").and_then(|v| v.as_str()).expect("Expected text field in content");
        let output: DoctorSearchOutput = serde_json::from_str(text).unwrap();

        assert_eq!(output.results.len(), 2);
        assert_eq!(output.results[0].doctors, vec!["1. **Dr. P** — Pediatrician".to_string()]);
        assert_eq!(
            output.results[1].doctors,
            vec![
                "❌ No verified Neurologist found. \
                 [Search manually](https://directory.test/search?results_for=doctor&query=neurologist&city=pune)"
                    .to_string()
            ]
        );
    }
}
