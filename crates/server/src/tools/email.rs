//! send_email and email_doctors tool implementations.

use medi_client::{DoctorDirectory, DoctorSearchAgent, EmailMessage, EmailSender};
use medi_core::Error;
use rmcp::{ErrorData as McpError, model::*};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Input parameters for send_email tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct SendEmailParams {
    pub subject: String,
    /// Plain-text body (e.g., summarize output).
    pub body: String,
    /// Receiver address.
    pub receiver: String,
}

/// Input parameters for email_doctors tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct EmailDoctorsParams {
    /// Specialty to look for (e.g., "pediatrician").
    pub specialty: String,
    /// City to search in.
    pub location: String,
    /// Receiver address.
    pub receiver: String,
}

/// Output structure for both email tools.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct EmailOutput {
    pub receiver: String,
    pub subject: String,
    /// Whether the doctor list came from the cache (email_doctors only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_hit: Option<bool>,
}

/// Implementation of the send_email tool.
pub async fn send_impl<E: EmailSender + ?Sized>(
    sender: &E, params: SendEmailParams,
) -> Result<CallToolResult, McpError> {
    let message = EmailMessage { subject: params.subject, body: params.body, receiver: params.receiver };
    sender.send(&message).await?;

    respond(EmailOutput { receiver: message.receiver, subject: message.subject, cache_hit: None })
}

/// Implementation of the email_doctors tool: search one specialty and mail the listing.
pub async fn email_doctors_impl<D: DoctorDirectory, E: EmailSender + ?Sized>(
    agent: &DoctorSearchAgent<D>, sender: &E, params: EmailDoctorsParams,
) -> Result<CallToolResult, McpError> {
    if params.receiver.trim().is_empty() {
        return Err(Error::InvalidInput("receiver cannot be empty".into()).into());
    }

    let result = agent.search(&params.specialty, &params.location).await?;
    let message = EmailMessage {
        subject: format!("Doctors for {} in {}", result.role, result.city),
        body: result.to_text(),
        receiver: params.receiver,
    };
    sender.send(&message).await?;

    respond(EmailOutput { receiver: message.receiver, subject: message.subject, cache_hit: Some(result.cache_hit) })
}

fn respond(output: EmailOutput) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(&output).map_err(|e| Error::Serialize(e.to_string()))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use medi_client::{DoctorRecord, SearchError, manual_search_url};
    use medi_core::{CachePolicy, Memoizer, ResultCache};
    use std::sync::Mutex;
    use tempfile::TempDir;
    use url::Url;

    #[derive(Default)]
    struct Outbox(Mutex<Vec<EmailMessage>>);

    #[async_trait::async_trait]
    impl EmailSender for Outbox {
        async fn send(&self, message: &EmailMessage) -> Result<(), Error> {
            if message.receiver == "bounce@example.com" {
                return Err(Error::EmailFailed("mailbox unavailable".into()));
            }
            self.0.lock().unwrap().push(message.clone());
            Ok(())
        }
    }

    struct OneCardiologist;

    #[async_trait::async_trait]
    impl DoctorDirectory for OneCardiologist {
        async fn find_doctors(&self, _role: &str, city: &str, _limit: usize) -> Result<Vec<DoctorRecord>, SearchError> {
            Ok(vec![DoctorRecord {
                name: "Dr. A".into(),
                specialty: "Cardiologist".into(),
                location: city.into(),
                link: "https://directory.test/a".into(),
            }])
        }

        fn search_url(&self, role: &str, city: &str) -> Url {
            manual_search_url(&Url::parse("https://directory.test/search").unwrap(), role, city)
        }
    }

    fn agent() -> (TempDir, DoctorSearchAgent<OneCardiologist>) {
        let dir = TempDir::new().unwrap();
        let memo = Memoizer::new(ResultCache::new(dir.path()), CachePolicy::default());
        (dir, DoctorSearchAgent::new(memo, OneCardiologist, 5))
    }

    #[tokio::test]
    async fn test_send_email() {
        let outbox = Outbox::default();
        let params =
            SendEmailParams { subject: "Summary".into(), body: "text".into(), receiver: "p@example.com".into() };

        send_impl(&outbox, params).await.unwrap();

        let sent = outbox.0.lock().unwrap();
        assert_eq!(
            sent.as_slice(),
            [EmailMessage { subject: "Summary".into(), body: "text".into(), receiver: "p@example.com".into() }]
        );
    }

    #[tokio::test]
    async fn test_send_email_failure_code() {
        let params = SendEmailParams { receiver: "bounce@example.com".into(), ..Default::default() };
        let err = send_impl(&Outbox::default(), params).await.unwrap_err();
        assert_eq!(err.code.0, -32014);
    }

    #[tokio::test]
    async fn test_email_doctors_uses_listing_text() {
        let (_dir, agent) = agent();
        let outbox = Outbox::default();
        let params = || EmailDoctorsParams {
            specialty: "Cardiologist".into(),
            location: "Mumbai".into(),
            receiver: "p@example.com".into(),
        };

        email_doctors_impl(&agent, &outbox, params()).await.unwrap();
        email_doctors_impl(&agent, &outbox, params()).await.unwrap();

        let sent = outbox.0.lock().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].subject, "Doctors for cardiologist in mumbai");
        assert_eq!(sent[0].body, "1. **Dr. A** — Cardiologist\n📍 mumbai\n🔗 https://directory.test/a");
        assert!(sent[1].body.starts_with("✅ Loaded cached results for cardiologist in mumbai\n\n1. **Dr. A**"));
    }

    #[tokio::test]
    async fn test_email_doctors_requires_receiver() {
        let (_dir, agent) = agent();
        let outbox = Outbox::default();
        let params =
            EmailDoctorsParams { specialty: "cardiologist".into(), location: "mumbai".into(), ..Default::default() };

        assert!(email_doctors_impl(&agent, &outbox, params).await.is_err());
        assert!(outbox.0.lock().unwrap().is_empty());
    }
}
