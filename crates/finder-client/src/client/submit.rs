use chrono::{SecondsFormat, Utc};
use finder_core::{Candidacy, SubmissionMode};
use reqwest::header::{HeaderValue, ACCEPT};
use serde::Serialize;
use serde_json::Value;

use super::FinderClient;
use crate::error::ClientError;

/// Message reported when the webhook accepts a candidacy without a JSON body.
pub const SUBMISSION_OK_MESSAGE: &str = "Candidature envoyée avec succès";

/// Outcome of an accepted candidacy.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionReceipt {
    pub status: u16,
    /// The webhook's `message` field when present, else [`SUBMISSION_OK_MESSAGE`].
    pub message: String,
    /// Parsed response body, `None` when it was not JSON.
    pub body: Option<Value>,
}

/// Raw answer to a connectivity probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResponse {
    pub status: u16,
    pub body: String,
}

impl ProbeResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[derive(Serialize)]
struct ProbePayload<'a> {
    test: bool,
    message: &'a str,
    timestamp: String,
}

impl FinderClient {
    /// Posts a validated candidacy to the endpoint of its mode.
    ///
    /// Never retried.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure.
    /// - [`ClientError::SubmissionRejected`] for a non-2xx answer, carrying the
    ///   response text.
    pub async fn submit_candidacy(
        &self,
        candidacy: &Candidacy,
    ) -> Result<SubmissionReceipt, ClientError> {
        let url = self.endpoints.candidacy_for(candidacy.mode).clone();
        tracing::info!(mode = %candidacy.mode, %url, "submitting candidacy");

        let response = self
            .client
            .post(url)
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .json(&candidacy.payload)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                status = status.as_u16(),
                body = %text,
                "candidacy rejected by webhook"
            );
            return Err(ClientError::SubmissionRejected {
                status: status.as_u16(),
                body: text,
            });
        }

        let body = serde_json::from_str::<Value>(&text).ok();
        if body.is_none() {
            tracing::debug!("candidacy response is not JSON, treating as success");
        }
        let message = body
            .as_ref()
            .and_then(|v| v.get("message"))
            .and_then(Value::as_str)
            .unwrap_or(SUBMISSION_OK_MESSAGE)
            .to_owned();

        tracing::info!(status = status.as_u16(), "candidacy accepted");
        Ok(SubmissionReceipt {
            status: status.as_u16(),
            message,
            body,
        })
    }

    /// Posts a `{test: true, ...}` marker to the candidacy endpoint of `mode`
    /// and returns whatever the webhook answered, error statuses included.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] only when no answer was received.
    pub async fn probe_candidacy_webhook(
        &self,
        mode: SubmissionMode,
        message: &str,
    ) -> Result<ProbeResponse, ClientError> {
        let url = self.endpoints.candidacy_for(mode).clone();
        let payload = ProbePayload {
            test: true,
            message,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };

        let response = self.client.post(url.clone()).json(&payload).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::info!(%url, status, "candidacy webhook probe answered");

        Ok(ProbeResponse { status, body })
    }
}
