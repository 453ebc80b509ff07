//! HTTP client for the centers and candidacy webhooks.

mod submit;

use std::time::Duration;

use finder_core::{AppConfig, CenterRecord, SubmissionMode};
use reqwest::{Client, Url};
use serde_json::Value;

use crate::error::ClientError;
use crate::normalize::normalize_payload;
use crate::retry::retry_with_backoff;
use crate::sample::sample_centers;

pub use submit::{ProbeResponse, SubmissionReceipt, SUBMISSION_OK_MESSAGE};

const CONNECT_TIMEOUT_SECS: u64 = 10;

/// Webhook URLs the client talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub centers: Url,
    pub candidacy: Url,
    pub candidacy_days: Url,
}

impl Endpoints {
    /// Parses the three webhook URLs.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] for the first URL that does not parse.
    pub fn parse(centers: &str, candidacy: &str, candidacy_days: &str) -> Result<Self, ClientError> {
        Ok(Self {
            centers: parse_url(centers)?,
            candidacy: parse_url(candidacy)?,
            candidacy_days: parse_url(candidacy_days)?,
        })
    }

    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if a configured URL does not parse.
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::parse(
            &config.centers_url,
            &config.candidacy_url,
            &config.candidacy_days_url,
        )
    }

    /// Endpoint that receives candidacies of the given mode.
    #[must_use]
    pub fn candidacy_for(&self, mode: SubmissionMode) -> &Url {
        match mode {
            SubmissionMode::Contact => &self.candidacy,
            SubmissionMode::PreferredDays => &self.candidacy_days,
        }
    }
}

pub(crate) fn parse_url(raw: &str) -> Result<Url, ClientError> {
    Url::parse(raw).map_err(|e| ClientError::InvalidUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })
}

/// Where the centers of a [`LoadedCenters`] came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CenterSource {
    Remote,
    /// The remote list could not be used; `reason` is the error text.
    Sample { reason: String },
}

#[derive(Debug, Clone)]
pub struct LoadedCenters {
    pub centers: Vec<CenterRecord>,
    pub source: CenterSource,
}

impl LoadedCenters {
    #[must_use]
    pub fn is_sample(&self) -> bool {
        matches!(self.source, CenterSource::Sample { .. })
    }
}

/// Client for the centers list and the candidacy webhooks.
///
/// The centers fetch is retried with exponential backoff on network failures
/// and 5xx answers. Candidacy posts are never retried, so a visitor is not
/// registered twice.
pub struct FinderClient {
    client: Client,
    endpoints: Endpoints,
    /// Maximum number of retry attempts after the first failure.
    max_retries: u32,
    /// Base delay in seconds for exponential backoff: `backoff_base_secs * 2^attempt`.
    backoff_base_secs: u64,
}

impl FinderClient {
    /// Creates a client with the given timeout, `User-Agent`, and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        endpoints: Endpoints,
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        backoff_base_secs: u64,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS.min(timeout_secs)))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            endpoints,
            max_retries,
            backoff_base_secs,
        })
    }

    /// Builds a client from the loaded application config.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] for a bad webhook URL or
    /// [`ClientError::Http`] if the HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ClientError> {
        Self::new(
            Endpoints::from_config(config)?,
            config.request_timeout_secs,
            &config.user_agent,
            config.fetch_max_retries,
            config.retry_backoff_base_secs,
        )
    }

    #[must_use]
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Fetches the raw centers payload.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Http`] on network failure after all retries.
    /// - [`ClientError::UnexpectedStatus`] for a non-2xx answer (5xx after all retries).
    /// - [`ClientError::Deserialize`] if the body is not JSON.
    pub async fn fetch_centers(&self) -> Result<Value, ClientError> {
        let url = self.endpoints.centers.clone();

        retry_with_backoff(self.max_retries, self.backoff_base_secs, || {
            let url = url.clone();
            async move {
                tracing::debug!(%url, "fetching centers");
                let response = self.client.get(url.clone()).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(ClientError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }

                let body = response.text().await?;
                serde_json::from_str::<Value>(&body).map_err(|e| ClientError::Deserialize {
                    context: format!("centers payload from {url}"),
                    source: e,
                })
            }
        })
        .await
    }

    /// Fetches and normalizes the centers list.
    ///
    /// # Errors
    ///
    /// Any error from [`Self::fetch_centers`], or
    /// [`ClientError::MalformedPayload`] if the JSON has the wrong shape.
    pub async fn load_centers(&self) -> Result<Vec<CenterRecord>, ClientError> {
        let payload = self.fetch_centers().await?;
        let centers = normalize_payload(&payload)?;
        let without_position = centers.iter().filter(|c| c.coordinates.is_none()).count();
        tracing::info!(
            count = centers.len(),
            without_position,
            "loaded centers from webhook"
        );
        Ok(centers)
    }

    /// Loads the centers list, substituting the built-in sample set when the
    /// remote list cannot be fetched or parsed.
    pub async fn load_centers_or_sample(&self) -> LoadedCenters {
        match self.load_centers().await {
            Ok(centers) => LoadedCenters {
                centers,
                source: CenterSource::Remote,
            },
            Err(err) => {
                tracing::warn!(error = %err, "center list unavailable, using sample data");
                LoadedCenters {
                    centers: sample_centers(),
                    source: CenterSource::Sample {
                        reason: err.to_string(),
                    },
                }
            }
        }
    }
}
