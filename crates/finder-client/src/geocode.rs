//! Forward geocoding of a free-text address into a [`UserLocation`].

use std::future::Future;
use std::time::Duration;

use finder_core::{AppConfig, UserLocation};
use reqwest::{Client, Url};

use crate::client::parse_url;
use crate::error::ClientError;
use crate::types::GeocodeResponse;

const GEOCODE_PATH: &str = "maps/api/geocode/json";
const STATUS_OK: &str = "OK";
const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";

/// Resolves a typed address to coordinates plus a display address.
pub trait Geocoder: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ClientError::Geocode`] when the service cannot place the
    /// address, or a transport error when it cannot be reached.
    fn geocode(
        &self,
        address: &str,
    ) -> impl Future<Output = Result<UserLocation, ClientError>> + Send;
}

/// [`Geocoder`] backed by the Google Geocoding web service.
///
/// Use [`GoogleGeocoder::new`] for production or
/// [`GoogleGeocoder::with_base_url`] to point at a mock server in tests.
pub struct GoogleGeocoder {
    client: Client,
    api_key: String,
    region: String,
    endpoint: Url,
}

impl GoogleGeocoder {
    /// # Errors
    ///
    /// Returns [`ClientError::MissingGeocoderKey`] if no API key is configured,
    /// [`ClientError::InvalidUrl`] for a bad base URL, or [`ClientError::Http`]
    /// if the HTTP client cannot be constructed.
    pub fn new(config: &AppConfig) -> Result<Self, ClientError> {
        let api_key = config
            .geocoder_api_key
            .as_deref()
            .ok_or(ClientError::MissingGeocoderKey)?;
        Self::with_base_url(
            api_key,
            &config.geocoder_region,
            config.request_timeout_secs,
            &config.geocoder_base_url,
        )
    }

    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` does not parse, or
    /// [`ClientError::Http`] if the HTTP client cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
        region: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        let endpoint = parse_url(&format!("{}/{GEOCODE_PATH}", base_url.trim_end_matches('/')))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            region: region.to_owned(),
            endpoint,
        })
    }

    fn request_url(&self, address: &str) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("address", address)
                .append_pair("key", &self.api_key);
            if !self.region.is_empty() {
                query.append_pair("region", &self.region);
            }
        }
        url
    }
}

impl Geocoder for GoogleGeocoder {
    async fn geocode(&self, address: &str) -> Result<UserLocation, ClientError> {
        tracing::debug!(address, "geocoding address");

        let response = self.client.get(self.request_url(address)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.endpoint.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed: GeocodeResponse =
            serde_json::from_str(&body).map_err(|e| ClientError::Deserialize {
                context: "geocode response".to_owned(),
                source: e,
            })?;

        if parsed.status != STATUS_OK {
            tracing::warn!(
                address,
                status = %parsed.status,
                error_message = parsed.error_message.as_deref().unwrap_or_default(),
                "geocoder could not place address"
            );
            return Err(ClientError::Geocode {
                status: parsed.status,
            });
        }

        let Some(first) = parsed.results.into_iter().next() else {
            return Err(ClientError::Geocode {
                status: STATUS_ZERO_RESULTS.to_owned(),
            });
        };

        let display = first
            .formatted_address
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| address.to_owned());
        let location = first.geometry.location;
        Ok(UserLocation::new(location.lat, location.lng).with_address(display))
    }
}
