#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    /// GET endpoint returning `[{"result": [...]}]`.
    pub centers_url: String,
    /// POST endpoint for contact-mode candidacies.
    pub candidacy_url: String,
    /// POST endpoint for preferred-days candidacies.
    pub candidacy_days_url: String,
    /// Address search is unavailable without a key.
    pub geocoder_api_key: Option<String>,
    pub geocoder_base_url: String,
    pub geocoder_region: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub fetch_max_retries: u32,
    pub retry_backoff_base_secs: u64,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field("centers_url", &self.centers_url)
            .field("candidacy_url", &self.candidacy_url)
            .field("candidacy_days_url", &self.candidacy_days_url)
            .field(
                "geocoder_api_key",
                &self.geocoder_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("geocoder_base_url", &self.geocoder_base_url)
            .field("geocoder_region", &self.geocoder_region)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("fetch_max_retries", &self.fetch_max_retries)
            .field("retry_backoff_base_secs", &self.retry_backoff_base_secs)
            .finish()
    }
}
