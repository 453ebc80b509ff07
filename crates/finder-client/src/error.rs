use thiserror::Error;

use finder_core::ValidationErrors;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("malformed centers payload: {reason}")]
    MalformedPayload { reason: String },

    #[error("geocoding failed with status {status}")]
    Geocode { status: String },

    #[error("no geocoder API key configured")]
    MissingGeocoderKey,

    #[error("candidacy rejected with HTTP {status}: {body}")]
    SubmissionRejected { status: u16, body: String },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

impl ClientError {
    /// Returns `true` for failures on the way to or from the server, as
    /// opposed to a server that answered with an error.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, ClientError::Http(e) if e.is_connect() || e.is_timeout() || e.is_request())
    }

    /// Text suitable for the blocking alert a visitor sees after a failed
    /// candidacy or address search.
    #[must_use]
    pub fn user_message(&self) -> String {
        const PREFIX: &str = "Erreur lors de l'envoi de votre candidature. ";
        match self {
            ClientError::Http(_) if self.is_network() => {
                format!("{PREFIX}Problème de connexion réseau.")
            }
            ClientError::SubmissionRejected { status, body } if body.trim().is_empty() => {
                format!("{PREFIX}Erreur serveur: HTTP {status}")
            }
            ClientError::SubmissionRejected { status, body } => {
                format!("{PREFIX}Erreur serveur: HTTP {status} - {}", body.trim())
            }
            ClientError::UnexpectedStatus { status, .. } => {
                format!("{PREFIX}Erreur serveur: HTTP {status}")
            }
            ClientError::Geocode { .. } | ClientError::MissingGeocoderKey => {
                "Impossible de localiser cette adresse. Veuillez vérifier votre saisie.".to_owned()
            }
            ClientError::Validation(_) => {
                "Veuillez corriger les erreurs dans le formulaire avant de soumettre.".to_owned()
            }
            other => format!("{PREFIX}{other}"),
        }
    }
}
