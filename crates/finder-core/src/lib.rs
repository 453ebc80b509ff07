//! Domain model for the dental center finder: center records, the day filter
//! and distance sort, travel-time estimates, candidacy forms, and
//! environment configuration.

pub mod app_config;
pub mod candidacy;
pub mod center;
pub mod config;
pub mod engine;
pub mod geo;
pub mod session;
pub mod travel;

pub use app_config::{AppConfig, Environment};
pub use candidacy::{
    Candidacy, CandidacyForm, CandidacyPayload, FieldError, SubmissionMode, ValidationErrors,
};
pub use center::{
    CenterRecord, Coordinates, FilterSelection, UnknownWeekday, UserLocation, Vacation, Weekday,
    DENTAL_SPECIALTY,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use engine::{apply, DistanceIndex, ViewEntry};
pub use geo::distance_km;
pub use session::{FinderSession, Generation};
pub use travel::{estimate_travel_time, TravelMode, TravelTimes};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
