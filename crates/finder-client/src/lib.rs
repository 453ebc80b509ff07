pub mod client;
pub mod error;
pub mod geocode;
pub mod normalize;
pub mod parse;
mod retry;
pub mod sample;
pub mod types;

pub use client::{
    CenterSource, Endpoints, FinderClient, LoadedCenters, ProbeResponse, SubmissionReceipt,
    SUBMISSION_OK_MESSAGE,
};
pub use error::ClientError;
pub use geocode::{Geocoder, GoogleGeocoder};
pub use normalize::{normalize_center, normalize_payload};
pub use sample::{sample_centers, sample_centers_with};
