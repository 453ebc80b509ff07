//! Candidacy forms, their validation, and the webhook payloads they produce.
//!
//! Two submission modes exist and are never merged: the public finder asks
//! for contact details, the internal page asks for preferred weekdays.

use std::sync::LazyLock;

use chrono::{DateTime, SecondsFormat, Utc};
use regex::Regex;
use serde::Serialize;

use crate::center::{CenterRecord, Weekday};

/// Sent as `url_id` when the internal page was opened without an `id`.
pub const UNDEFINED_URL_ID: &str = "non-defini";

const MIN_NAME_CHARS: usize = 2;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));

// French numbers: +33 or 0, a non-zero digit, then eight digits.
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\+33|0)[1-9][0-9]{8}$").expect("valid regex"));

static PHONE_SEPARATORS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s\-.]").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionMode {
    Contact,
    PreferredDays,
}

impl std::fmt::Display for SubmissionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmissionMode::Contact => write!(f, "contact"),
            SubmissionMode::PreferredDays => write!(f, "preferred_days"),
        }
    }
}

/// What the visitor typed into the candidacy form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidacyForm {
    Contact {
        first_name: String,
        last_name: String,
        email: String,
        phone: String,
    },
    PreferredDays {
        days: Vec<Weekday>,
        /// The `id` query parameter of the page that opened the form.
        url_id: Option<String>,
    },
}

impl CandidacyForm {
    #[must_use]
    pub fn mode(&self) -> SubmissionMode {
        match self {
            CandidacyForm::Contact { .. } => SubmissionMode::Contact,
            CandidacyForm::PreferredDays { .. } => SubmissionMode::PreferredDays,
        }
    }

    fn collect_errors(&self, errors: &mut Vec<FieldError>) {
        match self {
            CandidacyForm::Contact {
                first_name,
                last_name,
                email,
                phone,
            } => {
                if !is_valid_name(first_name) {
                    errors.push(FieldError::new("prenom", "minimum 2 characters"));
                }
                if !is_valid_name(last_name) {
                    errors.push(FieldError::new("nom", "minimum 2 characters"));
                }
                if !is_valid_email(email) {
                    errors.push(FieldError::new("email", "invalid email format"));
                }
                if !is_valid_phone(phone) {
                    errors.push(FieldError::new(
                        "telephone",
                        "invalid phone format (e.g. 06 12 34 56 78)",
                    ));
                }
            }
            CandidacyForm::PreferredDays { days, .. } => {
                if days.is_empty() {
                    errors.push(FieldError::new(
                        "jours_souhaites",
                        "select at least one day",
                    ));
                }
            }
        }
    }
}

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Spaces, dashes and dots are ignored before matching.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    let compact = PHONE_SEPARATORS_RE.replace_all(phone.trim(), "");
    PHONE_RE.is_match(&compact)
}

#[must_use]
pub fn is_valid_name(name: &str) -> bool {
    name.trim().chars().count() >= MIN_NAME_CHARS
}

/// One rejected form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Payload key of the field, e.g. `"email"`.
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Every field that failed validation, in form order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid candidacy: {}", summarize(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactPayload {
    pub centre: String,
    pub prenom: String,
    pub nom: String,
    pub email: String,
    pub telephone: String,
    pub centre_id: String,
    pub date_soumission: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferredDaysPayload {
    pub centre: String,
    pub jours_souhaites: Vec<Weekday>,
    pub centre_id: String,
    pub url_id: String,
    pub date_soumission: String,
}

/// JSON body posted to the candidacy webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CandidacyPayload {
    Contact(ContactPayload),
    PreferredDays(PreferredDaysPayload),
}

/// A validated candidacy ready to be posted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidacy {
    pub mode: SubmissionMode,
    pub payload: CandidacyPayload,
}

impl Candidacy {
    /// Validates `form` against `center` and stamps it with `submitted_at`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationErrors`] listing every failing field, including a
    /// center with an empty name or id.
    pub fn build(
        center: &CenterRecord,
        form: CandidacyForm,
        submitted_at: DateTime<Utc>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = Vec::new();
        if center.name.trim().is_empty() {
            errors.push(FieldError::new("centre", "center name is missing"));
        }
        if center.id.trim().is_empty() {
            errors.push(FieldError::new("centre_id", "center id is missing"));
        }
        form.collect_errors(&mut errors);
        if !errors.is_empty() {
            return Err(ValidationErrors(errors));
        }

        let mode = form.mode();
        let date_soumission = submitted_at.to_rfc3339_opts(SecondsFormat::Millis, true);
        let payload = match form {
            CandidacyForm::Contact {
                first_name,
                last_name,
                email,
                phone,
            } => CandidacyPayload::Contact(ContactPayload {
                centre: center.name.clone(),
                prenom: first_name.trim().to_owned(),
                nom: last_name.trim().to_owned(),
                email: email.trim().to_owned(),
                telephone: phone.trim().to_owned(),
                centre_id: center.id.clone(),
                date_soumission,
            }),
            CandidacyForm::PreferredDays { mut days, url_id } => {
                days.sort_unstable();
                days.dedup();
                CandidacyPayload::PreferredDays(PreferredDaysPayload {
                    centre: center.name.clone(),
                    jours_souhaites: days,
                    centre_id: center.id.clone(),
                    url_id: url_id
                        .filter(|id| !id.trim().is_empty())
                        .unwrap_or_else(|| UNDEFINED_URL_ID.to_owned()),
                    date_soumission,
                })
            }
        };

        Ok(Self { mode, payload })
    }
}

#[cfg(test)]
#[path = "candidacy_test.rs"]
mod tests;
