use chrono::TimeZone;

use super::*;
use crate::center::{vacations_from, DENTAL_SPECIALTY};

fn flandre() -> CenterRecord {
    CenterRecord {
        id: "centre-de-santé-dentaire-flandre".to_owned(),
        name: "Centre de Santé Dentaire Flandre".to_owned(),
        address: "83 Rue de l'Ourcq, 75019 Paris, France".to_owned(),
        city: "Paris".to_owned(),
        postal_code: "75019".to_owned(),
        coordinates: None,
        vacations: vacations_from(|_| true),
        specialties: vec![DENTAL_SPECIALTY.to_owned()],
        logo_url: String::new(),
        doctolib_url: String::new(),
        google_review_url: String::new(),
    }
}

fn contact_form() -> CandidacyForm {
    CandidacyForm::Contact {
        first_name: " Marie ".to_owned(),
        last_name: "Curie".to_owned(),
        email: "marie.curie@example.fr".to_owned(),
        phone: "06 12 34 56 78".to_owned(),
    }
}

fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap()
}

// -----------------------------------------------------------------------
// field validators
// -----------------------------------------------------------------------

#[test]
fn email_validation() {
    assert!(is_valid_email("a@b.co"));
    assert!(is_valid_email("  dr.x@cabinet.fr "));
    assert!(!is_valid_email("no-at-sign.fr"));
    assert!(!is_valid_email("a@b"));
    assert!(!is_valid_email("a b@c.fr"));
}

#[test]
fn phone_validation_ignores_separators() {
    assert!(is_valid_phone("06 12 34 56 78"));
    assert!(is_valid_phone("06-12-34-56-78"));
    assert!(is_valid_phone("06.12.34.56.78"));
    assert!(is_valid_phone("+33612345678"));
    assert!(!is_valid_phone("00 12 34 56 78"), "second digit must be non-zero");
    assert!(!is_valid_phone("06 12 34 56"));
    assert!(!is_valid_phone("+44 7700 900123"));
}

#[test]
fn name_needs_two_characters_after_trimming() {
    assert!(is_valid_name("Al"));
    assert!(is_valid_name("Émile"));
    assert!(!is_valid_name(" A "));
    assert!(!is_valid_name(""));
}

// -----------------------------------------------------------------------
// Candidacy::build
// -----------------------------------------------------------------------

#[test]
fn contact_payload_uses_webhook_field_names() {
    let candidacy = Candidacy::build(&flandre(), contact_form(), fixed_time()).unwrap();
    assert_eq!(candidacy.mode, SubmissionMode::Contact);

    let json = serde_json::to_value(&candidacy.payload).unwrap();
    assert_eq!(json["centre"], "Centre de Santé Dentaire Flandre");
    assert_eq!(json["centre_id"], "centre-de-santé-dentaire-flandre");
    assert_eq!(json["prenom"], "Marie");
    assert_eq!(json["nom"], "Curie");
    assert_eq!(json["email"], "marie.curie@example.fr");
    assert_eq!(json["telephone"], "06 12 34 56 78");
    assert_eq!(json["date_soumission"], "2025-03-14T09:30:00.000Z");
    assert!(json.get("jours_souhaites").is_none());
}

#[test]
fn contact_form_reports_every_invalid_field() {
    let form = CandidacyForm::Contact {
        first_name: "M".to_owned(),
        last_name: "Curie".to_owned(),
        email: "not-an-email".to_owned(),
        phone: "123".to_owned(),
    };
    let err = Candidacy::build(&flandre(), form, fixed_time()).unwrap_err();
    assert_eq!(err.0.len(), 3, "got: {err}");
    assert!(err.has_field("prenom"));
    assert!(err.has_field("email"));
    assert!(err.has_field("telephone"));
    assert!(!err.has_field("nom"));
}

#[test]
fn preferred_days_payload_defaults_url_id() {
    let form = CandidacyForm::PreferredDays {
        days: vec![Weekday::Thursday, Weekday::Monday, Weekday::Thursday],
        url_id: None,
    };
    let candidacy = Candidacy::build(&flandre(), form, fixed_time()).unwrap();
    assert_eq!(candidacy.mode, SubmissionMode::PreferredDays);

    let json = serde_json::to_value(&candidacy.payload).unwrap();
    assert_eq!(json["jours_souhaites"], serde_json::json!(["lundi", "jeudi"]));
    assert_eq!(json["url_id"], UNDEFINED_URL_ID);
    assert!(json.get("email").is_none());
}

#[test]
fn preferred_days_keeps_given_url_id() {
    let form = CandidacyForm::PreferredDays {
        days: vec![Weekday::Friday],
        url_id: Some("abc-42".to_owned()),
    };
    let candidacy = Candidacy::build(&flandre(), form, fixed_time()).unwrap();
    let CandidacyPayload::PreferredDays(payload) = candidacy.payload else {
        panic!("expected preferred-days payload");
    };
    assert_eq!(payload.url_id, "abc-42");
}

#[test]
fn preferred_days_requires_a_day() {
    let form = CandidacyForm::PreferredDays {
        days: vec![],
        url_id: None,
    };
    let err = Candidacy::build(&flandre(), form, fixed_time()).unwrap_err();
    assert!(err.has_field("jours_souhaites"));
}

#[test]
fn center_without_id_is_rejected() {
    let mut center = flandre();
    center.id = String::new();
    let err = Candidacy::build(&center, contact_form(), fixed_time()).unwrap_err();
    assert!(err.has_field("centre_id"));
    assert!(err.to_string().contains("centre_id"));
}
