use serde_json::json;

use super::*;

// -----------------------------------------------------------------------
// slugify / random_id
// -----------------------------------------------------------------------

#[test]
fn slugify_replaces_whitespace_runs_and_lowercases() {
    assert_eq!(slugify("Centre Dentaire Balard"), "centre-dentaire-balard");
    assert_eq!(slugify("Centre  Médical\tChevaleret"), "centre-médical-chevaleret");
    assert_eq!(slugify("Cabinet l'Ourcq"), "cabinet-l'ourcq");
}

#[test]
fn random_id_is_lowercase_alphanumeric() {
    let id = random_id();
    assert_eq!(id.len(), 9);
    assert!(id
        .chars()
        .all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
}

// -----------------------------------------------------------------------
// address heuristics
// -----------------------------------------------------------------------

#[test]
fn city_and_postal_code_from_full_address() {
    let address = "83 Rue de l'Ourcq, 75019 Paris, France";
    assert_eq!(extract_city(address), "Paris");
    assert_eq!(extract_postal_code(address), "75019");
}

#[test]
fn city_keeps_multi_word_names() {
    assert_eq!(
        extract_city("1 Place du Marché, 94100 Saint Maur des Fossés, France"),
        "Saint Maur des Fossés"
    );
}

#[test]
fn city_is_empty_without_comma() {
    assert_eq!(extract_city("Paris"), "");
    assert_eq!(extract_city(""), "");
}

#[test]
fn city_without_country_takes_street_segment() {
    // Documented limitation: the heuristic assumes a trailing country.
    assert_eq!(extract_city("12 Rue Haute, 75001 Paris"), "Rue Haute");
}

#[test]
fn postal_code_ignores_longer_digit_runs() {
    assert_eq!(extract_postal_code("Tel 0612345678, 69003 Lyon"), "69003");
    assert_eq!(extract_postal_code("no code here"), "");
}

// -----------------------------------------------------------------------
// coordinates
// -----------------------------------------------------------------------

#[test]
fn float_prefix_is_permissive() {
    assert_eq!(parse_float_prefix("48.893015"), Some(48.893_015));
    assert_eq!(parse_float_prefix("  2.37abc"), Some(2.37));
    assert_eq!(parse_float_prefix("-0.5"), Some(-0.5));
    assert_eq!(parse_float_prefix(".25"), Some(0.25));
    assert_eq!(parse_float_prefix("1e2x"), Some(100.0));
    assert_eq!(parse_float_prefix("abc"), None);
    assert_eq!(parse_float_prefix(""), None);
}

#[test]
fn coordinate_accepts_numbers_and_strings() {
    assert_eq!(parse_coordinate(Some(&json!(48.84))), Some(48.84));
    assert_eq!(parse_coordinate(Some(&json!("2.278023"))), Some(2.278_023));
    assert_eq!(parse_coordinate(Some(&json!(""))), None);
    assert_eq!(parse_coordinate(Some(&json!(null))), None);
    assert_eq!(parse_coordinate(Some(&json!(true))), None);
    assert_eq!(parse_coordinate(None), None);
}
