//! Built-in fallback centers used when the remote list cannot be loaded.

use finder_core::center::vacations_from;
use finder_core::{CenterRecord, Coordinates, DENTAL_SPECIALTY};
use rand::Rng;

/// Chance that a sample center is open on any given weekday.
const SAMPLE_AVAILABILITY: f64 = 0.7;

struct SampleCenter {
    id: &'static str,
    name: &'static str,
    address: &'static str,
    postal_code: &'static str,
    lat: f64,
    lng: f64,
}

const SAMPLE_CENTERS: [SampleCenter; 3] = [
    SampleCenter {
        id: "center-1",
        name: "Centre de Santé Dentaire Flandre",
        address: "83 Rue de l'Ourcq, 75019 Paris, France",
        postal_code: "75019",
        lat: 48.893_015,
        lng: 2.377_504,
    },
    SampleCenter {
        id: "center-2",
        name: "Centre Médical et Dentaire Chevaleret",
        address: "2 Square Dunois, 75013 Paris, France",
        postal_code: "75013",
        lat: 48.833_486,
        lng: 2.365_916,
    },
    SampleCenter {
        id: "center-3",
        name: "Centre Dentaire Balard",
        address: "61 Rue Balard, 75015 Paris, France",
        postal_code: "75015",
        lat: 48.841_116,
        lng: 2.278_023,
    },
];

/// The three Paris sample centers with freshly drawn weekday availability.
#[must_use]
pub fn sample_centers() -> Vec<CenterRecord> {
    sample_centers_with(&mut rand::rng())
}

/// Same as [`sample_centers`] but draws availability from `rng`, so a seeded
/// generator yields a reproducible list.
pub fn sample_centers_with<R: Rng>(rng: &mut R) -> Vec<CenterRecord> {
    SAMPLE_CENTERS
        .iter()
        .map(|s| CenterRecord {
            id: s.id.to_owned(),
            name: s.name.to_owned(),
            address: s.address.to_owned(),
            city: "Paris".to_owned(),
            postal_code: s.postal_code.to_owned(),
            coordinates: Some(Coordinates::new(s.lat, s.lng)),
            vacations: vacations_from(|_| rng.random_bool(SAMPLE_AVAILABILITY)),
            specialties: vec![DENTAL_SPECIALTY.to_owned()],
            logo_url: String::new(),
            doctolib_url: String::new(),
            google_review_url: String::new(),
        })
        .collect()
}
