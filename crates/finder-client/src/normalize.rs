//! Normalization from the centers webhook payload to [`CenterRecord`]s.
//!
//! Address and number parsing is delegated to [`crate::parse`]; this module
//! handles the envelope and the per-entry field mapping.

use std::collections::HashMap;

use finder_core::center::vacations_from;
use finder_core::{CenterRecord, Coordinates, DENTAL_SPECIALTY};
use serde_json::Value;

use crate::error::ClientError;
use crate::parse::{extract_city, extract_postal_code, parse_coordinate, random_id, slugify};

pub const UNNAMED_CENTER: &str = "Centre non nommé";
pub const MISSING_ADDRESS: &str = "Adresse non disponible";

/// Value a weekday column must hold for the center to be open that day.
const AVAILABLE_MARKER: &str = "Disponible";

/// Normalizes the webhook body `[{"result": [...]}]` into center records.
///
/// Ids are made unique within the returned list by suffixing `-2`, `-3`, ...
/// to repeated slugs.
///
/// # Errors
///
/// Returns [`ClientError::MalformedPayload`] if the body is not a non-empty
/// array whose first element carries a `result` array of objects.
pub fn normalize_payload(payload: &Value) -> Result<Vec<CenterRecord>, ClientError> {
    let envelope = payload
        .as_array()
        .ok_or_else(|| malformed("top-level value is not an array"))?;
    let first = envelope
        .first()
        .ok_or_else(|| malformed("top-level array is empty"))?;
    let entries = first
        .get("result")
        .and_then(Value::as_array)
        .ok_or_else(|| malformed("first element has no `result` array"))?;

    let mut centers = entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            if entry.is_object() {
                Ok(normalize_center(entry))
            } else {
                Err(malformed(&format!("result[{idx}] is not an object")))
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    dedupe_ids(&mut centers);
    Ok(centers)
}

/// Maps one raw webhook entry onto a [`CenterRecord`].
///
/// Never fails: missing fields fall back to placeholders or empty strings,
/// and unparsable coordinates leave the record without a position.
#[must_use]
pub fn normalize_center(raw: &Value) -> CenterRecord {
    let name = non_empty_str(raw, "centre");
    let raw_address = non_empty_str(raw, "Adresse");

    let id = name.map_or_else(random_id, slugify);

    let coordinates = match (
        parse_coordinate(raw.get("LAT")),
        parse_coordinate(raw.get("LONG")),
    ) {
        (Some(lat), Some(lng)) => Some(Coordinates::new(lat, lng)),
        (lat, lng) => {
            tracing::debug!(
                center = name.unwrap_or(UNNAMED_CENTER),
                lat = ?lat,
                lng = ?lng,
                "center has no usable coordinates"
            );
            None
        }
    };

    let vacations = vacations_from(|day| {
        raw.get(day.key()).and_then(Value::as_str) == Some(AVAILABLE_MARKER)
    });

    CenterRecord {
        id,
        name: name.unwrap_or(UNNAMED_CENTER).to_owned(),
        address: raw_address.unwrap_or(MISSING_ADDRESS).to_owned(),
        city: raw_address.map(extract_city).unwrap_or_default(),
        postal_code: raw_address.map(extract_postal_code).unwrap_or_default(),
        coordinates,
        vacations,
        specialties: vec![DENTAL_SPECIALTY.to_owned()],
        logo_url: link(raw, "Logo_public_URL"),
        doctolib_url: link(raw, "Page Doctolib"),
        google_review_url: link(raw, "Google review"),
    }
}

fn non_empty_str<'a>(raw: &'a Value, key: &str) -> Option<&'a str> {
    raw.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn link(raw: &Value, key: &str) -> String {
    non_empty_str(raw, key).unwrap_or_default().to_owned()
}

fn dedupe_ids(centers: &mut [CenterRecord]) {
    let mut seen: HashMap<String, usize> = HashMap::new();
    for center in centers.iter_mut() {
        let count = seen.entry(center.id.clone()).or_insert(0);
        *count += 1;
        if *count > 1 {
            let mut n = *count;
            let mut candidate = format!("{}-{n}", center.id);
            while seen.contains_key(&candidate) {
                n += 1;
                candidate = format!("{}-{n}", center.id);
            }
            tracing::warn!(
                original = %center.id,
                renamed = %candidate,
                "duplicate center id in payload"
            );
            seen.insert(candidate.clone(), 1);
            center.id = candidate;
        }
    }
}

fn malformed(reason: &str) -> ClientError {
    ClientError::MalformedPayload {
        reason: reason.to_owned(),
    }
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
