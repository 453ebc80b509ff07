use super::*;
use crate::center::{vacations_from, Coordinates, Weekday, DENTAL_SPECIALTY};

fn center(id: &str, coords: Option<(f64, f64)>, open: &[Weekday]) -> CenterRecord {
    CenterRecord {
        id: id.to_owned(),
        name: format!("Centre {id}"),
        address: "1 Rue de Test, 75001 Paris, France".to_owned(),
        city: "Paris".to_owned(),
        postal_code: "75001".to_owned(),
        coordinates: coords.map(|(lat, lng)| Coordinates::new(lat, lng)),
        vacations: vacations_from(|d| open.contains(&d)),
        specialties: vec![DENTAL_SPECIALTY.to_owned()],
        logo_url: String::new(),
        doctolib_url: String::new(),
        google_review_url: String::new(),
    }
}

fn ids(view: &[ViewEntry<'_>]) -> Vec<String> {
    view.iter().map(|e| e.center.id.clone()).collect()
}

fn paris() -> UserLocation {
    UserLocation::new(48.8566, 2.3522)
}

// -----------------------------------------------------------------------
// day filter
// -----------------------------------------------------------------------

#[test]
fn empty_selection_keeps_everything_in_order() {
    let centers = vec![
        center("c", None, &[]),
        center("a", Some((48.9, 2.3)), &[Weekday::Monday]),
        center("b", Some((48.8, 2.4)), &[Weekday::Friday]),
    ];
    let view = apply(&centers, &FilterSelection::new(), None);
    assert_eq!(ids(&view), vec!["c", "a", "b"]);
    assert!(view.iter().all(|e| e.distance_km.is_none()));
}

#[test]
fn selection_keeps_centers_with_any_selected_day_available() {
    let centers = vec![
        center("mon", None, &[Weekday::Monday]),
        center("tue", None, &[Weekday::Tuesday]),
        center("none", None, &[]),
        center("both", None, &[Weekday::Monday, Weekday::Wednesday]),
    ];
    let selection = FilterSelection::parse(["LUNDI", "mercredi"]).unwrap();
    let view = apply(&centers, &selection, None);
    assert_eq!(ids(&view), vec!["mon", "both"]);
    for entry in &view {
        assert!(selection.days().any(|d| entry.center.is_available_on(d)));
    }
}

#[test]
fn selection_with_no_match_yields_empty_view() {
    let centers = vec![center("a", None, &[Weekday::Monday])];
    let selection: FilterSelection = [Weekday::Friday].into_iter().collect();
    assert!(apply(&centers, &selection, None).is_empty());
}

// -----------------------------------------------------------------------
// distance sort
// -----------------------------------------------------------------------

#[test]
fn distance_index_skips_centers_without_coordinates() {
    let centers = vec![
        center("far", Some((45.76, 4.83)), &[]),
        center("nowhere", None, &[]),
    ];
    let index = DistanceIndex::compute(&centers, &paris());
    assert_eq!(index.len(), 1);
    assert!(index.get("far").unwrap() > 300.0);
    assert!(index.get("nowhere").is_none());
}

#[test]
fn location_sorts_ascending_with_missing_distances_last() {
    let centers = vec![
        center("lyon", Some((45.76, 4.83)), &[]),
        center("unknown-1", None, &[]),
        center("balard", Some((48.841_116, 2.278_023)), &[]),
        center("unknown-2", None, &[]),
        center("flandre", Some((48.893_015, 2.377_504)), &[]),
    ];
    let index = DistanceIndex::compute(&centers, &paris());
    let view = apply(&centers, &FilterSelection::new(), Some(&index));

    assert_eq!(
        ids(&view),
        vec!["flandre", "balard", "lyon", "unknown-1", "unknown-2"]
    );
    let numeric: Vec<f64> = view.iter().filter_map(|e| e.distance_km).collect();
    assert!(numeric.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn equal_distances_keep_input_order() {
    let centers = vec![
        center("first", Some((48.9, 2.3)), &[]),
        center("second", Some((48.9, 2.3)), &[]),
        center("closer", Some((48.8566, 2.3522)), &[]),
    ];
    let index = DistanceIndex::compute(&centers, &paris());
    let view = apply(&centers, &FilterSelection::new(), Some(&index));
    assert_eq!(ids(&view), vec!["closer", "first", "second"]);
}

#[test]
fn filter_and_sort_compose() {
    let centers = vec![
        center("lyon", Some((45.76, 4.83)), &[Weekday::Thursday]),
        center("closed", Some((48.8566, 2.3522)), &[]),
        center("flandre", Some((48.893_015, 2.377_504)), &[Weekday::Thursday]),
    ];
    let index = DistanceIndex::compute(&centers, &paris());
    let selection = FilterSelection::parse(["jeudi"]).unwrap();
    let view = apply(&centers, &selection, Some(&index));
    assert_eq!(ids(&view), vec!["flandre", "lyon"]);
}

#[test]
fn records_are_not_modified_by_distance_computation() {
    let centers = vec![center("a", Some((48.9, 2.3)), &[])];
    let before = centers.clone();
    let index = DistanceIndex::compute(&centers, &paris());
    let _ = apply(&centers, &FilterSelection::new(), Some(&index));
    assert_eq!(centers, before);
}
