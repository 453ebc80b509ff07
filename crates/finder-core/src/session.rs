//! Visitor session state with stale-response protection.
//!
//! Every change that invalidates an in-flight lookup bumps a generation
//! counter. A geocode or position fix started under an older generation is
//! discarded when it finally resolves, so the most recent request wins
//! regardless of completion order.

use std::sync::Arc;

use crate::center::{CenterRecord, FilterSelection, UserLocation, Weekday};
use crate::engine::{self, DistanceIndex, ViewEntry};
use crate::travel::{self, TravelTimes};

/// Token identifying the state a pending lookup was started from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

#[derive(Debug, Clone, Default)]
pub struct FinderSession {
    centers: Arc<[CenterRecord]>,
    selection: FilterSelection,
    location: Option<UserLocation>,
    distances: Option<DistanceIndex>,
    generation: u64,
}

impl FinderSession {
    #[must_use]
    pub fn new(centers: Vec<CenterRecord>) -> Self {
        Self {
            centers: centers.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn centers(&self) -> &[CenterRecord] {
        &self.centers
    }

    #[must_use]
    pub fn center(&self, id: &str) -> Option<&CenterRecord> {
        self.centers.iter().find(|c| c.id == id)
    }

    #[must_use]
    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    #[must_use]
    pub fn location(&self) -> Option<&UserLocation> {
        self.location.as_ref()
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        Generation(self.generation)
    }

    /// Swaps in a freshly loaded list. Distances are recomputed against the
    /// current location and pending lookups are invalidated.
    pub fn replace_centers(&mut self, centers: Vec<CenterRecord>) {
        self.centers = centers.into();
        self.distances = self
            .location
            .as_ref()
            .map(|loc| DistanceIndex::compute(&self.centers, loc));
        self.bump();
    }

    pub fn set_days(&mut self, selection: FilterSelection) {
        self.selection = selection;
    }

    /// Returns whether `day` is now selected.
    pub fn toggle_day(&mut self, day: Weekday) -> bool {
        self.selection.toggle(day)
    }

    /// Starts a location lookup; pass the token to [`Self::resolve_location`].
    pub fn begin_location_change(&mut self) -> Generation {
        self.bump();
        self.generation()
    }

    /// Applies a resolved location if `token` is still current.
    ///
    /// Returns `false` and leaves the session untouched for stale tokens.
    pub fn resolve_location(&mut self, token: Generation, location: UserLocation) -> bool {
        if token != self.generation() {
            tracing::debug!(
                token = token.0,
                current = self.generation,
                "discarding stale location result"
            );
            return false;
        }
        self.distances = Some(DistanceIndex::compute(&self.centers, &location));
        self.location = Some(location);
        true
    }

    /// Resets the day filter and the location; pending lookups become stale.
    pub fn clear_filters(&mut self) {
        self.selection.clear();
        self.location = None;
        self.distances = None;
        self.bump();
    }

    #[must_use]
    pub fn view(&self) -> Vec<ViewEntry<'_>> {
        engine::apply(&self.centers, &self.selection, self.distances.as_ref())
    }

    /// Travel times for the current view, keyed by center id.
    #[must_use]
    pub fn travel_times(&self) -> Vec<(String, TravelTimes)> {
        match &self.location {
            Some(location) => travel::annotate(&self.view(), location),
            None => Vec::new(),
        }
    }

    fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::center::{vacations_from, Coordinates, DENTAL_SPECIALTY};

    fn center(id: &str, lat: f64, lng: f64, open: &[Weekday]) -> CenterRecord {
        CenterRecord {
            id: id.to_owned(),
            name: id.to_owned(),
            address: String::new(),
            city: String::new(),
            postal_code: String::new(),
            coordinates: Some(Coordinates::new(lat, lng)),
            vacations: vacations_from(|d| open.contains(&d)),
            specialties: vec![DENTAL_SPECIALTY.to_owned()],
            logo_url: String::new(),
            doctolib_url: String::new(),
            google_review_url: String::new(),
        }
    }

    fn session() -> FinderSession {
        FinderSession::new(vec![
            center("lyon", 45.76, 4.83, &[Weekday::Monday]),
            center("paris", 48.86, 2.35, &[Weekday::Tuesday]),
        ])
    }

    fn view_ids(session: &FinderSession) -> Vec<String> {
        session.view().iter().map(|e| e.center.id.clone()).collect()
    }

    #[test]
    fn current_token_applies_location() {
        let mut s = session();
        let token = s.begin_location_change();
        assert!(s.resolve_location(token, UserLocation::new(48.85, 2.35)));
        assert_eq!(view_ids(&s), vec!["paris", "lyon"]);
        assert!(s.view()[0].distance_km.is_some());
    }

    #[test]
    fn stale_token_is_discarded() {
        let mut s = session();
        let slow = s.begin_location_change();
        let fast = s.begin_location_change();

        assert!(s.resolve_location(fast, UserLocation::new(45.75, 4.85)));
        assert!(!s.resolve_location(slow, UserLocation::new(48.85, 2.35)));

        let loc = s.location().unwrap();
        assert!((loc.lat - 45.75).abs() < f64::EPSILON);
        assert_eq!(view_ids(&s), vec!["lyon", "paris"]);
    }

    #[test]
    fn clear_filters_invalidates_pending_lookup() {
        let mut s = session();
        s.toggle_day(Weekday::Monday);
        let token = s.begin_location_change();
        s.clear_filters();

        assert!(!s.resolve_location(token, UserLocation::new(48.85, 2.35)));
        assert!(s.location().is_none());
        assert!(s.selection().is_empty());
        assert_eq!(view_ids(&s), vec!["lyon", "paris"]);
    }

    #[test]
    fn day_filter_applies_without_location() {
        let mut s = session();
        assert!(s.toggle_day(Weekday::Tuesday));
        assert_eq!(view_ids(&s), vec!["paris"]);
        assert!(s.travel_times().is_empty());
    }

    #[test]
    fn travel_times_need_a_display_address() {
        let mut s = session();
        let token = s.begin_location_change();
        s.resolve_location(token, UserLocation::new(48.85, 2.35));
        assert!(s.travel_times().is_empty(), "bare position has no travel times");

        let token = s.begin_location_change();
        s.resolve_location(
            token,
            UserLocation::new(48.85, 2.35).with_address("Place de la Concorde, Paris"),
        );
        let times = s.travel_times();
        assert_eq!(times.len(), 2);
        assert_eq!(times[0].0, "paris");
    }

    #[test]
    fn replace_centers_recomputes_distances() {
        let mut s = session();
        let token = s.begin_location_change();
        s.resolve_location(token, UserLocation::new(48.85, 2.35));

        s.replace_centers(vec![center("marseille", 43.30, 5.37, &[])]);
        let view = s.view();
        assert_eq!(view.len(), 1);
        assert!(view[0].distance_km.unwrap() > 600.0);
        assert!(s.center("lyon").is_none());
    }
}
