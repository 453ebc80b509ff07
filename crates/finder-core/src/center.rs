use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Specialty label carried by every center the webhook publishes.
pub const DENTAL_SPECIALTY: &str = "Dentaire";

/// Weekday on which a center may offer a vacation slot.
///
/// Only the five working days exist; the order of the variants is the
/// canonical order of [`CenterRecord::vacations`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    #[serde(rename = "lundi")]
    Monday,
    #[serde(rename = "mardi")]
    Tuesday,
    #[serde(rename = "mercredi")]
    Wednesday,
    #[serde(rename = "jeudi")]
    Thursday,
    #[serde(rename = "vendredi")]
    Friday,
}

impl Weekday {
    pub const ALL: [Weekday; 5] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
    ];

    /// Key used by the webhook payload and the candidacy form (`"lundi"`, ...).
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Weekday::Monday => "lundi",
            Weekday::Tuesday => "mardi",
            Weekday::Wednesday => "mercredi",
            Weekday::Thursday => "jeudi",
            Weekday::Friday => "vendredi",
        }
    }

    /// Display label with a leading capital (`"Lundi"`).
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Weekday::Monday => "Lundi",
            Weekday::Tuesday => "Mardi",
            Weekday::Wednesday => "Mercredi",
            Weekday::Thursday => "Jeudi",
            Weekday::Friday => "Vendredi",
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown weekday \"{0}\"; expected lundi..vendredi or monday..friday")]
pub struct UnknownWeekday(pub String);

impl FromStr for Weekday {
    type Err = UnknownWeekday;

    /// Accepts the French payload keys and the English names, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lundi" | "monday" => Ok(Weekday::Monday),
            "mardi" | "tuesday" => Ok(Weekday::Tuesday),
            "mercredi" | "wednesday" => Ok(Weekday::Wednesday),
            "jeudi" | "thursday" => Ok(Weekday::Thursday),
            "vendredi" | "friday" => Ok(Weekday::Friday),
            _ => Err(UnknownWeekday(s.to_owned())),
        }
    }
}

/// Availability of one center on one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vacation {
    pub day: Weekday,
    pub available: bool,
}

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Great-circle distance to `other` in kilometres.
    #[must_use]
    pub fn distance_km_to(&self, other: &Coordinates) -> f64 {
        crate::geo::distance_km(self.lat, self.lng, other.lat, other.lng)
    }
}

/// One dental center, as normalized from the centers webhook.
///
/// Records are immutable once loaded; anything that depends on the visitor's
/// position lives in [`crate::engine::DistanceIndex`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CenterRecord {
    /// Slug of the center name, unique within one load.
    pub id: String,
    pub name: String,
    /// Full postal address, e.g. `"83 Rue de l'Ourcq, 75019 Paris, France"`.
    pub address: String,
    pub city: String,
    pub postal_code: String,
    /// `None` when the source coordinates are missing or unparsable.
    pub coordinates: Option<Coordinates>,
    /// Exactly one entry per [`Weekday::ALL`], in that order.
    pub vacations: Vec<Vacation>,
    pub specialties: Vec<String>,
    pub logo_url: String,
    pub doctolib_url: String,
    pub google_review_url: String,
}

impl CenterRecord {
    /// Returns `true` if the center is available on `day`.
    #[must_use]
    pub fn is_available_on(&self, day: Weekday) -> bool {
        self.vacations.iter().any(|v| v.day == day && v.available)
    }

    /// Weekdays with an open vacation, in canonical order.
    pub fn available_days(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.vacations
            .iter()
            .filter(|v| v.available)
            .map(|v| v.day)
    }
}

/// Builds the five-entry vacation list from a per-day availability predicate.
pub fn vacations_from<F>(mut available: F) -> Vec<Vacation>
where
    F: FnMut(Weekday) -> bool,
{
    Weekday::ALL
        .iter()
        .map(|&day| Vacation {
            day,
            available: available(day),
        })
        .collect()
}

/// The visitor's reference position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserLocation {
    pub lat: f64,
    pub lng: f64,
    /// Resolved display address. Absent for raw device/CLI coordinates.
    pub address: Option<String>,
}

impl UserLocation {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self {
            lat,
            lng,
            address: None,
        }
    }

    #[must_use]
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lng)
    }
}

/// Weekdays ticked in the day filter. Empty means "no day filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    days: BTreeSet<Weekday>,
}

impl FilterSelection {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses day names case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownWeekday`] for the first name that is not a working day.
    pub fn parse<I, S>(names: I) -> Result<Self, UnknownWeekday>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        names
            .into_iter()
            .map(|n| n.as_ref().parse::<Weekday>())
            .collect::<Result<BTreeSet<_>, _>>()
            .map(|days| Self { days })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    #[must_use]
    pub fn contains(&self, day: Weekday) -> bool {
        self.days.contains(&day)
    }

    /// Ticks or unticks `day`; returns the new state.
    pub fn toggle(&mut self, day: Weekday) -> bool {
        if self.days.remove(&day) {
            false
        } else {
            self.days.insert(day);
            true
        }
    }

    pub fn clear(&mut self) {
        self.days.clear();
    }

    pub fn days(&self) -> impl Iterator<Item = Weekday> + '_ {
        self.days.iter().copied()
    }

    /// Returns `true` if `center` has at least one available selected day.
    #[must_use]
    pub fn matches(&self, center: &CenterRecord) -> bool {
        self.is_empty() || self.days.iter().any(|&day| center.is_available_on(day))
    }
}

impl FromIterator<Weekday> for FilterSelection {
    fn from_iter<T: IntoIterator<Item = Weekday>>(iter: T) -> Self {
        Self {
            days: iter.into_iter().collect(),
        }
    }
}
