//! Rough travel-time estimates from straight-line distance.
//!
//! Each mode has a fixed average speed; the result is a linear proxy, not a
//! routing result.

use std::str::FromStr;

use serde::Serialize;

use crate::center::UserLocation;
use crate::engine::ViewEntry;

/// Speed used when a mode string is not one of [`TravelMode`].
pub const FALLBACK_SPEED_KMH: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Driving,
    Walking,
    Cycling,
    Transit,
}

impl TravelMode {
    pub const ALL: [TravelMode; 4] = [
        TravelMode::Driving,
        TravelMode::Walking,
        TravelMode::Cycling,
        TravelMode::Transit,
    ];

    /// Average urban speed in km/h.
    #[must_use]
    pub fn speed_kmh(self) -> f64 {
        match self {
            TravelMode::Driving => 30.0,
            TravelMode::Walking => 5.0,
            TravelMode::Cycling => 15.0,
            TravelMode::Transit => 20.0,
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Cycling => "cycling",
            TravelMode::Transit => "transit",
        }
    }

    #[must_use]
    pub fn estimate(self, distance_km: f64) -> String {
        format_minutes(minutes_at(distance_km, self.speed_kmh()))
    }
}

impl FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "driving" => Ok(TravelMode::Driving),
            "walking" => Ok(TravelMode::Walking),
            "cycling" => Ok(TravelMode::Cycling),
            "transit" => Ok(TravelMode::Transit),
            other => Err(format!("unknown travel mode \"{other}\"")),
        }
    }
}

/// Estimates the duration of `distance_km` for a mode given by name.
///
/// Unrecognised modes travel at [`FALLBACK_SPEED_KMH`].
#[must_use]
pub fn estimate_travel_time(distance_km: f64, mode: &str) -> String {
    let speed = mode
        .parse::<TravelMode>()
        .map_or(FALLBACK_SPEED_KMH, TravelMode::speed_kmh);
    format_minutes(minutes_at(distance_km, speed))
}

#[allow(clippy::cast_possible_truncation)]
fn minutes_at(distance_km: f64, speed_kmh: f64) -> i64 {
    let hours = distance_km / speed_kmh;
    (hours * 60.0).round() as i64
}

/// `"42 min"` below an hour, otherwise `"2h 5min"` or `"5h"`.
fn format_minutes(total: i64) -> String {
    if total < 60 {
        return format!("{total} min");
    }
    let hours = total / 60;
    let minutes = total % 60;
    if minutes > 0 {
        format!("{hours}h {minutes}min")
    } else {
        format!("{hours}h")
    }
}

/// Per-mode duration strings for one center.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TravelTimes {
    pub driving: String,
    pub walking: String,
    pub cycling: String,
    pub transit: String,
}

impl TravelTimes {
    #[must_use]
    pub fn for_distance(distance_km: f64) -> Self {
        Self {
            driving: TravelMode::Driving.estimate(distance_km),
            walking: TravelMode::Walking.estimate(distance_km),
            cycling: TravelMode::Cycling.estimate(distance_km),
            transit: TravelMode::Transit.estimate(distance_km),
        }
    }

    #[must_use]
    pub fn get(&self, mode: TravelMode) -> &str {
        match mode {
            TravelMode::Driving => &self.driving,
            TravelMode::Walking => &self.walking,
            TravelMode::Cycling => &self.cycling,
            TravelMode::Transit => &self.transit,
        }
    }
}

/// Travel times for every entry of `view` that has a distance.
///
/// Returns nothing when `location` has no display address: a bare position
/// fix is enough to sort but not to quote journeys from.
#[must_use]
pub fn annotate(view: &[ViewEntry<'_>], location: &UserLocation) -> Vec<(String, TravelTimes)> {
    if location.address.is_none() {
        return Vec::new();
    }
    view.iter()
        .filter_map(|entry| {
            let km = entry.distance_km?;
            Some((entry.center.id.clone(), TravelTimes::for_distance(km)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_is_zero_minutes_for_every_mode() {
        for mode in ["driving", "walking", "cycling", "transit", "teleport"] {
            assert_eq!(estimate_travel_time(0.0, mode), "0 min");
        }
    }

    #[test]
    fn whole_hours_drop_the_minutes() {
        assert_eq!(estimate_travel_time(150.0, "driving"), "5h");
    }

    #[test]
    fn hours_and_minutes_are_rounded() {
        // 31.4 / 5 * 60 = 376.8 -> 377
        assert_eq!(estimate_travel_time(31.4, "walking"), "6h 17min");
    }

    #[test]
    fn under_an_hour_is_minutes_only() {
        assert_eq!(estimate_travel_time(9.29, "driving"), "19 min");
        assert_eq!(estimate_travel_time(4.9, "cycling"), "20 min");
    }

    #[test]
    fn unknown_mode_uses_fallback_speed() {
        // 10 km at 10 km/h
        assert_eq!(estimate_travel_time(10.0, "rollerblading"), "1h");
    }

    #[test]
    fn typed_and_named_estimates_agree() {
        for mode in TravelMode::ALL {
            assert_eq!(mode.estimate(12.3), estimate_travel_time(12.3, mode.as_str()));
        }
    }

    #[test]
    fn travel_times_cover_all_modes() {
        let times = TravelTimes::for_distance(10.0);
        assert_eq!(times.get(TravelMode::Driving), "20 min");
        assert_eq!(times.get(TravelMode::Walking), "2h");
        assert_eq!(times.get(TravelMode::Cycling), "40 min");
        assert_eq!(times.get(TravelMode::Transit), "30 min");
    }
}
