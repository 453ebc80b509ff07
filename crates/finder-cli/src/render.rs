//! Text and JSON rendering of the center list.

use std::collections::HashMap;
use std::fmt::Write as _;

use finder_core::{CenterRecord, TravelMode, TravelTimes, ViewEntry};
use serde::Serialize;

pub(crate) const NO_RESULTS: &str =
    "Aucun centre trouvé. Essayez de modifier vos critères de recherche.";

fn mode_label(mode: TravelMode) -> &'static str {
    match mode {
        TravelMode::Driving => "Voiture",
        TravelMode::Walking => "À pied",
        TravelMode::Cycling => "Vélo",
        TravelMode::Transit => "Transport",
    }
}

/// One text card per center, separated by blank lines.
pub(crate) fn render_cards(view: &[ViewEntry<'_>], travel: &HashMap<String, TravelTimes>) -> String {
    if view.is_empty() {
        return format!("{NO_RESULTS}\n");
    }

    let mut out = String::new();
    for (idx, entry) in view.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        // Writing to a String cannot fail.
        let _ = render_card(&mut out, entry.center, entry.distance_km, travel.get(&entry.center.id));
    }
    out
}

fn render_card(
    out: &mut String,
    center: &CenterRecord,
    distance_km: Option<f64>,
    travel: Option<&TravelTimes>,
) -> std::fmt::Result {
    match distance_km {
        Some(km) => writeln!(out, "{}  ({km:.1} km)", center.name)?,
        None => writeln!(out, "{}", center.name)?,
    }
    if !center.city.is_empty() {
        writeln!(out, "  {}", center.city)?;
    }
    writeln!(out, "  {}", center.address)?;
    writeln!(out, "  [{}]  id: {}", center.specialties.join(", "), center.id)?;

    let days: Vec<&str> = center.available_days().map(|d| d.label()).collect();
    if days.is_empty() {
        writeln!(out, "  Aucune vacation disponible")?;
    } else {
        writeln!(out, "  Vacations disponibles : {}", days.join(", "))?;
    }

    if let Some(times) = travel {
        let parts: Vec<String> = TravelMode::ALL
            .iter()
            .map(|&mode| format!("{} {}", mode_label(mode), times.get(mode)))
            .collect();
        writeln!(out, "  Temps de trajet : {}", parts.join(" | "))?;
    }
    if !center.doctolib_url.is_empty() {
        writeln!(out, "  Doctolib : {}", center.doctolib_url)?;
    }
    if !center.google_review_url.is_empty() {
        writeln!(out, "  Avis Google : {}", center.google_review_url)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct CenterJson<'a> {
    #[serde(flatten)]
    center: &'a CenterRecord,
    distance_km: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    travel_times: Option<&'a TravelTimes>,
}

/// The view as a pretty-printed JSON array, in display order.
pub(crate) fn render_json(
    view: &[ViewEntry<'_>],
    travel: &HashMap<String, TravelTimes>,
) -> serde_json::Result<String> {
    let rows: Vec<CenterJson<'_>> = view
        .iter()
        .map(|entry| CenterJson {
            center: entry.center,
            distance_km: entry.distance_km,
            travel_times: travel.get(&entry.center.id),
        })
        .collect();
    serde_json::to_string_pretty(&rows)
}
