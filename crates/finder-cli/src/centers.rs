//! `centers` command: load, filter, sort and print the center list.

use std::collections::HashMap;

use clap::Args;
use finder_client::{CenterSource, FinderClient, Geocoder, GoogleGeocoder};
use finder_core::{AppConfig, FinderSession, TravelTimes, UserLocation, Weekday};

use crate::render;

#[derive(Debug, Args)]
pub struct CentersArgs {
    /// Only show centers open on this day (repeatable: lundi..vendredi or monday..friday)
    #[arg(long = "day", value_name = "DAY")]
    pub days: Vec<Weekday>,

    /// Sort by distance from this address (needs a geocoder API key)
    #[arg(long, conflicts_with_all = ["lat", "lng"])]
    pub address: Option<String>,

    /// Latitude of the visitor's position
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude of the visitor's position
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Show estimated travel times (only with --address)
    #[arg(long)]
    pub travel: bool,

    /// Print JSON instead of text cards
    #[arg(long)]
    pub json: bool,
}

impl CentersArgs {
    fn position(&self) -> Option<UserLocation> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) => Some(UserLocation::new(lat, lng)),
            _ => None,
        }
    }
}

/// Prints the filtered and sorted center list.
///
/// A center list that cannot be fetched is replaced by the sample set with a
/// banner on stderr. A geocoding failure aborts the command with the alert
/// text a visitor would see.
///
/// # Errors
///
/// Returns an error if the address cannot be geocoded or JSON output fails.
pub(crate) async fn run_centers(
    config: &AppConfig,
    client: &FinderClient,
    args: &CentersArgs,
) -> anyhow::Result<()> {
    let loaded = client.load_centers_or_sample().await;
    if let CenterSource::Sample { reason } = &loaded.source {
        eprintln!("Liste des centres indisponible ({reason}); affichage des données d'exemple.");
    }

    let mut session = FinderSession::new(loaded.centers);
    session.set_days(args.days.iter().copied().collect());

    let token = session.begin_location_change();
    let location = match &args.address {
        Some(address) => Some(geocode_address(config, address).await?),
        None => args.position(),
    };
    if let Some(location) = location {
        session.resolve_location(token, location);
    }

    let travel: HashMap<String, TravelTimes> = if args.travel {
        if args.address.is_none() {
            eprintln!("Les temps de trajet nécessitent --address.");
        }
        session.travel_times().into_iter().collect()
    } else {
        HashMap::new()
    };

    let view = session.view();
    tracing::debug!(
        shown = view.len(),
        total = session.centers().len(),
        "center view computed"
    );

    if args.json {
        println!("{}", render::render_json(&view, &travel)?);
    } else {
        print!("{}", render::render_cards(&view, &travel));
    }
    Ok(())
}

async fn geocode_address(config: &AppConfig, address: &str) -> anyhow::Result<UserLocation> {
    let geocoder = GoogleGeocoder::new(config)?;
    match geocoder.geocode(address).await {
        Ok(location) => Ok(location),
        Err(err) => {
            tracing::warn!(address, error = %err, "address lookup failed");
            anyhow::bail!(err.user_message())
        }
    }
}
