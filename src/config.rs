use std::{net::SocketAddr, str::FromStr, time::Duration};

use color_eyre::eyre::{eyre, Result};

pub const DEFAULT_USER_AGENT: &str = "TravelPlannerApp/1.0 (contact: your-email@example.com)";

/// Runtime settings, read from `TRAVEL_ADVISOR_*` environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub nominatim_url: String,
    pub wikivoyage_url: String,
    pub overpass_url: String,
    pub user_agent: String,
    pub geocode_interval: Duration,
    pub place_limit: usize,
    pub max_itinerary_days: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            nominatim_url: String::from("https://nominatim.openstreetmap.org/search"),
            wikivoyage_url: String::from("https://en.wikivoyage.org/w/api.php"),
            overpass_url: String::from("https://overpass-api.de/api/interpreter"),
            user_agent: String::from(DEFAULT_USER_AGENT),
            geocode_interval: Duration::from_secs(1),
            place_limit: 10,
            max_itinerary_days: 365,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            bind_addr: parse_var(&lookup, "TRAVEL_ADVISOR_BIND_ADDR")?
                .unwrap_or(defaults.bind_addr),
            nominatim_url: lookup("TRAVEL_ADVISOR_NOMINATIM_URL")
                .unwrap_or(defaults.nominatim_url),
            wikivoyage_url: lookup("TRAVEL_ADVISOR_WIKIVOYAGE_URL")
                .unwrap_or(defaults.wikivoyage_url),
            overpass_url: lookup("TRAVEL_ADVISOR_OVERPASS_URL").unwrap_or(defaults.overpass_url),
            user_agent: lookup("TRAVEL_ADVISOR_USER_AGENT").unwrap_or(defaults.user_agent),
            geocode_interval: parse_var::<u64>(&lookup, "TRAVEL_ADVISOR_GEOCODE_INTERVAL_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.geocode_interval),
            place_limit: parse_var(&lookup, "TRAVEL_ADVISOR_PLACE_LIMIT")?
                .unwrap_or(defaults.place_limit),
            max_itinerary_days: parse_var(&lookup, "TRAVEL_ADVISOR_MAX_ITINERARY_DAYS")?
                .unwrap_or(defaults.max_itinerary_days),
        })
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    lookup(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| eyre!("Invalid value {raw:?} for {key}: {e}"))
        })
        .transpose()
}
