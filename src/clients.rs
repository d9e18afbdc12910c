use std::sync::Arc;

use color_eyre::eyre::Result;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

use crate::{
    accommodation::AccommodationFinder, config::Config, geocode::Geocoder, places::PlaceFinder,
    rate_gate::RateGate,
};

/// Upstream clients shared by all requests.
pub struct Clients {
    pub places: PlaceFinder,
    pub accommodations: AccommodationFinder,
    pub place_limit: usize,
    pub max_itinerary_days: u32,
}

pub type SharedClients = Arc<Clients>;

impl Clients {
    pub fn new(config: &Config) -> Result<Self> {
        let http = build_http_client(&config.user_agent)?;
        let gate = Arc::new(RateGate::new(config.geocode_interval));
        let geocoder = Arc::new(Geocoder::new(
            http.clone(),
            config.nominatim_url.clone(),
            gate,
        ));
        Ok(Self {
            places: PlaceFinder::new(http.clone(), config.wikivoyage_url.clone(), geocoder.clone()),
            accommodations: AccommodationFinder::new(http, config.overpass_url.clone(), geocoder),
            place_limit: config.place_limit,
            max_itinerary_days: config.max_itinerary_days,
        })
    }
}

/// Every upstream request identifies the service through its User-Agent.
pub fn build_http_client(user_agent: &str) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(USER_AGENT, HeaderValue::from_str(user_agent)?);
    Ok(reqwest::Client::builder()
        .default_headers(headers)
        .build()?)
}
