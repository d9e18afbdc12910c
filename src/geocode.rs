use std::{num::ParseFloatError, sync::Arc, time::Duration};

use geo_types::Point;
use thiserror::Error;
use tracing::{debug, error, instrument};

use crate::{rate_gate::RateGate, types::dto::nominatim::NominatimSearchResult};

pub const GEOCODE_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("No coordinates found for {0}")]
    NotFound(String),
    #[error("{0}")]
    Upstream(#[from] reqwest::Error),
    #[error("Malformed coordinate in geocoding response: {0}")]
    MalformedCoordinate(#[from] ParseFloatError),
}

impl GeocodeError {
    /// True when Nominatim answered but had nothing for the query.
    pub fn is_no_match(&self) -> bool {
        matches!(self, GeocodeError::NotFound(_))
    }
}

/// Forward geocoding through Nominatim. Every lookup passes through the
/// shared rate gate.
pub struct Geocoder {
    client: reqwest::Client,
    search_url: String,
    gate: Arc<RateGate>,
}

impl Geocoder {
    pub fn new(client: reqwest::Client, search_url: String, gate: Arc<RateGate>) -> Self {
        Self {
            client,
            search_url,
            gate,
        }
    }

    /// Resolves `query` to a point (x = lon, y = lat).
    #[instrument(skip(self))]
    pub async fn geocode(&self, query: &str) -> Result<Point, GeocodeError> {
        let result = self.gate.run(self.search(query)).await;
        let point = result.and_then(|candidates| {
            let first = candidates
                .into_iter()
                .next()
                .ok_or_else(|| GeocodeError::NotFound(query.to_string()))?;
            let lat: f64 = first.lat.parse()?;
            let lon: f64 = first.lon.parse()?;
            Ok(Point::new(lon, lat))
        });
        match &point {
            Ok(point) => debug!(lat = point.y(), lon = point.x(), "geocoded"),
            Err(e) if e.is_no_match() => debug!("{e}"),
            Err(e) => error!("Nominatim geocoding failed for {query}: {e}"),
        }
        point
    }

    async fn search(&self, query: &str) -> Result<Vec<NominatimSearchResult>, GeocodeError> {
        Ok(self
            .client
            .get(&self.search_url)
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .timeout(GEOCODE_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<NominatimSearchResult>>()
            .await?)
    }
}
