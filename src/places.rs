use std::{sync::Arc, time::Duration};

use futures::{stream, StreamExt};
use scraper::Html;
use tracing::{info, instrument, warn};

use crate::{
    geocode::Geocoder,
    types::{
        dto::geom::PartialLatLng,
        model::place::Place,
        wikivoyage::{WikiSearchHit, WikiSearchResponse},
    },
};

pub const SEARCH_TIMEOUT: Duration = Duration::from_secs(10);
//Geocodes still go one at a time through the rate gate
const GEOCODE_CONCURRENCY: usize = 4;

/// Finds points of interest for a destination through Wikivoyage search.
pub struct PlaceFinder {
    client: reqwest::Client,
    search_url: String,
    geocoder: Arc<Geocoder>,
}

impl PlaceFinder {
    pub fn new(client: reqwest::Client, search_url: String, geocoder: Arc<Geocoder>) -> Self {
        Self {
            client,
            search_url,
            geocoder,
        }
    }

    /// Never fails: search failures and empty results come back as a single
    /// placeholder place with no location.
    #[instrument(skip(self))]
    pub async fn find_places(&self, destination: &str, limit: usize) -> Vec<Place> {
        let hits = match self.search(destination, limit).await {
            Ok(hits) => hits,
            Err(e) => {
                warn!("Wikivoyage search failed for {destination}: {e}");
                return vec![Place::unlocated(
                    "Error",
                    format!("Failed to fetch places: {e}"),
                )];
            }
        };
        if hits.is_empty() {
            return vec![Place::unlocated(
                destination,
                format!("Sorry, no attractions found for {destination}."),
            )];
        }
        info!(hits = hits.len(), "geocoding places");

        stream::iter(hits)
            .map(|hit| async move {
                let point = self
                    .geocoder
                    .geocode(&format!("{}, {destination}", hit.title))
                    .await
                    .ok();
                Place {
                    description: clean_snippet(&hit.snippet),
                    name: hit.title,
                    location: PartialLatLng::from(point),
                }
            })
            .buffered(GEOCODE_CONCURRENCY)
            .collect()
            .await
    }

    async fn search(&self, destination: &str, limit: usize) -> reqwest::Result<Vec<WikiSearchHit>> {
        let query = format!("{destination} attractions OR landmarks OR sightseeing");
        let limit = limit.to_string();
        Ok(self
            .client
            .get(&self.search_url)
            .query(&[
                ("action", "query"),
                ("list", "search"),
                ("srsearch", query.as_str()),
                ("srlimit", limit.as_str()),
                ("format", "json"),
            ])
            .timeout(SEARCH_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json::<WikiSearchResponse>()
            .await?
            .into_hits())
    }
}

/// Turns a search snippet into plain text: entities are unescaped and tags
/// dropped.
pub fn clean_snippet(snippet: &str) -> String {
    if snippet.is_empty() {
        return String::from("No description");
    }
    Html::parse_fragment(snippet).root_element().text().collect()
}
