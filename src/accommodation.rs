use std::{sync::Arc, time::Duration};

use thiserror::Error;
use tracing::{error, info, instrument, warn};

use crate::{
    geocode::{GeocodeError, Geocoder},
    types::{
        dto::geom::PartialLatLng,
        model::accommodation::{Accommodation, AccommodationOutcome, AccommodationReport},
        overpass::{OverpassElement, OverpassResponse},
    },
};

pub const DEFAULT_CATEGORY: &str = "Hotel";
pub const SEARCH_RADIUS_METRES: u32 = 10_000;
pub const OVERPASS_TIMEOUT: Duration = Duration::from_secs(25);
pub const MAX_RESULTS: usize = 5;

/// OSM `tourism=*` values we search for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LodgingTag {
    Hotel,
    GuestHouse,
    Resort,
    Chalet,
    Motel,
    Hostel,
}

impl LodgingTag {
    pub fn osm_value(self) -> &'static str {
        match self {
            LodgingTag::Hotel => "hotel",
            LodgingTag::GuestHouse => "guest_house",
            LodgingTag::Resort => "resort",
            LodgingTag::Chalet => "chalet",
            LodgingTag::Motel => "motel",
            LodgingTag::Hostel => "hostel",
        }
    }
}

/// A user-facing lodging category and the tag it maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    label: String,
    tag: LodgingTag,
    recognized: bool,
}

impl Category {
    /// Blank or absent input is the explicit default, "Hotel". Unknown input
    /// keeps its label but searches for hotels.
    pub fn parse(raw: Option<&str>) -> Self {
        let label = match raw.map(str::trim) {
            Some(label) if !label.is_empty() => label,
            _ => DEFAULT_CATEGORY,
        };
        let key: String = label
            .chars()
            .filter(|c| !matches!(c, ' ' | '&' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        let tag = match key.as_str() {
            "hotel" => Some(LodgingTag::Hotel),
            "guesthouse" => Some(LodgingTag::GuestHouse),
            "resort" => Some(LodgingTag::Resort),
            "bedbreakfast" => Some(LodgingTag::GuestHouse),
            "villa" => Some(LodgingTag::Chalet),
            "motel" => Some(LodgingTag::Motel),
            "homestay" => Some(LodgingTag::GuestHouse),
            "hostel" => Some(LodgingTag::Hostel),
            _ => None,
        };
        Self {
            label: label.to_string(),
            tag: tag.unwrap_or(LodgingTag::Hotel),
            recognized: tag.is_some(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn tag(&self) -> LodgingTag {
        self.tag
    }

    pub fn is_recognized(&self) -> bool {
        self.recognized
    }
}

#[derive(Debug, Error)]
pub enum AccommodationError {
    #[error(transparent)]
    Geocode(#[from] GeocodeError),
    #[error("{0}")]
    Overpass(#[from] reqwest::Error),
}

/// Finds lodging near a destination through the Overpass API.
pub struct AccommodationFinder {
    client: reqwest::Client,
    overpass_url: String,
    geocoder: Arc<Geocoder>,
}

impl AccommodationFinder {
    pub fn new(client: reqwest::Client, overpass_url: String, geocoder: Arc<Geocoder>) -> Self {
        Self {
            client,
            overpass_url,
            geocoder,
        }
    }

    /// Never fails: any error, or an empty result, is reported as a degraded
    /// outcome carrying the reason.
    #[instrument(skip(self, category), fields(category = category.label()))]
    pub async fn find_accommodations(
        &self,
        destination: &str,
        category: &Category,
    ) -> AccommodationReport {
        if !category.is_recognized() {
            warn!(
                "Unrecognized accommodation type {:?}, searching for hotels",
                category.label()
            );
        }
        let plural = format!("{}s", category.label().to_lowercase());
        let outcome = match self.search(destination, category).await {
            Ok(elements) if elements.is_empty() => AccommodationOutcome::Degraded {
                reason: format!("No {plural} found near {destination}."),
            },
            Ok(elements) => {
                info!(found = elements.len(), "accommodations found");
                AccommodationOutcome::Found(
                    elements
                        .iter()
                        .take(MAX_RESULTS)
                        .map(|element| to_accommodation(element, category))
                        .collect(),
                )
            }
            Err(e) => {
                error!("Failed to fetch accommodations for {destination}: {e}");
                AccommodationOutcome::Degraded {
                    reason: format!("Failed to fetch {plural}: {e}"),
                }
            }
        };
        AccommodationReport {
            destination: destination.to_string(),
            category: category.label().to_string(),
            outcome,
        }
    }

    async fn search(
        &self,
        destination: &str,
        category: &Category,
    ) -> Result<Vec<OverpassElement>, AccommodationError> {
        let center = self.geocoder.geocode(destination).await?;
        let query = overpass_query(category.tag(), center.y(), center.x());
        Ok(self
            .client
            .post(&self.overpass_url)
            .form(&[("data", query.as_str())])
            .timeout(OVERPASS_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json::<OverpassResponse>()
            .await?
            .elements)
    }
}

pub fn overpass_query(tag: LodgingTag, lat: f64, lon: f64) -> String {
    let tag = tag.osm_value();
    let timeout = OVERPASS_TIMEOUT.as_secs();
    let radius = SEARCH_RADIUS_METRES;
    format!(
        r#"
        [out:json][timeout:{timeout}];
        (
          node["tourism"="{tag}"](around:{radius},{lat},{lon});
          way["tourism"="{tag}"](around:{radius},{lat},{lon});
        );
        out center;
        "#
    )
}

fn to_accommodation(element: &OverpassElement, category: &Category) -> Accommodation {
    Accommodation {
        name: element
            .tag("name")
            .map(String::from)
            .unwrap_or_else(|| format!("Unnamed {}", category.label())),
        kind: category.label().to_string(),
        description: element
            .tag("addr:full")
            .or_else(|| element.tag("addr:street"))
            .unwrap_or("Address unavailable")
            .to_string(),
        location: PartialLatLng::from(element.point()),
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, sync::Mutex};

    use axum::{http::StatusCode, routing::get, routing::post, Form, Json, Router};
    use serde_json::{json, Value};

    use super::*;
    use crate::{rate_gate::RateGate, test_support::serve};

    fn finder(base_url: &str) -> AccommodationFinder {
        let client = reqwest::Client::new();
        let geocoder = Geocoder::new(
            client.clone(),
            format!("{base_url}/search"),
            Arc::new(RateGate::new(Duration::ZERO)),
        );
        AccommodationFinder::new(
            client,
            format!("{base_url}/api/interpreter"),
            Arc::new(geocoder),
        )
    }

    fn nominatim() -> Router {
        Router::new().route(
            "/search",
            get(|| async { Json(json!([{"lat": "41.8933", "lon": "12.4829"}])) }),
        )
    }

    /// Serves `elements` from Overpass and records every submitted query.
    fn overpass(elements: Value, queries: Arc<Mutex<Vec<String>>>) -> Router {
        nominatim().route(
            "/api/interpreter",
            post(move |Form(form): Form<HashMap<String, String>>| {
                let elements = elements.clone();
                let queries = queries.clone();
                async move {
                    queries
                        .lock()
                        .unwrap()
                        .push(form.get("data").cloned().unwrap_or_default());
                    Json(json!({"version": 0.6, "elements": elements}))
                }
            }),
        )
    }

    #[test]
    fn categories_map_to_osm_tags() {
        let cases = [
            ("Hotel", LodgingTag::Hotel),
            ("guesthouse", LodgingTag::GuestHouse),
            ("Guest House", LodgingTag::GuestHouse),
            ("RESORT", LodgingTag::Resort),
            ("Bed & Breakfast", LodgingTag::GuestHouse),
            ("Villa", LodgingTag::Chalet),
            ("Motel", LodgingTag::Motel),
            ("Homestay", LodgingTag::GuestHouse),
            ("Hostel", LodgingTag::Hostel),
        ];
        for (raw, tag) in cases {
            let category = Category::parse(Some(raw));
            assert_eq!(category.tag(), tag, "{raw}");
            assert!(category.is_recognized(), "{raw}");
            assert_eq!(category.label(), raw);
        }
    }

    #[test]
    fn unmapped_category_falls_back_to_hotel() {
        let category = Category::parse(Some("Treehouse"));
        assert_eq!(category.tag(), LodgingTag::Hotel);
        assert!(!category.is_recognized());
        assert_eq!(category.label(), "Treehouse");
    }

    #[test]
    fn blank_category_is_the_hotel_default() {
        for raw in [None, Some(""), Some("   ")] {
            let category = Category::parse(raw);
            assert_eq!(category.label(), "Hotel");
            assert_eq!(category.tag(), LodgingTag::Hotel);
            assert!(category.is_recognized());
        }
    }

    #[test]
    fn query_targets_tag_within_radius() {
        let query = overpass_query(LodgingTag::GuestHouse, 41.9, 12.5);
        assert!(query.contains("[out:json][timeout:25]"));
        assert!(query.contains(r#"node["tourism"="guest_house"](around:10000,41.9,12.5)"#));
        assert!(query.contains(r#"way["tourism"="guest_house"](around:10000,41.9,12.5)"#));
        assert!(query.contains("out center;"));
    }

    #[tokio::test]
    async fn unmapped_category_queries_hotels() {
        let queries = Arc::new(Mutex::new(Vec::new()));
        let base_url = serve(overpass(json!([]), queries.clone())).await;

        finder(&base_url)
            .find_accommodations("Rome", &Category::parse(Some("Igloo")))
            .await;
        let queries = queries.lock().unwrap();
        assert_eq!(queries.len(), 1);
        assert!(queries[0].contains(r#""tourism"="hotel""#));
    }

    #[tokio::test]
    async fn at_most_five_results_are_returned() {
        let elements: Vec<Value> = (0..8)
            .map(|i| {
                json!({
                    "type": "node",
                    "id": i,
                    "lat": 41.9 + i as f64 / 100.0,
                    "lon": 12.5,
                    "tags": {"name": format!("Hotel {i}"), "tourism": "hotel"}
                })
            })
            .collect();
        let base_url = serve(overpass(Value::from(elements), Default::default())).await;

        let report = finder(&base_url)
            .find_accommodations("Rome", &Category::parse(None))
            .await;
        let names: Vec<_> = report.listings().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Hotel 0", "Hotel 1", "Hotel 2", "Hotel 3", "Hotel 4"]);
    }

    #[tokio::test]
    async fn listings_fall_back_for_missing_tags_and_use_way_centers() {
        let elements = json!([
            {
                "type": "node", "id": 1, "lat": 41.9, "lon": 12.49,
                "tags": {"name": "Albergo del Senato", "addr:street": "Piazza della Rotonda", "addr:full": "Piazza della Rotonda 73, Roma"}
            },
            {
                "type": "way", "id": 2, "center": {"lat": 41.91, "lon": 12.48},
                "nodes": [10, 11, 12],
                "tags": {"addr:street": "Via Veneto"}
            },
            {"type": "way", "id": 3}
        ]);
        let base_url = serve(overpass(elements, Default::default())).await;

        let report = finder(&base_url)
            .find_accommodations("Rome", &Category::parse(Some("Villa")))
            .await;
        let listings = report.listings();
        assert_eq!(listings.len(), 3);
        assert_eq!(listings[0].description, "Piazza della Rotonda 73, Roma");
        assert_eq!(listings[0].kind, "Villa");
        assert_eq!(listings[1].name, "Unnamed Villa");
        assert_eq!(listings[1].description, "Via Veneto");
        assert_eq!(
            listings[1].location,
            PartialLatLng {
                lat: Some(41.91),
                lon: Some(12.48)
            }
        );
        assert_eq!(listings[2].description, "Address unavailable");
        assert_eq!(listings[2].location, PartialLatLng::unknown());
    }

    #[tokio::test]
    async fn no_results_is_degraded() {
        let base_url = serve(overpass(json!([]), Default::default())).await;

        let report = finder(&base_url)
            .find_accommodations("Rome", &Category::parse(Some("Motel")))
            .await;
        assert_eq!(report.degraded_reason(), Some("No motels found near Rome."));
        assert_eq!(report.destination, "Rome");
        assert_eq!(report.category, "Motel");
    }

    #[tokio::test]
    async fn geocode_failure_is_degraded() {
        let router = Router::new().route("/search", get(|| async { Json(json!([])) }));
        let base_url = serve(router).await;

        let report = finder(&base_url)
            .find_accommodations("Atlantis", &Category::parse(None))
            .await;
        assert_eq!(
            report.degraded_reason(),
            Some("Failed to fetch hotels: No coordinates found for Atlantis")
        );
    }

    #[tokio::test]
    async fn overpass_failure_is_degraded() {
        let router = nominatim().route(
            "/api/interpreter",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "rate limited") }),
        );
        let base_url = serve(router).await;

        let report = finder(&base_url)
            .find_accommodations("Rome", &Category::parse(Some("Resort")))
            .await;
        let reason = report.degraded_reason().unwrap();
        assert!(reason.starts_with("Failed to fetch resorts: "), "{reason}");
        assert!(report.listings().is_empty());
    }
}
