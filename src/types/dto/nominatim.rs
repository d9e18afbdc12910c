use serde::{Deserialize, Serialize};

/// One candidate from the Nominatim `/search` endpoint with `format=json`.
/// Nominatim encodes coordinates as strings.
#[derive(Serialize, Deserialize, Debug)]
pub struct NominatimSearchResult {
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub display_name: Option<String>,
}
