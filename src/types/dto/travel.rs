use serde::{Deserialize, Serialize};

use crate::types::model::{
    accommodation::AccommodationReport, itinerary::ItineraryDay, place::Place,
};

pub const DEFAULT_TRAVEL_MODE: &str = "Train";
pub const DEFAULT_ITINERARY_DAYS: u32 = 3;

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    pub destination: Option<String>,
    pub accommodation: Option<String>,
    pub travel_mode: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ItineraryRequest {
    pub destination: Option<String>,
    pub days: Option<DaysField>,
}

/// Browser form inputs send the day count as a string.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum DaysField {
    Number(i64),
    Text(String),
}

impl DaysField {
    pub fn as_count(&self) -> Option<i64> {
        match self {
            DaysField::Number(days) => Some(*days),
            DaysField::Text(days) => days.trim().parse().ok(),
        }
    }
}

/// Returns the trimmed value, or `None` when it is absent or blank.
pub fn non_blank(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

#[derive(Serialize, Debug)]
pub struct RecommendResponse {
    pub places: Vec<Place>,
    pub accommodation: AccommodationReport,
    pub transport: String,
}

#[derive(Serialize, Debug)]
pub struct ItineraryResponse {
    pub itinerary: Vec<ItineraryDay>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorBody {
    pub error: String,
}
