use thiserror::Error;

use crate::types::model::{itinerary::ItineraryDay, place::Place};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ItineraryError {
    #[error("Cannot build an itinerary without any places")]
    NoPlaces,
}

/// Plans one place per day, cycling through `places` when there are more
/// days than places.
pub fn build_itinerary(places: &[Place], days: u32) -> Result<Vec<ItineraryDay>, ItineraryError> {
    if places.is_empty() {
        return Err(ItineraryError::NoPlaces);
    }
    Ok(places
        .iter()
        .cycle()
        .zip(1..=days)
        .map(|(place, day)| ItineraryDay {
            day,
            activity: format!("Visit {}", place.name),
            details: place.description.clone(),
        })
        .collect())
}
