use serde::{ser::SerializeSeq, Serialize, Serializer};

use crate::types::dto::geom::PartialLatLng;

#[derive(Debug, Clone, PartialEq)]
pub struct Accommodation {
    pub name: String,
    //Requested category label, for display
    pub kind: String,
    //Address, or "Address unavailable"
    pub description: String,
    pub location: PartialLatLng,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AccommodationOutcome {
    Found(Vec<Accommodation>),
    Degraded { reason: String },
}

/// Result of an accommodation lookup for one destination and category.
///
/// Serializes as a JSON array. A degraded outcome becomes a single record
/// named after the destination with null coordinates and a `reason` field.
#[derive(Debug, Clone, PartialEq)]
pub struct AccommodationReport {
    pub destination: String,
    pub category: String,
    pub outcome: AccommodationOutcome,
}

impl AccommodationReport {
    pub fn listings(&self) -> &[Accommodation] {
        match &self.outcome {
            AccommodationOutcome::Found(listings) => listings,
            AccommodationOutcome::Degraded { .. } => &[],
        }
    }

    pub fn degraded_reason(&self) -> Option<&str> {
        match &self.outcome {
            AccommodationOutcome::Found(_) => None,
            AccommodationOutcome::Degraded { reason } => Some(reason),
        }
    }
}

#[derive(Serialize)]
struct AccommodationRecord<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    kind: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(flatten)]
    location: PartialLatLng,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<&'a str>,
}

impl<'a> From<&'a Accommodation> for AccommodationRecord<'a> {
    fn from(value: &'a Accommodation) -> Self {
        AccommodationRecord {
            name: &value.name,
            kind: &value.kind,
            description: Some(&value.description),
            location: value.location,
            reason: None,
        }
    }
}

impl Serialize for AccommodationReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match &self.outcome {
            AccommodationOutcome::Found(listings) => {
                serializer.collect_seq(listings.iter().map(AccommodationRecord::from))
            }
            AccommodationOutcome::Degraded { reason } => {
                let mut seq = serializer.serialize_seq(Some(1))?;
                seq.serialize_element(&AccommodationRecord {
                    name: &self.destination,
                    kind: &self.category,
                    description: None,
                    location: PartialLatLng::unknown(),
                    reason: Some(reason),
                })?;
                seq.end()
            }
        }
    }
}
