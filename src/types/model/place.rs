use serde::Serialize;

use crate::types::dto::geom::PartialLatLng;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Place {
    pub name: String,
    pub description: String,
    #[serde(flatten)]
    pub location: PartialLatLng,
}

impl Place {
    /// A place with no known location, used for placeholders.
    pub fn unlocated(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            location: PartialLatLng::unknown(),
        }
    }
}
