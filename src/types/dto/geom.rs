use geo_types::Point;
use serde::Serialize;

/// Coordinates as they appear in responses. Both are null when the location is unknown.
#[derive(Serialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct PartialLatLng {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

impl PartialLatLng {
    pub fn unknown() -> Self {
        Self::default()
    }
}

// Points are stored x = lon, y = lat
impl From<Option<Point>> for PartialLatLng {
    fn from(value: Option<Point>) -> Self {
        match value {
            Some(point) => PartialLatLng {
                lat: Some(point.y()),
                lon: Some(point.x()),
            },
            None => PartialLatLng::unknown(),
        }
    }
}
