use std::collections::HashMap;

use geo_types::Point;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<OverpassElement>,
}

#[derive(Serialize, Deserialize)]
pub struct OverpassElement {
    #[serde(rename = "type")]
    pub element_type: String,
    pub id: i64,
    //Only nodes carry lat/lon directly
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    //Ways get a center with `out center`
    pub center: Option<OverpassCoord>,
    #[serde(default)]
    pub tags: HashMap<String, String>,
}

#[derive(Serialize, Deserialize)]
pub struct OverpassCoord {
    pub lat: f64,
    pub lon: f64,
}

impl OverpassElement {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    pub fn point(&self) -> Option<Point> {
        match (self.lat, self.lon, &self.center) {
            (Some(lat), Some(lon), _) => Some(Point::new(lon, lat)),
            (_, _, Some(center)) => Some(Point::new(center.lon, center.lat)),
            _ => None,
        }
    }
}
