pub mod dto;
pub mod model;
pub mod overpass;
pub mod wikivoyage;
