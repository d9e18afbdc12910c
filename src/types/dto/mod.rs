pub mod geom;
pub mod nominatim;
pub mod travel;
