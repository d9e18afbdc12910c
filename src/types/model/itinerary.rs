use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ItineraryDay {
    //1-based
    pub day: u32,
    pub activity: String,
    pub details: String,
}
