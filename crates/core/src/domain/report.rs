use crate::domain::amenity::{AmenityAnalysis, AmenityBucket};
use crate::domain::hotel::{Competitor, Hotel};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BasicReport {
    pub hotel: Hotel,
    pub competitors: Vec<Competitor>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedReport {
    pub hotel: Hotel,
    pub competitors: Vec<Competitor>,
    pub nearby_amenities: AmenityBucket,
    pub amenities_analysis: AmenityAnalysis,
}
