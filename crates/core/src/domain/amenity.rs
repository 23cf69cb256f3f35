use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MAX_AMENITIES_PER_CATEGORY: usize = 5;
pub const AMENITY_RADIUS_METERS: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AmenityCategory {
    Food,
    Cafe,
    Attraction,
}

impl AmenityCategory {
    pub const ALL: [AmenityCategory; 3] = [
        AmenityCategory::Food,
        AmenityCategory::Cafe,
        AmenityCategory::Attraction,
    ];

    /// Directory place type used for nearby search.
    pub fn place_type(self) -> &'static str {
        match self {
            AmenityCategory::Food => "restaurant",
            AmenityCategory::Cafe => "cafe",
            AmenityCategory::Attraction => "tourist_attraction",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AmenityCategory::Food => "food",
            AmenityCategory::Cafe => "cafe",
            AmenityCategory::Attraction => "attraction",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Amenity {
    pub name: String,
    pub rating: Option<f64>,
    pub user_ratings_total: u32,
    pub address: String,
}

/// Amenities per category, every category present even when empty.
pub type AmenityBucket = BTreeMap<AmenityCategory, Vec<Amenity>>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TopAmenity {
    pub name: String,
    pub rating: Option<f64>,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub category: AmenityCategory,
    pub top_amenity: TopAmenity,
    pub count_in_category: usize,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AmenityAnalysis {
    pub highlights: Vec<Highlight>,
    pub recommendations: Vec<String>,
}
