use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

pub const MAX_COMPETITORS: usize = 5;
pub const MAX_REVIEWS: usize = 3;
pub const MAX_OPPORTUNITIES: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// The subject hotel, resolved once per request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub name: String,
    pub place_id: String,
    pub location: Location,
}

/// Listing rating. Serializes as a number, or as `"N/A"` when the directory has none.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rating {
    Score(f64),
    Unrated,
}

impl From<Option<f64>> for Rating {
    fn from(v: Option<f64>) -> Self {
        v.map_or(Rating::Unrated, Rating::Score)
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Rating::Score(v) => serializer.serialize_f64(*v),
            Rating::Unrated => serializer.serialize_str("N/A"),
        }
    }
}

/// A guest review as returned by the directory's place details.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Review {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_time_description: Option<String>,
    #[serde(
        default,
        with = "chrono::serde::ts_seconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub time: Option<DateTime<Utc>>,
}

impl Review {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// A nearby lodging competitor.
///
/// Created from a nearby-search listing, then filled in by the enrichment
/// stages in order: details, review summary, opportunities.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    pub name: String,
    pub place_id: String,
    pub rating: Rating,
    pub user_ratings_total: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub latest_reviews: Vec<Review>,
    pub review_summary: String,
    pub opportunities: Vec<String>,
}

impl Competitor {
    pub fn new(name: String, place_id: String, rating: Rating, user_ratings_total: u32) -> Self {
        Self {
            name,
            place_id,
            rating,
            user_ratings_total,
            address: None,
            latest_reviews: Vec::new(),
            review_summary: String::new(),
            opportunities: Vec::new(),
        }
    }
}
