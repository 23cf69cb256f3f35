pub mod google;

use crate::domain::{AmenityCategory, Hotel, Location, Review};
use anyhow::Result;

pub const COMPETITOR_RADIUS_METERS: u32 = 2000;

/// A nearby-search listing before it is mapped to a competitor or amenity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaceCandidate {
    pub place_id: String,
    pub name: String,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    pub vicinity: Option<String>,
    pub formatted_address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PlaceDetails {
    pub address: Option<String>,
    pub rating: Option<f64>,
    /// At most three, in directory order.
    pub reviews: Vec<Review>,
}

/// Place search and place detail lookups against an external places directory.
///
/// All lookups are read-only. Transport failures are `PipelineError::UpstreamUnavailable`.
#[async_trait::async_trait]
pub trait GeoDirectory: Send + Sync {
    /// Resolves a lodging name to the first text-search hit.
    /// Fails with `PipelineError::NotFound` when there are no hits.
    async fn resolve(&self, name: &str) -> Result<Hotel>;

    async fn nearby_lodging(&self, location: Location, radius_m: u32)
        -> Result<Vec<PlaceCandidate>>;

    async fn nearby_of_category(
        &self,
        location: Location,
        radius_m: u32,
        category: AmenityCategory,
    ) -> Result<Vec<PlaceCandidate>>;

    /// Fails with `PipelineError::NotFound` when the directory has no result for `place_id`.
    async fn details(&self, place_id: &str) -> Result<PlaceDetails>;
}
