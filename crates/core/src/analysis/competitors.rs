use crate::domain::hotel::MAX_COMPETITORS;
use crate::domain::{Competitor, Location, Rating};
use crate::places::{GeoDirectory, PlaceCandidate, COMPETITOR_RADIUS_METERS};

/// Nearby lodging in provider relevance order, capped at five.
pub async fn find_competitors(
    directory: &dyn GeoDirectory,
    location: Location,
) -> anyhow::Result<Vec<Competitor>> {
    let candidates = directory
        .nearby_lodging(location, COMPETITOR_RADIUS_METERS)
        .await?;
    let total = candidates.len();

    let competitors: Vec<Competitor> = candidates
        .into_iter()
        .take(MAX_COMPETITORS)
        .map(competitor_from_candidate)
        .collect();

    tracing::debug!(total, kept = competitors.len(), "nearby lodging listed");
    Ok(competitors)
}

fn competitor_from_candidate(c: PlaceCandidate) -> Competitor {
    Competitor::new(
        c.name,
        c.place_id,
        Rating::from(c.rating),
        c.user_ratings_total.unwrap_or(0),
    )
}
