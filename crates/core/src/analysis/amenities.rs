use crate::domain::amenity::{AMENITY_RADIUS_METERS, MAX_AMENITIES_PER_CATEGORY};
use crate::domain::{
    Amenity, AmenityAnalysis, AmenityBucket, AmenityCategory, Highlight, Location, TopAmenity,
};
use crate::places::{GeoDirectory, PlaceCandidate};
use std::cmp::Ordering;

const STRONG_RATING: f64 = 4.0;
const THIN_CATEGORY: usize = 3;

/// Looks up every amenity category around `location`. Any failed category fails the scan.
pub async fn scan(directory: &dyn GeoDirectory, location: Location) -> anyhow::Result<AmenityBucket> {
    let lookups = AmenityCategory::ALL.into_iter().map(move |category| async move {
        let candidates = directory
            .nearby_of_category(location, AMENITY_RADIUS_METERS, category)
            .await?;
        anyhow::Ok((category, amenities_from_candidates(candidates)))
    });

    let bucket: AmenityBucket = futures::future::try_join_all(lookups)
        .await?
        .into_iter()
        .collect();
    Ok(bucket)
}

fn amenities_from_candidates(candidates: Vec<PlaceCandidate>) -> Vec<Amenity> {
    let mut amenities: Vec<Amenity> = candidates
        .into_iter()
        .take(MAX_AMENITIES_PER_CATEGORY)
        .map(|c| Amenity {
            name: c.name,
            rating: c.rating,
            user_ratings_total: c.user_ratings_total.unwrap_or(0),
            address: c.vicinity.or(c.formatted_address).unwrap_or_default(),
        })
        .collect();
    sort_by_rating_desc(&mut amenities);
    amenities
}

/// Stable sort, highest rating first, unrated last.
fn sort_by_rating_desc(amenities: &mut [Amenity]) {
    amenities.sort_by(|a, b| match (a.rating, b.rating) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Picks each category's top amenity and derives guest-facing recommendations.
pub fn analyze(bucket: &AmenityBucket) -> AmenityAnalysis {
    let mut analysis = AmenityAnalysis::default();

    for (category, amenities) in bucket {
        let mut ranked = amenities.clone();
        sort_by_rating_desc(&mut ranked);
        let Some(top) = ranked.first() else {
            continue;
        };
        let count = ranked.len();

        analysis.highlights.push(Highlight {
            category: *category,
            top_amenity: TopAmenity {
                name: top.name.clone(),
                rating: top.rating,
                address: top.address.clone(),
            },
            count_in_category: count,
        });

        if let Some(text) = recommendation(*category, top, count) {
            analysis.recommendations.push(text);
        }
    }

    analysis
}

// Both rules are checked per category, thin category first; at most one fires.
fn recommendation(category: AmenityCategory, top: &Amenity, count: usize) -> Option<String> {
    let label = category.as_str();
    if count < THIN_CATEGORY {
        return Some(format!(
            "Limited {label} options nearby ({count}); consider enhancing {label} offerings or promoting in-hotel equivalents."
        ));
    }
    match top.rating {
        Some(rating) if rating >= STRONG_RATING => Some(format!(
            "Highlight nearby {label} options to guests, led by {} (rated {rating}).",
            top.name
        )),
        _ => None,
    }
}
