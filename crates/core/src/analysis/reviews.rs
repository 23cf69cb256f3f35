//! Review text reduction.
//!
//! `summarize` produces the evidence text handed to the opportunity generator.
//! The keyword helpers are an offline heuristic over the same reviews.

use crate::domain::Review;

const CLEANLINESS: &str = "Improve cleanliness standards based on guest feedback.";
const SERVICE: &str = "Enhance customer service quality.";
const COMFORT: &str = "Guests frequently mention comfort and spaciousness.";
const NOISE: &str = "Some guests have reported issues with noise.";

/// Joins review bodies with a single space, in review order.
pub fn summarize(reviews: &[Review]) -> String {
    reviews
        .iter()
        .map(|r| r.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Improvement suggestions triggered by issue keywords.
pub fn keyword_opportunities(reviews: &[Review]) -> Vec<String> {
    collect_themes(reviews, |text, out| {
        if text.contains("cleanliness") {
            out.push(CLEANLINESS);
        }
        if text.contains("service") {
            out.push(SERVICE);
        }
    })
}

/// Sentence describing recurring sentiment themes.
pub fn theme_summary(reviews: &[Review]) -> String {
    collect_themes(reviews, |text, out| {
        if text.contains("comfortable") || text.contains("spacious") {
            out.push(COMFORT);
        }
        if text.contains("noisy") || text.contains("noise") {
            out.push(NOISE);
        }
    })
    .join(" ")
}

/// Every theme string triggered by the reviews, deduplicated.
pub fn review_themes(reviews: &[Review]) -> Vec<String> {
    collect_themes(reviews, |text, out| {
        if text.contains("cleanliness") {
            out.push(CLEANLINESS);
        }
        if text.contains("service") {
            out.push(SERVICE);
        }
        if text.contains("comfortable") || text.contains("spacious") {
            out.push(COMFORT);
        }
        if text.contains("noisy") || text.contains("noise") {
            out.push(NOISE);
        }
    })
}

// First-seen order, no duplicates.
fn collect_themes(
    reviews: &[Review],
    mut scan: impl FnMut(&str, &mut Vec<&'static str>),
) -> Vec<String> {
    let mut hits = Vec::new();
    for review in reviews {
        scan(&review.text.to_lowercase(), &mut hits);
    }

    let mut out: Vec<String> = Vec::new();
    for hit in hits {
        if !out.iter().any(|s| s == hit) {
            out.push(hit.to_string());
        }
    }
    out
}
