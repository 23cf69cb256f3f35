use crate::config::Settings;
use crate::domain::hotel::MAX_REVIEWS;
use crate::domain::{AmenityCategory, Hotel, Location, Review};
use crate::error::PipelineError;
use crate::places::{GeoDirectory, PlaceCandidate, PlaceDetails};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const SERVICE: &str = "places";
const LODGING_TYPE: &str = "lodging";
const DETAIL_FIELDS: &str = "name,rating,reviews,formatted_address";

#[derive(Debug, Clone)]
pub struct GooglePlacesClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GooglePlacesClient {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let api_key = settings.require_places_api_key()?.to_string();
        let base_url = settings
            .places_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_secs = settings.places_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build places http client")?;

        Ok(Self {
            http,
            base_url,
            api_key,
        })
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}/json", self.base_url.trim_end_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let res = self
            .http
            .get(self.url(endpoint))
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| transport_error(endpoint, "request failed", e))?;

        let status = res.status();
        let text = res
            .text()
            .await
            .map_err(|e| transport_error(endpoint, "body read failed", e))?;

        if !status.is_success() {
            return Err(PipelineError::upstream(SERVICE, format!("{endpoint} HTTP {status}: {text}")).into());
        }

        let parsed = serde_json::from_str::<T>(&text).map_err(|e| {
            PipelineError::upstream(SERVICE, format!("{endpoint} response is not valid JSON: {e}"))
        })?;
        Ok(parsed)
    }

    async fn nearby(
        &self,
        location: Location,
        radius_m: u32,
        place_type: &str,
    ) -> Result<Vec<PlaceCandidate>> {
        let resp: SearchResponse = self
            .get_json("nearbysearch", &nearby_params(location, radius_m, place_type))
            .await?;
        candidates_from_search(resp)
    }
}

#[async_trait::async_trait]
impl GeoDirectory for GooglePlacesClient {
    async fn resolve(&self, name: &str) -> Result<Hotel> {
        let resp: SearchResponse = self
            .get_json("textsearch", &text_search_params(name))
            .await?;
        hotel_from_search(resp)
    }

    async fn nearby_lodging(
        &self,
        location: Location,
        radius_m: u32,
    ) -> Result<Vec<PlaceCandidate>> {
        self.nearby(location, radius_m, LODGING_TYPE).await
    }

    async fn nearby_of_category(
        &self,
        location: Location,
        radius_m: u32,
        category: AmenityCategory,
    ) -> Result<Vec<PlaceCandidate>> {
        self.nearby(location, radius_m, category.place_type()).await
    }

    async fn details(&self, place_id: &str) -> Result<PlaceDetails> {
        let resp: DetailsResponse = self
            .get_json("details", &details_params(place_id))
            .await?;
        details_from_response(resp, place_id)
    }
}

// The request URL carries the API key, so it never goes into the message.
fn transport_error(endpoint: &str, what: &str, e: reqwest::Error) -> PipelineError {
    PipelineError::upstream(SERVICE, format!("{endpoint} {what}: {}", e.without_url()))
}

fn text_search_params(name: &str) -> Vec<(&'static str, String)> {
    vec![
        ("query", name.to_string()),
        ("type", LODGING_TYPE.to_string()),
    ]
}

fn nearby_params(location: Location, radius_m: u32, place_type: &str) -> Vec<(&'static str, String)> {
    vec![
        (
            "location",
            format!("{},{}", location.latitude, location.longitude),
        ),
        ("radius", radius_m.to_string()),
        ("type", place_type.to_string()),
    ]
}

fn details_params(place_id: &str) -> Vec<(&'static str, String)> {
    vec![
        ("place_id", place_id.to_string()),
        ("fields", DETAIL_FIELDS.to_string()),
    ]
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    name: String,
    #[serde(default)]
    place_id: String,
    #[serde(default)]
    geometry: Option<Geometry>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    user_ratings_total: Option<u32>,
    #[serde(default)]
    vicinity: Option<String>,
    #[serde(default)]
    formatted_address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

#[derive(Debug, Deserialize)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    result: Option<DetailsResult>,
}

#[derive(Debug, Deserialize)]
struct DetailsResult {
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    reviews: Vec<Review>,
}

// OK, ZERO_RESULTS and NOT_FOUND describe the data; every other status is a
// provider-side refusal or failure.
fn check_status(status: Option<&str>, error_message: Option<&str>) -> Result<()> {
    match status {
        None | Some("OK") | Some("ZERO_RESULTS") | Some("NOT_FOUND") => Ok(()),
        Some(other) => {
            let detail = match error_message {
                Some(msg) => format!("status={other}: {msg}"),
                None => format!("status={other}"),
            };
            Err(PipelineError::upstream(SERVICE, detail).into())
        }
    }
}

fn hotel_from_search(resp: SearchResponse) -> Result<Hotel> {
    check_status(resp.status.as_deref(), resp.error_message.as_deref())?;

    let first = resp
        .results
        .into_iter()
        .next()
        .ok_or_else(|| PipelineError::NotFound("Hotel not found".to_string()))?;

    let geometry = first.geometry.ok_or_else(|| {
        PipelineError::upstream(SERVICE, format!("text search hit {} has no geometry", first.place_id))
    })?;

    Ok(Hotel {
        name: first.name,
        place_id: first.place_id,
        location: Location {
            latitude: geometry.location.lat,
            longitude: geometry.location.lng,
        },
    })
}

fn candidates_from_search(resp: SearchResponse) -> Result<Vec<PlaceCandidate>> {
    check_status(resp.status.as_deref(), resp.error_message.as_deref())?;

    Ok(resp
        .results
        .into_iter()
        .map(|r| PlaceCandidate {
            place_id: r.place_id,
            name: r.name,
            rating: r.rating,
            user_ratings_total: r.user_ratings_total,
            vicinity: r.vicinity,
            formatted_address: r.formatted_address,
        })
        .collect())
}

fn details_from_response(resp: DetailsResponse, place_id: &str) -> Result<PlaceDetails> {
    check_status(resp.status.as_deref(), resp.error_message.as_deref())?;

    let result = resp
        .result
        .ok_or_else(|| PipelineError::NotFound(format!("No details found for place {place_id}")))?;

    let mut reviews = result.reviews;
    reviews.truncate(MAX_REVIEWS);

    Ok(PlaceDetails {
        address: result.formatted_address,
        rating: result.rating,
        reviews,
    })
}
