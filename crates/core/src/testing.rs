//! In-memory collaborators for pipeline tests.

use crate::domain::{AmenityCategory, Hotel, Location};
use crate::error::PipelineError;
use crate::llm::{CompletionRequest, TextGenerator};
use crate::places::{GeoDirectory, PlaceCandidate, PlaceDetails};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

// Shared by every fake so calls across collaborators can be ordered.
static CLOCK: AtomicU64 = AtomicU64::new(0);

fn tick() -> u64 {
    CLOCK.fetch_add(1, Ordering::SeqCst)
}

pub fn candidate(id: &str, rating: Option<f64>) -> PlaceCandidate {
    PlaceCandidate {
        place_id: id.to_string(),
        name: id.to_string(),
        rating,
        user_ratings_total: Some(10),
        vicinity: Some(format!("{id} st")),
        formatted_address: None,
    }
}

pub fn grand_plaza() -> Hotel {
    Hotel {
        name: "Grand Plaza".to_string(),
        place_id: "grand-plaza".to_string(),
        location: Location {
            latitude: 10.0,
            longitude: 20.0,
        },
    }
}

#[derive(Debug, Default)]
pub struct FakeDirectory {
    hotel: Option<Hotel>,
    lodging: Vec<PlaceCandidate>,
    categories: HashMap<AmenityCategory, Vec<PlaceCandidate>>,
    failing: HashSet<AmenityCategory>,
    details: HashMap<String, PlaceDetails>,
    calls: Mutex<Vec<(u64, String)>>,
}

impl FakeDirectory {
    pub fn with_lodging(lodging: Vec<PlaceCandidate>) -> Self {
        Self {
            lodging,
            ..Self::default()
        }
    }

    pub fn with_hotel(mut self, hotel: Hotel) -> Self {
        self.hotel = Some(hotel);
        self
    }

    pub fn with_category(mut self, category: AmenityCategory, found: Vec<PlaceCandidate>) -> Self {
        self.categories.insert(category, found);
        self
    }

    pub fn failing_category(mut self, category: AmenityCategory) -> Self {
        self.failing.insert(category);
        self
    }

    pub fn with_details(mut self, place_id: &str, details: PlaceDetails) -> Self {
        self.details.insert(place_id.to_string(), details);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, c)| c.clone())
            .collect()
    }

    pub fn tick_of(&self, call: &str) -> Option<u64> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .find(|(_, c)| c == call)
            .map(|(t, _)| *t)
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push((tick(), call));
    }
}

#[async_trait::async_trait]
impl GeoDirectory for FakeDirectory {
    async fn resolve(&self, name: &str) -> anyhow::Result<Hotel> {
        self.record(format!("resolve:{name}"));
        self.hotel
            .clone()
            .ok_or_else(|| PipelineError::NotFound("Hotel not found".to_string()).into())
    }

    async fn nearby_lodging(
        &self,
        _location: Location,
        radius_m: u32,
    ) -> anyhow::Result<Vec<PlaceCandidate>> {
        self.record(format!("nearby_lodging:{radius_m}"));
        Ok(self.lodging.clone())
    }

    async fn nearby_of_category(
        &self,
        _location: Location,
        radius_m: u32,
        category: AmenityCategory,
    ) -> anyhow::Result<Vec<PlaceCandidate>> {
        self.record(format!("nearby_of_category:{}:{radius_m}", category.as_str()));
        if self.failing.contains(&category) {
            return Err(PipelineError::upstream("places", "injected failure").into());
        }
        Ok(self.categories.get(&category).cloned().unwrap_or_default())
    }

    async fn details(&self, place_id: &str) -> anyhow::Result<PlaceDetails> {
        self.record(format!("details:{place_id}"));
        self.details.get(place_id).cloned().ok_or_else(|| {
            PipelineError::NotFound(format!("No details found for place {place_id}")).into()
        })
    }
}

#[derive(Debug, Default)]
pub struct FakeGenerator {
    reply: Option<String>,
    requests: Mutex<Vec<(u64, CompletionRequest)>>,
}

impl FakeGenerator {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(_, r)| r.clone())
            .collect()
    }

    /// Tick of the first request whose prompt contains `needle`.
    pub fn tick_of(&self, needle: &str) -> Option<u64> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .find(|(_, r)| r.prompt.contains(needle))
            .map(|(t, _)| *t)
    }
}

#[async_trait::async_trait]
impl TextGenerator for FakeGenerator {
    fn model(&self) -> &str {
        "fake"
    }

    async fn complete(&self, req: CompletionRequest) -> anyhow::Result<String> {
        self.requests.lock().unwrap().push((tick(), req));
        self.reply
            .clone()
            .ok_or_else(|| PipelineError::upstream("text generation", "completion has no content").into())
    }
}
