use crate::analysis::{amenities, competitors, opportunities, reviews};
use crate::config::Settings;
use crate::domain::hotel::MAX_REVIEWS;
use crate::domain::{BasicReport, Competitor, ExtendedReport, Hotel};
use crate::error::PipelineError;
use crate::llm::openai::OpenAiClient;
use crate::llm::TextGenerator;
use crate::places::google::GooglePlacesClient;
use crate::places::GeoDirectory;
use anyhow::Result;
use futures::{StreamExt, TryStreamExt};
use std::sync::Arc;

/// Turns a hotel name into a competitor report.
///
/// Each request builds its own report; nothing is cached between runs.
/// The first failing stage aborts the whole report.
#[derive(Clone)]
pub struct Pipeline {
    directory: Arc<dyn GeoDirectory>,
    generator: Arc<dyn TextGenerator>,
    enrich_concurrency: usize,
}

impl Pipeline {
    pub fn new(directory: Arc<dyn GeoDirectory>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            directory,
            generator,
            enrich_concurrency: 1,
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let directory = GooglePlacesClient::from_settings(settings)?;
        let generator = OpenAiClient::from_settings(settings)?;
        tracing::info!(model = generator.model(), "text generator configured");
        Ok(Self::new(Arc::new(directory), Arc::new(generator))
            .with_enrich_concurrency(settings.enrich_concurrency()))
    }

    /// How many competitors are enriched at once. 1 means strictly sequential.
    pub fn with_enrich_concurrency(mut self, n: usize) -> Self {
        self.enrich_concurrency = n.max(1);
        self
    }

    pub async fn basic_report(&self, hotel_name: &str) -> Result<BasicReport> {
        let hotel = self.resolve(hotel_name).await?;
        let found = competitors::find_competitors(self.directory.as_ref(), hotel.location).await?;
        let competitors = self.enrich_all(found).await?;

        tracing::info!(hotel = %hotel.name, competitors = competitors.len(), "basic report ready");
        Ok(BasicReport { hotel, competitors })
    }

    pub async fn extended_report(&self, hotel_name: &str) -> Result<ExtendedReport> {
        let hotel = self.resolve(hotel_name).await?;
        let directory = self.directory.as_ref();
        let (found, nearby_amenities) = tokio::try_join!(
            competitors::find_competitors(directory, hotel.location),
            amenities::scan(directory, hotel.location),
        )?;

        let amenities_analysis = amenities::analyze(&nearby_amenities);
        let competitors = self.enrich_all(found).await?;

        tracing::info!(
            hotel = %hotel.name,
            competitors = competitors.len(),
            highlights = amenities_analysis.highlights.len(),
            recommendations = amenities_analysis.recommendations.len(),
            "extended report ready"
        );
        Ok(ExtendedReport {
            hotel,
            competitors,
            nearby_amenities,
            amenities_analysis,
        })
    }

    async fn resolve(&self, hotel_name: &str) -> Result<Hotel> {
        let hotel_name = hotel_name.trim();
        if hotel_name.is_empty() {
            return Err(PipelineError::Validation("Please provide a hotel name.".to_string()).into());
        }

        let hotel = self.directory.resolve(hotel_name).await?;
        tracing::info!(
            query = hotel_name,
            hotel = %hotel.name,
            place_id = %hotel.place_id,
            lat = hotel.location.latitude,
            lng = hotel.location.longitude,
            "hotel resolved"
        );
        Ok(hotel)
    }

    // Output order matches input order regardless of concurrency.
    async fn enrich_all(&self, found: Vec<Competitor>) -> Result<Vec<Competitor>> {
        futures::stream::iter(found)
            .map(|competitor| self.enrich(competitor))
            .buffered(self.enrich_concurrency)
            .try_collect()
            .await
    }

    /// details, then review summary, then opportunities.
    async fn enrich(&self, mut competitor: Competitor) -> Result<Competitor> {
        let mut details = self.directory.details(&competitor.place_id).await?;
        details.reviews.truncate(MAX_REVIEWS);
        competitor.address = details.address;
        competitor.latest_reviews = details.reviews;

        competitor.review_summary = reviews::summarize(&competitor.latest_reviews);

        competitor.opportunities =
            opportunities::generate(self.generator.as_ref(), &competitor.review_summary).await?;

        tracing::debug!(
            competitor = %competitor.name,
            reviews = competitor.latest_reviews.len(),
            opportunities = competitor.opportunities.len(),
            "competitor enriched"
        );
        Ok(competitor)
    }
}
