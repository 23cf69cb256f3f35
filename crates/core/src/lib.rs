pub mod analysis;
pub mod domain;
pub mod error;
pub mod llm;
pub mod pipeline;
pub mod places;

#[cfg(test)]
mod testing;

pub mod config {
    use anyhow::Context;

    const DEFAULT_ENRICH_CONCURRENCY: usize = 1;

    #[derive(Debug, Clone, Default)]
    pub struct Settings {
        pub places_api_key: Option<String>,
        pub places_base_url: Option<String>,
        pub places_timeout_secs: Option<u64>,
        pub openai_api_key: Option<String>,
        pub openai_base_url: Option<String>,
        pub openai_model: Option<String>,
        pub openai_timeout_secs: Option<u64>,
        pub authorized_api_key: Option<String>,
        pub enrich_concurrency: Option<usize>,
        pub sentry_dsn: Option<String>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Ok(Self {
                places_api_key: env_string("PLACES_API_KEY"),
                places_base_url: env_string("PLACES_BASE_URL"),
                places_timeout_secs: env_parse("PLACES_TIMEOUT_SECS"),
                openai_api_key: env_string("OPENAI_API_KEY"),
                openai_base_url: env_string("OPENAI_BASE_URL"),
                openai_model: env_string("OPENAI_MODEL"),
                openai_timeout_secs: env_parse("OPENAI_TIMEOUT_SECS"),
                authorized_api_key: env_string("AUTHORIZED_API_KEY"),
                enrich_concurrency: env_parse("ENRICH_CONCURRENCY"),
                sentry_dsn: env_string("SENTRY_DSN"),
            })
        }

        pub fn require_places_api_key(&self) -> anyhow::Result<&str> {
            self.places_api_key
                .as_deref()
                .context("PLACES_API_KEY is required")
        }

        pub fn require_openai_api_key(&self) -> anyhow::Result<&str> {
            self.openai_api_key
                .as_deref()
                .context("OPENAI_API_KEY is required")
        }

        /// Number of competitors enriched at once. Never below 1.
        pub fn enrich_concurrency(&self) -> usize {
            self.enrich_concurrency
                .unwrap_or(DEFAULT_ENRICH_CONCURRENCY)
                .max(1)
        }
    }

    fn env_string(key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|s| !s.trim().is_empty())
    }

    fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
        std::env::var(key).ok().and_then(|s| s.trim().parse::<T>().ok())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn require_accessors_name_the_missing_variable() {
            let settings = Settings::default();
            let err = settings.require_places_api_key().unwrap_err();
            assert_eq!(err.to_string(), "PLACES_API_KEY is required");
            let err = settings.require_openai_api_key().unwrap_err();
            assert_eq!(err.to_string(), "OPENAI_API_KEY is required");
        }

        #[test]
        fn enrich_concurrency_defaults_to_sequential_and_clamps_zero() {
            let mut settings = Settings::default();
            assert_eq!(settings.enrich_concurrency(), 1);
            settings.enrich_concurrency = Some(0);
            assert_eq!(settings.enrich_concurrency(), 1);
            settings.enrich_concurrency = Some(4);
            assert_eq!(settings.enrich_concurrency(), 4);
        }
    }
}
