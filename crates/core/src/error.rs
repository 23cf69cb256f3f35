use std::fmt;

/// Failure kinds surfaced by the pipeline.
///
/// These are raised as the root of an `anyhow::Error` so callers can recover
/// the kind with `downcast_ref::<PipelineError>()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    Validation(String),
    NotFound(String),
    UpstreamUnavailable {
        service: &'static str,
        detail: String,
    },
}

impl PipelineError {
    pub fn upstream(service: &'static str, detail: impl fmt::Display) -> Self {
        Self::UpstreamUnavailable {
            service,
            detail: detail.to_string(),
        }
    }

    /// Finds the pipeline error kind carried by `err`, if any.
    pub fn kind_of(err: &anyhow::Error) -> Option<&PipelineError> {
        err.downcast_ref::<PipelineError>()
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) | Self::NotFound(msg) => f.write_str(msg),
            Self::UpstreamUnavailable { service, detail } => {
                write!(f, "{service} unavailable: {detail}")
            }
        }
    }
}

impl std::error::Error for PipelineError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_survives_anyhow_round_trip() {
        let err: anyhow::Error = PipelineError::NotFound("Hotel not found".into()).into();
        assert_eq!(err.to_string(), "Hotel not found");
        assert!(matches!(
            PipelineError::kind_of(&err),
            Some(PipelineError::NotFound(_))
        ));
    }

    #[test]
    fn upstream_message_names_the_service() {
        let err = PipelineError::upstream("places", "status=REQUEST_DENIED");
        assert_eq!(err.to_string(), "places unavailable: status=REQUEST_DENIED");
    }

    #[test]
    fn plain_anyhow_errors_have_no_kind() {
        let err = anyhow::anyhow!("boom");
        assert!(PipelineError::kind_of(&err).is_none());
    }
}
