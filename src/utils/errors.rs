use thiserror::Error;

use crate::api::neows::ApiError;

/// Every way a run can fail
#[derive(Debug, Error)]
pub enum NeoError {
    /// Network failure, timeout or non-success status from the feed
    #[error("Feed unavailable: {0}")]
    FeedUnavailable(String),
    /// Feed answered but the body is missing what we need
    #[error("Feed malformed: {0}")]
    FeedMalformed(String),
    /// A timestamp or numeric field could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),
    /// The chart could not be drawn or written
    #[error("Render error: {0}")]
    RenderError(String),
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<ApiError> for NeoError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::DeserializationError(_) => NeoError::FeedMalformed(err.to_string()),
            _ => NeoError::FeedUnavailable(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_errors_are_unavailable() {
        let cases = vec![
            ApiError::Unauthorized("bad key".to_string()),
            ApiError::RateLimited { remaining: None },
            ApiError::ServerError(500, String::new()),
            ApiError::HttpError(404, String::new()),
            ApiError::RequestError("refused".to_string()),
            ApiError::Timeout("30s".to_string()),
        ];

        for case in cases {
            assert!(matches!(NeoError::from(case), NeoError::FeedUnavailable(_)));
        }
    }

    #[test]
    fn test_bad_body_is_malformed() {
        let err = NeoError::from(ApiError::DeserializationError("eof".to_string()));
        assert!(matches!(err, NeoError::FeedMalformed(_)));
        assert!(err.to_string().starts_with("Feed malformed:"));
    }
}
