//! Error types for argument generation and session transitions
//!
//! - **Version**: 1.0.0
//! - **Since**: 0.3.0

use thiserror::Error;

/// Failure of a single call to the text-generation service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// Transport-level failure reaching the service
    #[error("network error: {0}")]
    Network(String),
    /// Missing or rejected credentials, or an exhausted quota
    #[error("authentication error: {0}")]
    Auth(String),
    /// The service answered without any usable text
    #[error("the model returned an empty response")]
    EmptyResponse,
    /// Any other error reported by the service
    #[error("API error: {0}")]
    Api(String),
}

impl GenerationError {
    /// Classify a raw error description from the OpenAI client.
    ///
    /// The client folds transport and API failures into one error type, so the
    /// kind is recovered from the error type/code/message text.
    pub fn from_api_detail(detail: &str) -> Self {
        let lower = detail.to_lowercase();

        let auth_markers = [
            "invalid_api_key",
            "incorrect api key",
            "unauthorized",
            "401",
            "insufficient_quota",
            "authentication",
            "no api key",
        ];
        let network_markers = [
            "reqwest",
            "error sending request",
            "connection",
            "timed out",
            "timeout",
            "dns",
        ];

        if auth_markers.iter().any(|m| lower.contains(m)) {
            GenerationError::Auth(detail.to_string())
        } else if network_markers.iter().any(|m| lower.contains(m)) {
            GenerationError::Network(detail.to_string())
        } else {
            GenerationError::Api(detail.to_string())
        }
    }

    /// Short message suitable for showing on the page
    pub fn user_message(&self) -> String {
        match self {
            GenerationError::Network(_) => {
                "Could not reach the language model service. Please try again.".to_string()
            }
            GenerationError::Auth(_) => {
                "The language model service rejected our credentials.".to_string()
            }
            GenerationError::EmptyResponse => {
                "The language model returned an empty argument.".to_string()
            }
            GenerationError::Api(_) => "The language model service returned an error.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_auth() {
        let err = GenerationError::from_api_detail(
            "OpenAiError { message: \"Incorrect API key provided\", error_type: \"invalid_request_error\", code: Some(\"invalid_api_key\") }",
        );
        assert!(matches!(err, GenerationError::Auth(_)));
    }

    #[test]
    fn test_classify_quota_as_auth() {
        let err = GenerationError::from_api_detail("You exceeded your current quota (insufficient_quota)");
        assert!(matches!(err, GenerationError::Auth(_)));
    }

    #[test]
    fn test_classify_network() {
        let err = GenerationError::from_api_detail("error sending request for url (https://api.openai.com/v1/chat/completions)");
        assert!(matches!(err, GenerationError::Network(_)));
    }

    #[test]
    fn test_classify_other() {
        let err = GenerationError::from_api_detail("The model `gpt-9` does not exist");
        assert_eq!(
            err,
            GenerationError::Api("The model `gpt-9` does not exist".to_string())
        );
    }

    #[test]
    fn test_user_message_hides_detail() {
        let err = GenerationError::Auth("sk-secret-detail".to_string());
        assert!(!err.user_message().contains("sk-secret"));
    }
}
