use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

/// The kind of error that occurred.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The requested model identifier is not served by the provider.
    ModelUnavailable,
    /// The content is moderated.
    Moderated,
    /// The model provider is rate limited.
    RateLimitExceeded,
    /// Any other errors.
    Other,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::ModelUnavailable => write!(f, "Model unavailable"),
            ErrorKind::Moderated => write!(f, "Moderated"),
            ErrorKind::RateLimitExceeded => write!(f, "Rate limit exceeded"),
            ErrorKind::Other => write!(f, "Other error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_names() {
        let json = serde_json::to_string(&ErrorKind::ModelUnavailable).unwrap();
        assert_eq!(json, "\"model_unavailable\"");
        let kind: ErrorKind =
            serde_json::from_str("\"rate_limit_exceeded\"").unwrap();
        assert_eq!(kind, ErrorKind::RateLimitExceeded);
    }
}
