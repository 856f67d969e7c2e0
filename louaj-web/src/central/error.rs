//! Central server client error types.

use super::convert::ConversionError;

/// Generic message for failures the user cannot act on except by retrying.
pub const TRY_AGAIN: &str = "Something went wrong. Please try again.";

/// Errors that can occur when talking to the central server.
#[derive(Debug, thiserror::Error)]
pub enum CentralError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Missing, invalid or expired bearer token
    #[error("unauthorized: token missing, invalid or expired")]
    Unauthorized,

    /// The resource does not exist
    #[error("not found")]
    NotFound,

    /// API returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// API answered 2xx but with `success: false`
    #[error("rejected by central server: {message}")]
    Rejected { message: String },

    /// Failed to parse response JSON
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Response parsed but lacked the data we need
    #[error("incomplete response: {0}")]
    Incomplete(#[from] ConversionError),

    /// Booking created without a payment URL to redirect to
    #[error("No payment URL received.")]
    MissingPaymentUrl,
}

impl CentralError {
    /// The message to show the user.
    ///
    /// Upstream validation messages are passed through verbatim; transport
    /// and decoding failures collapse to a generic "try again".
    pub fn user_message(&self) -> String {
        match self {
            CentralError::Api { message, .. } | CentralError::Rejected { message }
                if !message.trim().is_empty() =>
            {
                message.clone()
            }
            CentralError::Api { .. } | CentralError::Rejected { .. } => {
                "The server could not process the request.".to_string()
            }
            CentralError::Unauthorized => {
                "Your session has expired. Please sign in again.".to_string()
            }
            CentralError::NotFound => "Not found.".to_string(),
            CentralError::MissingPaymentUrl => self.to_string(),
            CentralError::Http(_) | CentralError::Json { .. } | CentralError::Incomplete(_) => {
                TRY_AGAIN.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = CentralError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "API error 500: Internal Server Error");

        let err = CentralError::MissingPaymentUrl;
        assert_eq!(err.to_string(), "No payment URL received.");

        let err = CentralError::Json {
            message: "expected value".into(),
            body: Some("<html>".into()),
        };
        assert!(err.to_string().contains("expected value"));
    }

    #[test]
    fn upstream_messages_pass_through() {
        let err = CentralError::Rejected {
            message: "Not enough seats".into(),
        };
        assert_eq!(err.user_message(), "Not enough seats");

        let err = CentralError::Api {
            status: 422,
            message: "Invalid journey date".into(),
        };
        assert_eq!(err.user_message(), "Invalid journey date");
    }

    #[test]
    fn empty_upstream_message_gets_fallback() {
        let err = CentralError::Api {
            status: 400,
            message: "  ".into(),
        };
        assert_eq!(err.user_message(), "The server could not process the request.");
    }

    #[test]
    fn internal_failures_say_try_again() {
        let err = CentralError::Json {
            message: "eof".into(),
            body: None,
        };
        assert_eq!(err.user_message(), TRY_AGAIN);

        let err = CentralError::Incomplete(ConversionError::MissingField("token"));
        assert_eq!(err.user_message(), TRY_AGAIN);
    }

    #[test]
    fn missing_payment_url_message() {
        assert_eq!(
            CentralError::MissingPaymentUrl.user_message(),
            "No payment URL received."
        );
    }
}
