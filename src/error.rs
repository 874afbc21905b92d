use thiserror::Error;

use crate::form::FormField;

pub const BACKEND_UNAVAILABLE_MESSAGE: &str =
    "Backend service is unavailable. Please make sure the prediction API is running.";
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unexpected error occurred";

/// Failures of a submission. The display string is what the user sees.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClientError {
    #[error("Numeric values cannot be negative")]
    Validation { fields: Vec<FormField> },

    /// `reason` is the transport-level cause, kept for logs only.
    #[error("{}", BACKEND_UNAVAILABLE_MESSAGE)]
    BackendUnavailable { reason: String },

    #[error("{message}")]
    PredictionRequest { status: u16, message: String },

    #[error("{0}")]
    Unknown(String),
}

impl ClientError {
    /// Build the error for a non-2xx predict response.
    pub fn prediction_request(status: u16, server_message: Option<String>) -> Self {
        let message = server_message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("Prediction request failed with status {}", status));
        ClientError::PredictionRequest { status, message }
    }

    /// Wrap an arbitrary failure, falling back to a generic message when it
    /// has none.
    pub fn unknown(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.trim().is_empty() {
            ClientError::Unknown(UNKNOWN_ERROR_MESSAGE.to_string())
        } else {
            ClientError::Unknown(message)
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ClientError::Validation { .. } => "validation",
            ClientError::BackendUnavailable { .. } => "backend_unavailable",
            ClientError::PredictionRequest { .. } => "prediction_request",
            ClientError::Unknown(_) => "unknown",
        }
    }
}

/// Mistakes when applying a raw value to the form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("unknown form field: {0}")]
    UnknownField(String),

    #[error("{value:?} is not a valid value for {field}")]
    InvalidChoice { field: FormField, value: String },
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_message_wins_over_status() {
        let e = ClientError::prediction_request(400, Some("X".into()));
        assert_eq!(e.to_string(), "X");
    }

    #[test]
    fn missing_server_message_embeds_status() {
        let e = ClientError::prediction_request(502, None);
        assert!(e.to_string().contains("502"));
        let e = ClientError::prediction_request(500, Some(String::new()));
        assert!(e.to_string().contains("500"));
    }

    #[test]
    fn unknown_without_message_falls_back() {
        assert_eq!(ClientError::unknown("").to_string(), UNKNOWN_ERROR_MESSAGE);
        assert_eq!(ClientError::unknown("bad json").to_string(), "bad json");
    }

    #[test]
    fn backend_unavailable_hides_reason() {
        let e = ClientError::BackendUnavailable {
            reason: "connection refused".into(),
        };
        assert_eq!(e.to_string(), BACKEND_UNAVAILABLE_MESSAGE);
    }
}
