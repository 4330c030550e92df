use reqwest::StatusCode;

/// Errors surfaced by the CRM fetch boundary.
///
/// Failures propagate to the caller unmodified; there is no retry or
/// partial-result handling at this layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent or the response body not read.
    #[error("UCRM request failed")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("UCRM request failed ({status}): {body}")]
    Status { status: StatusCode, body: String },

    /// The response body did not match the expected entity shape.
    #[error("Failed to parse UCRM response: {detail}")]
    Decode { detail: String },
}

impl ApiError {
    /// Status code of an upstream rejection, when that's what this is.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
