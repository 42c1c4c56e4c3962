//! Client-side error type.

/// Errors surfaced by the accessor layer.
///
/// Read accessors absorb `Unavailable` and `Api` by falling back to the seed
/// dataset; mutations always surface them so a failed save is never silent.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Network failure or the gateway could not be reached.
    #[error("gateway unavailable: {0}")]
    Unavailable(String),

    /// The gateway answered with a non-success status.
    #[error("api error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Login rejected by the gateway.
    #[error("authentication rejected: {0}")]
    AuthRejected(String),

    /// Response body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
