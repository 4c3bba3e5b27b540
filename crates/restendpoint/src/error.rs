//! Error types for REST endpoint calls.

use bytes::Bytes;
use restendpoint_will::Abandoned;

const UNKNOWN_TYPE: &str = "<unknown>";

/// Failures raised while choosing or running a [`Serializer`](crate::serializer::Serializer).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SerializerError {
    /// No registered serializer accepts the value or the MIME type.
    #[error("no serializer found for {0}")]
    NoSerializerFound(String),

    /// A serializer accepted the value but could not encode it.
    #[error("unable to serialize value of type '{value_type}': {reason}")]
    Serialize {
        /// Why encoding failed.
        reason: String,
        /// Rust type name of the value.
        value_type: &'static str,
    },

    /// The payload could not be decoded into the requested type.
    #[error("unable to deserialize to type '{target_type}': {reason}")]
    Deserialize {
        /// Why decoding failed.
        reason: String,
        /// Rust type name of the requested target.
        target_type: &'static str,
    },
}

impl SerializerError {
    pub(crate) fn serialize(reason: impl ToString, value_type: &'static str) -> Self {
        Self::Serialize {
            reason: reason.to_string(),
            value_type,
        }
    }

    pub(crate) fn unsupported_value(serializer: &'static str) -> Self {
        Self::Serialize {
            reason: format!("{serializer} cannot write this value"),
            value_type: UNKNOWN_TYPE,
        }
    }

    /// Fill in the value type of a `Serialize` error raised behind `&dyn Any`.
    pub(crate) fn with_value_type(self, value_type: &'static str) -> Self {
        match self {
            Self::Serialize {
                reason,
                value_type: UNKNOWN_TYPE,
            } => Self::Serialize { reason, value_type },
            other => other,
        }
    }

    pub(crate) fn deserialize(reason: impl ToString, target_type: &'static str) -> Self {
        Self::Deserialize {
            reason: reason.to_string(),
            target_type,
        }
    }
}

/// Everything a REST endpoint call can fail with.
///
/// URL and serializer-selection errors are returned synchronously, before any
/// request is sent. The remaining variants complete the call's
/// [`Will`](restendpoint_will::Will) as failed.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RestEndpointError {
    /// The base URL or the resolved request URL is empty or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// No serializer matched, or the matching serializer rejected the payload.
    #[error(transparent)]
    Serializer(#[from] SerializerError),

    /// The server answered with a 4xx status.
    #[error("client error {status}: {}", String::from_utf8_lossy(.body))]
    ClientError {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: Bytes,
    },

    /// The server answered with a 5xx status.
    #[error("server error {status}: {}", String::from_utf8_lossy(.body))]
    ServerError {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: Bytes,
    },

    /// The status code is outside 100..=599.
    #[error("invalid HTTP status code {0}")]
    InvalidStatusCode(u16),

    /// Transport-level failure: connection refused, reset, timeout.
    #[error("I/O error: {cause}")]
    Io {
        /// Description of the underlying failure.
        cause: String,
    },

    /// The configured proxy URL is not usable.
    #[error("proxy error: {0}")]
    Proxy(String),

    /// A header name or value could not be encoded.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// The call was dropped before it produced a result.
    #[error("request was cancelled")]
    Cancelled,
}

impl RestEndpointError {
    /// The HTTP status code, for status-derived errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ClientError { status, .. } | Self::ServerError { status, .. } => Some(*status),
            Self::InvalidStatusCode(status) => Some(*status),
            _ => None,
        }
    }

    /// The raw response body, for status-derived errors.
    pub fn body(&self) -> Option<&Bytes> {
        match self {
            Self::ClientError { body, .. } | Self::ServerError { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Check if this is a 4xx error.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ClientError { .. })
    }

    /// Check if this is a 5xx error.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ServerError { .. })
    }

    /// Check if this is a serializer error.
    pub fn is_serializer_error(&self) -> bool {
        matches!(self, Self::Serializer(_))
    }
}

impl From<reqwest::Error> for RestEndpointError {
    fn from(err: reqwest::Error) -> Self {
        let cause = if err.is_timeout() {
            format!("request timed out: {err}")
        } else if err.is_connect() {
            format!("connection failed: {err}")
        } else {
            err.to_string()
        };
        Self::Io { cause }
    }
}

impl From<url::ParseError> for RestEndpointError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl From<http::header::InvalidHeaderName> for RestEndpointError {
    fn from(err: http::header::InvalidHeaderName) -> Self {
        Self::InvalidHeader(err.to_string())
    }
}

impl From<http::header::InvalidHeaderValue> for RestEndpointError {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::InvalidHeader(err.to_string())
    }
}

impl From<Abandoned> for RestEndpointError {
    fn from(_: Abandoned) -> Self {
        Self::Cancelled
    }
}

/// A specialized Result type for REST endpoint operations.
pub type Result<T> = std::result::Result<T, RestEndpointError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_value_type_fills_unknown_only() {
        let err = SerializerError::unsupported_value("StringSerializer").with_value_type("u32");
        assert!(err.to_string().contains("'u32'"), "{err}");

        let named = SerializerError::serialize("bad", "Point").with_value_type("u32");
        assert!(named.to_string().contains("'Point'"), "{named}");
    }
}
