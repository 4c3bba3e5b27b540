//! HTTP status classification.
//!
//! Every response goes through an [`ErrorHandler`] before its body is
//! decoded. The handler decides whether the status is an error and, if so,
//! turns the response into a [`RestEndpointError`].

use std::fmt;

use tracing::debug;

use crate::error::{RestEndpointError, Result};
use crate::logging::targets;
use crate::transport::TransportResponse;

/// The five HTTP status classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatusClassification {
    /// 1xx.
    Informational,
    /// 2xx.
    Success,
    /// 3xx.
    Redirection,
    /// 4xx.
    ClientError,
    /// 5xx.
    ServerError,
}

impl StatusClassification {
    /// Classify a status code. Codes outside `100..=599` are rejected with
    /// [`RestEndpointError::InvalidStatusCode`].
    pub fn classify(status: u16) -> Result<Self> {
        match status {
            100..=199 => Ok(Self::Informational),
            200..=299 => Ok(Self::Success),
            300..=399 => Ok(Self::Redirection),
            400..=499 => Ok(Self::ClientError),
            500..=599 => Ok(Self::ServerError),
            other => Err(RestEndpointError::InvalidStatusCode(other)),
        }
    }

    /// Whether responses of this class are failures.
    pub fn is_error(self) -> bool {
        matches!(self, Self::ClientError | Self::ServerError)
    }
}

impl fmt::Display for StatusClassification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Informational => "informational",
            Self::Success => "success",
            Self::Redirection => "redirection",
            Self::ClientError => "client error",
            Self::ServerError => "server error",
        };
        f.write_str(name)
    }
}

/// Decides which responses are failures.
///
/// An endpoint owns exactly one handler, set through
/// [`RestEndpointBuilder::error_handler`](crate::RestEndpointBuilder::error_handler).
pub trait ErrorHandler: Send + Sync {
    /// Whether `response` should fail the call.
    fn has_error(&self, response: &TransportResponse) -> bool {
        StatusClassification::classify(response.status)
            .map(StatusClassification::is_error)
            .unwrap_or(true)
    }

    /// Pass `response` through, or convert it into the error that fails
    /// the call. `classification` is the class of `response.status`.
    fn handle(
        &self,
        classification: StatusClassification,
        response: TransportResponse,
    ) -> Result<TransportResponse>;

    /// Classify `response` and [`handle`](Self::handle) it.
    fn check(&self, response: TransportResponse) -> Result<TransportResponse> {
        let classification = StatusClassification::classify(response.status)?;
        self.handle(classification, response)
    }
}

/// Fails 4xx and 5xx responses, passes 1xx, 2xx and 3xx through.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultErrorHandler;

impl ErrorHandler for DefaultErrorHandler {
    fn handle(
        &self,
        classification: StatusClassification,
        response: TransportResponse,
    ) -> Result<TransportResponse> {
        let TransportResponse { status, body, .. } = &response;
        match classification {
            StatusClassification::ClientError => {
                debug!(target: targets::ERROR_HANDLER, status, "Client error response");
                Err(RestEndpointError::ClientError {
                    status: *status,
                    body: body.clone(),
                })
            }
            StatusClassification::ServerError => {
                debug!(target: targets::ERROR_HANDLER, status, "Server error response");
                Err(RestEndpointError::ServerError {
                    status: *status,
                    body: body.clone(),
                })
            }
            _ => Ok(response),
        }
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::HeaderMap;

    use super::*;

    fn response(status: u16, body: &'static str) -> TransportResponse {
        TransportResponse {
            status,
            headers: HeaderMap::new(),
            body: Bytes::from_static(body.as_bytes()),
        }
    }

    #[test]
    fn test_classification_is_total_over_valid_codes() {
        for status in 100..=599u16 {
            let expected = match status / 100 {
                1 => StatusClassification::Informational,
                2 => StatusClassification::Success,
                3 => StatusClassification::Redirection,
                4 => StatusClassification::ClientError,
                _ => StatusClassification::ServerError,
            };
            assert_eq!(StatusClassification::classify(status).unwrap(), expected);
        }
    }

    #[test]
    fn test_out_of_range_codes_are_invalid() {
        for status in [0u16, 99, 600, 999, u16::MAX] {
            assert!(matches!(
                StatusClassification::classify(status),
                Err(RestEndpointError::InvalidStatusCode(s)) if s == status
            ));
        }
    }

    #[test]
    fn test_has_error() {
        let handler = DefaultErrorHandler;
        assert!(!handler.has_error(&response(100, "")));
        assert!(!handler.has_error(&response(200, "")));
        assert!(!handler.has_error(&response(302, "")));
        assert!(handler.has_error(&response(404, "")));
        assert!(handler.has_error(&response(500, "")));
        assert!(handler.has_error(&response(700, "")));
    }

    #[test]
    fn test_handle_passes_non_errors_through() {
        let handler = DefaultErrorHandler;
        for status in [101, 204, 304] {
            let passed = handler.check(response(status, "kept")).unwrap();
            assert_eq!(passed.status, status);
            assert_eq!(passed.body, Bytes::from_static(b"kept"));
        }
    }

    #[test]
    fn test_handle_keeps_status_and_body() {
        let handler = DefaultErrorHandler;

        let err = handler.check(response(404, "not here")).unwrap_err();
        assert!(err.is_client_error());
        assert_eq!(err.status(), Some(404));
        assert_eq!(err.body().map(|b| b.as_ref()), Some(&b"not here"[..]));

        let err = handler.check(response(503, "busy")).unwrap_err();
        assert!(err.is_server_error());
        assert_eq!(err.status(), Some(503));

        let err = handler.check(response(42, "")).unwrap_err();
        assert!(matches!(err, RestEndpointError::InvalidStatusCode(42)));
    }

    #[test]
    fn test_custom_handler_reuses_classification() {
        struct LenientOnNotFound;

        impl ErrorHandler for LenientOnNotFound {
            fn handle(
                &self,
                classification: StatusClassification,
                response: TransportResponse,
            ) -> Result<TransportResponse> {
                if response.status == 404 {
                    Ok(response)
                } else {
                    DefaultErrorHandler.handle(classification, response)
                }
            }
        }

        assert!(LenientOnNotFound.check(response(404, "")).is_ok());
        assert!(LenientOnNotFound.check(response(410, "")).is_err());
        assert!(LenientOnNotFound.check(response(200, "")).is_ok());
    }
}
