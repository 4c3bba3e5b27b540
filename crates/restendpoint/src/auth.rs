//! Request authentication.

use std::fmt;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::HeaderValue;

use crate::error::Result;

/// Credentials attached to every request of an endpoint.
#[derive(Clone, PartialEq, Eq)]
pub enum Authentication {
    /// HTTP Basic authentication.
    Basic {
        /// Login.
        login: String,
        /// Password.
        password: String,
    },
    /// Bearer token authentication.
    Bearer(String),
}

impl Authentication {
    /// Basic credentials.
    pub fn basic(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            login: login.into(),
            password: password.into(),
        }
    }

    /// The `Authorization` header value for these credentials.
    pub fn header_value(&self) -> Result<HeaderValue> {
        let raw = match self {
            Self::Basic { login, password } => {
                format!("Basic {}", STANDARD.encode(format!("{login}:{password}")))
            }
            Self::Bearer(token) => format!("Bearer {token}"),
        };
        let mut value = HeaderValue::try_from(raw)?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for Authentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Basic { login, .. } => f
                .debug_struct("Basic")
                .field("login", login)
                .field("password", &"<redacted>")
                .finish(),
            Self::Bearer(_) => f.debug_tuple("Bearer").field(&"<redacted>").finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_header_value() {
        let auth = Authentication::basic("Aladdin", "open sesame");
        let value = auth.header_value().unwrap();
        assert_eq!(value.to_str().unwrap(), "Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ==");
        assert!(value.is_sensitive());
    }

    #[test]
    fn test_bearer_header_value() {
        let auth = Authentication::Bearer("abc.def".into());
        assert_eq!(auth.header_value().unwrap().to_str().unwrap(), "Bearer abc.def");
    }

    #[test]
    fn test_rejects_control_characters() {
        let auth = Authentication::Bearer("line\nbreak".into());
        assert!(auth.header_value().is_err());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let rendered = format!("{:?}", Authentication::basic("user", "hunter2"));
        assert!(rendered.contains("user"));
        assert!(!rendered.contains("hunter2"));
    }
}
