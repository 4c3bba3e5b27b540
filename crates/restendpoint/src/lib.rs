//! Format-agnostic REST endpoint client.
//!
//! A [`RestEndpoint`] issues typed requests against a base URL and returns
//! every result as a [`Will`], a single-assignment asynchronous value that
//! can be awaited, blocked on or observed through listeners.
//!
//! - **Serializers** ([`serializer`]) pick the wire format: request bodies go
//!   to the first serializer able to write them, response bodies to the first
//!   one able to read the response `Content-Type`.
//! - **Error handling** ([`error_handler`]) classifies status codes; 4xx and
//!   5xx responses fail the call with the raw status and body attached.
//! - **Transport** ([`transport`]) performs the exchange, by default through
//!   reqwest.
//!
//! # Example
//!
//! ```ignore
//! use restendpoint::{JsonSerializer, RestEndpoint, StringSerializer};
//!
//! #[derive(Clone, serde::Serialize, serde::Deserialize)]
//! struct User { id: u64, name: String }
//!
//! let endpoint = RestEndpoint::builder("https://api.example.com")
//!     .serializer(JsonSerializer::new().with_type::<User>())
//!     .serializer(StringSerializer::new())
//!     .basic_auth("login", "password")
//!     .build()?;
//!
//! // Blocking access
//! let user: User = endpoint.get("/users/1")?.obtain()?;
//!
//! // Async access
//! let created: User = endpoint.post("/users", &user)?.await?;
//!
//! // Listeners
//! endpoint
//!     .get::<String>("/motd")?
//!     .on_success(|motd| println!("{motd}"))
//!     .on_failure(|error| eprintln!("{error}"));
//! ```
//!
//! # Errors
//!
//! Malformed URLs and request bodies no serializer can write are reported
//! synchronously as `Err`, before anything is sent. Every other failure
//! completes the returned [`Will`] with a [`RestEndpointError`].

mod auth;
mod endpoint;
mod error;
pub mod error_handler;
pub mod logging;
mod media_type;
mod method;
mod response;
pub mod runtime;
pub mod serializer;
pub mod transport;
mod urls;

pub use auth::Authentication;
pub use endpoint::{RestEndpoint, RestEndpointBuilder};
pub use error::{RestEndpointError, Result, SerializerError};
pub use error_handler::{DefaultErrorHandler, ErrorHandler, StatusClassification};
pub use media_type::{InvalidMediaType, MediaType};
pub use method::HttpMethod;
pub use response::Response;
pub use restendpoint_will::{Abandoned, Promise, Will, WillFuture, channel};
pub use serializer::{
    ByteArraySerializer, JsonSerializer, Serializer, SerializerRegistry, StringSerializer,
    TypeDescriptor, XmlSerializer,
};
pub use transport::{
    ReqwestTransport, ReqwestTransportBuilder, Transport, TransportConfig, TransportRequest,
    TransportResponse,
};
pub use urls::is_valid_url;
