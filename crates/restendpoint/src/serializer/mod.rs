//! Pluggable wire-format codecs.
//!
//! A [`Serializer`] converts between typed values and the bytes of a request
//! or response body for one MIME type. Serializers are collected in a
//! [`SerializerRegistry`], which selects the codec for every call:
//!
//! - for request bodies, the first serializer whose
//!   [`can_write`](Serializer::can_write) accepts the value;
//! - for response bodies, the first serializer able to read the response
//!   `Content-Type`, with catch-all (`*/*`) serializers only consulted after
//!   every specific one declined.
//!
//! Values cross the trait as [`&dyn Any`](std::any::Any); the target type of a
//! read is described by an explicit [`TypeDescriptor`]. Serializers for
//! structured formats ([`JsonSerializer`], [`XmlSerializer`]) are told up
//! front which Rust types they handle:
//!
//! ```ignore
//! use restendpoint::serializer::{JsonSerializer, SerializerRegistry, StringSerializer};
//!
//! let registry = SerializerRegistry::new()
//!     .with(StringSerializer::new())
//!     .with(JsonSerializer::new().with_type::<User>());
//! ```

mod byte_array;
mod codec;
mod json;
mod registry;
mod string;
mod xml;

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

use crate::error::SerializerError;
use crate::media_type::MediaType;

pub use byte_array::ByteArraySerializer;
pub use json::JsonSerializer;
pub use registry::SerializerRegistry;
pub use string::StringSerializer;
pub use xml::XmlSerializer;

/// Runtime descriptor of a Rust type, used to name deserialization targets.
#[derive(Clone, Copy)]
pub struct TypeDescriptor {
    id: TypeId,
    name: &'static str,
}

impl TypeDescriptor {
    /// Describe `T`.
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    /// The `TypeId` of the described type.
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// The type name, for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Check whether this describes `T`.
    pub fn is<T: Any + ?Sized>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeDescriptor {}

impl Hash for TypeDescriptor {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// A codec between typed values and a body of one MIME type.
///
/// Implementations must be immutable once registered: the registry shares
/// them across every in-flight call without locking.
pub trait Serializer: Send + Sync {
    /// MIME type of the bytes produced by [`serialize`](Self::serialize).
    /// Sent as the request `Content-Type`.
    fn mime_type(&self) -> &MediaType;

    /// Range of MIME types this serializer reads. A wildcard range marks the
    /// serializer as catch-all for registry lookups.
    fn read_range(&self) -> &MediaType {
        self.mime_type()
    }

    /// Check whether a body declared as `mime_type` can be read.
    fn can_read(&self, mime_type: &MediaType) -> bool {
        mime_type.is(self.read_range())
    }

    /// Check whether `value` can be written.
    fn can_write(&self, value: &dyn Any) -> bool;

    /// Encode `value`.
    fn serialize(&self, value: &dyn Any) -> Result<Vec<u8>, SerializerError>;

    /// Decode `content` into a value of type `target`.
    ///
    /// The returned box holds exactly the type described by `target`.
    fn deserialize(
        &self,
        content: &[u8],
        target: TypeDescriptor,
    ) -> Result<Box<dyn Any + Send>, SerializerError>;

    /// Whether this serializer hands raw bytes through untouched. Such a
    /// serializer is always used to read byte-array targets.
    fn is_passthrough(&self) -> bool {
        false
    }

    /// Name used in logs.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
