//! Plain text bodies.

use std::any::Any;

use super::{Serializer, TypeDescriptor};
use crate::error::SerializerError;
use crate::media_type::MediaType;

/// Reads and writes UTF-8 `text/plain` bodies.
///
/// Writes `String` and `&'static str` values; reads `text/plain` with any
/// parameters into `String`.
#[derive(Debug, Clone)]
pub struct StringSerializer {
    mime_type: MediaType,
    read_range: MediaType,
}

impl StringSerializer {
    /// Create a text serializer emitting `text/plain; charset=utf-8`.
    pub fn new() -> Self {
        Self {
            mime_type: MediaType::TEXT_PLAIN.with_parameter("charset", "utf-8"),
            read_range: MediaType::TEXT_PLAIN,
        }
    }
}

impl Default for StringSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer for StringSerializer {
    fn mime_type(&self) -> &MediaType {
        &self.mime_type
    }

    fn read_range(&self) -> &MediaType {
        &self.read_range
    }

    fn can_write(&self, value: &dyn Any) -> bool {
        value.is::<String>() || value.is::<&'static str>()
    }

    fn serialize(&self, value: &dyn Any) -> Result<Vec<u8>, SerializerError> {
        if let Some(text) = value.downcast_ref::<String>() {
            Ok(text.as_bytes().to_vec())
        } else if let Some(text) = value.downcast_ref::<&'static str>() {
            Ok(text.as_bytes().to_vec())
        } else {
            Err(SerializerError::unsupported_value(self.name()))
        }
    }

    fn deserialize(
        &self,
        content: &[u8],
        target: TypeDescriptor,
    ) -> Result<Box<dyn Any + Send>, SerializerError> {
        if !target.is::<String>() {
            return Err(SerializerError::deserialize(
                "text content can only be read as String",
                target.name(),
            ));
        }
        String::from_utf8(content.to_vec())
            .map(|text| Box::new(text) as Box<dyn Any + Send>)
            .map_err(|e| SerializerError::deserialize(e, target.name()))
    }
}
