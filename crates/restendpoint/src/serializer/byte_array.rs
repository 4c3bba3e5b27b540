//! Raw byte passthrough.

use std::any::Any;

use super::{Serializer, TypeDescriptor};
use crate::error::SerializerError;
use crate::media_type::MediaType;

/// Passes `Vec<u8>` bodies through untouched.
///
/// Writes only literal byte vectors, labelled `application/octet-stream`.
/// Reads any MIME type, which makes it a catch-all: the registry consults it
/// after every specific serializer, except for `Vec<u8>` targets where it is
/// always chosen. Reading into anything other than `Vec<u8>` fails.
#[derive(Debug, Clone)]
pub struct ByteArraySerializer {
    mime_type: MediaType,
    read_range: MediaType,
}

impl ByteArraySerializer {
    /// Create a byte-array serializer.
    pub fn new() -> Self {
        Self {
            mime_type: MediaType::OCTET_STREAM,
            read_range: MediaType::ANY,
        }
    }
}

impl Default for ByteArraySerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer for ByteArraySerializer {
    fn mime_type(&self) -> &MediaType {
        &self.mime_type
    }

    fn read_range(&self) -> &MediaType {
        &self.read_range
    }

    fn can_write(&self, value: &dyn Any) -> bool {
        value.is::<Vec<u8>>()
    }

    fn serialize(&self, value: &dyn Any) -> Result<Vec<u8>, SerializerError> {
        value
            .downcast_ref::<Vec<u8>>()
            .cloned()
            .ok_or_else(|| SerializerError::unsupported_value(self.name()))
    }

    fn deserialize(
        &self,
        content: &[u8],
        target: TypeDescriptor,
    ) -> Result<Box<dyn Any + Send>, SerializerError> {
        if target.is::<Vec<u8>>() {
            Ok(Box::new(content.to_vec()))
        } else {
            Err(SerializerError::deserialize(
                "byte array content can only be read as Vec<u8>",
                target.name(),
            ))
        }
    }

    fn is_passthrough(&self) -> bool {
        true
    }
}
