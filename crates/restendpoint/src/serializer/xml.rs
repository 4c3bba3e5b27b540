//! XML bodies via `quick-xml`'s serde support.

use std::any::Any;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::codec::CodecTable;
use super::{Serializer, TypeDescriptor};
use crate::error::SerializerError;
use crate::media_type::MediaType;

/// Reads and writes XML bodies.
///
/// Writes `application/xml` and reads both `application/xml` and
/// `text/xml`. Like [`JsonSerializer`](super::JsonSerializer), types are
/// registered with [`with_type`](Self::with_type).
#[derive(Debug, Clone)]
pub struct XmlSerializer {
    mime_type: MediaType,
    codecs: CodecTable,
}

impl XmlSerializer {
    /// Create an XML serializer with no registered types.
    pub fn new() -> Self {
        Self {
            mime_type: MediaType::APPLICATION_XML,
            codecs: CodecTable::new(),
        }
    }

    /// Register `T` as readable and writable. The root element is named
    /// after the type.
    pub fn with_type<T>(mut self) -> Self
    where
        T: Serialize + DeserializeOwned + Send + 'static,
    {
        self.codecs.register::<T, _, _>(
            |value| {
                quick_xml::se::to_string(value)
                    .map(String::into_bytes)
                    .map_err(|e| e.to_string())
            },
            |content| {
                let text = std::str::from_utf8(content).map_err(|e| e.to_string())?;
                quick_xml::de::from_str(text).map_err(|e| e.to_string())
            },
        );
        self
    }
}

impl Default for XmlSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer for XmlSerializer {
    fn mime_type(&self) -> &MediaType {
        &self.mime_type
    }

    fn can_read(&self, mime_type: &MediaType) -> bool {
        mime_type.is(&self.mime_type) || mime_type.is(&MediaType::TEXT_XML)
    }

    fn can_write(&self, value: &dyn Any) -> bool {
        self.codecs.contains(value.type_id())
    }

    fn serialize(&self, value: &dyn Any) -> Result<Vec<u8>, SerializerError> {
        self.codecs.encode(value, self.name())
    }

    fn deserialize(
        &self,
        content: &[u8],
        target: TypeDescriptor,
    ) -> Result<Box<dyn Any + Send>, SerializerError> {
        self.codecs.decode(content, target)
    }
}
