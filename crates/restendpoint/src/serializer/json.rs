//! JSON bodies via `serde_json`.

use std::any::Any;

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::codec::CodecTable;
use super::{Serializer, TypeDescriptor};
use crate::error::SerializerError;
use crate::media_type::MediaType;

/// Reads and writes `application/json` bodies.
///
/// Handles [`serde_json::Value`] out of the box. Other types must be
/// registered with [`with_type`](Self::with_type) so the serializer can
/// recognise them behind `&dyn Any`.
///
/// ```ignore
/// #[derive(Serialize, Deserialize)]
/// struct User { id: u64, name: String }
///
/// let json = JsonSerializer::new().with_type::<User>();
/// ```
#[derive(Debug, Clone)]
pub struct JsonSerializer {
    mime_type: MediaType,
    codecs: CodecTable,
}

impl JsonSerializer {
    /// Create a JSON serializer handling `serde_json::Value`.
    pub fn new() -> Self {
        Self {
            mime_type: MediaType::APPLICATION_JSON,
            codecs: CodecTable::new(),
        }
        .with_type::<serde_json::Value>()
    }

    /// Register `T` as readable and writable.
    pub fn with_type<T>(mut self) -> Self
    where
        T: Serialize + DeserializeOwned + Send + 'static,
    {
        self.codecs.register::<T, _, _>(
            |value| serde_json::to_vec(value).map_err(|e| e.to_string()),
            |content| serde_json::from_slice(content).map_err(|e| e.to_string()),
        );
        self
    }
}

impl Default for JsonSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl Serializer for JsonSerializer {
    fn mime_type(&self) -> &MediaType {
        &self.mime_type
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
