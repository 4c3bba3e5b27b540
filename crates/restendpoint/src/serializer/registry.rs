//! Ordered serializer collection and selection rules.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use super::{Serializer, TypeDescriptor};
use crate::error::SerializerError;
use crate::logging::targets;
use crate::media_type::MediaType;

/// An ordered set of serializers.
///
/// Registration order matters: for both directions the first eligible
/// serializer wins. Catch-all readers are the exception and are only
/// considered once every specific reader has declined.
#[derive(Clone, Default)]
pub struct SerializerRegistry {
    serializers: Vec<Arc<dyn Serializer>>,
}

impl SerializerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a serializer, builder style.
    pub fn with(mut self, serializer: impl Serializer + 'static) -> Self {
        self.register(serializer);
        self
    }

    /// Add a serializer.
    pub fn register(&mut self, serializer: impl Serializer + 'static) {
        self.register_shared(Arc::new(serializer));
    }

    /// Add a serializer that is already shared.
    pub fn register_shared(&mut self, serializer: Arc<dyn Serializer>) {
        debug!(
            target: targets::SERIALIZER,
            serializer = serializer.name(),
            mime_type = %serializer.mime_type(),
            "Registered serializer"
        );
        self.serializers.push(serializer);
    }

    /// Number of registered serializers.
    pub fn len(&self) -> usize {
        self.serializers.len()
    }

    /// Whether no serializer is registered.
    pub fn is_empty(&self) -> bool {
        self.serializers.is_empty()
    }

    /// Iterate in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Serializer> {
        self.serializers.iter().map(|s| s.as_ref())
    }

    /// Find the serializer for a request body.
    pub fn writer_for(&self, value: &dyn Any) -> Result<&dyn Serializer, SerializerError> {
        self.select_writer(value, "request body value")
    }

    fn select_writer(
        &self,
        value: &dyn Any,
        value_type: &'static str,
    ) -> Result<&dyn Serializer, SerializerError> {
        let found = self.iter().find(|s| s.can_write(value));
        match found {
            Some(serializer) => {
                trace!(
                    target: targets::SERIALIZER,
                    serializer = serializer.name(),
                    value_type,
                    "Selected writer"
                );
                Ok(serializer)
            }
            None => Err(SerializerError::NoSerializerFound(format!(
                "{value_type} (no serializer can write it)"
            ))),
        }
    }

    /// Find the serializer for a response body declared as `mime_type`,
    /// decoded into `target`.
    ///
    /// A `Vec<u8>` target always goes to a passthrough serializer when one is
    /// registered. Otherwise specific serializers are tried in order, then
    /// catch-all ones.
    pub fn reader_for(
        &self,
        mime_type: &MediaType,
        target: TypeDescriptor,
    ) -> Result<&dyn Serializer, SerializerError> {
        let found = if target.is::<Vec<u8>>() {
            self.iter().find(|s| s.is_passthrough())
        } else {
            None
        };
        let found = found
            .or_else(|| {
                self.iter()
                    .filter(|s| !s.read_range().is_wildcard())
                    .find(|s| s.can_read(mime_type))
            })
            .or_else(|| {
                self.iter()
                    .filter(|s| s.read_range().is_wildcard())
                    .find(|s| s.can_read(mime_type))
            });

        match found {
            Some(serializer) => {
                trace!(
                    target: targets::SERIALIZER,
                    serializer = serializer.name(),
                    %mime_type,
                    target_type = target.name(),
                    "Selected reader"
                );
                Ok(serializer)
            }
            None => Err(SerializerError::NoSerializerFound(format!(
                "MIME type '{mime_type}'"
            ))),
        }
    }

    /// Encode `value` with the first serializer that accepts it. Returns the
    /// bytes with the `Content-Type` to send them under.
    pub fn serialize<B: Any>(&self, value: &B) -> Result<(Vec<u8>, MediaType), SerializerError> {
        let value_type = std::any::type_name::<B>();
        let serializer = self.select_writer(value, value_type)?;
        let bytes = serializer
            .serialize(value)
            .map_err(|e| e.with_value_type(value_type))?;
        Ok((bytes, serializer.mime_type().clone()))
    }

    /// Decode `content` declared as `mime_type` into a `T`.
    pub fn deserialize<T: Any>(&self, content: &[u8], mime_type: &MediaType) -> Result<T, SerializerError> {
        let target = TypeDescriptor::of::<T>();
        let serializer = self.reader_for(mime_type, target)?;
        let value = serializer.deserialize(content, target)?;
        value.downcast::<T>().map(|boxed| *boxed).map_err(|_| {
            SerializerError::deserialize(
                format!("{} returned a value of the wrong type", serializer.name()),
                target.name(),
            )
        })
    }
}

impl fmt::Debug for SerializerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.serializers.iter().map(|s| s.name()))
            .finish()
    }
}
