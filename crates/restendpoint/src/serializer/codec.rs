//! Per-type encode/decode table shared by the structured-format serializers.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::sync::Arc;

use super::TypeDescriptor;
use crate::error::SerializerError;

type EncodeFn = dyn Fn(&dyn Any) -> Result<Vec<u8>, SerializerError> + Send + Sync;
type DecodeFn = dyn Fn(&[u8]) -> Result<Box<dyn Any + Send>, SerializerError> + Send + Sync;

#[derive(Clone)]
struct Codec {
    descriptor: TypeDescriptor,
    encode: Arc<EncodeFn>,
    decode: Arc<DecodeFn>,
}

/// Maps Rust types to the closures that encode and decode them.
#[derive(Clone, Default)]
pub(crate) struct CodecTable {
    codecs: HashMap<TypeId, Codec>,
}

impl CodecTable {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Register `T`, replacing any previous codec for it.
    pub(crate) fn register<T, Enc, Dec>(&mut self, encode: Enc, decode: Dec)
    where
        T: Any + Send,
        Enc: Fn(&T) -> Result<Vec<u8>, String> + Send + Sync + 'static,
        Dec: Fn(&[u8]) -> Result<T, String> + Send + Sync + 'static,
    {
        let descriptor = TypeDescriptor::of::<T>();
        let codec = Codec {
            descriptor,
            encode: Arc::new(move |value: &dyn Any| {
                let value = value
                    .downcast_ref::<T>()
                    .ok_or_else(|| SerializerError::serialize("value type mismatch", descriptor.name()))?;
                encode(value).map_err(|reason| SerializerError::serialize(reason, descriptor.name()))
            }),
            decode: Arc::new(move |content: &[u8]| {
                decode(content)
                    .map(|value| Box::new(value) as Box<dyn Any + Send>)
                    .map_err(|reason| SerializerError::deserialize(reason, descriptor.name()))
            }),
        };
        self.codecs.insert(descriptor.id(), codec);
    }

    pub(crate) fn contains(&self, id: TypeId) -> bool {
        self.codecs.contains_key(&id)
    }

    pub(crate) fn encode(&self, value: &dyn Any, serializer: &'static str) -> Result<Vec<u8>, SerializerError> {
        match self.codecs.get(&value.type_id()) {
            Some(codec) => (codec.encode)(value),
            None => Err(SerializerError::unsupported_value(serializer)),
        }
    }

    pub(crate) fn decode(
        &self,
        content: &[u8],
        target: TypeDescriptor,
    ) -> Result<Box<dyn Any + Send>, SerializerError> {
        match self.codecs.get(&target.id()) {
            Some(codec) => (codec.decode)(content),
            None => Err(SerializerError::deserialize(
                "type is not registered with this serializer",
                target.name(),
            )),
        }
    }

    pub(crate) fn type_names(&self) -> Vec<&'static str> {
        self.codecs.values().map(|c| c.descriptor.name()).collect()
    }
}

impl std::fmt::Debug for CodecTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.type_names()).finish()
    }
}
