//! Serializer selection and round-trip behaviour through the public API.

use std::any::Any;

use restendpoint::{
    ByteArraySerializer, JsonSerializer, MediaType, Serializer, SerializerError,
    SerializerRegistry, StringSerializer, TypeDescriptor, XmlSerializer,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
struct Point {
    x: i32,
    y: i32,
}

fn round_trip<T>(serializer: &dyn Serializer, value: T)
where
    T: Any + Send + PartialEq + std::fmt::Debug,
{
    assert!(serializer.can_write(&value), "{} cannot write {value:?}", serializer.name());
    let bytes = serializer.serialize(&value).unwrap();
    assert!(serializer.can_read(serializer.mime_type()));
    let decoded = serializer
        .deserialize(&bytes, TypeDescriptor::of::<T>())
        .unwrap();
    assert_eq!(*decoded.downcast::<T>().unwrap(), value);
}

#[test]
fn test_bundled_serializers_round_trip() {
    round_trip(&ByteArraySerializer::new(), Vec::<u8>::new());
    round_trip(&ByteArraySerializer::new(), (0..=255u8).collect::<Vec<_>>());

    round_trip(&StringSerializer::new(), String::new());
    round_trip(&StringSerializer::new(), "Hello world!".to_string());

    let json = JsonSerializer::new().with_type::<Point>().with_type::<Vec<Point>>();
    round_trip(&json, Point { x: -3, y: 4 });
    round_trip(&json, vec![Point { x: 1, y: 2 }, Point { x: 3, y: 4 }]);
    round_trip(&json, serde_json::json!({"nested": [1, 2, {"k": null}]}));

    let xml = XmlSerializer::new().with_type::<Point>();
    round_trip(&xml, Point { x: 10, y: -20 });
}

#[test]
fn test_wildcard_never_shadows_specific_reader() {
    // The catch-all is registered first on purpose.
    let registry = SerializerRegistry::new()
        .with(ByteArraySerializer::new())
        .with(JsonSerializer::new().with_type::<Point>())
        .with(StringSerializer::new());

    let point: Point = registry
        .deserialize(br#"{"x":1,"y":2}"#, &MediaType::parse("application/json; charset=utf-8").unwrap())
        .unwrap();
    assert_eq!(point, Point { x: 1, y: 2 });

    let text: String = registry
        .deserialize(b"plain", &MediaType::TEXT_PLAIN)
        .unwrap();
    assert_eq!(text, "plain");
}

#[test]
fn test_catch_all_reader_only_when_nothing_specific_matches() {
    let registry = SerializerRegistry::new()
        .with(StringSerializer::new())
        .with(ByteArraySerializer::new());

    let png = MediaType::parse("image/png").unwrap();
    let bytes: Vec<u8> = registry.deserialize(&[0x89, b'P', b'N', b'G'], &png).unwrap();
    assert_eq!(bytes, [0x89, b'P', b'N', b'G']);

    // Selected, but the catch-all cannot produce a String.
    let err = registry.deserialize::<String>(b"x", &png).unwrap_err();
    assert!(matches!(err, SerializerError::Deserialize { .. }));
}

#[test]
fn test_first_registered_writer_wins() {
    let registry = SerializerRegistry::new()
        .with(JsonSerializer::new().with_type::<Point>())
        .with(XmlSerializer::new().with_type::<Point>());

    let (bytes, mime_type) = registry.serialize(&Point { x: 0, y: 0 }).unwrap();
    assert_eq!(mime_type, MediaType::APPLICATION_JSON);
    assert_eq!(bytes, br#"{"x":0,"y":0}"#);

    let registry = SerializerRegistry::new()
        .with(XmlSerializer::new().with_type::<Point>())
        .with(JsonSerializer::new().with_type::<Point>());
    let (_, mime_type) = registry.serialize(&Point { x: 0, y: 0 }).unwrap();
    assert_eq!(mime_type, MediaType::APPLICATION_XML);
}

#[test]
fn test_unwritable_value_names_its_type() {
    let registry = SerializerRegistry::new().with(StringSerializer::new());

    let err = registry.serialize(&Point { x: 1, y: 2 }).unwrap_err();
    assert!(matches!(err, SerializerError::NoSerializerFound(_)));
    assert!(err.to_string().contains("Point"), "{err}");
}

#[test]
fn test_empty_registry_finds_nothing() {
    let registry = SerializerRegistry::new();
    assert!(registry.is_empty());
    assert!(matches!(
        registry.writer_for(&"text".to_string()),
        Err(SerializerError::NoSerializerFound(_))
    ));
    assert!(matches!(
        registry.reader_for(&MediaType::ANY, TypeDescriptor::of::<Vec<u8>>()),
        Err(SerializerError::NoSerializerFound(_))
    ));
}
