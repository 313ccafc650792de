use serde::Serializer;
use url::Origin;

/// Serialize an origin as its ASCII form, e.g. `https://example.com:3388`.
/// Opaque origins serialize as `"null"`.
pub fn serialize_origin<S>(origin: &Option<Origin>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match origin {
        Some(origin) => serializer.serialize_str(&origin.ascii_serialization()),
        None => serializer.serialize_none(),
    }
}
