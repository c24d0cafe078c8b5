use crate::codec;
use crate::error::Error;
use serde_json::{Map, Value};

use super::model::{Jwt, Serialization};

pub(crate) struct CompactParts<'a> {
    pub(crate) header: &'a str,
    pub(crate) payload: &'a str,
    pub(crate) signature: &'a str,
}

/// Splits a compact serialization into its three segments. Any other segment
/// count is malformed wire data.
pub(crate) fn split_compact(token: &str) -> Result<CompactParts<'_>, Error> {
    let mut iter = token.split('.');
    let header = iter.next().ok_or_else(invalid_compact)?;
    let payload = iter.next().ok_or_else(invalid_compact)?;
    let signature = iter.next().ok_or_else(invalid_compact)?;
    if iter.next().is_some() {
        return Err(invalid_compact());
    }
    Ok(CompactParts {
        header,
        payload,
        signature,
    })
}

fn invalid_compact() -> Error {
    Error::MalformedToken("invalid JWT compact serialization".to_string())
}

/// Which wire shape an input value carries. Non-string, non-object inputs are
/// a precondition violation, reported distinctly from malformed wire data.
#[derive(Debug)]
pub(crate) enum Detected<'a> {
    Compact(&'a str),
    Flattened(&'a Map<String, Value>),
    General,
}

pub(crate) fn detect(input: &Value) -> Result<Detected<'_>, Error> {
    match input {
        Value::String(token) => Ok(Detected::Compact(token)),
        Value::Object(object) => {
            if object.contains_key("signatures") {
                return Ok(Detected::General);
            }
            if object.contains_key("protected") || object.contains_key("signature") {
                return Ok(Detected::Flattened(object));
            }
            Err(Error::MalformedToken(
                "object is not a JOSE serialization".to_string(),
            ))
        }
        _ => Err(Error::Argument(
            "JWT must be a string or an object".to_string(),
        )),
    }
}

impl Jwt {
    /// Parses a JWS Compact Serialization string.
    ///
    /// The header and payload segments must decode to JSON objects; the
    /// signature segment is retained in its raw base64url form.
    pub fn from_compact(token: &str) -> Result<Self, Error> {
        let parts = split_compact(token)?;
        let header = decode_object_segment(parts.header, "header")?;
        let payload = decode_object_segment(parts.payload, "payload")?;
        Ok(Jwt {
            segments: Some([
                parts.header.to_string(),
                parts.payload.to_string(),
                parts.signature.to_string(),
            ]),
            header,
            payload,
            signature: Some(parts.signature.to_string()),
            serialization: Serialization::Compact,
            key: None,
        })
    }

    /// Parses a JWS Flattened JSON Serialization object. The engine awaits
    /// the schema collaborator before the result is considered constructed.
    pub(crate) fn from_flattened(object: &Map<String, Value>) -> Result<Self, Error> {
        let protected = member_str(object, "protected")?;
        let payload_b64 = member_str(object, "payload")?;
        let signature = member_str(object, "signature")?;
        let header = decode_object_segment(protected, "protected header")?;
        let payload = decode_object_segment(payload_b64, "payload")?;
        Ok(Jwt {
            // derived from the object's members so verification sees the
            // exact signed bytes
            segments: Some([
                protected.to_string(),
                payload_b64.to_string(),
                signature.to_string(),
            ]),
            header,
            payload,
            signature: Some(signature.to_string()),
            serialization: Serialization::FlattenedJson,
            key: None,
        })
    }
}

fn decode_object_segment(encoded: &str, name: &str) -> Result<Map<String, Value>, Error> {
    match codec::decode_segment(encoded)? {
        Value::Object(map) => Ok(map),
        _ => Err(Error::MalformedToken(format!(
            "{name} segment is not a JSON object"
        ))),
    }
}

fn member_str<'a>(object: &'a Map<String, Value>, name: &str) -> Result<&'a str, Error> {
    object.get(name).and_then(Value::as_str).ok_or_else(|| {
        Error::MalformedToken(format!(
            "flattened serialization requires a base64url {name} member"
        ))
    })
}
