use crate::error::Error;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::Serialize;
use serde_json::Value;

/// JSON-serializes `value` and base64url-encodes the bytes without padding.
///
/// Member order is emitted as provided by the caller, never re-sorted; the
/// encoded bytes feed the signed byte stream, so this must be deterministic
/// for a given value.
pub(crate) fn encode_segment<T: Serialize>(value: &T) -> Result<String, Error> {
    let bytes = serde_json::to_vec(value)?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}

/// Decodes a base64url segment to raw bytes. Padding characters and the
/// standard `+`/`/` alphabet are rejected.
pub(crate) fn decode_bytes(encoded: &str) -> Result<Vec<u8>, Error> {
    URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|err| Error::MalformedToken(format!("base64url decode error: {err}")))
}

/// Decodes a base64url segment to a JSON value.
pub(crate) fn decode_segment(encoded: &str) -> Result<Value, Error> {
    let bytes = decode_bytes(encoded)?;
    serde_json::from_slice(&bytes)
        .map_err(|err| Error::MalformedToken(format!("segment is not valid JSON: {err}")))
}

#[cfg(test)]
mod tests {
    use super::{decode_segment, encode_segment, URL_SAFE_NO_PAD};
    use crate::error::Error;
    use base64::Engine as _;
    use serde_json::json;

    #[test]
    fn round_trips_a_json_object() {
        let value = json!({ "alg": "RS256", "kid": "r4nd0mbyt3s" });
        let encoded = encode_segment(&value).expect("encode");
        assert_eq!(encoded, "eyJhbGciOiJSUzI1NiIsImtpZCI6InI0bmQwbWJ5dDNzIn0");
        assert_eq!(decode_segment(&encoded).expect("decode"), value);
    }

    #[test]
    fn preserves_member_order() {
        let value = json!({ "zeta": 1, "alpha": 2 });
        let encoded = encode_segment(&value).expect("encode");
        let bytes = URL_SAFE_NO_PAD.decode(&encoded).expect("base64");
        assert_eq!(bytes, br#"{"zeta":1,"alpha":2}"#);
    }

    #[test]
    fn rejects_padding_characters() {
        let err = decode_segment("eyJhbGciOiJub25lIn0=").unwrap_err();
        assert!(matches!(err, Error::MalformedToken(_)));
    }

    #[test]
    fn rejects_standard_alphabet() {
        let err = decode_segment("a+b/c").unwrap_err();
        assert!(matches!(err, Error::MalformedToken(_)));
    }

    #[test]
    fn rejects_non_json_bytes() {
        let encoded = URL_SAFE_NO_PAD.encode(b"\xff\xfe");
        let err = decode_segment(&encoded).unwrap_err();
        assert!(matches!(err, Error::MalformedToken(_)));
    }
}
