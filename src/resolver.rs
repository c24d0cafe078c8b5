use crate::error::Error;
use log::debug;
use serde_json::Value;

/// Extracts the `keys` sequence from a JWK Set argument. Any other shape is a
/// caller-contract violation, not a mismatch result.
pub(crate) fn keys_member(jwks: &Value) -> Result<&[Value], Error> {
    jwks.get("keys")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .ok_or_else(|| Error::Argument("Invalid JWK argument".to_string()))
}

/// Selects a key descriptor for a token, first match wins in set order:
///
/// 1. a descriptor whose `kid` equals the token's header `kid`;
/// 2. otherwise the first descriptor whose `use` is `"sig"`.
///
/// An explicit key identifier beats the generic signing-role flag when both
/// could match; duplicate `kid`s are legal and the first in order wins.
pub(crate) fn select_descriptor<'a>(keys: &'a [Value], kid: Option<&str>) -> Option<&'a Value> {
    if let Some(kid) = kid {
        if let Some(descriptor) = keys
            .iter()
            .find(|entry| entry.get("kid").and_then(Value::as_str) == Some(kid))
        {
            return Some(descriptor);
        }
        debug!("no JWK matched kid {kid}; falling back to use=sig");
    }
    keys.iter()
        .find(|entry| entry.get("use").and_then(Value::as_str) == Some("sig"))
}
