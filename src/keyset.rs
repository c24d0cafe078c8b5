use crate::dispatch::SUPPORTED_ALG_NAMES;
use crate::error::Error;
use log::warn;
use serde_json::Value;

/// A sanitized JWK Set plus a record of what was altered.
#[derive(Debug, Clone, serde::Serialize)]
pub struct KeysetSanitizeReport {
    /// The key set with offending `alg` members stripped, ready for
    /// [`crate::Jwt::resolve_keys`].
    pub jwks: Value,
    pub removed_algs: Vec<RemovedAlg>,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct RemovedAlg {
    pub kid: Option<String>,
    pub alg: Option<String>,
    pub reason: RemovedAlgReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum RemovedAlgReason {
    NotString,
    Unsupported,
}

/// Parses a raw JWK Set body and sanitizes it.
pub fn keyset_from_slice(body: &[u8]) -> Result<Value, Error> {
    let report = keyset_from_slice_with_report(body)?;
    Ok(report.jwks)
}

pub fn keyset_from_slice_with_report(body: &[u8]) -> Result<KeysetSanitizeReport, Error> {
    let value: Value = serde_json::from_slice(body)?;
    keyset_from_value(value)
}

/// Sanitizes an in-memory JWK Set: descriptors whose `alg` member is not a
/// string, or names an algorithm outside the supported set, keep their key
/// material but lose the `alg` member. The set itself must expose a `keys`
/// array.
pub fn keyset_from_value(mut value: Value) -> Result<KeysetSanitizeReport, Error> {
    if !value.get("keys").is_some_and(Value::is_array) {
        return Err(Error::Argument("Invalid JWK argument".to_string()));
    }
    let removed_algs = sanitize_keys(&mut value);
    Ok(KeysetSanitizeReport {
        jwks: value,
        removed_algs,
    })
}

fn sanitize_keys(value: &mut Value) -> Vec<RemovedAlg> {
    let Some(keys) = value.get_mut("keys").and_then(Value::as_array_mut) else {
        return Vec::new();
    };
    let mut removed = Vec::new();
    for key in keys {
        let Some(object) = key.as_object_mut() else {
            continue;
        };
        let Some(alg_value) = object.get("alg").cloned() else {
            continue;
        };
        let kid = object
            .get("kid")
            .and_then(Value::as_str)
            .map(|s| s.to_string());
        let alg = match alg_value.as_str() {
            Some(alg) => alg,
            None => {
                warn!(
                    "jwk alg is not a string; kid={}",
                    kid.as_deref().unwrap_or("<none>")
                );
                object.remove("alg");
                removed.push(RemovedAlg {
                    kid,
                    alg: None,
                    reason: RemovedAlgReason::NotString,
                });
                continue;
            }
        };
        if !SUPPORTED_ALG_NAMES.contains(&alg) {
            warn!(
                "jwk alg unsupported; kid={}, alg={}",
                kid.as_deref().unwrap_or("<none>"),
                alg
            );
            object.remove("alg");
            removed.push(RemovedAlg {
                kid,
                alg: Some(alg.to_string()),
                reason: RemovedAlgReason::Unsupported,
            });
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::{keyset_from_slice_with_report, keyset_from_value, RemovedAlgReason};
    use crate::error::Error;
    use serde_json::json;

    #[test]
    fn keeps_supported_algs() {
        let report = keyset_from_value(json!({
            "keys": [{ "kty": "oct", "kid": "a", "alg": "HS256" }]
        }))
        .expect("report");
        assert!(report.removed_algs.is_empty());
        assert_eq!(report.jwks["keys"][0]["alg"], "HS256");
    }

    #[test]
    fn strips_unsupported_algs_but_keeps_the_key() {
        let report = keyset_from_value(json!({
            "keys": [{ "kty": "oct", "kid": "a", "alg": "RSA-OAEP" }]
        }))
        .expect("report");
        assert_eq!(report.removed_algs.len(), 1);
        assert_eq!(report.removed_algs[0].reason, RemovedAlgReason::Unsupported);
        assert_eq!(report.removed_algs[0].alg.as_deref(), Some("RSA-OAEP"));
        assert!(report.jwks["keys"][0].get("alg").is_none());
        assert_eq!(report.jwks["keys"][0]["kid"], "a");
    }

    #[test]
    fn strips_non_string_algs() {
        let report = keyset_from_value(json!({
            "keys": [{ "kty": "oct", "alg": 256 }]
        }))
        .expect("report");
        assert_eq!(report.removed_algs.len(), 1);
        assert_eq!(report.removed_algs[0].reason, RemovedAlgReason::NotString);
    }

    #[test]
    fn rejects_sets_without_a_keys_array() {
        let err = keyset_from_value(json!({ "keys": "nope" })).unwrap_err();
        assert!(matches!(err, Error::Argument(_)));
    }

    #[test]
    fn parses_a_raw_body() {
        let body = br#"{ "keys": [{ "kty": "oct", "kid": "a", "use": "sig" }] }"#;
        let report = keyset_from_slice_with_report(body).expect("report");
        assert_eq!(report.jwks["keys"][0]["use"], "sig");
    }
}
