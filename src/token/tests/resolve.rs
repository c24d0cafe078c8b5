use crate::error::Error;
use crate::token::Jwt;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde_json::{json, Map, Value};

fn jwt_with_header(header: Value) -> Jwt {
    Jwt::new(header.as_object().cloned().expect("object"), Map::new())
}

fn oct_descriptor(secret: &[u8], extra: Value) -> Value {
    let mut descriptor = json!({
        "kty": "oct",
        "k": URL_SAFE_NO_PAD.encode(secret),
    });
    let object = descriptor.as_object_mut().expect("object");
    for (name, value) in extra.as_object().expect("object") {
        object.insert(name.clone(), value.clone());
    }
    descriptor
}

fn two_key_set() -> Value {
    json!({
        "keys": [
            oct_descriptor(b"kid-bound-secret", json!({ "kid": "123" })),
            oct_descriptor(b"use-bound-secret", json!({ "use": "sig" })),
        ]
    })
}

#[test]
fn rejects_a_non_jwk_shaped_argument() {
    let mut token = jwt_with_header(json!({ "alg": "HS256" }));
    for jwks in [json!(false), json!({}), json!([])] {
        let err = token.resolve_keys(&jwks).unwrap_err();
        assert!(matches!(err, Error::Argument(_)), "jwks {jwks}");
    }
    assert!(token.key().is_none());
}

#[test]
fn binds_by_kid_over_use() {
    let mut token = jwt_with_header(json!({ "alg": "HS256", "kid": "123" }));
    let resolved = token.resolve_keys(&two_key_set()).expect("resolve");
    assert!(resolved);
    assert!(token.key().is_some());
}

#[test]
fn binds_by_use_without_kid() {
    let mut token = jwt_with_header(json!({ "alg": "HS256" }));
    let resolved = token.resolve_keys(&two_key_set()).expect("resolve");
    assert!(resolved);
    assert!(token.key().is_some());
}

#[test]
fn miss_returns_false_and_leaves_key_unset() {
    let jwks = json!({
        "keys": [
            oct_descriptor(b"kid-bound-secret", json!({ "kid": "123" })),
            oct_descriptor(b"enc-secret", json!({ "use": "enc" })),
        ]
    });
    let mut token = jwt_with_header(json!({ "alg": "HS256", "kid": "234" }));
    let resolved = token.resolve_keys(&jwks).expect("resolve");
    assert!(!resolved);
    assert!(token.key().is_none());
}

#[test]
fn duplicate_kids_bind_the_first_descriptor() {
    let jwks = json!({
        "keys": [
            oct_descriptor(b"first", json!({ "kid": "dup" })),
            oct_descriptor(b"second", json!({ "kid": "dup" })),
        ]
    });
    let mut token = jwt_with_header(json!({ "alg": "HS256", "kid": "dup" }));
    assert!(token.resolve_keys(&jwks).expect("resolve"));
    assert!(token.key().is_some());
}

#[test]
fn unimportable_match_is_an_error_not_a_miss() {
    // the kid rule matches, but the descriptor carries no key material
    let jwks = json!({ "keys": [{ "kid": "123" }] });
    let mut token = jwt_with_header(json!({ "alg": "HS256", "kid": "123" }));
    let err = token.resolve_keys(&jwks).unwrap_err();
    assert!(matches!(err, Error::Crypto(_)));
    assert!(token.key().is_none());
}
