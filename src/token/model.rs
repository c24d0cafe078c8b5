use crate::dispatch::JoseKey;
use crate::error::Error;
use crate::resolver;
use log::debug;
use serde_json::{Map, Value};
use std::fmt;

/// Wire form a token was parsed from. Compact is the only form the engine
/// ever emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Serialization {
    Compact,
    Json,
    FlattenedJson,
}

/// Signed vs encrypted, derived from the header; never stored redundantly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Jws,
    Jwe,
}

/// In-memory representation of a JOSE token.
///
/// A value object with no background lifecycle: the parser constructs it from
/// wire form, the key resolver may bind `key` on a successful match, and the
/// engine sets `signature`/`segments` as a side effect of a successful
/// encode. It is not safe for concurrent mutation; each decode/encode/verify
/// call must operate on an exclusively owned instance.
#[derive(Clone)]
pub struct Jwt {
    /// Raw wire segments, in fixed order: protected header, payload,
    /// signature. Present when the token came from (or produced) wire form.
    pub(crate) segments: Option<[String; 3]>,
    pub(crate) header: Map<String, Value>,
    pub(crate) payload: Map<String, Value>,
    /// Signature in its base64url string form until verification time.
    pub(crate) signature: Option<String>,
    pub(crate) serialization: Serialization,
    pub(crate) key: Option<JoseKey>,
}

impl Jwt {
    /// Constructs a token programmatically, ahead of an encode.
    pub fn new(header: Map<String, Value>, payload: Map<String, Value>) -> Self {
        Self {
            segments: None,
            header,
            payload,
            signature: None,
            serialization: Serialization::Compact,
            key: None,
        }
    }

    /// Binds a key handle for the next sign or verify call.
    pub fn with_key(mut self, key: JoseKey) -> Self {
        self.key = Some(key);
        self
    }

    pub fn set_key(&mut self, key: JoseKey) {
        self.key = Some(key);
    }

    pub fn header(&self) -> &Map<String, Value> {
        &self.header
    }

    pub fn payload(&self) -> &Map<String, Value> {
        &self.payload
    }

    pub fn signature(&self) -> Option<&str> {
        self.signature.as_deref()
    }

    pub fn segments(&self) -> Option<&[String; 3]> {
        self.segments.as_ref()
    }

    pub fn serialization(&self) -> Serialization {
        self.serialization
    }

    pub fn key(&self) -> Option<&JoseKey> {
        self.key.as_ref()
    }

    pub fn alg(&self) -> Option<&str> {
        self.header.get("alg").and_then(Value::as_str)
    }

    pub fn kid(&self) -> Option<&str> {
        self.header.get("kid").and_then(Value::as_str)
    }

    pub fn typ(&self) -> Option<&str> {
        self.header.get("typ").and_then(Value::as_str)
    }

    /// An `enc` header member marks the token as encrypted rather than
    /// signed; this is the only discriminator at this layer.
    pub fn is_jwe(&self) -> bool {
        self.header.contains_key("enc")
    }

    pub fn kind(&self) -> TokenKind {
        if self.is_jwe() {
            TokenKind::Jwe
        } else {
            TokenKind::Jws
        }
    }

    /// Matches this token against a JWK Set and binds the selected
    /// verification key.
    ///
    /// `jwks` must be an object exposing a `keys` sequence; any other shape
    /// fails with an argument error. A resolution miss is an expected,
    /// recoverable outcome: the key binding is left unchanged and `Ok(false)`
    /// is returned for the caller to branch on.
    pub fn resolve_keys(&mut self, jwks: &Value) -> Result<bool, Error> {
        let keys = resolver::keys_member(jwks)?;
        let Some(descriptor) = resolver::select_descriptor(keys, self.kid()) else {
            debug!("key resolution miss; kid={:?}", self.kid());
            return Ok(false);
        };
        let key = JoseKey::verification_from_jwk(descriptor)?;
        self.key = Some(key);
        Ok(true)
    }

    /// Records the wire form produced by a successful signature computation.
    pub(crate) fn set_wire(&mut self, header: String, payload: String, signature: String) {
        self.segments = Some([header, payload, signature.clone()]);
        self.signature = Some(signature);
    }
}

impl fmt::Debug for Jwt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Jwt")
            .field("segments", &self.segments)
            .field("header", &self.header)
            .field("payload", &self.payload)
            .field("signature", &self.signature)
            .field("serialization", &self.serialization)
            .field("key", &self.key)
            .finish()
    }
}
