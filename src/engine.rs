use crate::codec;
use crate::dispatch;
use crate::error::Error;
use crate::schema::{JwtSchema, SchemaValidator, JWT_SCHEMA};
use crate::token::{detect, Detected, Jwt};
use log::debug;
use serde_json::{json, Value};

/// The public surface of the token engine: orchestrates parsing, the schema
/// pre-check, signing, and verification.
///
/// Operations that consult the schema collaborator or the crypto primitives
/// are asynchronous; each call completes or fails independently, with no
/// retries and no shared mutable state across callers.
pub struct TokenEngine<S = JwtSchema> {
    schema: S,
}

impl TokenEngine {
    /// An engine backed by the built-in JWT structural schema.
    pub fn new() -> Self {
        Self { schema: JwtSchema }
    }
}

impl Default for TokenEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SchemaValidator> TokenEngine<S> {
    /// Uses a caller-provided schema collaborator instead of the built-in
    /// one.
    pub fn with_schema(schema: S) -> Self {
        Self { schema }
    }

    /// Decodes a JWS Compact Serialization string. The compact path has no
    /// suspension points and is exposed synchronously.
    pub fn decode_compact(&self, token: &str) -> Result<Jwt, Error> {
        Jwt::from_compact(token)
    }

    /// Decodes raw wire input: a string takes the compact path, an object
    /// the JSON paths. JSON-form decoding awaits the schema collaborator
    /// before the token is considered constructed.
    pub async fn decode(&self, input: &Value) -> Result<Jwt, Error> {
        match detect(input)? {
            Detected::Compact(token) => {
                debug!("decoding JWS compact serialization");
                Jwt::from_compact(token)
            }
            Detected::Flattened(object) => {
                debug!("decoding JWS flattened JSON serialization");
                let token = Jwt::from_flattened(object)?;
                self.precheck(&token).await?;
                Ok(token)
            }
            Detected::General => Err(Error::NotSupported("JWS JSON general serialization")),
        }
    }

    /// Computes the token's signature and returns it in base64url form.
    ///
    /// The signing input is exactly the ASCII bytes of the two encoded
    /// segments joined by a dot. On success the token's `signature` and wire
    /// segments are updated.
    pub async fn sign(&self, token: &mut Jwt) -> Result<String, Error> {
        // The schema gate must pass strictly before signing begins.
        self.precheck(token).await?;
        let alg = dispatch::lookup_algorithm(token.alg().ok_or_else(missing_alg)?)?;
        let key = token
            .key()
            .cloned()
            .ok_or_else(|| Error::Crypto("no signing key bound to token".to_string()))?;
        let header = codec::encode_segment(token.header())?;
        let payload = codec::encode_segment(token.payload())?;
        let signing_input = format!("{header}.{payload}");
        let signature = dispatch::sign_input(alg, &key, signing_input.as_bytes())?;
        token.set_wire(header, payload, signature.clone());
        Ok(signature)
    }

    /// Signs the token and emits it as a compact string, the only
    /// serialization this engine produces regardless of the token's recorded
    /// serialization.
    pub async fn encode(&self, token: &mut Jwt) -> Result<String, Error> {
        if token.is_jwe() {
            return Err(Error::NotSupported("JWE encoding"));
        }
        self.sign(token).await?;
        let Some([header, payload, signature]) = token.segments() else {
            return Err(Error::Crypto("token has no wire segments".to_string()));
        };
        Ok(format!("{header}.{payload}.{signature}"))
    }

    /// Verifies the token's signature against its bound key.
    ///
    /// Resolves `Ok(false)` for a mismatched signature; fails only on
    /// structural problems: a failed schema pre-check, a missing key, or a
    /// missing/unreadable signature.
    pub async fn verify(&self, token: &Jwt) -> Result<bool, Error> {
        if token.is_jwe() {
            return Err(Error::NotSupported("JWE verification"));
        }
        self.precheck(token).await?;
        let alg = dispatch::lookup_algorithm(token.alg().ok_or_else(missing_alg)?)?;
        let key = token
            .key()
            .ok_or_else(|| Error::Crypto("no verification key bound to token".to_string()))?;
        let signature = token
            .signature()
            .ok_or_else(|| Error::MalformedToken("token has no signature".to_string()))?;
        // Wire tokens verify against the exact bytes that were signed;
        // programmatic tokens re-encode.
        let signing_input = match token.segments() {
            Some([header, payload, _]) => format!("{header}.{payload}"),
            None => {
                let header = codec::encode_segment(token.header())?;
                let payload = codec::encode_segment(token.payload())?;
                format!("{header}.{payload}")
            }
        };
        dispatch::verify_input(alg, key, signing_input.as_bytes(), signature)
    }

    async fn precheck(&self, token: &Jwt) -> Result<(), Error> {
        let structure = json!({
            "header": token.header(),
            "payload": token.payload(),
        });
        self.schema
            .validate(&structure, JWT_SCHEMA)
            .await
            .map_err(Error::from)
    }
}

fn missing_alg() -> Error {
    Error::MalformedToken("header has no alg member".to_string())
}
