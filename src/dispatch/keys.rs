use crate::error::Error;
use jsonwebtoken::{DecodingKey, EncodingKey};
use pem::parse_many;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Opaque key handle bound to a token for the duration of one sign or verify
/// call. The token never manages key material's lifecycle.
#[derive(Clone)]
pub enum JoseKey {
    Signing(Arc<EncodingKey>),
    Verification(Arc<DecodingKey>),
}

impl fmt::Debug for JoseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JoseKey::Signing(_) => f.write_str("JoseKey::Signing(..)"),
            JoseKey::Verification(_) => f.write_str("JoseKey::Verification(..)"),
        }
    }
}

impl JoseKey {
    /// Loads a signing key from PEM bytes, routing on the block tag.
    pub fn signing_from_pem(pem_bytes: &[u8]) -> Result<Self, Error> {
        let blocks =
            parse_many(pem_bytes).map_err(|e| Error::Crypto(format!("pem parse error: {e}")))?;
        for block in blocks {
            let key = match block.tag() {
                "RSA PRIVATE KEY" => EncodingKey::from_rsa_pem(pem_bytes),
                "EC PRIVATE KEY" => EncodingKey::from_ec_pem(pem_bytes),
                "PRIVATE KEY" => EncodingKey::from_rsa_pem(pem_bytes)
                    .or_else(|_| EncodingKey::from_ec_pem(pem_bytes)),
                _ => continue,
            };
            return key
                .map(|key| JoseKey::Signing(Arc::new(key)))
                .map_err(Error::from);
        }
        Err(Error::Crypto("unsupported private key format".to_string()))
    }

    /// Loads a verification key from PEM bytes, routing on the block tag.
    pub fn verification_from_pem(pem_bytes: &[u8]) -> Result<Self, Error> {
        let blocks =
            parse_many(pem_bytes).map_err(|e| Error::Crypto(format!("pem parse error: {e}")))?;
        for block in blocks {
            let key = match block.tag() {
                "RSA PUBLIC KEY" => DecodingKey::from_rsa_pem(pem_bytes),
                "PUBLIC KEY" => DecodingKey::from_rsa_pem(pem_bytes)
                    .or_else(|_| DecodingKey::from_ec_pem(pem_bytes)),
                _ => continue,
            };
            return key
                .map(|key| JoseKey::Verification(Arc::new(key)))
                .map_err(Error::from);
        }
        Err(Error::Crypto("unsupported public key format".to_string()))
    }

    /// Shared secret for the HMAC family, signing side.
    pub fn signing_from_secret(secret: &[u8]) -> Self {
        JoseKey::Signing(Arc::new(EncodingKey::from_secret(secret)))
    }

    /// Shared secret for the HMAC family, verification side.
    pub fn verification_from_secret(secret: &[u8]) -> Self {
        JoseKey::Verification(Arc::new(DecodingKey::from_secret(secret)))
    }

    /// Imports a JWK descriptor as a verification key.
    pub fn verification_from_jwk(descriptor: &Value) -> Result<Self, Error> {
        let jwk: jsonwebtoken::jwk::Jwk = serde_json::from_value(descriptor.clone())
            .map_err(|err| Error::Crypto(format!("jwk import error: {err}")))?;
        let key = DecodingKey::from_jwk(&jwk)?;
        Ok(JoseKey::Verification(Arc::new(key)))
    }
}
