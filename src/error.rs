use crate::schema::ValidationError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The caller passed a value of the wrong shape or type. Distinct from
    /// wire data that fails to parse.
    #[error("invalid argument: {0}")]
    Argument(String),
    /// Wire data does not parse into a structurally valid token.
    #[error("malformed token: {0}")]
    MalformedToken(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// Verdict of the schema collaborator, surfaced verbatim.
    #[error("schema validation error: {0}")]
    Schema(#[from] ValidationError),
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlg(String),
    #[error("jwt error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("crypto error: {0}")]
    Crypto(String),
    #[error("{0} is not supported")]
    NotSupported(&'static str),
}
