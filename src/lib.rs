#![forbid(unsafe_code)]

mod codec;
mod dispatch;
mod engine;
mod error;
mod keyset;
mod resolver;
mod schema;
mod token;

pub use dispatch::JoseKey;

pub use engine::TokenEngine;

pub use error::Error;

pub use keyset::{
    keyset_from_slice, keyset_from_slice_with_report, keyset_from_value, KeysetSanitizeReport,
    RemovedAlg, RemovedAlgReason,
};

pub use schema::{JwtSchema, SchemaValidator, ValidationError, ValidationFuture, JWT_SCHEMA};

pub use token::{Jwt, Serialization, TokenKind};
