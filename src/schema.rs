use serde_json::Value;
use std::future::Future;
use std::pin::Pin;

/// Name of the schema the engine validates token structures against.
pub const JWT_SCHEMA: &str = "JWT";

/// Structured verdict from a schema collaborator. The `pointer` is a JSON
/// pointer into the rejected structure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("schema {schema} violated at {pointer}: {message}")]
pub struct ValidationError {
    pub schema: String,
    pub pointer: String,
    pub message: String,
}

pub type ValidationFuture<'a> = Pin<Box<dyn Future<Output = Result<(), ValidationError>> + Send + 'a>>;

/// External structural gate consulted before a token structure is trusted.
///
/// The engine depends only on this contract; validation may suspend, so the
/// result is a boxed future.
pub trait SchemaValidator: Send + Sync {
    fn validate<'a>(&'a self, value: &'a Value, schema: &'a str) -> ValidationFuture<'a>;
}

/// Built-in JWT structural schema.
///
/// Checks the `{ "header": ..., "payload": ... }` structure the engine
/// assembles: the protected header must be an object carrying a string `alg`,
/// and registered payload claims must have their registered types when
/// present. A `null` member counts as present and ill-typed.
#[derive(Debug, Default, Clone, Copy)]
pub struct JwtSchema;

impl SchemaValidator for JwtSchema {
    fn validate<'a>(&'a self, value: &'a Value, schema: &'a str) -> ValidationFuture<'a> {
        Box::pin(async move { validate_jwt_shape(value, schema) })
    }
}

fn validate_jwt_shape(value: &Value, schema: &str) -> Result<(), ValidationError> {
    let Some(root) = value.as_object() else {
        return Err(violation(schema, "", "expected an object"));
    };

    let Some(header) = root.get("header").and_then(Value::as_object) else {
        return Err(violation(schema, "/header", "expected an object"));
    };
    if !matches!(header.get("alg"), Some(Value::String(_))) {
        return Err(violation(schema, "/header/alg", "required string member"));
    }
    for member in ["kid", "enc", "typ"] {
        if let Some(found) = header.get(member) {
            if !found.is_string() {
                return Err(violation(
                    schema,
                    &format!("/header/{member}"),
                    "expected a string",
                ));
            }
        }
    }

    let Some(payload) = root.get("payload").and_then(Value::as_object) else {
        return Err(violation(schema, "/payload", "expected an object"));
    };
    for claim in ["iss", "sub", "jti"] {
        if let Some(found) = payload.get(claim) {
            if !found.is_string() {
                return Err(violation(
                    schema,
                    &format!("/payload/{claim}"),
                    "expected a string",
                ));
            }
        }
    }
    if let Some(aud) = payload.get("aud") {
        let valid = match aud {
            Value::String(_) => true,
            Value::Array(entries) => entries.iter().all(Value::is_string),
            _ => false,
        };
        if !valid {
            return Err(violation(
                schema,
                "/payload/aud",
                "expected a string or an array of strings",
            ));
        }
    }
    for claim in ["exp", "nbf", "iat"] {
        if let Some(found) = payload.get(claim) {
            if !found.is_number() {
                return Err(violation(
                    schema,
                    &format!("/payload/{claim}"),
                    "expected a number",
                ));
            }
        }
    }

    Ok(())
}

fn violation(schema: &str, pointer: &str, message: &str) -> ValidationError {
    ValidationError {
        schema: schema.to_string(),
        pointer: pointer.to_string(),
        message: message.to_string(),
    }
}
