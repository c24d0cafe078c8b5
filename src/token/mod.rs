mod model;
mod parse;

#[cfg(test)]
mod tests;

pub use model::{Jwt, Serialization, TokenKind};

pub(crate) use parse::{detect, Detected};
