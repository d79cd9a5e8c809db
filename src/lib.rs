//! JSON decoder with controlled extensions.
//!
//! `jayson` decodes a byte buffer of JSON text into a generic value tree,
//! supporting a handful of controlled extensions on top of the standard
//! grammar:
//!
//! - arbitrary-precision integers (every integer token becomes a `BigInt`),
//! - `/* block */` and `// line` comments between grammar elements,
//! - opt-in bare `NaN`, `Infinity`, and `-Infinity` literals,
//! - a configurable nesting ceiling for arrays and objects,
//! - optional materialization of tagged objects through an injected type
//!   resolver.
//!
//! The document grammar is strict at the root: a document is one array or
//! object, with nothing but ignorable tokens around it. Bare scalars are
//! values inside composites but not documents on their own.
//!
//! # Example
//!
//! ```
//! use jayson::{decode, Value};
//!
//! let value = decode(br#"{"a": [1, 2.5, "three"]}"#).unwrap();
//! assert_eq!(value.as_object().unwrap()["a"].as_array().unwrap().len(), 3);
//! ```
//!
//! Decoding is one-shot and synchronous: each call builds a private session
//! over the buffer and configuration, runs to completion, and discards the
//! session. Independent decodes share nothing and may run in parallel.

mod config;
mod encode;
mod error;
mod lexer;
mod parser;
mod resolve;
mod value;

pub use config::{DecodeConfig, DEFAULT_MAX_NESTING, DEFAULT_TYPE_TAG_KEY};
pub use encode::encode;
pub use error::{DecodeError, ErrorKind, Result};
pub use resolve::{Materialized, TypeResolver};
pub use value::{Object, Value};

use parser::Session;

/// Decode a JSON document with the default configuration and no type
/// resolver.
pub fn decode(input: &[u8]) -> Result<Value> {
    Session::new(input, &DecodeConfig::default(), None).parse_document()
}

/// Decode a JSON document with an explicit configuration.
///
/// Without a resolver, `materialize_types` has no effect: tagged objects
/// decode as plain objects.
pub fn decode_with_config(input: &[u8], config: &DecodeConfig) -> Result<Value> {
    Session::new(input, config, None).parse_document()
}

/// Decode a JSON document, offering tagged objects to `resolver` when the
/// configuration enables materialization.
pub fn decode_with_resolver(
    input: &[u8],
    config: &DecodeConfig,
    resolver: &dyn TypeResolver,
) -> Result<Value> {
    Session::new(input, config, Some(resolver)).parse_document()
}
