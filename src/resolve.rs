//! Type-materialization capability.
//!
//! After the object parser finishes a tagged object, it offers the object
//! to a [`TypeResolver`] injected at session construction. The decoder
//! itself never looks types up by path; it only reacts to the resolver's
//! verdict, which keeps the core testable without a real type registry.

use crate::error::Result;
use crate::value::{Object, Value};

/// Outcome of a [`TypeResolver::resolve_and_build`] call.
#[derive(Debug)]
pub enum Materialized {
    /// The resolver constructed an instance; it replaces the raw object.
    Built(Value),
    /// The type exists but offers no constructor; the raw object stands.
    Declined,
    /// No type is registered under the path; the decode fails with
    /// [`crate::DecodeError::UndefinedType`].
    UnknownPath,
}

/// Registry capability the decoder calls for tagged objects.
///
/// `type_path` is the string found under the session's tag key and `fields`
/// is the complete decoded object, tag included. Any error other than an
/// unknown path should be returned as `Err` and will propagate out of the
/// decode unchanged.
pub trait TypeResolver {
    fn resolve_and_build(&self, type_path: &str, fields: &Object) -> Result<Materialized>;
}
