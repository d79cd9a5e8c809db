//! Value dispatcher, composite parsers, and the top-level driver.
//!
//! A [`Session`] is a one-shot recursive-descent parse over a single byte
//! buffer and configuration snapshot. The dispatcher selects a production
//! from the next byte; scalar lexers report "no match" with `None` and the
//! dispatcher's callers convert an exhausted set of alternatives into
//! [`DecodeError::UnexpectedToken`]. Composite depth is threaded as an
//! explicit parameter so every exit path leaves the count balanced.

use crate::config::DecodeConfig;
use crate::error::{DecodeError, Result};
use crate::lexer;
use crate::resolve::{Materialized, TypeResolver};
use crate::value::{Object, Value};

/// One decode pass: buffer, configuration, and optional type resolver.
/// Sessions are single-use and never outlive the decode call.
pub(crate) struct Session<'a> {
    buf: &'a [u8],
    config: &'a DecodeConfig,
    resolver: Option<&'a dyn TypeResolver>,
}

impl<'a> Session<'a> {
    pub(crate) fn new(
        buf: &'a [u8],
        config: &'a DecodeConfig,
        resolver: Option<&'a dyn TypeResolver>,
    ) -> Self {
        Self {
            buf,
            config,
            resolver,
        }
    }

    /// Decode the whole buffer: ignorables, one array or object root,
    /// ignorables, end of input. Bare scalars are valid values but not
    /// valid documents.
    pub(crate) fn parse_document(&self) -> Result<Value> {
        if self.buf.len() < 2 {
            return Err(DecodeError::InputTooShort);
        }

        let i = lexer::skip_ignorable(self.buf, 0);
        let (value, next) = match self.buf.get(i).copied() {
            Some(b'[') => self.parse_array(i, 1)?,
            Some(b'{') => self.parse_object(i, 1)?,
            _ => return Err(self.unexpected(i)),
        };

        let end = lexer::skip_ignorable(self.buf, next);
        if end != self.buf.len() {
            return Err(self.unexpected(end));
        }
        Ok(value)
    }

    /// An `UnexpectedToken` spanning from `i` to the end of the buffer.
    fn unexpected(&self, i: usize) -> DecodeError {
        DecodeError::unexpected_token(self.buf, i, self.buf.len())
    }

    // ========================================================================
    // Value dispatcher
    // ========================================================================

    /// Try to parse one value at `i`. Returns `Ok(None)` when no production
    /// matches, leaving the error decision to the caller.
    fn parse_value(&self, i: usize, depth: usize) -> Result<Option<(Value, usize)>> {
        let Some(&b) = self.buf.get(i) else {
            return Ok(None);
        };

        match b {
            b'n' => Ok(self.parse_literal(i, b"null", Value::Null)),
            b't' => Ok(self.parse_literal(i, b"true", Value::Bool(true))),
            b'f' => Ok(self.parse_literal(i, b"false", Value::Bool(false))),
            b'N' if self.config.allow_extended_numerics => {
                Ok(self.parse_literal(i, b"NaN", Value::Float(f64::NAN)))
            }
            b'I' if self.config.allow_extended_numerics => {
                Ok(self.parse_literal(i, b"Infinity", Value::Float(f64::INFINITY)))
            }
            b'-' | b'0'..=b'9' => Ok(self.parse_number(i)),
            b'"' => {
                let matched = lexer::match_string(self.buf, i)?;
                Ok(matched.map(|(s, next)| (Value::String(s), next)))
            }
            b'[' => self.parse_array(i, depth).map(Some),
            b'{' => self.parse_object(i, depth).map(Some),
            _ => Ok(None),
        }
    }

    /// Match an exact literal at `i`.
    fn parse_literal(&self, i: usize, lit: &[u8], value: Value) -> Option<(Value, usize)> {
        if lexer::starts_with(self.buf, i, lit) {
            Some((value, i + lit.len()))
        } else {
            None
        }
    }

    /// Number dispatch: `-Infinity` first when extensions are on, then the
    /// float lexer (longest match), then the integer lexer.
    fn parse_number(&self, i: usize) -> Option<(Value, usize)> {
        if self.config.allow_extended_numerics
            && lexer::starts_with(self.buf, i, b"-Infinity")
        {
            return Some((Value::Float(f64::NEG_INFINITY), i + b"-Infinity".len()));
        }
        if let Some((f, next)) = lexer::match_float(self.buf, i) {
            return Some((Value::Float(f), next));
        }
        lexer::match_integer(self.buf, i).map(|(n, next)| (Value::Integer(n), next))
    }

    // ========================================================================
    // Composite parsers
    // ========================================================================

    /// Check the nesting guard before entering a composite at `depth`.
    fn check_depth(&self, depth: usize) -> Result<()> {
        let ceiling = self.config.max_nesting;
        if ceiling != 0 && depth > ceiling {
            return Err(DecodeError::NestingTooDeep { depth });
        }
        Ok(())
    }

    /// Parse an array whose `[` sits at `i`. Elements run at `depth + 1`.
    fn parse_array(&self, i: usize, depth: usize) -> Result<(Value, usize)> {
        self.check_depth(depth)?;

        let mut pos = lexer::skip_ignorable(self.buf, i + 1);
        let mut items = Vec::new();

        if self.buf.get(pos) == Some(&b']') {
            return Ok((Value::Array(items), pos + 1));
        }

        loop {
            let Some((value, next)) = self.parse_value(pos, depth + 1)? else {
                return Err(self.unexpected(pos));
            };
            items.push(value);
            pos = lexer::skip_ignorable(self.buf, next);

            match self.buf.get(pos).copied() {
                Some(b']') => return Ok((Value::Array(items), pos + 1)),
                Some(b',') => pos = lexer::skip_ignorable(self.buf, pos + 1),
                _ => return Err(self.unexpected(pos)),
            }
        }
    }

    /// Parse an object whose `{` sits at `i`. Values run at `depth + 1`.
    /// Duplicate keys overwrite in place, so the last write wins while the
    /// key keeps its original position.
    fn parse_object(&self, i: usize, depth: usize) -> Result<(Value, usize)> {
        self.check_depth(depth)?;

        let mut pos = lexer::skip_ignorable(self.buf, i + 1);
        let mut obj = Object::new();

        if self.buf.get(pos) == Some(&b'}') {
            return self.materialize(obj, pos + 1);
        }

        loop {
            if self.buf.get(pos) != Some(&b'"') {
                return Err(self.unexpected(pos));
            }
            let Some((key, next)) = lexer::match_string(self.buf, pos)? else {
                return Err(self.unexpected(pos));
            };

            pos = lexer::skip_ignorable(self.buf, next);
            if self.buf.get(pos) != Some(&b':') {
                return Err(self.unexpected(pos));
            }
            pos = lexer::skip_ignorable(self.buf, pos + 1);

            let Some((value, next)) = self.parse_value(pos, depth + 1)? else {
                return Err(self.unexpected(pos));
            };
            obj.insert(key, value);
            pos = lexer::skip_ignorable(self.buf, next);

            match self.buf.get(pos).copied() {
                Some(b'}') => return self.materialize(obj, pos + 1),
                Some(b',') => pos = lexer::skip_ignorable(self.buf, pos + 1),
                _ => return Err(self.unexpected(pos)),
            }
        }
    }

    // ========================================================================
    // Type materialization
    // ========================================================================

    /// Offer a finished object to the resolver when it carries the tag key
    /// with a non-empty string value. The raw object stands unless the
    /// resolver builds a replacement; an unknown path fails the decode.
    fn materialize(&self, obj: Object, next: usize) -> Result<(Value, usize)> {
        if !self.config.materialize_types {
            return Ok((Value::Object(obj), next));
        }
        let Some(resolver) = self.resolver else {
            return Ok((Value::Object(obj), next));
        };
        let path = match obj.get(&self.config.type_tag_key) {
            Some(Value::String(path)) if !path.is_empty() => path.clone(),
            _ => return Ok((Value::Object(obj), next)),
        };

        match resolver.resolve_and_build(&path, &obj)? {
            Materialized::Built(value) => Ok((value, next)),
            Materialized::Declined => Ok((Value::Object(obj), next)),
            Materialized::UnknownPath => Err(DecodeError::UndefinedType { path }),
        }
    }
}
