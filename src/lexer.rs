//! Lexical primitives and scalar lexers.
//!
//! Every lexer here operates on byte offsets into the immutable input
//! buffer and signals "no match" with `None`, leaving it to the caller to
//! decide whether that is an error. The one exception is the string
//! unescaper, which raises [`DecodeError::PartialCharacter`] for a broken
//! surrogate-pair escape: at that point the string has already matched
//! syntactically, so there is no alternative left to try.

use crate::error::{DecodeError, Result};
use num_bigint::BigInt;

/// Whitespace bytes that may appear between grammar elements.
fn is_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

fn is_digit(b: u8) -> bool {
    b.is_ascii_digit()
}

/// Test whether `buf[i..]` starts with `lit`.
pub(crate) fn starts_with(buf: &[u8], i: usize, lit: &[u8]) -> bool {
    buf.get(i..i + lit.len()) == Some(lit)
}

/// Skip ignorable tokens (whitespace, `/* */` comments, `//` comments)
/// starting at `i`, returning the offset of the first non-ignorable byte.
///
/// A `/*` with no closing `*/` is not consumed: the scan stops at the `/`,
/// which the caller then reports as an unexpected token.
pub(crate) fn skip_ignorable(buf: &[u8], mut i: usize) -> usize {
    loop {
        while i < buf.len() && is_whitespace(buf[i]) {
            i += 1;
        }
        if starts_with(buf, i, b"/*") {
            match find_subslice(buf, i + 2, b"*/") {
                Some(close) => i = close + 2,
                None => return i,
            }
        } else if starts_with(buf, i, b"//") {
            while i < buf.len() && buf[i] != b'\n' {
                i += 1;
            }
        } else {
            return i;
        }
    }
}

/// Find the first occurrence of `needle` at or after `from`.
fn find_subslice(buf: &[u8], from: usize, needle: &[u8]) -> Option<usize> {
    if from > buf.len() {
        return None;
    }
    buf[from..]
        .windows(needle.len())
        .position(|w| w == needle)
        .map(|p| from + p)
}

// ============================================================================
// Number lexers
// ============================================================================

/// Match the integer-part production `-?(0|[1-9][0-9]*)` at `i`, returning
/// the offset one past the last matched byte. A leading zero cannot be
/// followed by further digits.
fn match_int_part(buf: &[u8], i: usize) -> Option<usize> {
    let mut j = i;
    if j < buf.len() && buf[j] == b'-' {
        j += 1;
    }
    if j >= buf.len() {
        return None;
    }
    match buf[j] {
        b'0' => Some(j + 1),
        b'1'..=b'9' => {
            j += 1;
            while j < buf.len() && is_digit(buf[j]) {
                j += 1;
            }
            Some(j)
        }
        _ => None,
    }
}

/// Match an integer token at `i`, returning its value and end offset.
pub(crate) fn match_integer(buf: &[u8], i: usize) -> Option<(BigInt, usize)> {
    let end = match_int_part(buf, i)?;
    let n = BigInt::parse_bytes(&buf[i..end], 10)?;
    Some((n, end))
}

/// Match a float token at `i`: an integer part followed by a fraction, an
/// exponent, or both. Returns the value and end offset. An integer part
/// with neither is not a float and yields no match, so the dispatcher can
/// fall through to the integer lexer.
pub(crate) fn match_float(buf: &[u8], i: usize) -> Option<(f64, usize)> {
    let mut j = match_int_part(buf, i)?;
    let mut is_float = false;

    if j < buf.len() && buf[j] == b'.' {
        let mut k = j + 1;
        while k < buf.len() && is_digit(buf[k]) {
            k += 1;
        }
        if k == j + 1 {
            // A dot with no digit cannot extend any numeric token.
            return None;
        }
        j = k;
        is_float = true;
    }

    if j < buf.len() && (buf[j] == b'e' || buf[j] == b'E') {
        let mut k = j + 1;
        if k < buf.len() && (buf[k] == b'+' || buf[k] == b'-') {
            k += 1;
        }
        let digits = k;
        while k < buf.len() && is_digit(buf[k]) {
            k += 1;
        }
        if k == digits {
            return None;
        }
        j = k;
        is_float = true;
    }

    if !is_float {
        return None;
    }

    // The matched span is ASCII by construction.
    let text = std::str::from_utf8(&buf[i..j]).ok()?;
    let f: f64 = text.parse().ok()?;
    Some((f, j))
}

// ============================================================================
// String lexer
// ============================================================================

/// Match a string token whose opening quote sits at `i`.
///
/// Returns `Ok(None)` when the span is not a valid string (unterminated,
/// unescaped control byte, unrecognized escape, malformed `\u`, or invalid
/// UTF-8 in a verbatim run), letting the caller raise its own error.
/// Returns `Err` only for a broken surrogate pair, which is a hard failure
/// of the whole decode.
pub(crate) fn match_string(buf: &[u8], i: usize) -> Result<Option<(String, usize)>> {
    debug_assert_eq!(buf[i], b'"');

    // First locate the closing quote so a failed match never pays for
    // unescaping. Escape payloads are validated during conversion.
    let mut j = i + 1;
    let close = loop {
        if j >= buf.len() {
            return Ok(None);
        }
        match buf[j] {
            b'"' => break j,
            b'\\' => {
                if j + 1 >= buf.len() {
                    return Ok(None);
                }
                j += 2;
            }
            b if b < 0x20 => return Ok(None),
            _ => j += 1,
        }
    };

    match unescape(buf, i + 1, close)? {
        Some(s) => Ok(Some((s, close + 1))),
        None => Ok(None),
    }
}

/// Convert the string content span `[start, close)` into an owned string,
/// decoding escapes. Verbatim runs are copied without re-encoding.
fn unescape(buf: &[u8], start: usize, close: usize) -> Result<Option<String>> {
    let mut out: Vec<u8> = Vec::with_capacity(close - start);
    let mut k = start;

    while k < close {
        if buf[k] != b'\\' {
            let run = start_of_next_escape(buf, k, close);
            out.extend_from_slice(&buf[k..run]);
            k = run;
            continue;
        }

        let esc = k;
        match buf[k + 1] {
            b'"' => out.push(b'"'),
            b'\\' => out.push(b'\\'),
            b'/' => out.push(b'/'),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0C),
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'u' => {
                let unit = match read_hex4(buf, k + 2, close) {
                    Some(u) => u,
                    None => return Ok(None),
                };
                if (0xDC00..=0xDFFF).contains(&unit) {
                    // Low surrogate with no preceding high surrogate.
                    return Err(DecodeError::partial_character(buf, esc, close));
                }
                if (0xD800..=0xDBFF).contains(&unit) {
                    let lo = match read_low_surrogate(buf, k + 6, close) {
                        Some(lo) => lo,
                        None => return Err(DecodeError::partial_character(buf, esc, close)),
                    };
                    let scalar =
                        0x10000 + ((unit as u32 - 0xD800) << 10) + (lo as u32 - 0xDC00);
                    push_scalar(&mut out, scalar);
                    k += 12;
                    continue;
                }
                push_scalar(&mut out, unit as u32);
                k += 6;
                continue;
            }
            _ => return Ok(None),
        }
        k += 2;
    }

    match String::from_utf8(out) {
        Ok(s) => Ok(Some(s)),
        Err(_) => Ok(None),
    }
}

/// Offset of the next backslash in `[k, close)`, or `close`.
fn start_of_next_escape(buf: &[u8], mut k: usize, close: usize) -> usize {
    while k < close && buf[k] != b'\\' {
        k += 1;
    }
    k
}

/// Read exactly four hex digits at `k`, staying inside `close`.
fn read_hex4(buf: &[u8], k: usize, close: usize) -> Option<u16> {
    if k + 4 > close {
        return None;
    }
    let mut unit: u16 = 0;
    for &b in &buf[k..k + 4] {
        let digit = (b as char).to_digit(16)? as u16;
        unit = (unit << 4) | digit;
    }
    Some(unit)
}

/// Read a `\uDC00`..`\uDFFF` escape at `k`, the continuation of a high
/// surrogate.
fn read_low_surrogate(buf: &[u8], k: usize, close: usize) -> Option<u16> {
    if k + 2 > close || buf[k] != b'\\' || buf[k + 1] != b'u' {
        return None;
    }
    let unit = read_hex4(buf, k + 2, close)?;
    if (0xDC00..=0xDFFF).contains(&unit) {
        Some(unit)
    } else {
        None
    }
}

/// Append a Unicode scalar value as UTF-8. Surrogate ranges are excluded
/// by the callers, so the conversion cannot fail; a stray value is dropped
/// rather than panicking.
fn push_scalar(out: &mut Vec<u8>, scalar: u32) {
    if let Some(c) = char::from_u32(scalar) {
        let mut utf8 = [0u8; 4];
        out.extend_from_slice(c.encode_utf8(&mut utf8).as_bytes());
    }
}
