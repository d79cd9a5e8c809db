//! Encode a value tree to compact JSON text.
//!
//! The counterpart of the decoder, kept deliberately small: one compact
//! format, insertion-order objects, and full string escaping. Non-finite
//! floats render as the bare literals the decoder accepts with
//! `allow_extended_numerics`.

use crate::value::Value;

/// Encode a value as compact JSON text.
pub fn encode(value: &Value) -> String {
    let mut out = String::new();
    encode_into(&mut out, value);
    out
}

fn encode_into(out: &mut String, value: &Value) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Integer(n) => out.push_str(&n.to_string()),
        Value::Float(f) => encode_float(out, *f),
        Value::String(s) => encode_string(out, s),
        Value::Array(arr) => {
            out.push('[');
            for (i, v) in arr.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                encode_into(out, v);
            }
            out.push(']');
        }
        Value::Object(obj) => {
            out.push('{');
            for (i, (k, v)) in obj.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                encode_string(out, k);
                out.push(':');
                encode_into(out, v);
            }
            out.push('}');
        }
    }
}

fn encode_float(out: &mut String, f: f64) {
    if f.is_nan() {
        out.push_str("NaN");
    } else if f.is_infinite() {
        out.push_str(if f > 0.0 { "Infinity" } else { "-Infinity" });
    } else {
        // Exponent notation for extreme magnitudes; `Display` would emit
        // the full decimal expansion.
        let abs = f.abs();
        let s = if abs != 0.0 && !(1e-4..1e16).contains(&abs) {
            format!("{:e}", f)
        } else {
            format!("{}", f)
        };
        out.push_str(&s);
        // Keep a fraction so the text lexes back as a float.
        if !s.contains('.') && !s.contains('e') && !s.contains('E') {
            out.push_str(".0");
        }
    }
}

fn encode_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\x08' => out.push_str("\\b"),
            '\x0c' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if (c as u32) < 0x20 => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
