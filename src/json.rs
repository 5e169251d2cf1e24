//! JSON body encoding.
//!
//! Response bodies use the conventional "readable compact" layout: `", "`
//! between members, `": "` between key and value, and every non-ASCII
//! character written as a `\uXXXX` escape. `{"ip": "1.2.3.4"}` is byte-for-byte
//! what clients of the `/ip` route have always received.

use std::io;

use serde::Serialize;
use serde_json::ser::{Formatter, Serializer};

/// Serialises `value` into a response body.
pub fn to_vec<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut out = Vec::with_capacity(64);
    let mut ser = Serializer::with_formatter(&mut out, SpacedAscii);
    value.serialize(&mut ser)?;
    Ok(out)
}

/// `value` as a JSON string literal, escaped exactly as [`to_vec`] escapes it.
///
/// Building a body from literals and `quoted` strings cannot fail, which is
/// what lets the routes answer without a serialisation error path.
pub(crate) fn quoted(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            ' '..='~' | '\u{7f}' => out.push(ch),
            _ => {
                let mut units = [0u16; 2];
                for unit in ch.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{unit:04x}"));
                }
            }
        }
    }
    out.push('"');
    out
}

struct SpacedAscii;

impl Formatter for SpacedAscii {
    fn begin_array_value<W: ?Sized + io::Write>(&mut self, w: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { w.write_all(b", ") }
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, w: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { w.write_all(b", ") }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, w: &mut W) -> io::Result<()> {
        w.write_all(b": ")
    }

    fn write_string_fragment<W: ?Sized + io::Write>(&mut self, w: &mut W, fragment: &str) -> io::Result<()> {
        if fragment.is_ascii() {
            return w.write_all(fragment.as_bytes());
        }
        let mut units = [0u16; 2];
        for ch in fragment.chars() {
            if ch.is_ascii() {
                w.write_all(&[ch as u8])?;
            } else {
                for unit in ch.encode_utf16(&mut units) {
                    write!(w, "\\u{unit:04x}")?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn separators_carry_a_space() {
        let body = to_vec(&json!({"code": 404, "list": [1, 2]})).unwrap();
        assert_eq!(body, br#"{"code": 404, "list": [1, 2]}"#);
    }

    #[test]
    fn non_ascii_is_escaped() {
        let body = to_vec(&json!({"message": "Recurso /camión no encontrado"})).unwrap();
        assert_eq!(body, br#"{"message": "Recurso /cami\u00f3n no encontrado"}"#);
    }

    #[test]
    fn astral_characters_become_surrogate_pairs() {
        let body = to_vec("🚲").unwrap();
        assert_eq!(body, br#""\ud83d\udeb2""#);
    }

    #[test]
    fn quoted_matches_serialised_strings() {
        for value in ["", "1.2.3.4", "/quote\"d\\", "tab\tnl\n\r\u{8}\u{c}", "\u{1}\u{1f}\u{7f}", "/camión", "🚲"] {
            assert_eq!(quoted(value).into_bytes(), to_vec(value).unwrap(), "{value:?}");
        }
    }

    #[test]
    fn output_decodes_back_with_the_standard_parser() {
        let value = json!({"ip": "ñ, \"quoted\"\n"});
        let body = to_vec(&value).unwrap();
        let back: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(back, value);
    }
}
