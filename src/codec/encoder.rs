//! Encoder
//!
//! Type-dispatch serializer: walks the term tree and appends the exact tag
//! and payload bytes for each node, then optionally wraps the whole payload
//! in a zlib envelope. Errors abort with nothing returned; a caller never
//! sees a truncated byte sequence.

use std::io::Write;

use bytes::BufMut;
use flate2::write::ZlibEncoder;
use malachite::base::num::arithmetic::traits::UnsignedAbs;
use malachite::base::num::conversion::traits::PowerOf2Digits;
use malachite::{Integer, Natural};

use super::tag;
use super::MAX_DEPTH;
use crate::error::{CodecError, Result};
use crate::term::Term;

/// Compression setting for [`encode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compression {
    /// Emit the raw payload
    #[default]
    Off,

    /// Attempt a zlib envelope at this level (0..=9)
    Level(u8),
}

impl From<bool> for Compression {
    /// `true` maps to zlib's default level 6
    fn from(enabled: bool) -> Self {
        if enabled {
            Compression::Level(6)
        } else {
            Compression::Off
        }
    }
}

/// Encode a term into a version-prefixed payload
///
/// The result always starts with the version byte 131. With compression
/// requested, the compressed envelope is adopted only when it is strictly
/// smaller than the raw payload (its 4-byte size header included);
/// otherwise the raw form is kept.
pub fn encode(term: &Term, compression: Compression) -> Result<Vec<u8>> {
    tracing::trace!("Encoding {} term", term.kind());

    let mut body = Vec::with_capacity(64);
    encode_term(term, &mut body, 0)?;
    let body = apply_compression(body, compression)?;

    let mut out = Vec::with_capacity(1 + body.len());
    out.put_u8(tag::FORMAT_VERSION);
    out.put_slice(&body);
    Ok(out)
}

fn encode_term(term: &Term, out: &mut Vec<u8>, depth: usize) -> Result<()> {
    if depth >= MAX_DEPTH {
        return Err(CodecError::DepthExceeded { limit: MAX_DEPTH });
    }

    match term {
        Term::Bool(true) => put_atom(out, "true", "boolean"),
        Term::Bool(false) => put_atom(out, "false", "boolean"),
        Term::Unit => put_atom(out, "none", "none"),
        Term::Atom(name) => put_atom(out, name, "atom"),
        Term::Int(value) => put_integer(out, value),
        Term::Float(value) => {
            put_float(out, *value);
            Ok(())
        }
        Term::Text(text) => put_binary(out, text.as_bytes(), "text"),
        Term::Binary(bytes) => put_binary(out, bytes, "binary"),
        Term::Tuple(items) => {
            if items.len() < 256 {
                out.put_u8(tag::SMALL_TUPLE_EXT);
                out.put_u8(items.len() as u8);
            } else {
                let arity =
                    u32::try_from(items.len()).map_err(|_| CodecError::UnsupportedValue {
                        kind: "tuple",
                        reason: format!("arity {} exceeds the 32-bit field", items.len()),
                    })?;
                out.put_u8(tag::LARGE_TUPLE_EXT);
                out.put_u32(arity);
            }
            for item in items {
                encode_term(item, out, depth + 1)?;
            }
            Ok(())
        }
        Term::List(items) if items.is_empty() => {
            out.put_u8(tag::NIL_EXT);
            Ok(())
        }
        Term::List(items) => {
            let count = u32::try_from(items.len()).map_err(|_| CodecError::UnsupportedValue {
                kind: "list",
                reason: format!("length {} exceeds the 32-bit field", items.len()),
            })?;
            out.put_u8(tag::LIST_EXT);
            out.put_u32(count);
            for item in items {
                encode_term(item, out, depth + 1)?;
            }
            // Always a proper list: explicit nil terminator.
            out.put_u8(tag::NIL_EXT);
            Ok(())
        }
        Term::Ref { node, id, creation } => {
            let id_len = u16::try_from(id.len()).map_err(|_| CodecError::UnsupportedValue {
                kind: "reference",
                reason: format!("{} id words exceed the 16-bit count field", id.len()),
            })?;
            out.put_u8(tag::NEW_REFERENCE_EXT);
            out.put_u16(id_len);
            put_atom(out, node, "reference node")?;
            out.put_u8(*creation);
            for word in id {
                out.put_u32(*word);
            }
            Ok(())
        }
        Term::Port { node, id, creation } => {
            out.put_u8(tag::PORT_EXT);
            put_atom(out, node, "port node")?;
            out.put_u32(*id);
            out.put_u8(*creation);
            Ok(())
        }
        Term::Pid {
            node,
            id,
            serial,
            creation,
        } => {
            out.put_u8(tag::PID_EXT);
            put_atom(out, node, "pid node")?;
            out.put_u32(*id);
            out.put_u32(*serial);
            out.put_u8(*creation);
            Ok(())
        }
        Term::Export {
            module,
            function,
            arity,
        } => {
            let arity = u8::try_from(*arity).map_err(|_| CodecError::UnsupportedValue {
                kind: "export",
                reason: format!("arity {} does not fit one byte", arity),
            })?;
            out.put_u8(tag::EXPORT_EXT);
            put_atom(out, module, "export module")?;
            put_atom(out, function, "export function")?;
            out.put_u8(tag::SMALL_INTEGER_EXT);
            out.put_u8(arity);
            Ok(())
        }
    }
}

// =============================================================================
// Scalar Emitters
// =============================================================================

/// Emit an atom tag with latin-1 bytes
///
/// `kind` names the value being encoded in error reports, since atoms also
/// appear embedded in reference/port/pid/export layouts.
fn put_atom(out: &mut Vec<u8>, name: &str, kind: &'static str) -> Result<()> {
    let bytes = latin1_bytes(name).ok_or_else(|| CodecError::UnsupportedValue {
        kind,
        reason: format!("atom text {:?} is not latin-1", name),
    })?;
    let len = u16::try_from(bytes.len()).map_err(|_| CodecError::UnsupportedValue {
        kind,
        reason: format!("atom of {} bytes exceeds the 16-bit length field", bytes.len()),
    })?;
    out.put_u8(tag::ATOM_EXT);
    out.put_u16(len);
    out.put_slice(&bytes);
    Ok(())
}

fn latin1_bytes(text: &str) -> Option<Vec<u8>> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).ok())
        .collect()
}

/// Emit the smallest integer representation for the value's magnitude
fn put_integer(out: &mut Vec<u8>, value: &Integer) -> Result<()> {
    if let Ok(small) = u8::try_from(value) {
        out.put_u8(tag::SMALL_INTEGER_EXT);
        out.put_u8(small);
    } else if let Ok(medium) = i32::try_from(value) {
        out.put_u8(tag::INTEGER_EXT);
        out.put_i32(medium);
    } else {
        let negative = *value < 0;
        let magnitude: Natural = value.unsigned_abs();
        let digits: Vec<u8> = magnitude.to_power_of_2_digits_asc(8);
        if digits.len() < 256 {
            out.put_u8(tag::SMALL_BIG_EXT);
            out.put_u8(digits.len() as u8);
        } else {
            let digit_count =
                u32::try_from(digits.len()).map_err(|_| CodecError::UnsupportedValue {
                    kind: "integer",
                    reason: format!("{} bignum digits exceed the 32-bit field", digits.len()),
                })?;
            out.put_u8(tag::LARGE_BIG_EXT);
            out.put_u32(digit_count);
        }
        out.put_u8(negative as u8);
        out.put_slice(&digits);
    }
    Ok(())
}

fn put_float(out: &mut Vec<u8>, value: f64) {
    out.put_u8(tag::FLOAT_EXT);
    let rendered = legacy_float_string(value);
    let mut field = [0u8; 31];
    field[..rendered.len()].copy_from_slice(rendered.as_bytes());
    out.put_slice(&field);
}

/// Render a double the way C `%.20e` does
///
/// Rust's `{:.20e}` produces a bare exponent (`1.5e0`); the wire carries
/// the C shape with an explicit sign and at least two exponent digits
/// (`1.50000000000000000000e+00`). The longest finite rendering is 28
/// bytes, inside the 31-byte field.
fn legacy_float_string(value: f64) -> String {
    let formatted = format!("{:.20e}", value);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}e{}{:02}", mantissa, sign, exponent.unsigned_abs())
        }
        // Non-finite values carry no exponent part; kept verbatim.
        None => formatted,
    }
}

fn put_binary(out: &mut Vec<u8>, bytes: &[u8], kind: &'static str) -> Result<()> {
    let len = u32::try_from(bytes.len()).map_err(|_| CodecError::UnsupportedValue {
        kind,
        reason: format!("{} bytes exceed the 32-bit length field", bytes.len()),
    })?;
    out.put_u8(tag::BINARY_EXT);
    out.put_u32(len);
    out.put_slice(bytes);
    Ok(())
}

// =============================================================================
// Compression
// =============================================================================

fn apply_compression(raw: Vec<u8>, compression: Compression) -> Result<Vec<u8>> {
    let level = match compression {
        Compression::Off => return Ok(raw),
        Compression::Level(level) => level,
    };
    if level > 9 {
        return Err(CodecError::Compression(format!(
            "invalid zlib level {}, expected 0..=9",
            level
        )));
    }

    let raw_len = u32::try_from(raw.len()).map_err(|_| {
        CodecError::Compression(format!(
            "payload of {} bytes exceeds the 32-bit size header",
            raw.len()
        ))
    })?;

    let mut encoder = ZlibEncoder::new(
        Vec::with_capacity(raw.len() / 2),
        flate2::Compression::new(level as u32),
    );
    encoder
        .write_all(&raw)
        .map_err(|e| CodecError::Compression(e.to_string()))?;
    let compressed = encoder
        .finish()
        .map_err(|e| CodecError::Compression(e.to_string()))?;

    if compressed.len() + 4 < raw.len() {
        tracing::debug!(
            "Compressed term payload from {} to {} bytes",
            raw.len(),
            compressed.len()
        );
        let mut out = Vec::with_capacity(5 + compressed.len());
        out.put_u8(tag::COMPRESSED);
        out.put_u32(raw_len);
        out.put_slice(&compressed);
        Ok(out)
    } else {
        tracing::debug!(
            "Compression did not shrink {} byte payload, keeping raw form",
            raw.len()
        );
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_float_string_shape() {
        assert_eq!(legacy_float_string(1.5), "1.50000000000000000000e+00");
        assert_eq!(legacy_float_string(-1.5), "-1.50000000000000000000e+00");
        assert_eq!(legacy_float_string(0.0), "0.00000000000000000000e+00");
    }

    #[test]
    fn test_legacy_float_string_exponent_sign_and_width() {
        let rendered = legacy_float_string(1.0e-7);
        assert!(rendered.ends_with("e-07"), "got {rendered}");
        let rendered = legacy_float_string(1.0e120);
        assert!(rendered.ends_with("e+120"), "got {rendered}");
    }

    #[test]
    fn test_legacy_float_string_fits_field() {
        for value in [f64::MAX, f64::MIN, 5e-324, -5e-324, 0.0] {
            assert!(legacy_float_string(value).len() <= 31);
        }
    }

    #[test]
    fn test_latin1_rejects_wide_chars() {
        assert!(latin1_bytes("ok").is_some());
        assert!(latin1_bytes("caf\u{e9}").is_some());
        assert!(latin1_bytes("\u{263a}").is_none());
    }
}
