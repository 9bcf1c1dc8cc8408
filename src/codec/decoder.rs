//! Decoder
//!
//! Recursive-descent parser driven by tag dispatch: validates the version
//! prefix, then consumes one tag and its payload per step, recursing for
//! composite tags. Every length field is bounds-checked before the bytes
//! are touched, so a lying length surfaces as [`CodecError::BufferUnderrun`]
//! rather than an out-of-bounds read.

use std::io::Read;

use flate2::read::ZlibDecoder;
use malachite::base::num::basic::traits::Zero;
use malachite::base::num::conversion::traits::PowerOf2Digits;
use malachite::{Integer, Natural};

use super::tag;
use super::MAX_DEPTH;
use crate::error::{CodecError, Result};
use crate::term::Term;

/// Decode a version-prefixed payload into a term
///
/// Fails with [`CodecError::VersionMismatch`] unless `buf[0]` is 131.
/// Bytes past the first complete term are ignored.
pub fn decode(buf: &[u8]) -> Result<Term> {
    let version = read_u8(buf, 0)?;
    if version != tag::FORMAT_VERSION {
        return Err(CodecError::VersionMismatch {
            expected: tag::FORMAT_VERSION,
            found: version,
        });
    }

    tracing::trace!("Decoding {} byte payload", buf.len());

    let (term, _) = decode_term(buf, 1, 0)?;
    Ok(term)
}

/// Decode one term at `offset`, returning it and the offset past it
fn decode_term(buf: &[u8], offset: usize, depth: usize) -> Result<(Term, usize)> {
    if depth >= MAX_DEPTH {
        return Err(CodecError::DepthExceeded { limit: MAX_DEPTH });
    }

    let tag_byte = read_u8(buf, offset)?;
    let tag_offset = offset;
    let offset = offset + 1;

    match tag_byte {
        tag::SMALL_INTEGER_EXT => {
            let value = read_u8(buf, offset)?;
            Ok((Term::Int(Integer::from(value)), offset + 1))
        }
        tag::INTEGER_EXT => {
            let value = read_i32(buf, offset)?;
            Ok((Term::Int(Integer::from(value)), offset + 4))
        }
        tag::FLOAT_EXT => decode_legacy_float(buf, offset),
        tag::NEW_FLOAT_EXT => {
            let field = take(buf, offset, 8)?;
            let mut raw = [0u8; 8];
            raw.copy_from_slice(field);
            Ok((Term::Float(f64::from_be_bytes(raw)), offset + 8))
        }
        tag::ATOM_EXT => {
            let len = read_u16(buf, offset)? as usize;
            let name = take(buf, offset + 2, len)?;
            Ok((atom_term(name), offset + 2 + len))
        }
        tag::SMALL_ATOM_EXT => {
            let len = read_u8(buf, offset)? as usize;
            let name = take(buf, offset + 1, len)?;
            Ok((atom_term(name), offset + 1 + len))
        }
        tag::SMALL_TUPLE_EXT => {
            let arity = read_u8(buf, offset)? as usize;
            decode_tuple(buf, offset + 1, arity, depth)
        }
        tag::LARGE_TUPLE_EXT => {
            let arity = read_u32(buf, offset)? as usize;
            decode_tuple(buf, offset + 4, arity, depth)
        }
        tag::NIL_EXT => Ok((Term::nil(), offset)),
        tag::STRING_EXT => {
            let len = read_u16(buf, offset)? as usize;
            let bytes = take(buf, offset + 2, len)?;
            Ok((Term::Binary(bytes.to_vec()), offset + 2 + len))
        }
        tag::LIST_EXT => decode_list(buf, offset, depth),
        tag::BINARY_EXT => {
            let len = read_u32(buf, offset)? as usize;
            let bytes = take(buf, offset + 4, len)?;
            Ok((Term::Binary(bytes.to_vec()), offset + 4 + len))
        }
        tag::SMALL_BIG_EXT => {
            let digit_count = read_u8(buf, offset)? as usize;
            decode_bignum(buf, offset + 1, digit_count)
        }
        tag::LARGE_BIG_EXT => {
            let digit_count = read_u32(buf, offset)? as usize;
            decode_bignum(buf, offset + 4, digit_count)
        }
        tag::REFERENCE_EXT => {
            let (node, offset) = decode_node(buf, offset, depth)?;
            let id = read_u32(buf, offset)?;
            let creation = read_u8(buf, offset + 4)?;
            Ok((
                Term::Ref {
                    node,
                    id: vec![id],
                    creation,
                },
                offset + 5,
            ))
        }
        tag::NEW_REFERENCE_EXT => {
            let id_len = read_u16(buf, offset)? as usize;
            let (node, offset) = decode_node(buf, offset + 2, depth)?;
            let creation = read_u8(buf, offset)?;
            need(buf, offset + 1, id_len * 4)?;
            let mut id = Vec::with_capacity(id_len);
            let mut offset = offset + 1;
            for _ in 0..id_len {
                id.push(read_u32(buf, offset)?);
                offset += 4;
            }
            Ok((Term::Ref { node, id, creation }, offset))
        }
        tag::PORT_EXT => {
            let (node, offset) = decode_node(buf, offset, depth)?;
            let id = read_u32(buf, offset)?;
            let creation = read_u8(buf, offset + 4)?;
            Ok((Term::Port { node, id, creation }, offset + 5))
        }
        tag::PID_EXT => {
            let (node, offset) = decode_node(buf, offset, depth)?;
            let id = read_u32(buf, offset)?;
            let serial = read_u32(buf, offset + 4)?;
            let creation = read_u8(buf, offset + 8)?;
            Ok((
                Term::Pid {
                    node,
                    id,
                    serial,
                    creation,
                },
                offset + 9,
            ))
        }
        tag::EXPORT_EXT => decode_export(buf, offset, depth),
        tag::COMPRESSED => decode_compressed(buf, offset, depth),
        tag::BIT_BINARY_EXT | tag::NEW_FUN_EXT | tag::FUN_EXT => Err(CodecError::UnsupportedTag {
            tag: tag_byte,
            name: tag::name(tag_byte).unwrap_or("unknown"),
        }),
        _ => Err(CodecError::UnknownTag {
            tag: tag_byte,
            offset: tag_offset,
        }),
    }
}

// =============================================================================
// Composite Tags
// =============================================================================

fn decode_tuple(buf: &[u8], offset: usize, arity: usize, depth: usize) -> Result<(Term, usize)> {
    // Each element occupies at least one byte, so the remaining buffer
    // length bounds any honest arity.
    let mut items = Vec::with_capacity(arity.min(buf.len().saturating_sub(offset)));
    let mut offset = offset;
    for _ in 0..arity {
        let (item, next) = decode_term(buf, offset, depth + 1)?;
        items.push(item);
        offset = next;
    }
    Ok((Term::Tuple(items), offset))
}

fn decode_list(buf: &[u8], offset: usize, depth: usize) -> Result<(Term, usize)> {
    let count = read_u32(buf, offset)? as usize;
    let mut items = Vec::with_capacity(count.min(buf.len().saturating_sub(offset)));
    let mut offset = offset + 4;
    for _ in 0..count {
        let (item, next) = decode_term(buf, offset, depth + 1)?;
        items.push(item);
        offset = next;
    }

    // The wire carries one more term after the elements. Only the empty
    // list is accepted there; cons-pair tails are not supported.
    let (tail, offset) = decode_term(buf, offset, depth + 1)?;
    if !tail.is_nil() {
        return Err(CodecError::ImproperList);
    }
    Ok((Term::List(items), offset))
}

fn decode_export(buf: &[u8], offset: usize, depth: usize) -> Result<(Term, usize)> {
    let (module, offset) = decode_node(buf, offset, depth)?;
    let (function, offset) = decode_node(buf, offset, depth)?;
    let (arity_term, offset) = decode_term(buf, offset, depth + 1)?;
    let arity = match arity_term {
        Term::Int(ref value) => u8::try_from(value).map_err(|_| CodecError::TypeMismatch {
            expected: "small integer",
            found: "integer",
        })?,
        ref other => {
            return Err(CodecError::TypeMismatch {
                expected: "small integer",
                found: other.kind(),
            })
        }
    };
    Ok((
        Term::Export {
            module,
            function,
            arity: arity as u32,
        },
        offset,
    ))
}

/// Decode the node field of a reference/port/pid/export sub-term
///
/// The sub-term must be a plain atom; the special atoms that decode to
/// booleans or the unit sentinel do not qualify.
fn decode_node(buf: &[u8], offset: usize, depth: usize) -> Result<(String, usize)> {
    let (term, next) = decode_term(buf, offset, depth + 1)?;
    match term {
        Term::Atom(name) => Ok((name, next)),
        other => Err(CodecError::TypeMismatch {
            expected: "atom",
            found: other.kind(),
        }),
    }
}

// =============================================================================
// Scalar Tags
// =============================================================================

fn decode_legacy_float(buf: &[u8], offset: usize) -> Result<(Term, usize)> {
    let field = take(buf, offset, 31)?;
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    let value = std::str::from_utf8(&field[..end])
        .ok()
        .and_then(|text| text.parse::<f64>().ok())
        .ok_or(CodecError::InvalidFloat { offset })?;
    Ok((Term::Float(value), offset + 31))
}

fn decode_bignum(buf: &[u8], offset: usize, digit_count: usize) -> Result<(Term, usize)> {
    let sign = read_u8(buf, offset)?;
    let digits = take(buf, offset + 1, digit_count)?;
    let magnitude =
        Natural::from_power_of_2_digits_asc(8, digits.iter().copied()).unwrap_or(Natural::ZERO);
    let value = Integer::from(magnitude);
    let value = if sign != 0 { -value } else { value };
    Ok((Term::Int(value), offset + 1 + digit_count))
}

/// Convert decoded atom text, folding the three special names
fn atom_term(name: &[u8]) -> Term {
    match name {
        b"true" => Term::Bool(true),
        b"false" => Term::Bool(false),
        b"none" => Term::Unit,
        // Latin-1: every byte value is the identical code point.
        _ => Term::Atom(name.iter().map(|&b| b as char).collect()),
    }
}

// =============================================================================
// Compressed Envelope
// =============================================================================

/// Inflate the rest of the buffer and decode one term from it
///
/// The decompressed payload carries no version byte; the envelope consumes
/// the remainder of the outer buffer.
fn decode_compressed(buf: &[u8], offset: usize, depth: usize) -> Result<(Term, usize)> {
    let expected_len = read_u32(buf, offset)? as usize;
    let compressed = &buf[offset + 4..];

    let mut inflated = Vec::new();
    ZlibDecoder::new(compressed)
        .take(expected_len as u64 + 1)
        .read_to_end(&mut inflated)
        .map_err(|e| CodecError::Compression(e.to_string()))?;

    if inflated.len() != expected_len {
        return Err(CodecError::Compression(format!(
            "inflated to {} bytes, size header says {}",
            inflated.len(),
            expected_len
        )));
    }

    let (term, _) = decode_term(&inflated, 0, depth + 1)?;
    Ok((term, buf.len()))
}

// =============================================================================
// Bounds-Checked Reads
// =============================================================================

fn need(buf: &[u8], offset: usize, needed: usize) -> Result<()> {
    let available = buf.len().saturating_sub(offset);
    if available < needed {
        return Err(CodecError::BufferUnderrun {
            offset,
            needed,
            available,
        });
    }
    Ok(())
}

fn take<'a>(buf: &'a [u8], offset: usize, len: usize) -> Result<&'a [u8]> {
    need(buf, offset, len)?;
    Ok(&buf[offset..offset + len])
}

fn read_u8(buf: &[u8], offset: usize) -> Result<u8> {
    need(buf, offset, 1)?;
    Ok(buf[offset])
}

fn read_u16(buf: &[u8], offset: usize) -> Result<u16> {
    need(buf, offset, 2)?;
    Ok(u16::from_be_bytes([buf[offset], buf[offset + 1]]))
}

fn read_u32(buf: &[u8], offset: usize) -> Result<u32> {
    need(buf, offset, 4)?;
    Ok(u32::from_be_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ]))
}

fn read_i32(buf: &[u8], offset: usize) -> Result<i32> {
    need(buf, offset, 4)?;
    Ok(i32::from_be_bytes([
        buf[offset],
        buf[offset + 1],
        buf[offset + 2],
        buf[offset + 3],
    ]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_underrun_reports_offset_and_counts() {
        let err = take(&[1, 2, 3], 1, 5).unwrap_err();
        match err {
            CodecError::BufferUnderrun {
                offset,
                needed,
                available,
            } => {
                assert_eq!(offset, 1);
                assert_eq!(needed, 5);
                assert_eq!(available, 2);
            }
            other => panic!("expected BufferUnderrun, got {other:?}"),
        }
    }

    #[test]
    fn test_atom_special_names() {
        assert_eq!(atom_term(b"true"), Term::Bool(true));
        assert_eq!(atom_term(b"false"), Term::Bool(false));
        assert_eq!(atom_term(b"none"), Term::Unit);
        assert_eq!(atom_term(b"truthy"), Term::Atom("truthy".into()));
    }

    #[test]
    fn test_latin1_atom_bytes_map_to_code_points() {
        // 0xE9 is é in latin-1
        assert_eq!(atom_term(&[0xE9]), Term::Atom("\u{e9}".into()));
    }
}
