//! Framed Transport
//!
//! Length-prefixed framing for exchanging encoded terms over a byte
//! stream, as Erlang ports do with `{packet, 4}`.
//!
//! ## Frame Format
//!
//! ```text
//! ┌──────────┬─────────────────────────────┐
//! │ Len (4)  │   version-prefixed payload  │
//! └──────────┴─────────────────────────────┘
//! ```
//!
//! The length is big-endian and counts the payload only. This layer
//! contains no encoding logic and manages no connections; callers own the
//! stream and its lifecycle.

use std::io::{Read, Write};

use crate::codec::{decode, encode, Compression};
use crate::error::{CodecError, Result};
use crate::term::Term;

/// Frame header size: 4-byte big-endian payload length
pub const HEADER_SIZE: usize = 4;

/// Maximum accepted frame payload (64 MiB)
pub const MAX_FRAME_LEN: usize = 64 * 1024 * 1024;

/// Read one framed term from a stream
///
/// Blocks until a complete frame is received. A stream that ends cleanly
/// before the first header byte surfaces as [`CodecError::Io`] with kind
/// `UnexpectedEof`, which callers match to detect end-of-stream.
pub fn read_term<R: Read>(reader: &mut R) -> Result<Term> {
    let mut header = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header)?;

    let len = u32::from_be_bytes(header) as usize;
    if len > MAX_FRAME_LEN {
        return Err(CodecError::FrameTooLarge {
            len,
            max: MAX_FRAME_LEN,
        });
    }

    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload)?;

    tracing::trace!("Read {} byte frame", len);
    decode(&payload)
}

/// Write one framed term to a stream and flush
pub fn write_term<W: Write>(writer: &mut W, term: &Term, compression: Compression) -> Result<()> {
    let payload = encode(term, compression)?;
    if payload.len() > MAX_FRAME_LEN {
        return Err(CodecError::FrameTooLarge {
            len: payload.len(),
            max: MAX_FRAME_LEN,
        });
    }

    writer.write_all(&(payload.len() as u32).to_be_bytes())?;
    writer.write_all(&payload)?;
    writer.flush()?;

    tracing::trace!("Wrote {} byte frame", payload.len());
    Ok(())
}
