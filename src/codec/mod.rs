//! Codec Module
//!
//! Encoding and decoding for the Erlang External Term Format, version 131.
//!
//! ## Wire Format
//!
//! ```text
//! ┌──────────┬─────────────────────────────┐
//! │ 131 (1)  │        one tagged term      │
//! └──────────┴─────────────────────────────┘
//! ```
//!
//! Every term is a one-byte tag followed by its payload; composite tags
//! (tuples, lists, the identifier family) nest further terms. The whole
//! post-version payload may instead be a compressed envelope:
//!
//! ```text
//! ┌──────────┬──────────────┬──────────────┐
//! │ 80 (1)   │ UncompLen(4) │ zlib stream  │
//! └──────────┴──────────────┴──────────────┘
//! ```
//!
//! ### Tags
//! - 70:  new float (8-byte IEEE double) - decode only
//! - 80:  compressed envelope
//! - 97:  small integer (1 byte)
//! - 98:  integer (4-byte signed)
//! - 99:  float (31-byte `%.20e` text)
//! - 100: atom (16-bit length, latin-1)
//! - 101: reference (legacy)
//! - 102: port
//! - 103: pid
//! - 104/105: small/large tuple
//! - 106: nil (empty list)
//! - 107: string (byte list) - decode only
//! - 108: list with nil tail
//! - 109: binary
//! - 110/111: small/large bignum
//! - 113: export fun
//! - 114: new reference
//! - 115: small atom - decode only
//! - 77/112/117: bit binary and funs - rejected as unsupported

mod decoder;
mod encoder;
pub mod tag;

pub use decoder::decode;
pub use encoder::{encode, Compression};
pub use tag::FORMAT_VERSION;

/// Maximum term nesting depth accepted in either direction
///
/// Decode and encode both recurse per nesting level; the guard turns
/// adversarially deep input into [`crate::CodecError::DepthExceeded`]
/// instead of a stack overflow.
pub const MAX_DEPTH: usize = 512;
