//! # erlterm
//!
//! An Erlang External Term Format (ETF, version 131) codec:
//! - Closed [`Term`] model with structural equality
//! - Recursive-descent decoder with strict bounds and depth checks
//! - Exact-layout encoder with optional zlib compression
//! - 4-byte length framing for Erlang port streams
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Framed Transport                         │
//! │              (4-byte length prefix, Read/Write)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Codec                                 │
//! │            decode(bytes) ⇄ encode(term, level)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │  Tag Table  │          │ Term Model  │
//!   │ (read-only) │          │ (value tree)│
//!   └─────────────┘          └─────────────┘
//! ```
//!
//! The codec is synchronous and side-effect free: no shared state, nothing
//! to cancel. Multiple callers can decode/encode concurrently on
//! independent buffers.
//!
//! ## Example
//!
//! ```
//! use erlterm::{decode, encode, Compression, Term};
//!
//! let term = Term::tuple(vec![Term::atom("ok"), Term::from(42i64)]);
//! let bytes = encode(&term, Compression::Off)?;
//! assert_eq!(decode(&bytes)?, term);
//! # Ok::<(), erlterm::CodecError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod term;

pub mod codec;
pub mod transport;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use codec::{decode, encode, Compression, FORMAT_VERSION, MAX_DEPTH};
pub use error::{CodecError, Result};
pub use term::Term;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of erlterm
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
