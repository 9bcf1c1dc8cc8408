//! erlterm-dump
//!
//! Decodes external-term payloads from a file or stdin and pretty-prints
//! the terms.

use std::fs;
use std::io::{self, Cursor, Read};
use std::path::PathBuf;

use clap::Parser;
use erlterm::{decode, transport, CodecError};
use tracing_subscriber::{fmt, EnvFilter};

/// Term dump tool
#[derive(Parser, Debug)]
#[command(name = "erlterm-dump")]
#[command(about = "Decode Erlang external term format payloads and print them")]
#[command(version)]
struct Args {
    /// Input file (reads stdin when omitted)
    file: Option<PathBuf>,

    /// Treat the input as ASCII hex instead of raw bytes
    #[arg(long)]
    hex: bool,

    /// Input is a stream of 4-byte length-framed terms
    #[arg(long)]
    framed: bool,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,erlterm=debug"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    let input = match read_input(&args) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!("Failed to read input: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = dump(&input, args.framed) {
        tracing::error!("Decode failed: {}", e);
        std::process::exit(1);
    }
}

/// Load the input bytes, applying hex conversion when requested
fn read_input(args: &Args) -> io::Result<Vec<u8>> {
    let raw = match &args.file {
        Some(path) => fs::read(path)?,
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf)?;
            buf
        }
    };

    if args.hex {
        parse_hex(&raw)
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidData, "malformed hex input"))
    } else {
        Ok(raw)
    }
}

/// Decode one payload, or iterate a framed stream until clean EOF
fn dump(input: &[u8], framed: bool) -> Result<(), CodecError> {
    if !framed {
        println!("{}", decode(input)?);
        return Ok(());
    }

    let mut cursor = Cursor::new(input);
    loop {
        match transport::read_term(&mut cursor) {
            Ok(term) => println!("{}", term),
            Err(CodecError::Io(ref e)) if e.kind() == io::ErrorKind::UnexpectedEof => {
                return Ok(());
            }
            Err(e) => return Err(e),
        }
    }
}

/// Parse ASCII hex, ignoring whitespace
fn parse_hex(raw: &[u8]) -> Option<Vec<u8>> {
    let digits: Vec<u8> = raw
        .iter()
        .copied()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    if digits.len() % 2 != 0 {
        return None;
    }

    digits
        .chunks(2)
        .map(|pair| {
            let hi = (pair[0] as char).to_digit(16)?;
            let lo = (pair[1] as char).to_digit(16)?;
            Some((hi * 16 + lo) as u8)
        })
        .collect()
}
