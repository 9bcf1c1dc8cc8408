//! Transport Tests
//!
//! Framed stream round-trips over in-memory cursors and real files.

use std::fs::File;
use std::io::{Cursor, Seek, SeekFrom, Write};

use erlterm::transport::{read_term, write_term, MAX_FRAME_LEN};
use erlterm::{CodecError, Compression, Term};

// =============================================================================
// Stream I/O Tests
// =============================================================================

#[test]
fn test_stream_write_read_single_term() {
    let term = Term::tuple(vec![Term::atom("ok"), Term::from(42i64)]);

    let mut buffer = Vec::new();
    write_term(&mut buffer, &term, Compression::Off).unwrap();

    let mut cursor = Cursor::new(buffer);
    assert_eq!(read_term(&mut cursor).unwrap(), term);
}

#[test]
fn test_stream_multiple_terms() {
    let terms = vec![
        Term::atom("first"),
        Term::list(vec![Term::from(1i64), Term::from(2i64)]),
        Term::binary(vec![0u8, 255, 128]),
        Term::Unit,
    ];

    let mut buffer = Vec::new();
    for term in &terms {
        write_term(&mut buffer, term, Compression::Off).unwrap();
    }

    let mut cursor = Cursor::new(buffer);
    for expected in &terms {
        assert_eq!(&read_term(&mut cursor).unwrap(), expected);
    }

    // clean end-of-stream shows up as UnexpectedEof on the next header read
    match read_term(&mut cursor) {
        Err(CodecError::Io(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {}
        other => panic!("expected UnexpectedEof, got {other:?}"),
    }
}

#[test]
fn test_stream_compressed_frames() {
    let term = Term::binary(vec![3u8; 50_000]);

    let mut buffer = Vec::new();
    write_term(&mut buffer, &term, Compression::from(true)).unwrap();

    // the frame must be far smaller than the raw payload
    assert!(buffer.len() < 10_000);

    let mut cursor = Cursor::new(buffer);
    assert_eq!(read_term(&mut cursor).unwrap(), term);
}

#[test]
fn test_frame_layout() {
    let mut buffer = Vec::new();
    write_term(&mut buffer, &Term::atom("ok"), Compression::Off).unwrap();

    // Expected: [0x00 0x00 0x00 0x06][131 100 0 2 o k]
    assert_eq!(
        buffer,
        [0, 0, 0, 6, 131, 100, 0, 2, b'o', b'k']
    );
}

// =============================================================================
// File-Backed Tests
// =============================================================================

#[test]
fn test_file_write_read_roundtrip() {
    let mut file: File = tempfile::tempfile().unwrap();

    let terms = vec![
        Term::tuple(vec![Term::atom("entry"), Term::from(1i64)]),
        Term::tuple(vec![Term::atom("entry"), Term::from(2i64)]),
    ];
    for term in &terms {
        write_term(&mut file, term, Compression::Off).unwrap();
    }

    file.seek(SeekFrom::Start(0)).unwrap();
    for expected in &terms {
        assert_eq!(&read_term(&mut file).unwrap(), expected);
    }
}

// =============================================================================
// Error Handling Tests
// =============================================================================

#[test]
fn test_truncated_frame_is_io_error() {
    // header promises 10 bytes, stream carries 3
    let mut cursor = Cursor::new(vec![0u8, 0, 0, 10, 131, 97, 1]);
    match read_term(&mut cursor) {
        Err(CodecError::Io(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {}
        other => panic!("expected UnexpectedEof, got {other:?}"),
    }
}

#[test]
fn test_truncated_header_is_io_error() {
    let mut cursor = Cursor::new(vec![0u8, 0]);
    match read_term(&mut cursor) {
        Err(CodecError::Io(ref e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {}
        other => panic!("expected UnexpectedEof, got {other:?}"),
    }
}

#[test]
fn test_oversized_frame_rejected() {
    let declared = (MAX_FRAME_LEN as u32) + 1;
    let mut bytes = Vec::new();
    bytes.write_all(&declared.to_be_bytes()).unwrap();

    let mut cursor = Cursor::new(bytes);
    match read_term(&mut cursor) {
        Err(CodecError::FrameTooLarge { len, max }) => {
            assert_eq!(len, MAX_FRAME_LEN + 1);
            assert_eq!(max, MAX_FRAME_LEN);
        }
        other => panic!("expected FrameTooLarge, got {other:?}"),
    }
}

#[test]
fn test_frame_payload_is_version_checked() {
    // well-formed frame around a bad version byte
    let mut cursor = Cursor::new(vec![0u8, 0, 0, 2, 130, 106]);
    match read_term(&mut cursor) {
        Err(CodecError::VersionMismatch { found, .. }) => assert_eq!(found, 130),
        other => panic!("expected VersionMismatch, got {other:?}"),
    }
}
