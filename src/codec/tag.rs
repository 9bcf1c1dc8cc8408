//! Tag Table
//!
//! The fixed mapping between a one-byte wire tag and its payload layout.
//! Built once at compile time, read-only thereafter.

/// Version byte that prefixes every encoded term
pub const FORMAT_VERSION: u8 = 131;

pub const NEW_FLOAT_EXT: u8 = 70; // [Float64:IEEE double, big-endian]
pub const BIT_BINARY_EXT: u8 = 77; // [UInt32:Len, UInt8:Bits, Len:Data] - not supported
pub const COMPRESSED: u8 = 80; // [UInt32:UncompressedSize, N:ZlibData]
pub const SMALL_INTEGER_EXT: u8 = 97; // [UInt8:Int]
pub const INTEGER_EXT: u8 = 98; // [Int32:Int]
pub const FLOAT_EXT: u8 = 99; // [31:Float string "%.20e", NUL padded]
pub const ATOM_EXT: u8 = 100; // [UInt16:Len, Len:AtomName latin-1]
pub const REFERENCE_EXT: u8 = 101; // [atom:Node, UInt32:ID, UInt8:Creation]
pub const PORT_EXT: u8 = 102; // [atom:Node, UInt32:ID, UInt8:Creation]
pub const PID_EXT: u8 = 103; // [atom:Node, UInt32:ID, UInt32:Serial, UInt8:Creation]
pub const SMALL_TUPLE_EXT: u8 = 104; // [UInt8:Arity, N:Elements]
pub const LARGE_TUPLE_EXT: u8 = 105; // [UInt32:Arity, N:Elements]
pub const NIL_EXT: u8 = 106; // empty list, no payload
pub const STRING_EXT: u8 = 107; // [UInt16:Len, Len:Bytes]
pub const LIST_EXT: u8 = 108; // [UInt32:Len, Elements, Tail]
pub const BINARY_EXT: u8 = 109; // [UInt32:Len, Len:Data]
pub const SMALL_BIG_EXT: u8 = 110; // [UInt8:n, UInt8:Sign, n:Digits base 256 LE]
pub const LARGE_BIG_EXT: u8 = 111; // [UInt32:n, UInt8:Sign, n:Digits base 256 LE]
pub const NEW_FUN_EXT: u8 = 112; // not supported
pub const EXPORT_EXT: u8 = 113; // [atom:Module, atom:Function, smallint:Arity]
pub const NEW_REFERENCE_EXT: u8 = 114; // [UInt16:Len, atom:Node, UInt8:Creation, Len*UInt32:ID]
pub const SMALL_ATOM_EXT: u8 = 115; // [UInt8:Len, Len:AtomName latin-1]
pub const FUN_EXT: u8 = 117; // not supported

/// Name of a known tag, or `None` for a byte outside the table
///
/// Recognized-but-unimplemented tags (funs, bit binaries) are named here so
/// they can be reported distinctly from unknown bytes.
pub fn name(tag: u8) -> Option<&'static str> {
    match tag {
        NEW_FLOAT_EXT => Some("NEW_FLOAT_EXT"),
        BIT_BINARY_EXT => Some("BIT_BINARY_EXT"),
        COMPRESSED => Some("COMPRESSED"),
        SMALL_INTEGER_EXT => Some("SMALL_INTEGER_EXT"),
        INTEGER_EXT => Some("INTEGER_EXT"),
        FLOAT_EXT => Some("FLOAT_EXT"),
        ATOM_EXT => Some("ATOM_EXT"),
        REFERENCE_EXT => Some("REFERENCE_EXT"),
        PORT_EXT => Some("PORT_EXT"),
        PID_EXT => Some("PID_EXT"),
        SMALL_TUPLE_EXT => Some("SMALL_TUPLE_EXT"),
        LARGE_TUPLE_EXT => Some("LARGE_TUPLE_EXT"),
        NIL_EXT => Some("NIL_EXT"),
        STRING_EXT => Some("STRING_EXT"),
        LIST_EXT => Some("LIST_EXT"),
        BINARY_EXT => Some("BINARY_EXT"),
        SMALL_BIG_EXT => Some("SMALL_BIG_EXT"),
        LARGE_BIG_EXT => Some("LARGE_BIG_EXT"),
        NEW_FUN_EXT => Some("NEW_FUN_EXT"),
        EXPORT_EXT => Some("EXPORT_EXT"),
        NEW_REFERENCE_EXT => Some("NEW_REFERENCE_EXT"),
        SMALL_ATOM_EXT => Some("SMALL_ATOM_EXT"),
        FUN_EXT => Some("FUN_EXT"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_tags_are_named() {
        assert_eq!(name(ATOM_EXT), Some("ATOM_EXT"));
        assert_eq!(name(COMPRESSED), Some("COMPRESSED"));
        assert_eq!(name(FUN_EXT), Some("FUN_EXT"));
    }

    #[test]
    fn test_unknown_bytes_are_unnamed() {
        assert_eq!(name(0), None);
        assert_eq!(name(96), None);
        assert_eq!(name(255), None);
    }
}
