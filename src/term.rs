//! Term Model
//!
//! The closed set of values the codec can represent.
//!
//! A [`Term`] is an immutable tree: composites own their children and no
//! value is ever shared or cyclic. Equality is structural, field by field.
//! The `Display` renderings (`#Ref<...>`, `<creation.id.serial>`,
//! `#Fun<module.function.arity>`) are cosmetic only and never affect the
//! wire encoding.

use std::fmt;

use malachite::Integer;

/// A single Erlang term
///
/// One variant per wire-representable value kind. Booleans and the `none`
/// sentinel travel as atoms on the wire but are first-class variants here,
/// so consumers match exhaustively instead of inspecting atom names.
#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    /// Symbolic name, latin-1 text (at most 65535 bytes on the wire)
    Atom(String),

    /// The special atoms `true` / `false`
    Bool(bool),

    /// The special atom `none`
    Unit,

    /// Arbitrary-precision signed integer
    Int(Integer),

    /// IEEE-754 double
    Float(f64),

    /// Raw byte sequence
    Binary(Vec<u8>),

    /// UTF-8 text, encoded as a binary on the wire
    Text(String),

    /// Fixed-arity ordered sequence
    Tuple(Vec<Term>),

    /// Variable-length ordered sequence; empty is the nil sentinel
    List(Vec<Term>),

    /// Opaque handle identifier with its originating node
    Ref {
        node: String,
        /// 1 word (legacy references) or 1..=3 words (new-style)
        id: Vec<u32>,
        creation: u8,
    },

    /// I/O-port identifier with its originating node
    Port { node: String, id: u32, creation: u8 },

    /// Process identifier with its originating node
    Pid {
        node: String,
        id: u32,
        serial: u32,
        creation: u8,
    },

    /// A fun captured by module/function/arity
    Export {
        module: String,
        function: String,
        /// Must fit one byte on the wire (0..=255)
        arity: u32,
    },
}

impl Term {
    /// Create an atom term
    pub fn atom(name: impl Into<String>) -> Self {
        Term::Atom(name.into())
    }

    /// Create an integer term
    pub fn int(value: impl Into<Integer>) -> Self {
        Term::Int(value.into())
    }

    /// Create a binary term
    pub fn binary(bytes: impl Into<Vec<u8>>) -> Self {
        Term::Binary(bytes.into())
    }

    /// Create a text term
    pub fn text(text: impl Into<String>) -> Self {
        Term::Text(text.into())
    }

    /// Create a tuple term
    pub fn tuple(items: impl Into<Vec<Term>>) -> Self {
        Term::Tuple(items.into())
    }

    /// Create a list term
    pub fn list(items: impl Into<Vec<Term>>) -> Self {
        Term::List(items.into())
    }

    /// The empty list
    pub fn nil() -> Self {
        Term::List(Vec::new())
    }

    /// True for the empty list sentinel
    pub fn is_nil(&self) -> bool {
        matches!(self, Term::List(items) if items.is_empty())
    }

    /// Human-readable kind name, used in error reporting
    pub fn kind(&self) -> &'static str {
        match self {
            Term::Atom(_) => "atom",
            Term::Bool(_) => "boolean",
            Term::Unit => "none",
            Term::Int(_) => "integer",
            Term::Float(_) => "float",
            Term::Binary(_) => "binary",
            Term::Text(_) => "text",
            Term::Tuple(_) => "tuple",
            Term::List(_) => "list",
            Term::Ref { .. } => "reference",
            Term::Port { .. } => "port",
            Term::Pid { .. } => "pid",
            Term::Export { .. } => "export",
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<bool> for Term {
    fn from(value: bool) -> Self {
        Term::Bool(value)
    }
}

impl From<i32> for Term {
    fn from(value: i32) -> Self {
        Term::Int(Integer::from(value))
    }
}

impl From<u32> for Term {
    fn from(value: u32) -> Self {
        Term::Int(Integer::from(value))
    }
}

impl From<i64> for Term {
    fn from(value: i64) -> Self {
        Term::Int(Integer::from(value))
    }
}

impl From<u64> for Term {
    fn from(value: u64) -> Self {
        Term::Int(Integer::from(value))
    }
}

impl From<Integer> for Term {
    fn from(value: Integer) -> Self {
        Term::Int(value)
    }
}

impl From<f64> for Term {
    fn from(value: f64) -> Self {
        Term::Float(value)
    }
}

impl From<&str> for Term {
    fn from(value: &str) -> Self {
        Term::Text(value.to_string())
    }
}

impl From<String> for Term {
    fn from(value: String) -> Self {
        Term::Text(value)
    }
}

impl From<Vec<u8>> for Term {
    fn from(value: Vec<u8>) -> Self {
        Term::Binary(value)
    }
}

impl From<&[u8]> for Term {
    fn from(value: &[u8]) -> Self {
        Term::Binary(value.to_vec())
    }
}

impl From<Vec<Term>> for Term {
    fn from(value: Vec<Term>) -> Self {
        Term::List(value)
    }
}

// =============================================================================
// Display
// =============================================================================

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Atom(name) => write!(f, "{}", name),
            Term::Bool(value) => write!(f, "{}", value),
            Term::Unit => write!(f, "none"),
            Term::Int(value) => write!(f, "{}", value),
            Term::Float(value) => write!(f, "{}", value),
            Term::Binary(bytes) => {
                write!(f, "<<")?;
                for (i, byte) in bytes.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", byte)?;
                }
                write!(f, ">>")
            }
            Term::Text(text) => write!(f, "<<{:?}>>", text),
            Term::Tuple(items) => {
                write!(f, "{{")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "}}")
            }
            Term::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Term::Ref { id, creation, .. } => {
                write!(f, "#Ref<{}", creation)?;
                for word in id {
                    write!(f, ".{}", word)?;
                }
                write!(f, ">")
            }
            Term::Port { id, creation, .. } => write!(f, "#Port<{}.{}>", creation, id),
            Term::Pid {
                id,
                serial,
                creation,
                ..
            } => write!(f, "<{}.{}.{}>", creation, id, serial),
            Term::Export {
                module,
                function,
                arity,
            } => write!(f, "#Fun<{}.{}.{}>", module, function, arity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality() {
        assert_eq!(Term::atom("ok"), Term::atom("ok"));
        assert_ne!(Term::atom("ok"), Term::atom("error"));
        assert_eq!(Term::from(42i64), Term::int(42i64));
        assert_ne!(Term::Binary(b"abc".to_vec()), Term::Text("abc".into()));
    }

    #[test]
    fn test_nil_detection() {
        assert!(Term::nil().is_nil());
        assert!(!Term::list(vec![Term::from(1i64)]).is_nil());
        assert!(!Term::Tuple(Vec::new()).is_nil());
    }

    #[test]
    fn test_display_identifiers() {
        let reference = Term::Ref {
            node: "node@host".into(),
            id: vec![1, 2, 3],
            creation: 4,
        };
        assert_eq!(reference.to_string(), "#Ref<4.1.2.3>");

        let pid = Term::Pid {
            node: "node@host".into(),
            id: 35,
            serial: 0,
            creation: 1,
        };
        assert_eq!(pid.to_string(), "<1.35.0>");

        let port = Term::Port {
            node: "node@host".into(),
            id: 5,
            creation: 2,
        };
        assert_eq!(port.to_string(), "#Port<2.5>");

        let export = Term::Export {
            module: "lists".into(),
            function: "map".into(),
            arity: 2,
        };
        assert_eq!(export.to_string(), "#Fun<lists.map.2>");
    }

    #[test]
    fn test_display_composites() {
        let term = Term::tuple(vec![
            Term::atom("ok"),
            Term::list(vec![Term::from(1i64), Term::from(2i64)]),
            Term::binary(vec![1u8, 2, 255]),
        ]);
        assert_eq!(term.to_string(), "{ok, [1, 2], <<1,2,255>>}");
    }
}
