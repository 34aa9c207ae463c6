//! Primitive type variants.
//!
//! Every fixed-width leaf of the wire format is one of these. Integers are
//! little-endian with a width implied by the name; `Str` is a compact-length
//! prefixed UTF-8 run and `Char` is a 32-bit Unicode scalar value.

use core::fmt;

/// Primitive (leaf) type.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Primitive {
    Bool,
    Char,
    Str,
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
    I8,
    I16,
    I32,
    I64,
    I128,
    I256,
}

impl Primitive {
    /// All primitives, in the order the portable registry enumerates them.
    pub const ALL: [Primitive; 15] = [
        Primitive::Bool,
        Primitive::Char,
        Primitive::Str,
        Primitive::U8,
        Primitive::U16,
        Primitive::U32,
        Primitive::U64,
        Primitive::U128,
        Primitive::U256,
        Primitive::I8,
        Primitive::I16,
        Primitive::I32,
        Primitive::I64,
        Primitive::I128,
        Primitive::I256,
    ];

    /// Resolve a primitive from its textual name.
    ///
    /// Integer names match `^[IiUu]\d+$` for the supported widths; `bool`,
    /// `char`, and the string aliases `str`, `text`, `String` are accepted in
    /// any letter case.
    pub fn from_name(name: &str) -> Option<Self> {
        let bytes = name.as_bytes();
        if bytes.len() >= 2 && bytes[1..].iter().all(u8::is_ascii_digit) {
            let signed = match bytes[0] {
                b'u' | b'U' => false,
                b'i' | b'I' => true,
                _ => return None,
            };
            return Self::integer(&name[1..], signed);
        }

        if name.eq_ignore_ascii_case("bool") {
            Some(Primitive::Bool)
        } else if name.eq_ignore_ascii_case("char") {
            Some(Primitive::Char)
        } else if name.eq_ignore_ascii_case("str")
            || name.eq_ignore_ascii_case("text")
            || name.eq_ignore_ascii_case("string")
        {
            Some(Primitive::Str)
        } else {
            None
        }
    }

    fn integer(width: &str, signed: bool) -> Option<Self> {
        let ty = match (width, signed) {
            ("8", false) => Primitive::U8,
            ("16", false) => Primitive::U16,
            ("32", false) => Primitive::U32,
            ("64", false) => Primitive::U64,
            ("128", false) => Primitive::U128,
            ("256", false) => Primitive::U256,
            ("8", true) => Primitive::I8,
            ("16", true) => Primitive::I16,
            ("32", true) => Primitive::I32,
            ("64", true) => Primitive::I64,
            ("128", true) => Primitive::I128,
            ("256", true) => Primitive::I256,
            _ => return None,
        };
        Some(ty)
    }

    /// Canonical lowercase name (`u32`, `bool`, `str`, ...).
    pub fn name(&self) -> &'static str {
        match self {
            Primitive::Bool => "bool",
            Primitive::Char => "char",
            Primitive::Str => "str",
            Primitive::U8 => "u8",
            Primitive::U16 => "u16",
            Primitive::U32 => "u32",
            Primitive::U64 => "u64",
            Primitive::U128 => "u128",
            Primitive::U256 => "u256",
            Primitive::I8 => "i8",
            Primitive::I16 => "i16",
            Primitive::I32 => "i32",
            Primitive::I64 => "i64",
            Primitive::I128 => "i128",
            Primitive::I256 => "i256",
        }
    }

    /// Bit width of integer primitives, `None` for the rest.
    pub fn bits(&self) -> Option<u32> {
        match self {
            Primitive::U8 | Primitive::I8 => Some(8),
            Primitive::U16 | Primitive::I16 => Some(16),
            Primitive::U32 | Primitive::I32 => Some(32),
            Primitive::U64 | Primitive::I64 => Some(64),
            Primitive::U128 | Primitive::I128 => Some(128),
            Primitive::U256 | Primitive::I256 => Some(256),
            Primitive::Bool | Primitive::Char | Primitive::Str => None,
        }
    }

    /// Returns true for signed integers.
    pub fn is_signed(&self) -> bool {
        matches!(
            self,
            Primitive::I8
                | Primitive::I16
                | Primitive::I32
                | Primitive::I64
                | Primitive::I128
                | Primitive::I256
        )
    }

    /// Returns true for any integer width.
    pub fn is_integer(&self) -> bool {
        self.bits().is_some()
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
