use super::Primitive;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Index of a type node inside a [`Registry`](crate::Registry).
///
/// Nodes refer to each other only through ids, never through references, so
/// recursive schemas and forward references need no special treatment.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(pub u32);

impl TypeId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for TypeId {
    fn from(id: u32) -> Self {
        TypeId(id)
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A struct field or a variant payload field.
///
/// Tuple-like payloads have unnamed fields.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: Option<String>,
    pub ty: TypeId,
    /// Source-level type name, kept for display only.
    pub type_name: Option<String>,
}

impl Field {
    pub fn named(name: impl Into<String>, ty: TypeId) -> Self {
        Self {
            name: Some(name.into()),
            ty,
            type_name: None,
        }
    }

    pub fn unnamed(ty: TypeId) -> Self {
        Self {
            name: None,
            ty,
            type_name: None,
        }
    }
}

/// One alternative of a [`TypeDef::Variant`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VariantDef {
    pub name: String,
    /// Tag byte on the wire. Unique per enum, not necessarily the position.
    pub index: u8,
    pub fields: Vec<Field>,
}

/// Shape of a variant payload, derived from its fields.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PayloadShape {
    /// No payload.
    Simple,
    /// All fields unnamed.
    Tuple,
    /// All fields named.
    Struct,
}

impl VariantDef {
    pub fn simple(name: impl Into<String>, index: u8) -> Self {
        Self {
            name: name.into(),
            index,
            fields: Vec::new(),
        }
    }

    pub fn new(name: impl Into<String>, index: u8, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            index,
            fields,
        }
    }

    pub fn shape(&self) -> PayloadShape {
        if self.fields.is_empty() {
            PayloadShape::Simple
        } else if self.fields.iter().all(|f| f.name.is_some()) {
            PayloadShape::Struct
        } else {
            PayloadShape::Tuple
        }
    }
}

/// Logical structure of a type node.
///
/// The set is closed: codec functions match it exhaustively.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeDef {
    Primitive(Primitive),

    /// Variable-length unsigned integer. The inner type is informational.
    Compact(Option<TypeId>),

    /// Compact-length-prefixed homogeneous list.
    Sequence(TypeId),

    /// Fixed-length homogeneous list without a length prefix.
    Array { item: TypeId, len: u32 },

    /// Ordered heterogeneous list.
    Tuple(Vec<TypeId>),

    /// Named heterogeneous list. A single unnamed field is transparent.
    Struct(Vec<Field>),

    /// Zero-width value.
    Unit,

    /// Tagged union.
    Variant(Vec<VariantDef>),

    /// Bit-packed sequence. Recognized but not decodable.
    BitSequence { store: TypeId, order: TypeId },
}

impl TypeDef {
    /// Human-readable name of the node kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            TypeDef::Primitive(_) => "primitive",
            TypeDef::Compact(_) => "compact",
            TypeDef::Sequence(_) => "sequence",
            TypeDef::Array { .. } => "array",
            TypeDef::Tuple(_) => "tuple",
            TypeDef::Struct(_) => "struct",
            TypeDef::Unit => "unit",
            TypeDef::Variant(_) => "variant",
            TypeDef::BitSequence { .. } => "bit sequence",
        }
    }

    /// `Option<T>` is a two-variant enum `None@0 | Some(T)@1`.
    ///
    /// Returns the `Some` payload type when this node has that shape.
    pub fn option_inner(&self) -> Option<TypeId> {
        let TypeDef::Variant(variants) = self else {
            return None;
        };
        match variants.as_slice() {
            [none, some]
                if none.name == "None"
                    && none.index == 0
                    && none.fields.is_empty()
                    && some.name == "Some"
                    && some.index == 1
                    && some.fields.len() == 1 =>
            {
                Some(some.fields[0].ty)
            }
            _ => None,
        }
    }

    /// Looks up a variant by its tag byte.
    pub fn variant_by_index(&self, index: u8) -> Option<&VariantDef> {
        match self {
            TypeDef::Variant(variants) => variants.iter().find(|v| v.index == index),
            _ => None,
        }
    }

    /// Looks up a variant by name.
    pub fn variant_by_name(&self, name: &str) -> Option<&VariantDef> {
        match self {
            TypeDef::Variant(variants) => variants.iter().find(|v| v.name == name),
            _ => None,
        }
    }
}

/// A registry slot: the definition plus descriptive metadata.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TypeNode {
    /// Source path segments, e.g. `["sp_core", "crypto", "AccountId32"]`.
    /// Empty for anonymous and compiled types.
    pub path: Vec<String>,
    /// Names of generic parameters, kept for display.
    pub params: Vec<String>,
    pub def: TypeDef,
    pub docs: Vec<String>,
}

impl TypeNode {
    pub fn new(def: TypeDef) -> Self {
        Self {
            path: Vec::new(),
            params: Vec::new(),
            def,
            docs: Vec::new(),
        }
    }

    pub fn with_path(mut self, path: Vec<String>) -> Self {
        self.path = path;
        self
    }

    /// Last path segment, if the node has a path.
    pub fn name(&self) -> Option<&str> {
        self.path.last().map(String::as_str)
    }
}

impl From<TypeDef> for TypeNode {
    fn from(def: TypeDef) -> Self {
        TypeNode::new(def)
    }
}
