//! Error type shared by the codec, the legacy compiler, and the metadata
//! decoder.
//!
//! Every failure is fatal to the call that raised it: nothing is retried and
//! no partial value is returned.

use sable_parser::ParseError;
use sable_types::{RegistryError, TypeId};

pub type Result<T, E = Error> = core::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    // ========================================================================
    // Registry lookups
    // ========================================================================
    #[error("type {0} not found in registry")]
    TypeNotFound(TypeId),

    /// A recognized construct the codec does not handle, e.g. bit sequences
    /// or metadata versions before v9.
    #[error("{what} is not implemented")]
    TypeNotImplemented { what: String },

    // ========================================================================
    // Decoding
    // ========================================================================
    #[error("not enough bytes: needed {needed}, {available} available")]
    NotEnoughBytes { needed: usize, available: usize },

    #[error("invalid bytes for {ty}: {reason}")]
    InvalidBytes { ty: &'static str, reason: String },

    #[error("tag {index} does not match any variant of type {ty}")]
    VariantIndexOutOfRange { ty: TypeId, index: u8 },

    #[error("{remaining} trailing bytes after decoding")]
    TrailingBytes { remaining: usize },

    #[error("invalid hex input: {reason}")]
    InvalidHex { reason: String },

    #[error("recursion depth exceeds maximum of {max_depth}")]
    TooDeep { max_depth: usize },

    // ========================================================================
    // Encoding
    // ========================================================================
    #[error("type {ty} has no variant named `{name}`")]
    VariantItemNotFound { ty: TypeId, name: String },

    #[error("type {ty} has no field named `{name}`")]
    FieldNotFound { ty: TypeId, name: String },

    #[error("expected {expected} values, got {actual}")]
    LengthNotEqual { expected: usize, actual: usize },

    #[error("array of length {expected} cannot hold {actual} items")]
    ArrayLengthNotEqual { expected: usize, actual: usize },

    #[error("type {ty} expects a {expected}, got a {found}")]
    CompositeInvalidValue {
        ty: TypeId,
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid value for {expected}: {found}")]
    InvalidValue { expected: String, found: String },

    // ========================================================================
    // Legacy type compilation
    // ========================================================================
    #[error("invalid type expression: {0}")]
    TypeParse(#[from] ParseError),

    #[error("unknown type `{name}`")]
    UnknownType { name: String },

    #[error("type alias `{name}` refers back to itself")]
    RecursiveAlias { name: String },

    #[error("invalid definition for `{name}`: {reason}")]
    InvalidDictionary { name: String, reason: String },

    #[error(transparent)]
    Registry(RegistryError),

    #[error("portable entry at position {position} declares id {id}")]
    PortableIdMismatch { position: usize, id: u32 },

    // ========================================================================
    // Metadata
    // ========================================================================
    #[error("invalid metadata magic number {found:#010x}")]
    InvalidMagic { found: u32 },

    #[error("metadata is missing or has a malformed `{field}`")]
    MetadataShape { field: String },
}

impl Error {
    pub(crate) fn not_implemented(what: impl Into<String>) -> Self {
        Error::TypeNotImplemented { what: what.into() }
    }

    pub(crate) fn invalid_value(expected: impl Into<String>, found: impl ToString) -> Self {
        Error::InvalidValue {
            expected: expected.into(),
            found: found.to_string(),
        }
    }

    pub(crate) fn metadata_shape(field: impl Into<String>) -> Self {
        Error::MetadataShape {
            field: field.into(),
        }
    }
}

impl From<RegistryError> for Error {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::PortableIdMismatch { position, id } => {
                Error::PortableIdMismatch { position, id }
            }
            other => Error::Registry(other),
        }
    }
}
