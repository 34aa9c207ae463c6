//! Sable - a self-describing SCALE codec
//!
//! # Overview
//!
//! Sable decodes and encodes SCALE-encoded data driven by a registry of type
//! descriptions. Registries come from two places:
//!
//! - the portable type registry embedded in v14 runtime metadata
//! - legacy type expressions such as `Vec<(T::AccountId, Balance)>`, compiled
//!   against a dictionary of named definitions
//!
//! On top of the codec sits a decoder for runtime metadata v9 through v14,
//! with lookups for pallets, storage items, calls and constants.
//!
//! # Quick Start
//!
//! ```
//! use sable::{RegistryBuilder, Value, decode, encode};
//! use sable::legacy::LegacyTypes;
//!
//! let mut types = LegacyTypes::new();
//! types.structure("Transfer", &[("dest", "[u8; 4]"), ("amount", "Compact<u128>")]);
//!
//! let mut builder = RegistryBuilder::new(&types);
//! let transfer = builder.use_type("Transfer").unwrap();
//! let registry = builder.finish().unwrap();
//!
//! let value = Value::record([
//!     ("dest", Value::Bytes(vec![1, 2, 3, 4])),
//!     ("amount", Value::UInt(1000)),
//! ]);
//! let bytes = encode(transfer, &value, &registry).unwrap();
//! assert_eq!(bytes, [1, 2, 3, 4, 0xa1, 0x0f]);
//!
//! let (decoded, rest) = decode(transfer, &bytes, &registry).unwrap();
//! assert!(rest.is_empty());
//! assert_eq!(decoded, value);
//! ```
//!
//! # Errors
//!
//! Every operation returns [`Result`]. Parse errors in type expressions carry
//! a byte span; [`render_error_to_string`] shows them against the source.

mod error_renderer;

pub use error_renderer::{
    render_error, render_error_to, render_error_to_string, render_error_to_string_no_color,
};

// Re-export the core API
pub use sable_core::{
    CodecOptions, Error, Metadata, RegistryBuilder, Result, decode, decode_all, decode_hex,
    decode_metadata, decode_metadata_hex, decode_with, encode, encode_with,
};
pub use sable_core::{codec, compiler, legacy, metadata, portable, storage};

// Re-export the type model and values
pub use sable_parser::{ParseError, Span, TypeExpr};
pub use sable_types::{Field, Primitive, Registry, TypeDef, TypeId, TypeNode, VariantDef};
pub use sable_values::Value;
