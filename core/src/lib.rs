//! Type-driven SCALE codec, legacy type compiler and runtime metadata
//! decoder.
//!
//! Values are decoded and encoded against a [`Registry`](sable_types::Registry)
//! of type nodes addressed by [`TypeId`](sable_types::TypeId). Registries come
//! either from a portable registry embedded in metadata ([`portable`]) or from
//! legacy type expressions compiled against a dictionary ([`compiler`]).

pub mod codec;
pub mod compiler;
pub mod legacy;
pub mod metadata;
pub mod portable;
pub mod storage;

mod errors;
mod options;

pub use codec::{decode, decode_all, decode_hex, decode_with, encode, encode_with};
pub use compiler::RegistryBuilder;
pub use errors::{Error, Result};
pub use metadata::{Metadata, decode_metadata, decode_metadata_hex};
pub use options::CodecOptions;

static_assertions::assert_impl_all!(sable_types::Registry: Send, Sync);
static_assertions::assert_impl_all!(Metadata: Send, Sync);
static_assertions::assert_impl_all!(Error: Send, Sync);
