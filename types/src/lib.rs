//! Type model for the sable codec.
//!
//! Types live in a [`Registry`]: an append-only arena of [`TypeNode`]s
//! addressed by [`TypeId`]. Nodes only ever reference other nodes by id, which
//! is what lets recursive and forward-referencing schemas be represented
//! without pointers.
//!
//! # Example
//!
//! ```
//! use sable_types::{Field, Primitive, Registry, TypeDef};
//!
//! let mut registry = Registry::new();
//! let u32_ty = registry.push(TypeDef::Primitive(Primitive::U32));
//! let point = registry.push(TypeDef::Struct(vec![
//!     Field::named("x", u32_ty),
//!     Field::named("y", u32_ty),
//! ]));
//!
//! assert_eq!(registry.display(point), "{x: u32, y: u32}");
//! ```

#![no_std]
extern crate alloc;

pub mod display;
pub mod primitive;
pub mod registry;
pub mod ty;
mod visit;

pub use display::TypeFormatter;
pub use primitive::Primitive;
pub use registry::{Registry, RegistryError};
pub use ty::{Field, PayloadShape, TypeDef, TypeId, TypeNode, VariantDef};
