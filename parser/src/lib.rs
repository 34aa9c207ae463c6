//! Parser for legacy (pre-portable) type expressions.
//!
//! Runtimes that predate the portable type registry describe their storage,
//! call arguments, and events with Rust-like type strings such as
//! `Vec<(T::AccountId, BalanceOf<T>)>` or `<T::Lookup as StaticLookup>::Source`.
//! This crate turns those strings into a small [`TypeExpr`] tree whose
//! `Display` output is canonical: two expressions denote the same type when
//! their printed forms are equal.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::TypeExpr;
pub use error::ParseError;
pub use parser::parse;

/// Byte range into the parsed source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span(pub usize, pub usize);

impl Span {
    pub fn range(&self) -> core::ops::Range<usize> {
        self.0..self.1
    }
}
