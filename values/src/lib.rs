//! Dynamic values produced by decoding and consumed by encoding.

#![no_std]
#![deny(unsafe_code)]

extern crate alloc;

mod display;
mod impls;
mod value;

pub use value::Value;
