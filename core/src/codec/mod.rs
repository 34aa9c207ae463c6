//! Type-driven encoding and decoding.
//!
//! Values carry no tags on the wire except for variant tag bytes; the type id
//! passed alongside the bytes decides how they are read. Decoding a type and
//! encoding the result reproduces the input bytes.
//!
//! # Value shapes
//!
//! | Type node                     | Value                              |
//! |-------------------------------|------------------------------------|
//! | unsigned / compact integer    | `UInt`                             |
//! | signed integer                | `Int`                              |
//! | `u256` / `i256`               | `U256` / `I256`                    |
//! | sequence or array of `u8`     | `Bytes`                            |
//! | other sequence, array, tuple  | `List`                             |
//! | struct with named fields      | `Record`                           |
//! | one unnamed field / 1-tuple   | the inner value                    |
//! | unit, empty tuple, `None`     | `Null`                             |
//! | `Some(v)`                     | `v`                                |
//! | `Some(v)`, `v` may be `Null`  | `Variant { "Some", v }`            |
//! | variant without payload       | `Symbol(name)`                     |
//! | variant with payload          | `Variant { name, payload }`        |

mod decode;
mod encode;
pub mod primitive;

pub use decode::{decode, decode_all, decode_with};
pub use encode::{encode, encode_to, encode_with};

use crate::{Error, Result};
use hashbrown::HashSet;
use sable_types::{Registry, TypeDef, TypeId};
use sable_values::Value;

/// Parses hex input, with or without a `0x` prefix.
pub fn hex_to_bytes(input: &str) -> Result<Vec<u8>> {
    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);
    hex::decode(digits).map_err(|err| Error::InvalidHex {
        reason: err.to_string(),
    })
}

/// Renders bytes as `0x`-prefixed lowercase hex.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decodes one value from hex input.
///
/// Returns the value and the unconsumed bytes.
pub fn decode_hex(id: TypeId, input: &str, registry: &Registry) -> Result<(Value, Vec<u8>)> {
    let bytes = hex_to_bytes(input)?;
    let (value, rest) = decode(id, &bytes, registry)?;
    Ok((value, rest.to_vec()))
}

/// Whether a value of type `id` can decode to `Null`.
///
/// `Some` is flattened to its payload only when this is false, so that
/// `Option<Option<T>>` and `Option<()>` keep `None` and `Some(None)` apart.
pub(crate) fn may_be_null(registry: &Registry, id: TypeId) -> bool {
    fn visit(registry: &Registry, id: TypeId, seen: &mut HashSet<TypeId>) -> bool {
        if !seen.insert(id) {
            return false;
        }
        match registry.def(id) {
            Some(TypeDef::Unit) => true,
            Some(TypeDef::Tuple(items)) => match items.as_slice() {
                [] => true,
                [single] => visit(registry, *single, seen),
                _ => false,
            },
            Some(TypeDef::Struct(fields)) => match fields.as_slice() {
                [] => true,
                [single] if single.name.is_none() => visit(registry, single.ty, seen),
                _ => false,
            },
            Some(def @ TypeDef::Variant(_)) => def.option_inner().is_some(),
            _ => false,
        }
    }
    visit(registry, id, &mut HashSet::new())
}
