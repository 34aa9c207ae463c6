use super::primitive::{
    decode_bool, decode_char, decode_compact, decode_int, decode_length, decode_str, decode_uint,
    decode_wide, take,
};
use super::may_be_null;
use crate::{CodecOptions, Error, Result};
use sable_types::{Field, PayloadShape, Primitive, Registry, TypeDef, TypeId};
use sable_values::Value;

/// Decodes one value of type `id` from the front of `bytes`.
///
/// Returns the value and the unconsumed input.
pub fn decode<'b>(id: TypeId, bytes: &'b [u8], registry: &Registry) -> Result<(Value, &'b [u8])> {
    decode_with(id, bytes, registry, &CodecOptions::default())
}

pub fn decode_with<'b>(
    id: TypeId,
    bytes: &'b [u8],
    registry: &Registry,
    options: &CodecOptions,
) -> Result<(Value, &'b [u8])> {
    let mut decoder = Decoder {
        registry,
        max_depth: options.max_depth,
        depth: 0,
    };
    decoder.decode(id, bytes)
}

/// Decodes one value and fails if any input is left over.
pub fn decode_all(id: TypeId, bytes: &[u8], registry: &Registry) -> Result<Value> {
    let (value, rest) = decode(id, bytes, registry)?;
    if !rest.is_empty() {
        return Err(Error::TrailingBytes {
            remaining: rest.len(),
        });
    }
    Ok(value)
}

pub(crate) fn decode_primitive(primitive: Primitive, bytes: &[u8]) -> Result<(Value, &[u8])> {
    match primitive {
        Primitive::Bool => decode_bool(bytes).map(|(b, rest)| (Value::Bool(b), rest)),
        Primitive::Char => decode_char(bytes).map(|(c, rest)| (Value::Char(c), rest)),
        Primitive::Str => decode_str(bytes).map(|(s, rest)| (Value::str(s), rest)),
        Primitive::U256 => decode_wide(bytes).map(|(n, rest)| (Value::U256(n), rest)),
        Primitive::I256 => decode_wide(bytes).map(|(n, rest)| (Value::I256(n), rest)),
        unsigned @ (Primitive::U8
        | Primitive::U16
        | Primitive::U32
        | Primitive::U64
        | Primitive::U128) => {
            let bits = unsigned.bits().unwrap_or(128);
            decode_uint(bits, bytes).map(|(n, rest)| (Value::UInt(n), rest))
        }
        signed @ (Primitive::I8
        | Primitive::I16
        | Primitive::I32
        | Primitive::I64
        | Primitive::I128) => {
            let bits = signed.bits().unwrap_or(128);
            decode_int(bits, bytes).map(|(n, rest)| (Value::Int(n), rest))
        }
    }
}

struct Decoder<'r> {
    registry: &'r Registry,
    max_depth: usize,
    depth: usize,
}

impl<'r> Decoder<'r> {
    fn decode<'b>(&mut self, id: TypeId, bytes: &'b [u8]) -> Result<(Value, &'b [u8])> {
        if self.depth >= self.max_depth {
            return Err(Error::TooDeep {
                max_depth: self.max_depth,
            });
        }
        self.depth += 1;
        let result = self.decode_node(id, bytes);
        self.depth -= 1;
        result
    }

    fn decode_node<'b>(&mut self, id: TypeId, bytes: &'b [u8]) -> Result<(Value, &'b [u8])> {
        let registry = self.registry;
        let def = registry.def(id).ok_or(Error::TypeNotFound(id))?;
        tracing::trace!(ty = %id, kind = def.kind_name(), remaining = bytes.len(), "decode");

        match def {
            TypeDef::Primitive(primitive) => decode_primitive(*primitive, bytes),
            TypeDef::Compact(_) => decode_compact(bytes).map(|(n, rest)| (Value::UInt(n), rest)),
            TypeDef::Sequence(item) => {
                let (len, rest) = decode_length(bytes)?;
                self.decode_items(*item, len, rest)
            }
            TypeDef::Array { item, len } => self.decode_items(*item, *len as usize, bytes),
            TypeDef::Tuple(items) => match items.as_slice() {
                [] => Ok((Value::Null, bytes)),
                [single] => self.decode(*single, bytes),
                _ => {
                    let mut values = Vec::with_capacity(items.len());
                    let mut rest = bytes;
                    for item in items {
                        let (value, next) = self.decode(*item, rest)?;
                        values.push(value);
                        rest = next;
                    }
                    Ok((Value::List(values), rest))
                }
            },
            TypeDef::Struct(fields) => self.decode_fields(fields, bytes),
            TypeDef::Unit => Ok((Value::Null, bytes)),
            TypeDef::Variant(variants) => {
                let Some((&tag, rest)) = bytes.split_first() else {
                    return Err(Error::NotEnoughBytes {
                        needed: 1,
                        available: 0,
                    });
                };
                let variant = variants
                    .iter()
                    .find(|v| v.index == tag)
                    .ok_or(Error::VariantIndexOutOfRange { ty: id, index: tag })?;

                if let Some(inner) = def.option_inner() {
                    return match tag {
                        0 => Ok((Value::Null, rest)),
                        _ if may_be_null(registry, inner) => {
                            let (value, rest) = self.decode(inner, rest)?;
                            Ok((Value::variant("Some", value), rest))
                        }
                        _ => self.decode(inner, rest),
                    };
                }

                match variant.shape() {
                    PayloadShape::Simple => Ok((Value::symbol(&variant.name), rest)),
                    PayloadShape::Tuple | PayloadShape::Struct => {
                        let (payload, rest) = self.decode_fields(&variant.fields, rest)?;
                        Ok((Value::variant(&variant.name, payload), rest))
                    }
                }
            }
            TypeDef::BitSequence { .. } => Err(Error::not_implemented("bit sequence decoding")),
        }
    }

    /// Sequences and arrays. Items of type `u8` come back as one byte string.
    fn decode_items<'b>(
        &mut self,
        item: TypeId,
        len: usize,
        bytes: &'b [u8],
    ) -> Result<(Value, &'b [u8])> {
        if let Some(TypeDef::Primitive(Primitive::U8)) = self.registry.def(item) {
            let (head, rest) = take(bytes, len)?;
            return Ok((Value::Bytes(head.to_vec()), rest));
        }

        // Every item takes at least one byte except zero-width ones, so the
        // remaining input bounds the preallocation.
        let mut values = Vec::with_capacity(len.min(bytes.len()));
        let mut rest = bytes;
        for _ in 0..len {
            let (value, next) = self.decode(item, rest)?;
            values.push(value);
            rest = next;
        }
        Ok((Value::List(values), rest))
    }

    /// Struct bodies and variant payloads.
    ///
    /// A single unnamed field is transparent; named fields give a record and
    /// unnamed ones a list.
    fn decode_fields<'b>(&mut self, fields: &[Field], bytes: &'b [u8]) -> Result<(Value, &'b [u8])> {
        match fields {
            [] => Ok((Value::Null, bytes)),
            [single] if single.name.is_none() => self.decode(single.ty, bytes),
            _ => {
                let named = fields.iter().all(|f| f.name.is_some());
                let mut rest = bytes;
                let mut values = Vec::with_capacity(fields.len());
                for field in fields {
                    let (value, next) = self.decode(field.ty, rest)?;
                    values.push((field.name.clone(), value));
                    rest = next;
                }
                let value = if named {
                    Value::Record(
                        values
                            .into_iter()
                            .map(|(name, value)| (name.unwrap_or_default(), value))
                            .collect(),
                    )
                } else {
                    Value::List(values.into_iter().map(|(_, value)| value).collect())
                };
                Ok((value, rest))
            }
        }
    }
}
