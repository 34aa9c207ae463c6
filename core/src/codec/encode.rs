use super::primitive::{
    encode_bool, encode_char, encode_compact_to, encode_int, encode_str, encode_uint,
    widen_signed, widen_unsigned,
};
use super::may_be_null;
use crate::{CodecOptions, Error, Result};
use sable_types::{Field, Primitive, Registry, TypeDef, TypeId};
use sable_values::Value;

/// Encodes `value` as type `id`.
pub fn encode(id: TypeId, value: &Value, registry: &Registry) -> Result<Vec<u8>> {
    encode_with(id, value, registry, &CodecOptions::default())
}

pub fn encode_with(
    id: TypeId,
    value: &Value,
    registry: &Registry,
    options: &CodecOptions,
) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    encode_to(id, value, registry, options, &mut out)?;
    Ok(out)
}

/// Appends the encoding of `value` to `out`.
///
/// On error `out` may hold a partial encoding and should be discarded.
pub fn encode_to(
    id: TypeId,
    value: &Value,
    registry: &Registry,
    options: &CodecOptions,
    out: &mut Vec<u8>,
) -> Result<()> {
    let mut encoder = Encoder {
        registry,
        max_depth: options.max_depth,
        depth: 0,
    };
    encoder.encode(id, value, out)
}

pub(crate) fn encode_primitive(primitive: Primitive, value: &Value, out: &mut Vec<u8>) -> Result<()> {
    let mismatch = || Error::invalid_value(primitive.name(), value.kind_name());

    match primitive {
        Primitive::Bool => encode_bool(value.as_bool().ok_or_else(mismatch)?, out),
        Primitive::Char => match value {
            Value::Char(c) => encode_char(*c, out),
            _ => return Err(mismatch()),
        },
        Primitive::Str => encode_str(value.as_str().ok_or_else(mismatch)?, out),
        Primitive::U256 => {
            let wide = match value {
                Value::U256(wide) => *wide,
                Value::UInt(n) => widen_unsigned(*n),
                Value::Int(n) if *n >= 0 => widen_unsigned(*n as u128),
                _ => return Err(mismatch()),
            };
            out.extend_from_slice(&wide);
        }
        Primitive::I256 => {
            let wide = match value {
                Value::I256(wide) => *wide,
                Value::Int(n) => widen_signed(*n),
                Value::UInt(n) => match i128::try_from(*n) {
                    Ok(n) => widen_signed(n),
                    Err(_) => widen_unsigned(*n),
                },
                _ => return Err(mismatch()),
            };
            out.extend_from_slice(&wide);
        }
        unsigned @ (Primitive::U8
        | Primitive::U16
        | Primitive::U32
        | Primitive::U64
        | Primitive::U128) => {
            let n = match value {
                Value::Int(n) if *n < 0 => return Err(Error::invalid_value(unsigned.name(), n)),
                _ => value.as_u128().ok_or_else(mismatch)?,
            };
            encode_uint(unsigned.bits().unwrap_or(128), n, out)?;
        }
        signed @ (Primitive::I8
        | Primitive::I16
        | Primitive::I32
        | Primitive::I64
        | Primitive::I128) => {
            let n = match value {
                Value::UInt(n) if i128::try_from(*n).is_err() => {
                    return Err(Error::invalid_value(signed.name(), n));
                }
                _ => value.as_i128().ok_or_else(mismatch)?,
            };
            encode_int(signed.bits().unwrap_or(128), n, out)?;
        }
    }
    Ok(())
}

struct Encoder<'r> {
    registry: &'r Registry,
    max_depth: usize,
    depth: usize,
}

impl<'r> Encoder<'r> {
    fn encode(&mut self, id: TypeId, value: &Value, out: &mut Vec<u8>) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(Error::TooDeep {
                max_depth: self.max_depth,
            });
        }
        self.depth += 1;
        let result = self.encode_node(id, value, out);
        self.depth -= 1;
        result
    }

    fn encode_node(&mut self, id: TypeId, value: &Value, out: &mut Vec<u8>) -> Result<()> {
        let registry = self.registry;
        let def = registry.def(id).ok_or(Error::TypeNotFound(id))?;
        tracing::trace!(ty = %id, kind = def.kind_name(), value = value.kind_name(), "encode");

        match def {
            TypeDef::Primitive(primitive) => encode_primitive(*primitive, value, out),
            TypeDef::Compact(_) => {
                let n = value
                    .as_u128()
                    .ok_or_else(|| Error::invalid_value("compact", value.kind_name()))?;
                encode_compact_to(n, out);
                Ok(())
            }
            TypeDef::Sequence(item) => {
                let len = self.item_count(id, *item, value)?;
                encode_compact_to(len as u128, out);
                self.encode_items(id, *item, value, out)
            }
            TypeDef::Array { item, len } => {
                let actual = self.item_count(id, *item, value)?;
                if actual != *len as usize {
                    return Err(Error::ArrayLengthNotEqual {
                        expected: *len as usize,
                        actual,
                    });
                }
                self.encode_items(id, *item, value, out)
            }
            TypeDef::Tuple(items) => match items.as_slice() {
                [] => expect_empty(id, value),
                [single] => self.encode(*single, value, out),
                _ => {
                    let values = value.as_list().ok_or(Error::CompositeInvalidValue {
                        ty: id,
                        expected: "list",
                        found: value.kind_name(),
                    })?;
                    if values.len() != items.len() {
                        return Err(Error::LengthNotEqual {
                            expected: items.len(),
                            actual: values.len(),
                        });
                    }
                    for (item, value) in items.iter().zip(values) {
                        self.encode(*item, value, out)?;
                    }
                    Ok(())
                }
            },
            TypeDef::Struct(fields) => self.encode_fields(id, fields, value, out),
            TypeDef::Unit => expect_empty(id, value),
            TypeDef::Variant(variants) => {
                if let Some(inner) = def.option_inner() {
                    if value.is_null() {
                        out.push(0);
                        return Ok(());
                    }
                    let payload = if may_be_null(self.registry, inner) {
                        match value {
                            Value::Variant { name, payload } if name == "Some" => &**payload,
                            _ => {
                                return Err(Error::CompositeInvalidValue {
                                    ty: id,
                                    expected: "Some variant",
                                    found: value.kind_name(),
                                });
                            }
                        }
                    } else {
                        value
                    };
                    out.push(1);
                    return self.encode(inner, payload, out);
                }

                let (name, payload) = match value {
                    Value::Str(name) => (name.as_str(), &Value::Null),
                    _ => match (value.variant_name(), value.payload()) {
                        (Some(name), Some(payload)) => (name, payload),
                        _ => {
                            return Err(Error::CompositeInvalidValue {
                                ty: id,
                                expected: "variant",
                                found: value.kind_name(),
                            });
                        }
                    },
                };
                let variant = variants.iter().find(|v| v.name == name).ok_or_else(|| {
                    Error::VariantItemNotFound {
                        ty: id,
                        name: name.to_string(),
                    }
                })?;
                out.push(variant.index);
                self.encode_fields(id, &variant.fields, payload, out)
            }
            TypeDef::BitSequence { .. } => Err(Error::not_implemented("bit sequence encoding")),
        }
    }

    /// Number of items in a sequence or array value.
    ///
    /// `u8` items also accept a byte string or a text string.
    fn item_count(&self, id: TypeId, item: TypeId, value: &Value) -> Result<usize> {
        match value {
            Value::List(items) => Ok(items.len()),
            Value::Bytes(bytes) if self.is_byte(item) => Ok(bytes.len()),
            Value::Str(s) if self.is_byte(item) => Ok(s.len()),
            _ => Err(Error::CompositeInvalidValue {
                ty: id,
                expected: "list",
                found: value.kind_name(),
            }),
        }
    }

    fn encode_items(
        &mut self,
        id: TypeId,
        item: TypeId,
        value: &Value,
        out: &mut Vec<u8>,
    ) -> Result<()> {
        match value {
            Value::Bytes(bytes) => out.extend_from_slice(bytes),
            Value::Str(s) => out.extend_from_slice(s.as_bytes()),
            Value::List(values) => {
                for value in values {
                    self.encode(item, value, out)?;
                }
            }
            _ => {
                return Err(Error::CompositeInvalidValue {
                    ty: id,
                    expected: "list",
                    found: value.kind_name(),
                });
            }
        }
        Ok(())
    }

    fn is_byte(&self, id: TypeId) -> bool {
        matches!(self.registry.def(id), Some(TypeDef::Primitive(Primitive::U8)))
    }

    /// Struct bodies and variant payloads, mirroring the decoder's shapes.
    ///
    /// Named fields take a record (looked up by name, written in declaration
    /// order) or a positional list.
    fn encode_fields(
        &mut self,
        id: TypeId,
        fields: &[Field],
        value: &Value,
        out: &mut Vec<u8>,
    ) -> Result<()> {
        match fields {
            [] => expect_empty(id, value),
            [single] if single.name.is_none() => self.encode(single.ty, value, out),
            _ => match value {
                Value::Record(entries) => {
                    if entries.len() != fields.len() {
                        return Err(Error::LengthNotEqual {
                            expected: fields.len(),
                            actual: entries.len(),
                        });
                    }
                    for field in fields {
                        let name = field.name.as_deref().unwrap_or_default();
                        let value = value.field(name).ok_or_else(|| Error::FieldNotFound {
                            ty: id,
                            name: name.to_string(),
                        })?;
                        self.encode(field.ty, value, out)?;
                    }
                    Ok(())
                }
                Value::List(values) => {
                    if values.len() != fields.len() {
                        return Err(Error::LengthNotEqual {
                            expected: fields.len(),
                            actual: values.len(),
                        });
                    }
                    for (field, value) in fields.iter().zip(values) {
                        self.encode(field.ty, value, out)?;
                    }
                    Ok(())
                }
                _ => Err(Error::CompositeInvalidValue {
                    ty: id,
                    expected: "record or list",
                    found: value.kind_name(),
                }),
            },
        }
    }
}

/// Zero-width types accept `Null` or an empty list or record.
fn expect_empty(id: TypeId, value: &Value) -> Result<()> {
    match value {
        Value::Null => Ok(()),
        Value::List(items) if items.is_empty() => Ok(()),
        Value::Record(fields) if fields.is_empty() => Ok(()),
        _ => Err(Error::CompositeInvalidValue {
            ty: id,
            expected: "null",
            found: value.kind_name(),
        }),
    }
}
