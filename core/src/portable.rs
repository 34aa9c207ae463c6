//! Importing a portable type registry from decoded metadata.
//!
//! A v14 metadata blob carries its own type registry as a flat list of
//! `{id, type: {path, params, def, docs}}` entries whose ids are list
//! positions. Those entries arrive here as decoded [`Value`]s and are turned
//! into [`TypeNode`]s without going through the legacy compiler.

use crate::{Error, Result};
use sable_types::{Field, Primitive, Registry, TypeDef, TypeId, TypeNode, VariantDef};
use sable_values::Value;

/// Builds a registry from the decoded `lookup.types` list.
pub fn registry_from_value(types: &Value) -> Result<Registry> {
    let entries = types
        .as_list()
        .ok_or_else(|| Error::metadata_shape("lookup.types"))?;
    let nodes = entries
        .iter()
        .map(|entry| {
            let id = small_uint(entry, "id")?;
            let ty = entry
                .field("type")
                .ok_or_else(|| Error::metadata_shape("type"))?;
            Ok((id, type_node(ty)?))
        })
        .collect::<Result<Vec<_>>>()?;

    let registry = Registry::from_portable(nodes)?;
    tracing::debug!(types = registry.len(), "imported portable registry");
    Ok(registry)
}

fn type_node(ty: &Value) -> Result<TypeNode> {
    let path = strings(ty, "path")?;
    let params = list(ty, "params")?
        .iter()
        .map(|param| Ok(text(param, "name")?.to_string()))
        .collect::<Result<Vec<_>>>()?;
    let def = type_def(ty.field("def").ok_or_else(|| Error::metadata_shape("def"))?)?;
    let docs = strings(ty, "docs")?;
    Ok(TypeNode {
        path,
        params,
        def,
        docs,
    })
}

fn type_def(def: &Value) -> Result<TypeDef> {
    let kind = def
        .variant_name()
        .ok_or_else(|| Error::metadata_shape("def"))?;
    let payload = def.payload().unwrap_or(&Value::Null);

    let def = match kind {
        "Composite" => TypeDef::Struct(fields(payload)?),
        "Variant" => {
            let variants = list(payload, "variants")?
                .iter()
                .map(|variant| {
                    let index = uint(variant, "index")?;
                    let index = u8::try_from(index)
                        .map_err(|_| Error::metadata_shape("variants.index"))?;
                    Ok(VariantDef::new(
                        text(variant, "name")?,
                        index,
                        fields(variant)?,
                    ))
                })
                .collect::<Result<Vec<_>>>()?;
            TypeDef::Variant(variants)
        }
        "Sequence" => TypeDef::Sequence(type_id(payload, "type")?),
        "Array" => TypeDef::Array {
            item: type_id(payload, "type")?,
            len: small_uint(payload, "len")?,
        },
        "Tuple" => {
            let items = payload
                .as_list()
                .ok_or_else(|| Error::metadata_shape("def.Tuple"))?
                .iter()
                .map(|item| {
                    item.as_u128()
                        .and_then(|id| u32::try_from(id).ok())
                        .map(TypeId)
                        .ok_or_else(|| Error::metadata_shape("def.Tuple"))
                })
                .collect::<Result<Vec<_>>>()?;
            TypeDef::Tuple(items)
        }
        "Primitive" => {
            let name = payload
                .variant_name()
                .ok_or_else(|| Error::metadata_shape("def.Primitive"))?;
            TypeDef::Primitive(
                Primitive::from_name(name).ok_or_else(|| Error::metadata_shape("def.Primitive"))?,
            )
        }
        "Compact" => TypeDef::Compact(Some(type_id(payload, "type")?)),
        "BitSequence" => TypeDef::BitSequence {
            store: type_id(payload, "bit_store_type")?,
            order: type_id(payload, "bit_order_type")?,
        },
        other => return Err(Error::metadata_shape(format!("def.{other}"))),
    };
    Ok(def)
}

/// An empty composite is a zero-width struct; an empty field list on a
/// variant is a payload-less variant.
fn fields(owner: &Value) -> Result<Vec<Field>> {
    list(owner, "fields")?
        .iter()
        .map(|field| {
            Ok(Field {
                name: optional_text(field, "name")?,
                ty: type_id(field, "type")?,
                type_name: optional_text(field, "type_name")?,
            })
        })
        .collect()
}

// ============================================================================
// Field access helpers
// ============================================================================

pub(crate) fn list<'v>(value: &'v Value, name: &str) -> Result<&'v [Value]> {
    value
        .field(name)
        .and_then(Value::as_list)
        .ok_or_else(|| Error::metadata_shape(name))
}

pub(crate) fn text<'v>(value: &'v Value, name: &str) -> Result<&'v str> {
    value
        .field(name)
        .and_then(Value::as_str)
        .ok_or_else(|| Error::metadata_shape(name))
}

pub(crate) fn optional_text(value: &Value, name: &str) -> Result<Option<String>> {
    match value.field(name) {
        Some(Value::Null) => Ok(None),
        Some(Value::Str(s)) => Ok(Some(s.clone())),
        _ => Err(Error::metadata_shape(name)),
    }
}

pub(crate) fn strings(value: &Value, name: &str) -> Result<Vec<String>> {
    list(value, name)?
        .iter()
        .map(|s| {
            s.as_str()
                .map(str::to_string)
                .ok_or_else(|| Error::metadata_shape(name))
        })
        .collect()
}

pub(crate) fn uint(value: &Value, name: &str) -> Result<u128> {
    value
        .field(name)
        .and_then(Value::as_u128)
        .ok_or_else(|| Error::metadata_shape(name))
}

/// An unsigned field that must fit in 32 bits, such as a type id.
pub(crate) fn small_uint(value: &Value, name: &str) -> Result<u32> {
    u32::try_from(uint(value, name)?).map_err(|_| Error::metadata_shape(name))
}

pub(crate) fn type_id(value: &Value, name: &str) -> Result<TypeId> {
    small_uint(value, name).map(TypeId)
}
