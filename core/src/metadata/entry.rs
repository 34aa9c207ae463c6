//! Typed views of pallet items extracted from decoded metadata.
//!
//! Legacy versions describe types as text, v14 as ids into the embedded
//! registry; [`TypeRef`] covers both.

use crate::portable::{list, strings, text, type_id};
use crate::storage::HasherKind;
use crate::{Error, Result};
use sable_types::{Registry, TypeDef, TypeId};
use sable_values::Value;

/// A type reference as written in metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// Id into the v14 portable registry.
    Id(TypeId),
    /// Legacy type expression, to be compiled with a
    /// [`RegistryBuilder`](crate::compiler::RegistryBuilder).
    Legacy(String),
}

impl TypeRef {
    pub(super) fn from_value(value: &Value, field: &str) -> Result<Self> {
        match value {
            Value::UInt(id) => u32::try_from(*id)
                .map(|id| TypeRef::Id(TypeId(id)))
                .map_err(|_| Error::metadata_shape(field)),
            Value::Str(expr) => Ok(TypeRef::Legacy(expr.clone())),
            _ => Err(Error::metadata_shape(field)),
        }
    }

    pub fn as_id(&self) -> Option<TypeId> {
        match self {
            TypeRef::Id(id) => Some(*id),
            TypeRef::Legacy(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageModifier {
    /// Absent values read as `None`.
    Optional,
    /// Absent values read as the fallback.
    Default,
    Required,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageEntryKind {
    Plain {
        value: TypeRef,
    },
    /// One hasher per key; `Map`, `DoubleMap` and `NMap` all land here.
    Map {
        hashers: Vec<HasherKind>,
        keys: Vec<TypeRef>,
        value: TypeRef,
    },
}

/// A storage item of one pallet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEntry {
    /// Storage prefix of the owning pallet, the first hashed key segment.
    pub prefix: String,
    pub name: String,
    pub modifier: StorageModifier,
    pub kind: StorageEntryKind,
    /// Encoded default value.
    pub fallback: Vec<u8>,
    pub docs: Vec<String>,
}

impl StorageEntry {
    /// Reads one decoded storage entry record.
    ///
    /// A v14 map with several hashers keys on a tuple type; the tuple is
    /// split into one key per hasher using `registry`.
    pub(super) fn from_value(
        prefix: &str,
        entry: &Value,
        registry: Option<&Registry>,
    ) -> Result<Self> {
        let modifier = match entry.field("modifier").and_then(Value::variant_name) {
            Some("Optional") => StorageModifier::Optional,
            Some("Default") => StorageModifier::Default,
            Some("Required") => StorageModifier::Required,
            _ => return Err(Error::metadata_shape("modifier")),
        };
        let ty = entry
            .field("type")
            .ok_or_else(|| Error::metadata_shape("type"))?;

        Ok(StorageEntry {
            prefix: prefix.to_string(),
            name: text(entry, "name")?.to_string(),
            modifier,
            kind: entry_kind(ty, registry)?,
            fallback: entry
                .field("fallback")
                .and_then(Value::as_bytes)
                .ok_or_else(|| Error::metadata_shape("fallback"))?
                .to_vec(),
            docs: strings(entry, "docs")?,
        })
    }

    pub fn value_type(&self) -> &TypeRef {
        match &self.kind {
            StorageEntryKind::Plain { value } | StorageEntryKind::Map { value, .. } => value,
        }
    }

    pub fn is_map(&self) -> bool {
        matches!(self.kind, StorageEntryKind::Map { .. })
    }
}

fn entry_kind(ty: &Value, registry: Option<&Registry>) -> Result<StorageEntryKind> {
    let payload = ty.payload().ok_or_else(|| Error::metadata_shape("type"))?;
    let type_ref = |name: &str| {
        payload
            .field(name)
            .ok_or_else(|| Error::metadata_shape(name))
            .and_then(|value| TypeRef::from_value(value, name))
    };

    match ty.variant_name() {
        Some("Plain") => Ok(StorageEntryKind::Plain {
            value: TypeRef::from_value(payload, "type.Plain")?,
        }),
        Some("Map") if payload.field("hashers").is_some() => {
            let hashers = hashers(list(payload, "hashers")?)?;
            let key = type_ref("key")?;
            let keys = split_key(key, hashers.len(), registry)?;
            Ok(StorageEntryKind::Map {
                hashers,
                keys,
                value: type_ref("value")?,
            })
        }
        Some("Map") => Ok(StorageEntryKind::Map {
            hashers: vec![hasher(payload.field("hasher"))?],
            keys: vec![type_ref("key")?],
            value: type_ref("value")?,
        }),
        Some("DoubleMap") => Ok(StorageEntryKind::Map {
            hashers: vec![
                hasher(payload.field("hasher"))?,
                hasher(payload.field("key2_hasher"))?,
            ],
            keys: vec![type_ref("key1")?, type_ref("key2")?],
            value: type_ref("value")?,
        }),
        Some("NMap") => {
            let hashers = hashers(list(payload, "hashers")?)?;
            let keys = list(payload, "keys")?
                .iter()
                .map(|key| TypeRef::from_value(key, "keys"))
                .collect::<Result<Vec<_>>>()?;
            if keys.len() != hashers.len() {
                return Err(Error::LengthNotEqual {
                    expected: hashers.len(),
                    actual: keys.len(),
                });
            }
            Ok(StorageEntryKind::Map {
                hashers,
                keys,
                value: type_ref("value")?,
            })
        }
        _ => Err(Error::metadata_shape("type")),
    }
}

fn split_key(key: TypeRef, count: usize, registry: Option<&Registry>) -> Result<Vec<TypeRef>> {
    if count == 1 {
        return Ok(vec![key]);
    }
    let id = key.as_id().ok_or_else(|| Error::metadata_shape("type.Map.key"))?;
    let registry = registry.ok_or_else(|| Error::metadata_shape("lookup"))?;
    match registry.def(id) {
        Some(TypeDef::Tuple(items)) if items.len() == count => {
            Ok(items.iter().map(|item| TypeRef::Id(*item)).collect())
        }
        Some(TypeDef::Tuple(items)) => Err(Error::LengthNotEqual {
            expected: count,
            actual: items.len(),
        }),
        Some(_) => Err(Error::metadata_shape("type.Map.key")),
        None => Err(Error::TypeNotFound(id)),
    }
}

fn hasher(value: Option<&Value>) -> Result<HasherKind> {
    value
        .and_then(Value::variant_name)
        .and_then(HasherKind::from_name)
        .ok_or_else(|| Error::metadata_shape("hasher"))
}

fn hashers(values: &[Value]) -> Result<Vec<HasherKind>> {
    values.iter().map(|value| hasher(Some(value))).collect()
}

// ============================================================================
// Calls and constants
// ============================================================================

/// Where a pallet's calls are described.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Calls<'m> {
    /// A variant type in the portable registry, one variant per call.
    Portable(TypeId),
    /// Legacy function descriptors, call index by position.
    Legacy(&'m [Value]),
}

/// A dispatchable call, addressed on the wire by two index bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub pallet_index: u8,
    pub call_index: u8,
    pub name: String,
    pub args: Vec<CallArg>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallArg {
    pub name: Option<String>,
    pub ty: TypeRef,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constant {
    pub name: String,
    pub ty: TypeRef,
    /// Encoded value.
    pub value: Vec<u8>,
    pub docs: Vec<String>,
}

impl Constant {
    pub(super) fn from_value(constant: &Value) -> Result<Self> {
        Ok(Constant {
            name: text(constant, "name")?.to_string(),
            ty: TypeRef::from_value(
                constant
                    .field("type")
                    .ok_or_else(|| Error::metadata_shape("type"))?,
                "type",
            )?,
            value: constant
                .field("value")
                .and_then(Value::as_bytes)
                .ok_or_else(|| Error::metadata_shape("value"))?
                .to_vec(),
            docs: strings(constant, "docs")?,
        })
    }
}

/// Legacy function descriptor `{name, args: [{name, type}], docs}`.
pub(super) fn legacy_call(
    pallet_index: u8,
    call_index: usize,
    function: &Value,
) -> Result<Call> {
    let args = list(function, "args")?
        .iter()
        .map(|arg| {
            Ok(CallArg {
                name: Some(text(arg, "name")?.to_string()),
                ty: TypeRef::Legacy(text(arg, "type")?.to_string()),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(Call {
        pallet_index,
        call_index: u8::try_from(call_index).map_err(|_| Error::metadata_shape("calls"))?,
        name: text(function, "name")?.to_string(),
        args,
    })
}

/// Reads a `{type: id}` record, as used by v14 call, event and error lists.
pub(super) fn type_id_record(value: &Value) -> Result<TypeId> {
    type_id(value, "type")
}
