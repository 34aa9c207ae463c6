//! Versioned runtime metadata.
//!
//! A metadata blob is `MetadataPrefixed { magic_number, metadata }` where
//! `metadata` is an enum over schema versions. Versions 9 through 13 describe
//! types as legacy expressions; version 14 embeds a portable registry. The
//! blob itself is decoded with the ordinary codec through a registry compiled
//! once from the built-in dictionaries in this module.
//!
//! # Example
//!
//! ```
//! use sable_core::metadata::{MAGIC_NUMBER, decode_metadata};
//! use sable_core::Error;
//!
//! // Magic number followed by version 8.
//! let mut blob = MAGIC_NUMBER.to_le_bytes().to_vec();
//! blob.push(8);
//! assert!(matches!(
//!     decode_metadata(&blob),
//!     Err(Error::TypeNotImplemented { .. })
//! ));
//! ```

mod entry;
mod fields;
mod v10;
mod v11;
mod v12;
mod v13;
mod v14;
mod v9;

pub use entry::{
    Call, CallArg, Calls, Constant, StorageEntry, StorageEntryKind, StorageModifier, TypeRef,
};

use crate::codec::primitive::decode_uint;
use crate::codec::{decode_all, hex_to_bytes};
use crate::compiler::RegistryBuilder;
use crate::legacy::{EnumDef, LegacyDef, LegacyTypes, VariantPayload};
use crate::portable::{list, registry_from_value, text, uint};
use crate::{Error, Result};
use core::ops::RangeInclusive;
use entry::{legacy_call, type_id_record};
use fields::{CallsLayout, VersionFields};
use once_cell::sync::Lazy;
use sable_types::{Registry, TypeDef, TypeId};
use sable_values::Value;

/// `"meta"` read as a little-endian `u32`.
pub const MAGIC_NUMBER: u32 = 0x6174_656d;

pub const SUPPORTED_VERSIONS: RangeInclusive<u8> = 9..=14;

const LATEST_VERSION: u8 = 14;

/// The built-in dictionary: every supported version plus the envelope.
pub fn dictionary() -> LegacyTypes {
    let mut types = LegacyTypes::new();
    v9::register(&mut types);
    v10::register(&mut types);
    v11::register(&mut types);
    v12::register(&mut types);
    v13::register(&mut types);
    v14::register(&mut types);

    let versions = (0..=LATEST_VERSION)
        .map(|version| {
            let payload = if SUPPORTED_VERSIONS.contains(&version) {
                VariantPayload::Type(format!("MetadataV{version}"))
            } else {
                VariantPayload::Unit
            };
            (format!("V{version}"), payload)
        })
        .collect();

    types
        .insert("Metadata", LegacyDef::Enum(EnumDef::Tagged(versions)))
        .structure(
            "MetadataPrefixed",
            &[("magic_number", "u32"), ("metadata", "Metadata")],
        );
    types
}

struct Bootstrap {
    registry: Registry,
    prefixed: TypeId,
}

static BOOTSTRAP: Lazy<Result<Bootstrap>> = Lazy::new(|| {
    let types = dictionary();
    let mut builder = RegistryBuilder::new(&types);
    let prefixed = builder.use_type("MetadataPrefixed")?;
    let registry = builder.finish()?;
    tracing::debug!(types = registry.len(), "bootstrapped metadata registry");
    Ok(Bootstrap { registry, prefixed })
});

/// The registry metadata blobs are decoded with, and the id of
/// `MetadataPrefixed` in it. Built on first use.
pub fn bootstrap_registry() -> Result<(&'static Registry, TypeId)> {
    match &*BOOTSTRAP {
        Ok(bootstrap) => Ok((&bootstrap.registry, bootstrap.prefixed)),
        Err(err) => Err(err.clone()),
    }
}

/// Decodes a complete metadata blob.
///
/// The magic number and version byte are checked before the body is read,
/// so unsupported versions fail without touching the rest of the input.
pub fn decode_metadata(bytes: &[u8]) -> Result<Metadata> {
    let (magic, rest) = decode_uint(32, bytes)?;
    let magic = magic as u32;
    if magic != MAGIC_NUMBER {
        return Err(Error::InvalidMagic { found: magic });
    }

    let version = *rest.first().ok_or(Error::NotEnoughBytes {
        needed: 1,
        available: 0,
    })?;
    let fields = fields::for_version(version)
        .ok_or_else(|| Error::not_implemented(format!("metadata v{version}")))?;

    let (registry, prefixed) = bootstrap_registry()?;
    let envelope = decode_all(prefixed, bytes, registry)?;
    Metadata::from_envelope(envelope, fields)
}

/// [`decode_metadata`] on hex input, as returned by `state_getMetadata`.
pub fn decode_metadata_hex(input: &str) -> Result<Metadata> {
    decode_metadata(&hex_to_bytes(input)?)
}

/// Decoded metadata of one supported version.
#[derive(Debug, Clone, PartialEq)]
pub struct Metadata {
    body: Value,
    /// Portable registry carried by v14 metadata.
    registry: Option<Registry>,
    fields: &'static VersionFields,
}

impl Metadata {
    fn from_envelope(envelope: Value, fields: &'static VersionFields) -> Result<Self> {
        let versioned = match envelope {
            Value::Record(entries) => entries
                .into_iter()
                .find(|(name, _)| name == "metadata")
                .map(|(_, value)| value),
            _ => None,
        };
        let body = match versioned {
            Some(Value::Variant { payload, .. }) => *payload,
            _ => return Err(Error::metadata_shape("metadata")),
        };

        let registry = if fields.is_portable() {
            let types = body
                .field("lookup")
                .and_then(|lookup| lookup.field("types"))
                .ok_or_else(|| Error::metadata_shape("lookup.types"))?;
            Some(registry_from_value(types)?)
        } else {
            None
        };

        tracing::debug!(version = fields.version, "decoded metadata");
        Ok(Metadata {
            body,
            registry,
            fields,
        })
    }

    pub fn version(&self) -> u8 {
        self.fields.version
    }

    /// The decoded body of the versioned metadata, without the envelope.
    pub fn value(&self) -> &Value {
        &self.body
    }

    /// The embedded portable registry; `None` before v14.
    pub fn registry(&self) -> Option<&Registry> {
        self.registry.as_ref()
    }

    pub fn pallets(&self) -> Result<Vec<Pallet<'_>>> {
        list(&self.body, self.fields.pallets)?
            .iter()
            .enumerate()
            .map(|(position, value)| self.pallet_at(position, value))
            .collect()
    }

    pub fn pallet(&self, name: &str) -> Result<Option<Pallet<'_>>> {
        Ok(self.pallets()?.into_iter().find(|p| p.name == name))
    }

    /// Finds a pallet by index; before v12 the index is its position.
    pub fn pallet_by_index(&self, index: u8) -> Result<Option<Pallet<'_>>> {
        Ok(self.pallets()?.into_iter().find(|p| p.index == index))
    }

    fn pallet_at<'m>(&'m self, position: usize, value: &'m Value) -> Result<Pallet<'m>> {
        let index = if self.fields.indexed {
            uint(value, "index")?
        } else {
            position as u128
        };
        Ok(Pallet {
            name: text(value, "name")?,
            index: u8::try_from(index).map_err(|_| Error::metadata_shape("index"))?,
            value,
        })
    }

    fn find_pallet(&self, name: &str) -> Result<Option<Pallet<'_>>> {
        let pallet = self.pallet(name)?;
        if pallet.is_none() {
            tracing::trace!(pallet = name, "pallet not found");
        }
        Ok(pallet)
    }

    /// Looks up a storage item by pallet and item name.
    pub fn storage_item(&self, pallet: &str, item: &str) -> Result<Option<StorageEntry>> {
        let Some(pallet) = self.find_pallet(pallet)? else {
            return Ok(None);
        };
        let storage = match pallet.value.field("storage") {
            Some(Value::Null) => return Ok(None),
            Some(storage) => storage,
            None => return Err(Error::metadata_shape("storage")),
        };
        let prefix = text(storage, "prefix")?;
        for entry in list(storage, self.fields.storage_items)? {
            if text(entry, "name")? == item {
                return StorageEntry::from_value(prefix, entry, self.registry.as_ref()).map(Some);
            }
        }
        Ok(None)
    }

    /// Where the calls of `pallet` are described; `None` when it has none.
    pub fn calls_type(&self, pallet: &str) -> Result<Option<Calls<'_>>> {
        let Some(pallet) = self.find_pallet(pallet)? else {
            return Ok(None);
        };
        self.calls_of(&pallet)
    }

    fn calls_of<'m>(&'m self, pallet: &Pallet<'m>) -> Result<Option<Calls<'m>>> {
        let calls = match pallet.value.field("calls") {
            Some(Value::Null) => return Ok(None),
            Some(calls) => calls,
            None => return Err(Error::metadata_shape("calls")),
        };
        let calls = match self.fields.calls {
            CallsLayout::Portable => Calls::Portable(type_id_record(calls)?),
            CallsLayout::Inline => Calls::Legacy(
                calls
                    .as_list()
                    .ok_or_else(|| Error::metadata_shape("calls"))?,
            ),
        };
        Ok(Some(calls))
    }

    /// Looks up a call by pallet and call name.
    ///
    /// Before v12 the pallet byte of a call counts only pallets that have
    /// calls.
    pub fn call(&self, pallet: &str, name: &str) -> Result<Option<Call>> {
        let Some(owner) = self.find_pallet(pallet)? else {
            return Ok(None);
        };
        let Some(calls) = self.calls_of(&owner)? else {
            return Ok(None);
        };

        match calls {
            Calls::Portable(id) => {
                let registry = self
                    .registry
                    .as_ref()
                    .ok_or_else(|| Error::metadata_shape("lookup"))?;
                let variants = match registry.def(id) {
                    Some(def @ TypeDef::Variant(_)) => def,
                    Some(_) => return Err(Error::metadata_shape("calls.type")),
                    None => return Err(Error::TypeNotFound(id)),
                };
                Ok(variants.variant_by_name(name).map(|variant| Call {
                    pallet_index: owner.index,
                    call_index: variant.index,
                    name: variant.name.clone(),
                    args: variant
                        .fields
                        .iter()
                        .map(|field| CallArg {
                            name: field.name.clone(),
                            ty: TypeRef::Id(field.ty),
                        })
                        .collect(),
                }))
            }
            Calls::Legacy(functions) => {
                let pallet_index = if self.fields.indexed {
                    owner.index
                } else {
                    self.legacy_call_index(owner.name)?
                };
                for (position, function) in functions.iter().enumerate() {
                    if text(function, "name")? == name {
                        return legacy_call(pallet_index, position, function).map(Some);
                    }
                }
                Ok(None)
            }
        }
    }

    fn legacy_call_index(&self, pallet: &str) -> Result<u8> {
        let mut index = 0u8;
        for candidate in self.pallets()? {
            if candidate.name == pallet {
                return Ok(index);
            }
            if !matches!(candidate.value.field("calls"), Some(Value::Null) | None) {
                index = index
                    .checked_add(1)
                    .ok_or_else(|| Error::metadata_shape("modules"))?;
            }
        }
        Err(Error::metadata_shape("modules"))
    }

    pub fn constant(&self, pallet: &str, name: &str) -> Result<Option<Constant>> {
        let Some(pallet) = self.find_pallet(pallet)? else {
            return Ok(None);
        };
        for constant in list(pallet.value, "constants")? {
            if text(constant, "name")? == name {
                return Constant::from_value(constant).map(Some);
            }
        }
        Ok(None)
    }
}

/// One pallet (a "module" before v14) in decoded metadata.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pallet<'m> {
    pub name: &'m str,
    pub index: u8,
    pub value: &'m Value,
}

impl<'m> Pallet<'m> {
    /// Storage prefix, when the pallet has storage.
    pub fn storage_prefix(&self) -> Option<&'m str> {
        self.value.field("storage")?.field("prefix")?.as_str()
    }
}

#[cfg(test)]
mod metadata_test;
