//! Name-to-definition dictionaries for legacy type expressions.
//!
//! Runtimes before the portable registry shipped their type information as
//! a dictionary keyed by type name. Each entry is one of three explicit
//! shapes: an alias to another expression, a struct, or an enum.

mod json;

use hashbrown::HashMap;

/// One dictionary entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LegacyDef {
    /// Another type expression, e.g. `"Balance": "u128"`.
    Alias(String),
    /// Named fields with their type expressions, in wire order.
    Struct(Vec<(String, String)>),
    Enum(EnumDef),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumDef {
    /// Payload-less variants with their tag bytes.
    Simple(Vec<(String, u8)>),
    /// Variants tagged by position, each with a payload.
    Tagged(Vec<(String, VariantPayload)>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariantPayload {
    Unit,
    Type(String),
    Tuple(Vec<String>),
    Struct(Vec<(String, String)>),
}

impl VariantPayload {
    /// A single-type payload. `Null` means no payload.
    pub fn ty(expr: &str) -> Self {
        if expr == "Null" {
            VariantPayload::Unit
        } else {
            VariantPayload::Type(expr.to_string())
        }
    }

    pub fn tuple(exprs: &[&str]) -> Self {
        VariantPayload::Tuple(exprs.iter().map(|e| e.to_string()).collect())
    }

    pub fn fields(fields: &[(&str, &str)]) -> Self {
        VariantPayload::Struct(owned_pairs(fields))
    }
}

/// A legacy type dictionary.
///
/// # Example
///
/// ```
/// use sable_core::legacy::{LegacyTypes, VariantPayload};
///
/// let mut types = LegacyTypes::new();
/// types
///     .alias("Balance", "u128")
///     .structure("AccountData", &[("free", "Balance"), ("reserved", "Balance")])
///     .simple_enum("Status", &["Free", "Reserved"])
///     .tagged_enum(
///         "Call",
///         &[("Remark", VariantPayload::ty("Vec<u8>")), ("Noop", VariantPayload::Unit)],
///     );
/// assert_eq!(types.len(), 4);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LegacyTypes {
    defs: HashMap<String, LegacyDef>,
}

impl LegacyTypes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&LegacyDef> {
        self.defs.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.defs.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    /// Adds or replaces an entry.
    pub fn insert(&mut self, name: impl Into<String>, def: LegacyDef) -> &mut Self {
        self.defs.insert(name.into(), def);
        self
    }

    /// Overlays `other` on this dictionary; its entries win on conflict.
    pub fn merge(&mut self, other: LegacyTypes) -> &mut Self {
        self.defs.extend(other.defs);
        self
    }

    // ========================================================================
    // Builders
    // ========================================================================

    pub fn alias(&mut self, name: &str, target: &str) -> &mut Self {
        self.insert(name, LegacyDef::Alias(target.to_string()))
    }

    pub fn structure(&mut self, name: &str, fields: &[(&str, &str)]) -> &mut Self {
        self.insert(name, LegacyDef::Struct(owned_pairs(fields)))
    }

    /// Payload-less enum tagged by position.
    pub fn simple_enum(&mut self, name: &str, variants: &[&str]) -> &mut Self {
        let variants = variants
            .iter()
            .enumerate()
            .map(|(index, name)| (name.to_string(), index as u8))
            .collect();
        self.insert(name, LegacyDef::Enum(EnumDef::Simple(variants)))
    }

    /// Payload-less enum with explicit tag bytes.
    pub fn indexed_enum(&mut self, name: &str, variants: &[(&str, u8)]) -> &mut Self {
        let variants = variants
            .iter()
            .map(|(name, index)| (name.to_string(), *index))
            .collect();
        self.insert(name, LegacyDef::Enum(EnumDef::Simple(variants)))
    }

    /// Enum with payloads, tagged by position.
    pub fn tagged_enum(&mut self, name: &str, variants: &[(&str, VariantPayload)]) -> &mut Self {
        let variants = variants
            .iter()
            .map(|(name, payload)| (name.to_string(), payload.clone()))
            .collect();
        self.insert(name, LegacyDef::Enum(EnumDef::Tagged(variants)))
    }
}

fn owned_pairs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(a, b)| (a.to_string(), b.to_string()))
        .collect()
}
