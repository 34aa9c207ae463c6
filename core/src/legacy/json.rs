//! Loading dictionaries from the JSON type-definition format.
//!
//! ```json
//! {
//!   "Balance": "u128",
//!   "AccountData": { "free": "Balance", "reserved": "Balance" },
//!   "Status": { "_enum": ["Free", "Reserved"] },
//!   "Call": { "_enum": { "Remark": "Vec<u8>", "Noop": "Null" } }
//! }
//! ```

use super::{EnumDef, LegacyDef, LegacyTypes, VariantPayload};
use crate::{Error, Result};
use serde::Deserialize;
use serde_json::{Map, Value as Json};

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonDef {
    Alias(String),
    Enum(JsonEnum),
    Set(JsonSet),
    Struct(Map<String, Json>),
}

#[derive(Deserialize)]
struct JsonEnum {
    #[serde(rename = "_enum")]
    variants: JsonVariants,
}

#[derive(Deserialize)]
struct JsonSet {
    #[serde(rename = "_set")]
    #[allow(dead_code)]
    flags: Json,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonVariants {
    Names(Vec<String>),
    Map(Map<String, Json>),
}

impl LegacyTypes {
    /// Parses a JSON object of type definitions.
    ///
    /// Bit-flag sets (`_set`) and field renames (`_alias`) have no wire
    /// meaning here and are skipped with a warning.
    pub fn from_json(source: &str) -> Result<Self> {
        let json: Json = serde_json::from_str(source).map_err(|err| Error::InvalidDictionary {
            name: "<json>".to_string(),
            reason: err.to_string(),
        })?;
        Self::from_json_value(json)
    }

    pub fn from_json_value(json: Json) -> Result<Self> {
        let Json::Object(entries) = json else {
            return Err(Error::InvalidDictionary {
                name: "<json>".to_string(),
                reason: "expected an object of type definitions".to_string(),
            });
        };

        let mut types = LegacyTypes::new();
        for (name, entry) in entries {
            let def: JsonDef = serde_json::from_value(entry).map_err(|err| invalid(&name, err))?;
            if let Some(def) = convert(&name, def)? {
                types.insert(name, def);
            }
        }
        tracing::debug!(entries = types.len(), "loaded legacy type dictionary");
        Ok(types)
    }
}

fn convert(name: &str, def: JsonDef) -> Result<Option<LegacyDef>> {
    let def = match def {
        JsonDef::Alias(target) => LegacyDef::Alias(target),
        JsonDef::Set(_) => {
            tracing::warn!(name, "skipping `_set` definition");
            return Ok(None);
        }
        JsonDef::Enum(JsonEnum {
            variants: JsonVariants::Names(names),
        }) => {
            if names.len() > 256 {
                return Err(invalid(name, "more than 256 variants"));
            }
            LegacyDef::Enum(EnumDef::Simple(
                names
                    .into_iter()
                    .enumerate()
                    .map(|(index, variant)| (variant, index as u8))
                    .collect(),
            ))
        }
        JsonDef::Enum(JsonEnum {
            variants: JsonVariants::Map(variants),
        }) => convert_enum_map(name, variants)?,
        JsonDef::Struct(fields) => {
            let mut pairs = Vec::with_capacity(fields.len());
            for (field, ty) in fields {
                if field == "_alias" {
                    tracing::warn!(name, "ignoring `_alias` field renames");
                    continue;
                }
                let Json::String(ty) = ty else {
                    return Err(invalid(name, format!("field `{field}` is not a type expression")));
                };
                pairs.push((field, ty));
            }
            LegacyDef::Struct(pairs)
        }
    };
    Ok(Some(def))
}

/// `{"A": 0, "B": 5}` is a simple enum with explicit tags; any other map
/// gives each variant a payload.
fn convert_enum_map(name: &str, variants: Map<String, Json>) -> Result<LegacyDef> {
    if variants.len() > 256 {
        return Err(invalid(name, "more than 256 variants"));
    }

    if !variants.is_empty() && variants.values().all(Json::is_u64) {
        let mut simple = Vec::with_capacity(variants.len());
        for (variant, index) in variants {
            let index = index
                .as_u64()
                .and_then(|i| u8::try_from(i).ok())
                .ok_or_else(|| invalid(name, format!("index of `{variant}` exceeds 255")))?;
            simple.push((variant, index));
        }
        return Ok(LegacyDef::Enum(EnumDef::Simple(simple)));
    }

    let mut tagged = Vec::with_capacity(variants.len());
    for (variant, payload) in variants {
        let payload = match payload {
            Json::Null => VariantPayload::Unit,
            Json::String(ty) => VariantPayload::ty(&ty),
            Json::Array(items) => VariantPayload::Tuple(
                items
                    .into_iter()
                    .map(|item| match item {
                        Json::String(ty) => Ok(ty),
                        _ => Err(invalid(name, format!("`{variant}` has a non-string tuple item"))),
                    })
                    .collect::<Result<_>>()?,
            ),
            Json::Object(fields) => VariantPayload::Struct(
                fields
                    .into_iter()
                    .map(|(field, ty)| match ty {
                        Json::String(ty) => Ok((field, ty)),
                        _ => Err(invalid(name, format!("`{variant}.{field}` is not a type expression"))),
                    })
                    .collect::<Result<_>>()?,
            ),
            _ => return Err(invalid(name, format!("`{variant}` has an unsupported payload"))),
        };
        tagged.push((variant, payload));
    }
    Ok(LegacyDef::Enum(EnumDef::Tagged(tagged)))
}

fn invalid(name: &str, reason: impl ToString) -> Error {
    Error::InvalidDictionary {
        name: name.to_string(),
        reason: reason.to_string(),
    }
}
