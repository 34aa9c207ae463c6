use crate::legacy::{LegacyTypes, VariantPayload};

/// Replaces textual types with ids into an embedded portable registry.
pub(super) fn register(types: &mut LegacyTypes) {
    register_registry(types);

    types
        .structure(
            "MetadataV14",
            &[
                ("lookup", "PortableRegistryV14"),
                ("pallets", "Vec<PalletMetadataV14>"),
                ("extrinsic", "ExtrinsicMetadataV14"),
                ("type", "Si1LookupTypeId"),
            ],
        )
        .structure(
            "PalletMetadataV14",
            &[
                ("name", "Text"),
                ("storage", "Option<PalletStorageMetadataV14>"),
                ("calls", "Option<PalletCallMetadataV14>"),
                ("events", "Option<PalletEventMetadataV14>"),
                ("constants", "Vec<PalletConstantMetadataV14>"),
                ("errors", "Option<PalletErrorMetadataV14>"),
                ("index", "u8"),
            ],
        )
        .structure(
            "PalletStorageMetadataV14",
            &[("prefix", "Text"), ("items", "Vec<StorageEntryMetadataV14>")],
        )
        .structure(
            "StorageEntryMetadataV14",
            &[
                ("name", "Text"),
                ("modifier", "StorageEntryModifierV14"),
                ("type", "StorageEntryTypeV14"),
                ("fallback", "Bytes"),
                ("docs", "Vec<Text>"),
            ],
        )
        .alias("StorageEntryModifierV14", "StorageEntryModifierV13")
        .alias("StorageHasherV14", "StorageHasherV13")
        .tagged_enum(
            "StorageEntryTypeV14",
            &[
                ("Plain", VariantPayload::ty("Si1LookupTypeId")),
                (
                    "Map",
                    VariantPayload::fields(&[
                        ("hashers", "Vec<StorageHasherV14>"),
                        ("key", "Si1LookupTypeId"),
                        ("value", "Si1LookupTypeId"),
                    ]),
                ),
            ],
        )
        .structure("PalletCallMetadataV14", &[("type", "Si1LookupTypeId")])
        .alias("PalletEventMetadataV14", "PalletCallMetadataV14")
        .alias("PalletErrorMetadataV14", "PalletCallMetadataV14")
        .structure(
            "PalletConstantMetadataV14",
            &[
                ("name", "Text"),
                ("type", "Si1LookupTypeId"),
                ("value", "Bytes"),
                ("docs", "Vec<Text>"),
            ],
        )
        .structure(
            "ExtrinsicMetadataV14",
            &[
                ("type", "Si1LookupTypeId"),
                ("version", "u8"),
                ("signed_extensions", "Vec<SignedExtensionMetadataV14>"),
            ],
        )
        .structure(
            "SignedExtensionMetadataV14",
            &[
                ("identifier", "Text"),
                ("type", "Si1LookupTypeId"),
                ("additional_signed", "Si1LookupTypeId"),
            ],
        );
}

/// The embedded registry: `{id, type}` entries whose ids equal their
/// position.
fn register_registry(types: &mut LegacyTypes) {
    types
        .alias("Si1LookupTypeId", "Compact<u32>")
        .structure("PortableRegistryV14", &[("types", "Vec<PortableTypeV14>")])
        .structure(
            "PortableTypeV14",
            &[("id", "Si1LookupTypeId"), ("type", "Si1Type")],
        )
        .structure(
            "Si1Type",
            &[
                ("path", "Vec<Text>"),
                ("params", "Vec<Si1TypeParameter>"),
                ("def", "Si1TypeDef"),
                ("docs", "Vec<Text>"),
            ],
        )
        .structure(
            "Si1TypeParameter",
            &[("name", "Text"), ("type", "Option<Si1LookupTypeId>")],
        )
        .tagged_enum(
            "Si1TypeDef",
            &[
                ("Composite", VariantPayload::ty("Si1TypeDefComposite")),
                ("Variant", VariantPayload::ty("Si1TypeDefVariant")),
                ("Sequence", VariantPayload::ty("Si1TypeDefSequence")),
                ("Array", VariantPayload::ty("Si1TypeDefArray")),
                ("Tuple", VariantPayload::ty("Si1TypeDefTuple")),
                ("Primitive", VariantPayload::ty("Si1TypeDefPrimitive")),
                ("Compact", VariantPayload::ty("Si1TypeDefCompact")),
                ("BitSequence", VariantPayload::ty("Si1TypeDefBitSequence")),
            ],
        )
        .structure("Si1TypeDefComposite", &[("fields", "Vec<Si1Field>")])
        .structure(
            "Si1Field",
            &[
                ("name", "Option<Text>"),
                ("type", "Si1LookupTypeId"),
                ("type_name", "Option<Text>"),
                ("docs", "Vec<Text>"),
            ],
        )
        .structure("Si1TypeDefVariant", &[("variants", "Vec<Si1Variant>")])
        .structure(
            "Si1Variant",
            &[
                ("name", "Text"),
                ("fields", "Vec<Si1Field>"),
                ("index", "u8"),
                ("docs", "Vec<Text>"),
            ],
        )
        .structure("Si1TypeDefSequence", &[("type", "Si1LookupTypeId")])
        .structure(
            "Si1TypeDefArray",
            &[("len", "u32"), ("type", "Si1LookupTypeId")],
        )
        .alias("Si1TypeDefTuple", "Vec<Si1LookupTypeId>")
        .simple_enum(
            "Si1TypeDefPrimitive",
            &[
                "Bool", "Char", "Str", "U8", "U16", "U32", "U64", "U128", "U256", "I8", "I16",
                "I32", "I64", "I128", "I256",
            ],
        )
        .structure("Si1TypeDefCompact", &[("type", "Si1LookupTypeId")])
        .structure(
            "Si1TypeDefBitSequence",
            &[
                ("bit_store_type", "Si1LookupTypeId"),
                ("bit_order_type", "Si1LookupTypeId"),
            ],
        );
}
