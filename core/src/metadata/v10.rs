use crate::legacy::{LegacyTypes, VariantPayload};

/// Adds `Blake2_128Concat` to the hashers; everything else carries over.
pub(super) fn register(types: &mut LegacyTypes) {
    types
        .structure("MetadataV10", &[("modules", "Vec<ModuleMetadataV10>")])
        .structure(
            "ModuleMetadataV10",
            &[
                ("name", "Text"),
                ("storage", "Option<StorageMetadataV10>"),
                ("calls", "Option<Vec<FunctionMetadataV10>>"),
                ("events", "Option<Vec<EventMetadataV10>>"),
                ("constants", "Vec<ModuleConstantMetadataV10>"),
                ("errors", "Vec<ErrorMetadataV10>"),
            ],
        )
        .alias("FunctionMetadataV10", "FunctionMetadataV9")
        .alias("EventMetadataV10", "EventMetadataV9")
        .alias("ModuleConstantMetadataV10", "ModuleConstantMetadataV9")
        .alias("ErrorMetadataV10", "ErrorMetadataV9")
        .alias("StorageEntryModifierV10", "StorageEntryModifierV9")
        .structure(
            "StorageMetadataV10",
            &[("prefix", "Text"), ("items", "Vec<StorageEntryMetadataV10>")],
        )
        .structure(
            "StorageEntryMetadataV10",
            &[
                ("name", "Text"),
                ("modifier", "StorageEntryModifierV10"),
                ("type", "StorageEntryTypeV10"),
                ("fallback", "Bytes"),
                ("docs", "Vec<Text>"),
            ],
        )
        .simple_enum(
            "StorageHasherV10",
            &[
                "Blake2_128",
                "Blake2_256",
                "Blake2_128Concat",
                "Twox128",
                "Twox256",
                "Twox64Concat",
            ],
        )
        .tagged_enum(
            "StorageEntryTypeV10",
            &[
                ("Plain", VariantPayload::ty("Type")),
                (
                    "Map",
                    VariantPayload::fields(&[
                        ("hasher", "StorageHasherV10"),
                        ("key", "Type"),
                        ("value", "Type"),
                        ("linked", "bool"),
                    ]),
                ),
                (
                    "DoubleMap",
                    VariantPayload::fields(&[
                        ("hasher", "StorageHasherV10"),
                        ("key1", "Type"),
                        ("key2", "Type"),
                        ("value", "Type"),
                        ("key2_hasher", "StorageHasherV10"),
                    ]),
                ),
            ],
        );
}
