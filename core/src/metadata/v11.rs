use crate::legacy::{LegacyTypes, VariantPayload};

/// Adds the `Identity` hasher and extrinsic metadata.
pub(super) fn register(types: &mut LegacyTypes) {
    types
        .structure(
            "MetadataV11",
            &[
                ("modules", "Vec<ModuleMetadataV11>"),
                ("extrinsic", "ExtrinsicMetadataV11"),
            ],
        )
        .structure(
            "ExtrinsicMetadataV11",
            &[("version", "u8"), ("signed_extensions", "Vec<Text>")],
        )
        .structure(
            "ModuleMetadataV11",
            &[
                ("name", "Text"),
                ("storage", "Option<StorageMetadataV11>"),
                ("calls", "Option<Vec<FunctionMetadataV11>>"),
                ("events", "Option<Vec<EventMetadataV11>>"),
                ("constants", "Vec<ModuleConstantMetadataV11>"),
                ("errors", "Vec<ErrorMetadataV11>"),
            ],
        )
        .alias("FunctionMetadataV11", "FunctionMetadataV10")
        .alias("EventMetadataV11", "EventMetadataV10")
        .alias("ModuleConstantMetadataV11", "ModuleConstantMetadataV10")
        .alias("ErrorMetadataV11", "ErrorMetadataV10")
        .alias("StorageEntryModifierV11", "StorageEntryModifierV10")
        .structure(
            "StorageMetadataV11",
            &[("prefix", "Text"), ("items", "Vec<StorageEntryMetadataV11>")],
        )
        .structure(
            "StorageEntryMetadataV11",
            &[
                ("name", "Text"),
                ("modifier", "StorageEntryModifierV11"),
                ("type", "StorageEntryTypeV11"),
                ("fallback", "Bytes"),
                ("docs", "Vec<Text>"),
            ],
        )
        .simple_enum(
            "StorageHasherV11",
            &[
                "Blake2_128",
                "Blake2_256",
                "Blake2_128Concat",
                "Twox128",
                "Twox256",
                "Twox64Concat",
                "Identity",
            ],
        )
        .tagged_enum(
            "StorageEntryTypeV11",
            &[
                ("Plain", VariantPayload::ty("Type")),
                (
                    "Map",
                    VariantPayload::fields(&[
                        ("hasher", "StorageHasherV11"),
                        ("key", "Type"),
                        ("value", "Type"),
                        ("linked", "bool"),
                    ]),
                ),
                (
                    "DoubleMap",
                    VariantPayload::fields(&[
                        ("hasher", "StorageHasherV11"),
                        ("key1", "Type"),
                        ("key2", "Type"),
                        ("value", "Type"),
                        ("key2_hasher", "StorageHasherV11"),
                    ]),
                ),
            ],
        );
}
