use crate::legacy::{LegacyTypes, VariantPayload};

/// Adds N-key maps to storage.
pub(super) fn register(types: &mut LegacyTypes) {
    types
        .structure(
            "MetadataV13",
            &[
                ("modules", "Vec<ModuleMetadataV13>"),
                ("extrinsic", "ExtrinsicMetadataV13"),
            ],
        )
        .alias("ExtrinsicMetadataV13", "ExtrinsicMetadataV12")
        .structure(
            "ModuleMetadataV13",
            &[
                ("name", "Text"),
                ("storage", "Option<StorageMetadataV13>"),
                ("calls", "Option<Vec<FunctionMetadataV13>>"),
                ("events", "Option<Vec<EventMetadataV13>>"),
                ("constants", "Vec<ModuleConstantMetadataV13>"),
                ("errors", "Vec<ErrorMetadataV13>"),
                ("index", "u8"),
            ],
        )
        .alias("FunctionMetadataV13", "FunctionMetadataV12")
        .alias("EventMetadataV13", "EventMetadataV12")
        .alias("ModuleConstantMetadataV13", "ModuleConstantMetadataV12")
        .alias("ErrorMetadataV13", "ErrorMetadataV12")
        .alias("StorageEntryModifierV13", "StorageEntryModifierV11")
        .alias("StorageHasherV13", "StorageHasherV12")
        .structure(
            "StorageMetadataV13",
            &[("prefix", "Text"), ("items", "Vec<StorageEntryMetadataV13>")],
        )
        .structure(
            "StorageEntryMetadataV13",
            &[
                ("name", "Text"),
                ("modifier", "StorageEntryModifierV13"),
                ("type", "StorageEntryTypeV13"),
                ("fallback", "Bytes"),
                ("docs", "Vec<Text>"),
            ],
        )
        .tagged_enum(
            "StorageEntryTypeV13",
            &[
                ("Plain", VariantPayload::ty("Type")),
                (
                    "Map",
                    VariantPayload::fields(&[
                        ("hasher", "StorageHasherV13"),
                        ("key", "Type"),
                        ("value", "Type"),
                        ("linked", "bool"),
                    ]),
                ),
                (
                    "DoubleMap",
                    VariantPayload::fields(&[
                        ("hasher", "StorageHasherV13"),
                        ("key1", "Type"),
                        ("key2", "Type"),
                        ("value", "Type"),
                        ("key2_hasher", "StorageHasherV13"),
                    ]),
                ),
                (
                    "NMap",
                    VariantPayload::fields(&[
                        ("keys", "Vec<Type>"),
                        ("hashers", "Vec<StorageHasherV13>"),
                        ("value", "Type"),
                    ]),
                ),
            ],
        );
}
