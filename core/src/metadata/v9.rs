use crate::legacy::{LegacyTypes, VariantPayload};

pub(super) fn register(types: &mut LegacyTypes) {
    types
        .alias("Type", "Text")
        .structure("MetadataV9", &[("modules", "Vec<ModuleMetadataV9>")])
        .structure(
            "ModuleMetadataV9",
            &[
                ("name", "Text"),
                ("storage", "Option<StorageMetadataV9>"),
                ("calls", "Option<Vec<FunctionMetadataV9>>"),
                ("events", "Option<Vec<EventMetadataV9>>"),
                ("constants", "Vec<ModuleConstantMetadataV9>"),
                ("errors", "Vec<ErrorMetadataV9>"),
            ],
        )
        .structure(
            "StorageMetadataV9",
            &[("prefix", "Text"), ("items", "Vec<StorageEntryMetadataV9>")],
        )
        .structure(
            "StorageEntryMetadataV9",
            &[
                ("name", "Text"),
                ("modifier", "StorageEntryModifierV9"),
                ("type", "StorageEntryTypeV9"),
                ("fallback", "Bytes"),
                ("docs", "Vec<Text>"),
            ],
        )
        .simple_enum("StorageEntryModifierV9", &["Optional", "Default", "Required"])
        .simple_enum(
            "StorageHasherV9",
            &["Blake2_128", "Blake2_256", "Twox128", "Twox256", "Twox64Concat"],
        )
        .tagged_enum(
            "StorageEntryTypeV9",
            &[
                ("Plain", VariantPayload::ty("Type")),
                (
                    "Map",
                    VariantPayload::fields(&[
                        ("hasher", "StorageHasherV9"),
                        ("key", "Type"),
                        ("value", "Type"),
                        ("linked", "bool"),
                    ]),
                ),
                (
                    "DoubleMap",
                    VariantPayload::fields(&[
                        ("hasher", "StorageHasherV9"),
                        ("key1", "Type"),
                        ("key2", "Type"),
                        ("value", "Type"),
                        ("key2_hasher", "StorageHasherV9"),
                    ]),
                ),
            ],
        )
        .structure(
            "FunctionMetadataV9",
            &[
                ("name", "Text"),
                ("args", "Vec<FunctionArgumentMetadataV9>"),
                ("docs", "Vec<Text>"),
            ],
        )
        .structure("FunctionArgumentMetadataV9", &[("name", "Text"), ("type", "Type")])
        .structure(
            "EventMetadataV9",
            &[("name", "Text"), ("args", "Vec<Type>"), ("docs", "Vec<Text>")],
        )
        .structure(
            "ModuleConstantMetadataV9",
            &[
                ("name", "Text"),
                ("type", "Type"),
                ("value", "Bytes"),
                ("docs", "Vec<Text>"),
            ],
        )
        .structure("ErrorMetadataV9", &[("name", "Text"), ("docs", "Vec<Text>")]);
}
