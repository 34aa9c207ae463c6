use crate::legacy::LegacyTypes;

/// Modules gain an explicit call index; storage is unchanged.
pub(super) fn register(types: &mut LegacyTypes) {
    types
        .structure(
            "MetadataV12",
            &[
                ("modules", "Vec<ModuleMetadataV12>"),
                ("extrinsic", "ExtrinsicMetadataV12"),
            ],
        )
        .alias("ExtrinsicMetadataV12", "ExtrinsicMetadataV11")
        .structure(
            "ModuleMetadataV12",
            &[
                ("name", "Text"),
                ("storage", "Option<StorageMetadataV12>"),
                ("calls", "Option<Vec<FunctionMetadataV12>>"),
                ("events", "Option<Vec<EventMetadataV12>>"),
                ("constants", "Vec<ModuleConstantMetadataV12>"),
                ("errors", "Vec<ErrorMetadataV12>"),
                ("index", "u8"),
            ],
        )
        .alias("FunctionMetadataV12", "FunctionMetadataV11")
        .alias("EventMetadataV12", "EventMetadataV11")
        .alias("ModuleConstantMetadataV12", "ModuleConstantMetadataV11")
        .alias("ErrorMetadataV12", "ErrorMetadataV11")
        .alias("StorageMetadataV12", "StorageMetadataV11")
        .alias("StorageHasherV12", "StorageHasherV11");
}
