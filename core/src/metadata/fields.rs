//! Where each metadata version keeps things in its decoded tree.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum CallsLayout {
    /// `Option<Vec<FunctionMetadata>>` with textual argument types.
    Inline,
    /// `Option<{type}>` pointing at a variant in the portable registry.
    Portable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct VersionFields {
    pub version: u8,
    /// Key of the pallet list in the version body.
    pub pallets: &'static str,
    /// Key of the storage item list inside a pallet's storage record.
    pub storage_items: &'static str,
    /// Pallets carry an explicit `index`; otherwise the index is the position.
    pub indexed: bool,
    pub calls: CallsLayout,
}

impl VersionFields {
    pub fn is_portable(&self) -> bool {
        self.calls == CallsLayout::Portable
    }
}

const fn legacy(version: u8, indexed: bool) -> VersionFields {
    VersionFields {
        version,
        pallets: "modules",
        storage_items: "items",
        indexed,
        calls: CallsLayout::Inline,
    }
}

static TABLE: [VersionFields; 6] = [
    legacy(9, false),
    legacy(10, false),
    legacy(11, false),
    legacy(12, true),
    legacy(13, true),
    VersionFields {
        version: 14,
        pallets: "pallets",
        storage_items: "items",
        indexed: true,
        calls: CallsLayout::Portable,
    },
];

/// Layout for a supported version, `None` otherwise.
pub(super) fn for_version(version: u8) -> Option<&'static VersionFields> {
    TABLE.iter().find(|fields| fields.version == version)
}
