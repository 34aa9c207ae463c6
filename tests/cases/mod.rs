#![allow(dead_code, unused_macros)]

use sable::legacy::{LegacyTypes, VariantPayload};
use sable::{Registry, RegistryBuilder, TypeId};

/// Definitions shared by the codec cases.
pub fn dictionary() -> LegacyTypes {
    let mut types = LegacyTypes::new();
    types
        .alias("AccountId", "[u8; 32]")
        .alias("Balance", "u128")
        .alias("BalanceOf", "Balance")
        .structure(
            "Transfer",
            &[("dest", "T::AccountId"), ("amount", "Compact<BalanceOf<T>>")],
        )
        .indexed_enum("Status", &[("Idle", 0), ("Active", 5)])
        .tagged_enum(
            "Event",
            &[
                ("Created", VariantPayload::ty("AccountId")),
                ("Moved", VariantPayload::tuple(&["AccountId", "AccountId"])),
                (
                    "Paid",
                    VariantPayload::fields(&[("who", "AccountId"), ("amount", "Balance")]),
                ),
                ("Reset", VariantPayload::ty("Null")),
            ],
        );
    types
}

/// Compiles `expr` against [`dictionary`].
pub fn compile(expr: &str) -> (Registry, TypeId) {
    let types = dictionary();
    let mut builder = RegistryBuilder::new(&types);
    let id = builder
        .use_type(expr)
        .unwrap_or_else(|e| panic!("failed to compile {expr}: {e}"));
    (builder.finish().unwrap(), id)
}

/// Declares a test that encodes `value` as `ty`, expects `bytes`, and decodes
/// `bytes` back to `value`.
macro_rules! codec_case {
    ($name:ident, ty: $ty:expr, value: $value:expr, bytes: $bytes:expr $(,)?) => {
        #[test]
        fn $name() {
            let (registry, id) = $crate::cases::compile($ty);
            let value: sable::Value = $value;
            let bytes: Vec<u8> = $bytes.to_vec();
            pretty_assertions::assert_eq!(
                sable::encode(id, &value, &registry).unwrap(),
                bytes,
                "encoding {}",
                $ty
            );
            pretty_assertions::assert_eq!(
                sable::decode_all(id, &bytes, &registry).unwrap(),
                value,
                "decoding {}",
                $ty
            );
        }
    };
}
