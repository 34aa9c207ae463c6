use super::*;
use crate::codec::encode;
use crate::storage::HasherKind;
use pretty_assertions::assert_eq;

// ============================================================================
// Blob builders
// ============================================================================

fn texts(items: &[&str]) -> Value {
    Value::list(items.iter().map(|s| Value::str(*s)))
}

fn envelope(version: &str, body: Value) -> Vec<u8> {
    let (registry, prefixed) = bootstrap_registry().unwrap();
    let value = Value::record([
        ("magic_number", Value::UInt(MAGIC_NUMBER.into())),
        ("metadata", Value::variant(version, body)),
    ]);
    encode(prefixed, &value, registry).unwrap()
}

fn storage_entry(name: &str, modifier: &str, ty: Value, fallback: Vec<u8>) -> Value {
    Value::record([
        ("name", Value::str(name)),
        ("modifier", Value::symbol(modifier)),
        ("type", ty),
        ("fallback", Value::Bytes(fallback)),
        ("docs", texts(&[])),
    ])
}

fn storage(prefix: &str, items: Vec<Value>) -> Value {
    Value::record([("prefix", Value::str(prefix)), ("items", Value::List(items))])
}

fn constant(name: &str, ty: Value, value: Vec<u8>) -> Value {
    Value::record([
        ("name", Value::str(name)),
        ("type", ty),
        ("value", Value::Bytes(value)),
        ("docs", texts(&["The minimum balance."])),
    ])
}

// v14

fn portable(id: u32, path: &[&str], def: Value) -> Value {
    Value::record([
        ("id", Value::UInt(id.into())),
        (
            "type",
            Value::record([
                ("path", texts(path)),
                ("params", Value::list([])),
                ("def", def),
                ("docs", texts(&[])),
            ]),
        ),
    ])
}

fn primitive(name: &str) -> Value {
    Value::variant("Primitive", Value::symbol(name))
}

fn si_field(name: Option<&str>, ty: u32) -> Value {
    Value::record([
        ("name", name.map(Value::str).unwrap_or(Value::Null)),
        ("type", Value::UInt(ty.into())),
        ("type_name", Value::Null),
        ("docs", texts(&[])),
    ])
}

fn si_variant(name: &str, index: u8, fields: Vec<Value>) -> Value {
    Value::record([
        ("name", Value::str(name)),
        ("fields", Value::List(fields)),
        ("index", Value::UInt(index.into())),
        ("docs", texts(&[])),
    ])
}

fn v14_types() -> Value {
    Value::list([
        portable(0, &[], primitive("U32")),
        portable(1, &[], primitive("U8")),
        portable(
            2,
            &[],
            Value::variant(
                "Array",
                Value::record([("len", Value::UInt(32)), ("type", Value::UInt(1))]),
            ),
        ),
        portable(
            3,
            &["sp_core", "crypto", "AccountId32"],
            Value::variant(
                "Composite",
                Value::record([("fields", Value::list([si_field(None, 2)]))]),
            ),
        ),
        portable(4, &[], primitive("U128")),
        portable(
            5,
            &[],
            Value::variant("Compact", Value::record([("type", Value::UInt(4))])),
        ),
        portable(
            6,
            &[],
            Value::variant("Sequence", Value::record([("type", Value::UInt(1))])),
        ),
        portable(
            7,
            &["pallet_balances", "pallet", "Call"],
            Value::variant(
                "Variant",
                Value::record([(
                    "variants",
                    Value::list([
                        si_variant(
                            "transfer",
                            7,
                            vec![si_field(Some("dest"), 3), si_field(Some("value"), 5)],
                        ),
                        si_variant("remark", 1, vec![si_field(Some("remark"), 6)]),
                    ]),
                )]),
            ),
        ),
        portable(
            8,
            &[],
            Value::variant("Tuple", Value::list([Value::UInt(0), Value::UInt(3)])),
        ),
    ])
}

fn v14_pallet(name: &str, index: u8, storage: Value, calls: Value, constants: Vec<Value>) -> Value {
    Value::record([
        ("name", Value::str(name)),
        ("storage", storage),
        ("calls", calls),
        ("events", Value::Null),
        ("constants", Value::List(constants)),
        ("errors", Value::Null),
        ("index", Value::UInt(index.into())),
    ])
}

fn v14_blob() -> Vec<u8> {
    let system = v14_pallet(
        "System",
        0,
        storage(
            "System",
            vec![
                storage_entry(
                    "EventCount",
                    "Default",
                    Value::variant("Plain", Value::UInt(0)),
                    vec![0; 4],
                ),
                storage_entry(
                    "Account",
                    "Default",
                    Value::variant(
                        "Map",
                        Value::record([
                            ("hashers", Value::list([Value::symbol("Blake2_128Concat")])),
                            ("key", Value::UInt(3)),
                            ("value", Value::UInt(4)),
                        ]),
                    ),
                    vec![0; 16],
                ),
                storage_entry(
                    "Pairs",
                    "Optional",
                    Value::variant(
                        "Map",
                        Value::record([
                            (
                                "hashers",
                                Value::list([
                                    Value::symbol("Twox64Concat"),
                                    Value::symbol("Identity"),
                                ]),
                            ),
                            ("key", Value::UInt(8)),
                            ("value", Value::UInt(0)),
                        ]),
                    ),
                    vec![],
                ),
            ],
        ),
        Value::Null,
        vec![],
    );
    let balances = v14_pallet(
        "Balances",
        5,
        Value::Null,
        Value::record([("type", Value::UInt(7))]),
        vec![constant(
            "ExistentialDeposit",
            Value::UInt(4),
            500u128.to_le_bytes().to_vec(),
        )],
    );

    let body = Value::record([
        ("lookup", Value::record([("types", v14_types())])),
        ("pallets", Value::list([system, balances])),
        (
            "extrinsic",
            Value::record([
                ("type", Value::UInt(0)),
                ("version", Value::UInt(4)),
                (
                    "signed_extensions",
                    Value::list([Value::record([
                        ("identifier", Value::str("CheckNonce")),
                        ("type", Value::UInt(0)),
                        ("additional_signed", Value::UInt(0)),
                    ])]),
                ),
            ]),
        ),
        ("type", Value::UInt(0)),
    ]);
    envelope("V14", body)
}

// v9..v13

fn function(name: &str, args: &[(&str, &str)]) -> Value {
    Value::record([
        ("name", Value::str(name)),
        (
            "args",
            Value::list(args.iter().map(|(name, ty)| {
                Value::record([("name", Value::str(*name)), ("type", Value::str(*ty))])
            })),
        ),
        ("docs", texts(&[])),
    ])
}

fn module(
    name: &str,
    index: Option<u8>,
    storage: Value,
    calls: Option<Vec<Value>>,
    constants: Vec<Value>,
) -> Value {
    let mut fields = vec![
        ("name", Value::str(name)),
        ("storage", storage),
        ("calls", calls.map(Value::List).unwrap_or(Value::Null)),
        ("events", Value::Null),
        ("constants", Value::List(constants)),
        ("errors", Value::list([])),
    ];
    if let Some(index) = index {
        fields.push(("index", Value::UInt(index.into())));
    }
    Value::record(fields)
}

fn legacy_extrinsic() -> Value {
    Value::record([
        ("version", Value::UInt(4)),
        ("signed_extensions", texts(&["CheckNonce"])),
    ])
}

fn v13_blob() -> Vec<u8> {
    let system = module(
        "System",
        Some(0),
        storage(
            "System",
            vec![
                storage_entry(
                    "EventCount",
                    "Default",
                    Value::variant("Plain", Value::str("EventIndex")),
                    vec![0; 4],
                ),
                storage_entry(
                    "EventTopics",
                    "Default",
                    Value::variant(
                        "Map",
                        Value::record([
                            ("hasher", Value::symbol("Blake2_128Concat")),
                            ("key", Value::str("T::Hash")),
                            ("value", Value::str("Vec<(T::BlockNumber, EventIndex)>")),
                            ("linked", Value::Bool(false)),
                        ]),
                    ),
                    vec![0],
                ),
            ],
        ),
        None,
        vec![],
    );
    let balances = module(
        "Balances",
        Some(4),
        storage(
            "Balances",
            vec![
                storage_entry(
                    "Locks",
                    "Default",
                    Value::variant(
                        "DoubleMap",
                        Value::record([
                            ("hasher", Value::symbol("Twox64Concat")),
                            ("key1", Value::str("T::AccountId")),
                            ("key2", Value::str("LockIdentifier")),
                            ("value", Value::str("BalanceLock<T::Balance>")),
                            ("key2_hasher", Value::symbol("Identity")),
                        ]),
                    ),
                    vec![0],
                ),
                storage_entry(
                    "Reserves",
                    "Optional",
                    Value::variant(
                        "NMap",
                        Value::record([
                            ("keys", texts(&["T::AccountId", "ReserveIdentifier", "u32"])),
                            (
                                "hashers",
                                Value::list([
                                    Value::symbol("Blake2_128Concat"),
                                    Value::symbol("Twox64Concat"),
                                    Value::symbol("Identity"),
                                ]),
                            ),
                            ("value", Value::str("T::Balance")),
                        ]),
                    ),
                    vec![],
                ),
            ],
        ),
        Some(vec![
            function(
                "transfer",
                &[
                    ("dest", "<T::Lookup as StaticLookup>::Source"),
                    ("value", "Compact<T::Balance>"),
                ],
            ),
            function("set_balance", &[("who", "T::AccountId")]),
        ]),
        vec![constant(
            "ExistentialDeposit",
            Value::str("T::Balance"),
            500u128.to_le_bytes().to_vec(),
        )],
    );

    let body = Value::record([
        ("modules", Value::list([system, balances])),
        ("extrinsic", legacy_extrinsic()),
    ]);
    envelope("V13", body)
}

fn v11_blob() -> Vec<u8> {
    let body = Value::record([
        (
            "modules",
            Value::list([
                module("System", None, Value::Null, None, vec![]),
                module(
                    "Timestamp",
                    None,
                    Value::Null,
                    Some(vec![function("set", &[("now", "Compact<T::Moment>")])]),
                    vec![],
                ),
                module(
                    "Balances",
                    None,
                    Value::Null,
                    Some(vec![
                        function("set_balance", &[("who", "T::AccountId")]),
                        function("transfer", &[("dest", "T::AccountId")]),
                    ]),
                    vec![],
                ),
            ]),
        ),
        ("extrinsic", legacy_extrinsic()),
    ]);
    envelope("V11", body)
}

// ============================================================================
// Envelope
// ============================================================================

#[test]
fn test_bootstrap_registry_is_shared() {
    let (a, id_a) = bootstrap_registry().unwrap();
    let (b, id_b) = bootstrap_registry().unwrap();
    assert!(core::ptr::eq(a, b));
    assert_eq!(id_a, id_b);
    assert_eq!(a.display(id_a), "MetadataPrefixed");
}

#[test]
fn test_blob_starts_with_magic_and_version() {
    let blob = v14_blob();
    assert_eq!(&blob[..5], &[0x6d, 0x65, 0x74, 0x61, 14]);
}

#[test]
fn test_rejects_bad_magic() {
    let mut blob = v14_blob();
    blob[0] = 0;
    assert_eq!(
        decode_metadata(&blob),
        Err(Error::InvalidMagic { found: 0x6174_6500 })
    );
}

#[test]
fn test_rejects_old_versions_before_body() {
    for version in 0..9u8 {
        let mut blob = MAGIC_NUMBER.to_le_bytes().to_vec();
        blob.push(version);
        assert_eq!(
            decode_metadata(&blob),
            Err(Error::TypeNotImplemented {
                what: format!("metadata v{version}")
            })
        );
    }
}

#[test]
fn test_rejects_unknown_future_version() {
    let mut blob = MAGIC_NUMBER.to_le_bytes().to_vec();
    blob.push(15);
    assert!(matches!(
        decode_metadata(&blob),
        Err(Error::TypeNotImplemented { .. })
    ));
}

#[test]
fn test_short_input() {
    assert_eq!(
        decode_metadata(&[0x6d, 0x65]),
        Err(Error::NotEnoughBytes {
            needed: 4,
            available: 2
        })
    );
    assert_eq!(
        decode_metadata(&MAGIC_NUMBER.to_le_bytes()),
        Err(Error::NotEnoughBytes {
            needed: 1,
            available: 0
        })
    );
}

#[test]
fn test_rejects_trailing_bytes() {
    let mut blob = v14_blob();
    blob.push(0);
    assert_eq!(
        decode_metadata(&blob),
        Err(Error::TrailingBytes { remaining: 1 })
    );
}

#[test]
fn test_decode_from_hex() {
    let blob = v13_blob();
    let hex = crate::codec::bytes_to_hex(&blob);
    assert_eq!(decode_metadata_hex(&hex), decode_metadata(&blob));
}

// ============================================================================
// v14
// ============================================================================

#[test]
fn test_v14_event_count() {
    crate::test_utils::init_test_logging();
    let metadata = decode_metadata(&v14_blob()).unwrap();
    assert_eq!(metadata.version(), 14);

    let entry = metadata.storage_item("System", "EventCount").unwrap().unwrap();
    assert_eq!(
        entry,
        StorageEntry {
            prefix: "System".into(),
            name: "EventCount".into(),
            modifier: StorageModifier::Default,
            kind: StorageEntryKind::Plain {
                value: TypeRef::Id(TypeId(0)),
            },
            fallback: vec![0; 4],
            docs: vec![],
        }
    );
    let registry = metadata.registry().unwrap();
    assert_eq!(registry.display(TypeId(0)), "u32");
}

#[test]
fn test_v14_maps() {
    let metadata = decode_metadata(&v14_blob()).unwrap();

    let account = metadata.storage_item("System", "Account").unwrap().unwrap();
    assert_eq!(
        account.kind,
        StorageEntryKind::Map {
            hashers: vec![HasherKind::Blake2_128Concat],
            keys: vec![TypeRef::Id(TypeId(3))],
            value: TypeRef::Id(TypeId(4)),
        }
    );

    let pairs = metadata.storage_item("System", "Pairs").unwrap().unwrap();
    assert_eq!(pairs.modifier, StorageModifier::Optional);
    assert_eq!(
        pairs.kind,
        StorageEntryKind::Map {
            hashers: vec![HasherKind::Twox64Concat, HasherKind::Identity],
            keys: vec![TypeRef::Id(TypeId(0)), TypeRef::Id(TypeId(3))],
            value: TypeRef::Id(TypeId(0)),
        }
    );
}

#[test]
fn test_v14_missing_items() {
    let metadata = decode_metadata(&v14_blob()).unwrap();
    assert_eq!(metadata.storage_item("System", "Nope").unwrap(), None);
    assert_eq!(metadata.storage_item("Balances", "Account").unwrap(), None);
    assert_eq!(metadata.storage_item("Staking", "Ledger").unwrap(), None);
}

#[test]
fn test_v14_pallets() {
    let metadata = decode_metadata(&v14_blob()).unwrap();
    let names: Vec<_> = metadata
        .pallets()
        .unwrap()
        .iter()
        .map(|p| (p.name, p.index))
        .collect();
    assert_eq!(names, vec![("System", 0), ("Balances", 5)]);
    assert_eq!(metadata.pallet_by_index(5).unwrap().unwrap().name, "Balances");
    assert!(metadata.pallet_by_index(1).unwrap().is_none());
    assert_eq!(
        metadata.pallet("System").unwrap().unwrap().storage_prefix(),
        Some("System")
    );
}

#[test]
fn test_v14_calls() {
    let metadata = decode_metadata(&v14_blob()).unwrap();
    assert_eq!(
        metadata.calls_type("Balances").unwrap(),
        Some(Calls::Portable(TypeId(7)))
    );
    assert_eq!(metadata.calls_type("System").unwrap(), None);

    let call = metadata.call("Balances", "transfer").unwrap().unwrap();
    assert_eq!(
        call,
        Call {
            pallet_index: 5,
            call_index: 7,
            name: "transfer".into(),
            args: vec![
                CallArg {
                    name: Some("dest".into()),
                    ty: TypeRef::Id(TypeId(3)),
                },
                CallArg {
                    name: Some("value".into()),
                    ty: TypeRef::Id(TypeId(5)),
                },
            ],
        }
    );
    assert_eq!(metadata.call("Balances", "burn").unwrap(), None);
}

#[test]
fn test_v14_registry_encodes_calls() {
    let metadata = decode_metadata(&v14_blob()).unwrap();
    let registry = metadata.registry().unwrap();
    let call = Value::variant(
        "transfer",
        Value::record([
            ("dest", Value::Bytes(vec![1; 32])),
            ("value", Value::UInt(1000)),
        ]),
    );

    let bytes = encode(TypeId(7), &call, registry).unwrap();
    let mut expected = vec![7];
    expected.extend([1; 32]);
    expected.extend([0xa1, 0x0f]);
    assert_eq!(bytes, expected);

    let (decoded, rest) = crate::codec::decode(TypeId(7), &bytes, registry).unwrap();
    assert!(rest.is_empty());
    assert_eq!(decoded, call);
}

#[test]
fn test_v14_constant() {
    let metadata = decode_metadata(&v14_blob()).unwrap();
    let constant = metadata
        .constant("Balances", "ExistentialDeposit")
        .unwrap()
        .unwrap();
    assert_eq!(constant.ty, TypeRef::Id(TypeId(4)));
    assert_eq!(constant.docs, vec!["The minimum balance.".to_string()]);

    let registry = metadata.registry().unwrap();
    let value = crate::codec::decode_all(TypeId(4), &constant.value, registry).unwrap();
    assert_eq!(value, Value::UInt(500));
}

#[test]
fn test_decoding_is_deterministic() {
    let blob = v14_blob();
    let first = decode_metadata(&blob).unwrap();
    let second = decode_metadata(&blob).unwrap();
    assert_eq!(first.value(), second.value());
    assert_eq!(first.registry(), second.registry());
}

// ============================================================================
// v9..v13
// ============================================================================

#[test]
fn test_v13_storage() {
    let metadata = decode_metadata(&v13_blob()).unwrap();
    assert_eq!(metadata.version(), 13);
    assert!(metadata.registry().is_none());

    let entry = metadata.storage_item("System", "EventCount").unwrap().unwrap();
    assert_eq!(
        entry.kind,
        StorageEntryKind::Plain {
            value: TypeRef::Legacy("EventIndex".into())
        }
    );

    let topics = metadata.storage_item("System", "EventTopics").unwrap().unwrap();
    assert_eq!(
        topics.kind,
        StorageEntryKind::Map {
            hashers: vec![HasherKind::Blake2_128Concat],
            keys: vec![TypeRef::Legacy("T::Hash".into())],
            value: TypeRef::Legacy("Vec<(T::BlockNumber, EventIndex)>".into()),
        }
    );

    let locks = metadata.storage_item("Balances", "Locks").unwrap().unwrap();
    assert_eq!(
        locks.kind,
        StorageEntryKind::Map {
            hashers: vec![HasherKind::Twox64Concat, HasherKind::Identity],
            keys: vec![
                TypeRef::Legacy("T::AccountId".into()),
                TypeRef::Legacy("LockIdentifier".into())
            ],
            value: TypeRef::Legacy("BalanceLock<T::Balance>".into()),
        }
    );

    let reserves = metadata.storage_item("Balances", "Reserves").unwrap().unwrap();
    assert_eq!(reserves.prefix, "Balances");
    assert_eq!(
        reserves.kind,
        StorageEntryKind::Map {
            hashers: vec![
                HasherKind::Blake2_128Concat,
                HasherKind::Twox64Concat,
                HasherKind::Identity
            ],
            keys: vec![
                TypeRef::Legacy("T::AccountId".into()),
                TypeRef::Legacy("ReserveIdentifier".into()),
                TypeRef::Legacy("u32".into())
            ],
            value: TypeRef::Legacy("T::Balance".into()),
        }
    );
}

#[test]
fn test_v13_calls_use_declared_index() {
    let metadata = decode_metadata(&v13_blob()).unwrap();
    assert!(matches!(
        metadata.calls_type("Balances").unwrap(),
        Some(Calls::Legacy(functions)) if functions.len() == 2
    ));

    let call = metadata.call("Balances", "set_balance").unwrap().unwrap();
    assert_eq!(
        call,
        Call {
            pallet_index: 4,
            call_index: 1,
            name: "set_balance".into(),
            args: vec![CallArg {
                name: Some("who".into()),
                ty: TypeRef::Legacy("T::AccountId".into()),
            }],
        }
    );
    assert_eq!(metadata.call("System", "remark").unwrap(), None);
}

#[test]
fn test_v13_constant() {
    let metadata = decode_metadata(&v13_blob()).unwrap();
    let constant = metadata
        .constant("Balances", "ExistentialDeposit")
        .unwrap()
        .unwrap();
    assert_eq!(constant.ty, TypeRef::Legacy("T::Balance".into()));
    assert_eq!(constant.value, 500u128.to_le_bytes().to_vec());
}

#[test]
fn test_v11_indices_by_position() {
    let metadata = decode_metadata(&v11_blob()).unwrap();
    assert_eq!(metadata.version(), 11);
    assert_eq!(metadata.pallet_by_index(2).unwrap().unwrap().name, "Balances");

    // System has no calls, so Balances is the second module with calls.
    let call = metadata.call("Balances", "transfer").unwrap().unwrap();
    assert_eq!((call.pallet_index, call.call_index), (1, 1));

    let set = metadata.call("Timestamp", "set").unwrap().unwrap();
    assert_eq!((set.pallet_index, set.call_index), (0, 0));
}

#[test]
fn test_type_ref_rejects_wide_ids() {
    assert_eq!(
        TypeRef::from_value(&Value::UInt(7), "value"),
        Ok(TypeRef::Id(TypeId(7)))
    );
    assert_eq!(
        TypeRef::from_value(&Value::UInt(u128::from(u32::MAX) + 7), "value"),
        Err(Error::MetadataShape {
            field: "value".into()
        })
    );
}
