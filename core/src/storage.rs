//! Storage keys.
//!
//! A storage key is `twox128(prefix) ++ twox128(item)` followed by one hashed
//! segment per map key. Hash functions are not implemented here; callers
//! supply them through [`Hasher`].

use crate::codec::encode;
use crate::metadata::{StorageEntry, StorageEntryKind, TypeRef};
use crate::{Error, Result};
use sable_types::{Registry, TypeId};
use sable_values::Value;

/// Storage hashers, by their metadata names.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HasherKind {
    Blake2_128,
    Blake2_256,
    /// `blake2_128(key) ++ key`
    Blake2_128Concat,
    Twox128,
    Twox256,
    /// `twox64(key) ++ key`
    Twox64Concat,
    /// The key bytes unchanged.
    Identity,
}

impl HasherKind {
    pub const ALL: [HasherKind; 7] = [
        HasherKind::Blake2_128,
        HasherKind::Blake2_256,
        HasherKind::Blake2_128Concat,
        HasherKind::Twox128,
        HasherKind::Twox256,
        HasherKind::Twox64Concat,
        HasherKind::Identity,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            HasherKind::Blake2_128 => "Blake2_128",
            HasherKind::Blake2_256 => "Blake2_256",
            HasherKind::Blake2_128Concat => "Blake2_128Concat",
            HasherKind::Twox128 => "Twox128",
            HasherKind::Twox256 => "Twox256",
            HasherKind::Twox64Concat => "Twox64Concat",
            HasherKind::Identity => "Identity",
        }
    }

    /// Length of the digest a [`Hasher`] returns for this kind.
    pub fn digest_len(self) -> usize {
        match self {
            HasherKind::Blake2_128 | HasherKind::Blake2_128Concat | HasherKind::Twox128 => 16,
            HasherKind::Blake2_256 | HasherKind::Twox256 => 32,
            HasherKind::Twox64Concat => 8,
            HasherKind::Identity => 0,
        }
    }

    /// Whether the key bytes follow the digest, so the key can be read back.
    pub fn is_transparent(self) -> bool {
        matches!(
            self,
            HasherKind::Blake2_128Concat | HasherKind::Twox64Concat | HasherKind::Identity
        )
    }
}

impl core::fmt::Display for HasherKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// Hash functions used for storage keys.
pub trait Hasher {
    /// The digest of `data` for `kind`, [`digest_len`](HasherKind::digest_len)
    /// bytes long. For the `Concat` kinds this is the digest alone; the key
    /// bytes are appended by [`hash_key`]. Never called for `Identity`.
    fn hash(&self, kind: HasherKind, data: &[u8]) -> Vec<u8>;
}

impl<H: Hasher + ?Sized> Hasher for &H {
    fn hash(&self, kind: HasherKind, data: &[u8]) -> Vec<u8> {
        (**self).hash(kind, data)
    }
}

/// One hashed key segment.
pub fn hash_key<H: Hasher + ?Sized>(hasher: &H, kind: HasherKind, data: &[u8]) -> Vec<u8> {
    match kind {
        HasherKind::Identity => data.to_vec(),
        HasherKind::Blake2_128Concat | HasherKind::Twox64Concat => {
            let mut out = hasher.hash(kind, data);
            out.extend_from_slice(data);
            out
        }
        _ => hasher.hash(kind, data),
    }
}

/// `twox128(prefix) ++ twox128(item)`, the key of a plain item and the
/// common prefix of every key in a map.
pub fn storage_prefix<H: Hasher + ?Sized>(hasher: &H, prefix: &str, item: &str) -> Vec<u8> {
    let mut key = hasher.hash(HasherKind::Twox128, prefix.as_bytes());
    key.extend(hasher.hash(HasherKind::Twox128, item.as_bytes()));
    key
}

/// Map keys paired with their hashers and types.
#[derive(Debug, Clone, PartialEq)]
pub struct StorageKeyParts {
    hashers: Vec<HasherKind>,
    types: Vec<TypeId>,
    values: Vec<Value>,
}

impl StorageKeyParts {
    pub fn new(hashers: Vec<HasherKind>, types: Vec<TypeId>, values: Vec<Value>) -> Result<Self> {
        if types.len() != hashers.len() {
            return Err(Error::LengthNotEqual {
                expected: hashers.len(),
                actual: types.len(),
            });
        }
        if values.len() != hashers.len() {
            return Err(Error::LengthNotEqual {
                expected: hashers.len(),
                actual: values.len(),
            });
        }
        Ok(Self {
            hashers,
            types,
            values,
        })
    }

    /// No keys, as for a plain storage item.
    pub fn empty() -> Self {
        Self {
            hashers: Vec::new(),
            types: Vec::new(),
            values: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.hashers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (HasherKind, TypeId, &Value)> {
        self.hashers
            .iter()
            .zip(&self.types)
            .zip(&self.values)
            .map(|((hasher, ty), value)| (*hasher, *ty, value))
    }
}

/// Builds a full storage key.
///
/// Each key value is encoded with its type, hashed with its hasher and
/// appended after the prefix.
pub fn encode_storage_key<H: Hasher + ?Sized>(
    hasher: &H,
    prefix: &str,
    item: &str,
    keys: &StorageKeyParts,
    registry: &Registry,
) -> Result<Vec<u8>> {
    let mut key = storage_prefix(hasher, prefix, item);
    for (kind, ty, value) in keys.iter() {
        let encoded = encode(ty, value, registry)?;
        key.extend(hash_key(hasher, kind, &encoded));
    }
    tracing::trace!(prefix, item, keys = keys.len(), "encoded storage key");
    Ok(key)
}

impl StorageEntry {
    /// Pairs `values` with this entry's hashers and key types.
    ///
    /// `resolve` turns each key [`TypeRef`] into an id of the registry the
    /// key will be encoded with; [`TypeRef::as_id`] for v14 metadata, a
    /// [`RegistryBuilder`](crate::compiler::RegistryBuilder) before that.
    pub fn key_parts(
        &self,
        values: Vec<Value>,
        mut resolve: impl FnMut(&TypeRef) -> Result<TypeId>,
    ) -> Result<StorageKeyParts> {
        match &self.kind {
            StorageEntryKind::Plain { .. } if values.is_empty() => Ok(StorageKeyParts::empty()),
            StorageEntryKind::Plain { .. } => Err(Error::LengthNotEqual {
                expected: 0,
                actual: values.len(),
            }),
            StorageEntryKind::Map { hashers, keys, .. } => {
                let types = keys
                    .iter()
                    .map(&mut resolve)
                    .collect::<Result<Vec<_>>>()?;
                StorageKeyParts::new(hashers.clone(), types, values)
            }
        }
    }

    /// The storage key of this entry for `keys`.
    pub fn storage_key<H: Hasher + ?Sized>(
        &self,
        hasher: &H,
        keys: &StorageKeyParts,
        registry: &Registry,
    ) -> Result<Vec<u8>> {
        encode_storage_key(hasher, &self.prefix, &self.name, keys, registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::RegistryBuilder;
    use crate::legacy::LegacyTypes;
    use crate::metadata::StorageModifier;
    use pretty_assertions::assert_eq;

    /// Fills each digest with the hasher's position in `HasherKind::ALL`
    /// plus the input length, enough to tell segments apart.
    struct FakeHasher;

    impl Hasher for FakeHasher {
        fn hash(&self, kind: HasherKind, data: &[u8]) -> Vec<u8> {
            let tag = HasherKind::ALL
                .iter()
                .position(|k| *k == kind)
                .unwrap_or_default() as u8;
            vec![tag * 16 + data.len() as u8; kind.digest_len()]
        }
    }

    fn entry(kind: StorageEntryKind) -> StorageEntry {
        StorageEntry {
            prefix: "System".into(),
            name: "Account".into(),
            modifier: StorageModifier::Default,
            kind,
            fallback: vec![0],
            docs: vec![],
        }
    }

    #[test]
    fn test_hasher_names() {
        for kind in HasherKind::ALL {
            assert_eq!(HasherKind::from_name(kind.name()), Some(kind));
        }
        assert_eq!(HasherKind::from_name("Blake2_512"), None);
        assert_eq!(HasherKind::Twox64Concat.to_string(), "Twox64Concat");
    }

    #[test]
    fn test_hash_key_appends_for_concat() {
        assert_eq!(hash_key(&FakeHasher, HasherKind::Identity, &[1, 2]), vec![1, 2]);
        assert_eq!(
            hash_key(&FakeHasher, HasherKind::Twox64Concat, &[1, 2]),
            vec![0x52, 0x52, 0x52, 0x52, 0x52, 0x52, 0x52, 0x52, 1, 2]
        );
        assert_eq!(
            hash_key(&FakeHasher, HasherKind::Blake2_256, &[9]).len(),
            32
        );
    }

    #[test]
    fn test_plain_key_is_prefix() {
        let registry = Registry::new();
        let key = encode_storage_key(
            &FakeHasher,
            "System",
            "EventCount",
            &StorageKeyParts::empty(),
            &registry,
        )
        .unwrap();
        let mut expected = vec![0x36; 16];
        expected.extend([0x3a; 16]);
        assert_eq!(key, expected);
    }

    #[test]
    fn test_map_key_hashes_encoded_value() {
        let types = LegacyTypes::new();
        let mut builder = RegistryBuilder::new(&types);
        let u32_id = builder.use_type("u32").unwrap();
        let registry = builder.finish().unwrap();

        let keys = StorageKeyParts::new(
            vec![HasherKind::Blake2_128Concat],
            vec![u32_id],
            vec![Value::UInt(7)],
        )
        .unwrap();
        let key = encode_storage_key(&FakeHasher, "System", "Account", &keys, &registry).unwrap();

        assert_eq!(key.len(), 16 + 16 + 16 + 4);
        assert_eq!(&key[32..48], &[0x24; 16]);
        assert_eq!(&key[48..], &[7, 0, 0, 0]);
    }

    #[test]
    fn test_key_count_must_match_hashers() {
        assert_eq!(
            StorageKeyParts::new(vec![HasherKind::Identity], vec![TypeId(0)], vec![]),
            Err(Error::LengthNotEqual {
                expected: 1,
                actual: 0
            })
        );
    }

    #[test]
    fn test_entry_key_parts() {
        let map = entry(StorageEntryKind::Map {
            hashers: vec![HasherKind::Twox64Concat, HasherKind::Identity],
            keys: vec![TypeRef::Id(TypeId(3)), TypeRef::Id(TypeId(4))],
            value: TypeRef::Id(TypeId(5)),
        });
        let parts = map
            .key_parts(vec![Value::UInt(1), Value::UInt(2)], |r| {
                r.as_id().ok_or_else(|| Error::metadata_shape("key"))
            })
            .unwrap();
        let collected: Vec<_> = parts.iter().map(|(kind, ty, _)| (kind, ty)).collect();
        assert_eq!(
            collected,
            vec![
                (HasherKind::Twox64Concat, TypeId(3)),
                (HasherKind::Identity, TypeId(4))
            ]
        );

        let plain = entry(StorageEntryKind::Plain {
            value: TypeRef::Id(TypeId(5)),
        });
        assert!(plain.key_parts(vec![], |_| unreachable!()).unwrap().is_empty());
        assert_eq!(
            plain.key_parts(vec![Value::UInt(1)], |_| unreachable!()),
            Err(Error::LengthNotEqual {
                expected: 0,
                actual: 1
            })
        );
    }

    #[test]
    fn test_legacy_entry_key_through_builder() {
        let mut types = LegacyTypes::new();
        types.alias("AccountId", "[u8; 4]");
        let map = entry(StorageEntryKind::Map {
            hashers: vec![HasherKind::Identity],
            keys: vec![TypeRef::Legacy("T::AccountId".into())],
            value: TypeRef::Legacy("u64".into()),
        });

        let mut builder = RegistryBuilder::new(&types);
        let parts = map
            .key_parts(vec![Value::Bytes(vec![1, 2, 3, 4])], |r| match r {
                TypeRef::Legacy(expr) => builder.use_type(expr),
                TypeRef::Id(id) => Ok(*id),
            })
            .unwrap();
        let registry = builder.finish().unwrap();

        let key = map.storage_key(&FakeHasher, &parts, &registry).unwrap();
        assert_eq!(&key[..16], &[0x36; 16]);
        assert_eq!(&key[16..32], &[0x37; 16]);
        assert_eq!(&key[32..], &[1, 2, 3, 4]);
    }
}
