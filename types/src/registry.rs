use crate::{TypeDef, TypeId, TypeNode};
use alloc::vec::Vec;
use hashbrown::HashSet;

/// Errors raised while assembling a registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("type {from} references missing type {to}")]
    DanglingId { from: TypeId, to: TypeId },

    #[error("type {0} was reserved but never defined")]
    Unfilled(TypeId),

    #[error("type {0} is not a reserved slot")]
    NotReserved(TypeId),

    #[error("type {ty} declares variant index {index} more than once")]
    DuplicateVariantIndex { ty: TypeId, index: u8 },

    #[error("portable entry at position {position} declares id {id}")]
    PortableIdMismatch { position: usize, id: u32 },
}

/// Append-only arena of type nodes addressed by [`TypeId`].
///
/// Construction goes through [`push`](Registry::push), or through
/// [`reserve`](Registry::reserve) followed by exactly one
/// [`fill`](Registry::fill) for nodes that must be addressable before their
/// children exist (recursive types). Once built, a registry is only read; it
/// is `Send + Sync` and can be shared between threads.
///
/// # Example
///
/// ```
/// use sable_types::{Primitive, Registry, TypeDef};
///
/// let mut registry = Registry::new();
/// let byte = registry.push(TypeDef::Primitive(Primitive::U8));
/// let bytes = registry.push(TypeDef::Sequence(byte));
///
/// assert_eq!(registry.len(), 2);
/// assert_eq!(registry.def(bytes), Some(&TypeDef::Sequence(byte)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Registry {
    nodes: Vec<TypeNode>,
    reserved: HashSet<TypeId>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from already-resolved `(id, node)` pairs.
    ///
    /// Ids must equal their position in the sequence. The result is
    /// validated before it is returned.
    pub fn from_portable(
        entries: impl IntoIterator<Item = (u32, TypeNode)>,
    ) -> Result<Self, RegistryError> {
        let mut registry = Registry::new();
        for (position, (id, node)) in entries.into_iter().enumerate() {
            if id as usize != position {
                return Err(RegistryError::PortableIdMismatch { position, id });
            }
            registry.push(node);
        }
        registry.validate()?;
        Ok(registry)
    }

    /// Appends a node and returns its id.
    pub fn push(&mut self, node: impl Into<TypeNode>) -> TypeId {
        let id = self.next_id();
        self.nodes.push(node.into());
        id
    }

    /// Appends a placeholder slot that must later be defined with `fill`.
    pub fn reserve(&mut self) -> TypeId {
        let id = self.push(TypeDef::Unit);
        self.reserved.insert(id);
        id
    }

    /// Defines a slot obtained from `reserve`.
    pub fn fill(&mut self, id: TypeId, node: impl Into<TypeNode>) -> Result<(), RegistryError> {
        if !self.reserved.remove(&id) {
            return Err(RegistryError::NotReserved(id));
        }
        self.nodes[id.index()] = node.into();
        Ok(())
    }

    /// Id the next `push` will return.
    pub fn next_id(&self) -> TypeId {
        TypeId(self.nodes.len() as u32)
    }

    pub fn get(&self, id: TypeId) -> Option<&TypeNode> {
        self.nodes.get(id.index())
    }

    pub fn def(&self, id: TypeId) -> Option<&TypeDef> {
        self.get(id).map(|node| &node.def)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TypeId, &TypeNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (TypeId(i as u32), node))
    }

    /// First node whose path equals `path`.
    pub fn find_by_path(&self, path: &[&str]) -> Option<TypeId> {
        self.iter()
            .find(|(_, node)| {
                node.path.len() == path.len()
                    && node.path.iter().zip(path).all(|(a, b)| a == b)
            })
            .map(|(id, _)| id)
    }

    /// Checks the structural invariants: every slot defined, every
    /// referenced id present, variant indices unique per enum.
    pub fn validate(&self) -> Result<(), RegistryError> {
        if let Some(id) = self.reserved.iter().min() {
            return Err(RegistryError::Unfilled(*id));
        }

        for (id, node) in self.iter() {
            let mut dangling = None;
            node.def.for_each_child(|child| {
                if dangling.is_none() && child.index() >= self.nodes.len() {
                    dangling = Some(child);
                }
            });
            if let Some(to) = dangling {
                return Err(RegistryError::DanglingId { from: id, to });
            }

            if let TypeDef::Variant(variants) = &node.def {
                let mut seen = HashSet::with_capacity(variants.len());
                for variant in variants {
                    if !seen.insert(variant.index) {
                        return Err(RegistryError::DuplicateVariantIndex {
                            ty: id,
                            index: variant.index,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Field, Primitive, VariantDef};
    use alloc::vec;
    use pretty_assertions::assert_eq;

    static_assertions::assert_impl_all!(Registry: Send, Sync);

    #[test]
    fn test_push_assigns_sequential_ids() {
        let mut registry = Registry::new();
        let a = registry.push(TypeDef::Primitive(Primitive::U8));
        let b = registry.push(TypeDef::Unit);
        assert_eq!(a, TypeId(0));
        assert_eq!(b, TypeId(1));
        assert_eq!(registry.next_id(), TypeId(2));
    }

    #[test]
    fn test_reserve_and_fill_recursive_type() {
        let mut registry = Registry::new();
        let list = registry.reserve();
        let value = registry.push(TypeDef::Primitive(Primitive::U32));
        let next = registry.push(TypeDef::Sequence(list));
        registry
            .fill(
                list,
                TypeDef::Struct(vec![Field::named("value", value), Field::named("next", next)]),
            )
            .unwrap();

        assert!(registry.validate().is_ok());
        assert_eq!(registry.fill(list, TypeDef::Unit), Err(RegistryError::NotReserved(list)));
    }

    #[test]
    fn test_validate_reports_unfilled_slot() {
        let mut registry = Registry::new();
        let id = registry.reserve();
        assert_eq!(registry.validate(), Err(RegistryError::Unfilled(id)));
    }

    #[test]
    fn test_validate_reports_dangling_id() {
        let mut registry = Registry::new();
        let seq = registry.push(TypeDef::Sequence(TypeId(7)));
        assert_eq!(
            registry.validate(),
            Err(RegistryError::DanglingId {
                from: seq,
                to: TypeId(7)
            })
        );
    }

    #[test]
    fn test_validate_reports_duplicate_variant_index() {
        let mut registry = Registry::new();
        let id = registry.push(TypeDef::Variant(vec![
            VariantDef::simple("A", 3),
            VariantDef::simple("B", 3),
        ]));
        assert_eq!(
            registry.validate(),
            Err(RegistryError::DuplicateVariantIndex { ty: id, index: 3 })
        );
    }

    #[test]
    fn test_from_portable_requires_positional_ids() {
        let byte = TypeNode::new(TypeDef::Primitive(Primitive::U8));
        let bytes = TypeNode::new(TypeDef::Sequence(TypeId(0)));

        let registry = Registry::from_portable([(0, byte.clone()), (1, bytes.clone())]).unwrap();
        assert_eq!(registry.def(TypeId(1)), Some(&TypeDef::Sequence(TypeId(0))));

        assert_eq!(
            Registry::from_portable([(0, byte), (2, bytes)]),
            Err(RegistryError::PortableIdMismatch { position: 1, id: 2 })
        );
    }

    #[test]
    fn test_from_portable_rejects_dangling_reference() {
        let entries = [(0, TypeNode::new(TypeDef::Sequence(TypeId(9))))];
        assert!(matches!(
            Registry::from_portable(entries),
            Err(RegistryError::DanglingId { .. })
        ));
    }

    #[test]
    fn test_find_by_path() {
        let mut registry = Registry::new();
        registry.push(TypeDef::Unit);
        let account = registry.push(
            TypeNode::new(TypeDef::Array {
                item: TypeId(0),
                len: 32,
            })
            .with_path(vec!["sp_core".into(), "crypto".into(), "AccountId32".into()]),
        );
        assert_eq!(
            registry.find_by_path(&["sp_core", "crypto", "AccountId32"]),
            Some(account)
        );
        assert_eq!(registry.find_by_path(&["AccountId32"]), None);
    }
}
