use crate::{TypeDef, TypeId};

impl TypeDef {
    /// Calls `f` with every type id this node references directly, in
    /// declaration order.
    pub fn for_each_child(&self, mut f: impl FnMut(TypeId)) {
        match self {
            TypeDef::Primitive(_) | TypeDef::Unit | TypeDef::Compact(None) => {}
            TypeDef::Compact(Some(inner)) => f(*inner),
            TypeDef::Sequence(item) | TypeDef::Array { item, .. } => f(*item),
            TypeDef::Tuple(items) => items.iter().copied().for_each(f),
            TypeDef::Struct(fields) => fields.iter().for_each(|field| f(field.ty)),
            TypeDef::Variant(variants) => variants
                .iter()
                .flat_map(|v| v.fields.iter())
                .for_each(|field| f(field.ty)),
            TypeDef::BitSequence { store, order } => {
                f(*store);
                f(*order);
            }
        }
    }
}
