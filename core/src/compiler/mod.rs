//! Compiles legacy type expressions into a [`Registry`].
//!
//! [`RegistryBuilder::use_type`] parses an expression, resolves every name in
//! it against built-in rules and then against a [`LegacyTypes`] dictionary,
//! and returns the id of the resulting node. Nodes are memoized by the
//! canonical printed form of their expression, so `Vec<T::Balance>` and
//! `Vec< Balance >` share one slot.

use crate::legacy::{EnumDef, LegacyDef, LegacyTypes, VariantPayload};
use crate::{Error, Result};
use hashbrown::{HashMap, HashSet};
use sable_parser::{TypeExpr, parse};
use sable_types::{Field, Primitive, Registry, TypeDef, TypeId, TypeNode, VariantDef};

/// Builds a registry on demand from type expressions.
///
/// Construction is single-threaded; [`finish`](RegistryBuilder::finish)
/// validates the arena and hands back the immutable [`Registry`].
///
/// # Example
///
/// ```
/// use sable_core::compiler::RegistryBuilder;
/// use sable_core::legacy::LegacyTypes;
///
/// let mut types = LegacyTypes::new();
/// types.alias("Balance", "u128");
///
/// let mut builder = RegistryBuilder::new(&types);
/// let a = builder.use_type("Vec<T::Balance>").unwrap();
/// let b = builder.use_type("Vec<Balance>").unwrap();
/// assert_eq!(a, b);
///
/// let registry = builder.finish().unwrap();
/// assert_eq!(registry.display(a), "Vec<u128>");
/// ```
pub struct RegistryBuilder<'d> {
    types: &'d LegacyTypes,
    registry: Registry,
    memo: HashMap<String, TypeId>,
    /// Dictionary structs and enums by bare name.
    by_name: HashMap<String, TypeId>,
    /// Anonymous nodes by structure, so different spellings of one type
    /// share a slot.
    interned: HashMap<TypeDef, TypeId>,
    /// Reserved slots whose definition is still being resolved.
    pending: HashSet<TypeId>,
    /// Aliases being expanded on the current path, for cycle detection.
    expanding: HashSet<String>,
}

impl<'d> RegistryBuilder<'d> {
    pub fn new(types: &'d LegacyTypes) -> Self {
        Self {
            types,
            registry: Registry::new(),
            memo: HashMap::new(),
            by_name: HashMap::new(),
            interned: HashMap::new(),
            pending: HashSet::new(),
            expanding: HashSet::new(),
        }
    }

    /// Resolves `expr` to a type id, building nodes as needed.
    ///
    /// After an error the builder may hold unfilled slots, which `finish`
    /// reports; start over with a fresh builder instead.
    pub fn use_type(&mut self, expr: &str) -> Result<TypeId> {
        let ast = parse(expr)?;
        self.build(&ast)
    }

    /// Resolves an already-parsed expression.
    pub fn build(&mut self, expr: &TypeExpr) -> Result<TypeId> {
        let key = expr.canonical();
        if let Some(id) = self.memo.get(&key) {
            return Ok(*id);
        }

        let id = match expr {
            TypeExpr::Tuple(items) if items.is_empty() => self.intern(TypeDef::Unit),
            TypeExpr::Tuple(items) => {
                let ids = items
                    .iter()
                    .map(|item| self.build(item))
                    .collect::<Result<Vec<_>>>()?;
                self.intern(TypeDef::Tuple(ids))
            }
            TypeExpr::Array { item, len } => {
                let item = self.build(item)?;
                self.intern(TypeDef::Array { item, len: *len })
            }
            TypeExpr::Named { name, params } => self.build_named(&key, name, params)?,
        };

        tracing::trace!(expr = %key, ty = %id, "resolved");
        self.memo.insert(key, id);
        Ok(id)
    }

    /// The registry as built so far.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Validates and returns the registry.
    pub fn finish(self) -> Result<Registry> {
        self.registry.validate()?;
        tracing::debug!(
            nodes = self.registry.len(),
            expressions = self.memo.len(),
            "compiled legacy registry"
        );
        Ok(self.registry)
    }

    // ========================================================================
    // Name resolution
    // ========================================================================

    fn build_named(&mut self, key: &str, name: &str, params: &[TypeExpr]) -> Result<TypeId> {
        if params.is_empty() {
            if let Some(primitive) = Primitive::from_name(name) {
                return Ok(self.intern(TypeDef::Primitive(primitive)));
            }
        }

        match (name, params) {
            ("Vec" | "VecDeque" | "BTreeSet" | "HashSet", [item]) => {
                let item = self.build(item)?;
                Ok(self.intern(TypeDef::Sequence(item)))
            }
            ("BTreeMap" | "HashMap", [k, v]) => {
                let entry = TypeExpr::Tuple(vec![k.clone(), v.clone()]);
                self.build(&TypeExpr::generic("Vec", vec![entry]))
            }
            ("Option", [inner]) => {
                let inner = self.build(inner)?;
                Ok(self.intern(TypeDef::Variant(vec![
                    VariantDef::simple("None", 0),
                    VariantDef::new("Some", 1, vec![Field::unnamed(inner)]),
                ])))
            }
            ("Result", [ok, err]) => {
                let ok = self.build(ok)?;
                let err = self.build(err)?;
                Ok(self.intern(TypeDef::Variant(vec![
                    VariantDef::new("Ok", 0, vec![Field::unnamed(ok)]),
                    VariantDef::new("Err", 1, vec![Field::unnamed(err)]),
                ])))
            }
            ("Compact", [inner]) => {
                let inner = self.build(inner)?;
                Ok(self.intern(TypeDef::Compact(Some(inner))))
            }
            ("Box" | "Arc" | "Rc", [inner]) => self.build(inner),
            ("Bytes", []) => self.build(&TypeExpr::generic("Vec", vec![TypeExpr::named("u8")])),
            ("Null" | "PhantomData", _) => self.build(&TypeExpr::Tuple(Vec::new())),
            _ => self.build_from_dictionary(key, name),
        }
    }

    /// Dictionary entries are looked up by bare name; generic parameters on
    /// the reference (`BalanceOf<T>`) do not select a different entry, so
    /// every spelling of a struct or enum shares the slot built for `name`.
    fn build_from_dictionary(&mut self, key: &str, name: &str) -> Result<TypeId> {
        if let Some(id) = self.by_name.get(name) {
            return Ok(*id);
        }
        let types = self.types;
        let def = types.get(name).ok_or_else(|| Error::UnknownType {
            name: name.to_string(),
        })?;

        match def {
            LegacyDef::Alias(target) => {
                if !self.expanding.insert(name.to_string()) {
                    return Err(Error::RecursiveAlias {
                        name: name.to_string(),
                    });
                }
                let result = self.use_type(target);
                self.expanding.remove(name);
                result
            }
            LegacyDef::Enum(EnumDef::Simple(variants)) => {
                let variants = variants
                    .iter()
                    .map(|(variant, index)| VariantDef::simple(variant, *index))
                    .collect();
                let id = self.push_named(name, TypeDef::Variant(variants));
                self.by_name.insert(name.to_string(), id);
                Ok(id)
            }
            LegacyDef::Struct(fields) => {
                self.build_slot(key, name, |this| this.fields(fields).map(TypeDef::Struct))
            }
            LegacyDef::Enum(EnumDef::Tagged(variants)) => self.build_slot(key, name, |this| {
                this.tagged_variants(name, variants).map(TypeDef::Variant)
            }),
        }
    }

    /// Reserves the slot for `name`, then resolves its definition.
    ///
    /// The reserved slot ends any alias chain, so a reference back to it
    /// through an alias resolves to the slot instead of reading as a cycle.
    fn build_slot(
        &mut self,
        key: &str,
        name: &str,
        resolve: impl FnOnce(&mut Self) -> Result<TypeDef>,
    ) -> Result<TypeId> {
        let id = self.reserve(key);
        self.by_name.insert(name.to_string(), id);

        let expanding = core::mem::take(&mut self.expanding);
        let def = resolve(self);
        self.expanding = expanding;

        self.fill(id, name, def?)?;
        Ok(id)
    }

    fn fields(&mut self, fields: &[(String, String)]) -> Result<Vec<Field>> {
        fields
            .iter()
            .map(|(field, expr)| self.field(Some(field), expr))
            .collect()
    }

    fn tagged_variants(
        &mut self,
        name: &str,
        variants: &[(String, VariantPayload)],
    ) -> Result<Vec<VariantDef>> {
        if variants.len() > 256 {
            return Err(Error::InvalidDictionary {
                name: name.to_string(),
                reason: "more than 256 variants".to_string(),
            });
        }
        let mut defs = Vec::with_capacity(variants.len());
        for (index, (variant, payload)) in variants.iter().enumerate() {
            let fields = match payload {
                VariantPayload::Unit => Vec::new(),
                VariantPayload::Type(expr) => {
                    let field = self.field(None, expr)?;
                    if self.is_unit(field.ty) {
                        Vec::new()
                    } else {
                        vec![field]
                    }
                }
                VariantPayload::Tuple(exprs) => exprs
                    .iter()
                    .map(|expr| self.field(None, expr))
                    .collect::<Result<_>>()?,
                VariantPayload::Struct(fields) => self.fields(fields)?,
            };
            defs.push(VariantDef::new(variant, index as u8, fields));
        }
        Ok(defs)
    }

    fn field(&mut self, name: Option<&String>, expr: &str) -> Result<Field> {
        let ty = self.use_type(expr)?;
        Ok(Field {
            name: name.cloned(),
            ty,
            type_name: Some(expr.to_string()),
        })
    }

    /// Reserves a slot and memoizes it before children are resolved, so
    /// self-referential definitions resolve to the slot itself.
    fn reserve(&mut self, key: &str) -> TypeId {
        let id = self.registry.reserve();
        self.memo.insert(key.to_string(), id);
        self.pending.insert(id);
        id
    }

    fn fill(&mut self, id: TypeId, name: &str, def: TypeDef) -> Result<()> {
        let node = TypeNode::new(def).with_path(vec![name.to_string()]);
        self.registry.fill(id, node)?;
        self.pending.remove(&id);
        Ok(())
    }

    fn intern(&mut self, def: TypeDef) -> TypeId {
        if let Some(id) = self.interned.get(&def) {
            return *id;
        }
        let id = self.registry.push(def.clone());
        self.interned.insert(def, id);
        id
    }

    /// A reserved slot reads as `Unit` until filled, so it is never unit here.
    fn is_unit(&self, id: TypeId) -> bool {
        !self.pending.contains(&id) && matches!(self.registry.def(id), Some(TypeDef::Unit))
    }

    fn push_named(&mut self, name: &str, def: TypeDef) -> TypeId {
        self.registry
            .push(TypeNode::new(def).with_path(vec![name.to_string()]))
    }
}
