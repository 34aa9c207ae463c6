use crate::{Field, Registry, TypeDef, TypeId};
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

/// Formats type ids as readable type expressions.
///
/// Nodes with a path print as their last path segment; anonymous nodes print
/// structurally. A node already being printed further up the stack prints as
/// its id, so recursive types terminate.
pub struct TypeFormatter<'r> {
    output: String,
    registry: &'r Registry,
    stack: Vec<TypeId>,
}

impl<'r> TypeFormatter<'r> {
    pub fn new(registry: &'r Registry) -> Self {
        Self {
            output: String::new(),
            registry,
            stack: Vec::new(),
        }
    }

    pub fn format(registry: &'r Registry, id: TypeId) -> String {
        let mut formatter = Self::new(registry);
        formatter.visit(id);
        formatter.output
    }

    fn visit(&mut self, id: TypeId) {
        let Some(node) = self.registry.get(id) else {
            let _ = write!(self.output, "?{}", id);
            return;
        };
        if let Some(name) = node.name() {
            let _ = write!(self.output, "{}", name);
            return;
        }
        if self.stack.contains(&id) {
            let _ = write!(self.output, "{}", id);
            return;
        }

        self.stack.push(id);
        match &node.def {
            TypeDef::Primitive(prim) => {
                let _ = write!(self.output, "{}", prim);
            }
            TypeDef::Compact(inner) => {
                let _ = write!(self.output, "Compact");
                if let Some(inner) = inner {
                    let _ = write!(self.output, "<");
                    self.visit(*inner);
                    let _ = write!(self.output, ">");
                }
            }
            TypeDef::Sequence(item) => {
                let _ = write!(self.output, "Vec<");
                self.visit(*item);
                let _ = write!(self.output, ">");
            }
            TypeDef::Array { item, len } => {
                let _ = write!(self.output, "[");
                self.visit(*item);
                let _ = write!(self.output, "; {}]", len);
            }
            TypeDef::Tuple(items) => {
                let _ = write!(self.output, "(");
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        let _ = write!(self.output, ", ");
                    }
                    self.visit(*item);
                }
                let _ = write!(self.output, ")");
            }
            TypeDef::Struct(fields) => {
                let _ = write!(self.output, "{{");
                self.fields(fields);
                let _ = write!(self.output, "}}");
            }
            TypeDef::Unit => {
                let _ = write!(self.output, "()");
            }
            TypeDef::Variant(variants) => {
                let _ = write!(self.output, "enum {{");
                for (i, variant) in variants.iter().enumerate() {
                    if i > 0 {
                        let _ = write!(self.output, " | ");
                    }
                    let _ = write!(self.output, "{}@{}", variant.name, variant.index);
                    if !variant.fields.is_empty() {
                        let _ = write!(self.output, "(");
                        self.fields(&variant.fields);
                        let _ = write!(self.output, ")");
                    }
                }
                let _ = write!(self.output, "}}");
            }
            TypeDef::BitSequence { store, order } => {
                let _ = write!(self.output, "BitVec<");
                self.visit(*store);
                let _ = write!(self.output, ", ");
                self.visit(*order);
                let _ = write!(self.output, ">");
            }
        }
        self.stack.pop();
    }

    fn fields(&mut self, fields: &[Field]) {
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                let _ = write!(self.output, ", ");
            }
            if let Some(name) = &field.name {
                let _ = write!(self.output, "{}: ", name);
            }
            self.visit(field.ty);
        }
    }
}

impl Registry {
    /// Readable rendering of `id`, see [`TypeFormatter`].
    pub fn display(&self, id: TypeId) -> String {
        TypeFormatter::format(self, id)
    }
}
