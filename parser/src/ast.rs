use core::fmt;

/// Parsed legacy type expression.
///
/// Path prefixes and the qualified `<X as Trait>::Item` form are resolved
/// during parsing, so a `Named` node only carries the final name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeExpr {
    /// `Name` or `Name<P, ...>`.
    Named { name: String, params: Vec<TypeExpr> },

    /// `(A, B, ...)`; `()` is the empty tuple.
    Tuple(Vec<TypeExpr>),

    /// `[T; N]`.
    Array { item: Box<TypeExpr>, len: u32 },
}

impl TypeExpr {
    pub fn named(name: impl Into<String>) -> Self {
        TypeExpr::Named {
            name: name.into(),
            params: Vec::new(),
        }
    }

    pub fn generic(name: impl Into<String>, params: Vec<TypeExpr>) -> Self {
        TypeExpr::Named {
            name: name.into(),
            params,
        }
    }

    pub fn array(item: TypeExpr, len: u32) -> Self {
        TypeExpr::Array {
            item: Box::new(item),
            len,
        }
    }

    /// Name of a `Named` node.
    pub fn name(&self) -> Option<&str> {
        match self {
            TypeExpr::Named { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Canonical printed form. Equal canonical forms denote the same type.
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Named { name, params } => {
                f.write_str(name)?;
                if !params.is_empty() {
                    f.write_str("<")?;
                    write_list(f, params)?;
                    f.write_str(">")?;
                }
                Ok(())
            }
            TypeExpr::Tuple(items) => {
                f.write_str("(")?;
                write_list(f, items)?;
                f.write_str(")")
            }
            TypeExpr::Array { item, len } => write!(f, "[{}; {}]", item, len),
        }
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[TypeExpr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}
