use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

/// A decoded value.
///
/// The tree carries no type information of its own: the same value encodes
/// differently depending on the type id it is encoded against.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// Unit, empty tuples, and `Option::None`.
    Null,

    Bool(bool),

    /// Unsigned integers up to 128 bits, including compact integers.
    UInt(u128),

    /// Signed integers up to 128 bits.
    Int(i128),

    /// 256-bit unsigned integer, little-endian.
    U256([u8; 32]),

    /// 256-bit signed integer, little-endian two's complement.
    I256([u8; 32]),

    Char(char),

    Str(String),

    /// Sequences and arrays of `u8`.
    Bytes(Vec<u8>),

    /// Sequences, arrays, and tuples.
    List(Vec<Value>),

    /// Structs, in declaration order.
    Record(Vec<(String, Value)>),

    /// A variant without payload, by name.
    Symbol(String),

    /// A variant with payload.
    Variant { name: String, payload: Box<Value> },
}

impl Value {
    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Value::Symbol(name.into())
    }

    pub fn variant(name: impl Into<String>, payload: Value) -> Self {
        Value::Variant {
            name: name.into(),
            payload: Box::new(payload),
        }
    }

    /// Builds a record from `(name, value)` pairs.
    pub fn record<K: Into<String>>(fields: impl IntoIterator<Item = (K, Value)>) -> Self {
        Value::Record(
            fields
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
        )
    }

    pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
        Value::List(items.into_iter().collect())
    }

    /// Short name of the value's shape, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::UInt(_) => "unsigned integer",
            Value::Int(_) => "signed integer",
            Value::U256(_) => "u256",
            Value::I256(_) => "i256",
            Value::Char(_) => "char",
            Value::Str(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
            Value::Record(_) => "record",
            Value::Symbol(_) => "symbol",
            Value::Variant { .. } => "variant",
        }
    }

    // ============================================================================
    // Accessors
    // ============================================================================

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Unsigned view of any non-negative integer up to 128 bits.
    pub fn as_u128(&self) -> Option<u128> {
        match self {
            Value::UInt(n) => Some(*n),
            Value::Int(n) => u128::try_from(*n).ok(),
            _ => None,
        }
    }

    /// Signed view of any integer that fits `i128`.
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Value::Int(n) => Some(*n),
            Value::UInt(n) => i128::try_from(*n).ok(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&[(String, Value)]> {
        match self {
            Value::Record(fields) => Some(fields),
            _ => None,
        }
    }

    /// Field of a record by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.as_record()?
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    /// Name of the active variant, for both `Symbol` and `Variant`.
    pub fn variant_name(&self) -> Option<&str> {
        match self {
            Value::Symbol(name) | Value::Variant { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Payload of a `Variant`; `Null` for a `Symbol`.
    pub fn payload(&self) -> Option<&Value> {
        const NULL: &Value = &Value::Null;
        match self {
            Value::Variant { payload, .. } => Some(payload),
            Value::Symbol(_) => Some(NULL),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_lookup() {
        let value = Value::record([("name", Value::str("System")), ("index", Value::UInt(0))]);
        assert_eq!(value.field("index"), Some(&Value::UInt(0)));
        assert_eq!(value.field("missing"), None);
        assert_eq!(Value::UInt(1).field("index"), None);
    }

    #[test]
    fn test_integer_views() {
        assert_eq!(Value::Int(5).as_u128(), Some(5));
        assert_eq!(Value::Int(-5).as_u128(), None);
        assert_eq!(Value::UInt(u128::MAX).as_i128(), None);
        assert_eq!(Value::UInt(7).as_i128(), Some(7));
    }

    #[test]
    fn test_variant_accessors() {
        let some = Value::variant("Map", Value::list(vec![Value::UInt(1)]));
        assert_eq!(some.variant_name(), Some("Map"));
        assert_eq!(some.payload(), Some(&Value::List(vec![Value::UInt(1)])));

        let plain = Value::symbol("Plain");
        assert_eq!(plain.variant_name(), Some("Plain"));
        assert_eq!(plain.payload(), Some(&Value::Null));
    }
}
