use crate::Value;
use core::fmt;

/// Compact literal rendering, meant for logs and test failure output.
///
/// Byte strings and 256-bit integers print as `0x`-prefixed hex (integers
/// most significant byte first).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::UInt(n) => write!(f, "{}", n),
            Value::Int(n) => write!(f, "{}", n),
            Value::U256(bytes) | Value::I256(bytes) => {
                f.write_str("0x")?;
                for byte in bytes.iter().rev() {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
            Value::Char(c) => write!(f, "{:?}", c),
            Value::Str(s) => write!(f, "{:?}", s),
            Value::Bytes(bytes) => {
                f.write_str("0x")?;
                for byte in bytes {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Value::Record(fields) => {
                f.write_str("{")?;
                for (i, (name, value)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", name, value)?;
                }
                f.write_str("}")
            }
            Value::Symbol(name) => f.write_str(name),
            Value::Variant { name, payload } => write!(f, "{}({})", name, payload),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::Value;
    use alloc::format;
    use alloc::vec;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_scalars() {
        assert_eq!(format!("{}", Value::Null), "null");
        assert_eq!(format!("{}", Value::UInt(64302)), "64302");
        assert_eq!(format!("{}", Value::Int(-1)), "-1");
        assert_eq!(format!("{}", Value::str("hi")), "\"hi\"");
        assert_eq!(format!("{}", Value::Bytes(vec![0xde, 0xad])), "0xdead");
    }

    #[test]
    fn test_display_u256_is_big_endian() {
        let mut bytes = [0u8; 32];
        bytes[0] = 1;
        let rendered = format!("{}", Value::U256(bytes));
        assert!(rendered.ends_with("01"));
        assert_eq!(rendered.len(), 2 + 64);
    }

    #[test]
    fn test_display_nested() {
        let value = Value::record([
            ("who", Value::Bytes(vec![1, 2])),
            (
                "calls",
                Value::list([Value::symbol("Remark"), Value::variant("Transfer", Value::UInt(5))]),
            ),
        ]);
        assert_eq!(
            format!("{}", value),
            "{who: 0x0102, calls: [Remark, Transfer(5)]}"
        );
    }
}
