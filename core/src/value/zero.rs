use super::Value;
use chrono::{DateTime, Utc};

/// Outcome of comparing a value against the default of its type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zeroness {
    Zero,
    NonZero,
    /// A wrapper around an uninitialized wrapper or handle. Neither zero nor a usable value.
    Invalid,
}

impl Value {
    pub fn zeroness(&self) -> Zeroness {
        let zero = match self {
            Value::I8(n) => *n == 0,
            Value::I16(n) => *n == 0,
            Value::I32(n) => *n == 0,
            Value::I64(n) => *n == 0,
            Value::Isize(n) => *n == 0,
            Value::U8(n) => *n == 0,
            Value::U16(n) => *n == 0,
            Value::U32(n) => *n == 0,
            Value::U64(n) => *n == 0,
            Value::Usize(n) => *n == 0,
            Value::F32(x) => *x == 0.0,
            Value::F64(x) => *x == 0.0,
            Value::C64(c) => c.re == 0.0 && c.im == 0.0,
            Value::C128(c) => c.re == 0.0 && c.im == 0.0,
            Value::Bool(b) => !*b,
            Value::String(s) => s.is_empty(),
            Value::Seq(items) | Value::Array(items) => items.is_empty(),
            Value::Map(entries) => entries.is_empty(),
            Value::Timestamp(t) => *t == DateTime::<Utc>::default(),
            Value::Opaque(handle) => handle.is_nil(),
            Value::Interface(None) => true,
            Value::Interface(Some(inner)) => {
                if inner.is_uninitialized() {
                    return Zeroness::Invalid;
                }
                return inner.zeroness();
            }
        };
        if zero {
            Zeroness::Zero
        } else {
            Zeroness::NonZero
        }
    }

    pub fn is_zero(&self) -> bool { self.zeroness() == Zeroness::Zero }
}
