mod convert;
mod length;
mod zero;

pub use convert::ToValue;
pub use zero::Zeroness;

use chrono::{DateTime, SecondsFormat, Utc};
use num_complex::{Complex32, Complex64};
use std::any::Any;
use std::fmt::{self, Display};
use std::sync::Arc;
use verity_rules::ast::Literal;

/// The dynamic value of a record field.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    // Signed integers
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),

    // Unsigned integers
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),

    F32(f32),
    F64(f64),
    C64(Complex32),
    C128(Complex64),

    Bool(bool),
    String(String),
    /// Dynamically sized ordered sequence
    Seq(Vec<Value>),
    /// Fixed-length ordered sequence
    Array(Vec<Value>),
    /// Keyed mapping. Iteration order carries no meaning.
    Map(Vec<(Value, Value)>),
    Timestamp(DateTime<Utc>),
    /// Function or channel-like handle whose type is erased
    Opaque(Opaque),
    /// Type-erased wrapper around another value. `None` is an uninitialized wrapper.
    Interface(Option<Box<Value>>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
    C64,
    C128,
    Bool,
    String,
    Seq,
    Array,
    Map,
    Timestamp,
    Opaque,
    Interface,
}

impl ValueType {
    pub fn of(v: &Value) -> Self {
        match v {
            Value::I8(_) => ValueType::I8,
            Value::I16(_) => ValueType::I16,
            Value::I32(_) => ValueType::I32,
            Value::I64(_) => ValueType::I64,
            Value::Isize(_) => ValueType::Isize,
            Value::U8(_) => ValueType::U8,
            Value::U16(_) => ValueType::U16,
            Value::U32(_) => ValueType::U32,
            Value::U64(_) => ValueType::U64,
            Value::Usize(_) => ValueType::Usize,
            Value::F32(_) => ValueType::F32,
            Value::F64(_) => ValueType::F64,
            Value::C64(_) => ValueType::C64,
            Value::C128(_) => ValueType::C128,
            Value::Bool(_) => ValueType::Bool,
            Value::String(_) => ValueType::String,
            Value::Seq(_) => ValueType::Seq,
            Value::Array(_) => ValueType::Array,
            Value::Map(_) => ValueType::Map,
            Value::Timestamp(_) => ValueType::Timestamp,
            Value::Opaque(_) => ValueType::Opaque,
            Value::Interface(_) => ValueType::Interface,
        }
    }
}

/// A type-erased handle. Only its presence is observable to rules.
#[derive(Clone, Default)]
pub struct Opaque(Option<Arc<dyn Any + Send + Sync>>);

impl Opaque {
    pub fn nil() -> Self { Opaque(None) }

    pub fn new<T: Any + Send + Sync>(inner: T) -> Self { Opaque(Some(Arc::new(inner))) }

    pub fn is_nil(&self) -> bool { self.0.is_none() }

    pub fn downcast_ref<T: Any>(&self) -> Option<&T> { self.0.as_deref().and_then(|any| any.downcast_ref::<T>()) }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            None => write!(f, "Opaque(nil)"),
            Some(_) => write!(f, "Opaque(..)"),
        }
    }
}

impl PartialEq for Opaque {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (None, None) => true,
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Value {
    pub fn is_signed(&self) -> bool {
        matches!(self, Value::I8(_) | Value::I16(_) | Value::I32(_) | Value::I64(_) | Value::Isize(_))
    }

    pub fn is_unsigned(&self) -> bool {
        matches!(self, Value::U8(_) | Value::U16(_) | Value::U32(_) | Value::U64(_) | Value::Usize(_))
    }

    pub fn is_integer(&self) -> bool { self.is_signed() || self.is_unsigned() }

    pub fn is_numeric(&self) -> bool {
        self.is_integer() || matches!(self, Value::F32(_) | Value::F64(_) | Value::C64(_) | Value::C128(_))
    }

    /// An uninitialized wrapper or handle: present in the record, but carrying nothing a rule can inspect.
    pub fn is_uninitialized(&self) -> bool {
        match self {
            Value::Interface(None) => true,
            Value::Opaque(handle) => handle.is_nil(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Timestamp(t) => Some(t),
            _ => None,
        }
    }
}

/// Renders values the way they appear in hints: numbers in decimal, text unquoted,
/// sequences as `[a b]`, mappings as `map[k:v]`, timestamps in RFC 3339.
impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::I8(n) => write!(f, "{}", n),
            Value::I16(n) => write!(f, "{}", n),
            Value::I32(n) => write!(f, "{}", n),
            Value::I64(n) => write!(f, "{}", n),
            Value::Isize(n) => write!(f, "{}", n),
            Value::U8(n) => write!(f, "{}", n),
            Value::U16(n) => write!(f, "{}", n),
            Value::U32(n) => write!(f, "{}", n),
            Value::U64(n) => write!(f, "{}", n),
            Value::Usize(n) => write!(f, "{}", n),
            Value::F32(x) => write!(f, "{}", x),
            Value::F64(x) => write!(f, "{}", x),
            Value::C64(c) => write!(f, "({}{:+}i)", c.re, c.im),
            Value::C128(c) => write!(f, "({}{:+}i)", c.re, c.im),
            Value::Bool(b) => write!(f, "{}", b),
            Value::String(s) => write!(f, "{}", s),
            Value::Seq(items) | Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Map(entries) => {
                write!(f, "map[")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}:{}", key, value)?;
                }
                write!(f, "]")
            }
            Value::Timestamp(t) => write!(f, "{}", t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            Value::Opaque(handle) if handle.is_nil() => write!(f, "<nil>"),
            Value::Opaque(_) => write!(f, "<opaque>"),
            Value::Interface(None) => write!(f, "<nil>"),
            Value::Interface(Some(inner)) => write!(f, "{}", inner),
        }
    }
}

impl From<Literal> for Value {
    fn from(literal: Literal) -> Self {
        match literal {
            Literal::Integer(i) => Value::I64(i),
            Literal::Unsigned(u) => Value::U64(u),
            Literal::Float(x) => Value::F64(x),
            Literal::String(s) => Value::String(s),
        }
    }
}

impl From<&Literal> for Value {
    fn from(literal: &Literal) -> Self { literal.clone().into() }
}
