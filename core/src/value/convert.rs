use super::{Opaque, Value};
use chrono::{DateTime, Utc};
use num_complex::{Complex32, Complex64};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Conversion of a record field into a [`Value`].
///
/// Implemented for the scalar, text, container and timestamp types a record may hold.
/// `Option<T>` becomes an [`Value::Interface`], so `None` is an uninitialized wrapper.
pub trait ToValue {
    fn to_value(&self) -> Value;
}

macro_rules! scalar_value {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl ToValue for $ty {
                fn to_value(&self) -> Value { Value::$variant(*self) }
            }

            impl From<$ty> for Value {
                fn from(value: $ty) -> Self { Value::$variant(value) }
            }
        )*
    };
}

scalar_value! {
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
    Complex32 => C64,
    Complex64 => C128,
    bool => Bool,
    DateTime<Utc> => Timestamp,
}

impl ToValue for Value {
    fn to_value(&self) -> Value { self.clone() }
}

impl ToValue for String {
    fn to_value(&self) -> Value { Value::String(self.clone()) }
}

impl ToValue for str {
    fn to_value(&self) -> Value { Value::String(self.to_string()) }
}

impl ToValue for char {
    fn to_value(&self) -> Value { Value::String(self.to_string()) }
}

impl ToValue for Opaque {
    fn to_value(&self) -> Value { Value::Opaque(self.clone()) }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value { (**self).to_value() }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value { (**self).to_value() }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value { Value::Interface(self.as_ref().map(|inner| Box::new(inner.to_value()))) }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value { Value::Seq(self.iter().map(ToValue::to_value).collect()) }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value { Value::Seq(self.iter().map(ToValue::to_value).collect()) }
}

impl<T: ToValue, const N: usize> ToValue for [T; N] {
    fn to_value(&self) -> Value { Value::Array(self.iter().map(ToValue::to_value).collect()) }
}

impl<K: ToValue, V: ToValue, S: BuildHasher> ToValue for HashMap<K, V, S> {
    fn to_value(&self) -> Value { Value::Map(self.iter().map(|(k, v)| (k.to_value(), v.to_value())).collect()) }
}

impl<K: ToValue, V: ToValue> ToValue for BTreeMap<K, V> {
    fn to_value(&self) -> Value { Value::Map(self.iter().map(|(k, v)| (k.to_value(), v.to_value())).collect()) }
}

impl ToValue for serde_json::Value {
    fn to_value(&self) -> Value { Value::from(self) }
}

impl From<String> for Value {
    fn from(value: String) -> Self { Value::String(value) }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self { Value::String(value.to_string()) }
}

impl From<Opaque> for Value {
    fn from(value: Opaque) -> Self { Value::Opaque(value) }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self { Value::Seq(items.into_iter().map(Into::into).collect()) }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Value {
    fn from(items: [T; N]) -> Self { Value::Array(items.into_iter().map(Into::into).collect()) }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self { Value::Interface(value.map(|inner| Box::new(inner.into()))) }
}

/// JSON `null` is an uninitialized wrapper; integers keep their sign, objects become string-keyed mappings.
impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Interface(None),
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::I64(i)
                } else if let Some(u) = n.as_u64() {
                    Value::U64(u)
                } else {
                    Value::F64(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::String(s.clone()),
            serde_json::Value::Array(items) => Value::Seq(items.iter().map(Value::from).collect()),
            serde_json::Value::Object(fields) => {
                Value::Map(fields.iter().map(|(k, v)| (Value::String(k.clone()), Value::from(v))).collect())
            }
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self { Value::from(&json) }
}
