//! Field lookup on the records a filter validates.

use crate::value::Value;
use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Something whose fields can be looked up by name.
///
/// `name` is the structural field name a filter entry refers to. Hints are reported under
/// [`Record::external_name`], which for derived records follows `#[serde(rename)]`.
pub trait Record {
    /// The current value of field `name`, or `None` when the record has no such field.
    fn value(&self, name: &str) -> Option<Value>;

    fn external_name<'a>(&self, name: &'a str) -> Cow<'a, str> { Cow::Borrowed(name) }
}

/// A field of a record type with a fixed layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    pub name: &'static str,
    pub external_name: &'static str,
}

/// A record type whose fields are known ahead of time, so filters can bind to them by index.
/// Implemented by `#[derive(Record)]`.
pub trait Schema: Record {
    fn fields() -> &'static [FieldDescriptor];

    fn value_at(&self, index: usize) -> Option<Value>;

    fn index_of(name: &str) -> Option<usize> { Self::fields().iter().position(|field| field.name == name) }
}

impl<R: Record + ?Sized> Record for &R {
    fn value(&self, name: &str) -> Option<Value> { (**self).value(name) }

    fn external_name<'a>(&self, name: &'a str) -> Cow<'a, str> { (**self).external_name(name) }
}

impl<S: BuildHasher> Record for HashMap<String, Value, S> {
    fn value(&self, name: &str) -> Option<Value> { self.get(name).cloned() }
}

impl Record for BTreeMap<String, Value> {
    fn value(&self, name: &str) -> Option<Value> { self.get(name).cloned() }
}

impl Record for serde_json::Map<String, serde_json::Value> {
    fn value(&self, name: &str) -> Option<Value> { self.get(name).map(Value::from) }
}

/// Only JSON objects have fields.
impl Record for serde_json::Value {
    fn value(&self, name: &str) -> Option<Value> { self.as_object()?.get(name).map(Value::from) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_maps() {
        let mut record = HashMap::new();
        record.insert("Age".to_string(), Value::I32(21));
        assert_eq!(record.value("Age"), Some(Value::I32(21)));
        assert_eq!(record.value("age"), None);
        assert_eq!(record.external_name("Age"), "Age");

        let record: BTreeMap<String, Value> = [("Tags".to_string(), Value::Seq(vec![]))].into_iter().collect();
        assert_eq!((&record).value("Tags"), Some(Value::Seq(vec![])));
    }

    #[test]
    fn test_json() {
        let record = json!({ "Age": 16, "Phone": null });
        assert_eq!(record.value("Age"), Some(Value::I64(16)));
        assert_eq!(record.value("Phone"), Some(Value::Interface(None)));
        assert_eq!(record.value("Missing"), None);
        assert_eq!(json!([1, 2]).value("Age"), None);
        let object = record.as_object().cloned().unwrap_or_default();
        assert_eq!(object.value("Age"), Some(Value::I64(16)));
    }
}
