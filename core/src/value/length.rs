use super::Value;

impl Value {
    /// Element count of text (in bytes), sequences and mappings. Other kinds have no length.
    pub fn element_count(&self) -> Option<usize> {
        match self {
            Value::String(s) => Some(s.len()),
            Value::Seq(items) | Value::Array(items) => Some(items.len()),
            Value::Map(entries) => Some(entries.len()),
            Value::Interface(Some(inner)) => inner.element_count(),
            _ => None,
        }
    }
}
