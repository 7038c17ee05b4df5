//! # Verity
//!
//! Declarative validation for records: describe what each field must satisfy, then ask a
//! [`Filter`] which fields of a record fail and why.
//!
//! ## Key Features
//!
//! - **Typed rules**: `NonZero`, `min`, `max`, `eq`, `range`, `match`, `year`, `date:*`, `time:*`
//!   and the `each:*` forms that apply a rule to every element of a sequence or mapping
//! - **Length duality**: text, sequences and mappings compare their length, numbers their value
//! - **Quorums**: `fields:min N` requires a minimum number of passing entries
//! - **Textual and JSON forms**: rules parse from strings, filters from JSON
//! - **Derived records**: `#[derive(Record)]` reports hints under serde-renamed field names
//!
//! ## Example
//!
//! ```rust
//! # #[cfg(feature = "derive")]
//! # fn main() -> Result<(), verity::RuleError> {
//! use verity::{Filter, Record, Rule};
//!
//! #[derive(Record)]
//! struct Signup {
//!     age: u8,
//!     phone: String,
//! }
//!
//! let filter = Filter::new()
//!     .field("age", Rule::min(18))
//!     .field("phone", Rule::parse(r#"match "^\+38\d{10}$""#)?);
//!
//! let signup = Signup { age: 16, phone: "+38(000)123-45-67".into() };
//! assert_eq!(filter.validate(&signup), vec!["age must be at least 18", "phone is not valid"]);
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "derive"))]
//! # fn main() {}
//! ```

pub use verity_core as core;
pub use verity_rules as rules;

// Re-export commonly used types
pub use verity_core::{
    compare, error, filter, hint, options, pattern, record, rule, timestamp, value, CompiledFilter, EachRule, EntrySpec, FieldDescriptor,
    Filter, FilterItem, FilterSpec, Hint, Opaque, Options, QuorumCredit, Record, Relation, Rule, RuleError, Schema, ToValue,
    UnknownOperatorPolicy, Value, ValueType, Violation, Zeroness,
};

// Re-export the derive macro
#[cfg(feature = "derive")]
pub use verity_derive::*;

/// Check a JSON object against a filter given in its JSON form.
///
/// ```rust
/// let hints = verity::validate_json(
///     r#"[{ "field": "Age", "rule": "min 18" }]"#,
///     &serde_json::json!({ "Age": 16 }),
/// )?;
/// assert_eq!(hints, vec!["Age must be at least 18"]);
/// # Ok::<(), verity::RuleError>(())
/// ```
pub fn validate_json(filter: &str, record: &serde_json::Value) -> Result<Vec<String>, RuleError> {
    let filter = Filter::from_json(filter)?;
    tracing::debug!("validating json record against {} entries", filter.items().len());
    Ok(filter.validate(record))
}
