//! Rule evaluation engine for Verity.
//!
//! A [`Filter`] is an ordered list of field-bound [`Rule`]s plus optional `fields:min` quorums.
//! Checking a [`Record`] against it yields [`Violation`]s, each rendering as
//! `"<field> <hint>"`, e.g. `Age must be at least 18`.

pub mod compare;
pub mod error;
pub mod filter;
pub mod hint;
pub mod options;
pub mod pattern;
pub mod record;
pub mod rule;
pub mod timestamp;
pub mod value;

pub use compare::Relation;
pub use error::RuleError;
pub use filter::{CompiledFilter, EntrySpec, Filter, FilterItem, FilterSpec, Violation};
pub use hint::Hint;
pub use options::{Options, QuorumCredit, UnknownOperatorPolicy};
pub use record::{FieldDescriptor, Record, Schema};
pub use rule::{EachRule, Rule};
pub use value::{Opaque, ToValue, Value, ValueType, Zeroness};

pub use verity_rules as rules;

#[cfg(test)]
#[ctor::ctor]
fn init_tracing() { tracing_subscriber::fmt().with_max_level(tracing::Level::DEBUG).with_test_writer().init(); }
