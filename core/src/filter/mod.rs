//! Filters: ordered field rules plus record-level quorums, evaluated against a [`Record`].

mod compiled;
mod spec;

pub use compiled::CompiledFilter;
pub use spec::{EntrySpec, FilterSpec};

use crate::hint::Hint;
use crate::options::{Options, QuorumCredit};
use crate::record::{Record, Schema};
use crate::rule::Rule;
use crate::value::Value;
use std::fmt;
use tracing::{debug, trace};

/// A rule bound to a field.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterItem {
    pub field: String,
    pub rule: Rule,
    /// Skip the rule when the field holds its type's default
    pub optional: bool,
}

impl FilterItem {
    pub fn new(field: impl Into<String>, rule: Rule) -> Self { Self { field: field.into(), rule, optional: false } }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// A failed entry: the field's external name and why it failed. Quorum failures carry no field.
#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub field: Option<String>,
    pub hint: Hint,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{} {}", field, self.hint),
            None => write!(f, "{}", self.hint),
        }
    }
}

/// An ordered list of field rules and `fields:min` quorums.
///
/// ```
/// use verity_core::{Filter, Rule, Value};
/// use std::collections::HashMap;
///
/// let filter = Filter::new().field("Age", Rule::min(18));
/// let record: HashMap<String, Value> = [("Age".to_string(), Value::I32(16))].into_iter().collect();
/// assert_eq!(filter.validate(&record), vec!["Age must be at least 18"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    items: Vec<FilterItem>,
    quorums: Vec<usize>,
    options: Options,
}

impl Filter {
    pub fn new() -> Self { Self::default() }

    pub fn field(self, name: impl Into<String>, rule: Rule) -> Self { self.item(FilterItem::new(name, rule)) }

    pub fn optional(self, name: impl Into<String>, rule: Rule) -> Self { self.item(FilterItem::new(name, rule).optional()) }

    pub fn item(mut self, item: FilterItem) -> Self {
        self.items.push(item);
        self
    }

    /// Require at least `min` entries to pass (`fields:min`).
    pub fn quorum(mut self, min: usize) -> Self {
        self.quorums.push(min);
        self
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn items(&self) -> &[FilterItem] { &self.items }

    pub fn quorums(&self) -> &[usize] { &self.quorums }

    pub fn options(&self) -> &Options { &self.options }

    pub fn violations<R: Record + ?Sized>(&self, record: &R) -> Vec<Violation> {
        let mut tally = Tally::new(&self.options);
        for item in &self.items {
            let outcome = tally.check(item, record.value(&item.field));
            tally.record(outcome, || record.external_name(&item.field).into_owned());
        }
        tally.finish(&self.quorums)
    }

    /// Violations rendered as `"<field> <hint>"`.
    pub fn validate<R: Record + ?Sized>(&self, record: &R) -> Vec<String> {
        self.violations(record).iter().map(ToString::to_string).collect()
    }

    pub fn is_valid<R: Record + ?Sized>(&self, record: &R) -> bool { self.violations(record).is_empty() }

    /// Bind every entry to a field index of `R`. Entries naming fields `R` does not have are dropped.
    pub fn compile<R: Schema>(&self) -> CompiledFilter<R> { CompiledFilter::new(self) }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Outcome {
    Missing,
    Skipped,
    Passed,
    Failed(Hint),
}

/// Running state of one filter evaluation.
pub(crate) struct Tally<'f> {
    options: &'f Options,
    passed: usize,
    violations: Vec<Violation>,
}

impl<'f> Tally<'f> {
    pub(crate) fn new(options: &'f Options) -> Self { Self { options, passed: 0, violations: Vec::new() } }

    pub(crate) fn check(&self, item: &FilterItem, value: Option<Value>) -> Outcome {
        let Some(value) = value else {
            debug!("field {} not present, skipping", item.field);
            return Outcome::Missing;
        };
        if item.optional && value.is_zero() {
            debug!("optional field {} is zero, skipping", item.field);
            return Outcome::Skipped;
        }
        let outcome = match item.rule.evaluate(&value, self.options) {
            None => Outcome::Passed,
            Some(hint) => Outcome::Failed(hint),
        };
        trace!("{} [{}] on {}: {:?}", item.field, item.rule, value, outcome);
        outcome
    }

    pub(crate) fn record(&mut self, outcome: Outcome, external_name: impl FnOnce() -> String) {
        match outcome {
            Outcome::Missing => {}
            Outcome::Skipped => {
                if self.options.skipped_optional == QuorumCredit::Passed {
                    self.passed += 1;
                }
            }
            Outcome::Passed => self.passed += 1,
            Outcome::Failed(hint) => self.violations.push(Violation { field: Some(external_name()), hint }),
        }
    }

    pub(crate) fn finish(mut self, quorums: &[usize]) -> Vec<Violation> {
        for &min in quorums {
            if self.passed < min {
                debug!("quorum not met: {} of {} entries passed", self.passed, min);
                self.violations.push(Violation { field: None, hint: Hint::FieldsMin(min) });
            } else {
                debug!("quorum met: {} of {} entries passed", self.passed, min);
            }
        }
        self.violations
    }
}
