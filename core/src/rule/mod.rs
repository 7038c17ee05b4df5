//! Typed validation rules and the dispatcher that checks a value against them.

mod each;
pub(crate) mod ingest;

pub use each::EachRule;

use crate::compare::{compare, Relation};
use crate::hint::Hint;
use crate::options::{Options, UnknownOperatorPolicy};
use crate::pattern::Pattern;
use crate::timestamp::{self, Granularity, ThresholdTime};
use crate::value::{Value, Zeroness};
use chrono::Datelike;
use std::fmt;
use tracing::debug;

/// A condition on a single field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Rule {
    /// The value must differ from its type's default
    NonZero,
    Min(Value),
    Max(Value),
    Eq(Value),
    /// Inclusive bounds, neither of which may be zero
    Range(Value, Value),
    Match(Pattern),
    /// The UTC calendar year of a timestamp
    Year(Value),
    /// Timestamp comparison at second resolution
    Date(Relation, ThresholdTime),
    /// Timestamp comparison at nanosecond resolution
    Time(Relation, ThresholdTime),
    Each(EachRule),
    /// Rules applied in order; the first failure is reported
    Group(Vec<Rule>),
    /// A clause whose operator is outside the known vocabulary, kept as written with its operand.
    /// See [`UnknownOperatorPolicy`].
    Unknown(String),
}

impl Rule {
    pub fn non_zero() -> Self { Rule::NonZero }

    pub fn min(threshold: impl Into<Value>) -> Self { Rule::Min(threshold.into()) }

    pub fn max(threshold: impl Into<Value>) -> Self { Rule::Max(threshold.into()) }

    pub fn equal(threshold: impl Into<Value>) -> Self { Rule::Eq(threshold.into()) }

    pub fn range(lo: impl Into<Value>, hi: impl Into<Value>) -> Self { Rule::Range(lo.into(), hi.into()) }

    pub fn pattern(source: impl Into<String>) -> Self { Rule::Match(Pattern::new(source)) }

    pub fn year(year: impl Into<Value>) -> Self { Rule::Year(year.into()) }

    pub fn date(relation: Relation, threshold: impl Into<Value>) -> Self {
        Rule::Date(relation, ThresholdTime::normalize(threshold.into(), Granularity::Seconds))
    }

    pub fn date_min(threshold: impl Into<Value>) -> Self { Rule::date(Relation::AtLeast, threshold) }

    pub fn date_max(threshold: impl Into<Value>) -> Self { Rule::date(Relation::AtMost, threshold) }

    pub fn date_eq(threshold: impl Into<Value>) -> Self { Rule::date(Relation::Equal, threshold) }

    pub fn time(relation: Relation, threshold: impl Into<Value>) -> Self {
        Rule::Time(relation, ThresholdTime::normalize(threshold.into(), Granularity::Nanos))
    }

    pub fn time_min(threshold: impl Into<Value>) -> Self { Rule::time(Relation::AtLeast, threshold) }

    pub fn time_max(threshold: impl Into<Value>) -> Self { Rule::time(Relation::AtMost, threshold) }

    pub fn time_eq(threshold: impl Into<Value>) -> Self { Rule::time(Relation::Equal, threshold) }

    pub fn each(inner: EachRule) -> Self { Rule::Each(inner) }

    pub fn each_min(threshold: impl Into<Value>) -> Self { Rule::Each(EachRule::Min(threshold.into())) }

    pub fn each_max(threshold: impl Into<Value>) -> Self { Rule::Each(EachRule::Max(threshold.into())) }

    pub fn each_equal(threshold: impl Into<Value>) -> Self { Rule::Each(EachRule::Eq(threshold.into())) }

    pub fn each_range(lo: impl Into<Value>, hi: impl Into<Value>) -> Self { Rule::Each(EachRule::Range(lo.into(), hi.into())) }

    pub fn each_pattern(source: impl Into<String>) -> Self { Rule::Each(EachRule::Match(Pattern::new(source))) }

    pub fn group(rules: impl IntoIterator<Item = Rule>) -> Self { Rule::Group(rules.into_iter().collect()) }

    /// Check `value` with default [`Options`]. `None` means the value passes.
    pub fn check(&self, value: &Value) -> Option<Hint> { self.evaluate(value, &Options::default()) }

    pub fn evaluate(&self, value: &Value, options: &Options) -> Option<Hint> {
        match self {
            Rule::NonZero => match value.zeroness() {
                Zeroness::NonZero => None,
                Zeroness::Zero => Some(Hint::Empty),
                Zeroness::Invalid => Some(Hint::InvalidValue),
            },
            Rule::Group(rules) => rules.iter().find_map(|rule| rule.evaluate(value, options)),
            Rule::Unknown(clause) => match options.unknown_operator {
                UnknownOperatorPolicy::Reject => Some(Hint::InvalidRule),
                UnknownOperatorPolicy::Ignore => {
                    debug!("ignoring unknown rule {:?}", clause);
                    None
                }
            },
            rule => match unwrap_interface(value) {
                Ok(value) => rule.check_concrete(value),
                Err(hint) => Some(hint),
            },
        }
    }

    fn check_concrete(&self, value: &Value) -> Option<Hint> {
        match self {
            Rule::Min(threshold) => check_relation(Relation::AtLeast, threshold, value),
            Rule::Max(threshold) => check_relation(Relation::AtMost, threshold, value),
            Rule::Eq(threshold) => check_relation(Relation::Equal, threshold, value),
            Rule::Range(lo, hi) => check_range(lo, hi, value),
            Rule::Match(pattern) => pattern.check(value),
            Rule::Year(year) => check_year(year, value),
            Rule::Date(relation, threshold) => timestamp::check(*relation, Granularity::Seconds, threshold, value),
            Rule::Time(relation, threshold) => timestamp::check(*relation, Granularity::Nanos, threshold, value),
            Rule::Each(inner) => inner.check(value),
            Rule::NonZero | Rule::Group(_) | Rule::Unknown(_) => None,
        }
    }
}

/// Strip interface wrappers. An uninitialized wrapper at any depth is an invalid value.
pub(crate) fn unwrap_interface(value: &Value) -> Result<&Value, Hint> {
    match value {
        Value::Interface(None) => Err(Hint::InvalidValue),
        Value::Interface(Some(inner)) => unwrap_interface(inner),
        other => Ok(other),
    }
}

/// The quantity `min`/`max`/`eq`/`range` compare: the value itself when numeric, else its element count.
fn magnitude(value: &Value) -> Option<Value> {
    if value.is_numeric() {
        Some(value.clone())
    } else {
        value.element_count().map(Value::Usize)
    }
}

pub(crate) fn is_range_bound(bound: &Value) -> bool { bound.is_numeric() && !bound.is_zero() }

pub(crate) fn check_relation(relation: Relation, threshold: &Value, value: &Value) -> Option<Hint> {
    if !threshold.is_numeric() {
        return Some(Hint::InvalidRule);
    }
    let Some(magnitude) = magnitude(value) else { return Some(Hint::refusing(value)) };
    if compare(relation, threshold, &magnitude) {
        None
    } else {
        Some(Hint::for_relation(relation, threshold.clone()))
    }
}

pub(crate) fn check_range(lo: &Value, hi: &Value, value: &Value) -> Option<Hint> {
    if !is_range_bound(lo) || !is_range_bound(hi) {
        return Some(Hint::InvalidRule);
    }
    let Some(magnitude) = magnitude(value) else { return Some(Hint::refusing(value)) };
    if compare(Relation::AtLeast, lo, &magnitude) && compare(Relation::AtMost, hi, &magnitude) {
        None
    } else {
        Some(Hint::Range(lo.clone(), hi.clone()))
    }
}

fn check_year(year: &Value, value: &Value) -> Option<Hint> {
    if !year.is_integer() {
        return Some(Hint::InvalidRule);
    }
    let Some(instant) = value.as_timestamp() else { return Some(Hint::refusing(value)) };
    if compare(Relation::Equal, year, &Value::I32(instant.year())) {
        None
    } else {
        Some(Hint::Eq(year.clone()))
    }
}

impl fmt::Display for ThresholdTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThresholdTime::EpochSeconds(n) | ThresholdTime::EpochNanos(n) => write!(f, "{}", n),
            ThresholdTime::Text(text) => write!(f, "{}", verity_rules::quote(text)),
            ThresholdTime::Instant(_) => write!(f, "{}", verity_rules::quote(&Value::from(self.clone()).to_string())),
            ThresholdTime::Unsupported(kind) => write!(f, "<{:?}>", kind),
        }
    }
}

impl From<ThresholdTime> for Value {
    fn from(threshold: ThresholdTime) -> Self {
        match threshold {
            ThresholdTime::EpochSeconds(n) | ThresholdTime::EpochNanos(n) => Value::I64(n),
            ThresholdTime::Text(text) => Value::String(text),
            ThresholdTime::Instant(instant) => Value::Timestamp(instant),
            ThresholdTime::Unsupported(_) => Value::Interface(None),
        }
    }
}

fn relation_token(relation: &Relation) -> &'static str {
    match relation {
        Relation::AtLeast => "min",
        Relation::AtMost => "max",
        Relation::Equal => "eq",
    }
}

/// A numeric threshold as a rule literal. Floats keep their decimal point or exponent so they
/// parse back as floats.
struct Literal<'a>(&'a Value);

impl fmt::Display for Literal<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::F32(x) => write!(f, "{:?}", x),
            Value::F64(x) => write!(f, "{:?}", x),
            Value::String(text) => write!(f, "{}", verity_rules::quote(text)),
            other => write!(f, "{}", other),
        }
    }
}

/// `time:*` reads text as a nanosecond count, so an instant is written as one. Instants outside
/// the nanosecond range stay RFC 3339 text, which is an invalid rule either way.
struct TimeThreshold<'a>(&'a ThresholdTime);

impl fmt::Display for TimeThreshold<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            ThresholdTime::Instant(instant) => match instant.timestamp_nanos_opt() {
                Some(nanos) => write!(f, "{}", nanos),
                None => write!(f, "{}", self.0),
            },
            other => write!(f, "{}", other),
        }
    }
}

/// The textual form accepted by [`Rule::parse`].
impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::NonZero => write!(f, "NonZero"),
            Rule::Min(n) => write!(f, "min {}", Literal(n)),
            Rule::Max(n) => write!(f, "max {}", Literal(n)),
            Rule::Eq(n) => write!(f, "eq {}", Literal(n)),
            Rule::Range(lo, hi) => write!(f, "range [{},{}]", Literal(lo), Literal(hi)),
            Rule::Match(pattern) => write!(f, "match {}", verity_rules::quote(pattern.source())),
            Rule::Year(n) => write!(f, "year {}", Literal(n)),
            Rule::Date(relation, threshold) => write!(f, "date:{} {}", relation_token(relation), threshold),
            Rule::Time(relation, threshold) => write!(f, "time:{} {}", relation_token(relation), TimeThreshold(threshold)),
            Rule::Each(EachRule::Min(n)) => write!(f, "each:min {}", Literal(n)),
            Rule::Each(EachRule::Max(n)) => write!(f, "each:max {}", Literal(n)),
            Rule::Each(EachRule::Eq(n)) => write!(f, "each:eq {}", Literal(n)),
            Rule::Each(EachRule::Range(lo, hi)) => write!(f, "each:range [{},{}]", Literal(lo), Literal(hi)),
            Rule::Each(EachRule::Match(pattern)) => write!(f, "each:match {}", verity_rules::quote(pattern.source())),
            Rule::Group(rules) => {
                for (i, rule) in rules.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", rule)?;
                }
                Ok(())
            }
            Rule::Unknown(clause) => write!(f, "{}", clause),
        }
    }
}
