//! Comparison of timestamps against thresholds given as epoch integers, text, or timestamps.

use crate::compare::Relation;
use crate::hint::Hint;
use crate::value::{Value, ValueType};
use chrono::{DateTime, Utc};

/// The resolution a timestamp rule compares at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granularity {
    /// `date:*` rules: whole seconds since the Unix epoch
    Seconds,
    /// `time:*` rules: nanoseconds since the Unix epoch
    Nanos,
}

/// A timestamp threshold, normalized when the rule is built.
#[derive(Debug, Clone, PartialEq)]
pub enum ThresholdTime {
    EpochSeconds(i64),
    EpochNanos(i64),
    /// RFC 3339 text for `date:*`, a decimal nanosecond count for `time:*`. Parsed at evaluation.
    Text(String),
    Instant(DateTime<Utc>),
    Unsupported(ValueType),
}

impl ThresholdTime {
    pub fn normalize(threshold: Value, granularity: Granularity) -> Self {
        let epoch = |n: i64| match granularity {
            Granularity::Seconds => ThresholdTime::EpochSeconds(n),
            Granularity::Nanos => ThresholdTime::EpochNanos(n),
        };
        match threshold {
            Value::I8(n) => epoch(n as i64),
            Value::I16(n) => epoch(n as i64),
            Value::I32(n) => epoch(n as i64),
            Value::I64(n) => epoch(n),
            Value::Isize(n) => epoch(n as i64),
            Value::String(s) => ThresholdTime::Text(s),
            Value::Timestamp(t) => ThresholdTime::Instant(t),
            Value::Interface(Some(inner)) => ThresholdTime::normalize(*inner, granularity),
            other => ThresholdTime::Unsupported(ValueType::of(&other)),
        }
    }

    /// The threshold as an epoch key at `granularity`, paired with its canonical form for hints.
    fn resolve(&self, granularity: Granularity) -> Result<(i64, Value), Hint> {
        match (self, granularity) {
            (ThresholdTime::Unsupported(_), _) => Err(Hint::UnsupportedType),

            (ThresholdTime::EpochSeconds(secs), Granularity::Seconds) => {
                let instant = DateTime::from_timestamp(*secs, 0).ok_or(Hint::InvalidRule)?;
                Ok((*secs, Value::Timestamp(instant)))
            }
            (ThresholdTime::EpochSeconds(secs), Granularity::Nanos) => {
                let nanos = secs.checked_mul(1_000_000_000).ok_or(Hint::InvalidRule)?;
                Ok((nanos, Value::I64(nanos)))
            }
            (ThresholdTime::EpochNanos(nanos), Granularity::Seconds) => {
                let instant = DateTime::from_timestamp_nanos(*nanos);
                Ok((instant.timestamp(), Value::Timestamp(instant)))
            }
            (ThresholdTime::EpochNanos(nanos), Granularity::Nanos) => Ok((*nanos, Value::I64(*nanos))),

            (ThresholdTime::Text(text), Granularity::Seconds) => {
                let instant = DateTime::parse_from_rfc3339(text.trim()).map_err(|_| Hint::InvalidRule)?.with_timezone(&Utc);
                Ok((instant.timestamp(), Value::Timestamp(instant)))
            }
            (ThresholdTime::Text(text), Granularity::Nanos) => {
                let nanos = text.trim().parse::<i64>().map_err(|_| Hint::InvalidRule)?;
                Ok((nanos, Value::I64(nanos)))
            }

            (ThresholdTime::Instant(instant), Granularity::Seconds) => Ok((instant.timestamp(), Value::Timestamp(*instant))),
            (ThresholdTime::Instant(instant), Granularity::Nanos) => {
                let nanos = instant.timestamp_nanos_opt().ok_or(Hint::InvalidRule)?;
                Ok((nanos, Value::I64(nanos)))
            }
        }
    }
}

fn epoch_key(instant: &DateTime<Utc>, granularity: Granularity) -> Option<i64> {
    match granularity {
        Granularity::Seconds => Some(instant.timestamp()),
        Granularity::Nanos => instant.timestamp_nanos_opt(),
    }
}

/// Check a timestamp `value` against `threshold`. Returns the hint on failure.
pub fn check(relation: Relation, granularity: Granularity, threshold: &ThresholdTime, value: &Value) -> Option<Hint> {
    let (limit, canonical) = match threshold.resolve(granularity) {
        Ok(resolved) => resolved,
        Err(hint) => return Some(hint),
    };
    let Some(instant) = value.as_timestamp() else { return Some(Hint::refusing(value)) };
    let Some(key) = epoch_key(instant, granularity) else { return Some(Hint::InvalidValue) };

    let holds = match relation {
        Relation::AtLeast => key >= limit,
        Relation::AtMost => key <= limit,
        Relation::Equal => key == limit,
    };
    if holds {
        None
    } else {
        Some(Hint::for_relation(relation, canonical))
    }
}
