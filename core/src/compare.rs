//! Ordered comparison across every numeric kind.
//!
//! Each side is classified as signed, unsigned, float or complex and widened within its own kind
//! (sign-extension to `i64`, zero-extension to `u64`, `f32` to `f64`). Signed/unsigned pairs are
//! never cast into each other blindly: a negative signed operand is ordered below every unsigned
//! one, and only non-negative values are promoted to `u64`.

use crate::value::Value;

/// The relation a value must hold against a threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    /// `value >= threshold`
    AtLeast,
    /// `value <= threshold`
    AtMost,
    /// `value == threshold`
    Equal,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Number {
    Signed(i64),
    Unsigned(u64),
    Float(f64),
    Complex(f64, f64),
}

impl Number {
    fn classify(value: &Value) -> Option<Number> {
        Some(match value {
            Value::I8(n) => Number::Signed(*n as i64),
            Value::I16(n) => Number::Signed(*n as i64),
            Value::I32(n) => Number::Signed(*n as i64),
            Value::I64(n) => Number::Signed(*n),
            Value::Isize(n) => Number::Signed(*n as i64),
            Value::U8(n) => Number::Unsigned(*n as u64),
            Value::U16(n) => Number::Unsigned(*n as u64),
            Value::U32(n) => Number::Unsigned(*n as u64),
            Value::U64(n) => Number::Unsigned(*n),
            Value::Usize(n) => Number::Unsigned(*n as u64),
            Value::F32(x) => Number::Float(*x as f64),
            Value::F64(x) => Number::Float(*x),
            Value::C64(c) => Number::Complex(c.re as f64, c.im as f64),
            Value::C128(c) => Number::Complex(c.re, c.im),
            _ => return None,
        })
    }
}

fn holds<T: PartialOrd>(relation: Relation, value: T, threshold: T) -> bool {
    match relation {
        Relation::AtLeast => value >= threshold,
        Relation::AtMost => value <= threshold,
        Relation::Equal => value == threshold,
    }
}

/// Whether `value` stands in `relation` to `threshold`.
///
/// Non-numeric operands and integer/float pairs never satisfy any relation. Complex operands
/// support equality only.
pub fn compare(relation: Relation, threshold: &Value, value: &Value) -> bool {
    match (Number::classify(threshold), Number::classify(value)) {
        (Some(threshold), Some(value)) => compare_numbers(relation, threshold, value),
        _ => false,
    }
}

fn compare_numbers(relation: Relation, threshold: Number, value: Number) -> bool {
    match (threshold, value) {
        (Number::Complex(tr, ti), Number::Complex(vr, vi)) => relation == Relation::Equal && tr == vr && ti == vi,
        (Number::Complex(..), _) | (_, Number::Complex(..)) => false,

        (Number::Signed(t), Number::Signed(v)) => holds(relation, v, t),
        (Number::Unsigned(t), Number::Unsigned(v)) => holds(relation, v, t),
        (Number::Float(t), Number::Float(v)) => holds(relation, v, t),

        // A negative value sits below every unsigned threshold.
        (Number::Unsigned(t), Number::Signed(v)) => {
            if v < 0 {
                relation == Relation::AtMost
            } else {
                holds(relation, v as u64, t)
            }
        }
        // Every unsigned value sits above a negative threshold.
        (Number::Signed(t), Number::Unsigned(v)) => {
            if t < 0 {
                relation == Relation::AtLeast
            } else {
                holds(relation, v, t as u64)
            }
        }

        (Number::Float(_), _) | (_, Number::Float(_)) => false,
    }
}
