//! Hint catalogue.
//!
//! | Hint | Text |
//! |---|---|
//! | `Empty` | `is empty` |
//! | `NotValid` | `is not valid` |
//! | `InvalidValue` | `has invalid value` |
//! | `InvalidRule` | `has invalid rule` |
//! | `UnsupportedType` | `has unsupported type` |
//! | `Min(n)` | `must be at least n` |
//! | `Max(n)` | `must be at most n` |
//! | `Eq(n)` | `must be equal to n` |
//! | `Range(lo, hi)` | `must be in the range lo..hi` |
//! | `EachMin(n)` | `each element must be at least n` |
//! | `EachMax(n)` | `each element must be at most n` |
//! | `EachEq(n)` | `each element must be equal to n` |
//! | `EachRange(lo, hi)` | `each element must be in the range lo..hi` |
//! | `EachMatch` | `each element must match the pattern` |
//! | `FieldsMin(n)` | `must contain at least n valid fields` |

use crate::compare::Relation;
use crate::value::Value;
use std::fmt;

pub const MSG_EMPTY: &str = "is empty";
pub const MSG_NOT_VALID: &str = "is not valid";
pub const MSG_INVALID_VALUE: &str = "has invalid value";
pub const MSG_INVALID_RULE: &str = "has invalid rule";
pub const MSG_UNSUPPORTED_TYPE: &str = "has unsupported type";
pub const MSG_EACH_MATCH: &str = "each element must match the pattern";

/// Why a rule did not pass.
#[derive(Debug, Clone, PartialEq)]
pub enum Hint {
    Empty,
    NotValid,
    InvalidValue,
    InvalidRule,
    UnsupportedType,
    Min(Value),
    Max(Value),
    Eq(Value),
    Range(Value, Value),
    EachMin(Value),
    EachMax(Value),
    EachEq(Value),
    EachRange(Value, Value),
    EachMatch,
    FieldsMin(usize),
}

impl Hint {
    pub(crate) fn for_relation(relation: Relation, threshold: Value) -> Hint {
        match relation {
            Relation::AtLeast => Hint::Min(threshold),
            Relation::AtMost => Hint::Max(threshold),
            Relation::Equal => Hint::Eq(threshold),
        }
    }

    /// The hint for a value a rule cannot inspect: uninitialized handles are invalid, anything else is
    /// a kind the rule refuses.
    pub(crate) fn refusing(value: &Value) -> Hint {
        if value.is_uninitialized() {
            Hint::InvalidValue
        } else {
            Hint::UnsupportedType
        }
    }

    /// Re-express an element failure in the vocabulary of `each:`.
    pub(crate) fn for_each(self) -> Hint {
        match self {
            Hint::Min(n) => Hint::EachMin(n),
            Hint::Max(n) => Hint::EachMax(n),
            Hint::Eq(n) => Hint::EachEq(n),
            Hint::Range(lo, hi) => Hint::EachRange(lo, hi),
            Hint::NotValid | Hint::Empty => Hint::EachMatch,
            other => other,
        }
    }
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hint::Empty => write!(f, "{}", MSG_EMPTY),
            Hint::NotValid => write!(f, "{}", MSG_NOT_VALID),
            Hint::InvalidValue => write!(f, "{}", MSG_INVALID_VALUE),
            Hint::InvalidRule => write!(f, "{}", MSG_INVALID_RULE),
            Hint::UnsupportedType => write!(f, "{}", MSG_UNSUPPORTED_TYPE),
            Hint::Min(n) => write!(f, "must be at least {}", n),
            Hint::Max(n) => write!(f, "must be at most {}", n),
            Hint::Eq(n) => write!(f, "must be equal to {}", n),
            Hint::Range(lo, hi) => write!(f, "must be in the range {}..{}", lo, hi),
            Hint::EachMin(n) => write!(f, "each element must be at least {}", n),
            Hint::EachMax(n) => write!(f, "each element must be at most {}", n),
            Hint::EachEq(n) => write!(f, "each element must be equal to {}", n),
            Hint::EachRange(lo, hi) => write!(f, "each element must be in the range {}..{}", lo, hi),
            Hint::EachMatch => write!(f, "{}", MSG_EACH_MATCH),
            Hint::FieldsMin(n) => write!(f, "must contain at least {} valid fields", n),
        }
    }
}
