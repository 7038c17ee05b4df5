use super::{check_range, check_relation, is_range_bound, unwrap_interface};
use crate::compare::Relation;
use crate::hint::Hint;
use crate::pattern::Pattern;
use crate::value::Value;

/// A rule lifted over every element of a sequence or every value of a mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum EachRule {
    Min(Value),
    Max(Value),
    Eq(Value),
    Range(Value, Value),
    Match(Pattern),
}

impl EachRule {
    /// A malformed threshold is reported whatever the outer value holds.
    fn is_well_formed(&self) -> bool {
        match self {
            EachRule::Min(n) | EachRule::Max(n) | EachRule::Eq(n) => n.is_numeric(),
            EachRule::Range(lo, hi) => is_range_bound(lo) && is_range_bound(hi),
            EachRule::Match(pattern) => pattern.is_valid(),
        }
    }

    fn check_element(&self, element: &Value) -> Option<Hint> {
        let element = match unwrap_interface(element) {
            Ok(element) => element,
            Err(hint) => return Some(hint),
        };
        match self {
            EachRule::Min(n) => check_relation(Relation::AtLeast, n, element),
            EachRule::Max(n) => check_relation(Relation::AtMost, n, element),
            EachRule::Eq(n) => check_relation(Relation::Equal, n, element),
            EachRule::Range(lo, hi) => check_range(lo, hi, element),
            EachRule::Match(pattern) => pattern.check(element),
        }
    }

    pub(crate) fn check(&self, outer: &Value) -> Option<Hint> {
        if !self.is_well_formed() {
            return Some(Hint::InvalidRule);
        }
        let hint = match outer {
            Value::Seq(items) | Value::Array(items) => items.iter().find_map(|item| self.check_element(item)),
            Value::Map(entries) => entries.iter().find_map(|(_, value)| self.check_element(value)),
            // Text has no elements to visit: match the text itself, compare its byte length otherwise.
            Value::String(text) => match self {
                EachRule::Match(_) if text.is_empty() => None,
                EachRule::Match(_) => self.check_element(outer),
                _ => self.check_element(&Value::Usize(text.len())),
            },
            other => return Some(Hint::refusing(other)),
        };
        hint.map(Hint::for_each)
    }
}
