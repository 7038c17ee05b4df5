mod common;

use common::record;
use proptest::prelude::*;
use verity::{Filter, Hint, Rule, Value};

const MAX_COLLECTION_LEN: usize = 8;
const MAX_STRING_LEN: usize = 24;

fn signed() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i8>().prop_map(Value::I8),
        any::<i16>().prop_map(Value::I16),
        any::<i32>().prop_map(Value::I32),
        any::<i64>().prop_map(Value::I64),
        any::<isize>().prop_map(Value::Isize),
    ]
}

fn unsigned() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<u8>().prop_map(Value::U8),
        any::<u16>().prop_map(Value::U16),
        any::<u32>().prop_map(Value::U32),
        any::<u64>().prop_map(Value::U64),
        any::<usize>().prop_map(Value::Usize),
    ]
}

fn sized() -> impl Strategy<Value = Value> {
    prop_oneof![
        prop::string::string_regex(&format!("[a-z]{{0,{}}}", MAX_STRING_LEN)).unwrap().prop_map(Value::String),
        prop::collection::vec(any::<i32>().prop_map(Value::I32), 0..=MAX_COLLECTION_LEN).prop_map(Value::Seq),
        prop::collection::vec((any::<u8>().prop_map(Value::U8), any::<bool>().prop_map(Value::Bool)), 0..=MAX_COLLECTION_LEN)
            .prop_map(Value::Map),
    ]
}

fn as_i128(value: &Value) -> i128 {
    match value {
        Value::I8(n) => *n as i128,
        Value::I16(n) => *n as i128,
        Value::I32(n) => *n as i128,
        Value::I64(n) => *n as i128,
        Value::Isize(n) => *n as i128,
        Value::U8(n) => *n as i128,
        Value::U16(n) => *n as i128,
        Value::U32(n) => *n as i128,
        Value::U64(n) => *n as i128,
        Value::Usize(n) => *n as i128,
        other => panic!("not an integer: {other:?}"),
    }
}

fn integer() -> impl Strategy<Value = Value> { prop_oneof![signed(), unsigned()] }

proptest! {
    #[test]
    fn checking_twice_gives_the_same_hint(value in prop_oneof![integer(), sized()], threshold in any::<i32>()) {
        let rule = Rule::group([Rule::non_zero(), Rule::min(threshold), Rule::max(threshold.saturating_add(10))]);
        prop_assert_eq!(rule.check(&value), rule.check(&value));
    }

    #[test]
    fn integer_min_agrees_with_exact_arithmetic(threshold in integer(), value in integer()) {
        let passes = Rule::Min(threshold.clone()).check(&value).is_none();
        prop_assert_eq!(passes, as_i128(&value) >= as_i128(&threshold));
        let passes = Rule::Max(threshold.clone()).check(&value).is_none();
        prop_assert_eq!(passes, as_i128(&value) <= as_i128(&threshold));
        let passes = Rule::Eq(threshold.clone()).check(&value).is_none();
        prop_assert_eq!(passes, as_i128(&value) == as_i128(&threshold));
    }

    #[test]
    fn min_is_monotone(value in integer(), a in any::<i64>(), b in any::<i64>()) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        if Rule::min(high).check(&value).is_none() {
            prop_assert!(Rule::min(low).check(&value).is_none());
        }
    }

    #[test]
    fn sized_values_compare_their_length(value in sized(), threshold in 0usize..=MAX_STRING_LEN) {
        let length = value.element_count().unwrap_or_default();
        prop_assert_eq!(Rule::min(threshold).check(&value).is_none(), length >= threshold);
        prop_assert_eq!(Rule::max(threshold).check(&value).is_none(), length <= threshold);
    }

    #[test]
    fn non_positive_signed_threshold_admits_every_unsigned(threshold in i64::MIN..=0, value in unsigned()) {
        prop_assert_eq!(Rule::min(threshold).check(&value), None);
    }

    #[test]
    fn unsigned_threshold_above_signed_range_rejects(threshold in (i64::MAX as u64 + 1)..=u64::MAX, value in signed()) {
        prop_assert_eq!(Rule::min(threshold).check(&value), Some(Hint::Min(Value::U64(threshold))));
    }

    #[test]
    fn range_is_min_and_max(value in prop_oneof![integer(), sized()], lo in 1i64..1000, span in 0i64..1000) {
        let hi = lo + span;
        let range = Rule::range(lo, hi).check(&value).is_none();
        let both = Rule::min(lo).check(&value).is_none() && Rule::max(hi).check(&value).is_none();
        prop_assert_eq!(range, both);
    }

    #[test]
    fn each_passes_on_empty_outer(threshold in any::<i32>(), lo in 1i32..100) {
        let empty = [Value::Seq(vec![]), Value::Array(vec![]), Value::Map(vec![])];
        for outer in &empty {
            prop_assert_eq!(Rule::each_min(threshold).check(outer), None);
            prop_assert_eq!(Rule::each_range(lo, lo + 1).check(outer), None);
            prop_assert_eq!(Rule::each_pattern("^x").check(outer), None);
        }
    }

    #[test]
    fn skipped_optional_counts_toward_quorum(age in 1i32..200) {
        let filter = Filter::new().optional("Nick", Rule::min(3)).field("Age", Rule::min(1)).quorum(2);
        let r = record(&[("Nick", Value::String(String::new())), ("Age", Value::I32(age))]);
        prop_assert!(filter.is_valid(&r));
    }
}
