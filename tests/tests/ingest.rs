mod common;

use anyhow::Result;
use chrono::{TimeZone, Utc};
use common::{Account, PHONE};
use serde_json::json;
use verity::{Filter, FilterSpec, Options, QuorumCredit, Rule, RuleError, UnknownOperatorPolicy, Value};

const ACCOUNT_FILTER: &str = r#"[
    { "field": "id", "rule": "NonZero" },
    { "field": "status", "rule": "range [1,5]" },
    { "field": "first", "rule": "range [3,15]" },
    { "field": "last", "rule": "range [3,15]" },
    { "rule": "fields:min 4" }
]"#;

#[test]
fn json_filter_on_derived_record() -> Result<()> {
    let filter = Filter::from_json(ACCOUNT_FILTER)?;
    assert_eq!(filter.quorums(), &[4]);
    assert_eq!(filter.validate(&Account::default()).len(), 5);
    assert!(filter.is_valid(&Account { id: 10, status: 5, first: "John".into(), last: "Doe".into() }));
    Ok(())
}

#[test]
fn json_filter_on_json_record() -> Result<()> {
    let filter = Filter::from_json(&format!(r#"[{{ "field": "Phone", "rule": "match '{}'" }}, {{ "field": "Age", "rule": "min 18" }}]"#, PHONE.replace('\\', "\\\\")))?;
    let hints = filter.validate(&json!({ "Phone": "+38(000)123-45-67", "Age": 16 }));
    assert_eq!(hints, vec!["Phone is not valid", "Age must be at least 18"]);
    assert!(filter.is_valid(&json!({ "Phone": "+380001234567", "Age": 30 })));
    Ok(())
}

#[test]
fn json_null_is_an_invalid_value() -> Result<()> {
    let filter = Filter::from_json(r#"[{ "field": "Age", "rule": "min 18" }, { "field": "Name", "rule": "NonZero" }]"#)?;
    assert_eq!(filter.validate(&json!({ "Age": null, "Name": null })), vec!["Age has invalid value", "Name is empty"]);
    Ok(())
}

#[test]
fn options_from_json() -> Result<()> {
    let spec: FilterSpec = serde_json::from_value(json!({
        "entries": [
            { "field": "Email", "rule": "email" },
            { "field": "Nick", "rule": "min 3", "optional": true },
            { "rule": "fields:min 2" }
        ],
        "options": { "unknown_operator": "ignore", "skipped_optional": "not_passed" }
    }))?;
    let filter = Filter::try_from(spec)?;
    assert_eq!(
        filter.options(),
        &Options::default().unknown_operator(UnknownOperatorPolicy::Ignore).skipped_optional(QuorumCredit::NotPassed)
    );
    assert_eq!(filter.validate(&json!({ "Email": "x", "Nick": "" })), vec!["must contain at least 2 valid fields"]);
    Ok(())
}

#[test]
fn facade_validate_json() -> Result<()> {
    let hints = verity::validate_json(ACCOUNT_FILTER, &json!({ "id": 1, "status": 9, "first": "Ann", "last": "Lee" }))?;
    assert_eq!(hints, vec!["status must be in the range 1..5", "must contain at least 4 valid fields"]);
    Ok(())
}

#[test]
fn rejected_filters() {
    assert!(matches!(Filter::from_json(r#"[{ "field": "id", "rule": "fields:min 1" }]"#), Err(RuleError::MisplacedQuorum(_))));
    assert!(matches!(Filter::from_json(r#"[{ "field": "id", "rule": "range 1" }]"#), Err(RuleError::ExpectedPair { .. })));
    assert!(matches!(Filter::from_json(r#"{ "entries": 3 }"#), Err(RuleError::Json(_))));
}

#[test]
fn text_rules_round_trip_through_json() -> Result<()> {
    let filter = Filter::new()
        .field("tags", Rule::each_pattern(PHONE))
        .field("joined", Rule::date_min("2024-01-01T00:00:00Z"))
        .optional("nickname", Rule::group([Rule::min(3i64), Rule::max(16i64)]))
        .quorum(1);
    let json = serde_json::to_string(&filter.to_spec())?;
    assert_eq!(Filter::from_json(&json)?, filter);
    Ok(())
}

fn reloaded(filter: &Filter) -> Result<Filter> { Ok(Filter::from_json(&serde_json::to_string(&filter.to_spec())?)?) }

#[test]
fn float_thresholds_round_trip_through_json() -> Result<()> {
    let filter = Filter::new().field("Ratio", Rule::min(18.0)).field("Mass", Rule::max(1e20)).field("Scores", Rule::each_range(0.5, 9.5));
    let reloaded = reloaded(&filter)?;
    assert_eq!(reloaded, filter);

    let record = json!({ "Ratio": 20.5, "Mass": 3.0e19, "Scores": [1.0, 9.0] });
    assert!(filter.is_valid(&record));
    assert!(reloaded.is_valid(&record));
    assert_eq!(reloaded.validate(&json!({ "Ratio": 2.5, "Mass": 1.0, "Scores": [] })), vec!["Ratio must be at least 18"]);
    Ok(())
}

#[test]
fn timestamp_thresholds_round_trip_through_json() -> Result<()> {
    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    let filter = Filter::new()
        .field("Joined", Rule::date_min(start))
        .field("At", Rule::time_min(start))
        .field("Until", Rule::time_max(Utc.with_ymd_and_hms(2300, 1, 1, 0, 0, 0).unwrap()));
    let reloaded = reloaded(&filter)?;

    let june = Value::Timestamp(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
    let december = Value::Timestamp(Utc.with_ymd_and_hms(2023, 12, 1, 0, 0, 0).unwrap());
    for at in [june, december] {
        let record = common::record(&[("Joined", at.clone()), ("At", at.clone()), ("Until", at)]);
        assert_eq!(reloaded.validate(&record), filter.validate(&record));
    }
    let record = common::record(&[("At", Value::Timestamp(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()))]);
    assert!(reloaded.is_valid(&record));
    Ok(())
}

#[test]
fn awkward_rules_round_trip_through_json() -> Result<()> {
    let filter = Filter::new()
        .field("Path", Rule::pattern(r"^C:\\"))
        .field("Quote", Rule::pattern(r#"say \"hi\""#))
        .field("Mail", Rule::parse("email strict")?);
    assert_eq!(reloaded(&filter)?, filter);
    Ok(())
}
