mod common;

use anyhow::Result;
use chrono::{DateTime, Utc};
use common::{Account, Contact, Member, PHONE};
use verity::{Filter, Hint, Rule, Violation};

fn account_filter() -> Filter {
    Filter::new()
        .field("id", Rule::non_zero())
        .field("status", Rule::range(1, 5))
        .field("first", Rule::range(3, 15))
        .field("last", Rule::range(3, 15))
        .quorum(4)
}

#[test]
fn adult_member_is_valid() {
    let filter = Filter::new().field("age", Rule::min(18));
    let member = Member { age: 21, title: "all you need is love".into() };
    assert!(filter.is_valid(&member));
    assert!(filter.validate(&member).is_empty());
}

#[test]
fn minor_member_fails_min() {
    let filter = Filter::new().field("age", Rule::min(18));
    let member = Member { age: 16, ..Default::default() };
    assert_eq!(filter.validate(&member), vec!["Age must be at least 18"]);
}

#[test]
fn malformed_phone_is_not_valid() {
    let filter = Filter::new().field("phone", Rule::pattern(PHONE));
    let contact = Contact { phone: "+38(000)123-45-67".into(), ..Default::default() };
    assert_eq!(filter.validate(&contact), vec!["Phone is not valid"]);
}

#[test]
fn every_tag_matches() {
    let filter = Filter::new().field("tags", Rule::each_pattern(PHONE));
    let contact = Contact { tags: vec!["+380001234567".into(), "+380007654321".into()], ..Default::default() };
    assert!(filter.is_valid(&contact));

    let contact = Contact { tags: vec!["+380001234567".into(), "n/a".into()], ..Default::default() };
    assert_eq!(filter.validate(&contact), vec!["Tags each element must match the pattern"]);
}

#[test]
fn complete_account_meets_quorum() {
    let account = Account { id: 10, status: 5, first: "John".into(), last: "Doe".into() };
    assert!(account_filter().is_valid(&account));
}

#[test]
fn default_account_fails_everything() {
    let violations = account_filter().violations(&Account::default());
    assert_eq!(
        violations.iter().map(ToString::to_string).collect::<Vec<_>>(),
        vec![
            "Id is empty",
            "Status must be in the range 1..5",
            "First must be in the range 3..15",
            "Last must be in the range 3..15",
            "must contain at least 4 valid fields",
        ]
    );
    assert_eq!(violations.last(), Some(&Violation { field: None, hint: Hint::FieldsMin(4) }));
}

#[test]
fn zero_instant_is_empty() {
    let filter = Filter::new().field("joined", Rule::non_zero());
    let contact = Contact { joined: DateTime::<Utc>::default(), ..Default::default() };
    assert_eq!(filter.validate(&contact), vec!["Joined is empty"]);

    let contact = Contact { joined: Utc::now(), ..Default::default() };
    assert!(filter.is_valid(&contact));
}

#[test]
fn compiled_filter_agrees_with_dynamic() {
    let compiled = account_filter().compile::<Account>();
    for account in [Account::default(), Account { id: 10, status: 5, first: "John".into(), last: "Doe".into() }] {
        assert_eq!(compiled.validate(&account), account_filter().validate(&account));
    }
}

#[test]
fn same_scenarios_from_text() -> Result<()> {
    let filter = Filter::new()
        .field("id", Rule::parse("NonZero")?)
        .field("status", Rule::parse("range [1,5]")?)
        .field("first", Rule::parse("range 3,15")?)
        .field("last", Rule::parse("range [3, 15]")?)
        .quorum(4);
    assert_eq!(filter.validate(&Account::default()).len(), 5);
    assert!(filter.is_valid(&Account { id: 1, status: 1, first: "Ann".into(), last: "Lee".into() }));
    Ok(())
}

#[test]
fn optional_nickname() {
    let filter = Filter::new().optional("nickname", Rule::min(3)).field("age", Rule::min(1));
    let contact = Contact::default();
    assert!(filter.is_valid(&contact));

    let contact = Contact { nickname: Some("Al".into()), ..Default::default() };
    assert_eq!(filter.validate(&contact), vec!["Nickname must be at least 3"]);
}
