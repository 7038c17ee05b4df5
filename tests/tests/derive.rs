mod common;

use chrono::{TimeZone, Utc};
use common::Contact;
use serde::Serialize;
use std::collections::HashMap;
use verity::{FieldDescriptor, Filter, Record, Rule, Schema, Value};

#[derive(Serialize, Record)]
struct Profile {
    #[serde(rename = "user_name")]
    name: String,
    #[record(rename = "years")]
    age: u8,
    #[record(skip)]
    #[allow(unused)]
    secret: String,
    r#type: char,
}

#[derive(Record)]
struct Tagged<T> {
    items: Vec<T>,
}

#[test]
fn fields_follow_declaration_order() {
    assert_eq!(
        Profile::fields(),
        &[
            FieldDescriptor { name: "name", external_name: "user_name" },
            FieldDescriptor { name: "age", external_name: "years" },
            FieldDescriptor { name: "type", external_name: "type" },
        ]
    );
    assert_eq!(Profile::index_of("age"), Some(1));
    assert_eq!(Profile::index_of("secret"), None);
}

#[test]
fn values_by_name_and_index() {
    let profile = Profile { name: "Ann".into(), age: 30, secret: "x".into(), r#type: 'a' };
    assert_eq!(profile.value("name"), Some(Value::String("Ann".into())));
    assert_eq!(profile.value("age"), Some(Value::U8(30)));
    assert_eq!(profile.value("type"), Some(Value::String("a".into())));
    assert_eq!(profile.value("secret"), None);
    assert_eq!(profile.value("user_name"), None);
    assert_eq!(profile.value_at(1), Some(Value::U8(30)));
    assert_eq!(profile.value_at(3), None);
    assert_eq!(profile.external_name("name"), "user_name");
    assert_eq!(profile.external_name("unknown"), "unknown");
}

#[test]
fn hints_use_external_names() {
    let filter = Filter::new().field("name", Rule::min(5)).field("age", Rule::min(18)).field("secret", Rule::non_zero());
    let profile = Profile { name: "Ann".into(), age: 12, secret: String::new(), r#type: 'a' };
    assert_eq!(filter.validate(&profile), vec!["user_name must be at least 5", "years must be at least 18"]);
    assert_eq!(filter.compile::<Profile>().validate(&profile), filter.validate(&profile));
}

#[test]
fn rename_all_applies() {
    assert_eq!(Contact::fields().iter().map(|field| field.external_name).collect::<Vec<_>>(), vec!["Phone", "Tags", "Scores", "Nickname", "Joined"]);
}

#[test]
fn container_fields_convert() {
    let contact = Contact {
        scores: HashMap::from([("math".to_string(), 7u32)]),
        joined: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        ..Default::default()
    };
    assert_eq!(contact.value("scores"), Some(Value::Map(vec![(Value::String("math".into()), Value::U32(7))])));
    assert_eq!(contact.value("nickname"), Some(Value::Interface(None)));
    assert_eq!(contact.value("tags"), Some(Value::Seq(vec![])));

    let filter = Filter::new().field("scores", Rule::each_max(5)).field("joined", Rule::year(2024));
    assert_eq!(filter.validate(&contact), vec!["Scores each element must be at most 5"]);
}

#[test]
fn generic_records() {
    let tagged = Tagged { items: vec![1u16, 2, 3] };
    let filter = Filter::new().field("items", Rule::each_range(1, 2));
    assert_eq!(filter.validate(&tagged), vec!["items each element must be in the range 1..2"]);
}
