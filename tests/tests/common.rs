#![allow(unused)]

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::Level;
use verity::{Record, Value};

#[derive(Debug, Clone, Default, Serialize, Record)]
#[serde(rename_all = "PascalCase")]
pub struct Member {
    pub age: i32,
    pub title: String,
}

#[derive(Debug, Clone, Default, Serialize, Record)]
#[serde(rename_all = "PascalCase")]
pub struct Account {
    pub id: u64,
    pub status: u8,
    pub first: String,
    pub last: String,
}

#[derive(Debug, Clone, Default, Serialize, Record)]
#[serde(rename_all = "PascalCase")]
pub struct Contact {
    pub phone: String,
    pub tags: Vec<String>,
    pub scores: HashMap<String, u32>,
    pub nickname: Option<String>,
    pub joined: DateTime<Utc>,
}

// Initialize tracing for tests
#[ctor::ctor]
fn init_tracing() { tracing_subscriber::fmt().with_max_level(Level::INFO).with_test_writer().init(); }

pub const PHONE: &str = r"^\+38\d{10}$";

pub fn record(fields: &[(&str, Value)]) -> BTreeMap<String, Value> {
    fields.iter().map(|(name, value)| (name.to_string(), value.clone())).collect()
}
