use super::{Filter, FilterItem};
use crate::error::RuleError;
use crate::options::Options;
use crate::rule::{ingest, Rule};
use serde::{Deserialize, Serialize};

/// The serializable form of a [`Filter`].
///
/// Accepts either a bare list of entries or an object with `entries` and `options`:
///
/// ```json
/// [
///   { "field": "Id", "rule": "NonZero" },
///   { "field": "First", "rule": "range [3,15]", "optional": true },
///   { "rule": "fields:min 2" }
/// ]
/// ```
///
/// An entry without a field whose rule is `fields:min N` is a quorum.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "SpecForm")]
pub struct FilterSpec {
    pub entries: Vec<EntrySpec>,
    pub options: Options,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EntrySpec {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub field: String,
    pub rule: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub optional: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SpecForm {
    Entries(Vec<EntrySpec>),
    Full {
        #[serde(default)]
        entries: Vec<EntrySpec>,
        #[serde(default)]
        options: Options,
    },
}

impl From<SpecForm> for FilterSpec {
    fn from(form: SpecForm) -> Self {
        match form {
            SpecForm::Entries(entries) => FilterSpec { entries, options: Options::default() },
            SpecForm::Full { entries, options } => FilterSpec { entries, options },
        }
    }
}

impl TryFrom<FilterSpec> for Filter {
    type Error = RuleError;

    fn try_from(spec: FilterSpec) -> Result<Self, Self::Error> {
        let mut filter = Filter::new().with_options(spec.options);
        for entry in spec.entries {
            let group = verity_rules::parse_rule(&entry.rule)?;
            if let Some(min) = ingest::quorum_of(&group)? {
                if !entry.field.is_empty() {
                    return Err(RuleError::MisplacedQuorum(format!("{}: {}", entry.field, entry.rule)));
                }
                filter = filter.quorum(min);
                continue;
            }
            if entry.field.is_empty() {
                return Err(RuleError::MissingField(entry.rule));
            }
            let item = FilterItem { field: entry.field, rule: Rule::try_from(&group)?, optional: entry.optional };
            filter = filter.item(item);
        }
        Ok(filter)
    }
}

impl From<&Filter> for FilterSpec {
    fn from(filter: &Filter) -> Self {
        let items = filter.items.iter().map(|item| EntrySpec { field: item.field.clone(), rule: item.rule.to_string(), optional: item.optional });
        let quorums = filter.quorums.iter().map(|min| EntrySpec { rule: format!("fields:min {}", min), ..Default::default() });
        FilterSpec { entries: items.chain(quorums).collect(), options: filter.options }
    }
}

impl Filter {
    /// Build a filter from its JSON form, see [`FilterSpec`].
    pub fn from_json(json: &str) -> Result<Filter, RuleError> {
        let spec: FilterSpec = serde_json::from_str(json)?;
        Filter::try_from(spec)
    }

    pub fn to_spec(&self) -> FilterSpec { FilterSpec::from(self) }
}
