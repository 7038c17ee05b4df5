use serde::{Deserialize, Serialize};

/// Behavior knobs carried by a [`crate::filter::Filter`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    pub unknown_operator: UnknownOperatorPolicy,
    pub skipped_optional: QuorumCredit,
}

impl Options {
    pub fn unknown_operator(mut self, policy: UnknownOperatorPolicy) -> Self {
        self.unknown_operator = policy;
        self
    }

    pub fn skipped_optional(mut self, credit: QuorumCredit) -> Self {
        self.skipped_optional = credit;
        self
    }
}

/// What to do with an operator outside the known vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownOperatorPolicy {
    /// Report `has invalid rule`
    #[default]
    Reject,
    /// Treat the rule as passing
    Ignore,
}

/// Whether an optional entry skipped for holding a zero value counts toward `fields:min`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuorumCredit {
    #[default]
    Passed,
    NotPassed,
}
