use thiserror::Error;
use verity_rules::error::ParseError;

/// Errors building rules and filters from their textual or JSON forms.
///
/// Evaluation never fails with an error: problems found while checking a record are reported as
/// [`crate::hint::Hint`]s.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("operator {operator} requires an operand")]
    MissingOperand { operator: String },

    #[error("operator {operator} takes no operand")]
    UnexpectedOperand { operator: String },

    #[error("operator {operator} requires a lo,hi pair")]
    ExpectedPair { operator: String },

    #[error("operator {operator} requires a single operand")]
    ExpectedSingle { operator: String },

    /// `fields:min` bound to a field or combined with other clauses
    #[error("fields:min applies to the whole record: {0}")]
    MisplacedQuorum(String),

    #[error("invalid fields:min operand: {0}")]
    InvalidQuorum(String),

    #[error("filter entry names no field: {0}")]
    MissingField(String),

    #[error("invalid filter json: {0}")]
    Json(#[from] serde_json::Error),
}
