use crate::grammar;
use thiserror::Error;

/// Custom error type for parsing errors
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Syntax error: {0}")]
    SyntaxError(String),
    #[error("Empty rule")]
    EmptyRule,
    #[error("Expected {expected}, got {got:?}")]
    UnexpectedRule { expected: &'static str, got: grammar::Rule },
    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),
}

impl From<pest::error::Error<grammar::Rule>> for ParseError {
    fn from(err: pest::error::Error<grammar::Rule>) -> Self { ParseError::SyntaxError(err.to_string()) }
}
