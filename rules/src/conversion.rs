use crate::ast::{Clause, Group};
use crate::error::ParseError;
use crate::parser;
use std::convert::TryFrom;
use std::str::FromStr;

impl<'a> TryFrom<&'a str> for Group {
    type Error = ParseError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> { parser::parse_rule(value) }
}
impl TryFrom<String> for Group {
    type Error = ParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> { parser::parse_rule(&value) }
}
impl FromStr for Group {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { parser::parse_rule(s) }
}

impl From<Clause> for Group {
    fn from(clause: Clause) -> Self { Group { clauses: vec![clause] } }
}
