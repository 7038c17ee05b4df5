use super::{EachRule, Rule};
use crate::compare::Relation;
use crate::error::RuleError;
use crate::pattern::Pattern;
use crate::value::Value;
use std::str::FromStr;
use tracing::warn;
use verity_rules::ast::{self, EachOperator, Literal, Operand, Operator, TimeOperator};

impl Rule {
    /// Parse the textual form of a field rule, e.g. `NonZero; range [3,15]`.
    pub fn parse(input: &str) -> Result<Rule, RuleError> {
        let group = verity_rules::parse_rule(input)?;
        Rule::try_from(&group)
    }
}

impl FromStr for Rule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> { Rule::parse(s) }
}

impl<'a> TryFrom<&'a str> for Rule {
    type Error = RuleError;

    fn try_from(value: &'a str) -> Result<Self, Self::Error> { Rule::parse(value) }
}

impl TryFrom<&ast::Group> for Rule {
    type Error = RuleError;

    fn try_from(group: &ast::Group) -> Result<Self, Self::Error> {
        let mut rules = group.clauses.iter().map(|clause| clause_rule(clause, group)).collect::<Result<Vec<_>, _>>()?;
        if rules.len() == 1 {
            if let Some(rule) = rules.pop() {
                return Ok(rule);
            }
        }
        Ok(Rule::Group(rules))
    }
}

impl TryFrom<ast::Group> for Rule {
    type Error = RuleError;

    fn try_from(group: ast::Group) -> Result<Self, Self::Error> { Rule::try_from(&group) }
}

/// The `fields:min` threshold of a record-level rule, or `None` when `group` holds no quorum clause.
pub(crate) fn quorum_of(group: &ast::Group) -> Result<Option<usize>, RuleError> {
    let quorum_clauses = group.clauses.iter().filter(|clause| clause.operator == Operator::FieldsMin).count();
    if quorum_clauses == 0 {
        return Ok(None);
    }
    let [clause] = group.clauses.as_slice() else { return Err(RuleError::MisplacedQuorum(group.to_string())) };
    match &clause.operand {
        Some(Operand::Single(Literal::Integer(n))) => usize::try_from(*n).map(Some).map_err(|_| RuleError::InvalidQuorum(n.to_string())),
        Some(Operand::Single(Literal::Unsigned(n))) => {
            usize::try_from(*n).map(Some).map_err(|_| RuleError::InvalidQuorum(n.to_string()))
        }
        Some(operand) => Err(RuleError::InvalidQuorum(operand.to_string())),
        None => Err(RuleError::MissingOperand { operator: clause.operator.to_string() }),
    }
}

fn clause_rule(clause: &ast::Clause, group: &ast::Group) -> Result<Rule, RuleError> {
    let operator = &clause.operator;
    match operator {
        Operator::NonZero => match clause.operand {
            None => Ok(Rule::NonZero),
            Some(_) => Err(RuleError::UnexpectedOperand { operator: operator.to_string() }),
        },
        Operator::Unknown(token) => {
            warn!("unknown rule operator {:?} in {:?}", token, group.to_string());
            Ok(Rule::Unknown(clause.to_string()))
        }
        Operator::FieldsMin => Err(RuleError::MisplacedQuorum(group.to_string())),

        Operator::Min => Ok(Rule::Min(single(clause)?.into())),
        Operator::Max => Ok(Rule::Max(single(clause)?.into())),
        Operator::Eq => Ok(Rule::Eq(single(clause)?.into())),
        Operator::Range => pair(clause).map(|(lo, hi)| Rule::Range(lo.into(), hi.into())),
        Operator::Match => Ok(Rule::Match(pattern(single(clause)?))),
        Operator::Year => Ok(Rule::Year(single(clause)?.into())),
        Operator::Date(op) => Ok(Rule::date(relation(*op), Value::from(single(clause)?))),
        Operator::Time(op) => Ok(Rule::time(relation(*op), Value::from(single(clause)?))),

        Operator::Each(EachOperator::Min) => Ok(Rule::Each(EachRule::Min(single(clause)?.into()))),
        Operator::Each(EachOperator::Max) => Ok(Rule::Each(EachRule::Max(single(clause)?.into()))),
        Operator::Each(EachOperator::Eq) => Ok(Rule::Each(EachRule::Eq(single(clause)?.into()))),
        Operator::Each(EachOperator::Range) => pair(clause).map(|(lo, hi)| Rule::Each(EachRule::Range(lo.into(), hi.into()))),
        Operator::Each(EachOperator::Match) => Ok(Rule::Each(EachRule::Match(pattern(single(clause)?)))),
    }
}

fn single(clause: &ast::Clause) -> Result<&Literal, RuleError> {
    match &clause.operand {
        Some(Operand::Single(literal)) => Ok(literal),
        Some(Operand::Pair(..)) => Err(RuleError::ExpectedSingle { operator: clause.operator.to_string() }),
        None => Err(RuleError::MissingOperand { operator: clause.operator.to_string() }),
    }
}

fn pair(clause: &ast::Clause) -> Result<(&Literal, &Literal), RuleError> {
    match &clause.operand {
        Some(Operand::Pair(lo, hi)) => Ok((lo, hi)),
        Some(Operand::Single(_)) => Err(RuleError::ExpectedPair { operator: clause.operator.to_string() }),
        None => Err(RuleError::MissingOperand { operator: clause.operator.to_string() }),
    }
}

/// Non-text operands are matched by their literal spelling, so `match 42` looks for "42".
fn pattern(literal: &Literal) -> Pattern {
    match literal {
        Literal::String(source) => Pattern::new(source.as_str()),
        other => Pattern::new(other.to_string()),
    }
}

fn relation(op: TimeOperator) -> Relation {
    match op {
        TimeOperator::Min => Relation::AtLeast,
        TimeOperator::Max => Relation::AtMost,
        TimeOperator::Eq => Relation::Equal,
    }
}
