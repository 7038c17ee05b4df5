use serde::{Deserialize, Serialize};
use std::fmt;

/// One or more clauses applied in order to the same field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    pub clauses: Vec<Clause>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    pub operator: Operator,
    pub operand: Option<Operand>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operand {
    Single(Literal),
    Pair(Literal, Literal),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Literal {
    Integer(i64),
    /// Integers above `i64::MAX`
    Unsigned(u64),
    Float(f64),
    String(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    NonZero,
    Min,
    Max,
    Eq,
    Range,
    Match,
    Year,
    Date(TimeOperator),
    Time(TimeOperator),
    Each(EachOperator),
    FieldsMin,
    /// A token outside the closed operator set, kept so the caller can decide what to do with it.
    Unknown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeOperator {
    Min,
    Max,
    Eq,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EachOperator {
    Min,
    Max,
    Eq,
    Range,
    Match,
}

impl Operator {
    pub fn from_token(token: &str) -> Self {
        match token {
            "NonZero" => Operator::NonZero,
            "min" => Operator::Min,
            "max" => Operator::Max,
            "eq" => Operator::Eq,
            "range" => Operator::Range,
            "match" => Operator::Match,
            "year" => Operator::Year,
            "date:min" => Operator::Date(TimeOperator::Min),
            "date:max" => Operator::Date(TimeOperator::Max),
            "date:eq" => Operator::Date(TimeOperator::Eq),
            "time:min" => Operator::Time(TimeOperator::Min),
            "time:max" => Operator::Time(TimeOperator::Max),
            "time:eq" => Operator::Time(TimeOperator::Eq),
            "each:min" => Operator::Each(EachOperator::Min),
            "each:max" => Operator::Each(EachOperator::Max),
            "each:eq" => Operator::Each(EachOperator::Eq),
            "each:range" => Operator::Each(EachOperator::Range),
            "each:match" => Operator::Each(EachOperator::Match),
            "fields:min" => Operator::FieldsMin,
            other => Operator::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for TimeOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeOperator::Min => write!(f, "min"),
            TimeOperator::Max => write!(f, "max"),
            TimeOperator::Eq => write!(f, "eq"),
        }
    }
}

impl fmt::Display for EachOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EachOperator::Min => write!(f, "min"),
            EachOperator::Max => write!(f, "max"),
            EachOperator::Eq => write!(f, "eq"),
            EachOperator::Range => write!(f, "range"),
            EachOperator::Match => write!(f, "match"),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::NonZero => write!(f, "NonZero"),
            Operator::Min => write!(f, "min"),
            Operator::Max => write!(f, "max"),
            Operator::Eq => write!(f, "eq"),
            Operator::Range => write!(f, "range"),
            Operator::Match => write!(f, "match"),
            Operator::Year => write!(f, "year"),
            Operator::Date(op) => write!(f, "date:{}", op),
            Operator::Time(op) => write!(f, "time:{}", op),
            Operator::Each(op) => write!(f, "each:{}", op),
            Operator::FieldsMin => write!(f, "fields:min"),
            Operator::Unknown(token) => write!(f, "{}", token),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Integer(i) => write!(f, "{}", i),
            Literal::Unsigned(u) => write!(f, "{}", u),
            Literal::Float(x) => write!(f, "{:?}", x),
            Literal::String(s) => write!(f, "{}", crate::parser::quote(s)),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.operand {
            None => write!(f, "{}", self.operator),
            Some(Operand::Single(lit)) => write!(f, "{} {}", self.operator, lit),
            Some(Operand::Pair(lo, hi)) => write!(f, "{} [{},{}]", self.operator, lo, hi),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Single(lit) => write!(f, "{}", lit),
            Operand::Pair(lo, hi) => write!(f, "[{},{}]", lo, hi),
        }
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, clause) in self.clauses.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", clause)?;
        }
        Ok(())
    }
}
