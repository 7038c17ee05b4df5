use crate::ast;
use crate::error::ParseError;
use crate::grammar::{self, VerityParser};
use pest::iterators::Pair;
use pest::Parser;

/// Parse the textual form of a rule into its AST.
///
/// A rule is one or more `operator operand?` clauses separated by `;`. Operators outside the
/// known vocabulary are preserved as [`ast::Operator::Unknown`] rather than rejected here, since
/// whether they are an error is a policy decision of the evaluator.
pub fn parse_rule(input: &str) -> Result<ast::Group, ParseError> {
    if input.trim().is_empty() {
        return Err(ParseError::EmptyRule);
    }

    let pairs = VerityParser::parse(grammar::Rule::RuleText, input)?;

    let mut clauses = Vec::new();
    for pair in pairs {
        match pair.as_rule() {
            grammar::Rule::Clause => clauses.push(parse_clause(pair)?),
            grammar::Rule::EOI => {}
            other => return Err(ParseError::UnexpectedRule { expected: "Clause", got: other }),
        }
    }

    if clauses.is_empty() {
        return Err(ParseError::EmptyRule);
    }
    tracing::trace!("parsed rule {:?} into {} clause(s)", input, clauses.len());
    Ok(ast::Group { clauses })
}

fn parse_clause(pair: Pair<grammar::Rule>) -> Result<ast::Clause, ParseError> {
    let mut inner = pair.into_inner();

    let operator = inner.next().ok_or(ParseError::EmptyRule)?;
    if operator.as_rule() != grammar::Rule::Operator {
        return Err(ParseError::UnexpectedRule { expected: "Operator", got: operator.as_rule() });
    }
    let operator = ast::Operator::from_token(operator.as_str());

    let operand = match inner.next() {
        None => None,
        Some(pair) => Some(parse_operand(pair)?),
    };

    Ok(ast::Clause { operator, operand })
}

fn parse_operand(pair: Pair<grammar::Rule>) -> Result<ast::Operand, ParseError> {
    match pair.as_rule() {
        grammar::Rule::Pair | grammar::Rule::BracketPair => {
            let mut inner = pair.into_inner();
            let lo = inner.next().ok_or(ParseError::InvalidLiteral("missing lower bound".into()))?;
            let hi = inner.next().ok_or(ParseError::InvalidLiteral("missing upper bound".into()))?;
            Ok(ast::Operand::Pair(parse_literal(lo)?, parse_literal(hi)?))
        }
        _ => Ok(ast::Operand::Single(parse_literal(pair)?)),
    }
}

fn parse_literal(pair: Pair<grammar::Rule>) -> Result<ast::Literal, ParseError> {
    match pair.as_rule() {
        grammar::Rule::Integer => {
            let text = pair.as_str();
            if let Ok(i) = text.parse::<i64>() {
                Ok(ast::Literal::Integer(i))
            } else if let Ok(u) = text.parse::<u64>() {
                Ok(ast::Literal::Unsigned(u))
            } else {
                Err(ParseError::InvalidLiteral(format!("integer out of range: {}", text)))
            }
        }
        grammar::Rule::Float => {
            let text = pair.as_str();
            text.parse::<f64>().map(ast::Literal::Float).map_err(|e| ParseError::InvalidLiteral(format!("{}: {}", text, e)))
        }
        grammar::Rule::Quoted => {
            let quote = pair.as_str().chars().next().unwrap_or('"');
            let inner = pair.into_inner().next().map(|p| p.as_str()).unwrap_or_default();
            Ok(ast::Literal::String(unescape_quote(inner, quote)))
        }
        grammar::Rule::Bare => Ok(ast::Literal::String(pair.as_str().to_string())),
        other => Err(ParseError::UnexpectedRule { expected: "literal", got: other }),
    }
}

/// A run of backslashes is literal unless it ends at the quote character: there `2k+1`
/// backslashes stand for `k` backslashes and the quote, and `2k` at the end of the text for `k`.
/// Everything else is kept as written so that regular expressions survive quoting unchanged.
fn unescape_quote(inner: &str, quote: char) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut run = 0;
    for c in inner.chars() {
        if c == '\\' {
            run += 1;
            continue;
        }
        let kept = if c == quote { run / 2 } else { run };
        out.extend(std::iter::repeat('\\').take(kept));
        out.push(c);
        run = 0;
    }
    out.extend(std::iter::repeat('\\').take(run / 2 + run % 2));
    out
}

/// Double-quote `text` so that it parses back to exactly `text`.
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    let mut run = 0;
    for c in text.chars() {
        match c {
            '\\' => {
                run += 1;
                continue;
            }
            '"' => out.extend(std::iter::repeat('\\').take(2 * run + 1)),
            _ => out.extend(std::iter::repeat('\\').take(run)),
        }
        out.push(c);
        run = 0;
    }
    out.extend(std::iter::repeat('\\').take(2 * run));
    out.push('"');
    out
}
