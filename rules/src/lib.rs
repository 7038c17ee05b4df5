//! Textual form of Verity validation rules.
//!
//! ```text
//! min 18
//! range [3, 15]
//! each:match ^\+38\d{10}$
//! NonZero; max 64
//! ```
//!
//! [`parser::parse_rule`] turns such text into an [`ast::Group`]; the evaluator in `verity-core`
//! converts the AST into typed rules.

pub mod ast;
mod conversion;
pub mod error;
pub mod grammar;
pub mod parser;

pub use parser::{parse_rule, quote};
