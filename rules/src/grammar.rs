use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "verity.pest"]
pub struct VerityParser;
