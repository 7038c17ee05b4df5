mod record;

use proc_macro::TokenStream;

/// Implement `Record` and `Schema` for a struct with named fields.
///
/// Hints are reported under the field's serde name, so `#[serde(rename = "...")]` and
/// `#[serde(rename_all = "...")]` apply. `#[record(rename = "...")]` overrides the serde name and
/// `#[record(skip)]` hides a field from filters.
#[proc_macro_derive(Record, attributes(record, serde))]
pub fn derive_record(input: TokenStream) -> TokenStream { record::derive_record_impl(input) }
