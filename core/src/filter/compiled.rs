use super::{Filter, FilterItem, Tally, Violation};
use crate::options::Options;
use crate::record::Schema;
use std::fmt;
use std::marker::PhantomData;
use tracing::warn;

/// A [`Filter`] whose entries are bound to field indexes of one record type.
pub struct CompiledFilter<R> {
    entries: Vec<(usize, FilterItem)>,
    quorums: Vec<usize>,
    options: Options,
    _record: PhantomData<fn(&R)>,
}

impl<R> Clone for CompiledFilter<R> {
    fn clone(&self) -> Self {
        Self { entries: self.entries.clone(), quorums: self.quorums.clone(), options: self.options, _record: PhantomData }
    }
}

impl<R> fmt::Debug for CompiledFilter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledFilter")
            .field("record", &std::any::type_name::<R>())
            .field("entries", &self.entries)
            .field("quorums", &self.quorums)
            .field("options", &self.options)
            .finish()
    }
}

impl<R: Schema> CompiledFilter<R> {
    pub(super) fn new(filter: &Filter) -> Self {
        let mut entries = Vec::with_capacity(filter.items.len());
        for item in &filter.items {
            match R::index_of(&item.field) {
                Some(index) => entries.push((index, item.clone())),
                None => warn!("dropping rule for {:?}: no such field on {}", item.field, std::any::type_name::<R>()),
            }
        }
        Self { entries, quorums: filter.quorums.clone(), options: filter.options, _record: PhantomData }
    }

    /// Entries that survived compilation, with the index each is bound to.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &FilterItem)> { self.entries.iter().map(|(index, item)| (*index, item)) }

    pub fn violations(&self, record: &R) -> Vec<Violation> {
        let fields = R::fields();
        let mut tally = Tally::new(&self.options);
        for (index, item) in &self.entries {
            let outcome = tally.check(item, record.value_at(*index));
            tally.record(outcome, || fields.get(*index).map_or_else(|| item.field.clone(), |field| field.external_name.to_string()));
        }
        tally.finish(&self.quorums)
    }

    pub fn validate(&self, record: &R) -> Vec<String> { self.violations(record).iter().map(ToString::to_string).collect() }

    pub fn is_valid(&self, record: &R) -> bool { self.violations(record).is_empty() }
}
