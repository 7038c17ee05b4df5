mod common;

use common::{Contact, PHONE};
use std::sync::Arc;
use std::thread;
use verity::{Filter, Rule};

#[test]
fn one_filter_many_threads() {
    let filter = Arc::new(Filter::new().field("phone", Rule::pattern(PHONE)).field("tags", Rule::each_pattern(PHONE)).quorum(2));

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let filter = filter.clone();
            thread::spawn(move || {
                let valid = Contact { phone: format!("+38000123456{}", i), tags: vec!["+380001234567".into()], ..Default::default() };
                let invalid = Contact { phone: format!("{}", i), ..Default::default() };
                (filter.validate(&valid), filter.validate(&invalid))
            })
        })
        .collect();

    for handle in handles {
        let (valid, invalid) = handle.join().expect("validation thread panicked");
        assert!(valid.is_empty(), "{valid:?}");
        assert_eq!(invalid, vec!["Phone is not valid", "must contain at least 2 valid fields"]);
    }
}

#[test]
fn compiled_filters_are_shareable() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<verity::CompiledFilter<Contact>>();
    assert_send_sync::<Filter>();
}
