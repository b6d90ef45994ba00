//! Integration tests for identifiers and id generation

use std::collections::HashSet;

use formforge_foundation::{FieldId, IdGenerator, RandomIds, RuleId, SeededIds};

#[test]
fn ids_compare_by_text() {
    assert_eq!(FieldId::new("a"), FieldId::from("a"));
    assert!(FieldId::new("a") < FieldId::new("b"));
    assert_eq!(RuleId::from(String::from("r1")).as_str(), "r1");
}

#[test]
fn seeded_generators_replay() {
    let run = |seed| {
        let mut ids = SeededIds::new(seed);
        (0..5).map(|_| ids.next_field_id()).collect::<Vec<_>>()
    };
    assert_eq!(run(11), run(11));
    assert_ne!(run(11), run(12));
}

#[test]
fn generated_ids_do_not_repeat() {
    let mut seeded = SeededIds::new(0);
    let mut random = RandomIds;
    let mut seen = HashSet::new();
    for _ in 0..200 {
        assert!(seen.insert(seeded.next_field_id()));
        assert!(seen.insert(random.next_field_id()));
    }
}
