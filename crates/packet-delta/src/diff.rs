//! Diff engine: prunes fields that repeat the reference record.

use packet_value::{Record, Value};
use tracing::trace;

/// Removes from `incoming` every field equal to its counterpart in
/// `reference` and returns what is left.
///
/// For each key of `incoming`:
/// - a mapping whose reference counterpart is also a mapping is pruned
///   recursively, and dropped entirely if nothing in it changed;
/// - a mapping with no reference counterpart is new schema: the reference is
///   seeded with a copy and the whole subtree is kept;
/// - a value whose reference counterpart has a different kind is changed;
/// - any other value is dropped when equal to the reference, otherwise kept.
///
/// Every kept value is copied into `reference`, so afterwards `reference`
/// holds the full state described by the original `incoming`.
pub fn diff(reference: &mut Record, incoming: Record) -> Record {
    let mut pruned = Record::new();
    for (key, value) in incoming {
        match value {
            Value::Mapping(child) => match reference.get_mut(&key) {
                Some(Value::Mapping(ref_child)) => {
                    let sub = diff(ref_child, child);
                    if !sub.is_empty() {
                        pruned.insert(key, Value::Mapping(sub));
                    }
                }
                Some(existing) => {
                    trace!(key = %key, was = %existing.kind(), "field changed kind to mapping");
                    *existing = Value::Mapping(child.clone());
                    pruned.insert(key, Value::Mapping(child));
                }
                None => {
                    trace!(key = %key, "seeding reference with new mapping");
                    reference.insert(key.clone(), Value::Mapping(child.clone()));
                    pruned.insert(key, Value::Mapping(child));
                }
            },
            leaf => match reference.get_mut(&key) {
                Some(existing) if *existing == leaf => {}
                Some(existing) => {
                    if existing.kind() != leaf.kind() {
                        trace!(key = %key, was = %existing.kind(), now = %leaf.kind(), "field changed kind");
                    }
                    *existing = leaf.clone();
                    pruned.insert(key, leaf);
                }
                None => {
                    trace!(key = %key, "seeding reference with new field");
                    reference.insert(key.clone(), leaf.clone());
                    pruned.insert(key, leaf);
                }
            },
        }
    }
    pruned
}
