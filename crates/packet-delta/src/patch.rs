//! Patch engine: restores pruned fields from the reference record.

use packet_value::{Record, Value};
use tracing::trace;

/// Fills every field missing from `incoming` with a copy from `reference`
/// and returns the completed record.
///
/// Only a missing key triggers restoration. An explicit absence marker
/// (`Scalar::None`) is a real value sent by the encoder: it is kept in the
/// output and adopted into the reference like any other leaf.
///
/// For each key of `reference`:
/// - missing from `incoming`: restored from the reference;
/// - a mapping on both sides: patched recursively;
/// - otherwise the incoming value wins and is copied into the reference.
///
/// Keys present only in `incoming` are copied into the reference unchanged.
pub fn patch(reference: &mut Record, mut incoming: Record) -> Record {
    patch_in_place(reference, &mut incoming);
    incoming
}

fn patch_in_place(reference: &mut Record, incoming: &mut Record) {
    for (key, ref_value) in reference.iter_mut() {
        match incoming.get_mut(key) {
            None => {
                incoming.insert(key.clone(), ref_value.clone());
            }
            Some(Value::Mapping(child)) if ref_value.is_mapping() => {
                if let Value::Mapping(ref_child) = ref_value {
                    patch_in_place(ref_child, child);
                }
            }
            Some(value) => {
                if value.kind() != ref_value.kind() {
                    trace!(key = %key, was = %ref_value.kind(), now = %value.kind(), "field changed kind");
                }
                *ref_value = value.clone();
            }
        }
    }

    for (key, value) in incoming.iter() {
        if !reference.contains_key(key) {
            trace!(key = %key, "seeding reference with new field");
            reference.insert(key.clone(), value.clone());
        }
    }
}
