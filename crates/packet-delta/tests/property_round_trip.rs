//! Property tests: any stream of records survives compression followed by
//! decompression, both references track the stream, and repeated records
//! compress to nothing.

use packet_delta::{Compressor, Decompressor, DeltaIteratorExt};
use packet_value::{Record, Scalar, Tensor, Value};
use proptest::prelude::*;

// Values are drawn from small domains so consecutive records often repeat.
fn leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Scalar(Scalar::None)),
        any::<bool>().prop_map(Value::from),
        (0i64..3).prop_map(Value::from),
        (0u8..3).prop_map(|v| Value::from(f64::from(v) * 0.5)),
        prop::sample::select(vec!["left", "right"]).prop_map(Value::from),
        (0u8..2).prop_map(|fill| Value::from(Tensor::from_elem(&[2, 2, 3], fill))),
        (0u8..2).prop_map(|fill| Value::from(Tensor::from_elem(&[3], f32::from(fill)))),
    ]
}

// Every mapping has the same two keys, so key sets never shrink between
// records while kinds still flip freely between mapping and leaf.
fn field() -> impl Strategy<Value = Value> {
    leaf().prop_recursive(3, 16, 2, |inner| {
        (inner.clone(), inner).prop_map(|(a, b)| {
            let mut m = Record::new();
            m.insert("k0".into(), a);
            m.insert("k1".into(), b);
            Value::Mapping(m)
        })
    })
}

fn record() -> impl Strategy<Value = Record> {
    (field(), field(), field()).prop_map(|(a, b, c)| {
        let mut r = Record::new();
        r.insert("f0".into(), a);
        r.insert("f1".into(), b);
        r.insert("f2".into(), c);
        r
    })
}

// A stream in which a "late" field appears part-way through and stays.
fn growing_stream() -> impl Strategy<Value = Vec<Record>> {
    (prop::collection::vec((record(), field()), 1..12), 0usize..12).prop_map(|(rows, start)| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (mut r, late))| {
                if i >= start {
                    r.insert("late".into(), late);
                }
                r
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn stream_round_trips(records in prop::collection::vec(record(), 0..12)) {
        let restored: Vec<Record> = records.clone().into_iter().compressed().decompressed().collect();
        prop_assert_eq!(restored, records);
    }

    #[test]
    fn growing_stream_round_trips(records in growing_stream()) {
        let restored: Vec<Record> = records.clone().into_iter().compressed().decompressed().collect();
        prop_assert_eq!(restored, records);
    }

    #[test]
    fn references_track_the_stream(records in growing_stream()) {
        let mut enc = Compressor::new();
        let mut dec = Decompressor::new();
        for r in &records {
            dec.decompress_next(enc.compress_next(r.clone()));
            prop_assert_eq!(enc.reference(), Some(r));
            prop_assert_eq!(dec.reference(), Some(r));
        }
    }

    #[test]
    fn repeated_record_compresses_to_empty(r in record()) {
        let mut enc = Compressor::new();
        prop_assert_eq!(enc.compress_next(r.clone()), r.clone());
        prop_assert!(enc.compress_next(r).is_empty());
    }

    #[test]
    fn rewind_on_both_sides_keeps_round_trip(
        records in prop::collection::vec(record(), 1..12),
        cut in 0usize..12,
    ) {
        let mut enc = Compressor::new();
        let mut dec = Decompressor::new();
        for (i, r) in records.iter().enumerate() {
            if i == cut {
                enc.rewind();
                dec.rewind();
            }
            let pruned = enc.compress_next(r.clone());
            if i == cut {
                prop_assert_eq!(&pruned, r);
            }
            prop_assert_eq!(&dec.decompress_next(pruned), r);
        }
    }
}
