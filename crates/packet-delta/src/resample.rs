//! Temporal resampling of decoded records, to play a recording back at a
//! lower rate than it was captured.

use chrono::{DateTime, TimeDelta, Utc};
use packet_value::{Record, Scalar, Value};
use tracing::debug;

use crate::config::ResampleConfig;
use crate::error::{DeltaError, DeltaResult};

/// Merges consecutive full records until a minimum delay has elapsed.
///
/// Each call to `next` takes one record as the anchor, then pulls further
/// records until one is at least `min_packet_delay` after the anchor. The
/// records of the window are folded into one: later values win, except that
/// a `Scalar::None` leaf (a dropped camera frame, say) keeps the last
/// non-`None` value seen earlier in the window. Its input must be fully
/// restored records, for example the output of
/// [`Decompressed`](crate::Decompressed).
///
/// If the source ends before the delay elapses, the window merged so far is
/// emitted. A record without a timestamp at the configured key yields
/// [`DeltaError::MissingTimestamp`]; the records already pulled into that
/// window are dropped and the iterator is exhausted after the error.
#[derive(Debug, Clone)]
pub struct Resampled<I> {
    source: I,
    min_delay: TimeDelta,
    timestamp_key: String,
    failed: bool,
}

impl<I> Resampled<I> {
    pub fn new(source: I, config: &ResampleConfig) -> Self {
        Self {
            source,
            min_delay: config.min_packet_delay(),
            timestamp_key: config.timestamp_key.clone(),
            failed: false,
        }
    }

    pub fn into_inner(self) -> I {
        self.source
    }

    fn timestamp(&self, record: &Record) -> DeltaResult<DateTime<Utc>> {
        record
            .get(&self.timestamp_key)
            .and_then(Value::as_scalar)
            .and_then(Scalar::as_timestamp)
            .ok_or_else(|| DeltaError::MissingTimestamp {
                key: self.timestamp_key.clone(),
            })
    }
}

impl<I: Iterator<Item = Record>> Iterator for Resampled<I> {
    type Item = DeltaResult<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let result = self.next_window()?;
        self.failed = result.is_err();
        Some(result)
    }
}

impl<I: Iterator<Item = Record>> Resampled<I> {
    fn next_window(&mut self) -> Option<DeltaResult<Record>> {
        let mut window = self.source.next()?;
        let start = match self.timestamp(&window) {
            Ok(t) => t,
            Err(err) => return Some(Err(err)),
        };

        let mut merged = 0usize;
        while let Some(record) = self.source.next() {
            let at = match self.timestamp(&record) {
                Ok(t) => t,
                Err(err) => return Some(Err(err)),
            };
            fold_into(&mut window, record);
            merged += 1;
            if at - start >= self.min_delay {
                break;
            }
        }
        debug!(merged, "resampled window");
        Some(Ok(window))
    }
}

/// Folds `incoming` over `window`: incoming values replace earlier ones,
/// nested mappings fold recursively, and a `None` leaf leaves the earlier
/// value in place.
fn fold_into(window: &mut Record, incoming: Record) {
    for (key, value) in incoming {
        if let Some(slot) = window.get_mut(&key) {
            match (slot, value) {
                (_, value) if value.is_none_marker() => {}
                (Value::Mapping(earlier), Value::Mapping(later)) => fold_into(earlier, later),
                (slot, value) => *slot = value,
            }
            continue;
        }
        window.insert(key, value);
    }
}
