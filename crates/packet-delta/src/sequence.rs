//! Sequence adapters: lazily compress or decompress an iterator of records.
//!
//! Each adapter pulls exactly one source record per output record and keeps
//! no lookahead. They cannot resume after a seek in the source; use the push
//! adapters in [`crate::push`] for that.

use std::iter::FusedIterator;

use packet_value::Record;

use crate::codec::Codec;
use crate::config::ResampleConfig;
use crate::resample::Resampled;

/// Iterator of pruned records, see [`DeltaIteratorExt::compressed`].
#[derive(Debug, Clone)]
pub struct Compressed<I> {
    source: I,
    codec: Codec,
}

impl<I> Compressed<I> {
    pub fn new(source: I) -> Self {
        Self {
            source,
            codec: Codec::compressor(),
        }
    }

    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    pub fn into_inner(self) -> I {
        self.source
    }
}

impl<I: Iterator<Item = Record>> Iterator for Compressed<I> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        let record = self.source.next()?;
        Some(self.codec.process(record))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}

impl<I: FusedIterator<Item = Record>> FusedIterator for Compressed<I> {}

/// Iterator of fully restored records, see [`DeltaIteratorExt::decompressed`].
#[derive(Debug, Clone)]
pub struct Decompressed<I> {
    source: I,
    codec: Codec,
}

impl<I> Decompressed<I> {
    pub fn new(source: I) -> Self {
        Self {
            source,
            codec: Codec::decompressor(),
        }
    }

    pub fn codec(&self) -> &Codec {
        &self.codec
    }

    pub fn into_inner(self) -> I {
        self.source
    }
}

impl<I: Iterator<Item = Record>> Iterator for Decompressed<I> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        let record = self.source.next()?;
        Some(self.codec.process(record))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.source.size_hint()
    }
}

impl<I: FusedIterator<Item = Record>> FusedIterator for Decompressed<I> {}

/// Adapter methods for iterators of records.
///
/// ```
/// use packet_delta::DeltaIteratorExt;
/// use packet_value::record_from_json;
/// use serde_json::json;
///
/// let records = vec![
///     record_from_json(&json!({"pos": {"x": 12, "y": 10, "z": 8}})).unwrap(),
///     record_from_json(&json!({"pos": {"x": 2, "y": 3, "z": 8}})).unwrap(),
/// ];
///
/// let pruned: Vec<_> = records.clone().into_iter().compressed().collect();
/// assert_eq!(pruned[1], record_from_json(&json!({"pos": {"x": 2, "y": 3}})).unwrap());
///
/// let restored: Vec<_> = pruned.into_iter().decompressed().collect();
/// assert_eq!(restored, records);
/// ```
pub trait DeltaIteratorExt: Iterator<Item = Record> + Sized {
    /// Prunes each record against the previous state of the stream.
    fn compressed(self) -> Compressed<Self> {
        Compressed::new(self)
    }

    /// Restores each pruned record from the previous state of the stream.
    fn decompressed(self) -> Decompressed<Self> {
        Decompressed::new(self)
    }

    /// Merges full records into windows of at least the configured delay.
    fn resampled(self, config: &ResampleConfig) -> Resampled<Self> {
        Resampled::new(self, config)
    }
}

impl<I: Iterator<Item = Record>> DeltaIteratorExt for I {}
