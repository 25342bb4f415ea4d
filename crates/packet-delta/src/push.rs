//! Push adapters: explicit per-record calls plus `rewind`, for callers that
//! seek around the underlying recording.

use packet_value::Record;

use crate::codec::{Codec, CodecState};
use crate::error::{DeltaError, DeltaResult};

/// Encoder side of the codec, driven one record at a time.
#[derive(Debug, Clone)]
pub struct Compressor {
    codec: Codec,
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new()
    }
}

impl Compressor {
    pub fn new() -> Self {
        Self {
            codec: Codec::compressor(),
        }
    }

    /// Returns `record` with every field equal to the previous state removed.
    pub fn compress_next(&mut self, record: Record) -> Record {
        self.codec.process(record)
    }

    pub fn rewind(&mut self) {
        self.codec.rewind();
    }

    /// Index the next compressed record will have in the stream.
    pub fn position(&self) -> u64 {
        self.codec.position()
    }

    pub fn state(&self) -> CodecState {
        self.codec.state()
    }

    pub fn reference(&self) -> Option<&Record> {
        self.codec.reference()
    }
}

/// Decoder side of the codec, driven one record at a time.
#[derive(Debug, Clone)]
pub struct Decompressor {
    codec: Codec,
}

impl Default for Decompressor {
    fn default() -> Self {
        Self::new()
    }
}

impl Decompressor {
    pub fn new() -> Self {
        Self {
            codec: Codec::decompressor(),
        }
    }

    /// Returns `record` with every pruned field restored.
    pub fn decompress_next(&mut self, record: Record) -> Record {
        self.codec.process(record)
    }

    /// Like [`decompress_next`](Self::decompress_next), but first checks that
    /// `index` is the record this decoder expects next.
    ///
    /// `index` is the value [`Compressor::position`] reported before the
    /// record was compressed. On mismatch the decoder is left untouched and
    /// [`DeltaError::OutOfOrder`] is returned; the caller must rewind both
    /// sides before resuming.
    pub fn decompress_at(&mut self, index: u64, record: Record) -> DeltaResult<Record> {
        let expected = self.codec.position();
        if index != expected {
            return Err(DeltaError::OutOfOrder {
                expected,
                actual: index,
            });
        }
        Ok(self.codec.process(record))
    }

    pub fn rewind(&mut self) {
        self.codec.rewind();
    }

    /// Index of the next record this decoder expects.
    pub fn position(&self) -> u64 {
        self.codec.position()
    }

    pub fn state(&self) -> CodecState {
        self.codec.state()
    }

    pub fn reference(&self) -> Option<&Record> {
        self.codec.reference()
    }
}
