//! The stateful codec shared by the push and sequence adapters.

use packet_value::Record;
use tracing::debug;

use crate::diff::diff;
use crate::patch::patch;

/// Which engine a [`Codec`] drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Encoder side: prunes fields that repeat the reference.
    Compress,
    /// Decoder side: restores pruned fields from the reference.
    Decompress,
}

/// Whether a [`Codec`] holds a reference record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecState {
    /// No record processed since creation or the last rewind.
    Uninitialized,
    /// The reference holds the last fully expanded record.
    Synchronized,
}

/// One direction of the delta codec together with its reference record.
///
/// ```text
/// UNINITIALIZED --process(r)--> SYNCHRONIZED    reference := r, output r
/// SYNCHRONIZED  --process(r)--> SYNCHRONIZED    output diff/patch(reference, r)
/// SYNCHRONIZED  --rewind()-->   UNINITIALIZED   reference dropped
/// UNINITIALIZED --rewind()-->   UNINITIALIZED
/// ```
///
/// Encoder and decoder must process the same records in the same order.
/// To jump to another offset, rewind both.
#[derive(Debug, Clone)]
pub struct Codec {
    direction: Direction,
    reference: Option<Record>,
    position: u64,
}

impl Codec {
    pub fn new(direction: Direction) -> Self {
        Self {
            direction,
            reference: None,
            position: 0,
        }
    }

    pub fn compressor() -> Self {
        Self::new(Direction::Compress)
    }

    pub fn decompressor() -> Self {
        Self::new(Direction::Decompress)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn state(&self) -> CodecState {
        match self.reference {
            Some(_) => CodecState::Synchronized,
            None => CodecState::Uninitialized,
        }
    }

    /// Records processed since creation or the last rewind.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// The last fully expanded record, if any.
    pub fn reference(&self) -> Option<&Record> {
        self.reference.as_ref()
    }

    /// Runs one record through the codec.
    ///
    /// The first record after creation or a rewind passes through unchanged
    /// and becomes the reference.
    pub fn process(&mut self, record: Record) -> Record {
        let direction = self.direction;
        let out = match self.reference.as_mut() {
            Some(reference) => match direction {
                Direction::Compress => diff(reference, record),
                Direction::Decompress => patch(reference, record),
            },
            None => {
                debug!(?direction, fields = record.len(), "initializing reference");
                self.reference = Some(record.clone());
                record
            }
        };
        self.position += 1;
        out
    }

    /// Drops the reference; the next record is treated as a first record.
    pub fn rewind(&mut self) {
        if self.reference.take().is_some() {
            debug!(direction = ?self.direction, position = self.position, "rewinding codec");
        }
        self.position = 0;
    }
}
