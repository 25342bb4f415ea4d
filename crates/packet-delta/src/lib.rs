//! packet-delta - Delta codec for recorded telemetry packet streams.
//!
//! Consecutive packets of a driving session repeat most of their fields and
//! often whole camera frames. The encoder side prunes every field equal to
//! the previous state of the stream; the decoder side restores pruned fields
//! from its own copy of that state. Both sides keep a *reference* record and
//! must see the same records in the same order.
//!
//! - [`diff`] and [`patch`] are the recursive engines.
//! - [`Codec`] is the state machine shared by every adapter.
//! - [`Compressor`] / [`Decompressor`] are push adapters with `rewind`, for
//!   players that seek.
//! - [`DeltaIteratorExt`] adds lazy `compressed()` / `decompressed()`
//!   adapters to any iterator of records, plus `resampled()` for lower-rate
//!   playback.
//!
//! ```
//! use packet_delta::{Compressor, Decompressor};
//! use packet_value::record_from_json;
//! use serde_json::json;
//!
//! let r1 = record_from_json(&json!({"pos": {"x": 12, "y": 10, "z": 8}})).unwrap();
//! let r2 = record_from_json(&json!({"pos": {"x": 2, "y": 3, "z": 8}})).unwrap();
//!
//! let mut enc = Compressor::new();
//! let mut dec = Decompressor::new();
//!
//! assert_eq!(dec.decompress_next(enc.compress_next(r1.clone())), r1);
//!
//! let pruned = enc.compress_next(r2.clone());
//! assert_eq!(pruned, record_from_json(&json!({"pos": {"x": 2, "y": 3}})).unwrap());
//! assert_eq!(dec.decompress_next(pruned), r2);
//! ```

mod codec;
mod config;
mod diff;
mod error;
mod patch;
mod push;
mod resample;
mod sequence;

pub use codec::{Codec, CodecState, Direction};
pub use config::ResampleConfig;
pub use diff::diff;
pub use error::{DeltaError, DeltaResult};
pub use patch::patch;
pub use push::{Compressor, Decompressor};
pub use resample::Resampled;
pub use sequence::{Compressed, Decompressed, DeltaIteratorExt};
