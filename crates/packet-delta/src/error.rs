use thiserror::Error;

/// Errors reported by the codec adapters.
///
/// The diff and patch engines themselves never fail: schema drift and kind
/// mismatches degrade to "seed the reference" or "treat as changed".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DeltaError {
    /// The caller fed the decoder a record that is not the next one in the
    /// stream. Both sides must be rewound before resuming at a new offset.
    #[error("decoder expected record {expected} but was given record {actual}")]
    OutOfOrder { expected: u64, actual: u64 },
    #[error("record has no timestamp at key {key:?}")]
    MissingTimestamp { key: String },
}

pub type DeltaResult<T> = Result<T, DeltaError>;
