//! Error type of this crate.

/// Errors raised when building or querying an [`EliasGammaSeq`](crate::EliasGammaSeq).
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input values were not strictly increasing.
    #[error("val must be greater than the last one {prev}, but got {val} at position {pos}.")]
    NotIncreasing {
        /// Position of the offending value.
        pos: usize,
        /// Last accepted value.
        prev: u64,
        /// Offending value.
        val: u64,
    },

    /// The first value does not leave room for its delta `val + 1`.
    #[error("the first val must be less than {}, but got {val}.", u64::MAX)]
    ValueOverflow {
        /// Offending value.
        val: u64,
    },

    /// The checkpoint interval was zero.
    #[error("interval must be positive.")]
    InvalidInterval,

    /// The bit sink handed to the builder already held bits.
    #[error("sink must be empty, but already holds {num_bits} bits.")]
    NonEmptySink {
        /// Number of bits found in the sink.
        num_bits: usize,
    },

    /// A logical position was outside of the sequence.
    #[error("pos must be less than {len}, but got {pos}.")]
    OutOfRange {
        /// Requested position.
        pos: usize,
        /// Upper bound (exclusive) for the requested position.
        len: usize,
    },

    /// A merge query was smaller than the previous one.
    #[error("queries must be non-decreasing, but got {val} after {prev}.")]
    UnsortedQuery {
        /// Previous query.
        prev: u64,
        /// Offending query.
        val: u64,
    },

    /// Decoding ran past the end of the bit buffer.
    #[error("decoding ran past the end of the buffer at bit {bit_pos}.")]
    BufferExhausted {
        /// Bit position at which decoding stopped.
        bit_pos: usize,
    },
}

/// A specialized [`Result`](std::result::Result) with [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
