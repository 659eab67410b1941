//! # `gammaseq`: Elias-gamma coded monotone sequences in Rust
//!
//! `gammaseq` stores a strictly increasing sequence of 64-bit integers as
//! [Elias-gamma](https://en.wikipedia.org/wiki/Elias_gamma_coding) coded gaps,
//! with a sparse checkpoint index for random access and search.
//!
//! ## Data structures
//!
//! - [`EliasGammaSeq`]
//!   - Compressed strictly increasing sequence supporting access, exact/successor/predecessor search,
//!     iteration, and merge-style lookup of sorted query streams.
//! - [`Checkpoints`]
//!   - Sampled table of decoding states used to resume decoding in the middle of the buffer.
//! - [`BitWriter`]
//!   - Growable bit buffer implementing [`BitSink`], into which codewords are written.
//!
//! ## Logging
//!
//! Construction and checkpoint jumps emit [`tracing`](https://docs.rs/tracing) events at
//! `debug` and `trace` levels. Install any subscriber to observe them.
//!
//! ## Limitation
//!
//! This library is designed to run on 64-bit machines.
#![deny(missing_docs)]

#[cfg(not(target_pointer_width = "64"))]
compile_error!("`target_pointer_width` must be 64");

pub mod bit_sink;
mod broadword;
pub mod checkpoints;
pub mod error;
pub mod gamma;
pub mod gamma_seq;
pub mod utils;

pub use bit_sink::{BitSink, BitWriter};
pub use checkpoints::{Checkpoints, DEFAULT_INTERVAL};
pub use error::{Error, Result};
pub use gamma_seq::iter::{Iter, MergeIter, DEFAULT_LOOKAHEAD};
pub use gamma_seq::{EliasGammaSeq, EliasGammaSeqBuilder};
