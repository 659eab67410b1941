//! Compressed strictly increasing sequence through Elias-gamma coded gaps.
#![cfg(target_pointer_width = "64")]

pub mod iter;

use std::num::NonZeroU64;

use crate::bit_sink::{BitSink, BitWriter, BYTE_LEN};
use crate::checkpoints::{Checkpoints, DEFAULT_INTERVAL};
use crate::error::{Error, Result};
use crate::gamma::{self, GammaReader};
use crate::utils::MatrixView;
use iter::{Iter, MergeIter, DEFAULT_LOOKAHEAD};

/// Compressed strictly increasing sequence through Elias-gamma coded gaps.
///
/// The gaps between consecutive integers (where the first integer $`x_0`$ is
/// taken as the gap $`x_0 + 1`$) are written as gamma codewords into a dense byte
/// buffer, most-significant-bit-first.
/// A sequence of $`n`$ integers whose gaps are $`d_0, \dots, d_{n-1}`$ takes
/// $`\sum_i (2 \lfloor \lg d_i \rfloor + 1)`$ bits, plus a sampled [`Checkpoints`] table
/// storing one value and one bit offset every `interval` integers.
///
/// Random access and search queries resume decoding from the nearest checkpoint,
/// so that each query decodes at most `interval` codewords after a binary search
/// over the checkpoints. Iterators decode one codeword per step.
///
/// The structure is immutable once built. Every decoding walk is bounded by
/// [`Self::len()`], so that the zero bits padding the last byte are never decoded.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use gammaseq::EliasGammaSeq;
///
/// let seq = EliasGammaSeq::from_slice(&[1, 2, 4, 8, 16, 32, 100000])?;
///
/// assert_eq!(seq.len(), 7);
/// assert_eq!(seq.get(0)?, 1);
/// assert_eq!(seq.get(6)?, 100000);
/// assert_eq!(seq.get_two(2)?, (4, 8));
///
/// assert_eq!(seq.find_exact(8), Some(3));
/// assert_eq!(seq.find_exact(9), None);
/// assert_eq!(seq.find_next(9), Some(4));
/// assert_eq!(seq.find_floor(9), Some(3));
///
/// assert_eq!(seq.iter_from(10).collect::<Vec<_>>(), vec![16, 32, 100000]);
/// # Ok(())
/// # }
/// ```
///
/// # References
///
///  - P. Elias, "Universal codeword sets and representations of the integers,"
///    IEEE Transactions on Information Theory, 1975.
///  - A. Kyrola, and C. Guestrin, "GraphChi-DB: Simple Design for a Scalable Graph Database System
///    -- on Just a PC," arXiv:1403.0701, 2014.
#[derive(Clone, PartialEq, Eq)]
pub struct EliasGammaSeq {
    bytes: Vec<u8>,
    num_bits: usize,
    checkpoints: Checkpoints,
    len: usize,
}

impl EliasGammaSeq {
    /// Creates a new sequence from a slice of strictly increasing integers,
    /// sampling checkpoints every [`DEFAULT_INTERVAL`] integers.
    ///
    /// # Arguments
    ///
    /// - `vals`: Strictly increasing integers.
    ///
    /// # Errors
    ///
    /// An error is returned if
    ///
    /// - `vals` is not strictly increasing, or
    /// - `vals[0]` is [`u64::MAX`].
    ///
    /// # Examples
    ///
    /// ```
    /// use gammaseq::EliasGammaSeq;
    ///
    /// assert!(EliasGammaSeq::from_slice(&[0, 5, 7]).is_ok());
    /// assert!(EliasGammaSeq::from_slice(&[5, 5]).is_err());
    /// assert!(EliasGammaSeq::from_slice(&[5, 3]).is_err());
    /// ```
    pub fn from_slice(vals: &[u64]) -> Result<Self> {
        // Every codeword takes at least one bit.
        let sink = BitWriter::with_capacity(vals.len());
        let mut b = EliasGammaSeqBuilder::with_sink(sink, DEFAULT_INTERVAL)?;
        b.extend(vals.iter().copied())?;
        Ok(b.build())
    }

    /// Returns the `pos`-th integer.
    ///
    /// # Arguments
    ///
    /// - `pos`: Logical position.
    ///
    /// # Errors
    ///
    /// An error is returned if `self.len() <= pos`.
    ///
    /// # Complexity
    ///
    /// $`O(\textrm{interval})`$
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use gammaseq::EliasGammaSeq;
    ///
    /// let seq = EliasGammaSeq::from_slice(&[3, 10, 11])?;
    /// assert_eq!(seq.get(1)?, 10);
    /// assert!(seq.get(3).is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn get(&self, pos: usize) -> Result<u64> {
        if self.len() <= pos {
            return Err(Error::OutOfRange {
                pos,
                len: self.len(),
            });
        }
        let mut cursor = self.cursor_at(pos / self.interval());
        while cursor.num_decoded() <= pos {
            cursor.step()?;
        }
        Ok(cursor.value())
    }

    /// Returns the `pos`-th and `pos+1`-th integers, decoding them in a single walk.
    ///
    /// # Arguments
    ///
    /// - `pos`: Logical position.
    ///
    /// # Errors
    ///
    /// An error is returned if `self.len() <= pos + 1`.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use gammaseq::EliasGammaSeq;
    ///
    /// let seq = EliasGammaSeq::from_slice(&[3, 10, 11])?;
    /// assert_eq!(seq.get_two(1)?, (10, 11));
    /// assert!(seq.get_two(2).is_err());
    /// # Ok(())
    /// # }
    /// ```
    pub fn get_two(&self, pos: usize) -> Result<(u64, u64)> {
        if self.len() <= pos.saturating_add(1) {
            return Err(Error::OutOfRange {
                pos,
                len: self.len().saturating_sub(1),
            });
        }
        let mut cursor = self.cursor_at(pos / self.interval());
        while cursor.num_decoded() <= pos {
            cursor.step()?;
        }
        let first = cursor.value();
        Ok((first, cursor.step()?))
    }

    /// Finds the position `k` such that `self.get(k) == val`, or
    /// returns [`None`] if `val` is not stored.
    ///
    /// # Arguments
    ///
    /// - `val`: Integer to be searched.
    ///
    /// # Complexity
    ///
    /// $`O(\lg \frac{n}{\textrm{interval}} + \textrm{interval})`$
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use gammaseq::EliasGammaSeq;
    ///
    /// let seq = EliasGammaSeq::from_slice(&[3, 10, 11])?;
    /// assert_eq!(seq.find_exact(10), Some(1));
    /// assert_eq!(seq.find_exact(4), None);
    /// # Ok(())
    /// # }
    /// ```
    pub fn find_exact(&self, val: u64) -> Option<usize> {
        self.find(val, false)
    }

    /// Finds the smallest position `k` such that `val <= self.get(k)`, or
    /// returns [`None`] if every integer is smaller than `val`.
    ///
    /// # Arguments
    ///
    /// - `val`: Integer to be searched.
    ///
    /// # Complexity
    ///
    /// $`O(\lg \frac{n}{\textrm{interval}} + \textrm{interval})`$
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use gammaseq::EliasGammaSeq;
    ///
    /// let seq = EliasGammaSeq::from_slice(&[3, 10, 11])?;
    /// assert_eq!(seq.find_next(4), Some(1));
    /// assert_eq!(seq.find_next(11), Some(2));
    /// assert_eq!(seq.find_next(12), None);
    /// # Ok(())
    /// # }
    /// ```
    pub fn find_next(&self, val: u64) -> Option<usize> {
        self.find(val, true)
    }

    /// Finds the largest position `k` such that `self.get(k) <= val`, or
    /// returns [`None`] if every integer is greater than `val`.
    ///
    /// # Arguments
    ///
    /// - `val`: Integer to be searched.
    ///
    /// # Complexity
    ///
    /// $`O(\lg \frac{n}{\textrm{interval}} + \textrm{interval})`$
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use gammaseq::EliasGammaSeq;
    ///
    /// let seq = EliasGammaSeq::from_slice(&[3, 10, 11])?;
    /// assert_eq!(seq.find_floor(9), Some(0));
    /// assert_eq!(seq.find_floor(10), Some(1));
    /// assert_eq!(seq.find_floor(100), Some(2));
    /// assert_eq!(seq.find_floor(2), None);
    /// # Ok(())
    /// # }
    /// ```
    pub fn find_floor(&self, val: u64) -> Option<usize> {
        let k = self.checkpoints.floor(val)?;
        let mut cursor = self.cursor_at(k);
        while cursor.value() < val {
            let pos = cursor.num_decoded() - 1;
            if self.len() <= cursor.num_decoded() {
                return Some(pos);
            }
            if cursor.advance()? > val {
                return Some(pos);
            }
        }
        Some(cursor.num_decoded() - 1)
    }

    /// Creates an iterator of [`Iter`] to enumerate all integers.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use gammaseq::EliasGammaSeq;
    ///
    /// let seq = EliasGammaSeq::from_slice(&[3, 10, 11])?;
    /// let mut it = seq.iter();
    /// assert_eq!(it.next(), Some(3));
    /// assert_eq!(it.next(), Some(10));
    /// assert_eq!(it.next(), Some(11));
    /// assert_eq!(it.next(), None);
    /// # Ok(())
    /// # }
    /// ```
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(self)
    }

    /// Creates an iterator of [`Iter`] to enumerate integers no less than `start`.
    ///
    /// Decoding starts from the last checkpoint whose value is no greater than `start`.
    ///
    /// # Arguments
    ///
    /// - `start`: Lower bound (inclusive) of enumerated integers.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use gammaseq::EliasGammaSeq;
    ///
    /// let seq = EliasGammaSeq::from_slice(&[3, 10, 11])?;
    /// let mut it = seq.iter_from(4);
    /// assert_eq!(it.next(), Some(10));
    /// assert_eq!(it.next(), Some(11));
    /// assert_eq!(it.next(), None);
    /// # Ok(())
    /// # }
    /// ```
    pub fn iter_from(&self, start: u64) -> Iter<'_> {
        Iter::from_value(self, start)
    }

    /// Creates an iterator of [`MergeIter`] that reports, for each query in `queries`,
    /// the position of the equal integer or [`None`].
    ///
    /// Queries must be non-decreasing. Since the cursor only moves forward,
    /// a whole query stream is answered in a single pass over the buffer,
    /// skipping ahead through checkpoints when the next query is more than
    /// [`DEFAULT_LOOKAHEAD`] beyond the current integer.
    ///
    /// # Arguments
    ///
    /// - `queries`: Non-decreasing integers to be searched.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use gammaseq::EliasGammaSeq;
    ///
    /// let seq = EliasGammaSeq::from_slice(&[1, 2, 4, 8, 16, 32, 100000])?;
    /// let found = seq
    ///     .merge_iter([0, 3, 10, 100000])
    ///     .collect::<Result<Vec<_>, _>>()?;
    /// assert_eq!(found, vec![None, None, None, Some(6)]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn merge_iter<I>(&self, queries: I) -> MergeIter<'_, I::IntoIter>
    where
        I: IntoIterator<Item = u64>,
    {
        MergeIter::new(self, queries.into_iter(), DEFAULT_LOOKAHEAD)
    }

    /// Same as [`Self::merge_iter()`], but jumps through checkpoints only when
    /// the next query is more than `lookahead` beyond the current integer.
    ///
    /// # Arguments
    ///
    /// - `queries`: Non-decreasing integers to be searched.
    /// - `lookahead`: Distance threshold for checkpoint jumps.
    pub fn merge_iter_with_lookahead<I>(
        &self,
        queries: I,
        lookahead: u64,
    ) -> MergeIter<'_, I::IntoIter>
    where
        I: IntoIterator<Item = u64>,
    {
        MergeIter::new(self, queries.into_iter(), lookahead)
    }

    /// Gets the number of integers.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Checks if the sequence is empty.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gets the checkpoint interval.
    #[inline(always)]
    pub const fn interval(&self) -> usize {
        self.checkpoints.interval()
    }

    /// Gets the number of meaningful bits in the buffer.
    #[inline(always)]
    pub const fn num_bits(&self) -> usize {
        self.num_bits
    }

    /// Gets the encoded buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Gets the checkpoint table.
    pub const fn checkpoints(&self) -> &Checkpoints {
        &self.checkpoints
    }

    /// Returns the number of bytes occupied by the buffer and the checkpoint table.
    ///
    /// # Examples
    ///
    /// ```
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use gammaseq::EliasGammaSeq;
    ///
    /// let seq = EliasGammaSeq::from_slice(&[3, 10, 11])?;
    /// // 2 bytes of codewords and a single checkpoint.
    /// assert_eq!(seq.size_in_bytes(), 2 + 16);
    /// # Ok(())
    /// # }
    /// ```
    pub fn size_in_bytes(&self) -> usize {
        self.bytes.len() + self.checkpoints.size_in_bytes()
    }

    /// Creates a cursor resuming from the `k`-th checkpoint.
    #[inline(always)]
    pub(crate) fn cursor_at(&self, k: usize) -> BitCursor<'_> {
        let val = self.checkpoints.values()[k];
        let bit_offset = self.checkpoints.bit_offsets()[k] as usize;
        BitCursor {
            reader: GammaReader::new(&self.bytes, bit_offset),
            num_decoded: self.checkpoints.position(k) + 1,
            val,
        }
    }

    fn find(&self, val: u64, return_next: bool) -> Option<usize> {
        let Some(k) = self.checkpoints.floor(val) else {
            // Smaller than every integer.
            return (return_next && !self.is_empty()).then_some(0);
        };
        let mut cursor = self.cursor_at(k);
        while cursor.value() < val {
            if self.len() <= cursor.num_decoded() {
                return None;
            }
            cursor.advance()?;
        }
        (return_next || cursor.value() == val).then(|| cursor.num_decoded() - 1)
    }
}

impl<'a> IntoIterator for &'a EliasGammaSeq {
    type Item = u64;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Debug for EliasGammaSeq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut bits = vec![0u8; self.num_bits];
        let mut reader = GammaReader::new(&self.bytes, 0);
        for b in bits.iter_mut() {
            *b = reader.read_bit().unwrap_or(false) as u8;
        }
        f.debug_struct("EliasGammaSeq")
            .field("bits", &MatrixView::new(&bits, 2 * BYTE_LEN))
            .field("num_bits", &self.num_bits)
            .field("checkpoints", &MatrixView::new(self.checkpoints.values(), 8))
            .field("interval", &self.interval())
            .field("len", &self.len)
            .finish()
    }
}

/// Decoding state walking forward over the codewords of an [`EliasGammaSeq`].
///
/// It borrows the buffer and owns only the scalar state: the bit position,
/// the number of codewords consumed, and the last decoded integer.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BitCursor<'a> {
    reader: GammaReader<'a>,
    num_decoded: usize,
    val: u64,
}

impl<'a> BitCursor<'a> {
    /// Creates a cursor placed before the first codeword.
    pub(crate) const fn new(bytes: &'a [u8]) -> Self {
        Self {
            reader: GammaReader::new(bytes, 0),
            num_decoded: 0,
            val: 0,
        }
    }

    /// Gets the number of integers decoded so far, i.e., the position of the next one.
    #[inline(always)]
    pub(crate) const fn num_decoded(&self) -> usize {
        self.num_decoded
    }

    /// Gets the position of the last decoded integer, or [`None`] before the first one.
    #[inline(always)]
    pub(crate) const fn position(&self) -> Option<usize> {
        self.num_decoded.checked_sub(1)
    }

    /// Gets the last decoded integer (meaningless before the first one).
    #[inline(always)]
    pub(crate) const fn value(&self) -> u64 {
        self.val
    }

    /// Decodes the next integer, or returns [`None`] at the end of the buffer.
    #[inline(always)]
    pub(crate) fn advance(&mut self) -> Option<u64> {
        let delta = self.reader.read_gamma()?;
        self.val = if self.num_decoded == 0 {
            delta - 1
        } else {
            self.val.checked_add(delta)?
        };
        self.num_decoded += 1;
        Some(self.val)
    }

    /// Same as [`Self::advance()`] but reports the end of the buffer as an error.
    #[inline(always)]
    pub(crate) fn step(&mut self) -> Result<u64> {
        self.advance().ok_or(Error::BufferExhausted {
            bit_pos: self.reader.position(),
        })
    }
}

/// Builder for [`EliasGammaSeq`].
///
/// Integers are encoded as they are pushed, into a [`BitWriter`] or any other [`BitSink`].
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use gammaseq::EliasGammaSeqBuilder;
///
/// let mut b = EliasGammaSeqBuilder::with_interval(4)?;
/// b.push(1)?;
/// b.push(3)?;
/// b.extend([5, 7, 11])?;
///
/// assert_eq!(b.len(), 5);
/// assert!(b.push(11).is_err());
///
/// let seq = b.build();
/// assert_eq!(seq.len(), 5);
/// assert_eq!(seq.interval(), 4);
/// # Ok(())
/// # }
/// ```
pub struct EliasGammaSeqBuilder<S = BitWriter> {
    sink: S,
    checkpoints: Checkpoints,
    last: Option<u64>,
    len: usize,
}

impl EliasGammaSeqBuilder<BitWriter> {
    /// Creates a new builder sampling checkpoints every [`DEFAULT_INTERVAL`] integers.
    pub fn new() -> Self {
        Self {
            sink: BitWriter::new(),
            checkpoints: Checkpoints::new(DEFAULT_INTERVAL),
            last: None,
            len: 0,
        }
    }

    /// Creates a new builder sampling checkpoints every `interval` integers.
    ///
    /// # Errors
    ///
    /// An error is returned if `interval == 0`.
    pub fn with_interval(interval: usize) -> Result<Self> {
        Self::with_sink(BitWriter::new(), interval)
    }
}

impl Default for EliasGammaSeqBuilder<BitWriter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> EliasGammaSeqBuilder<S>
where
    S: BitSink,
{
    /// Creates a new builder writing codewords into `sink`.
    ///
    /// # Arguments
    ///
    /// - `sink`: Empty bit sink.
    /// - `interval`: Distance in logical positions between checkpoints.
    ///
    /// # Errors
    ///
    /// An error is returned if
    ///
    /// - `interval == 0`, or
    /// - `sink` already holds some bits.
    pub fn with_sink(sink: S, interval: usize) -> Result<Self> {
        if interval == 0 {
            return Err(Error::InvalidInterval);
        }
        if sink.num_bits() != 0 {
            return Err(Error::NonEmptySink {
                num_bits: sink.num_bits(),
            });
        }
        Ok(Self {
            sink,
            checkpoints: Checkpoints::new(interval),
            last: None,
            len: 0,
        })
    }

    /// Pushes integer `val` at the end.
    ///
    /// # Arguments
    ///
    /// - `val`: Pushed integer that must be greater than the last one.
    ///
    /// # Errors
    ///
    /// An error is returned if
    ///
    /// - `val` is no greater than the last one, or
    /// - `val` is the first one and equals [`u64::MAX`].
    ///
    /// Nothing is written on error.
    pub fn push(&mut self, val: u64) -> Result<()> {
        let delta = match self.last {
            None => NonZeroU64::new(val.wrapping_add(1)).ok_or(Error::ValueOverflow { val })?,
            Some(prev) => NonZeroU64::new(val.wrapping_sub(prev))
                .filter(|_| prev < val)
                .ok_or(Error::NotIncreasing {
                    pos: self.len,
                    prev,
                    val,
                })?,
        };
        gamma::write_gamma(&mut self.sink, delta);
        self.checkpoints
            .record(self.len, val, self.sink.num_bits());
        self.last = Some(val);
        self.len += 1;
        Ok(())
    }

    /// Appends integers at the end.
    ///
    /// # Arguments
    ///
    /// - `vals`: Pushed integers that are strictly increasing.
    ///
    /// # Errors
    ///
    /// An error is returned under the same conditions as [`Self::push()`];
    /// the integers before the offending one remain pushed.
    pub fn extend<I>(&mut self, vals: I) -> Result<()>
    where
        I: IntoIterator<Item = u64>,
    {
        for x in vals {
            self.push(x)?;
        }
        Ok(())
    }

    /// Builds [`EliasGammaSeq`] from the pushed integers.
    pub fn build(self) -> EliasGammaSeq {
        let Self {
            sink,
            mut checkpoints,
            last,
            len,
        } = self;
        let num_bits = sink.num_bits();
        if let Some(last) = last {
            checkpoints.finish(len, last, num_bits);
        }
        let bytes = sink.finish();
        tracing::debug!(
            num_vals = len,
            num_bits,
            num_checkpoints = checkpoints.len(),
            interval = checkpoints.interval(),
            "elias-gamma sequence built"
        );
        EliasGammaSeq {
            bytes,
            num_bits,
            checkpoints,
            len,
        }
    }

    /// Gets the number of pushed integers.
    #[inline(always)]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Checks if no integer has been pushed.
    #[inline(always)]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gets the checkpoint interval.
    #[inline(always)]
    pub const fn interval(&self) -> usize {
        self.checkpoints.interval()
    }
}
