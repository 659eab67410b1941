//! Sampled index of decoding states.
#![cfg(target_pointer_width = "64")]

use std::mem::size_of;

/// Default distance in logical positions between consecutive checkpoints.
pub const DEFAULT_INTERVAL: usize = 128;

/// Sparse table of decoding states sampled every `interval` logical positions.
///
/// The `k`-th checkpoint holds the value stored at logical position `k * interval`
/// and the bit offset where the codeword of the following position starts.
/// The table has `len / interval + 1` slots for a non-empty sequence of `len` values.
/// Slots past the last sampled position are padded with the final value and
/// the final bit offset, so that both arrays are dense and non-decreasing.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use gammaseq::EliasGammaSeqBuilder;
///
/// let mut b = EliasGammaSeqBuilder::with_interval(2)?;
/// b.extend([3, 4, 10, 11])?;
/// let seq = b.build();
///
/// let cps = seq.checkpoints();
/// assert_eq!(cps.len(), 3);
/// assert_eq!(cps.num_sampled(), 2);
/// assert_eq!(cps.values(), &[3, 10, 11]);
/// assert_eq!(cps.get(1), Some((10, 11)));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoints {
    values: Vec<u64>,
    bit_offsets: Vec<u64>,
    interval: usize,
    num_sampled: usize,
}

impl Checkpoints {
    /// Creates an empty table with the given (positive) sampling interval.
    pub(crate) fn new(interval: usize) -> Self {
        debug_assert_ne!(interval, 0);
        Self {
            values: vec![],
            bit_offsets: vec![],
            interval,
            num_sampled: 0,
        }
    }

    /// Records the state after encoding logical position `pos`, if `pos` is sampled.
    #[inline(always)]
    pub(crate) fn record(&mut self, pos: usize, val: u64, bit_offset: usize) {
        if pos % self.interval == 0 {
            self.values.push(val);
            self.bit_offsets.push(bit_offset as u64);
            self.num_sampled += 1;
        }
    }

    /// Pads the table to `num_vals / interval + 1` slots with the final state.
    pub(crate) fn finish(&mut self, num_vals: usize, last_val: u64, num_bits: usize) {
        if num_vals == 0 {
            return;
        }
        debug_assert_eq!(self.num_sampled, (num_vals + self.interval - 1) / self.interval);
        let num_slots = num_vals / self.interval + 1;
        while self.values.len() < num_slots {
            self.values.push(last_val);
            self.bit_offsets.push(num_bits as u64);
        }
        self.values.shrink_to_fit();
        self.bit_offsets.shrink_to_fit();
    }

    /// Returns the index of the last sampled checkpoint whose value is no greater than `val`,
    /// or [`None`] if `val` is smaller than every checkpoint value.
    ///
    /// Padded slots are never returned.
    ///
    /// # Complexity
    ///
    /// $`O(\lg m)`$ for $`m`$ checkpoints.
    #[inline(always)]
    pub fn floor(&self, val: u64) -> Option<usize> {
        // Insertion point after any equal value, minus one.
        let ins = self.values[..self.num_sampled].partition_point(|&x| x <= val);
        ins.checked_sub(1)
    }

    /// Returns the value and the bit offset of the `k`-th slot, or [`None`] if out of bounds.
    #[inline(always)]
    pub fn get(&self, k: usize) -> Option<(u64, usize)> {
        Some((*self.values.get(k)?, *self.bit_offsets.get(k)? as usize))
    }

    /// Returns the logical position covered by the `k`-th checkpoint.
    #[inline(always)]
    pub const fn position(&self, k: usize) -> usize {
        k * self.interval
    }

    /// Gets the checkpoint values.
    pub fn values(&self) -> &[u64] {
        &self.values
    }

    /// Gets the bit offsets, parallel to [`Self::values()`].
    pub fn bit_offsets(&self) -> &[u64] {
        &self.bit_offsets
    }

    /// Gets the number of slots, including padded ones.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Checks if the table has no slot.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gets the number of slots that sample a real logical position.
    #[inline(always)]
    pub const fn num_sampled(&self) -> usize {
        self.num_sampled
    }

    /// Gets the sampling interval.
    #[inline(always)]
    pub const fn interval(&self) -> usize {
        self.interval
    }

    /// Returns the number of bytes occupied by the two arrays.
    pub fn size_in_bytes(&self) -> usize {
        self.values.len() * size_of::<u64>() + self.bit_offsets.len() * size_of::<u64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(vals: &[u64], interval: usize) -> Checkpoints {
        // Pretends every codeword takes one bit.
        let mut cps = Checkpoints::new(interval);
        for (i, &x) in vals.iter().enumerate() {
            cps.record(i, x, i + 1);
        }
        if let Some(&last) = vals.last() {
            cps.finish(vals.len(), last, vals.len());
        }
        cps
    }

    #[test]
    fn test_padding() {
        let cps = build(&[1, 2, 3, 4], 2);
        assert_eq!(cps.len(), 3);
        assert_eq!(cps.num_sampled(), 2);
        assert_eq!(cps.values(), &[1, 3, 4]);
        assert_eq!(cps.bit_offsets(), &[1, 3, 4]);

        let cps = build(&[1, 2, 3, 4, 5], 2);
        assert_eq!(cps.len(), 3);
        assert_eq!(cps.num_sampled(), 3);
        assert_eq!(cps.values(), &[1, 3, 5]);
    }

    #[test]
    fn test_empty() {
        let cps = build(&[], 4);
        assert!(cps.is_empty());
        assert_eq!(cps.floor(10), None);
        assert_eq!(cps.size_in_bytes(), 0);
    }

    #[test]
    fn test_floor() {
        let cps = build(&[5, 6, 10, 12, 20, 21], 2);
        assert_eq!(cps.values(), &[5, 10, 20, 21]);
        assert_eq!(cps.floor(4), None);
        assert_eq!(cps.floor(5), Some(0));
        assert_eq!(cps.floor(9), Some(0));
        assert_eq!(cps.floor(10), Some(1));
        assert_eq!(cps.floor(20), Some(2));
        // The padded slot is skipped.
        assert_eq!(cps.floor(21), Some(2));
        assert_eq!(cps.floor(u64::MAX), Some(2));
    }

    #[test]
    fn test_get() {
        let cps = build(&[5, 6, 10], 2);
        assert_eq!(cps.get(0), Some((5, 1)));
        assert_eq!(cps.get(1), Some((10, 3)));
        assert_eq!(cps.get(2), None);
        assert_eq!(cps.position(1), 2);
    }
}
