//! Elias-gamma codes over MSB-first bit buffers.
//!
//! A positive integer $`x`$ with $`z = \lfloor \lg x \rfloor`$ is written as $`z`$ zero bits
//! followed by the $`z + 1`$ bits of $`x`$ from the highest one down to the lowest one.
//! The codeword takes $`2z + 1`$ bits and always contains its leading one bit, so that
//! codewords can be concatenated without separators.
#![cfg(target_pointer_width = "64")]

use std::num::NonZeroU64;

use crate::bit_sink::{BitSink, BYTE_LEN};
use crate::broadword;
use crate::utils::needed_bits;

/// Appends the gamma codeword of `x` to `sink`, returning the number of bits written.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroU64;
/// use gammaseq::bit_sink::{BitSink, BitWriter};
/// use gammaseq::gamma::write_gamma;
///
/// let mut bw = BitWriter::new();
/// assert_eq!(write_gamma(&mut bw, NonZeroU64::new(1).unwrap()), 1);
/// assert_eq!(write_gamma(&mut bw, NonZeroU64::new(5).unwrap()), 5);
/// assert_eq!(bw.finish(), vec![0b1001_0100]);
/// ```
#[inline(always)]
pub fn write_gamma<S: BitSink>(sink: &mut S, x: NonZeroU64) -> usize {
    let x = x.get();
    let zeros = 63 - x.leading_zeros() as usize;
    for _ in 0..zeros {
        sink.push_bit(false);
    }
    sink.push_bits(x, zeros + 1);
    2 * zeros + 1
}

/// Returns the length in bits of the gamma codeword of `x`.
///
/// # Examples
///
/// ```
/// use std::num::NonZeroU64;
/// use gammaseq::gamma::gamma_len;
///
/// assert_eq!(gamma_len(NonZeroU64::new(1).unwrap()), 1);
/// assert_eq!(gamma_len(NonZeroU64::new(4).unwrap()), 5);
/// assert_eq!(gamma_len(NonZeroU64::new(u64::MAX).unwrap()), 127);
/// ```
#[inline(always)]
pub fn gamma_len(x: NonZeroU64) -> usize {
    2 * needed_bits(x.get()) - 1
}

/// Reader of bits and gamma codewords from an MSB-first byte buffer.
///
/// It only borrows the buffer. Every read returns [`None`] instead of
/// going past the end of the buffer, leaving the reader where it stopped.
///
/// # Examples
///
/// ```
/// use gammaseq::gamma::GammaReader;
///
/// // Codewords of 1, 5, and 2.
/// let bytes = [0b1001_0101, 0b0000_0000];
/// let mut r = GammaReader::new(&bytes, 0);
///
/// assert_eq!(r.read_gamma(), Some(1));
/// assert_eq!(r.read_gamma(), Some(5));
/// assert_eq!(r.read_gamma(), Some(2));
/// assert_eq!(r.position(), 9);
/// assert_eq!(r.read_gamma(), None);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct GammaReader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> GammaReader<'a> {
    /// Creates a reader starting at bit position `pos`.
    pub const fn new(bytes: &'a [u8], pos: usize) -> Self {
        Self { bytes, pos }
    }

    /// Gets the current bit position.
    #[inline(always)]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Gets the number of bits left in the buffer.
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        (self.bytes.len() * BYTE_LEN).saturating_sub(self.pos)
    }

    /// Reads the next bit, or returns [`None`] at the end of the buffer.
    #[inline(always)]
    pub fn read_bit(&mut self) -> Option<bool> {
        let byte = *self.bytes.get(self.pos / BYTE_LEN)?;
        let bit = (byte >> (BYTE_LEN - 1 - self.pos % BYTE_LEN)) & 1 == 1;
        self.pos += 1;
        Some(bit)
    }

    /// Reads the next `len` bits as an integer whose highest bit is the first one read,
    /// or returns [`None`] if `len` is greater than 64 or fewer than `len` bits are left.
    ///
    /// # Examples
    ///
    /// ```
    /// use gammaseq::gamma::GammaReader;
    ///
    /// let bytes = [0b1011_0110, 0b1000_0000];
    /// let mut r = GammaReader::new(&bytes, 2);
    ///
    /// assert_eq!(r.read_bits(7), Some(0b11_0110_1));
    /// assert_eq!(r.read_bits(8), None);
    /// ```
    #[inline(always)]
    pub fn read_bits(&mut self, len: usize) -> Option<u64> {
        if 64 < len || self.remaining() < len {
            return None;
        }
        let mut x = 0u64;
        let mut left = len;
        while left != 0 {
            let shift = self.pos % BYTE_LEN;
            let room = BYTE_LEN - shift;
            let take = room.min(left);
            let byte = self.bytes[self.pos / BYTE_LEN] as u64;
            let chunk = (byte >> (room - take)) & ((1 << take) - 1);
            x = (x << take) | chunk;
            self.pos += take;
            left -= take;
        }
        Some(x)
    }

    /// Decodes the next gamma codeword, or returns [`None`] if the buffer ends
    /// before the codeword does.
    ///
    /// On [`None`], the reader has consumed the bits it inspected.
    #[inline(always)]
    pub fn read_gamma(&mut self) -> Option<u64> {
        let mut zeros = 0;
        loop {
            let byte = *self.bytes.get(self.pos / BYTE_LEN)?;
            let shift = self.pos % BYTE_LEN;
            let lz = broadword::leading_zeros_from(byte, shift);
            zeros += lz;
            self.pos += lz;
            if lz < BYTE_LEN - shift {
                break;
            }
        }
        if 63 < zeros {
            return None;
        }
        self.read_bits(zeros + 1)
    }
}
