//! Append-only bit sinks used while encoding.
#![cfg(target_pointer_width = "64")]

use crate::utils::MatrixView;

/// The number of bits in a byte of the encoded buffer.
pub const BYTE_LEN: usize = 8;

/// Interface for a sink that receives bits one by one, most-significant-bit-first within each byte.
pub trait BitSink {
    /// Appends `bit` at the end.
    fn push_bit(&mut self, bit: bool);

    /// Appends the lowest `len` bits of `bits`, from bit `len - 1` down to bit `0`.
    ///
    /// Bits of `bits` above the lowest `len` ones are ignored.
    /// `len` must be no greater than 64.
    #[inline(always)]
    fn push_bits(&mut self, bits: u64, len: usize) {
        debug_assert!(len <= 64);
        for i in (0..len).rev() {
            self.push_bit((bits >> i) & 1 == 1);
        }
    }

    /// Returns the total number of bits appended so far.
    fn num_bits(&self) -> usize;

    /// Flushes the sink and yields the final byte buffer.
    ///
    /// Unused bits at the end of the last byte are zero.
    fn finish(self) -> Vec<u8>;
}

/// Growable bit buffer packing bits most-significant-bit-first into bytes.
///
/// # Examples
///
/// ```
/// use gammaseq::bit_sink::{BitSink, BitWriter};
///
/// let mut bw = BitWriter::new();
/// bw.push_bit(true);
/// bw.push_bits(0b011, 3);
///
/// assert_eq!(bw.num_bits(), 4);
/// assert_eq!(bw.get_bit(2), Some(true));
/// assert_eq!(bw.finish(), vec![0b1011_0000]);
/// ```
#[derive(Default, Clone, PartialEq, Eq)]
pub struct BitWriter {
    bytes: Vec<u8>,
    len: usize,
}

impl BitWriter {
    /// Creates a new empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new empty writer with room for at least `capa` bits.
    pub fn with_capacity(capa: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(Self::bytes_for(capa)),
            len: 0,
        }
    }

    /// Returns the `pos`-th bit, or [`None`] if out of bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use gammaseq::bit_sink::{BitSink, BitWriter};
    ///
    /// let mut bw = BitWriter::new();
    /// bw.push_bits(0b10, 2);
    /// assert_eq!(bw.get_bit(0), Some(true));
    /// assert_eq!(bw.get_bit(1), Some(false));
    /// assert_eq!(bw.get_bit(2), None);
    /// ```
    pub fn get_bit(&self, pos: usize) -> Option<bool> {
        if pos < self.len {
            let (byte, shift) = (pos / BYTE_LEN, pos % BYTE_LEN);
            Some((self.bytes[byte] >> (BYTE_LEN - 1 - shift)) & 1 == 1)
        } else {
            None
        }
    }

    /// Gets the slice of bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[inline(always)]
    const fn bytes_for(n: usize) -> usize {
        (n + BYTE_LEN - 1) / BYTE_LEN
    }
}

impl BitSink for BitWriter {
    #[inline(always)]
    fn push_bit(&mut self, bit: bool) {
        let pos_in_byte = self.len % BYTE_LEN;
        if pos_in_byte == 0 {
            self.bytes.push(0);
        }
        if bit {
            if let Some(cur) = self.bytes.last_mut() {
                *cur |= 0x80 >> pos_in_byte;
            }
        }
        self.len += 1;
    }

    #[inline(always)]
    fn push_bits(&mut self, bits: u64, len: usize) {
        debug_assert!(len <= 64);
        let mut left = len;
        while left != 0 {
            let pos_in_byte = self.len % BYTE_LEN;
            if pos_in_byte == 0 {
                self.bytes.push(0);
            }
            let room = BYTE_LEN - pos_in_byte;
            let take = room.min(left);
            // The next `take` bits of the chunk, right-aligned.
            let chunk = ((bits >> (left - take)) & ((1 << take) - 1)) as u8;
            if let Some(cur) = self.bytes.last_mut() {
                *cur |= chunk << (room - take);
            }
            self.len += take;
            left -= take;
        }
    }

    fn num_bits(&self) -> usize {
        self.len
    }

    fn finish(mut self) -> Vec<u8> {
        self.bytes.shrink_to_fit();
        self.bytes
    }
}

impl std::fmt::Debug for BitWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bits: Vec<u8> = (0..self.len)
            .map(|i| self.get_bit(i).unwrap_or(false) as u8)
            .collect();
        f.debug_struct("BitWriter")
            .field("bits", &MatrixView::new(&bits, 16))
            .field("len", &self.len)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sink relying on the provided `push_bits`.
    #[derive(Default)]
    struct BoolSink(Vec<bool>);

    impl BitSink for BoolSink {
        fn push_bit(&mut self, bit: bool) {
            self.0.push(bit);
        }

        fn num_bits(&self) -> usize {
            self.0.len()
        }

        fn finish(self) -> Vec<u8> {
            let mut bw = BitWriter::new();
            self.0.into_iter().for_each(|b| bw.push_bit(b));
            bw.finish()
        }
    }

    #[test]
    fn test_push_bit_msb_first() {
        let mut bw = BitWriter::new();
        for b in [true, false, false, false, false, false, false, true, true] {
            bw.push_bit(b);
        }
        assert_eq!(bw.num_bits(), 9);
        assert_eq!(bw.finish(), vec![0b1000_0001, 0b1000_0000]);
    }

    #[test]
    fn test_push_bits_across_byte() {
        let mut bw = BitWriter::new();
        bw.push_bits(0b101, 3);
        bw.push_bits(0b1_1111_1111, 9);
        assert_eq!(bw.num_bits(), 12);
        assert_eq!(bw.as_bytes(), &[0b1011_1111, 0b1111_0000]);
    }

    #[test]
    fn test_push_bits_truncation() {
        let mut bw = BitWriter::new();
        bw.push_bits(0b111, 2);
        assert_eq!(bw.num_bits(), 2);
        assert_eq!(bw.finish(), vec![0b1100_0000]);
    }

    #[test]
    fn test_push_bits_full_word() {
        let mut bw = BitWriter::new();
        bw.push_bit(false);
        bw.push_bits(u64::MAX, 64);
        assert_eq!(bw.num_bits(), 65);
        let bytes = bw.finish();
        assert_eq!(bytes.len(), 9);
        assert_eq!(bytes[0], 0b0111_1111);
        assert_eq!(bytes[8], 0b1000_0000);
    }

    #[test]
    fn test_with_capacity() {
        let mut bw = BitWriter::with_capacity(40);
        assert_eq!(bw.num_bits(), 0);
        assert!(bw.as_bytes().is_empty());
        assert!(bw.bytes.capacity() >= 5);
        bw.push_bits(0b11, 2);
        assert_eq!(bw.finish(), vec![0b1100_0000]);
    }

    #[test]
    fn test_push_bits_zero_len() {
        let mut bw = BitWriter::new();
        bw.push_bits(0b1, 0);
        assert_eq!(bw.num_bits(), 0);
        assert!(bw.finish().is_empty());
    }

    #[test]
    fn test_default_push_bits_matches_writer() {
        let mut sink = BoolSink::default();
        let mut bw = BitWriter::new();
        for (bits, len) in [(0b1u64, 1), (0b0110, 4), (0xdead_beef, 32), (0, 3)] {
            sink.push_bits(bits, len);
            bw.push_bits(bits, len);
        }
        assert_eq!(sink.num_bits(), bw.num_bits());
        assert_eq!(sink.finish(), bw.finish());
    }

    #[test]
    fn test_debug() {
        let mut bw = BitWriter::new();
        bw.push_bits(0b101, 3);
        assert_eq!(
            format!("{:?}", bw),
            "BitWriter { bits: [3 items], len: 3 }"
        );
    }
}
