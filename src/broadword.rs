//! Word-level bit tricks.
#![cfg(target_pointer_width = "64")]

/// Returns the position of the most significant set bit, or [`None`] if `x == 0`.
#[inline(always)]
pub const fn msb(x: u64) -> Option<usize> {
    if x != 0 {
        Some(63 - x.leading_zeros() as usize)
    } else {
        None
    }
}

/// Returns the number of leading zero bits of `byte` after skipping its `skip` highest bits,
/// capped at the `8 - skip` bits that remain.
#[inline(always)]
pub const fn leading_zeros_from(byte: u8, skip: usize) -> usize {
    let window = (byte as u32) << (24 + skip);
    let lz = window.leading_zeros() as usize;
    if lz > 8 - skip {
        8 - skip
    } else {
        lz
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_msb() {
        assert_eq!(msb(0), None);
        assert_eq!(msb(1), Some(0));
        assert_eq!(msb(0b1011), Some(3));
        assert_eq!(msb(1 << 40), Some(40));
        assert_eq!(msb(u64::MAX), Some(63));
    }

    #[test]
    fn test_leading_zeros_from() {
        assert_eq!(leading_zeros_from(0b1000_0000, 0), 0);
        assert_eq!(leading_zeros_from(0b0001_0000, 0), 3);
        assert_eq!(leading_zeros_from(0b0001_0000, 2), 1);
        assert_eq!(leading_zeros_from(0, 0), 8);
        assert_eq!(leading_zeros_from(0, 5), 3);
        assert_eq!(leading_zeros_from(0b1110_0000, 3), 5);
    }
}
