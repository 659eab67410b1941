//! Helpers shared by the encoder and the debug output.
#![cfg(target_pointer_width = "64")]

use crate::broadword;

/// Returns the bit width of `x`, i.e., the length of its binary form without leading zeros.
///
/// Zero is counted as one bit wide. A gamma codeword of `x` takes `2 * needed_bits(x) - 1` bits.
///
/// # Examples
///
/// ```
/// use gammaseq::utils::needed_bits;
///
/// assert_eq!(needed_bits(0), 1);
/// assert_eq!(needed_bits(1), 1);
/// assert_eq!(needed_bits(5), 3);
/// assert_eq!(needed_bits(1 << 40), 41);
/// assert_eq!(needed_bits(u64::MAX), 64);
/// ```
pub fn needed_bits(x: u64) -> usize {
    broadword::msb(x).map_or(1, |n| n + 1)
}

/// Prints a long slice as its item count, or as rows of `cols` items with `{:#?}`.
pub(crate) struct MatrixView<'a, T> {
    data: &'a [T],
    cols: usize,
}

impl<'a, T> MatrixView<'a, T> {
    pub(crate) fn new(data: &'a [T], cols: usize) -> Self {
        debug_assert!(cols > 0);
        Self { data, cols }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for MatrixView<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if !f.alternate() {
            return write!(f, "[{} items]", self.data.len());
        }
        f.write_str("[\n")?;
        for row in self.data.chunks(self.cols) {
            let cells: Vec<String> = row.iter().map(|x| format!("{x:?}")).collect();
            writeln!(f, "    {},", cells.join(", "))?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_view_compact() {
        let data = [1u8, 0, 1, 1];
        assert_eq!(format!("{:?}", MatrixView::new(&data, 2)), "[4 items]");
    }

    #[test]
    fn test_matrix_view_alternate() {
        let data = [1u8, 0, 1];
        assert_eq!(
            format!("{:#?}", MatrixView::new(&data, 2)),
            "[\n    1, 0,\n    1,\n]"
        );
    }
}
