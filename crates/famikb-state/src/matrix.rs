//! Atomic key matrix.

use core::sync::atomic::{AtomicBool, Ordering};

/// Largest matrix any mode uses (Subor, 26 rows of 4).
pub const MATRIX_CAPACITY: usize = 104;

/// Cells per scanned row.
pub const ROW_WIDTH: usize = 4;

/// One pressed/released flag per scan cell. All released at construction.
///
/// Decoders write cells; the responder reads one row at a time. A row read
/// may straddle a concurrent update, which costs at most one stale frame.
#[derive(Debug)]
pub struct KeyMatrix {
    cells: [AtomicBool; MATRIX_CAPACITY],
}

impl Default for KeyMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyMatrix {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cells: [const { AtomicBool::new(false) }; MATRIX_CAPACITY],
        }
    }

    /// Set one cell. Indices past [`MATRIX_CAPACITY`] are ignored.
    #[inline]
    pub fn set(&self, index: usize, pressed: bool) {
        if let Some(cell) = self.cells.get(index) {
            cell.store(pressed, Ordering::Relaxed);
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> bool {
        self.cells
            .get(index)
            .is_some_and(|cell| cell.load(Ordering::Relaxed))
    }

    /// The four cells of `row` packed MSB-first: cell `4 * row` lands in
    /// bit 3, cell `4 * row + 3` in bit 0. Rows past the matrix read as zero.
    ///
    /// # RT Safety
    ///
    /// RT-safe. Four relaxed loads.
    #[inline]
    #[must_use]
    pub fn row_bits(&self, row: usize) -> u8 {
        let base = row.saturating_mul(ROW_WIDTH);
        let mut bits = 0u8;
        for offset in 0..ROW_WIDTH {
            bits = (bits << 1) | u8::from(self.get(base.saturating_add(offset)));
        }
        bits
    }

    /// Number of cells currently pressed.
    #[must_use]
    pub fn pressed_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.load(Ordering::Relaxed))
            .count()
    }

    /// Release every cell.
    pub fn clear(&self) {
        for cell in &self.cells {
            cell.store(false, Ordering::Relaxed);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_released() {
        let matrix = KeyMatrix::new();
        assert_eq!(matrix.pressed_count(), 0);
        for row in 0..MATRIX_CAPACITY / ROW_WIDTH {
            assert_eq!(matrix.row_bits(row), 0);
        }
    }

    #[test]
    fn test_row_bits_order() {
        let matrix = KeyMatrix::new();
        matrix.set(8, true);
        assert_eq!(matrix.row_bits(2), 0b1000);
        matrix.set(11, true);
        assert_eq!(matrix.row_bits(2), 0b1001);
        matrix.set(8, false);
        assert_eq!(matrix.row_bits(2), 0b0001);
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let matrix = KeyMatrix::new();
        matrix.set(MATRIX_CAPACITY, true);
        assert!(!matrix.get(MATRIX_CAPACITY));
        assert_eq!(matrix.pressed_count(), 0);
        assert_eq!(matrix.row_bits(usize::MAX), 0);
    }

    #[test]
    fn test_clear() {
        let matrix = KeyMatrix::new();
        matrix.set(0, true);
        matrix.set(103, true);
        matrix.clear();
        assert_eq!(matrix.pressed_count(), 0);
    }
}
