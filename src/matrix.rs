//! The tabulation matrix.
//!
//! An owned, heap-backed, row-major `(n+1) × (m+1)` grid of `u32`. The size
//! is checked against a cell limit and allocated fallibly, so oversized
//! inputs are reported as errors instead of aborting the process.
//!
//! Row 0 and column 0 are ghost cells for the empty-prefix base cases.

use std::fmt;
use std::marker::PhantomData;
use std::ops::Index;

use crate::error::{DpError, Result};

/// Default cell ceiling: 2^31 cells, i.e. 8 GiB of `u32`.
pub const DEFAULT_MAX_CELLS: usize = 1 << 31;

/// Dense `rows × cols` table of DP values.
#[derive(Clone, PartialEq, Eq)]
pub struct DpMatrix {
    rows: usize,
    cols: usize,
    data: Vec<u32>,
}

impl DpMatrix {
    /// Allocate a zero-filled `rows × cols` matrix of at most `max_cells`
    /// cells.
    ///
    /// Errors:
    /// - [`DpError::TableTooLarge`] if `rows * cols` overflows or exceeds
    ///   `max_cells`,
    /// - [`DpError::AllocationFailed`] if the allocator refuses the buffer.
    pub fn new(rows: usize, cols: usize, max_cells: usize) -> Result<Self> {
        let cells = rows
            .checked_mul(cols)
            .filter(|&c| c <= max_cells)
            .ok_or(DpError::TableTooLarge {
                rows,
                cols,
                limit: max_cells,
            })?;
        let mut data = Vec::new();
        data.try_reserve_exact(cells)
            .map_err(|source| DpError::AllocationFailed { cells, source })?;
        data.resize(cells, 0);
        Ok(Self { rows, cols, data })
    }

    /// Matrix sized for sequences of length `n` and `m`.
    ///
    /// Cells are `u32`, so `n + m` must not exceed `u32::MAX` whatever the
    /// cell limit; longer inputs fail with [`DpError::TableTooLarge`].
    pub fn for_lengths(n: usize, m: usize, max_cells: usize) -> Result<Self> {
        let fits_cell = n
            .checked_add(m)
            .is_some_and(|sum| sum <= u32::MAX as usize);
        if !fits_cell {
            return Err(DpError::TableTooLarge {
                rows: n.saturating_add(1),
                cols: m.saturating_add(1),
                limit: max_cells,
            });
        }
        Self::new(n + 1, m + 1, max_cells)
    }

    /// Number of rows (n + 1).
    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (m + 1).
    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Value at (i, j), or `None` outside the grid.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> Option<u32> {
        if i < self.rows && j < self.cols {
            Some(self.data[i * self.cols + j])
        } else {
            None
        }
    }

    /// Store `value` at (i, j).
    ///
    /// # Panics
    /// Panics if (i, j) is outside the grid.
    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: u32) {
        assert!(i < self.rows && j < self.cols, "cell ({i}, {j}) out of bounds");
        self.data[i * self.cols + j] = value;
    }

    /// Row `i` as a slice.
    #[inline]
    pub fn row(&self, i: usize) -> &[u32] {
        let start = i * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Row `i` as a mutable slice.
    #[inline]
    pub fn row_mut(&mut self, i: usize) -> &mut [u32] {
        let start = i * self.cols;
        &mut self.data[start..start + self.cols]
    }

    /// Borrow row `i - 1` immutably and row `i` mutably.
    ///
    /// # Panics
    /// Panics if `i == 0` or `i >= rows`.
    #[inline]
    pub fn row_pair_mut(&mut self, i: usize) -> (&[u32], &mut [u32]) {
        assert!(i >= 1 && i < self.rows, "row pair {i} out of bounds");
        let (head, tail) = self.data.split_at_mut(i * self.cols);
        (&head[(i - 1) * self.cols..], &mut tail[..self.cols])
    }

    /// The bottom-right cell T[n][m].
    #[inline]
    pub fn last(&self) -> u32 {
        // rows and cols are both >= 1 for any matrix built by `for_lengths`.
        self.data.last().copied().unwrap_or(0)
    }

    /// All cells, row-major.
    #[inline]
    pub fn as_slice(&self) -> &[u32] {
        &self.data
    }

    /// All cells, row-major, mutable.
    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [u32] {
        &mut self.data
    }

    /// A view that lets parallel workers address disjoint cells through a
    /// shared reference.
    pub(crate) fn shared_cells(&mut self) -> SharedCells<'_> {
        SharedCells {
            ptr: self.data.as_mut_ptr(),
            rows: self.rows,
            cols: self.cols,
            _marker: PhantomData,
        }
    }
}

impl Index<(usize, usize)> for DpMatrix {
    type Output = u32;

    #[inline]
    fn index(&self, (i, j): (usize, usize)) -> &u32 {
        assert!(i < self.rows && j < self.cols, "cell ({i}, {j}) out of bounds");
        &self.data[i * self.cols + j]
    }
}

impl fmt::Debug for DpMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DpMatrix")
            .field("rows", &self.rows)
            .field("cols", &self.cols)
            .finish_non_exhaustive()
    }
}

/// Space-separated grid, one row per line.
impl fmt::Display for DpMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.rows {
            let row = self.row(i);
            for (j, v) in row.iter().enumerate() {
                if j > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{v}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Raw cell access shared between the workers of one wavefront phase.
///
/// Workers of a phase write pairwise distinct cells and read only cells
/// completed in earlier phases, so no two accesses to the same cell race.
/// That discipline is the caller's obligation; see [`SharedCells::write`].
pub(crate) struct SharedCells<'a> {
    ptr: *mut u32,
    rows: usize,
    cols: usize,
    _marker: PhantomData<&'a mut [u32]>,
}

// SAFETY: the view only hands out copies of cell values; callers guarantee
// that concurrent accesses target disjoint cells or finished phases.
unsafe impl Send for SharedCells<'_> {}
unsafe impl Sync for SharedCells<'_> {}

impl SharedCells<'_> {
    /// Read cell (i, j).
    ///
    /// # Safety
    /// No worker may be writing (i, j) concurrently.
    #[inline(always)]
    pub(crate) unsafe fn read(&self, i: usize, j: usize) -> u32 {
        debug_assert!(i < self.rows && j < self.cols);
        self.ptr.add(i * self.cols + j).read()
    }

    /// Write cell (i, j).
    ///
    /// # Safety
    /// No other worker may read or write (i, j) concurrently.
    #[inline(always)]
    pub(crate) unsafe fn write(&self, i: usize, j: usize, value: u32) {
        debug_assert!(i < self.rows && j < self.cols);
        self.ptr.add(i * self.cols + j).write(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_filled_and_indexed() {
        let mut m = DpMatrix::new(3, 4, DEFAULT_MAX_CELLS).unwrap();
        assert_eq!(m.rows(), 3);
        assert_eq!(m.cols(), 4);
        assert!(m.as_slice().iter().all(|&v| v == 0));
        m.set(2, 3, 9);
        assert_eq!(m[(2, 3)], 9);
        assert_eq!(m.get(2, 3), Some(9));
        assert_eq!(m.get(3, 0), None);
        assert_eq!(m.last(), 9);
    }

    #[test]
    fn row_pair_borrows_adjacent_rows() {
        let mut m = DpMatrix::new(3, 2, DEFAULT_MAX_CELLS).unwrap();
        m.row_mut(1).copy_from_slice(&[5, 6]);
        let (prev, cur) = m.row_pair_mut(2);
        assert_eq!(prev, &[5, 6]);
        cur[1] = prev[1] + 1;
        assert_eq!(m.row(2), &[0, 7]);
    }

    #[test]
    fn enforces_cell_limit() {
        let err = DpMatrix::new(10, 10, 99).unwrap_err();
        assert!(matches!(
            err,
            DpError::TableTooLarge {
                rows: 10,
                cols: 10,
                limit: 99
            }
        ));
        assert!(matches!(
            DpMatrix::for_lengths(usize::MAX, 1, usize::MAX),
            Err(DpError::TableTooLarge { .. })
        ));
        assert!(matches!(
            DpMatrix::new(usize::MAX, 2, usize::MAX),
            Err(DpError::TableTooLarge { .. })
        ));
    }

    #[test]
    fn lengths_beyond_u32_cells_are_refused() {
        // Refused before any allocation, even with no cell limit.
        let n = u32::MAX as usize;
        assert!(matches!(
            DpMatrix::for_lengths(n, 1, usize::MAX),
            Err(DpError::TableTooLarge { cols: 2, limit: usize::MAX, .. })
        ));
        assert!(matches!(
            DpMatrix::for_lengths(usize::MAX, 0, usize::MAX),
            Err(DpError::TableTooLarge { .. })
        ));
        assert!(DpMatrix::for_lengths(3, 4, DEFAULT_MAX_CELLS).is_ok());
    }

    #[test]
    fn display_renders_grid() {
        let mut m = DpMatrix::new(2, 2, DEFAULT_MAX_CELLS).unwrap();
        m.set(0, 1, 1);
        m.set(1, 0, 1);
        m.set(1, 1, 2);
        assert_eq!(m.to_string(), "0 1\n1 2\n");
    }

    #[test]
    #[should_panic]
    fn row_pair_rejects_row_zero() {
        let mut m = DpMatrix::new(2, 2, DEFAULT_MAX_CELLS).unwrap();
        let _ = m.row_pair_mut(0);
    }
}
