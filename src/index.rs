//! Nearest-match index over the column sequence Y.
//!
//! `P[c][j]` is the largest 1-based column `<= j` holding symbol `c` in Y, or
//! 0 if `c` does not occur in `Y[..j]`. For a fixed symbol the table is a
//! single left-to-right scan:
//!
//! ```text
//! P[c][0] = 0
//! P[c][j] = j          if Y[j-1] == c
//!         = P[c][j-1]  otherwise
//! ```
//!
//! Symbols are independent of each other, so the |Σ| scans run in parallel.
//! Once built the index is only read.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{DpError, Result};
use crate::matrix::DpMatrix;
use crate::sequence::SequencePair;

/// Alphabet-indexed table of nearest prior occurrences in Y.
#[derive(Clone, Debug)]
pub struct NearestMatchIndex {
    // One row per symbol rank, m + 1 columns.
    table: DpMatrix,
}

impl NearestMatchIndex {
    /// Build the index for the Y side of `pair` over an alphabet of
    /// `alphabet_len` symbols.
    ///
    /// Runs one scan per symbol on the current rayon pool when the
    /// `parallel` feature is enabled.
    pub fn build(pair: &SequencePair<'_>, alphabet_len: usize, max_cells: usize) -> Result<Self> {
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("nearest_match_index", sigma = alphabet_len, m = pair.m());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let y = pair.y_ranks();
        Self::check_capacity(alphabet_len, y.len(), max_cells)?;
        let mut table = DpMatrix::new(alphabet_len, y.len() + 1, max_cells)?;
        let cols = table.cols();
        #[cfg(feature = "parallel")]
        table
            .as_mut_slice()
            .par_chunks_mut(cols)
            .enumerate()
            .for_each(|(c, row)| scan_symbol(row, c, y));
        #[cfg(not(feature = "parallel"))]
        table
            .as_mut_slice()
            .chunks_mut(cols)
            .enumerate()
            .for_each(|(c, row)| scan_symbol(row, c, y));
        Ok(Self { table })
    }

    /// Fails with [`DpError::IndexTooLarge`] when an index over
    /// `alphabet_len` symbols and a sequence of length `m` would exceed
    /// `max_cells`.
    pub fn check_capacity(alphabet_len: usize, m: usize, max_cells: usize) -> Result<()> {
        let cols = m.saturating_add(1);
        match alphabet_len.checked_mul(cols) {
            Some(cells) if cells <= max_cells => Ok(()),
            _ => Err(DpError::IndexTooLarge {
                symbols: alphabet_len,
                cols,
                limit: max_cells,
            }),
        }
    }

    /// `P[c][j]` for symbol rank `c` and column `j` in `0..=m`.
    ///
    /// # Panics
    ///
    /// Panics if `c >= alphabet_len()` or `j > len()`.
    #[inline(always)]
    pub fn get(&self, c: usize, j: usize) -> usize {
        self.table[(c, j)] as usize
    }

    /// The whole row of symbol rank `c`, columns `0..=m`.
    ///
    /// # Panics
    ///
    /// Panics if `c >= alphabet_len()`.
    #[inline]
    pub fn symbol_row(&self, c: usize) -> &[u32] {
        self.table.row(c)
    }

    /// Number of symbols indexed.
    #[inline]
    pub fn alphabet_len(&self) -> usize {
        self.table.rows()
    }

    /// m, the length of the indexed sequence.
    #[inline]
    pub fn len(&self) -> usize {
        self.table.cols() - 1
    }

    /// True when the indexed sequence is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn scan_symbol(row: &mut [u32], c: usize, y: &[u8]) {
    row[0] = 0;
    for j in 1..row.len() {
        row[j] = if y[j - 1] as usize == c {
            j as u32
        } else {
            row[j - 1]
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;
    use crate::matrix::DEFAULT_MAX_CELLS;

    #[test]
    fn small_table_by_hand() {
        let alpha = Alphabet::new(b"abc").unwrap();
        let pair = SequencePair::new(b"", b"abab", &alpha).unwrap();
        let idx = NearestMatchIndex::build(&pair, alpha.len(), DEFAULT_MAX_CELLS).unwrap();
        assert_eq!(idx.symbol_row(0), &[0, 1, 1, 3, 3]);
        assert_eq!(idx.symbol_row(1), &[0, 0, 2, 2, 4]);
        assert_eq!(idx.symbol_row(2), &[0, 0, 0, 0, 0]);
        assert_eq!(idx.len(), 4);
        assert_eq!(idx.alphabet_len(), 3);
    }

    #[test]
    fn empty_y_has_single_zero_column() {
        let alpha = Alphabet::dna();
        let pair = SequencePair::new(b"ACGT", b"", &alpha).unwrap();
        let idx = NearestMatchIndex::build(&pair, alpha.len(), DEFAULT_MAX_CELLS).unwrap();
        assert!(idx.is_empty());
        for c in 0..4 {
            assert_eq!(idx.symbol_row(c), &[0]);
        }
    }

    #[test]
    fn oversized_index_is_reported_as_index() {
        let alpha = Alphabet::lowercase();
        let y = vec![b'b'; 99];
        let pair = SequencePair::new(b"a", &y, &alpha).unwrap();
        assert!(matches!(
            NearestMatchIndex::build(&pair, alpha.len(), 2_000),
            Err(DpError::IndexTooLarge { symbols: 26, cols: 100, limit: 2_000 })
        ));
        assert!(NearestMatchIndex::check_capacity(26, 99, 2_600).is_ok());
    }
}
