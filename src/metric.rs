//! The two metrics and their textbook recurrences.
//!
//! Every kernel shares these definitions for the ghost cells and for the
//! three-neighbour cell update; only the traversal order differs between
//! kernels.

use std::fmt;

/// Which quantity the tabulation matrix holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Longest common subsequence length.
    Lcs,
    /// Shortest common supersequence length.
    Scs,
}

impl Metric {
    /// Ghost-cell value at (i, j) where `i == 0 || j == 0`.
    #[inline(always)]
    pub fn base(self, i: usize, j: usize) -> u32 {
        debug_assert!(i == 0 || j == 0);
        match self {
            Metric::Lcs => 0,
            // One of the two is zero.
            Metric::Scs => (i + j) as u32,
        }
    }

    /// Interior cell value from its three predecessors.
    ///
    /// `diag = T[i-1][j-1]`, `up = T[i-1][j]`, `left = T[i][j-1]`.
    #[inline(always)]
    pub fn cell(self, matched: bool, diag: u32, up: u32, left: u32) -> u32 {
        match (self, matched) {
            (_, true) => diag + 1,
            (Metric::Lcs, false) => up.max(left),
            (Metric::Scs, false) => 1 + up.min(left),
        }
    }

    /// Lower-case name, used in logs and probe output.
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::Lcs => "lcs",
            Metric::Scs => "scs",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Lcs => f.write_str("LCS"),
            Metric::Scs => f.write_str("SCS"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Metric;

    #[test]
    fn ghost_cells() {
        assert_eq!(Metric::Lcs.base(0, 7), 0);
        assert_eq!(Metric::Lcs.base(4, 0), 0);
        assert_eq!(Metric::Scs.base(0, 7), 7);
        assert_eq!(Metric::Scs.base(4, 0), 4);
        assert_eq!(Metric::Scs.base(0, 0), 0);
    }

    #[test]
    fn interior_cells() {
        assert_eq!(Metric::Lcs.cell(true, 2, 5, 5), 3);
        assert_eq!(Metric::Lcs.cell(false, 2, 3, 4), 4);
        assert_eq!(Metric::Scs.cell(true, 2, 5, 5), 3);
        assert_eq!(Metric::Scs.cell(false, 2, 3, 4), 4);
    }
}
