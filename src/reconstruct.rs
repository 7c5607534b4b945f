//! Shortest common supersequence reconstruction.
//!
//! Backtracks through a completed SCS table from (n, m) to (0, 0):
//! - on a match the symbol is emitted once and both indices step back,
//! - on a mismatch the cheaper neighbour wins; `Y[j-1]` is emitted when
//!   `T[i][j-1] < T[i-1][j]`, otherwise `X[i-1]`,
//! - once either index reaches zero the rest of the other sequence is
//!   drained.
//!
//! Symbols are written back-to-front into a buffer of exactly `T[n][m]`
//! symbols.

use crate::matrix::DpMatrix;

/// Rebuild one shortest common supersequence of `x` and `y` from their SCS
/// table.
///
/// `table` must be the complete SCS table for `(x, y)`.
pub(crate) fn shortest_supersequence(table: &DpMatrix, x: &[u8], y: &[u8]) -> Vec<u8> {
    debug_assert_eq!(table.rows(), x.len() + 1);
    debug_assert_eq!(table.cols(), y.len() + 1);

    #[cfg(feature = "tracing")]
    let span = tracing::trace_span!("reconstruct", n = x.len(), m = y.len());
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    let mut out = vec![0u8; table.last() as usize];
    let mut w = out.len();
    let (mut i, mut j) = (x.len(), y.len());

    while i > 0 && j > 0 {
        w -= 1;
        if x[i - 1] == y[j - 1] {
            out[w] = x[i - 1];
            i -= 1;
            j -= 1;
        } else if table[(i, j - 1)] < table[(i - 1, j)] {
            out[w] = y[j - 1];
            j -= 1;
        } else {
            out[w] = x[i - 1];
            i -= 1;
        }
    }
    let rest = if i > 0 { &x[..i] } else { &y[..j] };
    out[w - rest.len()..w].copy_from_slice(rest);
    debug_assert_eq!(w, rest.len());

    out
}
