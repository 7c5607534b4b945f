//! Assorted utilities and helpers.

/// Below this many cells the `Auto` strategy runs the sequential kernel:
/// the whole table fits in cache and a parallel phase costs more than it
/// saves.
pub const SMALL_INPUT_CELLS: usize = 1 << 14;

/// Minimum number of cells a row-parallel worker takes at once.
pub const ROW_MIN_CHUNK: usize = 256;

/// Minimum number of cells a wavefront worker takes at once.
pub const DIAGONAL_MIN_CHUNK: usize = 64;

/// First row index and length of anti-diagonal `d` in an
/// `(n+1) × (m+1)` table.
///
/// The cells of diagonal `d` are `(i_lo + k, d - i_lo - k)` for
/// `k in 0..len`. Returns `len == 0` for `d > n + m`.
#[inline]
pub fn diagonal_span(d: usize, n: usize, m: usize) -> (usize, usize) {
    if d > n + m {
        return (0, 0);
    }
    let i_lo = d.saturating_sub(m);
    let i_hi = d.min(n);
    (i_lo, i_hi - i_lo + 1)
}
