//! Row-parallel kernel built on the nearest-match index.
//!
//! In the textbook recurrence a mismatch cell reads `T[i][j-1]`, its left
//! neighbour in the same row, which serializes every row. The nearest-match
//! index removes that dependency. For row `i` let `c = X[i-1]`,
//! `p = P[c][j]` and `k = j - p`:
//!
//! ```text
//! SCS:  derived = i + k - 1              if p == 0
//!               = T[i-1][p-1] + k        otherwise
//!       T[i][j] = 1 + min(derived, T[i-1][j])
//!
//! LCS:  T[i][j] = T[i-1][j]                          if p == 0
//!               = max(T[i-1][j], T[i-1][p-1] + 1)    otherwise
//! ```
//!
//! A match is the case `p == j`, so one formula covers every interior cell
//! and each cell of row `i` depends on row `i - 1` only. Columns `1..=m` run
//! in parallel with one barrier per row.
//!
//! The branch-free variant assembles the same values with a `0/1` weight
//! `b = (p != 0)` instead of a conditional, which keeps the inner loop free
//! of data-dependent branches:
//!
//! ```text
//! SCS:  derived = b * (T[i-1][p-b] + k) + (1 - b) * (i + k - 1)
//! LCS:  T[i][j] = max(T[i-1][j], b * (T[i-1][p-b] + 1))
//! ```

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::Result;
use crate::index::NearestMatchIndex;
use crate::matrix::DpMatrix;
use crate::metric::Metric;
use crate::traits::{Kernel, KernelContext, Phase};
#[cfg(feature = "parallel")]
use crate::utils::ROW_MIN_CHUNK;

/// Row-parallel kernel; see the module docs for the recurrence.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RowParallelKernel {
    branch_free: bool,
}

impl RowParallelKernel {
    /// Conditional form of the derived-value assembly.
    pub const fn branchy() -> Self {
        Self { branch_free: false }
    }

    /// Arithmetic, branch-free form; same results.
    pub const fn branch_free() -> Self {
        Self { branch_free: true }
    }
}

impl Default for RowParallelKernel {
    fn default() -> Self {
        Self::branch_free()
    }
}

impl Kernel for RowParallelKernel {
    fn name(&self) -> &'static str {
        if self.branch_free {
            "row_parallel_branch_free"
        } else {
            "row_parallel"
        }
    }

    fn fill(&self, ctx: &KernelContext<'_, '_>, matrix: &mut DpMatrix) -> Result<()> {
        let metric = ctx.metric;
        let x = ctx.pair.x_ranks();

        let index = NearestMatchIndex::build(ctx.pair, ctx.alphabet_len, ctx.max_cells)?;
        ctx.observer.phase_complete(Phase::IndexBuilt, matrix);

        for (j, cell) in matrix.row_mut(0).iter_mut().enumerate() {
            *cell = metric.base(0, j);
        }
        ctx.observer.phase_complete(Phase::Row(0), matrix);

        for i in 1..=x.len() {
            #[cfg(feature = "tracing")]
            let span = tracing::trace_span!("row", i);
            #[cfg(feature = "tracing")]
            let _enter = span.enter();

            let nearest = index.symbol_row(x[i - 1] as usize);
            let (prev, cur) = matrix.row_pair_mut(i);
            cur[0] = metric.base(i, 0);
            let row = i as u32;
            match (metric, self.branch_free) {
                (Metric::Scs, false) => fill_row(prev, cur, nearest, |j, p, prev| {
                    scs_cell(row, j, p, prev)
                }),
                (Metric::Scs, true) => fill_row(prev, cur, nearest, |j, p, prev| {
                    scs_cell_branch_free(row, j, p, prev)
                }),
                (Metric::Lcs, false) => fill_row(prev, cur, nearest, lcs_cell),
                (Metric::Lcs, true) => fill_row(prev, cur, nearest, lcs_cell_branch_free),
            }
            ctx.observer.phase_complete(Phase::Row(i), matrix);
        }
        Ok(())
    }
}

/// Fill columns `1..` of `cur` from `prev` alone.
///
/// `rule(j, P[c][j], prev)` computes one cell.
#[inline(always)]
fn fill_row<F>(prev: &[u32], cur: &mut [u32], nearest: &[u32], rule: F)
where
    F: Fn(u32, u32, &[u32]) -> u32 + Sync + Send,
{
    let update = |(off, cell): (usize, &mut u32)| {
        let j = off + 1;
        *cell = rule(j as u32, nearest[j], prev);
    };
    #[cfg(feature = "parallel")]
    cur[1..]
        .par_iter_mut()
        .enumerate()
        .with_min_len(ROW_MIN_CHUNK)
        .for_each(update);
    #[cfg(not(feature = "parallel"))]
    cur[1..].iter_mut().enumerate().for_each(update);
}

#[inline(always)]
fn scs_cell(i: u32, j: u32, p: u32, prev: &[u32]) -> u32 {
    let k = j - p;
    let derived = if p == 0 {
        i + k - 1
    } else {
        prev[p as usize - 1] + k
    };
    1 + derived.min(prev[j as usize])
}

#[inline(always)]
fn scs_cell_branch_free(i: u32, j: u32, p: u32, prev: &[u32]) -> u32 {
    let b = (p != 0) as u32;
    let k = j - p;
    // p - b is p - 1 for a real occurrence and 0 otherwise.
    let derived = b * (prev[(p - b) as usize] + k) + (1 - b) * (i + k - 1);
    1 + derived.min(prev[j as usize])
}

#[inline(always)]
fn lcs_cell(j: u32, p: u32, prev: &[u32]) -> u32 {
    let up = prev[j as usize];
    if p == 0 {
        up
    } else {
        up.max(prev[p as usize - 1] + 1)
    }
}

#[inline(always)]
fn lcs_cell_branch_free(j: u32, p: u32, prev: &[u32]) -> u32 {
    let b = (p != 0) as u32;
    prev[j as usize].max(b * (prev[(p - b) as usize] + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;
    use crate::kernels::SequentialKernel;
    use crate::matrix::DEFAULT_MAX_CELLS;
    use crate::sequence::SequencePair;
    use crate::traits::NoopObserver;

    fn run(kernel: &dyn Kernel, alpha: &Alphabet, x: &[u8], y: &[u8], metric: Metric) -> DpMatrix {
        let pair = SequencePair::new(x, y, alpha).unwrap();
        let ctx = KernelContext {
            pair: &pair,
            metric,
            alphabet_len: alpha.len(),
            max_cells: DEFAULT_MAX_CELLS,
            observer: &NoopObserver,
        };
        let mut m = DpMatrix::for_lengths(x.len(), y.len(), DEFAULT_MAX_CELLS).unwrap();
        kernel.fill(&ctx, &mut m).unwrap();
        m
    }

    #[test]
    fn cell_rules_agree_on_every_p() {
        // Previous SCS row for X[..2] = "ab" against Y = "abba".
        let prev = [2, 2, 2, 3, 4];
        for j in 1..5u32 {
            for p in 0..=j {
                assert_eq!(
                    scs_cell(3, j, p, &prev),
                    scs_cell_branch_free(3, j, p, &prev),
                    "j={j} p={p}"
                );
                assert_eq!(lcs_cell(j, p, &prev), lcs_cell_branch_free(j, p, &prev));
            }
        }
    }

    #[test]
    fn both_variants_match_sequential() {
        let alpha = Alphabet::lowercase();
        let x = b"ozpxennwael";
        let y = b"iyklqkkdhnvwnrjbx";
        for metric in [Metric::Lcs, Metric::Scs] {
            let expected = run(&SequentialKernel, &alpha, x, y, metric);
            assert_eq!(run(&RowParallelKernel::branchy(), &alpha, x, y, metric), expected);
            assert_eq!(run(&RowParallelKernel::branch_free(), &alpha, x, y, metric), expected);
        }
    }

    #[test]
    fn two_symbol_alphabet_exhaustive() {
        // Every pair of binary strings up to length 5.
        let alpha = Alphabet::new(b"ab").unwrap();
        let mut words: Vec<Vec<u8>> = vec![Vec::new()];
        for len in 1..=5 {
            for bits in 0..(1u32 << len) {
                words.push(
                    (0..len)
                        .map(|b| if bits >> b & 1 == 1 { b'b' } else { b'a' })
                        .collect(),
                );
            }
        }
        for x in &words {
            for y in &words {
                for metric in [Metric::Lcs, Metric::Scs] {
                    let expected = run(&SequentialKernel, &alpha, x, y, metric);
                    let got = run(&RowParallelKernel::branch_free(), &alpha, x, y, metric);
                    assert_eq!(got, expected, "x={x:?} y={y:?} {metric}");
                }
            }
        }
    }

    #[test]
    fn reports_index_then_rows() {
        use std::sync::Mutex;
        let alpha = Alphabet::lowercase();
        let pair = SequencePair::new(b"abc", b"ca", &alpha).unwrap();
        let phases = Mutex::new(Vec::new());
        let observer = |phase: Phase, _m: &DpMatrix| phases.lock().unwrap().push(phase);
        let ctx = KernelContext {
            pair: &pair,
            metric: Metric::Scs,
            alphabet_len: alpha.len(),
            max_cells: DEFAULT_MAX_CELLS,
            observer: &observer,
        };
        let mut m = DpMatrix::for_lengths(3, 2, DEFAULT_MAX_CELLS).unwrap();
        RowParallelKernel::default().fill(&ctx, &mut m).unwrap();
        assert_eq!(
            phases.into_inner().unwrap(),
            vec![
                Phase::IndexBuilt,
                Phase::Row(0),
                Phase::Row(1),
                Phase::Row(2),
                Phase::Row(3)
            ]
        );
    }
}
