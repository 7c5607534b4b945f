//! Anti-diagonal wavefront kernel.
//!
//! Cell (i, j) reads only (i-1, j-1), (i-1, j) and (i, j-1), all of which
//! lie on diagonals `i + j - 1` or `i + j - 2`. Every cell of diagonal `d`
//! is therefore independent of the others, and the kernel runs
//! `n + m + 1` parallel phases, one per diagonal, with a barrier in between.
//! A phase has at most `min(n, m) + 1` work items, which bounds the useful
//! parallelism by the shorter sequence.
//!
//! This formulation needs no auxiliary index and works for both metrics.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::Result;
use crate::matrix::{DpMatrix, SharedCells};
use crate::metric::Metric;
use crate::traits::{Kernel, KernelContext, Phase};
use crate::utils::diagonal_span;
#[cfg(feature = "parallel")]
use crate::utils::DIAGONAL_MIN_CHUNK;

/// Wavefront parallel kernel.
#[derive(Clone, Copy, Debug, Default)]
pub struct WavefrontKernel;

impl Kernel for WavefrontKernel {
    fn name(&self) -> &'static str {
        "wavefront"
    }

    fn fill(&self, ctx: &KernelContext<'_, '_>, matrix: &mut DpMatrix) -> Result<()> {
        let n = ctx.pair.n();
        let m = ctx.pair.m();
        let x = ctx.pair.x();
        let y = ctx.pair.y();
        let metric = ctx.metric;

        for d in 0..=n + m {
            let (i_lo, len) = diagonal_span(d, n, m);
            #[cfg(feature = "tracing")]
            let span = tracing::trace_span!("diagonal", d, len);
            #[cfg(feature = "tracing")]
            let _enter = span.enter();

            let cells = matrix.shared_cells();
            let compute = |k: usize| {
                let i = i_lo + k;
                let j = d - i;
                // SAFETY: (i, j) is written by exactly one k of this phase;
                // the cells read lie on diagonals d-1 and d-2, which earlier
                // phases completed and no worker writes now.
                unsafe { fill_cell(&cells, metric, x, y, i, j) };
            };

            #[cfg(feature = "parallel")]
            (0..len)
                .into_par_iter()
                .with_min_len(DIAGONAL_MIN_CHUNK)
                .for_each(compute);
            #[cfg(not(feature = "parallel"))]
            (0..len).for_each(compute);

            ctx.observer.phase_complete(Phase::Diagonal(d), matrix);
        }
        Ok(())
    }
}

/// # Safety
/// See [`SharedCells`]: (i, j) must be owned by the caller for this phase
/// and its three predecessors must be complete.
#[inline(always)]
unsafe fn fill_cell(
    cells: &SharedCells<'_>,
    metric: Metric,
    x: &[u8],
    y: &[u8],
    i: usize,
    j: usize,
) {
    let value = if i == 0 || j == 0 {
        metric.base(i, j)
    } else {
        metric.cell(
            x[i - 1] == y[j - 1],
            cells.read(i - 1, j - 1),
            cells.read(i - 1, j),
            cells.read(i, j - 1),
        )
    };
    cells.write(i, j, value);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alphabet::Alphabet;
    use crate::kernels::SequentialKernel;
    use crate::matrix::DEFAULT_MAX_CELLS;
    use crate::sequence::SequencePair;
    use crate::traits::NoopObserver;

    fn run(kernel: &dyn Kernel, x: &[u8], y: &[u8], metric: Metric) -> DpMatrix {
        let alpha = Alphabet::lowercase();
        let pair = SequencePair::new(x, y, &alpha).unwrap();
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
    fn matches_sequential_on_rectangles() {
        let cases: [(&[u8], &[u8]); 5] = [
            (&b""[..], &b""[..]),
            (&b"abc"[..], &b""[..]),
            (&b""[..], &b"abc"[..]),
            (&b"ozpxennwael"[..], &b"iyklqkkdhnvwnrjbx"[..]),
            (&b"iyklqkkdhnvwnrjbx"[..], &b"ozpxennwael"[..]),
        ];
        for (x, y) in cases {
            for metric in [Metric::Lcs, Metric::Scs] {
                assert_eq!(
                    run(&WavefrontKernel, x, y, metric),
                    run(&SequentialKernel, x, y, metric),
                    "x={:?} y={:?} {metric}",
                    String::from_utf8_lossy(x),
                    String::from_utf8_lossy(y)
                );
            }
        }
    }

    #[test]
    fn empty_inputs_reduce_to_base_cases() {
        assert_eq!(run(&WavefrontKernel, b"", b"", Metric::Scs).last(), 0);
        assert_eq!(run(&WavefrontKernel, b"abcd", b"", Metric::Scs).last(), 4);
        assert_eq!(run(&WavefrontKernel, b"", b"abc", Metric::Lcs).last(), 0);
    }
}
