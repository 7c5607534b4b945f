//! Row-independent kernel that locates the nearest match by scanning.
//!
//! Same recurrence as [`RowParallelKernel`](super::RowParallelKernel), but
//! each cell finds `k`, its distance to the closest earlier occurrence of
//! `X[i-1]` in Y, by walking left through Y instead of reading the
//! nearest-match index. That costs O(m) per cell in the worst case, so this
//! kernel exists only as an independent oracle for tests.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::Result;
use crate::matrix::DpMatrix;
use crate::metric::Metric;
use crate::traits::{Kernel, KernelContext, Phase};

/// Reference kernel; not selectable through [`Strategy`](crate::Strategy).
#[derive(Clone, Copy, Debug, Default)]
pub struct ScanLeftKernel;

impl Kernel for ScanLeftKernel {
    fn name(&self) -> &'static str {
        "scan_left"
    }

    fn fill(&self, ctx: &KernelContext<'_, '_>, matrix: &mut DpMatrix) -> Result<()> {
        let metric = ctx.metric;
        let x = ctx.pair.x();
        let y = ctx.pair.y();

        for (j, cell) in matrix.row_mut(0).iter_mut().enumerate() {
            *cell = metric.base(0, j);
        }
        ctx.observer.phase_complete(Phase::Row(0), matrix);

        for i in 1..=x.len() {
            let c = x[i - 1];
            let (prev, cur) = matrix.row_pair_mut(i);
            cur[0] = metric.base(i, 0);
            let update = |(off, cell): (usize, &mut u32)| {
                let j = off + 1;
                let mut k = 0;
                while k < j && y[j - k - 1] != c {
                    k += 1;
                }
                *cell = match metric {
                    Metric::Scs => {
                        let derived = if k == j {
                            (i + k - 1) as u32
                        } else {
                            prev[j - k - 1] + k as u32
                        };
                        1 + derived.min(prev[j])
                    }
                    Metric::Lcs if k == j => prev[j],
                    Metric::Lcs => prev[j].max(prev[j - k - 1] + 1),
                };
            };
            #[cfg(feature = "parallel")]
            cur[1..].par_iter_mut().enumerate().for_each(update);
            #[cfg(not(feature = "parallel"))]
            cur[1..].iter_mut().enumerate().for_each(update);
            ctx.observer.phase_complete(Phase::Row(i), matrix);
        }
        Ok(())
    }
}
