//! Row-major reference fill.
//!
//! The textbook tabulation, one cell at a time with no concurrency. It is
//! the correctness oracle for every other kernel and the fastest choice for
//! small tables.

use crate::error::Result;
use crate::matrix::DpMatrix;
use crate::traits::{Kernel, KernelContext, Phase};

/// Sequential baseline kernel.
#[derive(Clone, Copy, Debug, Default)]
pub struct SequentialKernel;

impl Kernel for SequentialKernel {
    fn name(&self) -> &'static str {
        "sequential"
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
            let xc = x[i - 1];
            let (prev, cur) = matrix.row_pair_mut(i);
            cur[0] = metric.base(i, 0);
            for j in 1..=y.len() {
                cur[j] = metric.cell(xc == y[j - 1], prev[j - 1], prev[j], cur[j - 1]);
            }
            ctx.observer.phase_complete(Phase::Row(i), matrix);
        }
        Ok(())
    }
}
