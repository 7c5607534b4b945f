//! Core trait definitions: tabulation kernels and phase observers.
//!
//! A [`Kernel`] fills a tabulation matrix for one metric. Every kernel
//! produces the same matrix; they differ only in the order cells are visited
//! and in how much of that order runs in parallel:
//! - the sequential kernel visits cells row-major,
//! - the wavefront kernel visits one anti-diagonal per parallel phase,
//! - the row-parallel kernels visit one row per parallel phase, using the
//!   nearest-match index to break the dependency on the cell to the left.
//!
//! Kernels report the end of each phase to a [`PhaseObserver`]. Timing and
//! debug printing live in observers, never in kernel control flow.

use crate::error::Result;
use crate::matrix::DpMatrix;
use crate::metric::Metric;
use crate::sequence::SequencePair;

/// Everything a kernel needs besides the matrix it fills.
pub struct KernelContext<'p, 'a> {
    /// Validated input pair.
    pub pair: &'p SequencePair<'a>,
    /// Quantity to tabulate.
    pub metric: Metric,
    /// |Σ|, the number of rows of the nearest-match index.
    pub alphabet_len: usize,
    /// Cell ceiling applied to auxiliary tables.
    pub max_cells: usize,
    /// Receives a callback at every phase boundary.
    pub observer: &'p dyn PhaseObserver,
}

/// A strategy for filling a tabulation matrix.
///
/// Contract:
/// - `matrix` has `pair.n() + 1` rows and `pair.m() + 1` columns;
/// - on return every cell, ghost cells included, holds the value of the
///   textbook recurrence for `ctx.metric`;
/// - parallel kernels run on whatever rayon pool is current, so callers
///   choose the team by entering it first.
pub trait Kernel: Sync {
    /// Short identifier used in logs and probe output.
    fn name(&self) -> &'static str;

    /// Fill `matrix` completely.
    ///
    /// Fails only when an auxiliary table cannot be allocated; input
    /// validation has already happened by the time a kernel runs.
    fn fill(&self, ctx: &KernelContext<'_, '_>, matrix: &mut DpMatrix) -> Result<()>;
}

/// A completed unit of work inside a kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// The nearest-match index is built. The matrix is still untouched.
    IndexBuilt,
    /// Row `i` is complete (row 0 included).
    Row(usize),
    /// Anti-diagonal `d` (cells with `i + j == d`) is complete.
    Diagonal(usize),
}

/// Hook invoked at phase boundaries with a read-only view of the matrix.
///
/// Called from the thread driving the kernel, between parallel phases, so no
/// worker is writing while an observer runs.
pub trait PhaseObserver: Send + Sync {
    /// `phase` has just finished.
    fn phase_complete(&self, phase: Phase, matrix: &DpMatrix);
}

impl<F> PhaseObserver for F
where
    F: Fn(Phase, &DpMatrix) + Send + Sync,
{
    fn phase_complete(&self, phase: Phase, matrix: &DpMatrix) {
        self(phase, matrix)
    }
}

/// Observer that ignores every phase.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl PhaseObserver for NoopObserver {
    #[inline(always)]
    fn phase_complete(&self, _phase: Phase, _matrix: &DpMatrix) {}
}
