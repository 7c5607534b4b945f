//! The alignment engine.
//!
//! [`Aligner`] owns the configuration of a run: the alphabet, the kernel
//! strategy, a worker team built once and reused for every computation, the
//! cell ceiling, and an optional phase observer. Each call validates its
//! input, allocates a fresh matrix, fills it with the selected kernel inside
//! the worker team, and hands the finished table back as a [`Tabulation`].

use std::fmt;
use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::builder::AlignerBuilder;
use crate::error::{DpError, Result};
use crate::index::NearestMatchIndex;
use crate::kernels::{RowParallelKernel, SequentialKernel, WavefrontKernel};
use crate::matrix::DpMatrix;
use crate::metric::Metric;
use crate::pool::Workers;
use crate::reconstruct::shortest_supersequence;
use crate::sequence::SequencePair;
use crate::traits::{Kernel, KernelContext, NoopObserver, PhaseObserver};
use crate::utils::SMALL_INPUT_CELLS;

/// Which kernel fills the table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Row-major, single thread.
    Sequential,
    /// One parallel phase per anti-diagonal.
    Wavefront,
    /// One parallel phase per row, conditional assembly.
    RowParallel,
    /// One parallel phase per row, branch-free assembly.
    RowParallelBranchFree,
    /// Sequential below [`SMALL_INPUT_CELLS`] cells, branch-free row-parallel
    /// above. Also sequential when the nearest-match index would not fit the
    /// cell limit.
    #[default]
    Auto,
}

impl Strategy {
    /// Every concrete strategy, `Auto` excluded.
    pub const ALL: [Strategy; 4] = [
        Strategy::Sequential,
        Strategy::Wavefront,
        Strategy::RowParallel,
        Strategy::RowParallelBranchFree,
    ];

    /// The concrete strategy used for an `(n+1) × (m+1)` table.
    pub fn resolve(self, n: usize, m: usize) -> Strategy {
        match self {
            Strategy::Auto => {
                let cells = (n + 1).saturating_mul(m + 1);
                if cells < SMALL_INPUT_CELLS {
                    Strategy::Sequential
                } else {
                    Strategy::RowParallelBranchFree
                }
            }
            other => other,
        }
    }

    fn uses_index(self) -> bool {
        matches!(self, Strategy::RowParallel | Strategy::RowParallelBranchFree)
    }

    fn kernel(self) -> &'static dyn Kernel {
        static SEQUENTIAL: SequentialKernel = SequentialKernel;
        static WAVEFRONT: WavefrontKernel = WavefrontKernel;
        static ROW: RowParallelKernel = RowParallelKernel::branchy();
        static ROW_BRANCH_FREE: RowParallelKernel = RowParallelKernel::branch_free();
        match self {
            Strategy::Sequential => &SEQUENTIAL,
            Strategy::Wavefront => &WAVEFRONT,
            Strategy::RowParallel => &ROW,
            Strategy::RowParallelBranchFree | Strategy::Auto => &ROW_BRANCH_FREE,
        }
    }

    /// Lower-case name, as accepted by [`Strategy::from_name`].
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Sequential => "sequential",
            Strategy::Wavefront => "wavefront",
            Strategy::RowParallel => "row_parallel",
            Strategy::RowParallelBranchFree => "row_parallel_branch_free",
            Strategy::Auto => "auto",
        }
    }

    /// Parse a name produced by [`Strategy::as_str`].
    pub fn from_name(name: &str) -> Option<Strategy> {
        match name {
            "sequential" => Some(Strategy::Sequential),
            "wavefront" => Some(Strategy::Wavefront),
            "row_parallel" => Some(Strategy::RowParallel),
            "row_parallel_branch_free" => Some(Strategy::RowParallelBranchFree),
            "auto" => Some(Strategy::Auto),
            _ => None,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parallel LCS / SCS engine.
///
/// Typical usage:
/// ```
/// use scs_dp::{Aligner, Strategy};
///
/// let aligner = Aligner::builder()
///     .strategy(Strategy::RowParallelBranchFree)
///     .threads(2)
///     .build()
///     .unwrap();
/// assert_eq!(aligner.lcs_length(b"abadcabadc", b"adcadc").unwrap(), 6);
/// let scs = aligner.scs(b"abac", b"cab").unwrap();
/// assert_eq!(scs.len(), 5);
/// ```
pub struct Aligner {
    pub(crate) alphabet: Alphabet,
    pub(crate) strategy: Strategy,
    pub(crate) workers: Workers,
    pub(crate) max_cells: usize,
    pub(crate) observer: Option<Arc<dyn PhaseObserver>>,
}

impl Aligner {
    /// Engine with the default configuration: lowercase alphabet, `Auto`
    /// strategy, one worker per available core.
    pub fn new() -> Result<Self> {
        AlignerBuilder::new().build()
    }

    /// Start configuring an engine.
    pub fn builder() -> AlignerBuilder {
        AlignerBuilder::new()
    }

    /// Declared alphabet.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Configured strategy (possibly `Auto`).
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Size of the worker team.
    pub fn threads(&self) -> usize {
        self.workers.threads()
    }

    /// Cell ceiling for the tabulation matrix.
    pub fn max_cells(&self) -> usize {
        self.max_cells
    }

    /// Validate the inputs and fill a complete table for `metric`.
    ///
    /// Validation and allocation happen before any parallel work; on error
    /// nothing is returned. The row-parallel strategies also need a
    /// |Σ|×(m+1) nearest-match index within the cell limit: when it does not
    /// fit, `Auto` runs the sequential kernel and an explicit row-parallel
    /// strategy fails with [`DpError::IndexTooLarge`].
    pub fn tabulate<'a>(&self, x: &'a [u8], y: &'a [u8], metric: Metric) -> Result<Tabulation<'a>> {
        self.tabulate_with(x, y, metric, self.strategy)
    }

    /// Like [`tabulate`](Self::tabulate) but with an explicit strategy,
    /// overriding the configured one.
    pub fn tabulate_with<'a>(
        &self,
        x: &'a [u8],
        y: &'a [u8],
        metric: Metric,
        strategy: Strategy,
    ) -> Result<Tabulation<'a>> {
        let pair = SequencePair::new(x, y, &self.alphabet)?;
        let mut matrix = DpMatrix::for_lengths(pair.n(), pair.m(), self.max_cells)?;
        let strategy = self.plan(strategy, pair.n(), pair.m())?;

        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "tabulate",
            metric = metric.as_str(),
            strategy = strategy.as_str(),
            n = pair.n(),
            m = pair.m(),
            threads = self.workers.threads()
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let observer: &dyn PhaseObserver = match &self.observer {
            Some(o) => &**o,
            None => &NoopObserver,
        };
        let ctx = KernelContext {
            pair: &pair,
            metric,
            alphabet_len: self.alphabet.len(),
            max_cells: self.max_cells,
            observer,
        };
        let kernel = strategy.kernel();
        self.workers.install(|| kernel.fill(&ctx, &mut matrix))?;

        #[cfg(feature = "tracing")]
        tracing::debug!(kernel = kernel.name(), length = matrix.last(), "table filled");

        Ok(Tabulation {
            pair,
            metric,
            strategy,
            matrix,
        })
    }

    // Concrete strategy for an n × m input, checking the index budget.
    fn plan(&self, requested: Strategy, n: usize, m: usize) -> Result<Strategy> {
        let strategy = requested.resolve(n, m);
        if !strategy.uses_index() {
            return Ok(strategy);
        }
        match NearestMatchIndex::check_capacity(self.alphabet.len(), m, self.max_cells) {
            Ok(()) => Ok(strategy),
            Err(_) if requested == Strategy::Auto => Ok(Strategy::Sequential),
            Err(err) => Err(err),
        }
    }

    /// LCS length of `x` and `y`.
    pub fn lcs_length(&self, x: &[u8], y: &[u8]) -> Result<u32> {
        Ok(self.tabulate(x, y, Metric::Lcs)?.length())
    }

    /// SCS length of `x` and `y`.
    pub fn scs_length(&self, x: &[u8], y: &[u8]) -> Result<u32> {
        Ok(self.tabulate(x, y, Metric::Scs)?.length())
    }

    /// One shortest common supersequence of `x` and `y`.
    pub fn scs(&self, x: &[u8], y: &[u8]) -> Result<Vec<u8>> {
        self.tabulate(x, y, Metric::Scs)?.supersequence()
    }
}

impl fmt::Debug for Aligner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aligner")
            .field("alphabet", &String::from_utf8_lossy(self.alphabet.symbols()))
            .field("strategy", &self.strategy)
            .field("workers", &self.workers)
            .field("max_cells", &self.max_cells)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

/// A completed table together with the inputs it was computed from.
///
/// Owns its matrix; drop it once the length (and, for SCS, the
/// supersequence) has been consumed.
#[derive(Debug)]
pub struct Tabulation<'a> {
    pair: SequencePair<'a>,
    metric: Metric,
    strategy: Strategy,
    matrix: DpMatrix,
}

impl<'a> Tabulation<'a> {
    /// T[n][m]: the LCS or SCS length.
    pub fn length(&self) -> u32 {
        self.matrix.last()
    }

    /// Metric the table holds.
    pub fn metric(&self) -> Metric {
        self.metric
    }

    /// Concrete strategy that filled the table.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// The full matrix.
    pub fn matrix(&self) -> &DpMatrix {
        &self.matrix
    }

    /// Consume the tabulation, keeping only the matrix.
    pub fn into_matrix(self) -> DpMatrix {
        self.matrix
    }

    /// Rebuild one shortest common supersequence of length
    /// [`length`](Self::length).
    ///
    /// Fails with [`DpError::MetricMismatch`] on an LCS table.
    pub fn supersequence(&self) -> Result<Vec<u8>> {
        if self.metric != Metric::Scs {
            return Err(DpError::MetricMismatch {
                expected: Metric::Scs,
                found: self.metric,
            });
        }
        Ok(shortest_supersequence(
            &self.matrix,
            self.pair.x(),
            self.pair.y(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_picks_by_size() {
        assert_eq!(Strategy::Auto.resolve(10, 10), Strategy::Sequential);
        assert_eq!(
            Strategy::Auto.resolve(1000, 1000),
            Strategy::RowParallelBranchFree
        );
        assert_eq!(Strategy::Wavefront.resolve(1000, 1000), Strategy::Wavefront);
    }

    #[test]
    fn strategy_names_round_trip() {
        for s in Strategy::ALL.into_iter().chain([Strategy::Auto]) {
            assert_eq!(Strategy::from_name(s.as_str()), Some(s));
        }
        assert_eq!(Strategy::from_name("diagonal"), None);
    }

    #[test]
    fn auto_avoids_an_index_over_the_limit() {
        // 17 x 1001 matrix fits, the 26 x 1001 index does not.
        let aligner = Aligner::builder().threads(1).max_cells(20_000).build().unwrap();
        assert_eq!(aligner.plan(Strategy::Auto, 16, 1000).unwrap(), Strategy::Sequential);
        assert!(matches!(
            aligner.plan(Strategy::RowParallel, 16, 1000),
            Err(DpError::IndexTooLarge { symbols: 26, cols: 1001, limit: 20_000 })
        ));
        assert_eq!(aligner.plan(Strategy::Wavefront, 16, 1000).unwrap(), Strategy::Wavefront);
        assert_eq!(
            aligner.plan(Strategy::Auto, 200, 200).unwrap(),
            Strategy::RowParallelBranchFree
        );
    }

    #[test]
    fn lcs_table_cannot_be_reconstructed() {
        let aligner = Aligner::builder().threads(1).build().unwrap();
        let tab = aligner.tabulate(b"abc", b"bcd", Metric::Lcs).unwrap();
        assert_eq!(tab.length(), 2);
        assert!(matches!(
            tab.supersequence(),
            Err(DpError::MetricMismatch {
                expected: Metric::Scs,
                found: Metric::Lcs
            })
        ));
    }

    #[test]
    fn tabulation_records_strategy() {
        let aligner = Aligner::builder().threads(2).build().unwrap();
        let tab = aligner
            .tabulate_with(b"ab", b"ba", Metric::Scs, Strategy::Wavefront)
            .unwrap();
        assert_eq!(tab.strategy(), Strategy::Wavefront);
        assert_eq!(tab.metric(), Metric::Scs);
        assert_eq!(tab.matrix().rows(), 3);
        assert_eq!(tab.supersequence().unwrap().len(), 3);
    }
}
