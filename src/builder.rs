use std::sync::Arc;

use crate::alphabet::Alphabet;
use crate::engine::{Aligner, Strategy};
use crate::error::Result;
use crate::matrix::DEFAULT_MAX_CELLS;
use crate::pool::{default_threads, Workers};
use crate::traits::PhaseObserver;

/// Configures an [`Aligner`].
///
/// Unset options fall back to the lowercase alphabet, [`Strategy::Auto`],
/// one worker per available core and [`DEFAULT_MAX_CELLS`].
#[derive(Default)]
pub struct AlignerBuilder {
    alphabet: Option<Alphabet>,
    strategy: Strategy,
    threads: Option<usize>,
    max_cells: Option<usize>,
    observer: Option<Arc<dyn PhaseObserver>>,
}

impl AlignerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alphabet(mut self, alphabet: Alphabet) -> Self {
        self.alphabet = Some(alphabet);
        self
    }

    pub fn strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Size of the worker team; zero is rejected by [`build`](Self::build).
    pub fn threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Hard ceiling on the number of matrix cells a single call may allocate.
    pub fn max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = Some(max_cells);
        self
    }

    pub fn observer<O: PhaseObserver + 'static>(mut self, observer: O) -> Self {
        self.observer = Some(Arc::new(observer));
        self
    }

    /// Spawn the worker team and assemble the engine.
    pub fn build(self) -> Result<Aligner> {
        let threads = self.threads.unwrap_or_else(default_threads);
        let workers = Workers::new(threads)?;
        Ok(Aligner {
            alphabet: self.alphabet.unwrap_or_default(),
            strategy: self.strategy,
            workers,
            max_cells: self.max_cells.unwrap_or(DEFAULT_MAX_CELLS),
            observer: self.observer,
        })
    }
}
