//! Parallel LCS / SCS tabulation
//!
//! This crate computes the Longest Common Subsequence (LCS) length and the
//! Shortest Common Supersequence (SCS) length of two byte sequences over a
//! finite alphabet, and reconstructs one SCS. The point of interest is how
//! the O(n·m) table gets filled in parallel while staying bit-exact with
//! the textbook recurrence.
//!
//! ## Kernels
//! 1. **Sequential**: row-major reference fill.
//! 2. **Wavefront**: every anti-diagonal `i + j = d` is one parallel phase;
//!    `n + m + 1` phases of at most `min(n, m) + 1` cells each.
//! 3. **Row-parallel**: a [`NearestMatchIndex`] built from Y gives, for each
//!    symbol and column, the closest earlier occurrence of that symbol. With
//!    it, a cell no longer needs its left neighbour, so a whole row is one
//!    parallel phase. A branch-free variant replaces the remaining
//!    conditional with arithmetic.
//!
//! All kernels produce identical tables; the test suite checks this on
//! random and exhaustive small inputs.
//!
//! ## Quick start
//! ```
//! use scs_dp::{Aligner, Metric, Strategy};
//!
//! let aligner = Aligner::builder().threads(2).build().unwrap();
//! assert_eq!(
//!     aligner.lcs_length(b"abadcabadcabadcabadcabadcabadc", b"adcadcadc").unwrap(),
//!     9
//! );
//!
//! let tab = aligner
//!     .tabulate_with(b"abac", b"cab", Metric::Scs, Strategy::Wavefront)
//!     .unwrap();
//! assert_eq!(tab.length(), 5);
//! assert_eq!(tab.supersequence().unwrap(), b"cabac");
//! ```
//!
//! ## Features
//! - `parallel` (default): run phases on a rayon worker team.
//! - `tracing`: emit spans for computations, phases and reconstruction.
//! - `heavy`: enable long-running stress tests.

pub mod alphabet;
pub mod builder;
pub mod engine;
pub mod error;
pub mod index;
pub mod kernels;
pub mod matrix;
pub mod metric;
pub mod pool;
mod reconstruct;
pub mod sequence;
pub mod traits;
pub mod utils;

pub use crate::alphabet::Alphabet;
pub use crate::builder::AlignerBuilder;
pub use crate::engine::{Aligner, Strategy, Tabulation};
pub use crate::error::{DpError, Result};
pub use crate::index::NearestMatchIndex;
pub use crate::matrix::DpMatrix;
pub use crate::metric::Metric;
pub use crate::sequence::{SequencePair, Side};
pub use crate::traits::{Kernel, KernelContext, NoopObserver, Phase, PhaseObserver};
