//! Tabulation kernels.
//!
//! Each module implements [`Kernel`](crate::traits::Kernel) with a different
//! traversal of the same recurrence:
//! - [`sequential`]   : row-major reference fill.
//! - [`wavefront`]    : one parallel phase per anti-diagonal.
//! - [`row_parallel`] : one parallel phase per row via the nearest-match index,
//!   with a branch-free variant.
//! - [`scan_left`]    : row-parallel fill that finds matches by scanning; test
//!   oracle only.

pub mod row_parallel;
pub mod scan_left;
pub mod sequential;
pub mod wavefront;

pub use row_parallel::RowParallelKernel;
pub use scan_left::ScanLeftKernel;
pub use sequential::SequentialKernel;
pub use wavefront::WavefrontKernel;
