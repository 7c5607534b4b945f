//! The worker team that runs parallel phases.
//!
//! With the `parallel` feature a dedicated rayon pool is built once per
//! [`Aligner`](crate::Aligner) and entered for the duration of a whole
//! computation, so rows and diagonals reuse the same threads. Without the
//! feature every phase runs on the calling thread.

use crate::error::{DpError, Result};

/// A fixed-size team of workers.
pub struct Workers {
    threads: usize,
    #[cfg(feature = "parallel")]
    pool: rayon::ThreadPool,
}

impl Workers {
    /// Build a team of `threads` workers.
    ///
    /// Fails with [`DpError::InvalidThreadCount`] for zero threads, or with
    /// [`DpError::ThreadPool`] if the OS refuses to spawn them.
    #[cfg(feature = "parallel")]
    pub fn new(threads: usize) -> Result<Self> {
        if threads == 0 {
            return Err(DpError::InvalidThreadCount);
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|idx| format!("scs-dp-worker-{idx}"))
            .build()?;
        Ok(Self { threads, pool })
    }

    /// Without the `parallel` feature only a single worker is available;
    /// larger counts are accepted and run on the calling thread.
    #[cfg(not(feature = "parallel"))]
    pub fn new(threads: usize) -> Result<Self> {
        if threads == 0 {
            return Err(DpError::InvalidThreadCount);
        }
        Ok(Self { threads: 1 })
    }

    /// Number of workers in the team.
    #[inline]
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Run `op` inside the team.
    #[cfg(feature = "parallel")]
    pub fn install<R, F>(&self, op: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        self.pool.install(op)
    }

    /// Run `op` on the calling thread.
    #[cfg(not(feature = "parallel"))]
    pub fn install<R, F>(&self, op: F) -> R
    where
        F: FnOnce() -> R + Send,
        R: Send,
    {
        op()
    }
}

impl std::fmt::Debug for Workers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workers")
            .field("threads", &self.threads)
            .finish()
    }
}

/// Thread count used when none is configured: the available parallelism of
/// the host, or 1 if it cannot be queried.
pub fn default_threads() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_threads() {
        assert!(matches!(Workers::new(0), Err(DpError::InvalidThreadCount)));
    }

    #[test]
    fn install_returns_closure_value() {
        let w = Workers::new(2).unwrap();
        assert_eq!(w.install(|| 40 + 2), 42);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn team_has_requested_size() {
        let w = Workers::new(3).unwrap();
        assert_eq!(w.threads(), 3);
        assert_eq!(w.install(rayon::current_num_threads), 3);
    }

    #[test]
    fn default_threads_is_positive() {
        assert!(default_threads() >= 1);
    }
}
