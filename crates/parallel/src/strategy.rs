//! Parallel processing strategies

use rayon::prelude::*;
use rayon::ThreadPoolBuildError;
use std::ops::Range;

/// Processing mode for raster operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProcessingMode {
    /// Single-threaded processing
    Sequential,
    /// Parallel processing on rayon's global pool
    #[default]
    Parallel,
    /// Parallel processing on a dedicated pool with the given number of threads
    ParallelWith(usize),
}

/// Strategy for mapping work over a range of indices
pub trait ParallelStrategy {
    /// Map `f` over `range` and collect the results in index order.
    ///
    /// Fails only when a dedicated thread pool cannot be built.
    fn par_map<T, F>(&self, range: Range<usize>, f: F) -> Result<Vec<T>, ThreadPoolBuildError>
    where
        T: Send,
        F: Fn(usize) -> T + Sync + Send;
}

impl ParallelStrategy for ProcessingMode {
    fn par_map<T, F>(&self, range: Range<usize>, f: F) -> Result<Vec<T>, ThreadPoolBuildError>
    where
        T: Send,
        F: Fn(usize) -> T + Sync + Send,
    {
        match self {
            ProcessingMode::Sequential => Ok(range.map(f).collect()),
            ProcessingMode::Parallel => Ok(range.into_par_iter().map(f).collect()),
            ProcessingMode::ParallelWith(threads) => {
                let pool = rayon::ThreadPoolBuilder::new()
                    .num_threads(*threads)
                    .build()?;
                Ok(pool.install(|| range.into_par_iter().map(f).collect()))
            }
        }
    }
}

/// Number of threads in rayon's global pool
pub fn num_threads() -> usize {
    rayon::current_num_threads()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(i: usize) -> usize {
        i * i
    }

    #[test]
    fn all_modes_preserve_order() {
        let expected: Vec<usize> = (0..500).map(square).collect();
        for mode in [
            ProcessingMode::Sequential,
            ProcessingMode::Parallel,
            ProcessingMode::ParallelWith(3),
        ] {
            let got = mode.par_map(0..500, square).unwrap();
            assert_eq!(got, expected, "mode {:?}", mode);
        }
    }

    #[test]
    fn empty_range() {
        let got: Vec<usize> = ProcessingMode::Parallel.par_map(0..0, square).unwrap();
        assert!(got.is_empty());
    }

    #[test]
    fn default_is_parallel() {
        assert_eq!(ProcessingMode::default(), ProcessingMode::Parallel);
        assert!(num_threads() >= 1);
    }
}
