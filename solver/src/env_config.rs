//! Shared environment configuration for the library and both binaries.
//!
//! Reads `RUNS_INNINGS_PER_GAME`, `RUNS_REFINEMENT_PASSES` and
//! `RAYON_NUM_THREADS`. Missing or unparsable values fall back to defaults.

use std::str::FromStr;

use tracing::{info, warn};

use crate::constants::{DEFAULT_INNINGS_PER_GAME, DEFAULT_REFINEMENT_PASSES};

fn read_positive<T>(var: &str, default: T) -> T
where
    T: FromStr + PartialOrd + Default + Copy + std::fmt::Display,
{
    match std::env::var(var) {
        Ok(raw) => match raw.trim().parse::<T>() {
            Ok(v) if v > T::default() => v,
            _ => {
                warn!("Ignoring {}={:?}; using {}", var, raw, default);
                default
            }
        },
        Err(_) => default,
    }
}

/// Read `RUNS_INNINGS_PER_GAME` (default 7).
pub fn innings_per_game() -> u32 {
    read_positive("RUNS_INNINGS_PER_GAME", DEFAULT_INNINGS_PER_GAME)
}

/// Read `RUNS_REFINEMENT_PASSES` (default 50).
pub fn refinement_passes() -> usize {
    read_positive("RUNS_REFINEMENT_PASSES", DEFAULT_REFINEMENT_PASSES)
}

/// Read `RAYON_NUM_THREADS` (fallback `OMP_NUM_THREADS`, default 8) and build
/// the global rayon pool, tolerating one that is already initialized.
/// Returns thread count.
pub fn init_rayon_threads_lenient() -> usize {
    let num_threads = std::env::var("RAYON_NUM_THREADS")
        .or_else(|_| std::env::var("OMP_NUM_THREADS"))
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8);
    rayon::ThreadPoolBuilder::new()
        .num_threads(num_threads)
        .build_global()
        .ok(); // May fail if already initialized
    info!("Rayon threads: {}", num_threads);
    num_threads
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_positive_fallbacks() {
        assert_eq!(read_positive("RUNS_TEST_UNSET_VARIABLE", 7u32), 7);

        std::env::set_var("RUNS_TEST_ZERO_VARIABLE", "0");
        assert_eq!(read_positive("RUNS_TEST_ZERO_VARIABLE", 7u32), 7);

        std::env::set_var("RUNS_TEST_GARBAGE_VARIABLE", "nine");
        assert_eq!(read_positive("RUNS_TEST_GARBAGE_VARIABLE", 50usize), 50);

        std::env::set_var("RUNS_TEST_VALID_VARIABLE", " 9 ");
        assert_eq!(read_positive("RUNS_TEST_VALID_VARIABLE", 7u32), 9);
    }
}
