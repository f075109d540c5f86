//! Tuning constants and build options.

/// Number of results returned when a caller does not ask for a specific count.
pub const DEFAULT_TOP_K: usize = 10;

/// Upper bound on the number of results a single request may ask for.
pub const MAX_TOP_K: usize = 100;

/// Corpus size from which [`Parallelism::Auto`] switches to the rayon pool.
pub const PARALLEL_MIN_DOCS: usize = 1024;

/// Whether per-document work during a snapshot build runs on the rayon pool.
///
/// Token id allocation always stays a single-writer pass in document order,
/// so every setting yields the same vocabulary and vectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Parallelism {
    Off,
    On,
    #[default]
    Auto,
}

impl Parallelism {
    pub fn enabled_for(self, num_docs: usize) -> bool {
        match self {
            Parallelism::Off => false,
            Parallelism::On => true,
            Parallelism::Auto => num_docs >= PARALLEL_MIN_DOCS,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BuildOptions {
    pub parallelism: Parallelism,
}

impl BuildOptions {
    pub fn with_parallelism(parallelism: Parallelism) -> Self {
        Self { parallelism }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_switches_at_threshold() {
        assert!(!Parallelism::Auto.enabled_for(PARALLEL_MIN_DOCS - 1));
        assert!(Parallelism::Auto.enabled_for(PARALLEL_MIN_DOCS));
        assert!(Parallelism::On.enabled_for(1));
        assert!(!Parallelism::Off.enabled_for(usize::MAX));
    }
}
