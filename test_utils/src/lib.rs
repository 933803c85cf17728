//! Utility helpers for controller tests.
pub mod rig;

pub use rig::{Rig, DT};

use jetrunner::Cue;

/// Counts cues in `cues` equal to `expected`.
pub fn count_cue(cues: &[Cue], expected: &Cue) -> usize {
    cues.iter().filter(|cue| *cue == expected).count()
}

/// Assert that all cues in `expected` were recorded.
///
/// # Panics
/// Panics with a helpful message if any cue is missing.
pub fn assert_cues_present(cues: &[Cue], expected: &[Cue]) {
    for cue in expected {
        assert!(cues.contains(cue), "{cue:?} not found in {cues:?}");
    }
}

/// Assert that none of the cues in `unexpected` were recorded.
///
/// # Panics
/// Panics with a helpful message if any cue is found.
pub fn assert_cues_absent(cues: &[Cue], unexpected: &[Cue]) {
    for cue in unexpected {
        assert!(!cues.contains(cue), "{cue:?} should not be present in {cues:?}");
    }
}
