//! Level derivation from experience

pub const MAX_EXPERIENCE: i64 = 10_000_000;

/// Level and remaining experience derived from a total experience value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    pub level: i64,
    pub until_next_level: i64,
}

/// Computes level and experience-to-next-level.
///
/// `level = trunc((sqrt(2500 + 200 * exp) - 50) / 100)` and
/// `until_next_level = 50 * (level + 1) * (level + 2) - exp`.
pub fn progress_for(experience: i64) -> LevelProgress {
    let root = ((2500 + 200 * experience) as f64).sqrt();
    let level = ((root - 50.0) / 100.0) as i64;
    let until_next_level = 50 * (level + 1) * (level + 2) - experience;
    LevelProgress {
        level,
        until_next_level,
    }
}
