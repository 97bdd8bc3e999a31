//! Score banding for the reliability and adherence gauges.

use serde::Serialize;

/// Band of a reliability score (`0..=100`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum ReliabilityBand {
    /// Below 60.
    Low,
    /// 60 to 89.
    Medium,
    /// 90 and above.
    High,
}

impl ReliabilityBand {
    /// Classify a reliability score.
    pub fn from_score(score: i64) -> Self {
        if score < 60 {
            Self::Low
        } else if score < 90 {
            Self::Medium
        } else {
            Self::High
        }
    }
}

/// Band of a strategy adherence score (`0..=100`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AdherenceBand {
    /// 80 or below.
    Weak,
    /// Above 80.
    Strong,
}

impl AdherenceBand {
    /// Classify an adherence score.
    pub fn from_score(score: i64) -> Self {
        if score > 80 { Self::Strong } else { Self::Weak }
    }
}
