use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::assessment::RiskLevel;

/// Incremental per-risk-level counters, persisted separately from the
/// collection so dashboard reads don't load every record.
///
/// These are a derived projection of the collection; the repository can
/// rebuild them from source at any time to correct drift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AssessmentCounts {
    pub total: u32,
    pub high_risk: u32,
    pub medium_risk: u32,
    pub low_risk: u32,
}

impl AssessmentCounts {
    /// Account for a newly saved assessment.
    pub fn record(&mut self, risk: RiskLevel) {
        self.total += 1;
        match risk {
            RiskLevel::High => self.high_risk += 1,
            RiskLevel::Medium => self.medium_risk += 1,
            RiskLevel::Low => self.low_risk += 1,
        }
    }

    /// Account for a deleted assessment. Saturates at zero so a drifted
    /// counter can never go negative.
    pub fn discard(&mut self, risk: RiskLevel) {
        self.total = self.total.saturating_sub(1);
        match risk {
            RiskLevel::High => self.high_risk = self.high_risk.saturating_sub(1),
            RiskLevel::Medium => self.medium_risk = self.medium_risk.saturating_sub(1),
            RiskLevel::Low => self.low_risk = self.low_risk.saturating_sub(1),
        }
    }

    pub fn tally(&self, risk: RiskLevel) -> u32 {
        match risk {
            RiskLevel::High => self.high_risk,
            RiskLevel::Medium => self.medium_risk,
            RiskLevel::Low => self.low_risk,
        }
    }
}

/// Counters plus the average score, as shown on the home dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AggregateStatistics {
    pub total: u32,
    pub high_risk: u32,
    pub medium_risk: u32,
    pub low_risk: u32,
    /// Mean total score across all saved assessments, rounded to one
    /// decimal place; 0.0 when the collection is empty.
    pub avg_score: f64,
}
