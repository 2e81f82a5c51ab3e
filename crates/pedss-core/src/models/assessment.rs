use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::CoreError;
use crate::models::patient::PatientRecord;

/// Risk classification derived from the total PEDSS score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// The single derivation path from a total score to a tier.
    ///
    /// The boundaries are clinically meaningful and exact: 3 is Medium,
    /// not High; 4 and above is High.
    pub fn for_score(score: u8) -> RiskLevel {
        match score {
            4.. => RiskLevel::High,
            3 => RiskLevel::Medium,
            ..=2 => RiskLevel::Low,
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "Low"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::High => write!(f, "High"),
        }
    }
}

impl FromStr for RiskLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(RiskLevel::Low),
            "Medium" => Ok(RiskLevel::Medium),
            "High" => Ok(RiskLevel::High),
            other => Err(CoreError::InvalidRiskLevel(other.to_string())),
        }
    }
}

/// The five parameter values frozen at finalization.
///
/// S2 is stored already reduced to 0/1 — the individual critical-illness
/// flags are not persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoredParameters {
    pub p: u8,
    pub e: u8,
    pub d: u8,
    pub s1: u8,
    pub s2: u8,
}

/// One persisted patient scoring session.
///
/// Immutable after creation; the repository only ever appends or removes
/// whole records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Assessment {
    pub id: Uuid,
    pub patient: PatientRecord,
    pub parameters: ScoredParameters,
    pub score: u8,
    pub risk_level: RiskLevel,
    pub created_at: jiff::Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn risk_level_boundaries_are_exact() {
        assert_eq!(RiskLevel::for_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::for_score(1), RiskLevel::Low);
        assert_eq!(RiskLevel::for_score(2), RiskLevel::Low);
        assert_eq!(RiskLevel::for_score(3), RiskLevel::Medium);
        assert_eq!(RiskLevel::for_score(4), RiskLevel::High);
        assert_eq!(RiskLevel::for_score(5), RiskLevel::High);
        assert_eq!(RiskLevel::for_score(6), RiskLevel::High);
    }

    #[test]
    fn risk_level_round_trips_through_display() {
        for level in [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High] {
            assert_eq!(level.to_string().parse::<RiskLevel>().unwrap(), level);
        }
        assert!("Severe".parse::<RiskLevel>().is_err());
    }
}
