use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
            Gender::Other => write!(f, "Other"),
        }
    }
}

impl FromStr for Gender {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            "Other" => Ok(Gender::Other),
            other => Err(CoreError::InvalidGender(other.to_string())),
        }
    }
}

/// Validated patient demographics attached to an assessment.
///
/// Only the validator in `pedss-scoring` constructs these: the name is
/// trimmed and non-empty, and the age is within 0–240 months.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientRecord {
    pub name: String,
    pub age_months: u16,
    pub gender: Gender,
    pub assessment_date: jiff::civil::Date,
}

/// Raw demographic input as entered in the UI, before validation.
///
/// The age is kept as entered text so the validator can report unparseable
/// input distinctly from out-of-range values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientDraft {
    pub name: String,
    pub age_months: String,
    pub gender: Option<Gender>,
    pub assessment_date: Option<jiff::civil::Date>,
}
