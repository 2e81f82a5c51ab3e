use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

use crate::parameters::Parameter;

/// Returned by `finalize` when required parameters are still unset.
///
/// Lists every missing parameter, in the fixed P, E, D, S1 order, so the
/// UI can prompt for all of them at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[ts(export)]
#[error("{message}")]
pub struct IncompleteAssessment {
    pub missing: Vec<Parameter>,
    pub message: String,
}

impl IncompleteAssessment {
    pub fn new(missing: Vec<Parameter>) -> Self {
        let labels: Vec<&str> = missing.iter().map(|p| p.label()).collect();
        IncompleteAssessment {
            message: format!("incomplete assessment, missing: {}", labels.join(", ")),
            missing,
        }
    }
}

/// Demographic validation failure, reported for the first invalid field in
/// the fixed name → age → gender order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[ts(export)]
pub enum PatientValidationError {
    #[error("patient name or ID is required")]
    EmptyName,

    #[error("age is not a whole number of months: {input:?}")]
    InvalidAge { input: String },

    #[error("age {age_months} months is outside the valid range 0-240")]
    AgeOutOfRange { age_months: i64 },

    #[error("patient gender is required")]
    MissingGender,
}
