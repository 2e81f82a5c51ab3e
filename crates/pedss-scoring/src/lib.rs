//! pedss-scoring
//!
//! The PEDSS scoring rules and demographic validation. Pure — no I/O.
//! The UI owns a [`parameters::ParameterDraft`] while the clinician works
//! through the form; everything here operates on immutable snapshots of it.
//!
//! Two distinct entry points by design: [`parameters::ParameterDraft::preview_score`]
//! for the live running total (unset parameters count as zero), and
//! [`parameters::ParameterDraft::finalize`], the only way to obtain a
//! [`parameters::ScoreResult`] fit for persistence.

pub mod error;
pub mod parameters;
pub mod patient;

pub use error::{IncompleteAssessment, PatientValidationError};
pub use parameters::{ParameterDraft, ScoreResult};
pub use patient::validate_patient;
