use pedss_core::models::patient::{PatientDraft, PatientRecord};

use crate::error::PatientValidationError;

/// Age bounds in months (0–20 years), inclusive.
const MAX_AGE_MONTHS: i64 = 240;

/// Validate raw demographic input into a frozen [`PatientRecord`].
///
/// Checks run in fixed name → age → gender order and stop at the first
/// failure, matching the form's deterministic prompting. The UI strips
/// non-digit characters from the age field as it is typed, but bounds and
/// parseability are re-checked here as a contract boundary.
///
/// The assessment date defaults to today when the draft carries none, and
/// is immutable after this point.
pub fn validate_patient(draft: &PatientDraft) -> Result<PatientRecord, PatientValidationError> {
    let name = draft.name.trim();
    if name.is_empty() {
        return Err(PatientValidationError::EmptyName);
    }

    let age_input = draft.age_months.trim();
    let age_months: i64 = age_input
        .parse()
        .map_err(|_| PatientValidationError::InvalidAge {
            input: age_input.to_string(),
        })?;
    if !(0..=MAX_AGE_MONTHS).contains(&age_months) {
        return Err(PatientValidationError::AgeOutOfRange { age_months });
    }

    let gender = draft.gender.ok_or(PatientValidationError::MissingGender)?;

    let assessment_date = match draft.assessment_date {
        Some(date) => date,
        None => jiff::Zoned::now().date(),
    };

    Ok(PatientRecord {
        name: name.to_string(),
        age_months: age_months as u16,
        gender,
        assessment_date,
    })
}
