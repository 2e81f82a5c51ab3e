use tera::{Context, Tera};
use tracing::debug;

use pedss_core::models::assessment::Assessment;

use crate::error::ExportError;

/// The fixed plain-text report layout. Section headings are part of the
/// export contract and must not change.
const REPORT_TEMPLATE: &str = "\
PEDSS ASSESSMENT REPORT
========================

PATIENT INFORMATION
-------------------
Name/ID: {{ patient.name }}
Age: {{ patient.age_months }} months
Gender: {{ patient.gender }}
Assessment Date: {{ patient.assessment_date }}

PEDSS SCORE
-----------
Total Score: {{ score }}/6
Risk Level: {{ risk_level }}

PARAMETER BREAKDOWN
-------------------
P (Premorbid PCPCS): {{ parameters.p }}/1
E (EEG Background): {{ parameters.e }}/1
D (Drug Refractoriness): {{ parameters.d }}/2
S1 (Seizure Semiology): {{ parameters.s1 }}/1
S2 (Critical Sickness): {{ parameters.s2 }}/1

CLINICAL INTERPRETATION
-----------------------
{{ interpretation }}

RISK ASSESSMENT
---------------
{{ risk_description }}

---
Report Generated: {{ generated_at }}";

/// The canned interpretation paragraph for a total score.
pub fn interpretation(score: u8) -> &'static str {
    match score {
        4.. => {
            "This patient demonstrates high-risk factors including abnormal premorbid \
             status and drug refractoriness. Immediate intensive care unit admission \
             with continuous monitoring is strongly recommended."
        }
        3 => {
            "The patient shows concerning features that suggest a poor outcome is \
             likely. Close monitoring in a high-dependency unit is advised."
        }
        1..=2 => {
            "Moderate risk factors are present. Standard care protocols should be \
             followed with regular reassessment."
        }
        0 => {
            "Low risk profile suggests good prognosis with routine care. Continue \
             standard monitoring and treatment protocols."
        }
    }
}

/// The one-line risk summary for a total score.
pub fn risk_description(score: u8) -> &'static str {
    match score {
        4.. => "HIGH MORTALITY RISK - Immediate intensive care recommended.",
        3 => "MEDIUM RISK - Poor outcome likely. Close monitoring and aggressive treatment advised.",
        1..=2 => "MODERATE RISK - Standard care with regular assessment.",
        0 => "LOW RISK - Routine care and monitoring.",
    }
}

/// Render the plain-text clinical report for one assessment.
pub fn report(assessment: &Assessment) -> Result<String, ExportError> {
    debug!(id = %assessment.id, "rendering assessment report");

    let mut tera = Tera::default();
    tera.add_raw_template("report.txt", REPORT_TEMPLATE)
        .map_err(|e| ExportError::TemplateParse(e.to_string()))?;

    // The assessment's own fields become the template context; the derived
    // text blocks are added alongside.
    let value = serde_json::to_value(assessment)?;
    let mut context =
        Context::from_value(value).map_err(|e| ExportError::TemplateRender(e.to_string()))?;
    context.insert("interpretation", interpretation(assessment.score));
    context.insert("risk_description", risk_description(assessment.score));
    context.insert("generated_at", &jiff::Timestamp::now().to_string());

    let rendered = tera.render("report.txt", &context)?;
    Ok(rendered)
}
