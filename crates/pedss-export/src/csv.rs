use pedss_core::models::assessment::Assessment;

/// The fixed 13-column export schema. Consumers (spreadsheets, analysis
/// scripts) depend on this exact order.
pub const HEADERS: [&str; 13] = [
    "ID",
    "Patient Name",
    "Age",
    "Gender",
    "Date",
    "P Score",
    "E Score",
    "D Score",
    "S1 Score",
    "S2 Score",
    "Total Score",
    "Risk Level",
    "Created At",
];

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

/// One comma-separated row for an assessment, every field double-quoted,
/// in [`HEADERS`] order.
pub fn csv_row(assessment: &Assessment) -> String {
    let fields = [
        assessment.id.to_string(),
        assessment.patient.name.clone(),
        assessment.patient.age_months.to_string(),
        assessment.patient.gender.to_string(),
        assessment.patient.assessment_date.to_string(),
        assessment.parameters.p.to_string(),
        assessment.parameters.e.to_string(),
        assessment.parameters.d.to_string(),
        assessment.parameters.s1.to_string(),
        assessment.parameters.s2.to_string(),
        assessment.score.to_string(),
        assessment.risk_level.to_string(),
        assessment.created_at.to_string(),
    ];

    fields
        .iter()
        .map(|f| quote(f))
        .collect::<Vec<_>>()
        .join(",")
}

/// Header row plus one row per assessment, newline-joined.
pub fn to_csv(assessments: &[Assessment]) -> String {
    let mut lines = Vec::with_capacity(assessments.len() + 1);
    lines.push(HEADERS.join(","));
    lines.extend(assessments.iter().map(csv_row));
    lines.join("\n")
}
