//! Store key conventions.
//!
//! Pure string constants — no storage dependency. These name the records in
//! the local key-value namespace; each maps to one JSON document on disk.

/// The versioned collection of saved assessments.
pub const ASSESSMENTS: &str = "pedss_assessments";

/// Incremental per-risk-level counters for the collection.
pub const ASSESSMENT_COUNTS: &str = "pedss_assessment_counts";

/// User preference flags.
pub const SETTINGS: &str = "pedss_settings";

/// Clinician profile record.
pub const PROFILE: &str = "pedss_profile";
