use serde::{Deserialize, Serialize};
use ts_rs::TS;

use pedss_core::models::assessment::{RiskLevel, ScoredParameters};

use crate::error::IncompleteAssessment;

/// P — premorbid performance status (PCPCS).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Premorbid {
    Normal,
    Abnormal,
}

impl Premorbid {
    pub fn points(self) -> u8 {
        match self {
            Premorbid::Normal => 0,
            Premorbid::Abnormal => 1,
        }
    }
}

/// E — EEG background at 6–12 hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum EegBackground {
    Normal,
    Abnormal,
}

impl EegBackground {
    pub fn points(self) -> u8 {
        match self {
            EegBackground::Normal => 0,
            EegBackground::Abnormal => 1,
        }
    }
}

/// D — drug refractoriness. The only two-point parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DrugRefractoriness {
    None,
    BenzodiazepineRefractory,
    RefractoryStatusEpilepticus,
}

impl DrugRefractoriness {
    pub fn points(self) -> u8 {
        match self {
            DrugRefractoriness::None => 0,
            DrugRefractoriness::BenzodiazepineRefractory => 1,
            DrugRefractoriness::RefractoryStatusEpilepticus => 2,
        }
    }
}

/// S1 — seizure semiology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Semiology {
    Focal,
    Generalized,
}

impl Semiology {
    pub fn points(self) -> u8 {
        match self {
            Semiology::Focal => 0,
            Semiology::Generalized => 1,
        }
    }
}

/// S2 — critical-illness flags. Contributes exactly one point to the total
/// if any flag is set, no matter how many.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CriticalIllness {
    pub shock: bool,
    pub intubation: bool,
    pub mods: bool,
}

impl CriticalIllness {
    pub fn reduced(self) -> u8 {
        u8::from(self.shock || self.intubation || self.mods)
    }
}

/// One of the four parameters that must be explicitly selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Parameter {
    P,
    E,
    D,
    S1,
}

impl Parameter {
    /// The clinical label shown when prompting for a missing parameter.
    pub fn label(self) -> &'static str {
        match self {
            Parameter::P => "P (Premorbid PCPCS)",
            Parameter::E => "E (EEG Background)",
            Parameter::D => "D (Drug Refractoriness)",
            Parameter::S1 => "S1 (Seizure Semiology)",
        }
    }
}

/// In-progress parameter selections, owned by the UI while the clinician
/// works through the form.
///
/// P, E, D, and S1 start unset and must be explicitly chosen; the
/// critical-illness flags default to all-false and never block
/// finalization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ParameterDraft {
    pub p: Option<Premorbid>,
    pub e: Option<EegBackground>,
    pub d: Option<DrugRefractoriness>,
    pub s1: Option<Semiology>,
    #[serde(default)]
    pub s2: CriticalIllness,
}

impl ParameterDraft {
    /// The running total shown while the form is being filled in.
    ///
    /// Unset parameters contribute zero. This is display-only and says
    /// nothing about completeness — persistence goes through
    /// [`ParameterDraft::finalize`].
    pub fn preview_score(&self) -> u8 {
        self.p.map_or(0, Premorbid::points)
            + self.e.map_or(0, EegBackground::points)
            + self.d.map_or(0, DrugRefractoriness::points)
            + self.s1.map_or(0, Semiology::points)
            + self.s2.reduced()
    }

    /// True once P, E, D, and S1 have all been explicitly selected.
    /// S2 is never required.
    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    /// The only path to a persistable score. Fails listing every missing
    /// parameter if the draft is incomplete.
    pub fn finalize(&self) -> Result<ScoreResult, IncompleteAssessment> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(IncompleteAssessment::new(missing));
        }

        // is_complete guarantees the four selections below.
        let parameters = ScoredParameters {
            p: self.p.map_or(0, Premorbid::points),
            e: self.e.map_or(0, EegBackground::points),
            d: self.d.map_or(0, DrugRefractoriness::points),
            s1: self.s1.map_or(0, Semiology::points),
            s2: self.s2.reduced(),
        };
        let total = parameters.p + parameters.e + parameters.d + parameters.s1 + parameters.s2;

        Ok(ScoreResult {
            parameters,
            total,
            risk_level: RiskLevel::for_score(total),
        })
    }

    fn missing(&self) -> Vec<Parameter> {
        let mut missing = Vec::new();
        if self.p.is_none() {
            missing.push(Parameter::P);
        }
        if self.e.is_none() {
            missing.push(Parameter::E);
        }
        if self.d.is_none() {
            missing.push(Parameter::D);
        }
        if self.s1.is_none() {
            missing.push(Parameter::S1);
        }
        missing
    }
}

/// The outcome of finalizing a complete draft: the frozen parameter
/// values, their integer sum, and the derived risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ScoreResult {
    pub parameters: ScoredParameters,
    /// Always in 0–6: 1 + 1 + 2 + 1 + 1 at most.
    pub total: u8,
    pub risk_level: RiskLevel,
}
