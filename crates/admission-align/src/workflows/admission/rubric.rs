use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use super::clinical::NoteVocabulary;
use super::domain::{ClinicalSignal, CriterionCategory};

/// Tunable tables and thresholds driving every stage of the pipeline.
///
/// Deserializes from camelCase JSON; omitted fields fall back to the
/// standard rubric so partial overrides stay small.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Rubric {
    /// Guideline lines shorter than this many characters are dropped.
    pub minimum_criterion_length: usize,
    /// Checked in order; the first match wins.
    pub categories: Vec<CategoryRule>,
    pub vocabulary: NoteVocabulary,
    /// Applied additively to every criterion.
    pub evidence_rules: Vec<EvidenceRule>,
    pub met_threshold: u32,
    pub ceiling: ScoreCeiling,
    pub points_per_criterion: u32,
    pub admission_threshold: u8,
}

impl Rubric {
    pub fn standard() -> Self {
        Self {
            minimum_criterion_length: 31,
            categories: vec![
                CategoryRule::new(CriterionCategory::Respiratory, "oxygen|hypox|saturation"),
                CategoryRule::new(CriterionCategory::Imaging, "imaging|x-ray|ct"),
                CategoryRule::new(CriterionCategory::Laboratory, "lab|wbc|blood"),
                CategoryRule::new(CriterionCategory::Outpatient, "outpatient|failed"),
                CategoryRule::new(CriterionCategory::Comorbidity, "comorbid|risk"),
            ],
            vocabulary: NoteVocabulary::standard(),
            evidence_rules: vec![
                EvidenceRule::new(
                    "oxygen|hypox",
                    ClinicalSignal::Hypoxemia,
                    3,
                    "Hypoxemia documented.",
                ),
                EvidenceRule::new(
                    "imaging|x-ray|ct",
                    ClinicalSignal::ImagingFindings,
                    2,
                    "Imaging findings present.",
                ),
                EvidenceRule::new(
                    "lab|wbc",
                    ClinicalSignal::Labs,
                    2,
                    "Laboratory abnormalities documented.",
                ),
                EvidenceRule::new(
                    "outpatient|failed",
                    ClinicalSignal::OutpatientFailure,
                    2,
                    "Outpatient therapy failure documented.",
                ),
                EvidenceRule::new(
                    "comorbid|risk",
                    ClinicalSignal::Comorbidities,
                    1,
                    "Comorbidities documented.",
                ),
            ],
            met_threshold: 3,
            ceiling: ScoreCeiling::Fixed,
            points_per_criterion: 10,
            admission_threshold: 60,
        }
    }
}

impl Default for Rubric {
    fn default() -> Self {
        Self::standard()
    }
}

/// Keyword pattern that assigns a category to a guideline line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRule {
    pub category: CriterionCategory,
    pub pattern: String,
}

impl CategoryRule {
    pub fn new(category: CriterionCategory, pattern: impl Into<String>) -> Self {
        Self {
            category,
            pattern: pattern.into(),
        }
    }
}

/// Awards `points` when the criterion text matches `pattern` and the notes
/// carry `signal`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceRule {
    pub pattern: String,
    pub signal: ClinicalSignal,
    pub points: u32,
    pub evidence: String,
}

impl EvidenceRule {
    pub fn new(
        pattern: impl Into<String>,
        signal: ClinicalSignal,
        points: u32,
        evidence: impl Into<String>,
    ) -> Self {
        Self {
            pattern: pattern.into(),
            signal,
            points,
            evidence: evidence.into(),
        }
    }
}

/// How the per-criterion maximum is derived when computing the percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScoreCeiling {
    /// `points_per_criterion` for every criterion.
    #[default]
    Fixed,
    /// Sum of the points of the evidence rules whose pattern matches the
    /// criterion text.
    Achievable,
}

/// Raised when a supplied rubric cannot be compiled.
#[derive(Debug, thiserror::Error)]
pub enum RubricError {
    #[error("invalid {context} pattern '{pattern}': {source}")]
    InvalidPattern {
        context: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("lab pattern for '{lab}' must capture the numeric value")]
    MissingCaptureGroup { lab: String },
}

pub(crate) fn compile_pattern(pattern: &str, context: &'static str) -> Result<Regex, RubricError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| RubricError::InvalidPattern {
            context,
            pattern: pattern.to_string(),
            source,
        })
}
