use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Guideline category assigned to an extracted criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CriterionCategory {
    Respiratory,
    Imaging,
    Laboratory,
    Outpatient,
    Comorbidity,
    General,
}

impl CriterionCategory {
    pub fn label(&self) -> &'static str {
        match self {
            CriterionCategory::Respiratory => "Respiratory",
            CriterionCategory::Imaging => "Imaging",
            CriterionCategory::Laboratory => "Laboratory",
            CriterionCategory::Outpatient => "Outpatient",
            CriterionCategory::Comorbidity => "Comorbidity",
            CriterionCategory::General => "General",
        }
    }
}

/// Admission requirement lifted from a single guideline line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedCriterion {
    pub id: String,
    pub text: String,
    pub category: CriterionCategory,
}

/// Structured signals recovered from free-text clinical notes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalData {
    pub symptoms: Vec<String>,
    /// Reserved; no vital-sign rules exist yet.
    pub vitals: BTreeMap<String, f64>,
    pub labs: BTreeMap<String, f64>,
    pub imaging_findings: Vec<String>,
    pub oxygen_requirement: bool,
    pub hypoxemia: bool,
    pub comorbidities: Vec<String>,
    pub outpatient_failure: bool,
}

impl ClinicalData {
    pub fn has_signal(&self, signal: ClinicalSignal) -> bool {
        match signal {
            ClinicalSignal::Hypoxemia => self.hypoxemia,
            ClinicalSignal::OxygenRequirement => self.oxygen_requirement,
            ClinicalSignal::ImagingFindings => !self.imaging_findings.is_empty(),
            ClinicalSignal::Labs => !self.labs.is_empty(),
            ClinicalSignal::OutpatientFailure => self.outpatient_failure,
            ClinicalSignal::Comorbidities => !self.comorbidities.is_empty(),
            ClinicalSignal::Symptoms => !self.symptoms.is_empty(),
        }
    }
}

/// Field of [`ClinicalData`] an evidence rule can check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClinicalSignal {
    Hypoxemia,
    OxygenRequirement,
    ImagingFindings,
    Labs,
    OutpatientFailure,
    Comorbidities,
    Symptoms,
}

/// Tri-state outcome for a single criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CriterionStatus {
    Met,
    #[serde(rename = "Partially Met")]
    PartiallyMet,
    Missing,
}

impl CriterionStatus {
    pub fn from_score(score: u32, met_threshold: u32) -> Self {
        if score >= met_threshold && score > 0 {
            CriterionStatus::Met
        } else if score > 0 {
            CriterionStatus::PartiallyMet
        } else {
            CriterionStatus::Missing
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CriterionStatus::Met => "Met",
            CriterionStatus::PartiallyMet => "Partially Met",
            CriterionStatus::Missing => "Missing",
        }
    }
}

/// Scored criterion with the evidence trail that produced its status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluatedCriterion {
    pub criterion_id: String,
    pub criterion_text: String,
    pub category: CriterionCategory,
    pub status: CriterionStatus,
    pub evidence_found: String,
    pub suggested_language: String,
    pub score_contribution: u32,
}

/// Aggregate score and the resulting recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionDecision {
    pub total_score: u32,
    pub max_possible_score: u32,
    pub percentage: u8,
    pub admission_recommended: bool,
}

/// Four-section narrative supporting (or declining) inpatient admission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Justification {
    pub clinical_summary: String,
    pub medical_necessity_justification: String,
    pub risk_stratification: String,
    pub conclusion: String,
}

impl Justification {
    pub fn sections(&self) -> [(NarrativeSection, &str); 4] {
        [
            (NarrativeSection::ClinicalSummary, &self.clinical_summary),
            (
                NarrativeSection::MedicalNecessityJustification,
                &self.medical_necessity_justification,
            ),
            (
                NarrativeSection::RiskStratification,
                &self.risk_stratification,
            ),
            (NarrativeSection::Conclusion, &self.conclusion),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NarrativeSection {
    ClinicalSummary,
    MedicalNecessityJustification,
    RiskStratification,
    Conclusion,
}

impl NarrativeSection {
    pub fn title(&self) -> &'static str {
        match self {
            NarrativeSection::ClinicalSummary => "Clinical Summary",
            NarrativeSection::MedicalNecessityJustification => "Medical Necessity Justification",
            NarrativeSection::RiskStratification => "Risk Stratification",
            NarrativeSection::Conclusion => "Conclusion",
        }
    }
}

/// Full pipeline output. `missing_criteria` carries every evaluated criterion,
/// whatever its status, to stay wire-compatible with existing consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionReport {
    pub extracted_criteria: Vec<ExtractedCriterion>,
    pub missing_criteria: Vec<EvaluatedCriterion>,
    pub revised_notes: Justification,
    pub overall_score: u8,
    pub admission_recommended: bool,
    pub clinical_data: ClinicalData,
    pub decision: AdmissionDecision,
}
