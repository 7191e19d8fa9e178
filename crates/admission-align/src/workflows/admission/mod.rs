//! Guideline-driven admission alignment.
//!
//! The pipeline runs in a single synchronous pass: guideline lines become
//! classified criteria, the notes become a [`ClinicalData`] record, each
//! criterion is scored against that record, the scores roll up into an
//! [`AdmissionDecision`], and the narrative is rendered last. Every table and
//! threshold comes from an injected [`Rubric`].

pub mod clinical;
pub mod domain;
pub(crate) mod evaluation;
pub mod export;
pub mod guideline;
pub mod justification;
pub mod router;
pub mod rubric;
pub mod service;

#[cfg(test)]
mod tests;

pub use clinical::{ClinicalExtractor, KeywordTag, LabPattern, NoteVocabulary};
pub use domain::{
    AdmissionDecision, AdmissionReport, ClinicalData, ClinicalSignal, CriterionCategory,
    CriterionStatus, EvaluatedCriterion, ExtractedCriterion, Justification, NarrativeSection,
};
pub use evaluation::{AdmissionScorer, CriteriaEvaluator};
pub use export::{write_criteria_csv, ExportError};
pub use guideline::{guideline_lines, CriterionExtractor};
pub use justification::build_justification;
pub use router::admission_router;
pub use rubric::{CategoryRule, EvidenceRule, Rubric, RubricError, ScoreCeiling};
pub use service::{AdmissionRequestError, AdmissionService, OptimizeRequest, OptimizeResponse};

use tracing::{debug, info};

/// Compiled rubric plus the stages that consume it. Immutable once built, so a
/// single instance can be shared across request handlers.
#[derive(Debug, Clone)]
pub struct AdmissionPipeline {
    criteria: CriterionExtractor,
    clinical: ClinicalExtractor,
    evaluator: CriteriaEvaluator,
    scorer: AdmissionScorer,
}

impl AdmissionPipeline {
    pub fn new(rubric: Rubric) -> Result<Self, RubricError> {
        Ok(Self {
            criteria: CriterionExtractor::new(&rubric)?,
            clinical: ClinicalExtractor::new(&rubric.vocabulary)?,
            evaluator: CriteriaEvaluator::new(&rubric)?,
            scorer: AdmissionScorer::new(&rubric)?,
        })
    }

    /// Pipeline over [`Rubric::standard`].
    pub fn standard() -> Self {
        Self::new(Rubric::standard()).expect("standard rubric patterns compile")
    }

    pub fn extract_criteria<S: AsRef<str>>(&self, guideline: &[S]) -> Vec<ExtractedCriterion> {
        self.criteria.extract(guideline)
    }

    pub fn extract_clinical_data(&self, notes: &str) -> ClinicalData {
        self.clinical.extract(notes)
    }

    pub fn evaluate<S: AsRef<str>>(&self, notes: &str, guideline: &[S]) -> AdmissionReport {
        let extracted_criteria = self.criteria.extract(guideline);
        debug!(
            candidates = guideline.len(),
            criteria = extracted_criteria.len(),
            "extracted guideline criteria"
        );

        let clinical_data = self.clinical.extract(notes);
        debug!(
            symptoms = clinical_data.symptoms.len(),
            labs = clinical_data.labs.len(),
            hypoxemia = clinical_data.hypoxemia,
            "extracted clinical signals"
        );

        let evaluated = self.evaluator.evaluate(&extracted_criteria, &clinical_data);
        let decision = self.scorer.decide(&evaluated);
        debug!(
            total = decision.total_score,
            max = decision.max_possible_score,
            "matched criteria against notes"
        );

        let revised_notes = build_justification(&clinical_data, &evaluated, &decision);
        info!(
            percentage = decision.percentage,
            recommended = decision.admission_recommended,
            "admission alignment complete"
        );

        AdmissionReport {
            extracted_criteria,
            missing_criteria: evaluated,
            revised_notes,
            overall_score: decision.percentage,
            admission_recommended: decision.admission_recommended,
            clinical_data,
            decision,
        }
    }

    /// Same as [`AdmissionPipeline::evaluate`] over unsplit guideline text.
    pub fn evaluate_text(&self, notes: &str, guideline_text: &str) -> AdmissionReport {
        self.evaluate(notes, &guideline_lines(guideline_text))
    }
}

impl Default for AdmissionPipeline {
    fn default() -> Self {
        Self::standard()
    }
}
