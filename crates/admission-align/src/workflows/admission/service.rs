use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::domain::AdmissionReport;
use super::guideline::guideline_lines;
use super::AdmissionPipeline;
use crate::workflows::validation::{SimilarityPolicy, ValidationReport};

/// Inbound payload from the note-optimization front end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeRequest {
    #[serde(default)]
    pub doctor_notes: Option<String>,
    #[serde(default, alias = "pdfText")]
    pub guideline_text: Option<String>,
    #[serde(default)]
    pub reference_notes: Option<String>,
}

/// Pipeline report plus the optional reviewer comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizeResponse {
    #[serde(flatten)]
    pub report: AdmissionReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation: Option<ValidationReport>,
}

/// Input rejected before the pipeline runs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdmissionRequestError {
    #[error("Doctor notes are required.")]
    MissingNotes,
    #[error("guideline text is empty")]
    EmptyGuideline,
}

/// Service composing the shared pipeline with the narrative comparison policy.
#[derive(Debug, Clone)]
pub struct AdmissionService {
    pipeline: Arc<AdmissionPipeline>,
    similarity: SimilarityPolicy,
}

impl AdmissionService {
    pub fn new(pipeline: AdmissionPipeline, similarity: SimilarityPolicy) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            similarity,
        }
    }

    /// Validate the request, run the pipeline, and compare against the
    /// reference narrative when one was supplied.
    pub fn optimize(
        &self,
        request: OptimizeRequest,
    ) -> Result<OptimizeResponse, AdmissionRequestError> {
        let notes = non_blank(request.doctor_notes).ok_or_else(|| {
            warn!("rejecting request without doctor notes");
            AdmissionRequestError::MissingNotes
        })?;

        let lines = request
            .guideline_text
            .as_deref()
            .map(guideline_lines)
            .unwrap_or_default();
        if lines.is_empty() {
            warn!("rejecting request with empty guideline text");
            return Err(AdmissionRequestError::EmptyGuideline);
        }

        let report = self.pipeline.evaluate(&notes, &lines);
        let validation = non_blank(request.reference_notes)
            .map(|reference| self.similarity.compare(&report.revised_notes, &reference));

        Ok(OptimizeResponse { report, validation })
    }
}

impl Default for AdmissionService {
    fn default() -> Self {
        Self::new(AdmissionPipeline::standard(), SimilarityPolicy::default())
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
