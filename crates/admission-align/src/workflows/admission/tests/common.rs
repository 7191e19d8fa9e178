use axum::response::Response;
use serde_json::Value;

use crate::workflows::admission::domain::{
    CriterionCategory, CriterionStatus, EvaluatedCriterion, ExtractedCriterion,
};
use crate::workflows::admission::{AdmissionPipeline, Rubric};

pub(super) const HYPOXEMIA_LINE: &str =
    "Patient must demonstrate hypoxemia with oxygen saturation below 90% on room air.";

pub(super) fn pneumonia_notes() -> &'static str {
    "72-year-old with cough and shortness of breath for 4 days. History of hypertension and \
     diabetes. Failed outpatient antibiotics with worsening dyspnea. O2 < 90 on room air, \
     started on supplemental oxygen. Chest X-ray shows right lower lobe consolidation. WBC: 16."
}

pub(super) fn guideline_text() -> &'static str {
    "Admission Criteria\n\
     Oxygen saturation below 90% on room air or new supplemental oxygen requirement.\n\
     \n\
     Radiographic confirmation of pneumonia on chest x-ray or CT imaging.\n\
     Laboratory abnormalities including an elevated WBC count.\n\
     Failure of outpatient management despite appropriate oral therapy.\n\
     Significant comorbid conditions that increase risk of deterioration.\n"
}

pub(super) fn pipeline() -> AdmissionPipeline {
    AdmissionPipeline::standard()
}

pub(super) fn pipeline_with(rubric: Rubric) -> AdmissionPipeline {
    AdmissionPipeline::new(rubric).expect("rubric compiles")
}

pub(super) fn criterion(id: &str, text: &str, category: CriterionCategory) -> ExtractedCriterion {
    ExtractedCriterion {
        id: id.to_string(),
        text: text.to_string(),
        category,
    }
}

pub(super) fn scored(id: &str, category: CriterionCategory, score: u32) -> EvaluatedCriterion {
    let status = CriterionStatus::from_score(score, 3);
    let text = format!("{} criterion placeholder text for {id}", category.label());
    EvaluatedCriterion {
        criterion_id: id.to_string(),
        suggested_language: if status == CriterionStatus::Missing {
            format!("Explicitly document: {text}")
        } else {
            String::new()
        },
        criterion_text: text,
        category,
        status,
        evidence_found: String::new(),
        score_contribution: score,
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
