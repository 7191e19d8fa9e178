use super::common::*;
use crate::workflows::admission::build_justification;
use crate::workflows::admission::domain::{AdmissionDecision, ClinicalData, CriterionCategory};

fn decision(percentage: u8, admission_recommended: bool) -> AdmissionDecision {
    AdmissionDecision {
        total_score: u32::from(percentage),
        max_possible_score: 100,
        percentage,
        admission_recommended,
    }
}

#[test]
fn summary_lists_met_categories_then_findings() {
    let pipeline = pipeline();
    let clinical = pipeline.extract_clinical_data(pneumonia_notes());
    let evaluated = vec![
        scored("C1", CriterionCategory::Respiratory, 3),
        scored("C2", CriterionCategory::Imaging, 2),
        scored("C3", CriterionCategory::Laboratory, 4),
    ];

    let narrative = build_justification(&clinical, &evaluated, &decision(30, false));

    assert_eq!(
        narrative.clinical_summary,
        "Admission criteria met: Respiratory criteria satisfied. \
         Admission criteria met: Laboratory criteria satisfied. \
         Hypoxemia documented with oxygen saturation below admission threshold. \
         Patient requires supplemental oxygen therapy. \
         Imaging findings consistent with acute pulmonary pathology. \
         Laboratory abnormalities support clinical severity. \
         Failure of outpatient therapy documented."
    );
}

#[test]
fn summary_is_empty_without_met_criteria_or_findings() {
    let narrative = build_justification(
        &ClinicalData::default(),
        &[scored("C1", CriterionCategory::General, 0)],
        &decision(0, false),
    );

    assert!(narrative.clinical_summary.is_empty());
}

#[test]
fn necessity_and_conclusion_follow_recommendation() {
    let clinical = ClinicalData::default();

    let recommended = build_justification(&clinical, &[], &decision(72, true));
    assert_eq!(
        recommended.medical_necessity_justification,
        "Structured alignment score 72% supports inpatient admission based on guideline criteria."
    );
    assert_eq!(
        recommended.conclusion,
        "Deterministic guideline alignment supports inpatient admission."
    );

    let declined = build_justification(&clinical, &[], &decision(20, false));
    assert_eq!(
        declined.medical_necessity_justification,
        "Alignment score 20% insufficient for inpatient admission under current documentation."
    );
    assert_eq!(
        declined.conclusion,
        "Additional documentation required to meet admission criteria."
    );
}

#[test]
fn risk_lists_comorbidities_in_extraction_order() {
    let clinical = pipeline().extract_clinical_data("Diabetes and hypertension on review.");

    let narrative = build_justification(&clinical, &[], &decision(0, false));

    assert_eq!(clinical.comorbidities, vec!["htn", "dm"]);
    assert_eq!(
        narrative.risk_stratification,
        "Comorbidities (htn, dm) increase risk of deterioration."
    );
}

#[test]
fn risk_defaults_when_no_comorbidities() {
    let narrative = build_justification(&ClinicalData::default(), &[], &decision(0, false));
    assert_eq!(
        narrative.risk_stratification,
        "No significant comorbid risk factors documented."
    );
}
