use super::domain::{
    AdmissionDecision, ClinicalData, CriterionStatus, EvaluatedCriterion, Justification,
};

/// Renders the four narrative sections from fixed sentence templates.
pub fn build_justification(
    clinical: &ClinicalData,
    evaluated: &[EvaluatedCriterion],
    decision: &AdmissionDecision,
) -> Justification {
    Justification {
        clinical_summary: clinical_summary(clinical, evaluated),
        medical_necessity_justification: medical_necessity(decision),
        risk_stratification: risk_stratification(clinical),
        conclusion: conclusion(decision),
    }
}

fn clinical_summary(clinical: &ClinicalData, evaluated: &[EvaluatedCriterion]) -> String {
    let mut lines: Vec<String> = evaluated
        .iter()
        .filter(|criterion| criterion.status == CriterionStatus::Met)
        .map(|criterion| {
            format!(
                "Admission criteria met: {} criteria satisfied.",
                criterion.category.label()
            )
        })
        .collect();

    let findings = [
        (
            clinical.hypoxemia,
            "Hypoxemia documented with oxygen saturation below admission threshold.",
        ),
        (
            clinical.oxygen_requirement,
            "Patient requires supplemental oxygen therapy.",
        ),
        (
            !clinical.imaging_findings.is_empty(),
            "Imaging findings consistent with acute pulmonary pathology.",
        ),
        (
            !clinical.labs.is_empty(),
            "Laboratory abnormalities support clinical severity.",
        ),
        (
            clinical.outpatient_failure,
            "Failure of outpatient therapy documented.",
        ),
    ];
    lines.extend(
        findings
            .iter()
            .filter(|(present, _)| *present)
            .map(|(_, sentence)| sentence.to_string()),
    );

    lines.join(" ")
}

fn medical_necessity(decision: &AdmissionDecision) -> String {
    if decision.admission_recommended {
        format!(
            "Structured alignment score {}% supports inpatient admission based on guideline criteria.",
            decision.percentage
        )
    } else {
        format!(
            "Alignment score {}% insufficient for inpatient admission under current documentation.",
            decision.percentage
        )
    }
}

fn risk_stratification(clinical: &ClinicalData) -> String {
    if clinical.comorbidities.is_empty() {
        "No significant comorbid risk factors documented.".to_string()
    } else {
        format!(
            "Comorbidities ({}) increase risk of deterioration.",
            clinical.comorbidities.join(", ")
        )
    }
}

fn conclusion(decision: &AdmissionDecision) -> String {
    if decision.admission_recommended {
        "Deterministic guideline alignment supports inpatient admission.".to_string()
    } else {
        "Additional documentation required to meet admission criteria.".to_string()
    }
}
