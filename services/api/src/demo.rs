use crate::infra::{build_service, read_text, resolve_rubric};
use admission_align::error::AppError;
use admission_align::workflows::admission::{
    write_criteria_csv, CriterionStatus, OptimizeRequest, OptimizeResponse, Rubric, ScoreCeiling,
};
use clap::Args;
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

const DEMO_NOTES: &str = "68-year-old presenting with cough and shortness of breath for five days. \
History of hypertension and diabetes. Failed outpatient amoxicillin with worsening dyspnea. \
O2 < 90 on room air, now on 3L supplemental oxygen. Chest X-ray: right lower lobe consolidation. \
WBC: 18.";

const DEMO_GUIDELINE: &str = "Admission Criteria (CAP)
Oxygen saturation below 90% on room air or new supplemental oxygen requirement.
Radiographic confirmation of pneumonia on chest x-ray or CT imaging.
Laboratory abnormalities including an elevated WBC count.
Failure of outpatient management despite appropriate oral therapy.
Significant comorbid conditions that increase risk of deterioration.
Patient is unable to maintain oral hydration or medication adherence.";

const DEMO_REFERENCE: &str = "Patient with pneumonia and hypoxemia requiring supplemental oxygen. \
Chest imaging confirms consolidation and laboratory studies show leukocytosis. Outpatient therapy \
failed. Comorbid hypertension and diabetes increase risk. Inpatient admission is medically necessary.";

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Clinical notes text file
    #[arg(long)]
    pub(crate) notes: PathBuf,
    /// Guideline text file (one criterion per line)
    #[arg(long)]
    pub(crate) guideline: PathBuf,
    /// Optional reference narrative to compare the generated notes against
    #[arg(long)]
    pub(crate) reference: Option<PathBuf>,
    /// JSON rubric overriding the configured scoring tables
    #[arg(long)]
    pub(crate) rubric: Option<PathBuf>,
    /// Write the evaluated criteria table to this CSV file
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Print the full JSON payload instead of the readable report
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Score against the achievable ceiling instead of 10 points per criterion
    #[arg(long)]
    pub(crate) achievable_ceiling: bool,
    /// Skip the reference-narrative comparison
    #[arg(long)]
    pub(crate) skip_validation: bool,
    /// Print the full JSON payload instead of the readable report
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        notes,
        guideline,
        reference,
        rubric,
        csv,
        json,
    } = args;

    let service = build_service(resolve_rubric(rubric.as_deref())?)?;
    let request = OptimizeRequest {
        doctor_notes: Some(read_text(&notes)?),
        guideline_text: Some(read_text(&guideline)?),
        reference_notes: reference.as_deref().map(read_text).transpose()?,
    };
    let response = service.optimize(request)?;

    if let Some(path) = csv {
        let file = File::create(&path)?;
        write_criteria_csv(BufWriter::new(file), &response.report.missing_criteria)?;
        println!("Criteria table written to {}", path.display());
    }

    emit(&response, json)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        achievable_ceiling,
        skip_validation,
        json,
    } = args;

    let mut rubric = Rubric::standard();
    if achievable_ceiling {
        rubric.ceiling = ScoreCeiling::Achievable;
    }
    let service = build_service(rubric)?;

    let request = OptimizeRequest {
        doctor_notes: Some(DEMO_NOTES.to_string()),
        guideline_text: Some(DEMO_GUIDELINE.to_string()),
        reference_notes: (!skip_validation).then(|| DEMO_REFERENCE.to_string()),
    };
    let response = service.optimize(request)?;

    if !json {
        println!("Admission alignment demo (community-acquired pneumonia)");
        println!(
            "Ceiling policy: {}",
            if achievable_ceiling {
                "achievable points per criterion"
            } else {
                "10 points per criterion"
            }
        );
    }
    emit(&response, json)
}

fn emit(response: &OptimizeResponse, json: bool) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string_pretty(response)?);
    } else {
        render_report(response);
    }
    Ok(())
}

pub(crate) fn render_report(response: &OptimizeResponse) {
    let report = &response.report;
    let decision = &report.decision;

    println!(
        "\nAlignment score: {}% ({} of {} points) -> {}",
        decision.percentage,
        decision.total_score,
        decision.max_possible_score,
        if decision.admission_recommended {
            "admission recommended"
        } else {
            "admission not supported"
        }
    );

    println!("\nCriteria");
    for criterion in &report.missing_criteria {
        println!(
            "- {} [{}] {} ({} pts): {}",
            criterion.criterion_id,
            criterion.category.label(),
            criterion.status.label(),
            criterion.score_contribution,
            criterion.criterion_text
        );
        if !criterion.evidence_found.is_empty() {
            println!("    evidence: {}", criterion.evidence_found);
        }
        if criterion.status == CriterionStatus::Missing {
            println!("    suggestion: {}", criterion.suggested_language);
        }
    }

    let data = &report.clinical_data;
    println!("\nClinical signals");
    println!("- symptoms: {}", list_or_none(&data.symptoms));
    println!(
        "- labs: {}",
        if data.labs.is_empty() {
            "none".to_string()
        } else {
            data.labs
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join(", ")
        }
    );
    println!("- imaging: {}", list_or_none(&data.imaging_findings));
    println!(
        "- hypoxemia: {} | oxygen requirement: {} | outpatient failure: {}",
        data.hypoxemia, data.oxygen_requirement, data.outpatient_failure
    );
    println!("- comorbidities: {}", list_or_none(&data.comorbidities));

    println!("\nRevised notes");
    for (section, text) in report.revised_notes.sections() {
        println!("{}:\n  {}", section.title(), text);
    }

    if let Some(validation) = &response.validation {
        println!(
            "\nReference comparison: {}% ({})",
            validation.overall,
            validation.band.label()
        );
        for section in &validation.sections {
            println!("- {}: {}% match", section.title, section.similarity);
        }
    }
}

fn list_or_none(values: &[String]) -> String {
    if values.is_empty() {
        "none".to_string()
    } else {
        values.join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_scenario_scores_every_signal() {
        let service = build_service(Rubric::standard()).expect("service builds");
        let response = service
            .optimize(OptimizeRequest {
                doctor_notes: Some(DEMO_NOTES.to_string()),
                guideline_text: Some(DEMO_GUIDELINE.to_string()),
                reference_notes: Some(DEMO_REFERENCE.to_string()),
            })
            .expect("demo request is valid");

        let report = &response.report;
        assert_eq!(report.extracted_criteria.len(), 6);
        assert_eq!(report.decision.total_score, 10);
        assert_eq!(report.overall_score, 17);
        assert_eq!(report.missing_criteria[5].status, CriterionStatus::Missing);
        assert!(response.validation.is_some());
    }

    #[test]
    fn achievable_ceiling_recommends_demo_admission() {
        let mut rubric = Rubric::standard();
        rubric.ceiling = ScoreCeiling::Achievable;
        let service = build_service(rubric).expect("service builds");

        let response = service
            .optimize(OptimizeRequest {
                doctor_notes: Some(DEMO_NOTES.to_string()),
                guideline_text: Some(DEMO_GUIDELINE.to_string()),
                reference_notes: None,
            })
            .expect("demo request is valid");

        assert!(response.report.admission_recommended);
    }
}
