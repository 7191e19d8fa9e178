mod policy;
mod rules;

pub use policy::AdmissionScorer;

use super::domain::{ClinicalData, CriterionStatus, EvaluatedCriterion, ExtractedCriterion};
use super::rubric::{Rubric, RubricError};
use rules::{score_criterion, CompiledRule};

/// Stateless evaluator that applies the rubric's evidence rules to each criterion.
#[derive(Debug, Clone)]
pub struct CriteriaEvaluator {
    rules: Vec<CompiledRule>,
    met_threshold: u32,
}

impl CriteriaEvaluator {
    pub fn new(rubric: &Rubric) -> Result<Self, RubricError> {
        let rules = rubric
            .evidence_rules
            .iter()
            .map(CompiledRule::compile)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            rules,
            met_threshold: rubric.met_threshold,
        })
    }

    pub fn evaluate(
        &self,
        criteria: &[ExtractedCriterion],
        clinical: &ClinicalData,
    ) -> Vec<EvaluatedCriterion> {
        criteria
            .iter()
            .map(|criterion| self.evaluate_one(criterion, clinical))
            .collect()
    }

    fn evaluate_one(
        &self,
        criterion: &ExtractedCriterion,
        clinical: &ClinicalData,
    ) -> EvaluatedCriterion {
        let tally = score_criterion(&self.rules, &criterion.text, clinical);
        let status = CriterionStatus::from_score(tally.score, self.met_threshold);

        let suggested_language = if status == CriterionStatus::Missing {
            format!("Explicitly document: {}", criterion.text)
        } else {
            String::new()
        };

        EvaluatedCriterion {
            criterion_id: criterion.id.clone(),
            criterion_text: criterion.text.clone(),
            category: criterion.category,
            status,
            evidence_found: tally.evidence.join(" "),
            suggested_language,
            score_contribution: tally.score,
        }
    }
}
