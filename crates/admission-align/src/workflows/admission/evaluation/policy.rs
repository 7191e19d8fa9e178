use super::super::domain::{AdmissionDecision, EvaluatedCriterion};
use super::super::rubric::{Rubric, RubricError, ScoreCeiling};
use super::rules::CompiledRule;

#[derive(Debug, Clone)]
enum Ceiling {
    Fixed(u32),
    Achievable(Vec<CompiledRule>),
}

/// Rolls per-criterion scores into a percentage and admission recommendation.
#[derive(Debug, Clone)]
pub struct AdmissionScorer {
    ceiling: Ceiling,
    threshold: u8,
}

impl AdmissionScorer {
    pub fn new(rubric: &Rubric) -> Result<Self, RubricError> {
        let ceiling = match rubric.ceiling {
            ScoreCeiling::Fixed => Ceiling::Fixed(rubric.points_per_criterion),
            ScoreCeiling::Achievable => Ceiling::Achievable(
                rubric
                    .evidence_rules
                    .iter()
                    .map(CompiledRule::compile)
                    .collect::<Result<Vec<_>, _>>()?,
            ),
        };

        Ok(Self {
            ceiling,
            threshold: rubric.admission_threshold,
        })
    }

    pub fn decide(&self, evaluated: &[EvaluatedCriterion]) -> AdmissionDecision {
        let total_score = evaluated
            .iter()
            .fold(0u32, |sum, criterion| {
                sum.saturating_add(criterion.score_contribution)
            });
        let max_possible_score = self.max_possible_score(evaluated);
        let percentage = percentage(total_score, max_possible_score);

        AdmissionDecision {
            total_score,
            max_possible_score,
            percentage,
            admission_recommended: percentage >= self.threshold,
        }
    }

    fn max_possible_score(&self, evaluated: &[EvaluatedCriterion]) -> u32 {
        match &self.ceiling {
            Ceiling::Fixed(points) => {
                let count = u32::try_from(evaluated.len()).unwrap_or(u32::MAX);
                points.saturating_mul(count)
            }
            Ceiling::Achievable(rules) => evaluated
                .iter()
                .map(|criterion| {
                    let text = criterion.criterion_text.to_lowercase();
                    rules
                        .iter()
                        .filter(|rule| rule.applies_to(&text))
                        .fold(0u32, |sum, rule| sum.saturating_add(rule.points()))
                })
                .fold(0u32, u32::saturating_add),
        }
    }
}

/// Rounds the floating-point ratio half up and caps at 100; an empty ceiling
/// scores 0.
pub(crate) fn percentage(total: u32, max: u32) -> u8 {
    if max == 0 {
        return 0;
    }
    let ratio = f64::from(total) / f64::from(max) * 100.0;
    (ratio + 0.5).floor().min(100.0) as u8
}
