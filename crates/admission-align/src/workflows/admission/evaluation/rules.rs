use regex::Regex;

use super::super::domain::{ClinicalData, ClinicalSignal};
use super::super::rubric::{compile_pattern, EvidenceRule, RubricError};

#[derive(Debug, Clone)]
pub(crate) struct CompiledRule {
    pattern: Regex,
    signal: ClinicalSignal,
    points: u32,
    evidence: String,
}

impl CompiledRule {
    pub(crate) fn compile(rule: &EvidenceRule) -> Result<Self, RubricError> {
        Ok(Self {
            pattern: compile_pattern(&rule.pattern, "evidence")?,
            signal: rule.signal,
            points: rule.points,
            evidence: rule.evidence.clone(),
        })
    }

    pub(crate) fn applies_to(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }

    pub(crate) fn points(&self) -> u32 {
        self.points
    }
}

pub(crate) struct RuleTally<'a> {
    pub score: u32,
    pub evidence: Vec<&'a str>,
}

/// Sums every rule whose pattern matches the criterion text and whose signal
/// is present in the notes. Evidence keeps rule order.
pub(crate) fn score_criterion<'a>(
    rules: &'a [CompiledRule],
    criterion_text: &str,
    clinical: &ClinicalData,
) -> RuleTally<'a> {
    let text = criterion_text.to_lowercase();
    let mut score: u32 = 0;
    let mut evidence = Vec::new();

    for rule in rules {
        if rule.applies_to(&text) && clinical.has_signal(rule.signal) {
            score = score.saturating_add(rule.points);
            evidence.push(rule.evidence.as_str());
        }
    }

    RuleTally { score, evidence }
}
