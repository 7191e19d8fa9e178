use regex::Regex;

use super::domain::{CriterionCategory, ExtractedCriterion};
use super::rubric::{compile_pattern, Rubric, RubricError};

/// Splits raw guideline text into trimmed, non-blank candidate lines.
pub fn guideline_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Turns guideline lines into classified criteria.
#[derive(Debug, Clone)]
pub struct CriterionExtractor {
    minimum_length: usize,
    categories: Vec<(CriterionCategory, Regex)>,
}

impl CriterionExtractor {
    pub fn new(rubric: &Rubric) -> Result<Self, RubricError> {
        let categories = rubric
            .categories
            .iter()
            .map(|rule| Ok((rule.category, compile_pattern(&rule.pattern, "category")?)))
            .collect::<Result<Vec<_>, RubricError>>()?;

        Ok(Self {
            minimum_length: rubric.minimum_criterion_length,
            categories,
        })
    }

    pub fn extract<S: AsRef<str>>(&self, lines: &[S]) -> Vec<ExtractedCriterion> {
        lines
            .iter()
            .map(AsRef::as_ref)
            .filter(|line| line.chars().count() >= self.minimum_length)
            .enumerate()
            .map(|(index, line)| ExtractedCriterion {
                id: format!("C{}", index + 1),
                text: line.to_string(),
                category: self.classify(line),
            })
            .collect()
    }

    pub fn classify(&self, text: &str) -> CriterionCategory {
        self.categories
            .iter()
            .find(|(_, pattern)| pattern.is_match(text))
            .map(|(category, _)| *category)
            .unwrap_or(CriterionCategory::General)
    }
}
