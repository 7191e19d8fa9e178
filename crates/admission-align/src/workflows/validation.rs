//! Lexical comparison of a generated narrative against a reviewer's reference
//! text. Scores are for human review only; the admission decision never reads
//! them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::workflows::admission::{Justification, NarrativeSection};

/// Overlap formula applied to the two token sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OverlapMetric {
    /// `|generated ∩ reference| / |reference|`
    #[default]
    ReferenceCoverage,
    /// `|generated ∩ reference| / |generated ∪ reference|`
    Jaccard,
}

/// Tokenization and scoring settings for narrative comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimilarityPolicy {
    /// Tokens must be strictly longer than this many characters to count.
    pub min_token_length: usize,
    pub strip_punctuation: bool,
    pub metric: OverlapMetric,
}

impl Default for SimilarityPolicy {
    fn default() -> Self {
        Self {
            min_token_length: 3,
            strip_punctuation: true,
            metric: OverlapMetric::ReferenceCoverage,
        }
    }
}

impl SimilarityPolicy {
    /// Distinct scoring tokens of `text`.
    pub fn tokens(&self, text: &str) -> BTreeSet<String> {
        self.words(text)
            .into_iter()
            .filter(|word| word.chars().count() > self.min_token_length)
            .collect()
    }

    /// Percentage overlap in `0..=100`; 0 when either side has no tokens.
    pub fn similarity(&self, generated: &str, reference: &str) -> u8 {
        let generated = self.tokens(generated);
        let reference = self.tokens(reference);
        if generated.is_empty() || reference.is_empty() {
            return 0;
        }

        let shared = generated.intersection(&reference).count();
        let denominator = match self.metric {
            OverlapMetric::ReferenceCoverage => reference.len(),
            OverlapMetric::Jaccard => generated.union(&reference).count(),
        };

        round_percent(shared, denominator)
    }

    /// Words of `generated` that never appear in `reference`, in order of first use.
    ///
    /// Generated words only lose sentence punctuation (`.,;:!?`), so a word such
    /// as "patient's" stays distinct from "patients" in the reference.
    pub fn unmatched_terms(&self, generated: &str, reference: &str) -> Vec<String> {
        let reference: BTreeSet<String> = self.words(reference).into_iter().collect();
        let mut unmatched: Vec<String> = Vec::new();
        for word in self.highlight_words(generated) {
            if !reference.contains(&word) && !unmatched.contains(&word) {
                unmatched.push(word);
            }
        }
        unmatched
    }

    pub fn compare(&self, narrative: &Justification, reference: &str) -> ValidationReport {
        let sections: Vec<SectionSimilarity> = narrative
            .sections()
            .iter()
            .map(|(section, text)| SectionSimilarity {
                section: *section,
                title: section.title(),
                similarity: self.similarity(text, reference),
                unmatched_terms: self.unmatched_terms(text, reference),
            })
            .collect();

        let total: usize = sections
            .iter()
            .map(|section| usize::from(section.similarity))
            .sum();
        let overall = round_percent(total, sections.len() * 100);

        ValidationReport {
            overall,
            band: SimilarityBand::from_score(overall),
            sections,
        }
    }

    fn words(&self, text: &str) -> Vec<String> {
        let lower = text.to_lowercase();
        let cleaned: String = if self.strip_punctuation {
            lower
                .chars()
                .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || c.is_whitespace())
                .collect()
        } else {
            lower
        };
        cleaned.split_whitespace().map(str::to_string).collect()
    }

    fn highlight_words(&self, text: &str) -> Vec<String> {
        text.split_whitespace()
            .map(|word| {
                let lower = word.to_lowercase();
                if self.strip_punctuation {
                    lower
                        .chars()
                        .filter(|c| !matches!(c, '.' | ',' | ';' | ':' | '!' | '?'))
                        .collect()
                } else {
                    lower
                }
            })
            .filter(|word: &String| !word.is_empty())
            .collect()
    }
}

fn round_percent(numerator: usize, denominator: usize) -> u8 {
    if denominator == 0 {
        return 0;
    }
    let ratio = numerator as f64 / denominator as f64 * 100.0;
    (ratio + 0.5).floor().min(100.0) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityBand {
    Strong,
    Moderate,
    Weak,
}

impl SimilarityBand {
    pub fn from_score(score: u8) -> Self {
        match score {
            70..=u8::MAX => SimilarityBand::Strong,
            40..=69 => SimilarityBand::Moderate,
            _ => SimilarityBand::Weak,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SimilarityBand::Strong => "strong",
            SimilarityBand::Moderate => "moderate",
            SimilarityBand::Weak => "weak",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSimilarity {
    pub section: NarrativeSection,
    pub title: &'static str,
    pub similarity: u8,
    pub unmatched_terms: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub overall: u8,
    pub band: SimilarityBand,
    pub sections: Vec<SectionSimilarity>,
}
