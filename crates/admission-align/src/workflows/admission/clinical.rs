use std::collections::BTreeMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::domain::ClinicalData;
use super::rubric::{compile_pattern, RubricError};

/// Keyword tables used to recognise signals in clinical notes.
///
/// Keywords are matched as substrings of the lower-cased notes; patterns are
/// case-insensitive regular expressions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NoteVocabulary {
    pub symptoms: Vec<KeywordTag>,
    pub labs: Vec<LabPattern>,
    pub imaging_keywords: Vec<String>,
    pub imaging_tag: String,
    pub oxygen_keywords: Vec<String>,
    pub hypoxemia_patterns: Vec<String>,
    pub comorbidities: Vec<KeywordTag>,
    pub outpatient_failure_phrases: Vec<String>,
}

impl NoteVocabulary {
    pub fn standard() -> Self {
        Self {
            symptoms: vec![
                KeywordTag::new("cough", "cough"),
                KeywordTag::new("shortness of breath", "sob"),
            ],
            labs: vec![LabPattern::new("wbc", r"wbc\s*[:=]?\s*([0-9]+)")],
            imaging_keywords: strings(&["x-ray", "ct"]),
            imaging_tag: "abnormal imaging".to_string(),
            oxygen_keywords: strings(&["oxygen"]),
            hypoxemia_patterns: strings(&[r"o2\s*<\s*90", r"oxygen\s*saturation\s*<\s*90"]),
            comorbidities: vec![
                KeywordTag::new("hypertension", "htn"),
                KeywordTag::new("diabetes", "dm"),
            ],
            outpatient_failure_phrases: strings(&[
                "failed outpatient",
                "no improvement",
                "worsening",
            ]),
        }
    }
}

impl Default for NoteVocabulary {
    fn default() -> Self {
        Self::standard()
    }
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordTag {
    pub keyword: String,
    pub tag: String,
}

impl KeywordTag {
    pub fn new(keyword: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into(),
            tag: tag.into(),
        }
    }
}

/// Named lab whose first capture group holds the numeric result. The first
/// match whose capture parses as a number wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabPattern {
    pub name: String,
    pub pattern: String,
}

impl LabPattern {
    pub fn new(name: impl Into<String>, pattern: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pattern: pattern.into(),
        }
    }
}

/// Compiled form of a [`NoteVocabulary`].
#[derive(Debug, Clone)]
pub struct ClinicalExtractor {
    symptoms: Vec<KeywordTag>,
    labs: Vec<(String, Regex)>,
    imaging_keywords: Vec<String>,
    imaging_tag: String,
    oxygen_keywords: Vec<String>,
    hypoxemia: Vec<Regex>,
    comorbidities: Vec<KeywordTag>,
    outpatient_failure_phrases: Vec<String>,
}

impl ClinicalExtractor {
    pub fn new(vocabulary: &NoteVocabulary) -> Result<Self, RubricError> {
        let mut labs = Vec::with_capacity(vocabulary.labs.len());
        for lab in &vocabulary.labs {
            let pattern = compile_pattern(&lab.pattern, "lab")?;
            if pattern.captures_len() < 2 {
                return Err(RubricError::MissingCaptureGroup {
                    lab: lab.name.clone(),
                });
            }
            labs.push((lab.name.clone(), pattern));
        }

        let hypoxemia = vocabulary
            .hypoxemia_patterns
            .iter()
            .map(|pattern| compile_pattern(pattern, "hypoxemia"))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            symptoms: lowercase_tags(&vocabulary.symptoms),
            labs,
            imaging_keywords: lowercase_all(&vocabulary.imaging_keywords),
            imaging_tag: vocabulary.imaging_tag.clone(),
            oxygen_keywords: lowercase_all(&vocabulary.oxygen_keywords),
            hypoxemia,
            comorbidities: lowercase_tags(&vocabulary.comorbidities),
            outpatient_failure_phrases: lowercase_all(&vocabulary.outpatient_failure_phrases),
        })
    }

    pub fn extract(&self, notes: &str) -> ClinicalData {
        let lower = notes.to_lowercase();

        let mut labs = BTreeMap::new();
        for (name, pattern) in &self.labs {
            if labs.contains_key(name) {
                continue;
            }
            let value = pattern.captures_iter(&lower).find_map(|captures| {
                captures
                    .get(1)
                    .and_then(|capture| capture.as_str().trim().parse::<f64>().ok())
            });
            if let Some(value) = value {
                labs.insert(name.clone(), value);
            }
        }

        let imaging_findings = if contains_any(&lower, &self.imaging_keywords) {
            vec![self.imaging_tag.clone()]
        } else {
            Vec::new()
        };

        ClinicalData {
            symptoms: tags_present(&lower, &self.symptoms),
            vitals: BTreeMap::new(),
            labs,
            imaging_findings,
            oxygen_requirement: contains_any(&lower, &self.oxygen_keywords),
            hypoxemia: self.hypoxemia.iter().any(|pattern| pattern.is_match(&lower)),
            comorbidities: tags_present(&lower, &self.comorbidities),
            outpatient_failure: contains_any(&lower, &self.outpatient_failure_phrases),
        }
    }
}

fn contains_any(text: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword.as_str()))
}

fn tags_present(text: &str, table: &[KeywordTag]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for entry in table {
        if text.contains(entry.keyword.as_str()) && !tags.contains(&entry.tag) {
            tags.push(entry.tag.clone());
        }
    }
    tags
}

fn lowercase_all(values: &[String]) -> Vec<String> {
    values
        .iter()
        .map(|value| value.to_lowercase())
        .filter(|value| !value.is_empty())
        .collect()
}

fn lowercase_tags(table: &[KeywordTag]) -> Vec<KeywordTag> {
    table
        .iter()
        .filter(|entry| !entry.keyword.is_empty())
        .map(|entry| KeywordTag::new(entry.keyword.to_lowercase(), entry.tag.clone()))
        .collect()
}
