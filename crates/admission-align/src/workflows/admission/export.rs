use std::io;

use super::domain::EvaluatedCriterion;

const HEADER: [&str; 6] = [
    "criterion_id",
    "category",
    "status",
    "score",
    "evidence",
    "suggested_language",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to write criteria csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush criteria csv: {0}")]
    Io(#[from] io::Error),
}

/// Writes one row per evaluated criterion, preceded by a header row.
pub fn write_criteria_csv<W: io::Write>(
    writer: W,
    criteria: &[EvaluatedCriterion],
) -> Result<(), ExportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(HEADER)?;

    for criterion in criteria {
        let score = criterion.score_contribution.to_string();
        csv_writer.write_record([
            criterion.criterion_id.as_str(),
            criterion.category.label(),
            criterion.status.label(),
            score.as_str(),
            criterion.evidence_found.as_str(),
            criterion.suggested_language.as_str(),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}
