use admission_align::config::{load_rubric, AppConfig};
use admission_align::error::AppError;
use admission_align::workflows::admission::{AdmissionPipeline, AdmissionService, Rubric};
use admission_align::workflows::validation::SimilarityPolicy;
use metrics_exporter_prometheus::PrometheusHandle;
use std::fs;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Rubric from an explicit file, else whatever the environment configures.
pub(crate) fn resolve_rubric(rubric_path: Option<&Path>) -> Result<Rubric, AppError> {
    match rubric_path {
        Some(path) => Ok(load_rubric(path)?),
        None => Ok(AppConfig::load()?.scoring.rubric()?),
    }
}

pub(crate) fn build_service(rubric: Rubric) -> Result<AdmissionService, AppError> {
    info!(
        criteria_rules = rubric.categories.len(),
        evidence_rules = rubric.evidence_rules.len(),
        ceiling = ?rubric.ceiling,
        "compiling admission rubric"
    );
    let pipeline = AdmissionPipeline::new(rubric)?;
    Ok(AdmissionService::new(pipeline, SimilarityPolicy::default()))
}

pub(crate) fn read_text(path: &Path) -> Result<String, AppError> {
    Ok(fs::read_to_string(path)?)
}
