use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;
use workforce_planning::projection::{DepartmentWeights, Percent, WeightsImportError, WeightsImporter};

#[derive(Clone)]
pub struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) weights: Arc<DepartmentWeights>,
}

impl AppState {
    pub fn new(metrics: PrometheusHandle, weights: DepartmentWeights) -> Self {
        Self {
            readiness: Arc::new(AtomicBool::new(false)),
            metrics: Arc::new(metrics),
            weights: Arc::new(weights),
        }
    }

    pub fn mark_ready(&self) {
        self.readiness
            .store(true, std::sync::atomic::Ordering::Release);
    }
}

/// Reads weights from `path` when given, otherwise the standard allocation.
pub(crate) fn load_weights(path: Option<&Path>) -> Result<DepartmentWeights, WeightsImportError> {
    match path {
        Some(path) => {
            let weights = WeightsImporter::from_path(path)?;
            info!(path = %path.display(), total = %weights.total(), "loaded department weights");
            Ok(weights)
        }
        None => Ok(DepartmentWeights::standard()),
    }
}

pub(crate) fn parse_percent(raw: &str) -> Result<Percent, String> {
    raw.trim()
        .trim_end_matches('%')
        .parse::<Percent>()
        .map_err(|err| format!("failed to parse '{raw}' as a percentage ({err})"))
}
