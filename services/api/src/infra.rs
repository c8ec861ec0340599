use health_triage::config::TriageConfig;
use health_triage::error::AppError;
use health_triage::triage::{FacilityCsvImporter, StaticCatalog};
use metrics_exporter_prometheus::PrometheusHandle;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Load the facility catalog from `override_path`, the configured CSV, or the seed list.
pub(crate) fn load_catalog(
    config: &TriageConfig,
    override_path: Option<&Path>,
) -> Result<StaticCatalog, AppError> {
    let path = override_path.or(config.catalog_csv.as_deref());
    let catalog = match path {
        Some(path) => {
            let catalog = FacilityCsvImporter::from_path(path)?;
            info!(path = %path.display(), facilities = catalog.len(), "facility catalog imported");
            catalog
        }
        None => StaticCatalog::seeded(),
    };
    Ok(catalog)
}
