use crate::assets::StaticAssets;
use attendance_insights::analytics::EmployeeInsights;
use attendance_insights::dataset::Dataset;
use std::path::PathBuf;
use std::sync::Arc;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) insights: EmployeeInsights,
    pub(crate) assets: StaticAssets,
}

impl AppState {
    pub(crate) fn new(dataset: Dataset, static_dir: PathBuf) -> Self {
        Self {
            insights: EmployeeInsights::new(Arc::new(dataset)),
            assets: StaticAssets::new(static_dir),
        }
    }
}
