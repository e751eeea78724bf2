use super::classification::{classify, ClassificationResult};
use super::graph::{build_graph_data, GraphPoint};
use super::presenter::present;
use super::risk::{assess_risk, RiskAssessment};
use crate::dataset::{normalize_employee_id, Dataset};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info};

/// Read-only lookup facade over a loaded dataset, shared across handlers.
#[derive(Debug, Clone)]
pub struct EmployeeInsights {
    dataset: Arc<Dataset>,
}

/// Everything served for one employee lookup.
#[derive(Debug, Clone, Serialize)]
pub struct EmployeeReport {
    #[serde(skip)]
    pub employee_id: String,
    #[serde(skip)]
    pub risk: RiskAssessment,
    #[serde(skip)]
    pub classification: ClassificationResult,
    #[serde(flatten)]
    pub profile: Map<String, Value>,
    #[serde(rename = "GraphData")]
    pub graph_data: Vec<GraphPoint>,
}

impl EmployeeInsights {
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self { dataset }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Scores and classifies the first matching employee and attaches the
    /// dataset-wide chart entries. `None` when no record matches.
    pub fn lookup(&self, raw_id: &str) -> Option<EmployeeReport> {
        let Some(record) = self.dataset.find(raw_id) else {
            info!(
                employee_id = %normalize_employee_id(raw_id),
                "employee not found"
            );
            return None;
        };

        let risk = assess_risk(&record.hours);
        let classification = classify(&record.hours);
        debug!(
            employee_id = %record.employee_id,
            risk = risk.label.label(),
            score = risk.score,
            classification = classification.classification.label(),
            "employee assessed"
        );

        let profile = present(record, &risk, &classification);
        Some(EmployeeReport {
            employee_id: record.employee_id.clone(),
            risk,
            classification,
            profile,
            graph_data: self.graph_data(),
        })
    }

    pub fn graph_data(&self) -> Vec<GraphPoint> {
        build_graph_data(&self.dataset)
    }
}
