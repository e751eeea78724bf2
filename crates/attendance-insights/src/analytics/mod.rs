//! Attendance scoring, compliance classification, and the lookup payloads
//! served to the dashboard.

mod classification;
mod graph;
mod presenter;
mod risk;
mod service;

pub use classification::{
    classify, Classification, ClassificationResult, MINIMUM_BAY_HOURS, REQUIRED_BAY_HOURS,
    REQUIRED_OFFICE_HOURS,
};
pub use graph::{build_graph_data, GraphPoint};
pub use presenter::{billed_label, present, BILLED_PLACEHOLDER};
pub use risk::{assess_risk, RiskAssessment, RiskLabel};
pub use service::{EmployeeInsights, EmployeeReport};

/// Two-decimal rounding with exact halves going to the even digit.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
