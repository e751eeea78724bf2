use super::round2;
use crate::dataset::{json_number, Dataset, EmployeeRecord};
use serde::{Serialize, Serializer};

/// Per-employee chart entry; field names match the dashboard's column keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphPoint {
    #[serde(rename = "Employee ID")]
    pub employee_id: String,
    #[serde(rename = "Account code")]
    pub account_code: String,
    #[serde(rename = "Avg. Office hrs")]
    pub office_hours: f64,
    #[serde(rename = "Avg. Bay hrs")]
    pub bay_hours: f64,
    #[serde(rename = "Avg. Break hrs")]
    pub break_hours: f64,
    #[serde(rename = "Over-Break Ratio (%)")]
    pub over_break_ratio_pct: f64,
    #[serde(rename = "Half-Day leave", serialize_with = "serialize_count")]
    pub half_day_leave: f64,
    #[serde(rename = "Full-Day leave", serialize_with = "serialize_count")]
    pub full_day_leave: f64,
}

impl GraphPoint {
    pub fn from_record(record: &EmployeeRecord) -> Self {
        let office_hours = record.hours.office_hours();
        let bay_hours = record.hours.bay_hours();
        let break_hours = record.hours.break_hours();
        let tracked_total = bay_hours + break_hours;
        let over_break_ratio_pct = if tracked_total > 0.0 {
            break_hours / tracked_total * 100.0
        } else {
            0.0
        };

        Self {
            employee_id: record.employee_id.clone(),
            account_code: record
                .account_code
                .as_deref()
                .map(|code| code.trim().to_lowercase())
                .unwrap_or_default(),
            office_hours: round2(office_hours),
            bay_hours: round2(bay_hours),
            break_hours: round2(break_hours),
            over_break_ratio_pct: round2(over_break_ratio_pct),
            half_day_leave: record.half_day_leave.unwrap_or(0.0),
            full_day_leave: record.full_day_leave.unwrap_or(0.0),
        }
    }
}

/// One entry per loaded row, in load order.
pub fn build_graph_data(dataset: &Dataset) -> Vec<GraphPoint> {
    dataset.records().iter().map(GraphPoint::from_record).collect()
}

fn serialize_count<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    json_number(*value).serialize(serializer)
}
