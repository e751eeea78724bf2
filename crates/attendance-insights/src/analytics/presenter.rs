use super::classification::ClassificationResult;
use super::risk::RiskAssessment;
use crate::dataset::{CellValue, EmployeeRecord};
use serde_json::{json, Map, Value};

/// Shown when the source has no `Unbilled` column.
pub const BILLED_PLACEHOLDER: &str = "—";

/// Flattens a record and its derived results into the lookup payload.
///
/// Raw columns keep their source headers and order; duration cells render as
/// `HH:MM:SS` and missing cells as null.
pub fn present(
    record: &EmployeeRecord,
    risk: &RiskAssessment,
    classification: &ClassificationResult,
) -> Map<String, Value> {
    let mut payload: Map<String, Value> = record
        .fields()
        .iter()
        .map(|field| (field.name.to_string(), field.value.to_json()))
        .collect();

    payload.insert("Risk".to_string(), risk_json(risk));
    payload.insert(
        "Classification".to_string(),
        Value::from(classification.classification.label()),
    );
    payload.insert(
        "RecommendedAction".to_string(),
        Value::from(classification.recommended_action),
    );
    payload.insert(
        "Justification".to_string(),
        Value::from(classification.justification.clone()),
    );
    payload.insert(
        "Billed".to_string(),
        Value::from(billed_label(record.unbilled.as_ref())),
    );

    payload
}

pub fn billed_label(unbilled: Option<&CellValue>) -> &'static str {
    match unbilled {
        Some(value) if value.is_truthy() => "Yes",
        Some(_) => "No",
        None => BILLED_PLACEHOLDER,
    }
}

fn risk_json(risk: &RiskAssessment) -> Value {
    json!({
        "label": risk.label.label(),
        "score": risk.score,
        "reasons": risk.reasons,
    })
}
