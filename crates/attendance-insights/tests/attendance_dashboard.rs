use attendance_insights::analytics::{
    build_graph_data, Classification, EmployeeInsights, RiskLabel,
};
use attendance_insights::dataset::{Dataset, DatasetError};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/attendance.csv")
}

fn insights() -> EmployeeInsights {
    let dataset = Dataset::load(fixture_path()).expect("fixture loads");
    EmployeeInsights::new(Arc::new(dataset))
}

#[test]
fn fixture_loads_every_row_in_order() {
    let insights = insights();
    let ids: Vec<&str> = insights
        .dataset()
        .records()
        .iter()
        .map(|record| record.employee_id.as_str())
        .collect();
    assert_eq!(ids, vec!["EMP001", "EMP002", "EMP003", "EMP004", "EMP005"]);

    let graph = build_graph_data(insights.dataset());
    assert_eq!(graph.len(), insights.dataset().len());
    assert_eq!(graph[1].account_code, "acc-beta");
    assert_eq!(graph[3].account_code, "");
    assert_eq!(graph[3].over_break_ratio_pct, 0.0);
}

#[test]
fn compliant_employee_has_low_risk() {
    let report = insights().lookup("EMP001").expect("employee found");

    assert_eq!(report.risk.label, RiskLabel::Low);
    assert_eq!(report.risk.score, 0);
    assert_eq!(report.risk.reasons, vec!["No major issues detected."]);
    assert_eq!(
        report.classification.classification,
        Classification::PunctualAndCompliant
    );
}

#[test]
fn boundary_employee_is_compliant() {
    let report = insights().lookup("emp003").expect("employee found");

    assert_eq!(
        report.classification.classification,
        Classification::PunctualAndCompliant
    );
    // break above one hour is the only finding
    assert_eq!(report.risk.score, 15);
    assert_eq!(report.risk.label, RiskLabel::Low);
    assert_eq!(report.risk.reasons.len(), 1);
    assert!(report.risk.reasons[0].starts_with("Break hours slightly high"));
}

#[test]
fn struggling_employee_collects_all_reasons() {
    let report = insights().lookup("  Emp002").expect("employee found");

    assert_eq!(report.risk.label, RiskLabel::High);
    assert_eq!(
        report.risk.reasons,
        vec![
            "Office hours slightly low (6.8h < 8h).",
            "Break hours high (1.7h > 1.5h).",
            "Bay ratio slightly low (0.66 < 0.75).",
        ]
    );
    assert_eq!(
        report.classification.classification,
        Classification::CriticallyDeficient
    );
    assert_eq!(
        report.classification.justification,
        "Employee's Average Bay Hours (4.50) are 35.7% below the required 7 hours, and the Over-Break Ratio is 27.1% (benchmark: ≤20%)."
    );
}

#[test]
fn zero_office_hours_is_unknown() {
    let report = insights().lookup("EMP004").expect("employee found");

    assert_eq!(report.risk.label, RiskLabel::Unknown);
    assert_eq!(report.risk.score, 100);
    assert_eq!(report.risk.reasons, vec!["No office hours recorded."]);
    assert_eq!(
        report.classification.classification,
        Classification::CriticallyDeficient
    );
}

#[test]
fn lookup_payload_matches_dashboard_contract() {
    let report = insights().lookup("emp002").expect("employee found");
    let payload = serde_json::to_value(&report).expect("serializes");

    assert_eq!(payload["Employee ID"], "EMP002");
    assert_eq!(payload["Designation"], "Senior Analyst");
    assert_eq!(payload["Avg. In Time"], "10:15:00");
    assert_eq!(payload["Avg. Office hrs"], "06:50:00");
    assert_eq!(payload["Avg. OOO hrs"], "00:20:00");
    assert_eq!(payload["Half-Day leave"], 3);
    assert_eq!(payload["Unbilled"], true);
    assert_eq!(payload["Billed"], "Yes");
    assert_eq!(
        payload["RecommendedAction"],
        "Formal Review: Escalate to manager & HR for potential role change or transition."
    );
    assert_eq!(payload["GraphData"].as_array().map(Vec::len), Some(5));
    assert_eq!(
        payload["GraphData"][1],
        json!({
            "Employee ID": "EMP002",
            "Account code": "acc-beta",
            "Avg. Office hrs": 6.83,
            "Avg. Bay hrs": 4.5,
            "Avg. Break hrs": 1.67,
            "Over-Break Ratio (%)": 27.03,
            "Half-Day leave": 3,
            "Full-Day leave": 2,
        })
    );

    let unbilled_employee = insights().lookup("EMP004").expect("employee found");
    let payload = serde_json::to_value(&unbilled_employee).expect("serializes");
    assert_eq!(payload["Unbilled"], Value::Null);
    assert_eq!(payload["Billed"], "No");
    assert_eq!(payload["Account code"], Value::Null);
}

#[test]
fn unknown_ids_are_not_found() {
    assert!(insights().lookup("EMP404").is_none());
}

#[test]
fn malformed_duration_file_fails_to_load() {
    let path = std::env::temp_dir().join(format!(
        "attendance-insights-malformed-{}.csv",
        std::process::id()
    ));
    std::fs::write(
        &path,
        "Employee ID,Avg. Office hrs,Avg. Bay hrs,Avg. Break hrs,Avg. Cafeteria hrs,Avg. OOO hrs\nE1,09:00:00,08:00:00,half an hour,00:10:00,00:00:00\n",
    )
    .expect("write fixture");

    let err = Dataset::load(&path).expect_err("load fails");
    std::fs::remove_file(&path).ok();

    match err {
        DatasetError::InvalidDuration { row, column, .. } => {
            assert_eq!(row, 2);
            assert_eq!(column, "Avg. Break hrs");
        }
        other => panic!("expected invalid duration, got {other:?}"),
    }
}
