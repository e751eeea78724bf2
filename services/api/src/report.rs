use attendance_insights::analytics::{EmployeeInsights, EmployeeReport};
use attendance_insights::config::AppConfig;
use attendance_insights::dataset::Dataset;
use attendance_insights::error::AppError;
use clap::Args;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct EmployeeReportArgs {
    /// Employee identifier (case and surrounding whitespace are ignored)
    pub(crate) employee_id: String,
    /// Attendance workbook or CSV to read (defaults to the configured dataset)
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// Print the full JSON payload served by `/employee/{id}`
    #[arg(long)]
    pub(crate) json: bool,
    /// Keep the dataset-wide `GraphData` entries in the JSON output
    #[arg(long, requires = "json")]
    pub(crate) include_graph: bool,
}

pub(crate) fn run_employee_report(args: EmployeeReportArgs) -> Result<(), AppError> {
    let EmployeeReportArgs {
        employee_id,
        dataset,
        json,
        include_graph,
    } = args;

    let path = match dataset {
        Some(path) => path,
        None => AppConfig::load()?.data.dataset_path,
    };
    let insights = EmployeeInsights::new(Arc::new(Dataset::load(path)?));
    let mut report = insights
        .lookup(&employee_id)
        .ok_or(AppError::EmployeeNotFound)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        if !include_graph {
            report.graph_data.clear();
        }
        serde_json::to_writer_pretty(&mut out, &report).map_err(std::io::Error::from)?;
        writeln!(out)?;
    } else {
        render_employee_report(&mut out, &report)?;
    }

    Ok(())
}

pub(crate) fn render_employee_report<W: Write>(
    out: &mut W,
    report: &EmployeeReport,
) -> std::io::Result<()> {
    writeln!(out, "Employee {}", report.employee_id)?;
    writeln!(
        out,
        "  Risk: {} (score {})",
        report.risk.label.label(),
        report.risk.score
    )?;
    for reason in &report.risk.reasons {
        writeln!(out, "    - {reason}")?;
    }
    writeln!(
        out,
        "  Classification: {}",
        report.classification.classification.label()
    )?;
    writeln!(
        out,
        "  Recommended action: {}",
        report.classification.recommended_action
    )?;
    writeln!(out, "  {}", report.classification.justification)?;
    if let Some(billed) = report.profile.get("Billed").and_then(|value| value.as_str()) {
        writeln!(out, "  Billed: {billed}")?;
    }
    Ok(())
}
