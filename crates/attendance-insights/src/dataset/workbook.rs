use super::{AttendanceDuration, CellValue, DatasetError, RawTable};
use calamine::{open_workbook_auto, Data, ExcelDateTime, Reader};
use chrono::NaiveDateTime;
use std::path::Path;

/// Reads the first worksheet; its first row is taken as the header row.
pub(crate) fn read_table(path: &Path) -> Result<RawTable, DatasetError> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(DatasetError::EmptySheet)??;

    let mut rows = range.rows();
    let headers = rows
        .next()
        .ok_or(DatasetError::EmptySheet)?
        .iter()
        .map(header_text)
        .collect();
    let rows = rows
        .map(|row| row.iter().map(cell_value).collect())
        .collect();

    Ok(RawTable { headers, rows })
}

fn header_text(cell: &Data) -> String {
    cell_value(cell).as_text().unwrap_or_default()
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty | Data::Error(_) => CellValue::Empty,
        Data::String(value) => CellValue::text(value),
        Data::Float(value) => CellValue::number(*value),
        Data::Int(value) => CellValue::Number(*value as f64),
        Data::Bool(value) => CellValue::Bool(*value),
        Data::DateTime(value) => date_time_value(value),
        Data::DateTimeIso(value) => NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
            .map(CellValue::Timestamp)
            .unwrap_or_else(|_| CellValue::text(value)),
        Data::DurationIso(value) => calamine::DataType::as_duration(cell)
            .and_then(|delta| AttendanceDuration::from_time_delta(delta).ok())
            .map(CellValue::Duration)
            .unwrap_or_else(|| CellValue::text(value)),
    }
}

fn date_time_value(value: &ExcelDateTime) -> CellValue {
    // time-only cells carry no date part
    let as_duration = value.is_duration() || (0.0..1.0).contains(&value.as_f64());
    if as_duration {
        value
            .as_duration()
            .and_then(|delta| AttendanceDuration::from_time_delta(delta).ok())
            .map(CellValue::Duration)
            .unwrap_or(CellValue::Empty)
    } else {
        value
            .as_datetime()
            .map(CellValue::Timestamp)
            .unwrap_or(CellValue::Empty)
    }
}
