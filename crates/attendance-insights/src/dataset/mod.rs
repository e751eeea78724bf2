mod cell;
mod delimited;
mod duration;
mod workbook;

pub use cell::{json_number, CellValue};
pub use duration::{AttendanceDuration, DurationParseError};

use std::fmt;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Header names of the columns the analytics depend on.
pub mod columns {
    pub const EMPLOYEE_ID: &str = "Employee ID";
    pub const AVG_OFFICE_HOURS: &str = "Avg. Office hrs";
    pub const AVG_BAY_HOURS: &str = "Avg. Bay hrs";
    pub const AVG_BREAK_HOURS: &str = "Avg. Break hrs";
    pub const AVG_CAFETERIA_HOURS: &str = "Avg. Cafeteria hrs";
    pub const AVG_OOO_HOURS: &str = "Avg. OOO hrs";
    pub const ACCOUNT_CODE: &str = "Account code";
    pub const HALF_DAY_LEAVE: &str = "Half-Day leave";
    pub const FULL_DAY_LEAVE: &str = "Full-Day leave";
    pub const UNBILLED: &str = "Unbilled";

    pub const DURATIONS: [&str; 5] = [
        AVG_OFFICE_HOURS,
        AVG_BAY_HOURS,
        AVG_BREAK_HOURS,
        AVG_CAFETERIA_HOURS,
        AVG_OOO_HOURS,
    ];
}

#[derive(Debug)]
pub enum DatasetError {
    Io(std::io::Error),
    Csv(csv::Error),
    Workbook(calamine::Error),
    UnsupportedFormat(String),
    EmptySheet,
    MissingColumn(&'static str),
    InvalidDuration {
        row: usize,
        column: &'static str,
        source: DurationParseError,
    },
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Io(err) => write!(f, "failed to read attendance data: {}", err),
            DatasetError::Csv(err) => write!(f, "invalid attendance CSV data: {}", err),
            DatasetError::Workbook(err) => write!(f, "invalid attendance workbook: {}", err),
            DatasetError::UnsupportedFormat(extension) => write!(
                f,
                "unsupported attendance source '{}': expected .xlsx, .xlsm, .xlsb, .xls, .ods or .csv",
                extension
            ),
            DatasetError::EmptySheet => write!(f, "attendance sheet has no header row"),
            DatasetError::MissingColumn(column) => {
                write!(f, "attendance data is missing the '{}' column", column)
            }
            DatasetError::InvalidDuration {
                row,
                column,
                source,
            } => write!(f, "row {} column '{}': {}", row, column, source),
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::Io(err) => Some(err),
            DatasetError::Csv(err) => Some(err),
            DatasetError::Workbook(err) => Some(err),
            DatasetError::InvalidDuration { source, .. } => Some(source),
            DatasetError::UnsupportedFormat(_)
            | DatasetError::EmptySheet
            | DatasetError::MissingColumn(_) => None,
        }
    }
}

impl From<std::io::Error> for DatasetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for DatasetError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl From<calamine::Error> for DatasetError {
    fn from(err: calamine::Error) -> Self {
        Self::Workbook(err)
    }
}

/// Header row plus untyped rows, as read from a source file.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

/// The five averaged durations recorded for an employee.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AttendanceHours {
    pub office: AttendanceDuration,
    pub bay: AttendanceDuration,
    pub break_time: AttendanceDuration,
    pub cafeteria: AttendanceDuration,
    pub out_of_office: AttendanceDuration,
}

impl AttendanceHours {
    pub fn office_hours(&self) -> f64 {
        self.office.hours()
    }

    pub fn bay_hours(&self) -> f64 {
        self.bay.hours()
    }

    pub fn break_hours(&self) -> f64 {
        self.break_time.hours()
    }
}

/// A named cell of a source row.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: Arc<str>,
    pub value: CellValue,
}

/// One employee row with the analytics columns lifted out of the raw fields.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeRecord {
    pub employee_id: String,
    pub hours: AttendanceHours,
    pub account_code: Option<String>,
    pub half_day_leave: Option<f64>,
    pub full_day_leave: Option<f64>,
    /// `None` when the source has no `Unbilled` column at all.
    pub unbilled: Option<CellValue>,
    fields: Vec<Field>,
}

impl EmployeeRecord {
    /// Every source column in header order, with the identifier normalized
    /// and the duration columns parsed.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&CellValue> {
        self.fields
            .iter()
            .find(|field| &*field.name == name)
            .map(|field| &field.value)
    }
}

/// Immutable in-memory attendance table.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    columns: Vec<Arc<str>>,
    records: Vec<EmployeeRecord>,
}

impl Dataset {
    /// Loads a workbook or CSV file, picking the reader from the extension.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let table = match extension.as_str() {
            "csv" => delimited::read_table(std::fs::File::open(path)?)?,
            "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => workbook::read_table(path)?,
            _ => return Err(DatasetError::UnsupportedFormat(path.display().to_string())),
        };

        let dataset = Self::from_table(table)?;
        info!(
            path = %path.display(),
            employees = dataset.len(),
            "attendance dataset loaded"
        );
        Ok(dataset)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        Self::from_table(delimited::read_table(reader)?)
    }

    pub fn from_table(table: RawTable) -> Result<Self, DatasetError> {
        let RawTable { headers, rows } = table;
        let layout = ColumnLayout::resolve(&headers)?;
        let columns: Vec<Arc<str>> = headers
            .iter()
            .map(|header| Arc::from(header.trim()))
            .collect();

        let mut records = Vec::with_capacity(rows.len());
        for (index, row) in rows.into_iter().enumerate() {
            // header occupies the first line of the source
            let line = index + 2;
            if let Some(record) = layout.build_record(&columns, row, line)? {
                records.push(record);
            }
        }

        Ok(Self { columns, records })
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| &**column)
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// First record whose identifier matches `raw_id` after normalization.
    pub fn find(&self, raw_id: &str) -> Option<&EmployeeRecord> {
        let employee_id = normalize_employee_id(raw_id);
        debug!(%employee_id, "looking up employee");
        self.records
            .iter()
            .find(|record| record.employee_id == employee_id)
    }
}

pub fn normalize_employee_id(raw: &str) -> String {
    raw.trim().to_uppercase()
}

struct ColumnLayout {
    employee_id: usize,
    durations: [usize; 5],
    account_code: Option<usize>,
    half_day_leave: Option<usize>,
    full_day_leave: Option<usize>,
    unbilled: Option<usize>,
}

impl ColumnLayout {
    fn resolve(headers: &[String]) -> Result<Self, DatasetError> {
        let position = |name: &str| headers.iter().position(|header| header.trim() == name);
        let required =
            |name: &'static str| position(name).ok_or(DatasetError::MissingColumn(name));

        let mut durations = [0; 5];
        for (slot, name) in durations.iter_mut().zip(columns::DURATIONS) {
            *slot = required(name)?;
        }

        Ok(Self {
            employee_id: required(columns::EMPLOYEE_ID)?,
            durations,
            account_code: position(columns::ACCOUNT_CODE),
            half_day_leave: position(columns::HALF_DAY_LEAVE),
            full_day_leave: position(columns::FULL_DAY_LEAVE),
            unbilled: position(columns::UNBILLED),
        })
    }

    fn build_record(
        &self,
        columns: &[Arc<str>],
        mut row: Vec<CellValue>,
        line: usize,
    ) -> Result<Option<EmployeeRecord>, DatasetError> {
        row.resize(columns.len(), CellValue::Empty);

        let Some(raw_id) = row[self.employee_id].as_text() else {
            warn!(line, "skipping attendance row without an employee id");
            return Ok(None);
        };
        let employee_id = normalize_employee_id(&raw_id);
        if employee_id.is_empty() {
            warn!(line, "skipping attendance row without an employee id");
            return Ok(None);
        }
        row[self.employee_id] = CellValue::Text(employee_id.clone());

        let mut parsed = [AttendanceDuration::ZERO; 5];
        for ((slot, index), column) in parsed
            .iter_mut()
            .zip(self.durations)
            .zip(columns::DURATIONS)
        {
            let duration =
                row[index]
                    .to_duration()
                    .map_err(|source| DatasetError::InvalidDuration {
                        row: line,
                        column,
                        source,
                    })?;
            row[index] = CellValue::Duration(duration);
            *slot = duration;
        }
        let [office, bay, break_time, cafeteria, out_of_office] = parsed;

        let account_code = self
            .account_code
            .and_then(|index| row[index].as_text())
            .filter(|code| !code.trim().is_empty());
        let half_day_leave = self.half_day_leave.and_then(|index| row[index].as_number());
        let full_day_leave = self.full_day_leave.and_then(|index| row[index].as_number());
        let unbilled = self.unbilled.map(|index| row[index].clone());

        let fields = columns
            .iter()
            .cloned()
            .zip(row)
            .map(|(name, value)| Field { name, value })
            .collect();

        Ok(Some(EmployeeRecord {
            employee_id,
            hours: AttendanceHours {
                office,
                bay,
                break_time,
                cafeteria,
                out_of_office,
            },
            account_code,
            half_day_leave,
            full_day_leave,
            unbilled,
            fields,
        }))
    }
}
