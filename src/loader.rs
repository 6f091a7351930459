//! CSV dataset loading.
//!
//! Columns are located by header name, so order does not matter and extra columns are
//! ignored. Cells are parsed leniently: anything unparsable becomes a missing value rather than
//! an error. Only structural problems (I/O, broken quoting) fail the load.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::Result;
use crate::record::{parse_date, Field, Record};

/// Header of the date column.
const DATE: &str = "Date";
/// Header of the hour column.
const HOUR: &str = "Hour";
/// Header of the season column.
const SEASONS: &str = "Seasons";
/// Header of the holiday column.
const HOLIDAY: &str = "Holiday";

/// Load records from a CSV file.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or the CSV structure is broken.
pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<Record>> {
    let path = path.as_ref();
    let records = from_reader(File::open(path)?)?;
    tracing::info!(path = %path.display(), records = records.len(), "dataset loaded");
    Ok(records)
}

/// Read records from any CSV source with a header row.
///
/// `index` is the zero-based position of the row among the data rows.
///
/// # Errors
///
/// Returns an error on I/O failure or malformed CSV structure.
pub fn from_reader<R: Read>(reader: R) -> Result<Vec<Record>> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(reader);
    let columns = Columns::locate(reader.headers()?);

    let mut records = Vec::new();
    let mut bad_dates = 0usize;
    for row in reader.records() {
        let row = row?;
        if row.iter().all(str::is_empty) {
            continue;
        }
        let record = columns.record(records.len(), &row);
        if record.date.is_none() {
            bad_dates += 1;
            tracing::warn!(index = record.index, date = %record.date_text, "unparsable date");
        }
        records.push(record);
    }

    if bad_dates > 0 {
        tracing::debug!(bad_dates, "rows excluded from date-derived dimensions");
    }
    Ok(records)
}

/// Header positions of the known columns.
#[derive(Debug, Default)]
struct Columns {
    date: Option<usize>,
    hour: Option<usize>,
    seasons: Option<usize>,
    holiday: Option<usize>,
    measures: Vec<(Field, usize)>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let measures = Field::ALL
            .into_iter()
            .filter(|f| !matches!(f, Field::Date | Field::Hour))
            .filter_map(|f| find(f.name()).map(|i| (f, i)))
            .collect();
        Self {
            date: find(DATE),
            hour: find(HOUR),
            seasons: find(SEASONS),
            holiday: find(HOLIDAY),
            measures,
        }
    }

    fn record(&self, index: usize, row: &StringRecord) -> Record {
        let cell = |column: Option<usize>| column.and_then(|i| row.get(i)).unwrap_or("");
        let date_text = cell(self.date);

        let mut record = Record {
            index,
            date_text: date_text.to_string(),
            date: parse_date(date_text),
            hour: parse_hour(cell(self.hour)),
            season: cell(self.seasons).to_string(),
            holiday: cell(self.holiday).to_string(),
            ..Record::default()
        };
        for (field, column) in &self.measures {
            if let Some(value) = parse_number(cell(Some(*column))) {
                record = record.with_measure(*field, value);
            }
        }
        record
    }
}

fn parse_number(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_hour(text: &str) -> Option<u8> {
    let value = parse_number(text)?;
    (value.fract() == 0.0 && (0.0..24.0).contains(&value)).then_some(value as u8)
}
