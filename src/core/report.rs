use crate::core::fees::FeeCalculator;
use crate::domain::model::{FeeEntry, FeeReport, RawReturnRow, ReturnRecord};
use crate::utils::error::{FeeError, Result};
use csv::{ReaderBuilder, StringRecord, Trim, WriterBuilder};
use std::collections::HashMap;

pub const REQUIRED_COLUMNS: [&str; 3] = ["patron_id", "date_due", "date_returned"];
pub const OUTPUT_HEADER: [&str; 2] = ["patron_id", "late_fees"];

/// Sums fees per patron. Entries keep the order in which each patron first
/// appears in `records`, so the same input always renders the same report.
pub fn aggregate_fees(records: &[ReturnRecord], calculator: &FeeCalculator) -> FeeReport {
    let mut entries: Vec<FeeEntry> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for record in records {
        let fee = calculator.fee_between(record.date_due, record.date_returned);
        match index.get(record.patron_id.as_str()) {
            Some(&i) => entries[i].late_fees += fee,
            None => {
                index.insert(record.patron_id.as_str(), entries.len());
                entries.push(FeeEntry {
                    patron_id: record.patron_id.clone(),
                    late_fees: fee,
                });
            }
        }
    }

    FeeReport {
        entries,
        records_processed: records.len(),
    }
}

/// Turns one input row into a record. Missing, empty or unparsable values are
/// reported against `line` and the offending column.
pub fn record_from_row(
    row: RawReturnRow,
    line: u64,
    calculator: &FeeCalculator,
) -> Result<ReturnRecord> {
    let patron_id = required(row.patron_id, line, "patron_id")?;
    let due_text = required(row.date_due, line, "date_due")?;
    let returned_text = required(row.date_returned, line, "date_returned")?;

    let date_due = calculator
        .parse_due(&due_text)
        .map_err(|e| as_data_error(e, line, "date_due"))?;
    let date_returned = calculator
        .parse_returned(&returned_text)
        .map_err(|e| as_data_error(e, line, "date_returned"))?;

    Ok(ReturnRecord {
        patron_id,
        date_due,
        date_returned,
    })
}

/// 讀取分隔檔；任何一行有問題就整批失敗
pub fn records_from_csv(
    data: &[u8],
    delimiter: u8,
    calculator: &FeeCalculator,
) -> Result<Vec<ReturnRecord>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(data);

    let headers = reader.headers()?.clone();
    check_headers(&headers)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(|e| row_error(e, &headers))?;
        let line = row.position().map(|p| p.line()).unwrap_or(0);
        let raw: RawReturnRow = row
            .deserialize(Some(&headers))
            .map_err(|e| row_error(e, &headers))?;
        let record = record_from_row(raw, line, calculator)?;
        tracing::debug!(
            "Line {}: patron {} due {} returned {}",
            line,
            record.patron_id,
            record.date_due,
            record.date_returned
        );
        records.push(record);
    }

    Ok(records)
}

/// Renders the report as `patron_id,late_fees` rows. The header is written
/// even when there are no entries.
pub fn render_csv(report: &FeeReport) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(OUTPUT_HEADER)?;
    for entry in &report.entries {
        writer.serialize(entry)?;
    }

    writer
        .into_inner()
        .map_err(|e| FeeError::IoError(e.into_error()))
}

/// Pure end-to-end transform: input bytes in, report bytes out.
pub fn fees_report_bytes(
    input: &[u8],
    delimiter: u8,
    calculator: &FeeCalculator,
) -> Result<Vec<u8>> {
    let records = records_from_csv(input, delimiter, calculator)?;
    let report = aggregate_fees(&records, calculator);
    render_csv(&report)
}

fn check_headers(headers: &StringRecord) -> Result<()> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(FeeError::DataFormatError {
                line: 1,
                field: column.to_string(),
                message: "required column is missing from the header".to_string(),
            });
        }
    }
    Ok(())
}

fn required(value: Option<String>, line: u64, field: &str) -> Result<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(FeeError::DataFormatError {
            line,
            field: field.to_string(),
            message: "missing value".to_string(),
        }),
    }
}

/// 讀取或解碼單行失敗時，盡量指出行號與欄位
fn row_error(err: csv::Error, headers: &StringRecord) -> FeeError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    let field = match err.kind() {
        csv::ErrorKind::Utf8 { err, .. } => headers.get(err.field()).unwrap_or("row"),
        _ => "row",
    };
    FeeError::DataFormatError {
        line,
        field: field.to_string(),
        message: err.to_string(),
    }
}

fn as_data_error(err: FeeError, line: u64, field: &str) -> FeeError {
    FeeError::DataFormatError {
        line,
        field: field.to_string(),
        message: err.to_string(),
    }
}
