use crate::config::cli::LocalStorage;
use crate::config::settings::ReportSettings;
use crate::core::etl::ReportEngine;
use crate::core::fees::FeeCalculator;
use crate::core::report::{aggregate_fees, records_from_csv, render_csv};
use crate::core::{ConfigProvider, FeeReport, Pipeline, ReturnRecord, Storage};
use crate::utils::error::Result;
use crate::utils::validation::Validate;

/// Reads return records through `storage`, aggregates fees per patron and
/// writes the summary back through `storage`.
pub struct FeesPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
    calculator: FeeCalculator,
}

impl<S: Storage, C: ConfigProvider> FeesPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let calculator = FeeCalculator::new(
            config.due_convention(),
            config.returned_convention(),
            config.daily_rate(),
        );
        Self {
            storage,
            config,
            calculator,
        }
    }

    pub fn calculator(&self) -> &FeeCalculator {
        &self.calculator
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for FeesPipeline<S, C> {
    fn extract(&self) -> Result<Vec<ReturnRecord>> {
        tracing::debug!(
            "Reading return records from {} (due: {}, returned: {})",
            self.config.input_path(),
            self.calculator.due_convention(),
            self.calculator.returned_convention()
        );
        let data = self.storage.read_file(self.config.input_path())?;
        records_from_csv(&data, self.config.delimiter(), &self.calculator)
    }

    fn transform(&self, records: Vec<ReturnRecord>) -> Result<FeeReport> {
        Ok(aggregate_fees(&records, &self.calculator))
    }

    fn load(&self, report: FeeReport) -> Result<String> {
        let output_path = self.config.output_path();
        let data = render_csv(&report)?;

        tracing::debug!("Writing {} bytes to {}", data.len(), output_path);
        self.storage.write_file(output_path, &data)?;

        Ok(output_path.to_string())
    }
}

/// Reads `infile`, writes the per-patron summary to `outfile` using the
/// default conventions (`MM/DD/YYYY`, 0.25 per day) and returns the report.
pub fn fees_report(infile: &str, outfile: &str) -> Result<FeeReport> {
    let settings = ReportSettings::new(infile, outfile);
    settings.validate()?;
    let pipeline = FeesPipeline::new(LocalStorage::default(), settings);
    let records = pipeline.extract()?;
    let report = pipeline.transform(records)?;
    pipeline.load(report.clone())?;
    Ok(report)
}

/// Same as [`fees_report`] but driven by resolved settings through the engine.
pub fn run_report(settings: ReportSettings) -> Result<String> {
    settings.validate()?;
    let engine = ReportEngine::new(FeesPipeline::new(LocalStorage::default(), settings));
    engine.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dates::DateConvention;
    use crate::domain::model::Money;
    use crate::utils::error::FeeError;
    use std::cell::RefCell;
    use std::collections::HashMap;

    #[derive(Default)]
    struct MockStorage {
        files: RefCell<HashMap<String, Vec<u8>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, data: &str) -> Self {
            let storage = Self::default();
            storage
                .files
                .borrow_mut()
                .insert(path.to_string(), data.as_bytes().to_vec());
            storage
        }

        fn get_file(&self, path: &str) -> Option<String> {
            self.files
                .borrow()
                .get(path)
                .map(|d| String::from_utf8(d.clone()).unwrap())
        }
    }

    impl Storage for MockStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.files.borrow().get(path).cloned().ok_or_else(|| {
                FeeError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files
                .borrow_mut()
                .insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    const INPUT: &str = "patron_id,date_due,date_returned\n\
                         A,01/01/2024,01/02/2024\n\
                         B,01/01/2024,01/01/2024\n\
                         A,01/01/2024,01/03/2024\n";

    #[test]
    fn test_extract_transform_load() {
        let pipeline = FeesPipeline::new(
            MockStorage::with_file("in.csv", INPUT),
            ReportSettings::new("in.csv", "out.csv"),
        );

        let records = pipeline.extract().unwrap();
        assert_eq!(records.len(), 3);

        let report = pipeline.transform(records).unwrap();
        assert_eq!(report.fee_for("A"), Some(Money::from_cents(75)));

        let path = pipeline.load(report).unwrap();
        assert_eq!(path, "out.csv");
        assert_eq!(
            pipeline.storage.get_file("out.csv").unwrap(),
            "patron_id,late_fees\nA,0.75\nB,0.00\n"
        );
    }

    #[test]
    fn test_settings_drive_calculator() {
        let input = "patron_id;date_due;date_returned\nZ;2024-01-01;01/11/24\n";
        let settings = ReportSettings::new("in.csv", "out.csv")
            .with_conventions(DateConvention::Iso, DateConvention::UsTwoDigit { century: 2000 })
            .with_daily_rate(Money::from_cents(10))
            .with_delimiter(b';');
        let pipeline = FeesPipeline::new(MockStorage::with_file("in.csv", input), settings);

        assert_eq!(pipeline.calculator().due_convention(), DateConvention::Iso);
        assert_eq!(pipeline.calculator().daily_rate(), Money::from_cents(10));

        let report = pipeline.transform(pipeline.extract().unwrap()).unwrap();
        assert_eq!(report.fee_for("Z"), Some(Money::from_cents(100)));
    }

    #[test]
    fn test_engine_writes_nothing_on_bad_row() {
        let input = "patron_id,date_due,date_returned\nA,01/01/2024,01/02/2024\nB,,01/02/2024\n";
        let pipeline = FeesPipeline::new(
            MockStorage::with_file("in.csv", input),
            ReportSettings::new("in.csv", "out.csv"),
        );
        let engine = ReportEngine::new(pipeline);

        let err = engine.run().unwrap_err();
        assert!(matches!(err, FeeError::DataFormatError { line: 3, .. }));
        assert!(engine.pipeline().storage.get_file("out.csv").is_none());
    }

    #[test]
    fn test_missing_input_is_io_error() {
        let pipeline = FeesPipeline::new(MockStorage::default(), ReportSettings::new("in.csv", "out.csv"));
        assert!(matches!(pipeline.extract(), Err(FeeError::IoError(_))));
    }
}
