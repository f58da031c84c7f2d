use anyhow::Result;
use book_fees::core::ConfigProvider;
use book_fees::{
    fees_report, run_report, DateConvention, FeeError, FeesConfig, Money, ReportSettings,
};
use std::fs;
use tempfile::TempDir;

const BOOK_RETURNS: &str = "\
id,book_uid,isbn_13,patron_id,date_checkout,date_due,date_returned
1,ea5f4ab0,9780063214699,17-873-8783,01/14/2018,02/04/2018,02/08/2018
2,2d5b1b0a,9781420961065,83-279-0036,01/17/2018,02/07/2018,02/03/2018
3,9d2f7b90,9780441013593,17-873-8783,01/20/2018,02/10/2018,02/12/2018
4,cd4f6f9c,9780143127741,35-802-7393,01/28/2018,02/18/2018,02/18/2018
5,ab3c2e10,9780062316097,83-279-0036,02/01/2018,02/22/2018,03/01/2018
";

fn write_input(dir: &TempDir, name: &str, content: &str) -> Result<String> {
    let path = dir.path().join(name);
    fs::write(&path, content)?;
    Ok(path.to_str().unwrap().to_string())
}

#[test]
fn test_end_to_end_report() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_input(&temp_dir, "book_returns.csv", BOOK_RETURNS)?;
    let output = temp_dir.path().join("book_fees.csv");

    let report = fees_report(&input, output.to_str().unwrap())?;
    assert_eq!(report.records_processed, 5);
    assert_eq!(report.total(), Money::from_cents(325));

    let written = fs::read_to_string(&output)?;
    assert_eq!(
        written,
        "patron_id,late_fees\n17-873-8783,1.50\n83-279-0036,1.75\n35-802-7393,0.00\n"
    );
    Ok(())
}

#[test]
fn test_report_is_idempotent() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_input(&temp_dir, "book_returns.csv", BOOK_RETURNS)?;
    let first = temp_dir.path().join("first.csv");
    let second = temp_dir.path().join("second.csv");

    run_report(ReportSettings::new(&input, first.to_str().unwrap()))?;
    run_report(ReportSettings::new(&input, second.to_str().unwrap()))?;

    assert_eq!(fs::read(&first)?, fs::read(&second)?);

    // 覆寫既有輸出也要得到相同內容
    run_report(ReportSettings::new(&input, first.to_str().unwrap()))?;
    assert_eq!(fs::read(&first)?, fs::read(&second)?);
    Ok(())
}

#[test]
fn test_missing_date_due_writes_no_output() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_input(
        &temp_dir,
        "broken.csv",
        "patron_id,date_due,date_returned\nA,01/01/2024,01/05/2024\nB,,01/05/2024\n",
    )?;
    let output = temp_dir.path().join("fees.csv");

    let err = fees_report(&input, output.to_str().unwrap()).unwrap_err();
    match err {
        FeeError::DataFormatError { line, field, .. } => {
            assert_eq!(line, 3);
            assert_eq!(field, "date_due");
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_missing_date_due_column_writes_no_output() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_input(
        &temp_dir,
        "no_due.csv",
        "patron_id,date_returned\nA,01/05/2024\n",
    )?;
    let output = temp_dir.path().join("fees.csv");

    let result = fees_report(&input, output.to_str().unwrap());
    assert!(matches!(result, Err(FeeError::DataFormatError { .. })));
    assert!(!output.exists());
    Ok(())
}

#[test]
fn test_failed_run_keeps_previous_report() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let good = write_input(&temp_dir, "good.csv", BOOK_RETURNS)?;
    let bad = write_input(
        &temp_dir,
        "bad.csv",
        "patron_id,date_due,date_returned\nA,13/01/2024,01/05/2024\n",
    )?;
    let output = temp_dir.path().join("fees.csv");

    fees_report(&good, output.to_str().unwrap())?;
    let before = fs::read(&output)?;

    assert!(fees_report(&bad, output.to_str().unwrap()).is_err());
    assert_eq!(fs::read(&output)?, before);
    Ok(())
}

#[test]
fn test_report_with_toml_config() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_input(
        &temp_dir,
        "returns.tsv",
        "patron_id\tdate_due\tdate_returned\nP1\t03/01/2018\t03/05/18\nP2\t03/01/2018\t02/27/18\n",
    )?;
    let config_path = write_input(
        &temp_dir,
        "fees.toml",
        r#"
[dates]
due_format = "us"
returned_format = "us-short"
century = 2000

[fees]
daily_rate = "0.30"

[input]
delimiter = "tab"
"#,
    )?;
    let output = temp_dir.path().join("out/fees.csv");

    let config = FeesConfig::from_file(&config_path)?;
    let settings = ReportSettings::from_config(&input, output.to_str().unwrap(), &config)?;
    assert_eq!(
        settings.returned_convention(),
        DateConvention::UsTwoDigit { century: 2000 }
    );

    run_report(settings)?;
    assert_eq!(
        fs::read_to_string(&output)?,
        "patron_id,late_fees\nP1,1.20\nP2,0.00\n"
    );
    Ok(())
}

#[test]
fn test_missing_input_file() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("absent.csv");
    let output = temp_dir.path().join("fees.csv");

    let err = fees_report(input.to_str().unwrap(), output.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, FeeError::IoError(_)));
    assert!(!output.exists());
}

#[test]
fn test_output_must_differ_from_input() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let input = write_input(&temp_dir, "returns.csv", BOOK_RETURNS)?;

    let err = fees_report(&input, &input).unwrap_err();
    assert!(matches!(err, FeeError::InvalidConfigValueError { .. }));
    assert_eq!(fs::read_to_string(&input)?, BOOK_RETURNS);
    Ok(())
}
