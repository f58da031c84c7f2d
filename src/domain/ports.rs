use crate::core::dates::DateConvention;
use crate::domain::model::{FeeReport, Money, ReturnRecord};
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn due_convention(&self) -> DateConvention;
    fn returned_convention(&self) -> DateConvention;
    fn daily_rate(&self) -> Money;
    fn delimiter(&self) -> u8;
}

pub trait Pipeline {
    fn extract(&self) -> Result<Vec<ReturnRecord>>;
    fn transform(&self, records: Vec<ReturnRecord>) -> Result<FeeReport>;
    fn load(&self, report: FeeReport) -> Result<String>;
}
