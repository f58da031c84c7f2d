pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::core::commands::{pair_lines, range_lines, reformat_lines};
pub use crate::core::dates::{
    add_date_range, reformat_date, reformat_dates, DateConvention, DateRange, DateRangeIter,
};
pub use crate::core::etl::ReportEngine;
pub use crate::core::fees::{late_fee, FeeCalculator};
pub use crate::core::pipeline::{fees_report, run_report, FeesPipeline};
pub use crate::core::report::aggregate_fees;
pub use config::{cli::LocalStorage, settings::ReportSettings, toml_config::FeesConfig};
pub use domain::model::{FeeEntry, FeeReport, Money, ReturnRecord};
pub use utils::error::{FeeError, Result};
