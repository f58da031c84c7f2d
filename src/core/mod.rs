pub mod commands;
pub mod dates;
pub mod etl;
pub mod fees;
pub mod pipeline;
pub mod report;

pub use crate::domain::model::{FeeEntry, FeeReport, Money, ReturnRecord};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
