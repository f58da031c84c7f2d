pub mod convention;
pub mod format;
pub mod pair;
pub mod range;

pub use convention::DateConvention;
pub use format::{format_day_month_year, parse_iso_date, reformat_date, reformat_dates, MONTHS};
pub use pair::add_date_range;
pub use range::{DateRange, DateRangeIter};
