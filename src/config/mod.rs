pub mod cli;
pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "book-fees")]
#[command(about = "Late-fee reports and date helpers for library return records")]
pub struct CliConfig {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Aggregate late fees per patron and write a CSV summary
    Report(ReportArgs),

    /// Reformat YYYY-MM-DD dates as "DD Mon YYYY"
    Reformat {
        #[arg(required = true)]
        dates: Vec<String>,
    },

    /// Print COUNT consecutive dates starting at START
    Range {
        start: String,
        #[arg(allow_hyphen_values = true)]
        count: String,
    },

    /// Pair each VALUE with consecutive dates starting at START
    Pair {
        start: String,
        values: Vec<String>,
    },
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct ReportArgs {
    /// Return records with patron_id, date_due and date_returned columns
    #[arg(short, long)]
    pub input: String,

    /// Destination for the patron_id,late_fees summary
    #[arg(short, long)]
    pub output: String,

    /// Optional TOML file with date formats, daily rate and delimiter
    #[arg(short, long)]
    pub config: Option<String>,
}

#[cfg(feature = "cli")]
impl ReportArgs {
    pub fn settings(&self) -> crate::utils::error::Result<settings::ReportSettings> {
        match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                let config = toml_config::FeesConfig::from_file(path)?;
                settings::ReportSettings::from_config(&self.input, &self.output, &config)
            }
            None => Ok(settings::ReportSettings::new(&self.input, &self.output)),
        }
    }
}
