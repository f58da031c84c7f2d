use book_fees::config::{Command, ReportArgs};
use book_fees::utils::{logger, validation::Validate};
use book_fees::{pair_lines, range_lines, reformat_lines, run_report, CliConfig, Result};
use clap::Parser;

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(config.command) {
        // 記錄詳細錯誤信息
        tracing::error!(
            "❌ book-fees failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 建議: {}", e.recovery_suggestion());

        std::process::exit(e.severity().exit_code());
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Report(args) => report(&args),
        Command::Reformat { dates } => print_lines(reformat_lines(&dates)?),
        Command::Range { start, count } => print_lines(range_lines(&start, &count)?),
        Command::Pair { start, values } => print_lines(pair_lines(&start, values)?),
    }
}

fn print_lines(lines: Vec<String>) -> Result<()> {
    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

fn report(args: &ReportArgs) -> Result<()> {
    let settings = args.settings()?;

    // 驗證配置
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        return Err(e);
    }

    let output_path = run_report(settings)?;
    tracing::info!("✅ Late-fee report completed successfully!");
    println!("✅ Report saved to: {}", output_path);
    Ok(())
}
