use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use nbp_rates::app::report;
use nbp_rates::config::toml_config::TomlConfig;
use nbp_rates::domain::ports::ConfigProvider;
use nbp_rates::utils::{logger, validation::Validate};
use nbp_rates::{HttpFetcher, OutputFormat, RateAnalysis};

#[derive(Parser)]
#[command(name = "toml-rates")]
#[command(about = "Exchange rate statistics driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "nbp-rates.toml")]
    config: String,

    /// Override the currency code from config
    #[arg(long)]
    currency: Option<String>,

    /// Override the start date from config
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Override the end date from config
    #[arg(long)]
    end_date: Option<NaiveDate>,

    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Dry run - list the files that would be processed without fetching them
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);

    tracing::info!("📁 Loading configuration from: {}", args.config);

    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(currency) = args.currency {
        tracing::info!("Currency overridden to: {}", currency);
        config.query.currency_code = currency;
    }
    if let Some(start_date) = args.start_date {
        config.query.start_date = start_date;
    }
    if let Some(end_date) = args.end_date {
        config.query.end_date = end_date;
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    display_config_summary(&config);

    let fetcher =
        HttpFetcher::new(config.timeout_seconds()).context("failed to build HTTP client")?;
    let analysis = RateAnalysis::from_config(fetcher, &config)?;
    let query = config.query();

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - only the listing will be fetched");
        let files = match analysis.select_files(&query).await {
            Ok(files) => files,
            Err(e) => {
                eprintln!("❌ {}", e.user_friendly_message());
                std::process::exit(e.exit_code());
            }
        };
        for file in &files {
            println!("{}", analysis.file_url(file));
        }
        println!("{} files selected", files.len());
        return Ok(());
    }

    match analysis.run(&query).await {
        Ok(outcome) => match args.format {
            OutputFormat::Text => print!("{}", report::render_text(&outcome)),
            OutputFormat::Json => println!("{}", report::render_json(&outcome)?),
        },
        Err(e) => {
            tracing::error!(
                "Run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("📋 Configuration Summary:");
    tracing::info!("  Currency: {}", config.currency_code());
    tracing::info!("  Range: {} .. {}", config.start_date(), config.end_date());
    tracing::info!("  Listing: {}", config.listing_url());
    tracing::info!("  Files under: {}", config.base_url());
    tracing::info!("  Concurrent requests: {}", config.concurrent_requests());
}
