use anyhow::Context;
use clap::Parser;
use nbp_rates::app::report;
use nbp_rates::domain::ports::ConfigProvider;
use nbp_rates::utils::{logger, validation::Validate};
use nbp_rates::{CliConfig, HttpFetcher, OutputFormat, RateAnalysis};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting nbp-rates CLI");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    let fetcher =
        HttpFetcher::new(config.timeout_seconds()).context("failed to build HTTP client")?;
    let analysis = RateAnalysis::from_config(fetcher, &config)?;

    match analysis.run(&config.query()).await {
        Ok(outcome) => match config.format {
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

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
