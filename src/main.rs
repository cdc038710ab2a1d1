use clap::Parser;
use seo_audit::utils::ensure_scheme;
use seo_audit::{AnalysisReport, Analyzer, AnalyzerConfig};
use std::process::ExitCode;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let url = ensure_scheme(&args.url);
    ::log::info!("Starting analysis for: {}", url);
    let start_time = std::time::Instant::now();

    let report = match Analyzer::new(url)
        .with_config(config)
        .with_deep_scan(args.deep_scan)
        .run()
        .await
    {
        Ok(report) => report,
        Err(e) => {
            ::log::error!("Analysis failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    ::log::info!(
        "Analysis complete - score {} with {} pages in {:.2} seconds",
        report.score,
        report.crawled_pages.as_ref().map_or(1, Vec::len),
        start_time.elapsed().as_secs_f64()
    );

    match render(&report, args.pretty) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            ::log::error!("Failed to serialize report: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Config file (if any) with command-line overrides applied
fn load_config(args: &Args) -> Result<AnalyzerConfig, seo_audit::ConfigError> {
    let mut config = match &args.config {
        Some(path) => AnalyzerConfig::from_file(path)?,
        None => AnalyzerConfig::default(),
    };

    if let Some(max_pages) = args.max_pages {
        config.max_pages = max_pages as usize;
    }
    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size as usize;
    }
    if let Some(timeout) = args.timeout {
        config.request_timeout_secs = timeout;
    }
    if let Some(total) = args.total_timeout {
        config.total_timeout_secs = Some(total);
    }
    if let Some(user_agent) = &args.user_agent {
        config.user_agent = user_agent.clone();
    }

    config.validate()?;
    Ok(config)
}

fn render(report: &AnalysisReport, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    }
}
