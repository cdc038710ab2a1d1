use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "seo-audit")]
#[command(about = "Scores on-page SEO signals of a page, optionally across a whole site")]
#[command(version)]
pub struct Args {
    /// Page to analyze (https:// is assumed when no scheme is given)
    pub url: String,

    /// Crawl same-site pages after analyzing the seed page
    #[arg(short, long)]
    pub deep_scan: bool,

    /// Maximum pages recorded during a deep scan, seed included (1-500)
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..=500))]
    pub max_pages: Option<u64>,

    /// Pages fetched concurrently per batch
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    pub batch_size: Option<u64>,

    /// Per-request timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Deadline for the whole crawl in seconds
    #[arg(long)]
    pub total_timeout: Option<u64>,

    /// User agent sent to the site
    #[arg(long)]
    pub user_agent: Option<String>,

    /// JSON configuration file; flags override its values
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pub pretty: bool,
}
