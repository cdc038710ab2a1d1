pub mod config;
pub mod crawlers;
pub mod error;
pub mod filter;
pub mod parsers;
pub mod results;
pub mod scoring;
pub mod utils;

// Re-export commonly used types for convenience
pub use config::AnalyzerConfig;
pub use error::{AnalyzeError, ConfigError, FetchError};
pub use results::{AnalysisReport, Issue, PageResult, PageSignals, PageStatus, Severity};

use crawlers::{CrawlOptions, PageFetcher, WebCrawler, analyze_fetched};
use filter::LinkFilter;
use std::sync::Arc;
use url::Url;

/// Builder for a single analysis request
///
/// ```no_run
/// # async fn run() -> Result<(), seo_audit::AnalyzeError> {
/// let report = seo_audit::Analyzer::new("https://example.com")
///     .with_deep_scan(true)
///     .with_max_pages(25)
///     .run()
///     .await?;
/// println!("score {}", report.score);
/// # Ok(())
/// # }
/// ```
pub struct Analyzer {
    url: String,
    deep_scan: bool,
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Create a new analyzer for an absolute seed URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            deep_scan: false,
            config: AnalyzerConfig::default(),
        }
    }

    /// Crawl the rest of the site after analyzing the seed page
    pub fn with_deep_scan(mut self, deep_scan: bool) -> Self {
        self.deep_scan = deep_scan;
        self
    }

    /// Set the page budget of a deep scan (seed included)
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    /// Set how many pages are fetched concurrently per batch
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.config.batch_size = batch_size;
        self
    }

    /// Set the per-request timeout
    pub fn with_request_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.request_timeout_secs = timeout_seconds;
        self
    }

    /// Set the deadline for the whole crawl
    pub fn with_total_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.total_timeout_secs = Some(timeout_seconds);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a file
    pub fn with_config_file(self, path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let config = AnalyzerConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a string
    pub fn with_config_str(self, config_str: &str) -> Result<Self, ConfigError> {
        let config = AnalyzerConfig::from_json(config_str)?;
        Ok(self.with_config(config))
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyze the seed page and, for deep scans, crawl the site
    ///
    /// Fails only when the configuration is invalid or the seed page cannot
    /// be fetched.
    pub async fn run(self) -> Result<AnalysisReport, AnalyzeError> {
        self.config.validate()?;

        let seed_url = Url::parse(&self.url).map_err(|source| AnalyzeError::InvalidUrl {
            url: self.url.clone(),
            source,
        })?;
        let filter = LinkFilter::new(&self.config.exclude_patterns).map_err(ConfigError::from)?;
        let filter = Arc::new(filter);
        let fetcher = PageFetcher::new(&self.config)?;

        ::log::info!("Analyzing {}", seed_url);
        let page = fetcher.fetch(seed_url.as_str()).await?;
        let seed = analyze_fetched(seed_url.as_str(), &page, &filter);
        ::log::info!(
            "Seed {} scored {} with {} issues",
            seed.url,
            seed.card.score,
            seed.card.issues.len()
        );

        let crawled_pages = if self.deep_scan {
            let crawler = WebCrawler::new(fetcher, filter, CrawlOptions::from_config(&self.config));
            Some(crawler.crawl_from(&seed).await)
        } else {
            None
        };

        Ok(AnalysisReport {
            signals: seed.signals,
            score: seed.card.score,
            issues: seed.card.issues,
            crawled_pages,
        })
    }
}

/// Crawl a site with default settings and the given limits
pub async fn crawl(
    seed_url: &str,
    max_pages: usize,
    batch_size: usize,
) -> Result<Vec<PageResult>, AnalyzeError> {
    let config = AnalyzerConfig {
        max_pages,
        batch_size,
        ..AnalyzerConfig::default()
    };
    config.validate()?;

    let fetcher = PageFetcher::new(&config)?;
    let crawler = WebCrawler::new(
        fetcher,
        Arc::new(LinkFilter::default()),
        CrawlOptions::from_config(&config),
    );
    Ok(crawler.crawl(seed_url).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SEED_HTML: &str = r#"<html><head>
        <title>A title that is far too long for search engines to display in full</title>
        <link rel="canonical" href="/">
        </head><body><h1>Welcome</h1><a href="/about">About</a></body></html>"#;

    async fn site() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(ResponseTemplate::new(200).set_body_string(SEED_HTML))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/about"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<title>About us page</title>"))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_quick_scan_has_no_crawled_pages() {
        let server = site().await;

        let report = Analyzer::new(server.uri()).run().await.unwrap();

        // 100 - 5 (long title) - 20 (no description) - 10 (thin content)
        assert_eq!(report.score, 65);
        let labels: Vec<_> = report.issues.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["Title Too Long", "Missing Meta Description", "Thin Content"]
        );
        assert!(report.crawled_pages.is_none());
        assert_eq!(report.signals.links.internal_urls.len(), 1);
    }

    #[tokio::test]
    async fn test_deep_scan_reports_crawled_pages() {
        let server = site().await;

        let report = Analyzer::new(server.uri())
            .with_deep_scan(true)
            .with_max_pages(10)
            .run()
            .await
            .unwrap();

        let pages = report.crawled_pages.unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0].score, report.score);
        assert_eq!(pages[0].issue_count, report.issues.len());
        assert_eq!(pages[1].title, "About us page");
    }

    #[tokio::test]
    async fn test_seed_failure_fails_the_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = Analyzer::new(server.uri())
            .with_deep_scan(true)
            .run()
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyzeError::Seed(FetchError::Status { code: 404, .. })));
    }

    #[tokio::test]
    async fn test_invalid_input_is_rejected_before_fetching() {
        let err = Analyzer::new("not a url").run().await.unwrap_err();
        assert!(matches!(err, AnalyzeError::InvalidUrl { .. }));

        let err = Analyzer::new("https://example.com")
            .with_batch_size(0)
            .run()
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyzeError::Config(_)));
    }

    #[tokio::test]
    async fn test_client_setup_failure_is_not_a_seed_failure() {
        let err = Analyzer::new("https://example.com")
            .with_user_agent("broken\nagent")
            .run()
            .await
            .unwrap_err();
        assert!(matches!(err, AnalyzeError::Client(_)), "got {err:?}");
        assert!(!err.to_string().contains("seed page failed"));
    }

    #[tokio::test]
    async fn test_crawl_helper_respects_max_pages() {
        let server = site().await;
        let results = crawl(&server.uri(), 1, 10).await.unwrap();
        assert_eq!(results.len(), 1);
    }
}
