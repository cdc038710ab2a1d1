use crate::config::AnalyzerConfig;
use crate::crawlers::fetch::{FetchedPage, PageFetcher};
use crate::crawlers::session::CrawlSession;
use crate::error::FetchError;
use crate::filter::{LinkFilter, normalize, normalize_str};
use crate::parsers;
use crate::results::{PageResult, PageSignals};
use crate::scoring::{self, ScoreCard};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::Instant;
use url::Url;

/// Limits for one crawl
#[derive(Debug, Clone, Copy)]
pub struct CrawlOptions {
    /// Maximum number of results, seed included
    pub max_pages: usize,
    /// Pages fetched concurrently per batch
    pub batch_size: usize,
    /// Optional deadline for the whole crawl
    pub total_timeout: Option<Duration>,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            max_pages: 50,
            batch_size: 10,
            total_timeout: None,
        }
    }
}

impl CrawlOptions {
    pub fn from_config(config: &AnalyzerConfig) -> Self {
        Self {
            max_pages: config.effective_max_pages(),
            batch_size: config.batch_size,
            total_timeout: config.total_timeout(),
        }
    }
}

/// A fetched page after extraction and scoring
#[derive(Debug, Clone)]
pub struct AnalyzedPage {
    /// Normalized URL that was requested
    pub requested: String,
    /// Normalized URL after redirects
    pub url: String,
    /// Parsed form of `url`; relative links were resolved against it
    pub base: Url,
    pub signals: PageSignals,
    pub card: ScoreCard,
    /// Same-site page URLs linked from this page
    pub discovered: Vec<String>,
}

impl AnalyzedPage {
    /// Compact crawl result for this page
    pub fn to_result(&self, url: String, fallback_title: &str) -> PageResult {
        let title = self
            .signals
            .meta
            .title
            .clone()
            .unwrap_or_else(|| fallback_title.to_string());
        PageResult::scored(url, title, self.card.score, self.card.issues.clone())
    }
}

/// Extract, score and discover links on a fetched seed page
///
/// The site is wherever the seed ended up after redirects.
pub fn analyze_fetched(requested: &str, page: &FetchedPage, filter: &LinkFilter) -> AnalyzedPage {
    let site = normalize(&page.final_url);
    analyze_on_site(requested, page, &site, filter)
}

/// Extract, score and discover links on a page crawled from `site`
///
/// Relative links resolve against the final URL, not the requested one, but
/// only links on the site of `site` are discovered. A page that redirected
/// off-site therefore adds nothing to the frontier.
pub fn analyze_on_site(
    requested: &str,
    page: &FetchedPage,
    site: &Url,
    filter: &LinkFilter,
) -> AnalyzedPage {
    let final_url = normalize(&page.final_url);
    let extraction = parsers::parse_page_for_site(&page.content, &final_url, site, filter);
    let card = scoring::score(&extraction.signals);

    AnalyzedPage {
        requested: normalize_str(requested).unwrap_or_else(|_| requested.to_string()),
        url: final_url.to_string(),
        base: final_url,
        signals: extraction.signals,
        card,
        discovered: extraction.discovered,
    }
}

/// Outcome of one page inside a batch
enum PageOutcome {
    Analyzed(Box<AnalyzedPage>),
    Failed(String),
}

/// Breadth-first, batch-at-a-time site crawler
pub struct WebCrawler {
    fetcher: PageFetcher,
    filter: Arc<LinkFilter>,
    options: CrawlOptions,
}

impl WebCrawler {
    pub fn new(fetcher: PageFetcher, filter: Arc<LinkFilter>, options: CrawlOptions) -> Self {
        Self {
            fetcher,
            filter,
            options,
        }
    }

    /// Fetch the seed and crawl the site from it
    ///
    /// Only a seed failure is returned as an error.
    pub async fn crawl(&self, seed_url: &str) -> Result<Vec<PageResult>, FetchError> {
        ::log::info!("Starting crawl for: {}", seed_url);
        let page = self.fetcher.fetch(seed_url).await?;
        let seed = analyze_fetched(seed_url, &page, &self.filter);
        Ok(self.crawl_from(&seed).await)
    }

    /// Crawl from an already analyzed seed page
    ///
    /// Batches run one at a time; each batch fetches its pages concurrently
    /// and is merged into the session only after every page has resolved.
    /// Dropping the returned future aborts the in-flight batch.
    pub async fn crawl_from(&self, seed: &AnalyzedPage) -> Vec<PageResult> {
        let start = std::time::Instant::now();
        let deadline = self.options.total_timeout.map(|t| Instant::now() + t);

        let mut session = CrawlSession::new(
            seed.to_result(seed.url.clone(), "Main Page"),
            self.options.max_pages,
            self.options.batch_size,
        );
        session.mark_visited(&seed.requested);
        let site = seed.base.clone();
        let queued = session.enqueue(seed.discovered.iter().cloned());
        ::log::info!("Seed {} queued {} links", seed.url, queued);

        let mut batch_no = 0;
        while session.has_work() {
            let batch = session.next_batch();
            if batch.is_empty() {
                continue;
            }
            batch_no += 1;
            ::log::info!(
                "Batch {}: fetching {} pages ({} still queued, {} recorded)",
                batch_no,
                batch.len(),
                session.frontier_len(),
                session.results().len()
            );

            let outcomes = match deadline {
                Some(deadline) => {
                    match tokio::time::timeout_at(deadline, self.run_batch(&batch, &site)).await {
                        Ok(outcomes) => outcomes,
                        Err(_) => {
                            ::log::warn!(
                                "Crawl deadline reached, discarding batch {} of {} pages",
                                batch_no,
                                batch.len()
                            );
                            break;
                        }
                    }
                }
                None => self.run_batch(&batch, &site).await,
            };

            if !merge_batch(&mut session, batch, outcomes) {
                ::log::info!("Page budget of {} reached", self.options.max_pages);
                break;
            }
        }

        let results = session.into_results();
        ::log::info!(
            "Crawling complete - recorded {} pages in {:.2} seconds",
            results.len(),
            start.elapsed().as_secs_f64()
        );
        results
    }

    /// Fetch and analyze every URL of a batch concurrently
    ///
    /// Returns one outcome per URL, in batch order. A panicking task counts
    /// as a failed page.
    async fn run_batch(&self, batch: &[String], site: &Url) -> Vec<PageOutcome> {
        let mut tasks = JoinSet::new();

        for (index, url) in batch.iter().enumerate() {
            let fetcher = self.fetcher.clone();
            let filter = Arc::clone(&self.filter);
            let url = url.clone();
            let site = site.clone();

            tasks.spawn(async move {
                let outcome = match fetcher.fetch(&url).await {
                    Ok(page) => {
                        let analyzed = analyze_on_site(&url, &page, &site, &filter);
                        PageOutcome::Analyzed(Box::new(analyzed))
                    }
                    Err(e) => {
                        ::log::warn!("Failed to load {}: {}", url, e);
                        PageOutcome::Failed(e.to_string())
                    }
                };
                (index, outcome)
            });
        }

        let mut slots: Vec<Option<PageOutcome>> = batch.iter().map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, outcome)) => slots[index] = Some(outcome),
                Err(e) => ::log::error!("Page task failed: {}", e),
            }
        }

        slots
            .into_iter()
            .map(|slot| slot.unwrap_or_else(|| PageOutcome::Failed("page task aborted".into())))
            .collect()
    }
}

/// Merge batch outcomes in frontier order; returns false once the budget is spent
fn merge_batch(session: &mut CrawlSession, batch: Vec<String>, outcomes: Vec<PageOutcome>) -> bool {
    for (url, outcome) in batch.into_iter().zip(outcomes) {
        match outcome {
            PageOutcome::Analyzed(page) => {
                let result = page.to_result(url, "Untitled Page");
                if !session.push_result(result) {
                    return false;
                }
                session.mark_visited(&page.url);
                let queued = session.enqueue(page.discovered.iter().cloned());
                ::log::debug!("{} queued {} new links", page.url, queued);
            }
            PageOutcome::Failed(reason) => {
                if !session.push_result(PageResult::failed(url, reason)) {
                    return false;
                }
            }
        }
    }
    session.remaining_budget() > 0
}
