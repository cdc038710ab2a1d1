pub mod fetch;
pub mod session;
pub mod web;


pub use fetch::{FetchedPage, PageFetcher};
pub use session::CrawlSession;
pub use web::{AnalyzedPage, CrawlOptions, WebCrawler, analyze_fetched, analyze_on_site};
