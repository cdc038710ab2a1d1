use crate::results::PageResult;
use std::collections::{HashSet, VecDeque};

/// Mutable state of one crawl; owned by the crawl loop and never shared
#[derive(Debug)]
pub struct CrawlSession {
    visited: HashSet<String>,
    frontier: VecDeque<String>,
    queued: HashSet<String>,
    results: Vec<PageResult>,
    max_pages: usize,
    batch_size: usize,
}

impl CrawlSession {
    /// Start a session whose first result is the seed page
    pub fn new(seed: PageResult, max_pages: usize, batch_size: usize) -> Self {
        let mut visited = HashSet::new();
        visited.insert(seed.url.clone());

        Self {
            visited,
            frontier: VecDeque::new(),
            queued: HashSet::new(),
            results: vec![seed],
            max_pages: max_pages.max(1),
            batch_size: batch_size.max(1),
        }
    }

    /// Record a URL as visited; URLs must already be normalized
    pub fn mark_visited(&mut self, url: &str) {
        self.queued.remove(url);
        self.visited.insert(url.to_string());
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Append unseen URLs to the frontier tail; returns how many were queued
    pub fn enqueue<I>(&mut self, urls: I) -> usize
    where
        I: IntoIterator<Item = String>,
    {
        let mut added = 0;
        for url in urls {
            if self.visited.contains(&url) || self.queued.contains(&url) {
                continue;
            }
            self.queued.insert(url.clone());
            self.frontier.push_back(url);
            added += 1;
        }
        added
    }

    /// Pages that may still be recorded
    pub fn remaining_budget(&self) -> usize {
        self.max_pages.saturating_sub(self.results.len())
    }

    /// Whether the loop should run another batch
    pub fn has_work(&self) -> bool {
        !self.frontier.is_empty() && self.remaining_budget() > 0
    }

    /// Pop the next batch from the frontier head
    ///
    /// Holds at most `batch_size` URLs and never more than the remaining
    /// page budget. Already visited entries are dropped.
    pub fn next_batch(&mut self) -> Vec<String> {
        let limit = self.batch_size.min(self.remaining_budget());
        let mut batch = Vec::with_capacity(limit);

        while batch.len() < limit {
            let Some(url) = self.frontier.pop_front() else {
                break;
            };
            self.queued.remove(&url);
            if self.visited.contains(&url) || batch.contains(&url) {
                continue;
            }
            batch.push(url);
        }

        batch
    }

    /// Append a result unless the page budget is exhausted
    pub fn push_result(&mut self, result: PageResult) -> bool {
        if self.remaining_budget() == 0 {
            return false;
        }
        self.mark_visited(&result.url);
        self.results.push(result);
        true
    }

    pub fn results(&self) -> &[PageResult] {
        &self.results
    }

    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    pub fn into_results(self) -> Vec<PageResult> {
        self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seed() -> PageResult {
        PageResult::scored("https://a.test/".into(), "Home".into(), 100, Vec::new())
    }

    fn urls(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| format!("https://a.test{p}")).collect()
    }

    #[test]
    fn test_seed_is_visited_and_first() {
        let session = CrawlSession::new(seed(), 5, 2);
        assert!(session.is_visited("https://a.test/"));
        assert_eq!(session.results().len(), 1);
        assert_eq!(session.remaining_budget(), 4);
    }

    #[test]
    fn test_enqueue_skips_visited_and_queued() {
        let mut session = CrawlSession::new(seed(), 10, 10);
        let added = session.enqueue(urls(&["/", "/a", "/b", "/a"]));
        assert_eq!(added, 2);
        assert_eq!(session.enqueue(urls(&["/b", "/c"])), 1);
        assert_eq!(session.frontier_len(), 3);
    }

    #[test]
    fn test_batches_are_fifo_and_bounded() {
        let mut session = CrawlSession::new(seed(), 100, 2);
        session.enqueue(urls(&["/a", "/b", "/c"]));

        assert_eq!(session.next_batch(), urls(&["/a", "/b"]));
        assert_eq!(session.next_batch(), urls(&["/c"]));
        assert!(session.next_batch().is_empty());
    }

    #[test]
    fn test_batch_is_truncated_to_budget() {
        let mut session = CrawlSession::new(seed(), 3, 10);
        session.enqueue(urls(&["/a", "/b", "/c", "/d"]));
        assert_eq!(session.next_batch().len(), 2);
    }

    #[test]
    fn test_push_result_respects_budget() {
        let mut session = CrawlSession::new(seed(), 2, 10);
        let page = |p: &str| PageResult::scored(format!("https://a.test{p}"), "x".into(), 90, vec![]);

        assert!(session.push_result(page("/a")));
        assert!(!session.push_result(page("/b")));
        assert_eq!(session.results().len(), 2);
        assert!(session.is_visited("https://a.test/a"));
        assert!(!session.has_work());
    }

    #[test]
    fn test_visited_urls_never_requeued() {
        let mut session = CrawlSession::new(seed(), 10, 10);
        session.mark_visited("https://a.test/a");
        assert_eq!(session.enqueue(urls(&["/a"])), 0);
    }
}
