use regex::{Regex, RegexBuilder};
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// File extensions that are never treated as crawlable pages
pub const ASSET_EXTENSIONS: &[&str] = &[
    "jpg", "jpeg", "png", "gif", "css", "js", "pdf", "svg", "ico", "xml", "woff", "woff2", "ttf",
    "eot",
];

/// Decides which links are same-site pages and canonicalizes them for dedup
#[derive(Debug, Clone)]
pub struct LinkFilter {
    asset_regex: Regex,
    exclude_regexes: Vec<Regex>,
}

impl Default for LinkFilter {
    fn default() -> Self {
        Self {
            asset_regex: asset_regex(),
            exclude_regexes: Vec::new(),
        }
    }
}

fn asset_regex() -> Regex {
    let pattern = format!(r"\.({})$", ASSET_EXTENSIONS.join("|"));
    RegexBuilder::new(&pattern)
        .case_insensitive(true)
        .build()
        .expect("Asset extension pattern should be valid")
}

impl LinkFilter {
    /// Create a filter with extra user-supplied exclusion patterns
    pub fn new(exclude_patterns: &[String]) -> Result<Self, regex::Error> {
        let mut exclude_regexes = Vec::with_capacity(exclude_patterns.len());
        for pattern in exclude_patterns {
            exclude_regexes.push(Regex::new(pattern)?);
        }

        Ok(Self {
            asset_regex: asset_regex(),
            exclude_regexes,
        })
    }

    /// Resolve an `href` against `base`, skipping empty, anchor-only and script targets
    pub fn resolve_href(&self, base: &Url, href: &str) -> Option<Url> {
        let href = href.trim();
        if href.is_empty()
            || href.starts_with('#')
            || href
                .get(..11)
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case("javascript:"))
        {
            return None;
        }
        base.join(href).ok()
    }

    /// Same host and same explicit port as `base`
    pub fn is_same_site(&self, url: &Url, base: &Url) -> bool {
        url.host_str().is_some() && url.host_str() == base.host_str() && url.port() == base.port()
    }

    /// Whether the URL path points at a static asset rather than a page
    pub fn is_asset(&self, url: &Url) -> bool {
        self.asset_regex.is_match(url.path())
    }

    /// Determine if a resolved link belongs in the crawl frontier
    pub fn should_crawl(&self, url: &Url, base: &Url) -> bool {
        if !matches!(url.scheme(), "http" | "https") {
            return false;
        }

        if !self.is_same_site(url, base) || self.is_asset(url) {
            return false;
        }

        let url_str = url.as_str();
        !self
            .exclude_regexes
            .iter()
            .any(|regex| regex.is_match(url_str))
    }

    /// Canonical form used for dedup: scheme, host, path and query, no fragment
    pub fn normalize_url(&self, url: &Url) -> Url {
        normalize(url)
    }

    /// Parse and return the same-site page URLs linked from `html`
    pub fn discover(&self, html: &str, base: &Url) -> Vec<String> {
        let doc = Html::parse_document(html);
        self.discover_in(&doc, base)
    }

    /// Same as [`discover`](Self::discover) on an already parsed document
    pub fn discover_in(&self, doc: &Html, base: &Url) -> Vec<String> {
        self.discover_for_site(doc, base, base)
    }

    /// Resolve links against `base` but keep only those on the site of `site`
    ///
    /// `base` is where the document was actually served from, which differs
    /// from `site` when a crawled page redirected.
    pub fn discover_for_site(&self, doc: &Html, base: &Url, site: &Url) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut found = Vec::new();

        for href in anchor_hrefs(doc) {
            let Some(resolved) = self.resolve_href(base, href) else {
                continue;
            };
            if !self.should_crawl(&resolved, site) {
                ::log::trace!("Link filter rejected: {}", resolved);
                continue;
            }

            let normalized = self.normalize_url(&resolved).to_string();
            if seen.insert(normalized.clone()) {
                found.push(normalized);
            }
        }

        ::log::debug!("Discovered {} same-site links on {}", found.len(), base);
        found
    }
}

/// Canonicalize a parsed URL; applying it twice yields the same URL
pub fn normalize(url: &Url) -> Url {
    let mut normalized = url.clone();
    normalized.set_fragment(None);
    // Only fails for cannot-be-a-base URLs, which carry no credentials anyway.
    let _ = normalized.set_username("");
    let _ = normalized.set_password(None);
    normalized
}

/// Parse and canonicalize a URL string
pub fn normalize_str(url: &str) -> Result<String, url::ParseError> {
    Url::parse(url).map(|parsed| normalize(&parsed).to_string())
}

/// All `href` values of `<a>` elements, in document order
pub(crate) fn anchor_hrefs(doc: &Html) -> Vec<&str> {
    let selector = Selector::parse("a[href]").unwrap();
    doc.select(&selector)
        .filter_map(|e| e.value().attr("href"))
        .collect()
}
