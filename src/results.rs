use serde::{Deserialize, Serialize};

/// Structured SEO signals extracted from one fetched page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSignals {
    /// URL the page was analyzed under (final URL after redirects)
    pub url: String,
    pub meta: MetaTags,
    pub social: SocialTags,
    pub headings: Headings,
    pub images: ImageSummary,
    pub links: LinkSummary,
    /// Top keywords by frequency
    pub keywords: Vec<Keyword>,
    /// Number of content words after stop-word filtering
    pub word_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaTags {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
    pub robots: Option<String>,
    pub canonical: Option<String>,
    pub charset: String,
    pub viewport: Option<String>,
}

/// Open Graph and Twitter Card tags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialTags {
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub twitter_card: Option<String>,
    pub twitter_title: Option<String>,
    pub twitter_description: Option<String>,
    pub twitter_image: Option<String>,
}

/// Heading texts per level, in document order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Headings {
    pub h1: Vec<String>,
    pub h2: Vec<String>,
    pub h3: Vec<String>,
    pub h4: Vec<String>,
    pub h5: Vec<String>,
    pub h6: Vec<String>,
}

impl Headings {
    /// Mutable access to the list for heading level `1..=6`
    pub fn level_mut(&mut self, level: u8) -> Option<&mut Vec<String>> {
        match level {
            1 => Some(&mut self.h1),
            2 => Some(&mut self.h2),
            3 => Some(&mut self.h3),
            4 => Some(&mut self.h4),
            5 => Some(&mut self.h5),
            6 => Some(&mut self.h6),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageSummary {
    pub total: usize,
    pub with_alt: usize,
    pub without_alt: usize,
    /// First few images on the page
    pub sample: Vec<ImageSample>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSample {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSummary {
    pub total: usize,
    pub internal: usize,
    pub external: usize,
    /// Normalized same-site page URLs, deduplicated, first-seen order
    pub internal_urls: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyword {
    pub word: String,
    pub count: usize,
    /// Percentage of all content words, two decimals
    pub density: f64,
    pub in_title: bool,
    pub in_description: bool,
    #[serde(rename = "inH1")]
    pub in_h1: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A single scoring-rule violation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
    pub description: String,
    pub severity: Severity,
}

impl Issue {
    pub fn new(
        kind: &str,
        label: &str,
        description: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            kind: kind.to_string(),
            label: label.to_string(),
            description: description.into(),
            severity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageStatus {
    #[serde(rename = "200")]
    Ok,
    #[serde(rename = "error")]
    Error,
}

/// Outcome of analyzing one crawled page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub url: String,
    pub status: PageStatus,
    pub score: u8,
    pub issue_count: usize,
    pub title: String,
    pub issues: Vec<Issue>,
}

impl PageResult {
    /// Result for a page that was fetched and scored
    pub fn scored(url: String, title: String, score: u8, issues: Vec<Issue>) -> Self {
        Self {
            url,
            status: PageStatus::Ok,
            score,
            issue_count: issues.len(),
            title,
            issues,
        }
    }

    /// Synthetic result for a page that could not be loaded
    pub fn failed(url: String, reason: impl Into<String>) -> Self {
        let issues = vec![Issue::new(
            "fetch",
            "Failed to Load",
            reason,
            Severity::High,
        )];
        Self {
            url,
            status: PageStatus::Error,
            score: 0,
            issue_count: issues.len(),
            title: "Failed to load".to_string(),
            issues,
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == PageStatus::Error
    }
}

/// Aggregate returned for one analysis request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    #[serde(flatten)]
    pub signals: PageSignals,
    pub score: u8,
    pub issues: Vec<Issue>,
    /// Present only for deep scans
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crawled_pages: Option<Vec<PageResult>>,
}
