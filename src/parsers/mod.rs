pub mod html;
pub mod text;

#[cfg(test)]
mod tests;

use crate::filter::LinkFilter;
use crate::results::PageSignals;
use scraper::Html;
use url::Url;

/// Links kept in [`LinkSummary::internal_urls`](crate::results::LinkSummary)
pub const MAX_INTERNAL_URLS: usize = 25;

/// Images kept in [`ImageSummary::sample`](crate::results::ImageSummary)
pub const MAX_IMAGE_SAMPLE: usize = 10;

/// Keywords reported per page
pub const MAX_KEYWORDS: usize = 10;

/// Everything learned from a single parse of a page
#[derive(Debug, Clone)]
pub struct PageExtraction {
    pub signals: PageSignals,
    /// Every same-site page URL linked from the page, normalized, first-seen order
    pub discovered: Vec<String>,
}

/// Extract SEO signals from `html` using the default link rules
pub fn extract(html: &str, url: &Url) -> PageSignals {
    parse_page(html, url, &LinkFilter::default()).signals
}

/// Parse `html` once and extract both signals and crawlable links
///
/// Never fails: malformed markup or missing elements leave the matching
/// fields empty.
pub fn parse_page(html: &str, url: &Url, filter: &LinkFilter) -> PageExtraction {
    parse_page_for_site(html, url, url, filter)
}

/// Like [`parse_page`], but links count as internal only on the site of `site`
///
/// Relative links still resolve against `url`, the address the page was
/// served from.
pub fn parse_page_for_site(
    html: &str,
    url: &Url,
    site: &Url,
    filter: &LinkFilter,
) -> PageExtraction {
    let doc = Html::parse_document(html);
    if !doc.errors.is_empty() {
        ::log::trace!("{} HTML parse errors on {}", doc.errors.len(), url);
    }

    let meta = html::extract_meta(&doc);
    let social = html::extract_social(&doc);
    let headings = html::extract_headings(&doc);
    let images = html::extract_images(&doc);
    let discovered = filter.discover_for_site(&doc, url, site);
    let links = html::extract_links(&doc, url, site, filter, &discovered);

    let words = text::tokenize(&text::visible_text(&doc));
    let context = text::KeywordContext::new(
        meta.title.as_deref(),
        meta.description.as_deref(),
        &headings.h1,
    );
    let keywords = text::top_keywords(&words, &context, MAX_KEYWORDS);

    ::log::debug!(
        "Extracted {} words, {} images, {} links from {}",
        words.len(),
        images.total,
        links.total,
        url
    );

    PageExtraction {
        signals: PageSignals {
            url: url.to_string(),
            meta,
            social,
            headings,
            images,
            links,
            keywords,
            word_count: words.len(),
        },
        discovered,
    }
}
