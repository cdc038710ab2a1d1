use crate::filter::{LinkFilter, anchor_hrefs};
use crate::parsers::{MAX_IMAGE_SAMPLE, MAX_INTERNAL_URLS};
use crate::results::{Headings, ImageSample, ImageSummary, LinkSummary, MetaTags, SocialTags};
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// `<meta>` tag reduced to the attributes lookups care about
struct MetaTag<'a> {
    name: Option<&'a str>,
    property: Option<&'a str>,
    content: &'a str,
}

#[derive(Clone, Copy)]
enum Prefer {
    Name,
    Property,
}

fn meta_tags(doc: &Html) -> Vec<MetaTag<'_>> {
    let selector = Selector::parse("meta").unwrap();
    doc.select(&selector)
        .filter_map(|e| {
            let el = e.value();
            Some(MetaTag {
                name: el.attr("name"),
                property: el.attr("property"),
                content: el.attr("content")?,
            })
        })
        .collect()
}

/// Content of the first `<meta>` matching `key`, trying the preferred attribute first
fn lookup(tags: &[MetaTag<'_>], key: &str, prefer: Prefer) -> Option<String> {
    let by_name = || {
        tags.iter()
            .find(|t| t.name.is_some_and(|n| n.eq_ignore_ascii_case(key)))
    };
    let by_property = || {
        tags.iter()
            .find(|t| t.property.is_some_and(|p| p.eq_ignore_ascii_case(key)))
    };

    let tag = match prefer {
        Prefer::Name => by_name().or_else(by_property),
        Prefer::Property => by_property().or_else(by_name),
    }?;

    // content is kept verbatim; its length feeds the scoring thresholds
    (!tag.content.is_empty()).then(|| tag.content.to_string())
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Whitespace-normalized text of an element
pub fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// First non-empty `<title>`, trimmed at both ends only
pub fn extract_title(doc: &Html) -> Option<String> {
    let selector = Selector::parse("title").unwrap();
    doc.select(&selector)
        .map(|e| e.text().collect::<String>().trim().to_string())
        .find(|t| !t.is_empty())
}

pub fn extract_meta(doc: &Html) -> MetaTags {
    let tags = meta_tags(doc);

    let canonical_selector = Selector::parse("link[rel][href]").unwrap();
    let canonical = doc
        .select(&canonical_selector)
        .find(|e| {
            e.value().attr("rel").is_some_and(|rel| {
                rel.split_ascii_whitespace()
                    .any(|r| r.eq_ignore_ascii_case("canonical"))
            })
        })
        .and_then(|e| e.value().attr("href"))
        .and_then(non_empty);

    let charset_selector = Selector::parse("meta[charset]").unwrap();
    let charset = doc
        .select(&charset_selector)
        .find_map(|e| e.value().attr("charset").and_then(non_empty))
        .unwrap_or_else(|| "UTF-8".to_string());

    MetaTags {
        title: extract_title(doc),
        description: lookup(&tags, "description", Prefer::Name),
        keywords: lookup(&tags, "keywords", Prefer::Name),
        robots: lookup(&tags, "robots", Prefer::Name),
        canonical,
        charset,
        viewport: lookup(&tags, "viewport", Prefer::Name),
    }
}

/// Open Graph and Twitter Card tags; `property=` is looked up before `name=`
pub fn extract_social(doc: &Html) -> SocialTags {
    let tags = meta_tags(doc);
    let get = |key: &str| lookup(&tags, key, Prefer::Property);

    SocialTags {
        og_title: get("og:title"),
        og_description: get("og:description"),
        og_image: get("og:image"),
        twitter_card: get("twitter:card"),
        twitter_title: get("twitter:title"),
        twitter_description: get("twitter:description"),
        twitter_image: get("twitter:image"),
    }
}

pub fn extract_headings(doc: &Html) -> Headings {
    let selector = Selector::parse("h1, h2, h3, h4, h5, h6").unwrap();
    let mut headings = Headings::default();

    for element in doc.select(&selector) {
        let level = element.value().name().as_bytes().get(1).map(|b| b - b'0');
        if let Some(list) = level.and_then(|l| headings.level_mut(l)) {
            list.push(element_text(element));
        }
    }

    headings
}

pub fn extract_images(doc: &Html) -> ImageSummary {
    let selector = Selector::parse("img").unwrap();
    let mut summary = ImageSummary::default();

    for element in doc.select(&selector) {
        let el = element.value();
        let alt = el.attr("alt");

        summary.total += 1;
        if alt.is_some_and(|a| !a.trim().is_empty()) {
            summary.with_alt += 1;
        } else {
            summary.without_alt += 1;
        }

        if summary.sample.len() < MAX_IMAGE_SAMPLE {
            summary.sample.push(ImageSample {
                src: el.attr("src").unwrap_or("unknown").to_string(),
                alt: alt.unwrap_or_default().to_string(),
            });
        }
    }

    summary
}

/// Count anchors and classify them against `site`; `discovered` supplies the crawlable set
pub fn extract_links(
    doc: &Html,
    base: &Url,
    site: &Url,
    filter: &LinkFilter,
    discovered: &[String],
) -> LinkSummary {
    let hrefs = anchor_hrefs(doc);
    let mut summary = LinkSummary {
        total: hrefs.len(),
        ..LinkSummary::default()
    };

    for href in hrefs {
        let Some(resolved) = filter.resolve_href(base, href) else {
            continue;
        };
        if !matches!(resolved.scheme(), "http" | "https") {
            continue;
        }
        if filter.is_same_site(&resolved, site) {
            summary.internal += 1;
        } else {
            summary.external += 1;
        }
    }

    summary.internal_urls = discovered.iter().take(MAX_INTERNAL_URLS).cloned().collect();
    summary
}
