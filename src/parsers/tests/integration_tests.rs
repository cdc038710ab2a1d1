use crate::filter::LinkFilter;
use crate::parsers::{extract, parse_page, parse_page_for_site};
use crate::scoring::score;
use url::Url;

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/docs/").unwrap()
    }

    #[test]
    fn test_link_summary() {
        let html = r##"<body>
            <a href="/a">A</a>
            <a href="b?page=2#frag">B</a>
            <a href="/a#again">A again</a>
            <a href="/files/report.pdf">PDF</a>
            <a href="https://twitter.com/example">Social</a>
            <a href="mailto:team@example.com">Mail</a>
            <a href="#top">Top</a>
            <a href="javascript:void(0)">JS</a>
            <a href="">Empty</a>
        </body>"##;

        let signals = extract(html, &base());
        assert_eq!(signals.links.total, 9);
        assert_eq!(signals.links.internal, 4);
        assert_eq!(signals.links.external, 1);
        assert_eq!(
            signals.links.internal_urls,
            vec![
                "https://example.com/a".to_string(),
                "https://example.com/docs/b?page=2".to_string()
            ]
        );
    }

    #[test]
    fn test_protocol_relative_links_classified_by_resolved_host() {
        let html = r#"<body>
            <a href="//cdn.example.net/lib">CDN</a>
            <a href="//example.com/pricing">Pricing</a>
        </body>"#;

        let signals = extract(html, &base());
        assert_eq!(signals.links.total, 2);
        assert_eq!(signals.links.external, 1);
        assert_eq!(signals.links.internal, 1);
        assert_eq!(signals.links.internal_urls, vec!["https://example.com/pricing".to_string()]);
    }

    #[test]
    fn test_links_on_a_redirect_target_count_against_the_site() {
        let html = r#"<body><a href="/local">Local</a><a href="https://example.com/home">Home</a></body>"#;
        let served_from = Url::parse("https://mirror.example.org/landing").unwrap();

        let extraction = parse_page_for_site(html, &served_from, &base(), &LinkFilter::default());
        assert_eq!(extraction.signals.links.internal, 1);
        assert_eq!(extraction.signals.links.external, 1);
        assert_eq!(extraction.discovered, vec!["https://example.com/home".to_string()]);
    }

    #[test]
    fn test_internal_urls_are_capped_but_discovery_is_not() {
        let anchors: String = (0..40).map(|i| format!(r#"<a href="/p{i}">p</a>"#)).collect();
        let html = format!("<body>{anchors}</body>");

        let extraction = parse_page(&html, &base(), &LinkFilter::default());
        assert_eq!(extraction.signals.links.internal_urls.len(), 25);
        assert_eq!(extraction.discovered.len(), 40);
        assert_eq!(extraction.signals.links.internal_urls[0], "https://example.com/p0");
    }

    #[test]
    fn test_malformed_html_degrades_to_empty_fields() {
        let html = "<html><head><title>Broken<body><h1>Unclosed <div><img src=x.png";
        let signals = extract(html, &base());
        assert_eq!(signals.url, "https://example.com/docs/");
        assert!(signals.links.internal_urls.is_empty());
        assert_eq!(signals.meta.description, None);

        let empty = extract("", &base());
        assert_eq!(empty.word_count, 0);
        assert!(empty.keywords.is_empty());
        assert!(empty.headings.h1.is_empty());
        assert_eq!(empty.images.total, 0);
    }

    #[test]
    fn test_page_without_title_description_h1_scores_45_before_other_rules() {
        let words = "lorem ipsum dolor amet ".repeat(100);
        let html = format!(
            r#"<html><head><link rel="canonical" href="https://example.com/"></head>
               <body><p>{words}</p></body></html>"#
        );

        let card = score(&extract(&html, &base()));
        assert_eq!(card.score, 45);
        let kinds: Vec<_> = card.issues.iter().map(|i| i.kind.as_str()).collect();
        assert_eq!(kinds, vec!["title", "description", "h1"]);
    }

    #[test]
    fn test_title_length_keeps_inner_whitespace() {
        // 50 characters once whitespace is collapsed, 66 as written
        let title = ["Acme", "widgets", "and", "gadgets", "for", "every", "home", "and", "office"]
            .join("   ");
        let words = "lorem ipsum dolor amet ".repeat(100);
        let html = format!(
            r#"<html><head>
                <title>  {title}  </title>
                <meta name="description" content="A gallery page showing five images, three of them without alt text.">
                <link rel="canonical" href="https://example.com/gallery">
              </head><body><h1>Widgets</h1><p>{words}</p></body></html>"#
        );

        let signals = extract(&html, &base());
        assert_eq!(signals.meta.title.as_deref().map(|t| t.chars().count()), Some(66));

        let card = score(&signals);
        assert_eq!(card.score, 95);
        assert_eq!(card.issues.len(), 1);
        assert_eq!(card.issues[0].label, "Title Too Long");
    }

    #[test]
    fn test_images_without_alt_deduction_from_html() {
        let words = "lorem ipsum dolor amet ".repeat(100);
        let html = format!(
            r#"<html><head>
                <title>Gallery of example images</title>
                <meta name="description" content="A gallery page showing five images, three of them without alt text.">
                <link rel="canonical" href="https://example.com/gallery">
              </head><body><h1>Gallery</h1><p>{words}</p>
                <img src="1.png" alt="one"><img src="2.png" alt="two">
                <img src="3.png"><img src="4.png" alt=""><img src="5.png">
              </body></html>"#
        );

        let card = score(&extract(&html, &base()));
        assert_eq!(card.score, 94);
        assert_eq!(card.issues.len(), 1);
        assert_eq!(card.issues[0].label, "Missing Alt Text");
    }
}
