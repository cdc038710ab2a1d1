use crate::results::Keyword;
use crate::utils::round2;
use regex::Regex;
use scraper::{ElementRef, Html, Node};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Elements whose text never counts as page content
pub const NON_CONTENT_TAGS: &[&str] = &[
    "script", "style", "noscript", "iframe", "code", "pre", "svg", "link", "meta",
];

/// Words dropped before counting keywords
pub const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "cannot", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "me",
    "more", "most", "my", "myself", "no", "nor", "not", "of", "off", "on", "once", "only", "or",
    "other", "ought", "our", "ours", "ourselves", "out", "over", "own", "same", "she", "should",
    "so", "some", "such", "than", "that", "the", "their", "theirs", "them", "themselves", "then",
    "there", "these", "they", "this", "those", "through", "to", "too", "under", "until", "up",
    "very", "was", "we", "were", "what", "when", "where", "which", "while", "who", "whom", "why",
    "with", "would", "you", "your", "yours", "yourself", "yourselves",
    // boilerplate web vocabulary
    "site", "website", "page", "copyright", "rights", "reserved", "loading", "menu", "home",
    "contact", "login", "sign", "click", "read", "view", "details",
    // leaked script tokens
    "const", "var", "let", "function", "class", "import", "export", "return", "true", "false",
    "null", "undefined", "async", "await", "console", "log", "window", "document",
];

static STOP_WORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOP_WORDS.iter().copied().collect());

static WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[a-z]{3,}\b").expect("Word pattern should be valid"));

/// Text of the whole document with non-content elements removed
pub fn visible_text(doc: &Html) -> String {
    let mut out = String::new();
    collect_text(doc.root_element(), &mut out);
    out
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                out.push_str(text);
                out.push(' ');
            }
            Node::Element(el) if !NON_CONTENT_TAGS.contains(&el.name()) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, out);
                }
            }
            _ => {}
        }
    }
}

/// Lowercased alphabetic words of at least three letters, stop words removed
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_REGEX
        .find_iter(&lowered)
        .map(|m| m.as_str())
        .filter(|w| !STOP_WORD_SET.contains(w) && !w.chars().all(|c| c.is_ascii_digit()))
        .map(str::to_string)
        .collect()
}

/// Lowercased page text that keywords are checked against
#[derive(Debug, Clone, Default)]
pub struct KeywordContext {
    title: String,
    description: String,
    h1: String,
}

impl KeywordContext {
    pub fn new(title: Option<&str>, description: Option<&str>, h1: &[String]) -> Self {
        Self {
            title: title.unwrap_or_default().to_lowercase(),
            description: description.unwrap_or_default().to_lowercase(),
            h1: h1.join(" ").to_lowercase(),
        }
    }
}

/// Most frequent words, ties kept in first-seen order
pub fn top_keywords(words: &[String], context: &KeywordContext, limit: usize) -> Vec<Keyword> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for word in words {
        match index.get(word.as_str()) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(word.as_str(), counts.len());
                counts.push((word.as_str(), 1));
            }
        }
    }

    // stable sort keeps first-seen order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    let total = words.len();
    counts
        .into_iter()
        .take(limit)
        .map(|(word, count)| Keyword {
            word: word.to_string(),
            count,
            density: if total > 0 {
                round2(count as f64 / total as f64 * 100.0)
            } else {
                0.0
            },
            in_title: context.title.contains(word),
            in_description: context.description.contains(word),
            in_h1: context.h1.contains(word),
        })
        .collect()
}
