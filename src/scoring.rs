//! Deterministic point-deduction scoring of page signals.
//!
//! Rules are evaluated in a fixed order (title, description, h1, images,
//! content, canonical) and the issue list follows that order. Identical
//! signals always produce an identical score and issue list.

use crate::results::{Issue, PageSignals, Severity};

pub const TITLE_MAX_CHARS: usize = 60;
pub const TITLE_MIN_CHARS: usize = 10;
pub const DESCRIPTION_MAX_CHARS: usize = 160;
pub const DESCRIPTION_MIN_CHARS: usize = 50;
pub const MIN_WORD_COUNT: usize = 300;

/// Score plus the issues that produced the deductions
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreCard {
    pub score: u8,
    pub issues: Vec<Issue>,
}

struct Tally {
    points: i32,
    issues: Vec<Issue>,
}

impl Tally {
    fn deduct(&mut self, points: i32, issue: Issue) {
        self.points -= points;
        self.issues.push(issue);
    }
}

/// Score a page from 0 to 100
pub fn score(signals: &PageSignals) -> ScoreCard {
    let mut tally = Tally {
        points: 100,
        issues: Vec::new(),
    };

    check_title(signals, &mut tally);
    check_description(signals, &mut tally);
    check_h1(signals, &mut tally);
    check_images(signals, &mut tally);
    check_content(signals, &mut tally);
    check_canonical(signals, &mut tally);

    ScoreCard {
        score: tally.points.clamp(0, 100) as u8,
        issues: tally.issues,
    }
}

fn check_title(signals: &PageSignals, tally: &mut Tally) {
    match signals.meta.title.as_deref().filter(|t| !t.is_empty()) {
        None => tally.deduct(
            20,
            Issue::new(
                "title",
                "Missing Title Tag",
                "The page title is missing, which is critical for SEO.",
                Severity::High,
            ),
        ),
        Some(title) => {
            let len = title.chars().count();
            if len > TITLE_MAX_CHARS {
                tally.deduct(
                    5,
                    Issue::new(
                        "title",
                        "Title Too Long",
                        format!("Title is {len} chars (recommended: < {TITLE_MAX_CHARS})."),
                        Severity::Medium,
                    ),
                );
            } else if len < TITLE_MIN_CHARS {
                tally.deduct(
                    5,
                    Issue::new(
                        "title",
                        "Title Too Short",
                        format!("Title is {len} chars, too short to be descriptive."),
                        Severity::Medium,
                    ),
                );
            }
        }
    }
}

fn check_description(signals: &PageSignals, tally: &mut Tally) {
    match signals.meta.description.as_deref().filter(|d| !d.is_empty()) {
        None => tally.deduct(
            20,
            Issue::new(
                "description",
                "Missing Meta Description",
                "Meta description is missing, impacting click-through rates.",
                Severity::High,
            ),
        ),
        Some(description) => {
            let len = description.chars().count();
            if len > DESCRIPTION_MAX_CHARS {
                tally.deduct(
                    3,
                    Issue::new(
                        "description",
                        "Description Too Long",
                        format!(
                            "Meta description is {len} chars (recommended: <= {DESCRIPTION_MAX_CHARS})."
                        ),
                        Severity::Low,
                    ),
                );
            } else if len < DESCRIPTION_MIN_CHARS {
                tally.deduct(
                    5,
                    Issue::new(
                        "description",
                        "Description Too Short",
                        format!(
                            "Meta description is {len} chars (recommended: >= {DESCRIPTION_MIN_CHARS})."
                        ),
                        Severity::Medium,
                    ),
                );
            }
        }
    }
}

fn check_h1(signals: &PageSignals, tally: &mut Tally) {
    let count = signals.headings.h1.len();
    if count == 0 {
        tally.deduct(
            15,
            Issue::new(
                "h1",
                "Missing H1 Heading",
                "No H1 tag found. Use one H1 for the main title.",
                Severity::High,
            ),
        );
    } else if count > 1 {
        tally.deduct(
            5,
            Issue::new(
                "h1",
                "Multiple H1 Tags",
                format!("Found {count} H1 tags. Use only one per page."),
                Severity::Medium,
            ),
        );
    }
}

fn check_images(signals: &PageSignals, tally: &mut Tally) {
    let missing = signals.images.without_alt;
    if missing > 0 {
        let penalty = (missing.saturating_mul(2)).min(10) as i32;
        tally.deduct(
            penalty,
            Issue::new(
                "images",
                "Missing Alt Text",
                format!("{missing} images are missing alt text."),
                Severity::Medium,
            ),
        );
    }
}

fn check_content(signals: &PageSignals, tally: &mut Tally) {
    let words = signals.word_count;
    if words < MIN_WORD_COUNT {
        tally.deduct(
            10,
            Issue::new(
                "content",
                "Thin Content",
                format!("Word count is {words} (recommended: > {MIN_WORD_COUNT})."),
                Severity::Medium,
            ),
        );
    }
}

fn check_canonical(signals: &PageSignals, tally: &mut Tally) {
    if signals.meta.canonical.as_deref().is_none_or(str::is_empty) {
        tally.deduct(
            5,
            Issue::new(
                "canonical",
                "Missing Canonical Tag",
                "Canonical tag is missing.",
                Severity::Low,
            ),
        );
    }
}
