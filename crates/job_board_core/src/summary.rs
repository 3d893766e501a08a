//! Summary normalization and block segmentation.
//!
//! Job summaries arrive as loosely structured text. [`SummaryFormatter`]
//! turns them into an ordered sequence of [`SummaryBlock`]s that a renderer
//! can lay out without re-parsing.

use serde::{Deserialize, Serialize};

use crate::job::Summary;

/// Section headings recognised by the catalog rule.
pub const DEFAULT_SECTION_HEADINGS: &[&str] = &[
    "About the role",
    "What you'll be doing",
    "What We’re Looking For",
    "What we offer",
    "About us",
    "Start your career",
    "Position Overview",
    "Key Responsibilities",
    "Requirements",
    "Benefits",
    "Why Join Us?",
    "Company Overview:",
    "The Opportunity:",
];

/// Leading words recognised by the keyword rule.
pub const DEFAULT_HEADING_KEYWORDS: &[&str] = &[
    "About",
    "What",
    "Key",
    "Requirements",
    "Benefits",
    "Why",
    "Position",
    "Company",
];

/// Number of characters kept when a preview has to be cut from raw text.
pub const PREVIEW_CHAR_LIMIT: usize = 300;

const BULLET_MARKERS: [char; 2] = ['-', '•'];

/// How a line is recognised as a section heading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HeadingRule {
    /// The line starts with one of these phrases, ignoring case.
    Catalog(Vec<String>),
    /// The line starts with one of these keywords, ignoring case.
    KeywordPrefix(Vec<String>),
}

impl HeadingRule {
    pub fn default_catalog() -> Self {
        HeadingRule::Catalog(to_owned_list(DEFAULT_SECTION_HEADINGS))
    }

    pub fn default_keywords() -> Self {
        HeadingRule::KeywordPrefix(to_owned_list(DEFAULT_HEADING_KEYWORDS))
    }

    pub fn is_heading(&self, line: &str) -> bool {
        let prefixes = match self {
            HeadingRule::Catalog(prefixes) | HeadingRule::KeywordPrefix(prefixes) => prefixes,
        };
        let lowered = line.to_lowercase();
        prefixes
            .iter()
            .any(|prefix| lowered.starts_with(&prefix.to_lowercase()))
    }
}

impl Default for HeadingRule {
    fn default() -> Self {
        Self::default_catalog()
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_string()).collect()
}

/// One classified summary line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryBlock {
    Heading(String),
    BulletItem(String),
    Paragraph(String),
}

impl SummaryBlock {
    pub fn text(&self) -> &str {
        match self {
            SummaryBlock::Heading(text)
            | SummaryBlock::BulletItem(text)
            | SummaryBlock::Paragraph(text) => text,
        }
    }
}

/// Blocks with consecutive bullet items collected into a single list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarySection {
    Heading(String),
    BulletList(Vec<String>),
    Paragraph(String),
}

/// Flattens any summary shape into one string.
pub fn extract_summary_text(summary: Option<&Summary>) -> String {
    match summary {
        None => String::new(),
        Some(Summary::Text(text)) => text.clone(),
        Some(Summary::List(items)) => items.join(" "),
        Some(Summary::Map(pairs)) => pairs
            .iter()
            .map(|(_, value)| value.as_str())
            .collect::<Vec<_>>()
            .join(" "),
    }
}

/// Segments summaries into blocks using a fixed heading rule.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SummaryFormatter {
    rule: HeadingRule,
}

impl SummaryFormatter {
    pub fn new(rule: HeadingRule) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> &HeadingRule {
        &self.rule
    }

    pub fn format(&self, summary: Option<&Summary>) -> Vec<SummaryBlock> {
        self.format_text(&extract_summary_text(summary))
    }

    pub fn format_text(&self, text: &str) -> Vec<SummaryBlock> {
        non_blank_lines(text)
            .map(|line| self.classify(line))
            .collect()
    }

    fn classify(&self, line: &str) -> SummaryBlock {
        if self.rule.is_heading(line) {
            return SummaryBlock::Heading(line.to_string());
        }
        match line.strip_prefix(BULLET_MARKERS) {
            Some(rest) => SummaryBlock::BulletItem(rest.trim_start().to_string()),
            None => SummaryBlock::Paragraph(line.to_string()),
        }
    }
}

fn non_blank_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(str::trim).filter(|line| !line.is_empty())
}

/// Collapses runs of bullet items into lists; any other block ends a run.
pub fn group_blocks(blocks: &[SummaryBlock]) -> Vec<SummarySection> {
    let mut sections = Vec::new();
    let mut open_list: Option<Vec<String>> = None;

    for block in blocks {
        match block {
            SummaryBlock::BulletItem(text) => {
                open_list.get_or_insert_with(Vec::new).push(text.clone());
            }
            SummaryBlock::Heading(text) => {
                if let Some(items) = open_list.take() {
                    sections.push(SummarySection::BulletList(items));
                }
                sections.push(SummarySection::Heading(text.clone()));
            }
            SummaryBlock::Paragraph(text) => {
                if let Some(items) = open_list.take() {
                    sections.push(SummarySection::BulletList(items));
                }
                sections.push(SummarySection::Paragraph(text.clone()));
            }
        }
    }
    if let Some(items) = open_list {
        sections.push(SummarySection::BulletList(items));
    }
    sections
}

/// Plain-text rendering of the blocks, one block per line.
pub fn plain_text(blocks: &[SummaryBlock]) -> String {
    blocks
        .iter()
        .map(SummaryBlock::text)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Short plain-text teaser for a collapsed card.
pub fn fallback_preview(blocks: &[SummaryBlock]) -> String {
    if let Some(first) = blocks.iter().find_map(|block| match block {
        SummaryBlock::Paragraph(text) => Some(text),
        _ => None,
    }) {
        return first.clone();
    }
    if blocks.is_empty() {
        return String::new();
    }
    let text = plain_text(blocks);
    let cut: String = text.trim().chars().take(PREVIEW_CHAR_LIMIT).collect();
    format!("{cut}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> SummaryFormatter {
        SummaryFormatter::default()
    }

    #[test]
    fn extract_handles_every_shape() {
        assert_eq!(extract_summary_text(None), "");
        assert_eq!(
            extract_summary_text(Some(&Summary::Text("as is".into()))),
            "as is"
        );
        assert_eq!(
            extract_summary_text(Some(&Summary::List(vec!["a".into(), "b".into()]))),
            "a b"
        );
        assert_eq!(
            extract_summary_text(Some(&Summary::Map(vec![
                ("k1".into(), "one".into()),
                ("k2".into(), "two".into()),
            ]))),
            "one two"
        );
        assert_eq!(extract_summary_text(Some(&Summary::List(Vec::new()))), "");
    }

    #[test]
    fn plain_lines_become_paragraphs_in_order() {
        let blocks = catalog().format_text("first line\n\n   second line  \n\t\nthird");
        assert_eq!(
            blocks,
            vec![
                SummaryBlock::Paragraph("first line".into()),
                SummaryBlock::Paragraph("second line".into()),
                SummaryBlock::Paragraph("third".into()),
            ]
        );
    }

    #[test]
    fn bullet_markers_and_following_space_are_stripped() {
        let blocks = catalog().format_text("- dash item\n•   dot item\n-tight");
        assert_eq!(
            blocks,
            vec![
                SummaryBlock::BulletItem("dash item".into()),
                SummaryBlock::BulletItem("dot item".into()),
                SummaryBlock::BulletItem("tight".into()),
            ]
        );
    }

    #[test]
    fn catalog_headings_match_prefix_ignoring_case() {
        let rule = HeadingRule::default_catalog();
        assert!(rule.is_heading("ABOUT THE ROLE"));
        assert!(rule.is_heading("Requirements and skills"));
        assert!(rule.is_heading("why join us? Great perks"));
        assert!(!rule.is_heading("What matters to us"));
        assert!(!rule.is_heading("- Requirements"));
    }

    #[test]
    fn keyword_rule_is_a_plain_prefix_match() {
        let rule = HeadingRule::default_keywords();
        assert!(rule.is_heading("What matters to us"));
        assert!(rule.is_heading("company:"));
        assert!(rule.is_heading("Key"));
        assert!(rule.is_heading("Whatever you bring, we value"));
        assert!(rule.is_heading("Keynote: our culture"));
        assert!(rule.is_heading("Companywide perks"));
        assert!(!rule.is_heading("Our team"));
        assert!(!rule.is_heading("é"));
    }

    #[test]
    fn keyword_formatter_turns_prefixed_lines_into_headings() {
        let formatter = SummaryFormatter::new(HeadingRule::default_keywords());
        assert_eq!(formatter.rule(), &HeadingRule::default_keywords());
        assert_eq!(
            formatter.format_text("Whatever you bring, we value
- curiosity"),
            vec![
                SummaryBlock::Heading("Whatever you bring, we value".into()),
                SummaryBlock::BulletItem("curiosity".into()),
            ]
        );
    }

    #[test]
    fn heading_closes_open_bullet_group() {
        let blocks = catalog().format_text("- one\n- two\nBenefits\n- three\nplain\n- four");
        assert_eq!(
            group_blocks(&blocks),
            vec![
                SummarySection::BulletList(vec!["one".into(), "two".into()]),
                SummarySection::Heading("Benefits".into()),
                SummarySection::BulletList(vec!["three".into()]),
                SummarySection::Paragraph("plain".into()),
                SummarySection::BulletList(vec!["four".into()]),
            ]
        );
    }

    #[test]
    fn preview_prefers_first_paragraph() {
        let blocks = catalog().format_text("About the role\n- bullet\nFirst para\nSecond para");
        assert_eq!(fallback_preview(&blocks), "First para");
    }

    #[test]
    fn preview_falls_back_to_truncated_plain_text() {
        let long_item = "x".repeat(400);
        let blocks = catalog().format_text(&format!("About us\n- {long_item}"));
        let preview = fallback_preview(&blocks);
        assert!(preview.starts_with("About us\nxxx"));
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), PREVIEW_CHAR_LIMIT + 3);
        assert!(!preview.contains('<'));
    }

    #[test]
    fn empty_summary_yields_no_blocks_and_no_preview() {
        let blocks = catalog().format(None);
        assert!(blocks.is_empty());
        assert_eq!(fallback_preview(&blocks), "");
    }
}
