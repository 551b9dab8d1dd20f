//! Keyword search over ADRs.
//!
//! Search is a case-insensitive substring match over title, tags, authors
//! and context. Results come back in store order. The relevance attached to
//! each hit is a fixed decreasing sequence by rank, not a computed signal:
//! the first hit scores highest and each following hit drops by a fixed step
//! until the floor is reached.

use regex::{Regex, RegexBuilder};
use serde::Serialize;
use tracing::debug;

use crate::adr::Adr;
use crate::query::matches_listing_text;

/// Relevance of the first hit.
const RELEVANCE_CEILING: f64 = 1.0;

/// Relevance lost per rank.
const RELEVANCE_STEP: f64 = 0.12;

/// Relevance never drops below this.
const RELEVANCE_FLOOR: f64 = 0.5;

/// Number of segments in a relevance bar.
pub const RELEVANCE_SEGMENTS: u32 = 5;

/// Number of records suggested when no query has been entered.
const CONTEXTUAL_COUNT: usize = 3;

/// Queries offered before the user has typed anything.
pub const SUGGESTED_QUERIES: &[&str] = &[
    "model selection",
    "vector database",
    "data retention GDPR",
    "inference serving",
    "prompt templates",
    "feature store",
    "kubernetes deployment",
    "compliance EU AI Act",
];

/// A field of an ADR that a query can match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchedField {
    /// The title.
    Title,
    /// One of the tags.
    Tags,
    /// One of the authors.
    Authors,
    /// The context section.
    Context,
}

impl std::fmt::Display for MatchedField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Title => write!(f, "title"),
            Self::Tags => write!(f, "tags"),
            Self::Authors => write!(f, "authors"),
            Self::Context => write!(f, "context"),
        }
    }
}

/// A search result with its display metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit<'a> {
    /// The matching record.
    pub adr: &'a Adr,
    /// Zero-based position in the result list.
    pub rank: usize,
    /// Cosmetic relevance in `[0.5, 1.0]`.
    pub relevance: f64,
    /// Fields containing the query.
    pub matched_fields: Vec<MatchedField>,
    /// Excerpt of the context around the first match.
    pub snippet: String,
}

/// Find records matching `query`, in store order.
///
/// A blank query returns nothing.
#[must_use]
pub fn search<'a>(records: &'a [Adr], query: &str) -> Vec<&'a Adr> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    let results: Vec<_> = records
        .iter()
        .filter(|adr| {
            matches_listing_text(adr, &needle) || adr.context.to_lowercase().contains(&needle)
        })
        .collect();
    debug!(query, hits = results.len(), "Keyword search");
    results
}

/// Search and annotate each hit with relevance, matched fields and a
/// context snippet of at most `snippet_length` characters.
#[must_use]
pub fn search_hits<'a>(
    records: &'a [Adr],
    query: &str,
    snippet_length: usize,
) -> Vec<SearchHit<'a>> {
    let pattern = literal_pattern(query);
    search(records, query)
        .into_iter()
        .enumerate()
        .map(|(rank, adr)| SearchHit {
            adr,
            rank,
            relevance: relevance(rank),
            matched_fields: matched_fields(adr, query),
            snippet: snippet(&adr.context, pattern.as_ref(), snippet_length),
        })
        .collect()
}

/// Cosmetic relevance for the hit at `rank`: `max(0.5, 1 - 0.12 * rank)`.
#[must_use]
pub fn relevance(rank: usize) -> f64 {
    let rank = u32::try_from(rank).unwrap_or(u32::MAX);
    (RELEVANCE_CEILING - RELEVANCE_STEP * f64::from(rank)).max(RELEVANCE_FLOOR)
}

/// Relevance as a whole percentage.
#[must_use]
pub fn relevance_percent(score: f64) -> u32 {
    // Scores live in [0.5, 1.0], so the cast cannot truncate or wrap.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let percent = (score.clamp(0.0, 1.0) * 100.0).round() as u32;
    percent
}

/// Number of lit segments in a five-segment relevance bar.
#[must_use]
pub fn relevance_segments(score: f64) -> u32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let lit = (score.clamp(0.0, 1.0) * f64::from(RELEVANCE_SEGMENTS)).ceil() as u32;
    lit
}

/// Fields of `adr` containing `query`, case-insensitively.
#[must_use]
pub fn matched_fields(adr: &Adr, query: &str) -> Vec<MatchedField> {
    let needle = query.to_lowercase();
    if needle.trim().is_empty() {
        return Vec::new();
    }
    let contains = |text: &str| text.to_lowercase().contains(&needle);

    let mut fields = Vec::new();
    if contains(&adr.title) {
        fields.push(MatchedField::Title);
    }
    if adr.tags.iter().any(|tag| contains(tag)) {
        fields.push(MatchedField::Tags);
    }
    if adr.authors.iter().any(|author| contains(author)) {
        fields.push(MatchedField::Authors);
    }
    if contains(&adr.context) {
        fields.push(MatchedField::Context);
    }
    fields
}

/// Wrap every case-insensitive occurrence of `query` in `**`.
///
/// The query is matched literally. A blank query leaves the text unchanged.
#[must_use]
pub fn highlight(text: &str, query: &str) -> String {
    match literal_pattern(query) {
        Some(pattern) => pattern.replace_all(text, "**$0**").into_owned(),
        None => text.to_string(),
    }
}

/// Records suggested before any query is entered.
#[must_use]
pub fn contextual(records: &[Adr]) -> &[Adr] {
    &records[..records.len().min(CONTEXTUAL_COUNT)]
}

/// Compile `query` as a case-insensitive literal pattern.
fn literal_pattern(query: &str) -> Option<Regex> {
    if query.trim().is_empty() {
        return None;
    }
    RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
        .ok()
}

/// Excerpt of `text` around the first match of `pattern`.
///
/// Without a match the excerpt starts at the beginning of the text. Cut
/// ends are marked with an ellipsis.
fn snippet(text: &str, pattern: Option<&Regex>, max_chars: usize) -> String {
    let total = text.chars().count();
    if total <= max_chars {
        return text.to_string();
    }

    let match_char = pattern
        .and_then(|p| p.find(text))
        .map_or(0, |m| text[..m.start()].chars().count());
    let lead = max_chars / 4;
    let start = match_char.saturating_sub(lead).min(total - max_chars);
    let end = start + max_chars;

    let mut excerpt = String::new();
    if start > 0 {
        excerpt.push('…');
    }
    excerpt.extend(text.chars().skip(start).take(max_chars));
    if end < total {
        excerpt.push('…');
    }
    excerpt
}
