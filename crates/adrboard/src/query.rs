//! Filtering and sorting of ADR collections.
//!
//! Both operations are pure: they borrow their input, never reorder or
//! modify it, and return a new sequence of references.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::adr::{Adr, AdrCategory, AdrStatus};

/// Criteria for [`filter`]. Every absent criterion matches all records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    /// Keep only records with this status.
    pub status: Option<AdrStatus>,
    /// Keep only records in this category.
    pub category: Option<AdrCategory>,
    /// Keep only records whose title, tags or authors contain this text,
    /// case-insensitively. An empty string matches everything.
    pub text: Option<String>,
}

impl Filter {
    /// A filter that matches every record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a status.
    #[must_use]
    pub fn with_status(mut self, status: AdrStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restrict to a category.
    #[must_use]
    pub fn with_category(mut self, category: AdrCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Restrict to records matching `text`.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Check whether a single record satisfies every criterion.
    #[must_use]
    pub fn matches(&self, adr: &Adr) -> bool {
        if self.status.is_some_and(|status| adr.status != status) {
            return false;
        }
        if self
            .category
            .is_some_and(|category| adr.category != category)
        {
            return false;
        }
        match self.text.as_deref() {
            Some(text) if !text.is_empty() => matches_listing_text(adr, &text.to_lowercase()),
            _ => true,
        }
    }
}

/// Sort key for [`sort`]. Every key sorts descending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Most recently updated first.
    #[default]
    Date,
    /// Highest number first.
    Number,
    /// Highest quality score first; a missing score counts as zero.
    Quality,
}

/// Keep the records that satisfy `criteria`, in input order.
#[must_use]
pub fn filter<'a>(records: &'a [Adr], criteria: &Filter) -> Vec<&'a Adr> {
    records.iter().filter(|adr| criteria.matches(adr)).collect()
}

/// Sort records by `key`, descending.
///
/// The sort is stable: records that compare equal keep their input order.
#[must_use]
pub fn sort<'a>(records: &[&'a Adr], key: SortKey) -> Vec<&'a Adr> {
    let mut sorted = records.to_vec();
    match key {
        SortKey::Date => sorted.sort_by_key(|adr| Reverse(adr.last_updated)),
        SortKey::Number => sorted.sort_by_key(|adr| Reverse(adr.number)),
        SortKey::Quality => sorted.sort_by_key(|adr| Reverse(adr.quality())),
    }
    sorted
}

/// Filter then sort, as the ADR listing does.
#[must_use]
pub fn list<'a>(records: &'a [Adr], criteria: &Filter, key: SortKey) -> Vec<&'a Adr> {
    sort(&filter(records, criteria), key)
}

/// Distinct categories in order of first appearance.
#[must_use]
pub fn unique_categories(records: &[Adr]) -> Vec<AdrCategory> {
    let mut categories = Vec::new();
    for adr in records {
        if !categories.contains(&adr.category) {
            categories.push(adr.category);
        }
    }
    categories
}

/// Case-insensitive match of an already lowercased query against the
/// fields shown in the listing: title, tags and authors.
pub(crate) fn matches_listing_text(adr: &Adr, query: &str) -> bool {
    adr.title.to_lowercase().contains(query)
        || adr
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(query))
        || adr
            .authors
            .iter()
            .any(|author| author.to_lowercase().contains(query))
}
