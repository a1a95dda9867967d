//! Search and field-filter predicates over a record superset.
//!
//! Filtering is a pure function of the superset and the criteria. The result
//! preserves superset order so the table does not reshuffle between renders.

use crate::model::{Record, RecordField};
use std::collections::BTreeMap;

// ===== FilterCriteria =====

/// What the user typed in the search box plus any exact-match field filters.
///
/// Only the empty string means "no constraint", both for the search text and
/// for individual filter values. Whitespace in the search text is significant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria<F: RecordField> {
    search_text: String,
    field_filters: BTreeMap<F, String>,
}

impl<F: RecordField> Default for FilterCriteria<F> {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            field_filters: BTreeMap::new(),
        }
    }
}

impl<F: RecordField> FilterCriteria<F> {
    /// Criteria that match every record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`set_search_text`](Self::set_search_text).
    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.set_search_text(text);
        self
    }

    /// Builder form of [`set_field_filter`](Self::set_field_filter).
    pub fn with_filter(mut self, field: F, value: impl Into<String>) -> Self {
        self.set_field_filter(field, value);
        self
    }

    /// Search text as typed.
    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Replace the search text. Matching is case-insensitive; the text is not trimmed.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
    }

    /// Require `field` to equal `value` exactly. An empty value removes the filter.
    pub fn set_field_filter(&mut self, field: F, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.field_filters.remove(&field);
        } else {
            self.field_filters.insert(field, value);
        }
    }

    /// Drop the filter on `field`, if any.
    pub fn clear_field_filter(&mut self, field: F) {
        self.field_filters.remove(&field);
    }

    /// Active field filters.
    pub fn field_filters(&self) -> &BTreeMap<F, String> {
        &self.field_filters
    }

    /// True when no search text and no field filter is set.
    pub fn is_unconstrained(&self) -> bool {
        self.search_text.is_empty() && self.field_filters.is_empty()
    }
}

// ===== FilterEngine =====

/// Applies [`FilterCriteria`] to records using a configured search-field list.
#[derive(Debug, Clone)]
pub struct FilterEngine<F: RecordField> {
    search_fields: Vec<F>,
}

impl<F: RecordField> FilterEngine<F> {
    /// Create an engine that matches search text against `search_fields`.
    pub fn new(search_fields: impl Into<Vec<F>>) -> Self {
        Self {
            search_fields: search_fields.into(),
        }
    }

    /// Fields the search text is matched against.
    pub fn search_fields(&self) -> &[F] {
        &self.search_fields
    }

    /// Derive the filtered view of `records`.
    ///
    /// The returned sequence is a subsequence of `records` in original order.
    pub fn apply<'a, R>(&self, records: &'a [R], criteria: &FilterCriteria<F>) -> Vec<&'a R>
    where
        R: Record<Field = F>,
    {
        self.matching_indices(records, criteria)
            .into_iter()
            .map(|i| &records[i])
            .collect()
    }

    /// Positions in `records` of every record satisfying `criteria`, ascending.
    pub fn matching_indices<R>(&self, records: &[R], criteria: &FilterCriteria<F>) -> Vec<usize>
    where
        R: Record<Field = F>,
    {
        let needle = criteria.search_text.to_lowercase();

        records
            .iter()
            .enumerate()
            .filter(|(_, record)| {
                self.matches_search(*record, &needle) && matches_filters(*record, criteria)
            })
            .map(|(i, _)| i)
            .collect()
    }

    /// Evaluate the full predicate for a single record.
    pub fn matches<R>(&self, record: &R, criteria: &FilterCriteria<F>) -> bool
    where
        R: Record<Field = F>,
    {
        let needle = criteria.search_text.to_lowercase();
        self.matches_search(record, &needle) && matches_filters(record, criteria)
    }

    /// Case-insensitive substring match against any configured search field.
    /// `needle` must already be lowercased.
    fn matches_search<R>(&self, record: &R, needle: &str) -> bool
    where
        R: Record<Field = F>,
    {
        if needle.is_empty() {
            return true;
        }

        self.search_fields.iter().any(|field| {
            record
                .field(*field)
                .is_some_and(|value| value.to_lowercase().contains(needle))
        })
    }
}

/// All field filters must hold (logical AND). Absent fields never match.
fn matches_filters<R: Record>(record: &R, criteria: &FilterCriteria<R::Field>) -> bool {
    criteria
        .field_filters
        .iter()
        .all(|(field, expected)| record.field(*field).as_deref() == Some(expected.as_str()))
}

// ===== Tests =====

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
