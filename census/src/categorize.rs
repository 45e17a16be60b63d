//! Grouping records by category and ordering each group.
//!
//! Within a group, records with a numeric attribute come first in ascending
//! order (equal values keep their input order). Records whose attribute is
//! unknown follow, ordered by name.

use crate::metrics_defs::GROUPS_EMITTED;
use crate::types::{CategorizedRecord, CategoryGroup, Record};
use indexmap::IndexMap;
use shared::counter;
use std::cmp::Ordering;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Groups `records` by category, in first-seen category order, and sorts
/// each group with [`sort_by_attribute`].
pub fn categorize_and_sort(records: &[Record]) -> Vec<CategoryGroup> {
    // Map keyed by category, preserving insertion order
    let mut by_category: IndexMap<&str, Vec<CategorizedRecord>> = IndexMap::new();

    for record in records {
        by_category
            .entry(record.category.as_str())
            .or_default()
            .push(CategorizedRecord::from(record));
    }

    let groups: Vec<CategoryGroup> = by_category
        .into_iter()
        .map(|(category, records)| CategoryGroup {
            category: category.to_string(),
            records: sort_owned(records),
        })
        .collect();

    counter!(GROUPS_EMITTED).increment(groups.len() as u64);
    groups
}

/// Returns a sorted copy of `records`; the input is left untouched.
pub fn sort_by_attribute(records: &[CategorizedRecord]) -> Vec<CategorizedRecord> {
    sort_owned(records.to_vec())
}

fn sort_owned(records: Vec<CategorizedRecord>) -> Vec<CategorizedRecord> {
    let (mut known, mut unknown): (Vec<_>, Vec<_>) =
        records.into_iter().partition(|r| r.attribute.is_known());

    // sort_by_key is stable, so equal values keep their input order
    known.sort_by_key(|r| r.attribute.value());
    unknown.sort_by(|a, b| collate(&a.name, &b.name));

    known.extend(unknown);
    known
}

/// Compares names the way a human-facing listing would.
///
/// Base letters decide first, ignoring accents and case, so "Éowyn" sorts
/// next to "Eowyn" rather than after "Z". Remaining ties are broken by
/// accents (unaccented first), then by case (lowercase first).
pub fn collate(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| accented_letters(a).cmp(accented_letters(b)))
        .then_with(|| b.cmp(a))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    accented_letters(s).filter(|c| !is_combining_mark(*c))
}

fn accented_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}
