//! Substring search over the content tree.
//!
//! Both the query and every candidate text go through [`normalize`]: lower
//! casing for every language, plus Arabic orthographic folding for `ar` so
//! that spellings with or without hamza, short vowels, or teh marbuta match.
//!
//! An item matches when it is visible and the normalized query occurs in its
//! title, its content, or (exercises only) its solution. Results are grouped
//! by subject in tree order. Within a subject an item id is reported once,
//! even if it appears under several types or levels.
//!
//! [`search`] is pure and total: any query, including an empty one, returns
//! a result. The minimum query length is the caller's policy
//! ([`searchable_query`]).

use crate::types::{ContentTree, Item, ItemKind};
use serde::Serialize;
use std::collections::HashSet;

/// Arabic short vowels and related marks (fathatan … sukun).
const ARABIC_DIACRITICS: std::ops::RangeInclusive<char> = '\u{064B}'..='\u{0652}';

/// Normalize `text` for matching in `lang`.
pub fn normalize(text: &str, lang: &str) -> String {
    let lowered = text.to_lowercase();
    if lang != "ar" {
        return lowered;
    }
    lowered
        .chars()
        .filter(|c| !ARABIC_DIACRITICS.contains(c))
        .map(fold_arabic_letter)
        .collect()
}

fn fold_arabic_letter(c: char) -> char {
    match c {
        // alef with hamza above / hamza below / madda → bare alef
        'أ' | 'إ' | 'آ' => 'ا',
        // alef maksura → yaa
        'ى' => 'ي',
        // teh marbuta → haa
        'ة' => 'ه',
        other => other,
    }
}

/// A matched item, annotated with where it was found.
///
/// Holds its own copy of the item; the tree is never touched.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    #[serde(flatten)]
    pub item: Item,
    #[serde(rename = "type")]
    pub kind: ItemKind,
    pub level_id: String,
    pub subject_id: String,
}

/// Matches of one subject.
#[derive(Debug, Clone, Serialize)]
pub struct SubjectMatches {
    pub subject_id: String,
    /// Subject name resolved in the search language.
    pub name: String,
    pub items: Vec<SearchHit>,
}

/// Matches grouped by subject, in tree order. Subjects without matches are
/// absent.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct SearchResults {
    groups: Vec<SubjectMatches>,
}

impl SearchResults {
    pub fn get(&self, subject_id: &str) -> Option<&SubjectMatches> {
        self.groups.iter().find(|g| g.subject_id == subject_id)
    }

    pub fn contains_subject(&self, subject_id: &str) -> bool {
        self.get(subject_id).is_some()
    }

    pub fn groups(&self) -> &[SubjectMatches] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn total_hits(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }
}

/// Search `tree` for `query` in `lang`.
pub fn search(tree: &ContentTree, query: &str, lang: &str) -> SearchResults {
    let needle = normalize(query, lang);
    let mut groups = Vec::new();

    for subject in &tree.subjects {
        let mut items = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();

        for level in &subject.levels {
            for kind in ItemKind::ALL {
                for item in level.items(kind) {
                    if seen.contains(item.id.as_str()) {
                        continue;
                    }
                    if item.is_visible() && item_matches(item, kind, &needle, lang) {
                        seen.insert(item.id.as_str());
                        items.push(SearchHit {
                            item: item.clone(),
                            kind,
                            level_id: level.id.clone(),
                            subject_id: subject.id.clone(),
                        });
                    }
                }
            }
        }

        if !items.is_empty() {
            groups.push(SubjectMatches {
                subject_id: subject.id.clone(),
                name: subject.name_in(lang),
                items,
            });
        }
    }

    SearchResults { groups }
}

fn item_matches(item: &Item, kind: ItemKind, needle: &str, lang: &str) -> bool {
    let found_in = |text: String| normalize(&text, lang).contains(needle);
    found_in(item.title_in(lang))
        || found_in(item.content_in(lang))
        || (kind == ItemKind::Exercises && found_in(item.solution_in(lang)))
}

/// Apply the caller-side gate: trim, then require at least `min_chars`
/// characters. Returns the trimmed query when it may be searched.
pub fn searchable_query(query: &str, min_chars: usize) -> Option<&str> {
    let trimmed = query.trim();
    (!trimmed.is_empty() && trimmed.chars().count() >= min_chars).then_some(trimmed)
}
