//! Shared test utilities for the simple-edu test suite.
//!
//! Provides content-tree builders, lookup helpers that panic with a clear
//! message on miss, an in-memory [`DocumentSource`], and fixture setup.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let t = tree(vec![
//!     subject("math", &[("fr", "Mathématiques")])
//!         .with_levels(vec![level("math-1ac", vec![lesson("l1", "Les fractions")])]),
//! ]);
//! let math = find_subject_or_panic(&t, "math");
//! assert_eq!(level_ids(math), vec!["math-1ac"]);
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use tempfile::TempDir;

use crate::load::{DocumentSource, FetchError};
use crate::types::{ContentTree, Item, Level, LocalizedText, Status, Subject};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Tree builders
// =========================================================================

pub fn tree(subjects: Vec<Subject>) -> ContentTree {
    ContentTree { subjects }
}

/// A subject with a per-language name, or no name when `name` is empty.
pub fn subject(id: &str, name: &[(&str, &str)]) -> Subject {
    Subject {
        id: id.to_string(),
        name: (!name.is_empty()).then(|| LocalizedText::per_language(name)),
        background_image: None,
        primary_color: None,
        levels: Vec::new(),
    }
}

impl Subject {
    pub fn with_levels(mut self, levels: Vec<Level>) -> Self {
        self.levels = levels;
        self
    }
}

pub fn level(id: &str, lessons: Vec<Item>) -> Level {
    Level {
        id: id.to_string(),
        name: Some(LocalizedText::per_language(&[("fr", id)])),
        lessons,
        exercises: Vec::new(),
        summaries: Vec::new(),
    }
}

/// An item with a French title and nothing else.
pub fn item(id: &str, title_fr: &str) -> Item {
    Item {
        id: id.to_string(),
        title: Some(LocalizedText::per_language(&[("fr", title_fr)])),
        content: None,
        solution: None,
        status: None,
        lesson_id: None,
        images: BTreeMap::new(),
        youtube_video_id: None,
        background_image: None,
    }
}

pub fn lesson(id: &str, title_fr: &str) -> Item {
    item(id, title_fr)
}

pub fn exercise(id: &str, title_fr: &str, lesson_id: Option<&str>) -> Item {
    Item {
        lesson_id: lesson_id.map(String::from),
        ..item(id, title_fr)
    }
}

pub fn summary(id: &str, title_fr: &str, lesson_id: Option<&str>) -> Item {
    exercise(id, title_fr, lesson_id)
}

pub fn with_status(mut item: Item, status: &str) -> Item {
    item.status = Some(Status::from(status.to_string()));
    item
}

pub fn with_title(mut item: Item, pairs: &[(&str, &str)]) -> Item {
    item.title = Some(LocalizedText::per_language(pairs));
    item
}

pub fn with_content(mut item: Item, pairs: &[(&str, &str)]) -> Item {
    item.content = Some(LocalizedText::per_language(pairs));
    item
}

pub fn with_solution(mut item: Item, pairs: &[(&str, &str)]) -> Item {
    item.solution = Some(LocalizedText::per_language(pairs));
    item
}

// =========================================================================
// Lookups, panicking with a clear message on miss
// =========================================================================

/// Find a subject by id. Panics if not found.
pub fn find_subject_or_panic<'a>(tree: &'a ContentTree, id: &str) -> &'a Subject {
    tree.subjects.iter().find(|s| s.id == id).unwrap_or_else(|| {
        let ids: Vec<&str> = tree.subjects.iter().map(|s| s.id.as_str()).collect();
        panic!("subject '{id}' not found. Available: {ids:?}")
    })
}

/// All level ids of a subject, in tree order.
pub fn level_ids(subject: &Subject) -> Vec<&str> {
    subject.levels.iter().map(|l| l.id.as_str()).collect()
}

// =========================================================================
// In-memory document source
// =========================================================================

/// A [`DocumentSource`] backed by a map of file name → JSON text.
#[derive(Default)]
pub struct MemorySource {
    pub files: BTreeMap<String, String>,
}

impl MemorySource {
    pub fn new(files: &[(&str, &str)]) -> Self {
        Self {
            files: files
                .iter()
                .map(|(name, body)| (name.to_string(), body.to_string()))
                .collect(),
        }
    }
}

impl DocumentSource for MemorySource {
    fn read(&self, name: &str) -> Result<String, FetchError> {
        self.files
            .get(name)
            .cloned()
            .ok_or_else(|| FetchError::NotFound(name.to_string()))
    }

    fn list(&self) -> Result<Vec<String>, FetchError> {
        Ok(self.files.keys().cloned().collect())
    }
}
