//! Lookups in the merged content tree.
//!
//! All lookups are total: a miss is `None` (or an empty list), never an
//! error. Pages decide what to show for a miss.

use crate::types::{ContentTree, Item, ItemKind, Level, Subject};

pub fn find_subject<'a>(tree: &'a ContentTree, subject_id: &str) -> Option<&'a Subject> {
    tree.subjects.iter().find(|s| s.id == subject_id)
}

pub fn find_level<'a>(subject: &'a Subject, level_id: &str) -> Option<&'a Level> {
    subject.levels.iter().find(|l| l.id == level_id)
}

pub fn find_item<'a>(level: &'a Level, kind: ItemKind, item_id: &str) -> Option<&'a Item> {
    level.items(kind).iter().find(|i| i.id == item_id)
}

/// Visible items of `kind` attached to `lesson_id`, in source order.
pub fn list_associated<'a>(level: &'a Level, kind: ItemKind, lesson_id: &str) -> Vec<&'a Item> {
    level
        .items(kind)
        .iter()
        .filter(|i| i.lesson_id.as_deref() == Some(lesson_id) && i.is_visible())
        .collect()
}

/// Visible items of `kind`, in source order.
pub fn visible_items(level: &Level, kind: ItemKind) -> Vec<&Item> {
    level.items(kind).iter().filter(|i| i.is_visible()).collect()
}

/// Levels with at least one visible lesson.
pub fn visible_levels(subject: &Subject) -> Vec<&Level> {
    subject
        .levels
        .iter()
        .filter(|l| l.lessons.iter().any(Item::is_visible))
        .collect()
}

/// A fully resolved content page address.
#[derive(Debug, Clone, Copy)]
pub struct ContentRef<'a> {
    pub subject: &'a Subject,
    pub level: &'a Level,
    pub kind: ItemKind,
    pub item: &'a Item,
}

/// Look up a content page from its raw identifiers.
pub fn find_content<'a>(
    tree: &'a ContentTree,
    subject_id: &str,
    level_id: &str,
    kind: &str,
    item_id: &str,
) -> Option<ContentRef<'a>> {
    let subject = find_subject(tree, subject_id)?;
    let level = find_level(subject, level_id)?;
    let kind = ItemKind::parse(kind)?;
    let item = find_item(level, kind, item_id)?;
    Some(ContentRef {
        subject,
        level,
        kind,
        item,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use crate::types::Status;

    fn sample_tree() -> ContentTree {
        let mut lvl = level(
            "math-1ac",
            vec![lesson("l1", "Les fractions"), lesson("l2", "Les angles")],
        );
        lvl.exercises = vec![
            exercise("e1", "Exercice 1", Some("l1")),
            with_status(exercise("e2", "Exercice 2", Some("l1")), "unverified"),
            exercise("e3", "Exercice 3", Some("l2")),
            exercise("e4", "Exercice 4", Some("l1")),
        ];
        lvl.summaries = vec![summary("s1", "Résumé", Some("l1"))];
        tree(vec![subject("math", &[]).with_levels(vec![lvl])])
    }

    #[test]
    fn finds_subject_level_and_item() {
        let tree = sample_tree();
        let subject = find_subject(&tree, "math").unwrap();
        let level = find_level(subject, "math-1ac").unwrap();
        let item = find_item(level, ItemKind::Exercises, "e3").unwrap();
        assert_eq!(item.id, "e3");
    }

    #[test]
    fn misses_are_none() {
        let tree = sample_tree();
        assert!(find_subject(&tree, "history").is_none());
        let subject = find_subject(&tree, "math").unwrap();
        assert!(find_level(subject, "math-9ac").is_none());
        let level = find_level(subject, "math-1ac").unwrap();
        assert!(find_item(level, ItemKind::Lessons, "e1").is_none());
        assert!(find_item(level, ItemKind::Summaries, "nope").is_none());
    }

    #[test]
    fn associated_items_filtered_and_ordered() {
        let tree = sample_tree();
        let level = &tree.subjects[0].levels[0];
        let ids: Vec<&str> = list_associated(level, ItemKind::Exercises, "l1")
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(ids, vec!["e1", "e4"]);
    }

    #[test]
    fn associated_items_for_unknown_lesson_empty() {
        let tree = sample_tree();
        let level = &tree.subjects[0].levels[0];
        assert!(list_associated(level, ItemKind::Summaries, "l9").is_empty());
    }

    #[test]
    fn visible_levels_require_a_visible_lesson() {
        let hidden = level(
            "math-2ac",
            vec![with_status(lesson("l1", "Brouillon"), "draft")],
        );
        let shown = level("math-1ac", vec![lesson("l1", "Les fractions")]);
        let empty = level("math-3ac", vec![]);
        let subject = subject("math", &[]).with_levels(vec![shown, hidden, empty]);
        let ids: Vec<&str> = visible_levels(&subject).iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, vec!["math-1ac"]);
    }

    #[test]
    fn visible_items_skip_unverified() {
        let tree = sample_tree();
        let level = &tree.subjects[0].levels[0];
        let visible = visible_items(level, ItemKind::Exercises);
        assert_eq!(visible.len(), 3);
        assert!(visible.iter().all(|i| i.status != Some(Status::Unverified)));
    }

    #[test]
    fn find_content_chains_lookups() {
        let tree = sample_tree();
        let found = find_content(&tree, "math", "math-1ac", "summaries", "s1").unwrap();
        assert_eq!(found.subject.id, "math");
        assert_eq!(found.level.id, "math-1ac");
        assert_eq!(found.kind, ItemKind::Summaries);
        assert_eq!(found.item.id, "s1");
    }

    #[test]
    fn find_content_rejects_unknown_type() {
        let tree = sample_tree();
        assert!(find_content(&tree, "math", "math-1ac", "videos", "l1").is_none());
    }
}
