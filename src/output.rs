//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output leads with what the content *is* (subject names, level names,
//! item titles, resolved in the display language) and shows file names and
//! ids as indented context lines. Each entity uses the same two-level
//! pattern:
//!
//! 1. **Header line**: positional index + name (+ optional detail)
//! 2. **Context lines**: indented `Id:`, `Source:`, status, ...
//!
//! # Output Format
//!
//! ## Check
//!
//! ```text
//! Subjects
//! 001 Mathématiques (2 levels)
//!     Id: math
//!     001 1ère année collège (2 lessons, 3 exercises, 1 summary)
//!         Id: math-1ac
//! 002 Physique (no levels)
//!     Id: physics
//!
//! Documents
//!     database.json: loaded
//!     math-1ac.json: loaded
//!     math-2ac.json: failed (document not found: math-2ac.json)
//!
//! 4 loaded, 1 failed
//! ```
//!
//! ## Search
//!
//! ```text
//! Mathématiques (2 matches)
//!     lessons    Les fractions → /fr/math/math-1ac/lessons/l1.html
//!     exercises  Exercice 1 → /fr/math/math-1ac/exercises/e1.html
//! ```
//!
//! ## Build
//!
//! ```text
//! fr → fr/index.html
//! ar → ar/index.html
//! Generated 3 languages: 9 pages, 6 subject pages, 24 content pages, 2 assets
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::generate::{GenerateReport, content_url, home_url};
use crate::i18n;
use crate::load::{DocumentStatus, LoadReport, Site};
use crate::navigate::{ContentRef, visible_items};
use crate::search::SearchResults;
use crate::types::ItemKind;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entity header: positional index + name, with optional detail.
///
/// ```text
/// 001 Mathématiques (2 levels)
/// 001 Mathématiques
/// ```
fn entity_header(index: usize, name: &str, detail: Option<&str>) -> String {
    match detail {
        Some(d) => format!("{} {} ({})", format_index(index), name, d),
        None => format!("{} {}", format_index(index), name),
    }
}

/// `"1 lesson"`, `"3 lessons"`.
fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

/// Name to display: the resolved name, or the id in parens when it is empty.
fn display_name(name: String, id: &str) -> String {
    if name.is_empty() {
        format!("({id})")
    } else {
        name
    }
}

fn status_line(name: &str, status: &DocumentStatus) -> String {
    match status {
        DocumentStatus::Loaded => format!("{}{}: loaded", indent(1), name),
        DocumentStatus::Failed(reason) => format!("{}{}: failed ({})", indent(1), name, reason),
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format the content inventory and per-document fetch results.
///
/// Counts only visible items, as the generated site would show them.
pub fn format_load_output(site: &Site, report: &LoadReport, lang: &str) -> Vec<String> {
    let mut lines = vec!["Subjects".to_string()];

    for (i, subject) in site.tree.subjects.iter().enumerate() {
        let detail = if subject.levels.is_empty() {
            "no levels".to_string()
        } else {
            plural(subject.levels.len(), "level", "levels")
        };
        let name = display_name(subject.name_in(lang), &subject.id);
        lines.push(entity_header(i + 1, &name, Some(&detail)));
        lines.push(format!("{}Id: {}", indent(1), subject.id));

        for (j, level) in subject.levels.iter().enumerate() {
            let counts = [
                plural(visible_items(level, ItemKind::Lessons).len(), "lesson", "lessons"),
                plural(visible_items(level, ItemKind::Exercises).len(), "exercise", "exercises"),
                plural(visible_items(level, ItemKind::Summaries).len(), "summary", "summaries"),
            ]
            .join(", ");
            let name = display_name(level.name_in(lang), &level.id);
            lines.push(format!("{}{}", indent(1), entity_header(j + 1, &name, Some(&counts))));
            lines.push(format!("{}Id: {}", indent(2), level.id));
        }
    }

    lines.push(String::new());
    lines.push("Documents".to_string());
    if let Some(master) = &report.master {
        lines.push(status_line(&site.config.sources.master, master));
    }
    for (name, status) in report.levels.iter().chain(&report.pages) {
        lines.push(status_line(name, status));
    }

    let total = usize::from(report.master.is_some()) + report.levels.len() + report.pages.len();
    let failed = report.failures();
    lines.push(String::new());
    lines.push(format!("{} loaded, {} failed", total - failed, failed));
    lines
}

pub fn print_load_output(site: &Site, report: &LoadReport, lang: &str) {
    for line in format_load_output(site, report, lang) {
        println!("{}", line);
    }
}

// ============================================================================
// Search
// ============================================================================

/// Format grouped search results with the URL of each hit.
pub fn format_search_results(results: &SearchResults, lang: &str) -> Vec<String> {
    if results.is_empty() {
        return vec![i18n::translations(lang).no_results.to_string()];
    }

    let mut lines = Vec::new();
    for group in results.groups() {
        let detail = plural(group.items.len(), "match", "matches");
        let name = display_name(group.name.clone(), &group.subject_id);
        lines.push(format!("{} ({})", name, detail));
        for hit in &group.items {
            let url = content_url(lang, &hit.subject_id, &hit.level_id, hit.kind, &hit.item.id);
            let title = display_name(hit.item.title_in(lang), &hit.item.id);
            lines.push(format!(
                "{}{:<10} {} → {}",
                indent(1),
                hit.kind.as_str(),
                title,
                url
            ));
        }
    }
    lines
}

pub fn print_search_results(results: &SearchResults, lang: &str) {
    for line in format_search_results(results, lang) {
        println!("{}", line);
    }
}

// ============================================================================
// Show
// ============================================================================

/// Format one content page as text: title, location, markdown, solution.
pub fn format_content(content: ContentRef, lang: &str) -> Vec<String> {
    let t = i18n::translations(lang);
    let item = content.item;
    let mut lines = vec![
        display_name(item.title_in(lang), &item.id),
        format!(
            "{}{} » {} » {}",
            indent(1),
            content.subject.name_in(lang),
            content.level.name_in(lang),
            t.kind_label(content.kind)
        ),
        String::new(),
    ];

    let text = item.content_in(lang);
    if text.is_empty() {
        lines.push(t.empty_content.to_string());
    } else {
        lines.extend(text.lines().map(String::from));
    }

    if let Some(id) = item.youtube_video_id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
        lines.push(String::new());
        lines.push(format!("Video: https://www.youtube.com/embed/{id}"));
    }

    let solution = item.solution_in(lang);
    if !solution.is_empty() {
        lines.push(String::new());
        lines.push(format!("{}:", t.solution_title));
        lines.extend(solution.lines().map(|l| format!("{}{}", indent(1), l)));
    }
    lines
}

pub fn print_content(content: ContentRef, lang: &str) {
    for line in format_content(content, lang) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

/// Format generate results: one line per language, then totals.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines: Vec<String> = report
        .languages
        .iter()
        .map(|lang| format!("{} → {}index.html", lang, home_url(lang).trim_start_matches('/')))
        .collect();
    lines.push(format!(
        "Generated {}: {}, {}, {}, {}",
        plural(report.languages.len(), "language", "languages"),
        plural(report.fixed_pages, "page", "pages"),
        plural(report.subject_pages, "subject page", "subject pages"),
        plural(report.content_pages, "content page", "content pages"),
        plural(report.assets, "asset", "assets"),
    ));
    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use crate::navigate::find_content;
    use crate::pages::PageSet;
    use crate::search::search;
    use crate::test_helpers::*;

    fn sample_site() -> Site {
        let mut lvl = level(
            "math-1ac",
            vec![
                with_content(lesson("l1", "Les fractions"), &[("fr", "Une fraction.\nDeux lignes.")]),
                lesson("l2", "Les angles"),
            ],
        );
        lvl.exercises = vec![
            with_solution(exercise("e1", "Exercice fractions", Some("l1")), &[("fr", "x = 3")]),
            with_status(exercise("e2", "Brouillon", Some("l1")), "draft"),
        ];
        Site {
            tree: tree(vec![
                subject("math", &[("fr", "Mathématiques")]).with_levels(vec![lvl]),
                subject("physics", &[]),
            ]),
            pages: PageSet::default(),
            config: SiteConfig::default(),
        }
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(1000), "1000");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    #[test]
    fn entity_header_with_and_without_detail() {
        assert_eq!(entity_header(1, "Maths", Some("2 levels")), "001 Maths (2 levels)");
        assert_eq!(entity_header(3, "Maths", None), "003 Maths");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "lesson", "lessons"), "1 lesson");
        assert_eq!(plural(0, "lesson", "lessons"), "0 lessons");
        assert_eq!(plural(2, "summary", "summaries"), "2 summaries");
    }

    #[test]
    fn display_name_falls_back_to_id() {
        assert_eq!(display_name(String::new(), "physics"), "(physics)");
        assert_eq!(display_name("Physique".to_string(), "physics"), "Physique");
    }

    // =========================================================================
    // Check
    // =========================================================================

    #[test]
    fn load_output_inventory() {
        let site = sample_site();
        let report = LoadReport {
            master: Some(DocumentStatus::Loaded),
            levels: vec![
                ("math-1ac.json".to_string(), DocumentStatus::Loaded),
                (
                    "math-2ac.json".to_string(),
                    DocumentStatus::Failed("document not found: math-2ac.json".to_string()),
                ),
            ],
            pages: vec![],
        };
        let lines = format_load_output(&site, &report, "fr");
        assert_eq!(lines[0], "Subjects");
        assert_eq!(lines[1], "001 Mathématiques (1 level)");
        assert_eq!(lines[2], "    Id: math");
        assert_eq!(lines[3], "    001 math-1ac (2 lessons, 1 exercise, 0 summaries)");
        assert!(lines.contains(&"002 (physics) (no levels)".to_string()));
        assert!(lines.contains(&"    database.json: loaded".to_string()));
        assert!(lines.contains(
            &"    math-2ac.json: failed (document not found: math-2ac.json)".to_string()
        ));
        assert_eq!(lines.last().unwrap(), "2 loaded, 1 failed");
    }

    // =========================================================================
    // Search
    // =========================================================================

    #[test]
    fn search_results_lines() {
        let site = sample_site();
        let results = search(&site.tree, "fraction", "fr");
        let lines = format_search_results(&results, "fr");
        assert_eq!(lines[0], "Mathématiques (2 matches)");
        assert_eq!(
            lines[1],
            "    lessons    Les fractions → /fr/math/math-1ac/lessons/l1.html"
        );
        assert_eq!(
            lines[2],
            "    exercises  Exercice fractions → /fr/math/math-1ac/exercises/e1.html"
        );
    }

    #[test]
    fn search_results_empty_is_localized() {
        let site = sample_site();
        let results = search(&site.tree, "zzz", "ar");
        assert_eq!(format_search_results(&results, "ar"), vec!["لا توجد نتائج."]);
    }

    // =========================================================================
    // Show
    // =========================================================================

    #[test]
    fn content_lines() {
        let site = sample_site();
        let content = find_content(&site.tree, "math", "math-1ac", "exercises", "e1").unwrap();
        let lines = format_content(content, "en");
        assert_eq!(lines[0], "Exercice fractions");
        assert_eq!(lines[1], "    Mathématiques » math-1ac » Exercises");
        assert!(lines.contains(&"Content for this section will be added soon.".to_string()));
        assert!(lines.contains(&"Solution:".to_string()));
        assert_eq!(lines.last().unwrap(), "    x = 3");
    }

    #[test]
    fn content_lines_keep_markdown_lines() {
        let site = sample_site();
        let content = find_content(&site.tree, "math", "math-1ac", "lessons", "l1").unwrap();
        let lines = format_content(content, "fr");
        assert_eq!(&lines[3..], &["Une fraction.", "Deux lignes."]);
    }

    // =========================================================================
    // Build
    // =========================================================================

    #[test]
    fn generate_output_lines() {
        let report = GenerateReport {
            languages: vec!["fr".to_string(), "ar".to_string()],
            fixed_pages: 6,
            subject_pages: 4,
            content_pages: 1,
            assets: 0,
        };
        let lines = format_generate_output(&report);
        assert_eq!(lines[0], "fr → fr/index.html");
        assert_eq!(lines[1], "ar → ar/index.html");
        assert_eq!(
            lines[2],
            "Generated 2 languages: 6 pages, 4 subject pages, 1 content page, 0 assets"
        );
    }
}
