//! Centralized filename parsing for the `<subject>-<level>.json` convention.
//!
//! Level documents are attributed to subjects purely by name: the subject id
//! is the token before the first dash of the file name.
//!
//! - `math-1ac.json` → subject `math`, level tag `1ac`
//! - `physics-2ac.json` → subject `physics`, level tag `2ac`
//! - `science.json` → subject `science.json`, no level tag (no dash)
//!
//! Directory components are ignored, so `levels/math-1ac.json` parses the
//! same as `math-1ac.json`.

/// Result of parsing a level file name like `math-1ac.json`.
#[derive(Debug, Clone, PartialEq)]
pub struct LevelFileName<'a> {
    /// Token before the first dash (whole file name if there is none).
    pub subject_id: &'a str,
    /// Remainder after the first dash, extension stripped. `None` without a dash.
    pub level_tag: Option<&'a str>,
}

/// Parse a level file name following the `<subject>-<level>.json` convention.
pub fn parse_level_file_name(path: &str) -> LevelFileName<'_> {
    let file_name = base_name(path);
    match file_name.split_once('-') {
        Some((subject_id, rest)) => LevelFileName {
            subject_id,
            level_tag: Some(rest.strip_suffix(".json").unwrap_or(rest)),
        },
        None => LevelFileName {
            subject_id: file_name,
            level_tag: None,
        },
    }
}

/// The owning subject id of a level file.
pub fn subject_id(path: &str) -> &str {
    parse_level_file_name(path).subject_id
}

/// Whether a file name looks like a level document: a dashed `.json` file.
pub fn is_level_file(path: &str) -> bool {
    let file_name = base_name(path);
    file_name.ends_with(".json") && file_name.contains('-') && !file_name.starts_with('.')
}

/// Make an id usable as a single URL path segment and file name.
///
/// ASCII alphanumerics and `-` pass through, `_` is doubled, and every other
/// byte becomes `_XX` (uppercase hex). The mapping is injective, so distinct
/// ids never share an output file. Empty ids map to `_`.
pub fn path_segment(id: &str) -> String {
    if id.is_empty() {
        return "_".to_string();
    }
    let mut out = String::with_capacity(id.len());
    for byte in id.bytes() {
        match byte {
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'-' => out.push(byte as char),
            b'_' => out.push_str("__"),
            other => out.push_str(&format!("_{other:02X}")),
        }
    }
    out
}

fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}
