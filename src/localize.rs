//! Per-language text resolution.
//!
//! Every user-visible text in the content documents is a [`LocalizedText`]:
//! either one string for all languages or a mapping from language code to
//! string. Resolution picks the first non-empty value in this order:
//!
//! ```text
//! requested language → fr → en → ""
//! ```
//!
//! ## Rich fields and image placeholders
//!
//! `content` and `solution` are markdown and may carry `%%IMAGE_<n>%%`
//! placeholders. Two schema generations exist in the wild:
//!
//! - **Modern**: the item has an `images` map from placeholder token to
//!   `{filename, prompt}`. Each placeholder becomes `![prompt](filename)`.
//! - **Legacy**: only the French text holds real `![..](..)` tags, and the
//!   translations carry placeholders in the same positions. The French tags
//!   are injected into the translation in order of appearance.
//!
//! The modern path wins whenever the item has images. Placeholders that
//! cannot be resolved by either path are removed, never emitted literally.
//!
//! Titles and names are plain fields: no substitution happens.
//!
//! Resolution never fails. Unexpected shapes resolve to `""` and leave a
//! `debug` trace.

use crate::types::{ImageMap, ImageRef, Item, Level, LocalizedText, Subject, value_kind};
use regex::{Captures, Regex};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::LazyLock;
use tracing::debug;

/// Languages tried after the requested one, in order.
pub const FALLBACK_LANGUAGES: [&str; 2] = ["fr", "en"];

/// The language legacy content was authored in; its images are canonical.
const SOURCE_LANGUAGE: &str = "fr";

const DEFAULT_IMAGE_ALT: &str = "image";

static PLACEHOLDER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"%%IMAGE_\d+%%").expect("valid placeholder regex"));
static MARKDOWN_IMAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"!\[.*?\]\(.*?\)").expect("valid markdown image regex"));

/// Resolve a plain field (title, name) for `lang`.
pub fn resolve(field: Option<&LocalizedText>, lang: &str) -> String {
    match field {
        None => String::new(),
        Some(LocalizedText::Plain(text)) => text.clone(),
        Some(LocalizedText::PerLanguage(map)) => select(map, lang).unwrap_or_default().to_string(),
        Some(LocalizedText::Malformed(value)) => {
            debug!(kind = value_kind(value), "localized field has unexpected shape");
            String::new()
        }
    }
}

/// Resolve a rich markdown field (content, solution) for `lang`, substituting
/// image placeholders from `images` or, failing that, from the French text.
pub fn resolve_rich(field: Option<&LocalizedText>, lang: &str, images: &ImageMap) -> String {
    let Some(LocalizedText::PerLanguage(map)) = field else {
        return strip_placeholders(&resolve(field, lang));
    };
    let Some(text) = select(map, lang) else {
        return String::new();
    };

    if !images.is_empty() {
        return substitute_images(text, images);
    }

    let french = map
        .get(SOURCE_LANGUAGE)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty());
    match french {
        Some(french) if lang != SOURCE_LANGUAGE => {
            substitute_positional(text, &markdown_images(french))
        }
        _ => strip_placeholders(text),
    }
}

/// Pick the first non-empty value along the fallback chain.
///
/// Returns `None` when nothing is available or the chosen value is not a
/// string.
fn select<'a>(map: &'a BTreeMap<String, Value>, lang: &str) -> Option<&'a str> {
    let value = std::iter::once(lang)
        .chain(FALLBACK_LANGUAGES)
        .filter_map(|code| map.get(code))
        .find(|value| !is_blank(value))?;
    match value {
        Value::String(text) => Some(text),
        other => {
            debug!(
                lang,
                kind = value_kind(other),
                "localized value is not a string"
            );
            None
        }
    }
}

/// JSON values that count as "missing" when walking the fallback chain.
fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Replace each placeholder with the markdown tag of its image entry.
/// Entries without a filename, and unknown placeholders, are dropped.
pub fn substitute_images(text: &str, images: &ImageMap) -> String {
    PLACEHOLDER_RE
        .replace_all(text, |caps: &Captures| {
            images
                .get(&caps[0])
                .and_then(ImageRef::to_markdown)
                .unwrap_or_default()
        })
        .into_owned()
}

/// Replace placeholders, in order, with `tags`; extra placeholders are dropped.
pub fn substitute_positional(text: &str, tags: &[&str]) -> String {
    let mut remaining = tags.iter();
    PLACEHOLDER_RE
        .replace_all(text, |_: &Captures| {
            remaining.next().copied().unwrap_or_default()
        })
        .into_owned()
}

/// Every full markdown image tag in `text`, in order of appearance.
pub fn markdown_images(text: &str) -> Vec<&str> {
    MARKDOWN_IMAGE_RE.find_iter(text).map(|m| m.as_str()).collect()
}

pub fn strip_placeholders(text: &str) -> String {
    PLACEHOLDER_RE.replace_all(text, "").into_owned()
}

impl ImageRef {
    /// `![prompt](filename)`, or `None` while the image is not uploaded yet.
    pub fn to_markdown(&self) -> Option<String> {
        let filename = self.filename.as_deref().filter(|f| !f.is_empty())?;
        let alt = self
            .prompt
            .as_deref()
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_IMAGE_ALT);
        Some(format!("![{alt}]({filename})"))
    }
}

impl Item {
    pub fn title_in(&self, lang: &str) -> String {
        resolve(self.title.as_ref(), lang)
    }

    pub fn content_in(&self, lang: &str) -> String {
        resolve_rich(self.content.as_ref(), lang, &self.images)
    }

    pub fn solution_in(&self, lang: &str) -> String {
        resolve_rich(self.solution.as_ref(), lang, &self.images)
    }
}

impl Level {
    pub fn name_in(&self, lang: &str) -> String {
        resolve(self.name.as_ref(), lang)
    }
}

impl Subject {
    pub fn name_in(&self, lang: &str) -> String {
        resolve(self.name.as_ref(), lang)
    }
}
