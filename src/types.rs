//! Content tree types shared by every stage.
//!
//! These mirror the JSON documents the site is built from. The master
//! document (`database.json`) deserializes into [`MasterDocument`]; each level
//! file (`math-1ac.json`, ...) deserializes into a [`Level`]. The merge step
//! joins both into a [`ContentTree`], which is read-only from then on.
//!
//! Optional fields always take their documented default when absent or
//! `null`: missing collections are empty, a missing `status` means verified,
//! a missing `images` map is empty.
//!
//! Odd values degrade per field, never per document: a non-string optional
//! field reads as absent, a numeric id keeps its decimal text, and a
//! collection entry that is not an object is skipped. Each case leaves a
//! `debug` trace.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// A text field that is either language-independent or per-language.
///
/// Any other JSON shape (number, array, boolean) is kept as `Malformed` so a
/// single odd field never fails the whole document; it resolves to `""`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LocalizedText {
    Plain(String),
    PerLanguage(BTreeMap<String, Value>),
    Malformed(Value),
}

impl LocalizedText {
    pub fn plain(text: impl Into<String>) -> Self {
        Self::Plain(text.into())
    }

    /// Build a per-language mapping from `(language, text)` pairs.
    pub fn per_language(pairs: &[(&str, &str)]) -> Self {
        Self::PerLanguage(
            pairs
                .iter()
                .map(|(lang, text)| (lang.to_string(), Value::String(text.to_string())))
                .collect(),
        )
    }
}

/// Review status of an item. Absence is treated as verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Verified,
    Unverified,
    /// Any other workflow state (`draft`, `review`, ...). Never visible.
    Other(String),
}

impl From<String> for Status {
    fn from(value: String) -> Self {
        match value.as_str() {
            "verified" => Status::Verified,
            "unverified" => Status::Unverified,
            _ => Status::Other(value),
        }
    }
}

impl From<Status> for String {
    fn from(value: Status) -> Self {
        match value {
            Status::Verified => "verified".to_string(),
            Status::Unverified => "unverified".to_string(),
            Status::Other(s) => s,
        }
    }
}

/// An uploaded image referenced by a `%%IMAGE_<n>%%` placeholder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub filename: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub prompt: Option<String>,
}

/// Placeholder token (`%%IMAGE_1%%`) → image.
pub type ImageMap = BTreeMap<String, ImageRef>;

/// A lesson, exercise or summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<LocalizedText>,
    /// Markdown, may embed image placeholders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<LocalizedText>,
    /// Markdown. Searched for exercises only; shown on any content page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<LocalizedText>,
    #[serde(
        default,
        deserialize_with = "lenient_status",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<Status>,
    /// Lesson this exercise or summary belongs to.
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub lesson_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_images",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub images: ImageMap,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub youtube_video_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub background_image: Option<String>,
}

impl Item {
    /// Visible iff verified or carrying no status at all.
    pub fn is_visible(&self) -> bool {
        matches!(self.status, None | Some(Status::Verified))
    }
}

/// The three item collections of a level, in their fixed traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Lessons,
    Exercises,
    Summaries,
}

impl ItemKind {
    pub const ALL: [ItemKind; 3] = [ItemKind::Lessons, ItemKind::Exercises, ItemKind::Summaries];

    pub fn as_str(self) -> &'static str {
        match self {
            ItemKind::Lessons => "lessons",
            ItemKind::Exercises => "exercises",
            ItemKind::Summaries => "summaries",
        }
    }

    /// Parse the `type` URL parameter. Unknown values are `None`.
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A grade/year grouping inside a subject. One level file holds one level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<LocalizedText>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub lessons: Vec<Item>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub exercises: Vec<Item>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub summaries: Vec<Item>,
}

impl Level {
    pub fn items(&self, kind: ItemKind) -> &[Item] {
        match kind {
            ItemKind::Lessons => &self.lessons,
            ItemKind::Exercises => &self.exercises,
            ItemKind::Summaries => &self.summaries,
        }
    }
}

/// A top-level curriculum area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<LocalizedText>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub background_image: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub primary_color: Option<String>,
    /// Filled in by the merge step; the master document leaves it empty.
    #[serde(default, deserialize_with = "null_as_default")]
    pub levels: Vec<Level>,
}

/// `database.json`: the ordered subject list without levels.
///
/// `subjects` is required and must be an array; entries that are not
/// subject objects are skipped.
#[derive(Debug, Clone, Deserialize)]
pub struct MasterDocument {
    #[serde(deserialize_with = "lenient_subjects")]
    pub subjects: Vec<Subject>,
}

/// The merged, read-only document tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContentTree {
    pub subjects: Vec<Subject>,
}

/// Treat an explicit JSON `null` like an absent field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Name of a JSON value's type, for diagnostics.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Optional text: anything but a string reads as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => Some(text),
        Value::Null => None,
        other => {
            debug!(kind = value_kind(&other), "ignoring non-string field");
            None
        }
    })
}

/// Ids: numbers keep their decimal text, other shapes read as `""`.
fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(id) => id,
        Value::Number(n) => n.to_string(),
        other => {
            debug!(kind = value_kind(&other), "ignoring non-string id");
            String::new()
        }
    })
}

/// A present status that is not a string is some state other than
/// `verified`, so the item stays hidden.
fn lenient_status<'de, D>(deserializer: D) -> Result<Option<Status>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(status) => Some(Status::from(status)),
        other => {
            debug!(kind = value_kind(&other), "non-string status");
            Some(Status::Other(other.to_string()))
        }
    })
}

fn lenient_images<'de, D>(deserializer: D) -> Result<ImageMap, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = match Value::deserialize(deserializer)? {
        Value::Object(entries) => entries,
        Value::Null => return Ok(ImageMap::new()),
        other => {
            debug!(kind = value_kind(&other), "ignoring non-object images map");
            return Ok(ImageMap::new());
        }
    };
    Ok(entries
        .into_iter()
        .filter_map(|(token, entry)| {
            serde_json::from_value::<ImageRef>(entry)
                .inspect_err(|e| debug!(token = token.as_str(), error = %e, "skipping image entry"))
                .ok()
                .map(|image| (token, image))
        })
        .collect())
}

/// Keep the entries of a JSON array that deserialize as `T`.
fn lenient_entries<T: serde::de::DeserializeOwned>(entries: Vec<Value>, what: &str) -> Vec<T> {
    entries
        .into_iter()
        .filter_map(|entry| {
            serde_json::from_value(entry)
                .inspect_err(|e| debug!(what, error = %e, "skipping malformed entry"))
                .ok()
        })
        .collect()
}

/// Item collections: `null` or a non-array is empty.
fn lenient_items<'de, D>(deserializer: D) -> Result<Vec<Item>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(entries) => lenient_entries(entries, "item"),
        Value::Null => Vec::new(),
        other => {
            debug!(kind = value_kind(&other), "ignoring non-array item collection");
            Vec::new()
        }
    })
}

fn lenient_subjects<'de, D>(deserializer: D) -> Result<Vec<Subject>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Vec::<Value>::deserialize(deserializer)?;
    Ok(lenient_entries(entries, "subject"))
}
