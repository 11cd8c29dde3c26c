//! Per-language page documents: `home.json`, `about.json`, `privacy.json`.
//!
//! A page document maps a language code to that language's fields:
//!
//! ```json
//! {
//!   "fr": { "meta_description": "...", "title": "À propos", "body": "## Qui sommes-nous" },
//!   "ar": { "title": "من نحن" }
//! }
//! ```
//!
//! The field set is open; the generator renders `title` and `subtitle` as
//! text and `body` as markdown. Non-string field values are ignored.
//!
//! ## Resolution
//!
//! - **Fields**: the whole entry for the requested language, else the French
//!   entry, else the English one. Fields are never mixed across languages.
//! - **Meta description**: requested language only, never a fallback.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Languages tried, in order, when a page has no entry for the requested one.
const PAGE_FALLBACKS: [&str; 2] = ["fr", "en"];

/// One language's fields of a page document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageContent {
    fields: BTreeMap<String, Value>,
}

impl PageContent {
    /// A string field, `None` when absent, blank or not a string.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
    }

    pub fn title(&self) -> Option<&str> {
        self.field("title")
    }

    pub fn subtitle(&self) -> Option<&str> {
        self.field("subtitle")
    }

    /// Markdown body.
    pub fn body(&self) -> Option<&str> {
        self.field("body")
    }
}

/// A page document. Unreadable documents load as the empty document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageDocument {
    languages: BTreeMap<String, PageContent>,
}

impl PageDocument {
    /// The entry to render for `lang`: `lang`, then `fr`, then `en`.
    pub fn content(&self, lang: &str) -> Option<&PageContent> {
        std::iter::once(lang)
            .chain(PAGE_FALLBACKS)
            .find_map(|l| self.languages.get(l))
    }

    /// `meta_description` of the requested language only.
    pub fn meta_description(&self, lang: &str) -> Option<&str> {
        self.languages
            .get(lang)
            .and_then(|c| c.field("meta_description"))
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Languages with an entry, sorted.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }
}

/// The three fixed pages backed by a page document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageKind {
    Home,
    About,
    Privacy,
}

impl PageKind {
    pub const ALL: [PageKind; 3] = [PageKind::Home, PageKind::About, PageKind::Privacy];

    /// Output file name inside a language directory.
    pub fn output_file(self) -> &'static str {
        match self {
            PageKind::Home => "index.html",
            PageKind::About => "about.html",
            PageKind::Privacy => "privacy.html",
        }
    }
}

/// Page documents of the three fixed pages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageSet {
    pub home: PageDocument,
    pub about: PageDocument,
    pub privacy: PageDocument,
}

impl PageSet {
    pub fn get(&self, kind: PageKind) -> &PageDocument {
        match kind {
            PageKind::Home => &self.home,
            PageKind::About => &self.about,
            PageKind::Privacy => &self.privacy,
        }
    }
}
