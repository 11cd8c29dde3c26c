//! # Simple Edu
//!
//! A static site generator for multilingual course content. Subjects, levels
//! and their lessons, exercises and summaries live in plain JSON documents;
//! every configured language gets its own static HTML tree.
//!
//! # Architecture: Load, then Render or Search
//!
//! ```text
//! 1. Load      content/*.json  →  Site      (fetch in parallel, merge into one tree)
//! 2. Generate  Site            →  dist/     (static HTML per language)
//!    Search    Site + query    →  matches   (grouped by subject)
//! ```
//!
//! The merged [`types::ContentTree`] is read-only after loading. Every page
//! and every search resolves text for one language through [`localize`],
//! which applies the fallback chain (requested language, French, English)
//! and substitutes `%%IMAGE_<n>%%` placeholders.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Content tree types deserialized from the JSON documents |
//! | [`localize`] | Per-language text resolution and image placeholder substitution |
//! | [`naming`] | `<subject>-<level>.json` file name convention, URL-safe ids |
//! | [`merge`] | Joins the master subject list with the level documents |
//! | [`navigate`] | Lookups in the merged tree, visibility filters |
//! | [`search`] | Normalized substring search with Arabic folding |
//! | [`load`] | Document source seam, parallel fetch, [`load::Site`] assembly |
//! | [`pages`] | Home, about and privacy page documents |
//! | [`i18n`] | Fixed UI strings and language toggle order |
//! | [`markdown`] | Markdown rendering and meta-description snippets |
//! | [`generate`] | Renders the static site with Maud |
//! | [`config`] | `config.toml` loading, validation, and theme CSS |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Only the Master Document Is Required
//!
//! A missing or malformed level document drops that level; a missing page
//! document renders an empty page. Only the master subject list is fatal,
//! because without it there is nothing to attach levels to.
//!
//! ## Visibility Is a Status, Not a Deletion
//!
//! Items carry an optional `status`. Only `verified` (or no status at all) is
//! visible: hidden items get no page, no link and no search hit, but stay in
//! the tree so direct lookups still find them.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system. Templates are checked by the compiler and all
//! interpolation is escaped; only rendered markdown is inserted pre-escaped.

pub mod config;
pub mod generate;
pub mod i18n;
pub mod load;
pub mod localize;
pub mod markdown;
pub mod merge;
pub mod naming;
pub mod navigate;
pub mod output;
pub mod pages;
pub mod search;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
