//! Joins the master document and the level documents into one tree.
//!
//! The master document lists subjects in display order, without levels.
//! Each level document is attributed to a subject by its file name (see
//! [`naming`](crate::naming)) and the levels of one subject are ordered by
//! their `id`, which encodes the curriculum order (`math-1ac` < `math-2ac`).
//!
//! Only a missing master document is fatal. A level file that could not be
//! fetched or parsed arrives as `None` and simply contributes nothing.

use crate::naming;
use crate::types::{ContentTree, Level, MasterDocument};
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, PartialEq)]
pub enum MergeError {
    /// The master document is absent, unreadable, or has no subject list.
    #[error("master document is unavailable")]
    MergeUnavailable,
}

/// Merge `master` with `(file name, level)` pairs into a [`ContentTree`].
///
/// Levels are grouped by the subject id derived from their file name and
/// assigned to the master subject with that id, sorted ascending by
/// `Level.id`. Subjects without levels get an empty sequence; levels whose
/// subject is not in the master list are dropped.
pub fn merge<I>(master: Option<MasterDocument>, levels: I) -> Result<ContentTree, MergeError>
where
    I: IntoIterator<Item = (String, Option<Level>)>,
{
    let master = master.ok_or(MergeError::MergeUnavailable)?;

    let mut by_subject: HashMap<String, Vec<Level>> = HashMap::new();
    for (file_name, level) in levels {
        let Some(level) = level else {
            continue;
        };
        by_subject
            .entry(naming::subject_id(&file_name).to_string())
            .or_default()
            .push(level);
    }
    for levels in by_subject.values_mut() {
        levels.sort_by(|a, b| a.id.cmp(&b.id));
    }

    let subjects = master
        .subjects
        .into_iter()
        .map(|mut subject| {
            subject.levels = by_subject.get(&subject.id).cloned().unwrap_or_default();
            subject
        })
        .collect::<Vec<_>>();

    for subject_id in by_subject.keys() {
        if !subjects.iter().any(|s| &s.id == subject_id) {
            debug!(subject_id = subject_id.as_str(), "level documents for a subject missing from the master list");
        }
    }

    Ok(ContentTree { subjects })
}
