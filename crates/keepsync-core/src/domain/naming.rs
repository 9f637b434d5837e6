//! Conflict file naming convention
//!
//! A "keep both" resolution moves the local entry aside under a
//! conflict-marked name. The convention implemented here is:
//!
//! 1. Strip any conflict tag the name already carries, so a conflict copy
//!    of a conflict copy does not pile up tags. Recognized tags are
//!    `" (conflicted copy ...)"`, `"_conflict-..."` and our own
//!    `"_conflict"` / `"_conflict_N"` suffix.
//! 2. Append the marker (`_conflict` by default) to the file stem.
//!
//! The result is returned as a [`ConflictBaseName`]: the marked stem with
//! its directory, plus the final extension, ready for a numeric
//! disambiguator to be spliced in between.

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::ports::naming::IConflictNaming;

/// Marker appended to the file stem by [`DefaultConflictNaming`]
pub const DEFAULT_CONFLICT_MARKER: &str = "_conflict";

const CONFLICTED_COPY_TAG: &str = "(conflicted copy";
const LEGACY_CONFLICT_TAG: &str = "_conflict-";

/// A conflict-marked name split around the spot where `_N` goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictBaseName {
    /// Marked stem including its parent directory, e.g. `/a/report_conflict`
    pub stem: PathBuf,
    /// Final extension including the dot, e.g. `.txt`; empty when there is none
    pub extension: OsString,
}

impl ConflictBaseName {
    pub fn new(stem: impl Into<PathBuf>, extension: impl Into<OsString>) -> Self {
        Self {
            stem: stem.into(),
            extension: extension.into(),
        }
    }

    /// The candidate path for disambiguator `n`: `<stem>_<n><extension>`
    pub fn candidate(&self, n: u32) -> PathBuf {
        let mut name = self.stem.clone().into_os_string();
        name.push(format!("_{n}"));
        name.push(&self.extension);
        PathBuf::from(name)
    }

    /// Human-readable pattern, e.g. `/a/report_conflict_{N}.txt`
    pub fn pattern(&self) -> String {
        format!(
            "{}_{{N}}{}",
            self.stem.display(),
            self.extension.to_string_lossy()
        )
    }
}

/// The built-in naming convention
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultConflictNaming {
    marker: String,
}

impl DefaultConflictNaming {
    /// Creates a convention using a custom marker instead of `_conflict`
    pub fn with_marker(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Removes our own marker (optionally followed by `_N`) from the end of a stem
    fn strip_own_marker<'a>(&self, stem: &'a str) -> &'a str {
        if self.marker.is_empty() {
            return stem;
        }

        let without_digits = stem.trim_end_matches(|c: char| c.is_ascii_digit());
        if without_digits.len() < stem.len() {
            if let Some(base) = without_digits
                .strip_suffix('_')
                .and_then(|s| s.strip_suffix(self.marker.as_str()))
            {
                return base;
            }
        }

        stem.strip_suffix(self.marker.as_str()).unwrap_or(stem)
    }
}

impl Default for DefaultConflictNaming {
    fn default() -> Self {
        Self::with_marker(DEFAULT_CONFLICT_MARKER)
    }
}

impl IConflictNaming for DefaultConflictNaming {
    fn conflict_base_name(&self, path: &Path) -> ConflictBaseName {
        let parent = path.parent().unwrap_or_else(|| Path::new(""));
        let Some(file_name) = path.file_name() else {
            // "/" or "..": nothing to split, mark the whole path
            let mut stem = path.as_os_str().to_os_string();
            stem.push(&self.marker);
            return ConflictBaseName::new(stem, OsString::new());
        };

        let untagged: OsString = match file_name.to_str() {
            Some(name) => strip_conflict_tag(name).into(),
            None => file_name.to_os_string(),
        };

        let untagged_path = Path::new(&untagged);
        let stem = untagged_path.file_stem().unwrap_or(untagged.as_os_str());
        let extension = match untagged_path.extension() {
            Some(ext) => {
                let mut dotted = OsString::from(".");
                dotted.push(ext);
                dotted
            }
            None => OsString::new(),
        };

        let mut marked: OsString = match stem.to_str() {
            Some(s) => OsStr::new(self.strip_own_marker(s)).to_os_string(),
            None => stem.to_os_string(),
        };
        marked.push(&self.marker);

        ConflictBaseName::new(parent.join(marked), extension)
    }
}

/// Strips the rightmost `" (conflicted copy ...)"` or `"_conflict-..."` tag
///
/// Names without a tag are returned unchanged.
pub fn strip_conflict_tag(name: &str) -> String {
    let legacy_start = name.rfind(LEGACY_CONFLICT_TAG);
    let copy_start = name.rfind(CONFLICTED_COPY_TAG).map(|i| {
        // A single space before the tag belongs to it
        if i > 0 && name[..i].ends_with(' ') {
            i - 1
        } else {
            i
        }
    });

    let tag_start = match (legacy_start, copy_start) {
        (None, None) => return name.to_string(),
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (Some(a), Some(b)) => a.max(b),
    };

    let mut tag_end = name.len();
    if let Some(dot) = name.rfind('.') {
        if dot > tag_start {
            tag_end = dot;
        }
    }
    if Some(tag_start) == copy_start {
        if let Some(paren) = name[tag_start..].find(')') {
            tag_end = tag_start + paren + 1;
        }
    }

    format!("{}{}", &name[..tag_start], &name[tag_end..])
}
