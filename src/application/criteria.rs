//! Criteria over filesystem entries and the stage syntax used on the command line.
//!
//! A stage is either `*` (wildcard) or a comma-separated list of `key=value`
//! conditions that must all hold:
//!
//! - `kind=file|dir|symlink`
//! - `name=<regex>` (matched against the entry name)
//! - `ext=<extension>` (without the dot)
//! - `hidden=true|false`

use std::str::FromStr;

use regex::Regex;

use crate::application::entry::{EntryKind, FsEntry};
use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::SearchCriteria;

/// Builder for criteria over `FsEntry`.
#[derive(Debug, Clone, Default)]
pub struct EntryCriteria {
    kind: Option<EntryKind>,
    name: Option<Regex>,
    extension: Option<String>,
    hidden: Option<bool>,
}

impl EntryCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: EntryKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn name(mut self, pattern: Regex) -> Self {
        self.name = Some(pattern);
        self
    }

    pub fn extension(mut self, ext: impl Into<String>) -> Self {
        self.extension = Some(ext.into());
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = Some(hidden);
        self
    }

    /// Turn the builder into criteria, one `and`-ed condition per field set;
    /// no conditions yields a wildcard.
    pub fn build(self) -> SearchCriteria<FsEntry> {
        let mut criteria = SearchCriteria::Wildcard;
        if let Some(kind) = self.kind {
            criteria = criteria.and(SearchCriteria::new(move |e: &FsEntry| e.kind == kind));
        }
        if let Some(re) = self.name {
            criteria = criteria.and(SearchCriteria::new(move |e: &FsEntry| re.is_match(&e.name)));
        }
        if let Some(ext) = self.extension {
            criteria = criteria.and(SearchCriteria::new(move |e: &FsEntry| {
                e.extension() == Some(ext.as_str())
            }));
        }
        if let Some(hidden) = self.hidden {
            criteria = criteria.and(SearchCriteria::new(move |e: &FsEntry| e.is_hidden() == hidden));
        }
        criteria
    }
}

/// Matches directories.
pub fn is_dir_search() -> SearchCriteria<FsEntry> {
    EntryCriteria::new().kind(EntryKind::Dir).build()
}

/// Matches regular files.
pub fn is_file_search() -> SearchCriteria<FsEntry> {
    EntryCriteria::new().kind(EntryKind::File).build()
}

fn parse_kind(spec: &str, value: &str) -> ApplicationResult<EntryKind> {
    match value {
        "file" | "f" => Ok(EntryKind::File),
        "dir" | "d" => Ok(EntryKind::Dir),
        "symlink" | "link" | "l" => Ok(EntryKind::Symlink),
        other => Err(ApplicationError::invalid_criteria(
            spec,
            format!("unknown kind '{}'", other),
        )),
    }
}

fn parse_bool(spec: &str, value: &str) -> ApplicationResult<bool> {
    value
        .parse::<bool>()
        .map_err(|_| ApplicationError::invalid_criteria(spec, format!("expected true or false, got '{}'", value)))
}

impl FromStr for EntryCriteria {
    type Err = ApplicationError;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let trimmed = spec.trim();
        if trimmed.is_empty() {
            return Err(ApplicationError::invalid_criteria(spec, "empty stage"));
        }
        let mut criteria = EntryCriteria::new();
        if trimmed == "*" {
            return Ok(criteria);
        }

        for condition in trimmed.split(',') {
            let (key, value) = condition.split_once('=').ok_or_else(|| {
                ApplicationError::invalid_criteria(spec, format!("expected key=value, got '{}'", condition))
            })?;
            let (key, value) = (key.trim(), value.trim());
            if value.is_empty() {
                return Err(ApplicationError::invalid_criteria(
                    spec,
                    format!("missing value for '{}'", key),
                ));
            }

            criteria = match key {
                "kind" => criteria.kind(parse_kind(spec, value)?),
                "name" => {
                    let re = Regex::new(value)
                        .map_err(|e| ApplicationError::invalid_criteria(spec, e.to_string()))?;
                    criteria.name(re)
                }
                "ext" => criteria.extension(value.trim_start_matches('.')),
                "hidden" => criteria.hidden(parse_bool(spec, value)?),
                other => {
                    return Err(ApplicationError::invalid_criteria(
                        spec,
                        format!("unknown key '{}'", other),
                    ))
                }
            };
        }
        Ok(criteria)
    }
}

/// Parse one stage into criteria.
pub fn parse_stage(spec: &str) -> ApplicationResult<SearchCriteria<FsEntry>> {
    spec.parse::<EntryCriteria>().map(EntryCriteria::build)
}
