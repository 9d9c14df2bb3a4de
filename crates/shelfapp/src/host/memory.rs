use chrono::{DateTime, Utc};
use serde_json::Value;

use super::{Entry, Frontmatter};
use crate::error::{Result, ShelfError};
use crate::property::{Namespace, PropertyId, PropertyValue};

/// An entry built in code.
///
/// The accessor answers `note.*` from the frontmatter and `file.name`, `file.path`,
/// `file.folder`; everything else is an unknown property. `failing_accessor()` makes every
/// call error, which exercises the resolver's fallbacks. `modified` starts at the Unix epoch
/// until set with `with_modified`.
#[derive(Debug, Clone)]
pub struct MemoryEntry {
    path: String,
    name: String,
    folder: Option<String>,
    modified: DateTime<Utc>,
    frontmatter: Frontmatter,
    embeds: Vec<String>,
    inline_tags: Vec<String>,
    accessor_fails: bool,
}

impl MemoryEntry {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            path: format!("{}.md", name),
            name,
            folder: None,
            modified: DateTime::<Utc>::default(),
            frontmatter: Frontmatter::new(),
            embeds: Vec::new(),
            inline_tags: Vec::new(),
            accessor_fails: false,
        }
    }

    pub fn with_field(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.frontmatter.insert(key.to_string(), value.into());
        self
    }

    pub fn with_folder(mut self, folder: &str) -> Self {
        self.folder = Some(folder.to_string());
        self.path = format!("{}/{}.md", folder, self.name);
        self
    }

    pub fn with_modified(mut self, modified: DateTime<Utc>) -> Self {
        self.modified = modified;
        self
    }

    pub fn with_embed(mut self, target: &str) -> Self {
        self.embeds.push(target.to_string());
        self
    }

    pub fn with_inline_tags(mut self, tags: &[&str]) -> Self {
        self.inline_tags.extend(tags.iter().map(|t| t.to_string()));
        self
    }

    pub fn failing_accessor(mut self) -> Self {
        self.accessor_fails = true;
        self
    }
}

impl Entry for MemoryEntry {
    fn path(&self) -> &str {
        &self.path
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    fn folder(&self) -> Option<&str> {
        self.folder.as_deref()
    }

    fn value(&self, id: &PropertyId) -> Result<Option<PropertyValue>> {
        if self.accessor_fails {
            return Err(ShelfError::UnknownProperty(id.to_string()));
        }
        match (id.namespace(), id.name()) {
            (Namespace::Note, field) => Ok(self.frontmatter.get(field).map(PropertyValue::from)),
            (Namespace::File, "name") => Ok(Some(PropertyValue::text(&self.name))),
            (Namespace::File, "path") => Ok(Some(PropertyValue::text(&self.path))),
            (Namespace::File, "folder") => Ok(self.folder.as_deref().map(PropertyValue::text)),
            _ => Err(ShelfError::UnknownProperty(id.to_string())),
        }
    }

    fn frontmatter(&self) -> &Frontmatter {
        &self.frontmatter
    }

    fn embeds(&self) -> &[String] {
        &self.embeds
    }

    fn inline_tags(&self) -> &[String] {
        &self.inline_tags
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use chrono::{Duration, TimeZone};

    /// Fixed clock so relative dates in assertions do not drift.
    pub fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap()
    }

    /// Entries named `Note 1`, `Note 2`, ... with the given `status` field values.
    pub fn with_statuses(statuses: &[&str]) -> Vec<MemoryEntry> {
        statuses
            .iter()
            .enumerate()
            .map(|(i, status)| {
                MemoryEntry::new(format!("Note {}", i + 1))
                    .with_field("status", *status)
                    .with_modified(fixed_now() - Duration::hours(i as i64 + 1))
            })
            .collect()
    }
}
