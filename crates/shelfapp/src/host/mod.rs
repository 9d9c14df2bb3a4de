//! # Host Interface
//!
//! Shelf does not own documents. A host (an editor, a vault on disk, a database) owns them
//! and exposes each one through the [`Entry`] trait. The core only ever reads through it.
//!
//! The host may also have partitioned its entries already ("native" grouping, e.g. a table
//! grouped by a column). That partition arrives as a list of [`NativeGroup`]s and is always
//! the outermost grouping level. A host with no opinion passes a single keyless group.
//!
//! ## Bundled Hosts
//!
//! - [`memory::MemoryEntry`]: entries built in code, for embedding and tests
//! - [`fs::VaultEntry`]: Markdown files with YAML frontmatter, loaded from a directory

pub mod fs;
pub mod memory;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::property::{PropertyId, PropertyValue};

/// Structured front-of-document data, read-only to the core.
pub type Frontmatter = serde_json::Map<String, serde_json::Value>;

/// One document, as the host sees it.
pub trait Entry {
    /// Stable identifier, usually a vault-relative path.
    fn path(&self) -> &str;

    /// Display name (file name without extension).
    fn name(&self) -> &str;

    fn modified(&self) -> DateTime<Utc>;

    /// Name of the parent folder, `None` at the root.
    fn folder(&self) -> Option<&str>;

    /// Primary property accessor.
    ///
    /// Errors for ids the host does not understand; the resolver treats that as "no value".
    fn value(&self, id: &PropertyId) -> Result<Option<PropertyValue>>;

    fn frontmatter(&self) -> &Frontmatter;

    /// Targets of embedded files (`![[cover.png]]`), in document order.
    fn embeds(&self) -> &[String];

    /// Inline `#tag` annotations, in document order, as written (with or without `#`).
    fn inline_tags(&self) -> &[String];
}

/// A partition the host already applied.
#[derive(Debug)]
pub struct NativeGroup<'a, E: ?Sized> {
    /// Display value of the group key; `None` when the host's group has no explicit key.
    pub key: Option<String>,
    pub entries: Vec<&'a E>,
}

impl<'a, E: ?Sized> NativeGroup<'a, E> {
    pub fn keyed(key: impl Into<String>, entries: Vec<&'a E>) -> Self {
        Self {
            key: Some(key.into()),
            entries,
        }
    }

    /// A single bucket with no key, for hosts without native grouping.
    pub fn ungrouped(entries: Vec<&'a E>) -> Self {
        Self { key: None, entries }
    }

    pub fn has_key(&self) -> bool {
        self.key.is_some()
    }
}

impl<'a, E: ?Sized> Clone for NativeGroup<'a, E> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            entries: self.entries.clone(),
        }
    }
}

/// Wraps a flat slice of entries as one keyless native group.
pub fn ungrouped<E>(entries: &[E]) -> Vec<NativeGroup<'_, E>> {
    vec![NativeGroup::ungrouped(entries.iter().collect())]
}
