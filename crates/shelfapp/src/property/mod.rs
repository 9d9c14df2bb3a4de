//! # Properties
//!
//! Everything a card shows and everything an entry is grouped by starts as a property id,
//! such as `note.status` or `file.folder`. This module covers:
//!
//! - **Ids**: [`PropertyId`], a `<namespace>.<name>` string
//! - **Values**: [`PropertyValue`], the runtime shape of a resolved property
//! - **Resolution**: [`resolve`], the fallback chain that turns an id into a value
//!
//! ## Namespaces
//!
//! | Namespace | Source |
//! |-----------|--------|
//! | `note`    | Frontmatter fields of the document |
//! | `file`    | File facts (name, folder, mtime, ...) |
//! | `formula` | Host-computed values |
//!
//! Other namespaces are kept as-is. The host may still understand them; the resolver's own
//! fallbacks do not.

pub mod resolve;
mod value;

pub use resolve::{display_value, group_key, resolve_value, Purpose};
pub use value::{PropertyValue, NONE_KEY};

use serde::{Deserialize, Serialize};
use std::fmt;

/// The id of the parent-folder property, special-cased by the resolver.
pub const FILE_FOLDER: &str = "file.folder";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Namespace {
    Note,
    File,
    Formula,
    Other(String),
}

/// A namespaced property identifier.
///
/// Ids are stored verbatim; malformed ids (no dot) are representable and simply resolve to
/// nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct PropertyId(String);

impl PropertyId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn namespace(&self) -> Namespace {
        match self.0.split_once('.').map(|(ns, _)| ns) {
            Some("note") => Namespace::Note,
            Some("file") => Namespace::File,
            Some("formula") => Namespace::Formula,
            Some(other) => Namespace::Other(other.to_string()),
            None => Namespace::Other(String::new()),
        }
    }

    /// The part after the namespace, or the whole id when there is no dot.
    pub fn name(&self) -> &str {
        self.0.split_once('.').map_or(&self.0, |(_, name)| name)
    }

    /// The frontmatter field this id reads, for `note.*` ids.
    pub fn note_field(&self) -> Option<&str> {
        self.0.strip_prefix("note.").filter(|field| !field.is_empty())
    }

    pub fn is_folder(&self) -> bool {
        self.0 == FILE_FOLDER
    }
}

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for PropertyId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for PropertyId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<PropertyId> for String {
    fn from(id: PropertyId) -> Self {
        id.0
    }
}

impl std::str::FromStr for PropertyId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}
