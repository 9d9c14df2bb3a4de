//! # Property Resolution
//!
//! Hosts are inconsistent about what their accessor can answer. A `note.*` id may error
//! because the host's index is stale; `file.folder` may be missing for root-level notes.
//! Rather than try/catch chains, resolution is an ordered list of [`Strategy`]s. Each one
//! either produces a value or passes, and the first value wins:
//!
//! 1. **Accessor**: `entry.value(id)`. Errors and unusable values (`""`, `"null"`,
//!    `"undefined"`) pass.
//! 2. **Frontmatter**: for `note.<field>`, the raw frontmatter field, if non-null and
//!    usable.
//! 3. **Folder**: for exactly `file.folder`, the parent folder. Grouping wants a bucket
//!    for everything, so root-level entries get `"Root"`; display wants nothing, so the
//!    subtitle is omitted.
//!
//! When nothing matches, grouping gets the [`NONE_KEY`] sentinel and display gets `None`.

use super::{PropertyId, PropertyValue, NONE_KEY};
use crate::host::Entry;
use crate::text::strip_inline_refs;

/// Group key for entries without a parent folder.
pub const ROOT_FOLDER: &str = "Root";

/// What the resolved value is for. The folder fallback differs between the two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    Group,
    Display,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    Accessor,
    Frontmatter,
    Folder,
}

const CHAIN: [Strategy; 3] = [Strategy::Accessor, Strategy::Frontmatter, Strategy::Folder];

impl Strategy {
    fn attempt<E: Entry + ?Sized>(
        self,
        entry: &E,
        id: &PropertyId,
        purpose: Purpose,
    ) -> Option<PropertyValue> {
        match self {
            Strategy::Accessor => match entry.value(id) {
                Ok(value) => value.filter(PropertyValue::is_usable),
                Err(e) => {
                    tracing::trace!("Accessor failed for {} on {}: {}", id, entry.path(), e);
                    None
                }
            },
            Strategy::Frontmatter => id
                .note_field()
                .and_then(|field| entry.frontmatter().get(field))
                .filter(|raw| !raw.is_null())
                .map(PropertyValue::from)
                .filter(PropertyValue::is_usable),
            Strategy::Folder if id.is_folder() => match (entry.folder(), purpose) {
                (Some(folder), _) => Some(PropertyValue::text(folder)),
                (None, Purpose::Group) => Some(PropertyValue::text(ROOT_FOLDER)),
                (None, Purpose::Display) => None,
            },
            Strategy::Folder => None,
        }
    }
}

/// Runs the strategy chain and returns the first value found.
pub fn resolve_value<E: Entry + ?Sized>(
    entry: &E,
    id: &PropertyId,
    purpose: Purpose,
) -> Option<PropertyValue> {
    CHAIN
        .iter()
        .find_map(|strategy| strategy.attempt(entry, id, purpose))
}

/// The key `entry` is grouped under for `id`. Never fails; unresolvable values give `"None"`.
pub fn group_key<E: Entry + ?Sized>(entry: &E, id: &PropertyId) -> String {
    resolve_value(entry, id, Purpose::Group)
        .map(|value| value.to_group_string())
        .unwrap_or_else(|| NONE_KEY.to_string())
}

/// Display text for `id` on `entry`, with inline references stripped.
///
/// `None` means "omit this element".
pub fn display_value<E: Entry + ?Sized>(entry: &E, id: &PropertyId) -> Option<String> {
    let value = resolve_value(entry, id, Purpose::Display)?;
    let text = strip_inline_refs(&value.to_string());
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
