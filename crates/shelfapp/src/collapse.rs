//! # Group Paths and Collapse State
//!
//! Every group header in the rendered list can be collapsed. To remember that across
//! re-renders each group needs an identity that survives re-grouping: its **path**, the
//! sequence of group keys from the outermost level down to the group itself.
//!
//! ## Paths
//!
//! ```text
//! native grouping active        native grouping inactive
//! ----------------------        ------------------------
//! [work]                        [done]
//! [work, done]                  [done, high]
//! [work, done, high]
//! ```
//!
//! A path's depth is its [`Role`]: one segment is `Primary`, two `Secondary`, three
//! `Tertiary`. Because native grouping occupies the first segment when it is active, a
//! plugin level sits one role deeper with native grouping than without it.
//!
//! Paths compare structurally, so a key like `a::b` can never be mistaken for the path
//! `[a, b]`. The host's keyless bucket, shown as `None` beside keyed native groups, is its
//! own [`PathSegment::Ungrouped`] and never equals a real group keyed `None`. The string form (`work::done::high`, or `done:high` without native grouping)
//! only exists for hosts that can carry nothing but strings; parsing it back is ambiguous
//! when keys contain the separators.
//!
//! ## Collapse State
//!
//! [`CollapseState`] is a plain value: two sets of paths, one for top-level groups and one
//! for everything nested. It changes only through [`CollapseState::toggle`]. Collapsing a
//! group hides its descendants but leaves their entries in the state, so expanding it again
//! brings back whatever was collapsed inside.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::property::NONE_KEY;

/// Separator between the native key and plugin keys in the string form.
pub const NATIVE_SEPARATOR: &str = "::";

/// Separator between plugin keys when native grouping is inactive.
pub const LEVEL_SEPARATOR: &str = ":";

/// Nesting role of a group node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Primary,
    Secondary,
    Tertiary,
}

impl Role {
    fn from_depth(depth: usize) -> Self {
        match depth {
            0 | 1 => Role::Primary,
            2 => Role::Secondary,
            _ => Role::Tertiary,
        }
    }

    pub fn is_top(self) -> bool {
        self == Role::Primary
    }
}

/// One level of a [`GroupPath`].
///
/// Serializes as the key string, or `null` for the keyless native bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Key(String),
    Ungrouped,
}

impl PathSegment {
    pub fn as_str(&self) -> &str {
        match self {
            PathSegment::Key(key) => key,
            PathSegment::Ungrouped => NONE_KEY,
        }
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(key: String) -> Self {
        PathSegment::Key(key)
    }
}

/// Structured identity of a group node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupPath {
    /// Whether the first segment is a native (host) group key.
    pub native: bool,
    pub segments: Vec<PathSegment>,
}

impl GroupPath {
    /// The empty path of an ungrouped bucket.
    pub fn root(native: bool) -> Self {
        Self {
            native,
            segments: Vec::new(),
        }
    }

    pub fn new<I, S>(native: bool, segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            native,
            segments: segments
                .into_iter()
                .map(|s| PathSegment::Key(s.into()))
                .collect(),
        }
    }

    /// Path of the host's keyless bucket when other native groups carry keys.
    pub fn native_ungrouped() -> Self {
        Self {
            native: true,
            segments: vec![PathSegment::Ungrouped],
        }
    }

    pub fn child(&self, key: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.push(PathSegment::from(key));
        Self {
            native: self.native,
            segments,
        }
    }

    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn role(&self) -> Role {
        Role::from_depth(self.depth())
    }

    /// Parses the string form.
    ///
    /// With native grouping the string splits on `::`; without, on `:` into at most two
    /// levels. Keys containing the separators cannot be expressed this way.
    pub fn parse(s: &str, native: bool) -> Self {
        let segments: Vec<PathSegment> = if native {
            s.split(NATIVE_SEPARATOR).map(PathSegment::from).collect()
        } else {
            s.splitn(2, LEVEL_SEPARATOR).map(PathSegment::from).collect()
        };
        Self { native, segments }
    }
}

impl fmt::Display for GroupPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = if self.native {
            NATIVE_SEPARATOR
        } else {
            LEVEL_SEPARATOR
        };
        let parts: Vec<&str> = self.segments.iter().map(PathSegment::as_str).collect();
        f.write_str(&parts.join(sep))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollapseState {
    top: BTreeSet<GroupPath>,
    nested: BTreeSet<GroupPath>,
}

impl CollapseState {
    pub fn new() -> Self {
        Self::default()
    }

    fn set_for(&self, path: &GroupPath) -> &BTreeSet<GroupPath> {
        if path.role().is_top() {
            &self.top
        } else {
            &self.nested
        }
    }

    fn set_for_mut(&mut self, path: &GroupPath) -> &mut BTreeSet<GroupPath> {
        if path.role().is_top() {
            &mut self.top
        } else {
            &mut self.nested
        }
    }

    pub fn is_collapsed(&self, path: &GroupPath) -> bool {
        self.set_for(path).contains(path)
    }

    /// Flips membership of `path`. Returns `true` if the group is now collapsed.
    pub fn toggle(&mut self, path: &GroupPath) -> bool {
        let set = self.set_for_mut(path);
        if set.remove(path) {
            false
        } else {
            set.insert(path.clone());
            true
        }
    }

    /// Pure form of [`toggle`](Self::toggle).
    pub fn toggled(mut self, path: &GroupPath) -> Self {
        self.toggle(path);
        self
    }

    pub fn collapse(&mut self, path: &GroupPath) {
        if !self.is_collapsed(path) {
            self.toggle(path);
        }
    }

    pub fn top(&self) -> impl Iterator<Item = &GroupPath> {
        self.top.iter()
    }

    pub fn nested(&self) -> impl Iterator<Item = &GroupPath> {
        self.nested.iter()
    }

    pub fn collapsed_paths(&self) -> impl Iterator<Item = &GroupPath> {
        self.top.iter().chain(self.nested.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_empty() && self.nested.is_empty()
    }
}
