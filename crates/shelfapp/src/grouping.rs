//! # Grouping
//!
//! Turns a flat, host-ordered list of entries into a forest of at most three levels.
//!
//! ## `group_by`
//!
//! One pass over the entries. Each entry's key is resolved once (see
//! [`crate::property::group_key`]) and the entry is appended to that key's bucket. Buckets
//! keep first-seen order; nothing is sorted.
//!
//! ## Composition
//!
//! The host's native partition is always the outermost level. Plugin levels are applied
//! **inside** each native bucket, never beside it:
//!
//! | Native | Plugin levels | Forest |
//! |--------|---------------|--------|
//! | yes | none | native → entries |
//! | yes | primary | native → primary → entries |
//! | yes | primary + secondary | native → primary → secondary → entries |
//! | no  | none | one ungrouped node → entries |
//! | no  | primary | primary → entries |
//! | no  | primary + secondary | primary → secondary → entries |
//!
//! A secondary selection without a primary one is promoted to primary.
//!
//! Native grouping counts as active when at least one native group carries a key. Keyless
//! native groups are then shown under the `"None"` key, but their path is
//! [`GroupPath::native_ungrouped`], so a real native group keyed `None` stays separate.
//! Without any keyed group, all native buckets are merged into a single ungrouped one.

use indexmap::IndexMap;

use crate::collapse::{GroupPath, Role};
use crate::host::{Entry, NativeGroup};
use crate::property::{group_key, PropertyId, NONE_KEY};

/// Groups `entries` by `property`, preserving first-seen key order.
pub fn group_by<'a, E: Entry + ?Sized>(
    entries: &[&'a E],
    property: &PropertyId,
) -> IndexMap<String, Vec<&'a E>> {
    let mut groups: IndexMap<String, Vec<&'a E>> = IndexMap::new();
    for &entry in entries {
        groups
            .entry(group_key(entry, property))
            .or_default()
            .push(entry);
    }
    groups
}

/// The plugin grouping selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupLevels {
    pub primary: Option<PropertyId>,
    pub secondary: Option<PropertyId>,
}

impl GroupLevels {
    pub fn new(primary: Option<PropertyId>, secondary: Option<PropertyId>) -> Self {
        Self { primary, secondary }
    }

    /// The levels to apply, outermost first. A lone secondary selection becomes the only
    /// level.
    pub fn normalized(&self) -> Vec<&PropertyId> {
        match (&self.primary, &self.secondary) {
            (Some(primary), Some(secondary)) => vec![primary, secondary],
            (Some(only), None) | (None, Some(only)) => vec![only],
            (None, None) => Vec::new(),
        }
    }
}

/// One node of the grouping forest.
#[derive(Debug)]
pub struct GroupNode<'a, E: ?Sized> {
    /// Group key, `None` for the ungrouped bucket.
    pub key: Option<String>,
    pub role: Role,
    pub path: GroupPath,
    /// All entries under this node, in input order.
    pub entries: Vec<&'a E>,
    /// Sub-groups partitioning `entries`; empty at the innermost level.
    pub children: Vec<GroupNode<'a, E>>,
}

impl<'a, E: ?Sized> GroupNode<'a, E> {
    /// Whether the node has a header that can be collapsed.
    pub fn is_collapsible(&self) -> bool {
        self.key.is_some()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Entries of the innermost descendants, depth-first.
    pub fn leaf_entries(&self) -> Vec<&'a E> {
        if self.is_leaf() {
            return self.entries.clone();
        }
        self.children
            .iter()
            .flat_map(GroupNode::leaf_entries)
            .collect()
    }
}

/// Builds the grouping forest for the host's native groups and the selected plugin levels.
pub fn build_forest<'a, E: Entry + ?Sized>(
    native: &[NativeGroup<'a, E>],
    levels: &GroupLevels,
) -> Vec<GroupNode<'a, E>> {
    let levels = levels.normalized();
    let native_active = native.iter().any(NativeGroup::has_key);

    if native_active {
        return native
            .iter()
            .map(|group| {
                let (key, path) = match &group.key {
                    Some(key) => (key.clone(), GroupPath::root(true).child(key)),
                    None => (NONE_KEY.to_string(), GroupPath::native_ungrouped()),
                };
                let children = nest(&group.entries, &levels, &path);
                GroupNode {
                    key: Some(key),
                    role: path.role(),
                    path,
                    entries: group.entries.clone(),
                    children,
                }
            })
            .collect();
    }

    let entries: Vec<&'a E> = native
        .iter()
        .flat_map(|group| group.entries.iter().copied())
        .collect();

    if levels.is_empty() {
        if entries.is_empty() {
            return Vec::new();
        }
        let path = GroupPath::root(false);
        return vec![GroupNode {
            key: None,
            role: path.role(),
            path,
            entries,
            children: Vec::new(),
        }];
    }

    nest(&entries, &levels, &GroupPath::root(false))
}

fn nest<'a, E: Entry + ?Sized>(
    entries: &[&'a E],
    levels: &[&PropertyId],
    parent: &GroupPath,
) -> Vec<GroupNode<'a, E>> {
    let Some((property, rest)) = levels.split_first() else {
        return Vec::new();
    };

    group_by(entries, property)
        .into_iter()
        .map(|(key, members)| {
            let path = parent.child(&key);
            let children = nest(&members, rest, &path);
            GroupNode {
                key: Some(key),
                role: path.role(),
                path,
                entries: members,
                children,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::MemoryEntry;
    use crate::host::ungrouped;

    fn notes() -> Vec<MemoryEntry> {
        vec![
            MemoryEntry::new("a")
                .with_field("status", "done")
                .with_field("prio", "high")
                .with_folder("work"),
            MemoryEntry::new("b")
                .with_field("status", "todo")
                .with_field("prio", "low")
                .with_folder("home"),
            MemoryEntry::new("c")
                .with_field("status", "done")
                .with_field("prio", "low")
                .with_folder("work"),
            MemoryEntry::new("d").with_folder("home"),
        ]
    }

    fn names<E: Entry + ?Sized>(entries: &[&E]) -> Vec<String> {
        entries.iter().map(|e| e.name().to_string()).collect()
    }

    fn keys<E: ?Sized>(nodes: &[GroupNode<'_, E>]) -> Vec<String> {
        nodes.iter().filter_map(|n| n.key.clone()).collect()
    }

    #[test]
    fn test_group_by_first_seen_order() {
        let notes = notes();
        let refs: Vec<&MemoryEntry> = notes.iter().collect();
        let groups = group_by(&refs, &"note.status".into());
        let order: Vec<_> = groups.keys().cloned().collect();
        assert_eq!(order, vec!["done", "todo", "None"]);
        assert_eq!(names(&groups["done"]), vec!["a", "c"]);
    }

    #[test]
    fn test_group_by_partitions_exactly() {
        let notes = notes();
        let refs: Vec<&MemoryEntry> = notes.iter().collect();
        for prop in ["note.status", "note.prio", "file.folder", "note.missing"] {
            let groups = group_by(&refs, &prop.into());
            let total: usize = groups.values().map(Vec::len).sum();
            assert_eq!(total, refs.len());
            let mut seen: Vec<_> = groups.values().flatten().map(|e| e.name()).collect();
            seen.sort();
            assert_eq!(seen, vec!["a", "b", "c", "d"]);
        }
    }

    #[test]
    fn test_normalized_levels() {
        let p: PropertyId = "note.a".into();
        let s: PropertyId = "note.b".into();
        assert!(GroupLevels::default().normalized().is_empty());
        assert_eq!(
            GroupLevels::new(Some(p.clone()), None).normalized(),
            vec![&p]
        );
        assert_eq!(
            GroupLevels::new(None, Some(s.clone())).normalized(),
            vec![&s]
        );
        assert_eq!(
            GroupLevels::new(Some(p.clone()), Some(s.clone())).normalized(),
            vec![&p, &s]
        );
    }

    #[test]
    fn test_no_native_no_plugin_is_flat() {
        let notes = notes();
        let forest = build_forest(&ungrouped(&notes), &GroupLevels::default());
        assert_eq!(forest.len(), 1);
        assert_eq!(forest[0].key, None);
        assert!(!forest[0].is_collapsible());
        assert_eq!(forest[0].entries.len(), 4);
    }

    #[test]
    fn test_empty_input_gives_empty_forest() {
        let notes: Vec<MemoryEntry> = Vec::new();
        assert!(build_forest(&ungrouped(&notes), &GroupLevels::default()).is_empty());
        let levels = GroupLevels::new(Some("note.status".into()), None);
        assert!(build_forest(&ungrouped(&notes), &levels).is_empty());
    }

    #[test]
    fn test_primary_only() {
        let notes = notes();
        let levels = GroupLevels::new(Some("note.status".into()), None);
        let forest = build_forest(&ungrouped(&notes), &levels);
        assert_eq!(keys(&forest), vec!["done", "todo", "None"]);
        assert!(forest.iter().all(|n| n.role == Role::Primary && n.is_leaf()));
        assert_eq!(forest[0].path, GroupPath::new(false, ["done"]));
    }

    #[test]
    fn test_secondary_only_acts_as_primary() {
        let notes = notes();
        let levels = GroupLevels::new(None, Some("note.prio".into()));
        let forest = build_forest(&ungrouped(&notes), &levels);
        assert_eq!(keys(&forest), vec!["high", "low", "None"]);
        assert!(forest.iter().all(|n| n.role == Role::Primary && n.is_leaf()));
    }

    #[test]
    fn test_two_plugin_levels_nest() {
        let notes = notes();
        let levels = GroupLevels::new(Some("note.status".into()), Some("note.prio".into()));
        let forest = build_forest(&ungrouped(&notes), &levels);
        let done = &forest[0];
        assert_eq!(keys(&done.children), vec!["high", "low"]);
        assert_eq!(done.children[1].role, Role::Secondary);
        assert_eq!(
            done.children[1].path,
            GroupPath::new(false, ["done", "low"])
        );
        assert_eq!(names(&done.children[1].entries), vec!["c"]);
    }

    #[test]
    fn test_native_is_outermost_and_shifts_roles() {
        let notes = notes();
        let refs: Vec<&MemoryEntry> = notes.iter().collect();
        let native = vec![
            NativeGroup::keyed("work", vec![refs[0], refs[2]]),
            NativeGroup::keyed("home", vec![refs[1], refs[3]]),
        ];
        let levels = GroupLevels::new(Some("note.status".into()), Some("note.prio".into()));
        let forest = build_forest(&native, &levels);

        assert_eq!(keys(&forest), vec!["work", "home"]);
        assert_eq!(forest[0].role, Role::Primary);
        assert_eq!(forest[0].path, GroupPath::new(true, ["work"]));

        let done = &forest[0].children[0];
        assert_eq!(done.role, Role::Secondary);
        assert_eq!(done.path, GroupPath::new(true, ["work", "done"]));

        let low = &done.children[1];
        assert_eq!(low.role, Role::Tertiary);
        assert_eq!(low.path.to_string(), "work::done::low");
    }

    #[test]
    fn test_native_without_plugins_is_flat_under_native() {
        let notes = notes();
        let refs: Vec<&MemoryEntry> = notes.iter().collect();
        let native = vec![NativeGroup::keyed("all", refs.clone())];
        let forest = build_forest(&native, &GroupLevels::default());
        assert_eq!(forest.len(), 1);
        assert!(forest[0].is_leaf());
        assert_eq!(forest[0].entries.len(), 4);
    }

    #[test]
    fn test_keyless_native_group_among_keyed_uses_sentinel() {
        let notes = notes();
        let refs: Vec<&MemoryEntry> = notes.iter().collect();
        let native = vec![
            NativeGroup::keyed("work", vec![refs[0]]),
            NativeGroup::ungrouped(vec![refs[1], refs[2], refs[3]]),
        ];
        let forest = build_forest(&native, &GroupLevels::default());
        assert_eq!(keys(&forest), vec!["work", "None"]);
        assert_eq!(forest[1].path, GroupPath::native_ungrouped());
    }

    #[test]
    fn test_keyless_native_group_beside_none_key() {
        let notes = notes();
        let refs: Vec<&MemoryEntry> = notes.iter().collect();
        let native = vec![
            NativeGroup::keyed("None", vec![refs[0], refs[1]]),
            NativeGroup::ungrouped(vec![refs[2], refs[3]]),
        ];
        let levels = GroupLevels::new(Some("note.status".into()), None);
        let forest = build_forest(&native, &levels);
        assert_eq!(keys(&forest), vec!["None", "None"]);
        assert_ne!(forest[0].path, forest[1].path);
        assert_ne!(forest[0].children[0].path, forest[1].children[0].path);
    }

    #[test]
    fn test_keyless_native_groups_merge() {
        let notes = notes();
        let refs: Vec<&MemoryEntry> = notes.iter().collect();
        let native = vec![
            NativeGroup::ungrouped(vec![refs[0], refs[1]]),
            NativeGroup::ungrouped(vec![refs[2], refs[3]]),
        ];
        let levels = GroupLevels::new(Some("note.status".into()), None);
        let forest = build_forest(&native, &levels);
        assert_eq!(names(&forest[0].entries), vec!["a", "c"]);
    }

    #[test]
    fn test_leaves_cover_input_exactly_once() {
        let notes = notes();
        let refs: Vec<&MemoryEntry> = notes.iter().collect();
        let native = vec![
            NativeGroup::keyed("x", vec![refs[0], refs[1]]),
            NativeGroup::keyed("y", vec![refs[2], refs[3]]),
        ];
        let levels = GroupLevels::new(Some("note.status".into()), Some("file.folder".into()));
        let forest = build_forest(&native, &levels);

        let mut leaves: Vec<_> = forest
            .iter()
            .flat_map(GroupNode::leaf_entries)
            .map(|e| e.name().to_string())
            .collect();
        leaves.sort();
        assert_eq!(leaves, vec!["a", "b", "c", "d"]);

        for node in &forest {
            let child_total: usize = node.children.iter().map(|c| c.entries.len()).sum();
            assert_eq!(child_total, node.entries.len());
            assert!(node.children.iter().all(|c| !c.entries.is_empty()));
        }
    }
}
