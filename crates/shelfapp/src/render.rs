//! # Render Pass
//!
//! [`render`] turns native groups, options and collapse state into a [`RenderTree`]. It is
//! a pure function: no side effects apart from a debug event, and the same inputs always
//! give the same tree.
//!
//! A collapsed group keeps its header (label, count, path) but carries no cards and no
//! children. The collapse flags of its descendants stay in the [`CollapseState`], so they
//! come back unchanged once it is expanded.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::card::{build_card, Card};
use crate::collapse::{CollapseState, GroupPath, Role};
use crate::config::RenderOptions;
use crate::grouping::{build_forest, GroupNode};
use crate::host::{Entry, NativeGroup};

/// The output of one render pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderTree {
    pub groups: Vec<RenderGroup>,
    /// Number of input entries, collapsed or not.
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderGroup {
    /// Group key; `None` for the single ungrouped bucket, which has no header.
    pub key: Option<String>,
    pub label: String,
    pub role: Role,
    pub path: GroupPath,
    pub collapsed: bool,
    pub collapsible: bool,
    /// Member count, present when group counts are shown.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    /// Cards of an expanded innermost group.
    pub cards: Vec<Card>,
    /// Sub-groups of an expanded group.
    pub children: Vec<RenderGroup>,
}

impl RenderTree {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Cards of every expanded group, depth-first.
    pub fn visible_cards(&self) -> Vec<&Card> {
        let mut cards = Vec::new();
        for group in &self.groups {
            group.collect_cards(&mut cards);
        }
        cards
    }

    /// Finds the group at `path`, if it is reachable through expanded ancestors.
    pub fn find(&self, path: &GroupPath) -> Option<&RenderGroup> {
        find_in(&self.groups, path)
    }
}

impl RenderGroup {
    fn collect_cards<'a>(&'a self, out: &mut Vec<&'a Card>) {
        out.extend(self.cards.iter());
        for child in &self.children {
            child.collect_cards(out);
        }
    }
}

fn find_in<'a>(groups: &'a [RenderGroup], path: &GroupPath) -> Option<&'a RenderGroup> {
    groups.iter().find_map(|group| {
        if &group.path == path {
            Some(group)
        } else {
            find_in(&group.children, path)
        }
    })
}

/// Renders `groups` with `options` and `collapse` at time `now`.
pub fn render<E: Entry + ?Sized>(
    groups: &[NativeGroup<'_, E>],
    options: &RenderOptions,
    collapse: &CollapseState,
    now: DateTime<Utc>,
) -> RenderTree {
    let total = groups.iter().map(|g| g.entries.len()).sum();
    let forest = build_forest(groups, &options.levels());
    let rendered: Vec<RenderGroup> = forest
        .iter()
        .map(|node| render_node(node, options, collapse, now))
        .collect();

    tracing::debug!(
        "Rendered {} entries into {} top-level groups ({} collapsed)",
        total,
        rendered.len(),
        collapse.collapsed_paths().count()
    );

    RenderTree {
        groups: rendered,
        total,
    }
}

fn render_node<E: Entry + ?Sized>(
    node: &GroupNode<'_, E>,
    options: &RenderOptions,
    collapse: &CollapseState,
    now: DateTime<Utc>,
) -> RenderGroup {
    let collapsible = node.is_collapsible();
    let collapsed = collapsible && collapse.is_collapsed(&node.path);

    let (cards, children) = if collapsed {
        (Vec::new(), Vec::new())
    } else if node.is_leaf() {
        let cards = node
            .entries
            .iter()
            .map(|entry| build_card(*entry, options, now))
            .collect();
        (cards, Vec::new())
    } else {
        let children = node
            .children
            .iter()
            .map(|child| render_node(child, options, collapse, now))
            .collect();
        (Vec::new(), children)
    };

    RenderGroup {
        key: node.key.clone(),
        label: node.key.clone().unwrap_or_default(),
        role: node.role,
        path: node.path.clone(),
        collapsed,
        collapsible,
        count: options.show_group_counts.then_some(node.entries.len()),
        cards,
        children,
    }
}
