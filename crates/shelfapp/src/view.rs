//! # Shelf View
//!
//! [`ShelfView`] is the stateful front for interactive clients. It owns the render options
//! and the collapse state; everything else is passed in per call. A toggle updates the
//! collapse state and then re-runs the whole render pass, so the returned tree is always
//! consistent with the current state.
//!
//! ```text
//! client click ──> ShelfView::toggle(path) ──> CollapseState::toggle ──> render(..) ──> RenderTree
//! ```
//!
//! Clients that keep their own state can call [`crate::render::render`] directly.

use chrono::{DateTime, Utc};

use crate::collapse::{CollapseState, GroupPath};
use crate::config::RenderOptions;
use crate::host::{Entry, NativeGroup};
use crate::render::{render, RenderTree};

#[derive(Debug, Clone, Default)]
pub struct ShelfView {
    options: RenderOptions,
    collapse: CollapseState,
}

impl ShelfView {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            collapse: CollapseState::new(),
        }
    }

    /// Starts from an existing collapse state, e.g. one restored by the host.
    pub fn with_collapse(mut self, collapse: CollapseState) -> Self {
        self.collapse = collapse;
        self
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Replaces the options. Collapse state is kept; paths that no longer exist are inert.
    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
    }

    pub fn collapse_state(&self) -> &CollapseState {
        &self.collapse
    }

    /// Collapses `path` without rendering.
    pub fn collapse(&mut self, path: &GroupPath) {
        self.collapse.collapse(path);
    }

    pub fn render<E: Entry + ?Sized>(
        &self,
        groups: &[NativeGroup<'_, E>],
        now: DateTime<Utc>,
    ) -> RenderTree {
        render(groups, &self.options, &self.collapse, now)
    }

    /// Flips the collapse flag of `path` and re-renders.
    pub fn toggle<E: Entry + ?Sized>(
        &mut self,
        path: &GroupPath,
        groups: &[NativeGroup<'_, E>],
        now: DateTime<Utc>,
    ) -> RenderTree {
        let collapsed = self.collapse.toggle(path);
        tracing::debug!(
            "Toggled {} ({})",
            path,
            if collapsed { "collapsed" } else { "expanded" }
        );
        self.render(groups, now)
    }
}
