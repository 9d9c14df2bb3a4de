//! # Shelf Architecture
//!
//! Shelf is a **UI-agnostic grouping and card-formatting library**. It takes entries that a
//! host already knows about (notes, documents, records) and turns them into a grouped,
//! collapsible forest of cards. Drawing that forest is somebody else's job.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Presentation (shelf binary, or any other client)           │
//! │  - Walks a RenderTree and draws it                          │
//! │  - Turns clicks / flags into ShelfView::toggle calls        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  View Layer (view.rs, render.rs, card.rs)                   │
//! │  - Owns collapse state, re-derives the forest on toggle     │
//! │  - Pure render pass: (groups, options, collapse) -> tree    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (grouping.rs, collapse.rs, property/, text/)          │
//! │  - Property resolution through a fallback chain             │
//! │  - First-seen-order grouping, nested under native groups    │
//! │  - Inline reference, preview and relative date formatting   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Host Layer (host/)                                         │
//! │  - Entry trait + NativeGroup                                │
//! │  - VaultEntry (Markdown files), MemoryEntry (embedding/tests)│
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: Rendering Is a Function
//!
//! A render pass never mutates anything. Given the same native groups, the same
//! [`config::RenderOptions`] and the same [`collapse::CollapseState`], it returns the same
//! [`render::RenderTree`]. The only mutable state is the collapse state, and it changes only
//! through an explicit toggle.
//!
//! Nothing in the core fails: unreadable properties fall through the resolver chain, and
//! missing optional data (thumbnail, preview, tags) is simply absent from the card. Errors
//! only exist at the host edges (reading files, loading config).
//!
//! ## Module Overview
//!
//! - [`host`]: The `Entry` trait, native groups, and the bundled hosts
//! - [`property`]: Property ids, values and the resolver chain
//! - [`text`]: Inline references, previews and relative dates
//! - [`grouping`]: `group_by` and nested forest construction
//! - [`collapse`]: Structured group paths and collapse state
//! - [`card`]: Per-entry display fields
//! - [`render`]: The render pass
//! - [`view`]: The `ShelfView` facade
//! - [`config`]: Render options and their layered loading
//! - [`error`]: Error types

pub mod card;
pub mod collapse;
pub mod config;
pub mod error;
pub mod grouping;
pub mod host;
pub mod property;
pub mod render;
pub mod text;
pub mod view;
