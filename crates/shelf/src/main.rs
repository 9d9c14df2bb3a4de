//! # Shelf CLI Architecture
//!
//! The binary is thin: the CLI lives in `src/cli/`, and this file only invokes `cli::run()`
//! and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/shelfapp/`: the UI-agnostic library (grouping, cards, collapse state)
//! - `crates/shelf/`: this CLI, one client of the library
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/shelf/src/cli/)                          │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Config + vault loading, flag overrides (commands.rs)     │
//! │  - Terminal rendering of the RenderTree (render.rs)         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  shelfapp                                                   │
//! │  - host::fs loads the vault                                 │
//! │  - ShelfView renders groups + cards into a RenderTree       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The CLI renders once and exits, so collapse state comes from `--collapse` flags rather
//! than clicks. Everything else an interactive client would do goes through the same
//! `ShelfView` calls.
//!
//! ## Testing Approach
//!
//! - **Library**: unit tests per module plus integration tests over a temporary vault.
//! - **CLI rendering**: `render.rs` tests feed a canned `RenderTree` with colors disabled
//!   and compare the text.
//! - **End to end**: `tests/cli_e2e.rs` runs the binary against a temporary vault and
//!   inspects the `--json` output.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
