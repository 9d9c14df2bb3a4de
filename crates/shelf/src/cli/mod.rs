//! # CLI Behavior
//!
//! This is **one possible UI client** for shelf, not the library itself.
//! The CLI is the only place that knows about terminal I/O, exit codes, and output formatting.
//!
//! ## Invocation
//!
//! `shelf [DIR]` loads every Markdown note under `DIR` (default: the current directory) and
//! prints it as a list of cards. Grouping and card contents come from the layered config
//! (`.shelf.toml` in the vault, `shelf.toml` in the user config dir, `SHELF_*` variables);
//! flags override all of them for one run.
//!
//! ### Grouping
//!
//! - `--by-folder`: the folder partition is the outermost level
//! - `--group-by ID`, `--sub-group-by ID`: up to two property levels inside it
//!
//! ### Collapsing
//!
//! `--collapse PATH` collapses one group, where `PATH` is the group's string form:
//! `done`, `done:high`, or with `--by-folder` `projects::done`. Repeat it for more groups.
//!
//! ### Output
//!
//! Styled text by default; `--json` prints the render tree for other tools.
//!
//! ## Module Structure
//!
//! - `commands`: Loads config and vault, applies flags, prints output
//! - `render`: Text layout of the render tree
//! - `setup`: Argument parsing via clap
//! - `styles`: Light and dark palettes

mod commands;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
