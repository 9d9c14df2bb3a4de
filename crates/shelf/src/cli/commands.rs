//! # CLI Layer
//!
//! The CLI layer is the **only** place in the codebase that:
//! - Knows about terminal I/O (stdout, stderr)
//! - Handles argument parsing
//! - Installs a log subscriber
//! - Formats output for human consumption
//!
//! ## Responsibilities
//!
//! 1. **Logging**: `tracing-subscriber` on stderr, filtered by `SHELF_LOG` (or `-v`)
//! 2. **Configuration**: layered `RenderOptions`, then flag overrides
//! 3. **Loading**: read the vault and apply native folder grouping if asked
//! 4. **Output**: text tree or JSON

use super::render::render_tree;
use super::setup::{parse_cli, Cli};
use anyhow::{bail, Context, Result};
use chrono::Utc;
use directories::ProjectDirs;
use shelfapp::collapse::{CollapseState, GroupPath};
use shelfapp::config::RenderOptions;
use shelfapp::host::fs::{load_vault, partition_by_folder};
use shelfapp::host::{ungrouped, NativeGroup};
use shelfapp::property::PropertyId;
use shelfapp::view::ShelfView;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "SHELF_LOG";

pub fn run() -> Result<()> {
    let cli = parse_cli();
    init_logging(cli.verbose);

    let root = cli.dir.clone().unwrap_or_else(|| PathBuf::from("."));
    if !root.is_dir() {
        bail!("Not a directory: {}", root.display());
    }

    let global_dir =
        ProjectDirs::from("", "", "shelf").map(|dirs| dirs.config_dir().to_path_buf());
    let mut options = RenderOptions::load(Some(&root), global_dir.as_deref())
        .context("Failed to load configuration")?;
    apply_overrides(&cli, &mut options);

    let entries = load_vault(&root)
        .with_context(|| format!("Failed to load notes from {}", root.display()))?;
    let native: Vec<NativeGroup<'_, _>> = if cli.by_folder {
        partition_by_folder(&entries)
    } else {
        ungrouped(&entries)
    };
    let native_active = native.iter().any(NativeGroup::has_key);

    let view =
        ShelfView::new(options).with_collapse(collapse_state(&cli.collapse, native_active));
    let tree = view.render(&native, Utc::now());

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&tree).context("Failed to serialize output")?
        );
    } else {
        print!("{}", render_tree(&tree));
    }
    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Applies command-line flags on top of the loaded options.
fn apply_overrides(cli: &Cli, options: &mut RenderOptions) {
    if let Some(id) = &cli.group_by {
        options.group_by = Some(PropertyId::new(id.as_str()));
    }
    if let Some(id) = &cli.sub_group_by {
        options.sub_group_by = Some(PropertyId::new(id.as_str()));
    }
    if let Some(lines) = cli.preview_lines {
        options.preview_lines = lines;
    }
    if let Some(id) = &cli.preview_property {
        options.preview_property = Some(PropertyId::new(id.as_str()));
    }
    if cli.subtitle {
        options.show_subtitle = true;
    }
    if let Some(id) = &cli.subtitle_property {
        options.show_subtitle = true;
        options.subtitle_property = Some(PropertyId::new(id.as_str()));
    }
    if cli.no_thumbnails {
        options.show_thumbnails = false;
    }
    if cli.no_tags {
        options.show_tags = false;
    }
    if cli.no_metadata {
        options.show_metadata = false;
    }
    if cli.no_counts {
        options.show_group_counts = false;
    }
    if !cli.properties.is_empty() {
        options.properties = Some(
            cli.properties
                .iter()
                .map(|id| PropertyId::new(id.as_str()))
                .collect(),
        );
    }
}

fn collapse_state(paths: &[String], native_active: bool) -> CollapseState {
    let mut state = CollapseState::new();
    for raw in paths {
        let path = GroupPath::parse(raw, native_active);
        tracing::debug!("Collapsing {:?}", path.segments);
        state.collapse(&path);
    }
    state
}
