//! # Configuration
//!
//! Render options are a [`confique`] config, loaded once and then treated as an immutable
//! snapshot for each render pass.
//!
//! ## Storage Hierarchy
//!
//! Options are resolved in priority order:
//! 1. **Environment variables**: `SHELF_GROUP_BY`, `SHELF_PREVIEW_LINES`, etc.
//! 2. **Vault Config**: `<vault>/.shelf.toml`
//! 3. **Global Config**: `shelf.toml` in the OS config directory (the CLI finds it via
//!    `directories`).
//! 4. **Compiled Defaults**: `#[config(default = ...)]`.
//!
//! Command-line flags are applied on top of the loaded snapshot by the caller.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `group_by` | unset | Primary grouping property |
//! | `sub_group_by` | unset | Secondary grouping property |
//! | `show_preview` | `true` | Show a text preview on cards |
//! | `preview_lines` | `2` | Lines of preview text (`0` hides it) |
//! | `preview_property` | unset | Preview source, else the first of `description`, `summary`, ... |
//! | `show_subtitle` | `false` | Show a subtitle line |
//! | `subtitle_property` | unset | Subtitle source, else the parent folder |
//! | `show_thumbnails` | `true` | Show a thumbnail reference |
//! | `show_tags` | `true` | Show tags |
//! | `show_metadata` | `true` | Show the footer and property list |
//! | `show_group_counts` | `true` | Show member counts on group headers |
//! | `properties` | unset | Ordered property ids listed on each card |
//! | `card_width` | `280` | Sizing hint for graphical clients |
//! | `thumbnail_height` | `120` | Sizing hint for graphical clients |

use std::path::Path;

use confique::Config;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::grouping::GroupLevels;
use crate::property::PropertyId;

/// File name of the per-vault config.
pub const VAULT_CONFIG_FILE: &str = ".shelf.toml";

/// File name of the global config.
pub const GLOBAL_CONFIG_FILE: &str = "shelf.toml";

/// Options for one render pass, stored in `shelf.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RenderOptions {
    #[config(env = "SHELF_GROUP_BY")]
    pub group_by: Option<PropertyId>,

    #[config(env = "SHELF_SUB_GROUP_BY")]
    pub sub_group_by: Option<PropertyId>,

    #[config(default = true, env = "SHELF_SHOW_PREVIEW")]
    pub show_preview: bool,

    #[config(default = 2, env = "SHELF_PREVIEW_LINES")]
    pub preview_lines: usize,

    #[config(env = "SHELF_PREVIEW_PROPERTY")]
    pub preview_property: Option<PropertyId>,

    #[config(default = false, env = "SHELF_SHOW_SUBTITLE")]
    pub show_subtitle: bool,

    #[config(env = "SHELF_SUBTITLE_PROPERTY")]
    pub subtitle_property: Option<PropertyId>,

    #[config(default = true, env = "SHELF_SHOW_THUMBNAILS")]
    pub show_thumbnails: bool,

    #[config(default = true, env = "SHELF_SHOW_TAGS")]
    pub show_tags: bool,

    #[config(default = true, env = "SHELF_SHOW_METADATA")]
    pub show_metadata: bool,

    #[config(default = true, env = "SHELF_SHOW_GROUP_COUNTS")]
    pub show_group_counts: bool,

    /// Property ids listed on each card, in order.
    pub properties: Option<Vec<PropertyId>>,

    #[config(default = 280)]
    pub card_width: u32,

    #[config(default = 120)]
    pub thumbnail_height: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            group_by: None,
            sub_group_by: None,
            show_preview: true,
            preview_lines: 2,
            preview_property: None,
            show_subtitle: false,
            subtitle_property: None,
            show_thumbnails: true,
            show_tags: true,
            show_metadata: true,
            show_group_counts: true,
            properties: None,
            card_width: 280,
            thumbnail_height: 120,
        }
    }
}

impl RenderOptions {
    /// Loads options from the environment, the vault config and the global config.
    ///
    /// Missing files are skipped.
    pub fn load(vault_dir: Option<&Path>, global_dir: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(dir) = vault_dir {
            builder = builder.file(dir.join(VAULT_CONFIG_FILE));
        }
        if let Some(dir) = global_dir {
            builder = builder.file(dir.join(GLOBAL_CONFIG_FILE));
        }
        let options = builder.load()?;
        tracing::debug!("Loaded render options: {:?}", options);
        Ok(options)
    }

    pub fn levels(&self) -> GroupLevels {
        GroupLevels::new(self.group_by.clone(), self.sub_group_by.clone())
    }

    /// The configured property list, empty when unset.
    pub fn properties(&self) -> &[PropertyId] {
        self.properties.as_deref().unwrap_or_default()
    }

    /// Whether cards should carry a preview at all.
    pub fn wants_preview(&self) -> bool {
        self.show_preview && self.preview_lines > 0
    }
}
