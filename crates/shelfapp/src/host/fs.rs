//! # Vault Host
//!
//! A vault is a directory tree of Markdown notes. Each note may start with a YAML
//! frontmatter block:
//!
//! ```text
//! ---
//! status: active
//! tags: [work, q3]
//! cover: "[[images/cover.png]]"
//! ---
//! Body text with #inline tags and ![[embedded.png]] files.
//! ```
//!
//! Loading reads only what the core asks about: frontmatter, inline tags, embed targets and
//! file facts. The body itself is not kept.
//!
//! ## Accessor
//!
//! | Id | Value |
//! |----|-------|
//! | `note.<field>` | frontmatter field |
//! | `file.name`, `file.basename` | file stem |
//! | `file.path` | vault-relative path |
//! | `file.folder` | parent folder name |
//! | `file.ext` | extension |
//! | `file.mtime` | modification time |
//! | `file.tags` | frontmatter tags followed by inline tags |
//! | `formula.*` | unsupported (error) |
//! | anything else | unknown (error) |

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{Entry, Frontmatter, NativeGroup};
use crate::error::{Result, ShelfError};
use crate::property::{Namespace, PropertyId, PropertyValue};

static INLINE_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:^|\s)(#[\p{L}_][\p{L}\p{N}_/-]*)").expect("inline tag pattern is valid")
});

static EMBED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"!\[\[([^\[\]|]+)(?:\|[^\[\]]*)?\]\]").expect("embed pattern is valid")
});

const NOTE_EXTENSION: &str = "md";
const FRONTMATTER_FENCE: &str = "---";

#[derive(Debug, Clone)]
pub struct VaultEntry {
    path: String,
    name: String,
    ext: String,
    folder: Option<String>,
    folder_path: Option<String>,
    modified: DateTime<Utc>,
    frontmatter: Frontmatter,
    embeds: Vec<String>,
    inline_tags: Vec<String>,
}

impl VaultEntry {
    /// Builds an entry from file content. `rel_path` is relative to the vault root.
    pub fn from_content(rel_path: &Path, content: &str, modified: DateTime<Utc>) -> Result<Self> {
        let (frontmatter, body) = split_frontmatter(content).map_err(|message| {
            ShelfError::Frontmatter {
                path: rel_path.to_path_buf(),
                message,
            }
        })?;

        let name = rel_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = rel_path
            .extension()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let folder = rel_path
            .parent()
            .and_then(|p| p.file_name())
            .map(|s| s.to_string_lossy().into_owned());
        let folder_path = rel_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_string_lossy().replace('\\', "/"));

        Ok(Self {
            path: rel_path.to_string_lossy().replace('\\', "/"),
            name,
            ext,
            folder,
            folder_path,
            modified,
            frontmatter,
            embeds: extract_embeds(body),
            inline_tags: extract_inline_tags(body),
        })
    }

    /// Vault-relative path of the parent folder, `None` at the root.
    pub fn folder_path(&self) -> Option<&str> {
        self.folder_path.as_deref()
    }

    fn file_tags(&self) -> PropertyValue {
        let mut tags: Vec<PropertyValue> = self
            .frontmatter
            .get("tags")
            .map(|v| PropertyValue::from(v).to_string_list())
            .unwrap_or_default()
            .into_iter()
            .map(PropertyValue::Text)
            .collect();
        tags.extend(self.inline_tags.iter().cloned().map(PropertyValue::Text));
        PropertyValue::List(tags)
    }
}

impl Entry for VaultEntry {
    fn path(&self) -> &str {
        &self.path
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    fn folder(&self) -> Option<&str> {
        self.folder.as_deref()
    }

    fn value(&self, id: &PropertyId) -> Result<Option<PropertyValue>> {
        match id.namespace() {
            Namespace::Note => Ok(id
                .note_field()
                .and_then(|field| self.frontmatter.get(field))
                .map(PropertyValue::from)),
            Namespace::File => match id.name() {
                "name" | "basename" => Ok(Some(PropertyValue::text(&self.name))),
                "path" => Ok(Some(PropertyValue::text(&self.path))),
                "folder" => Ok(self.folder.as_deref().map(PropertyValue::text)),
                "ext" => Ok(Some(PropertyValue::text(&self.ext))),
                "mtime" => Ok(Some(PropertyValue::Date(self.modified))),
                "tags" => Ok(Some(self.file_tags())),
                _ => Err(ShelfError::UnknownProperty(id.to_string())),
            },
            Namespace::Formula => Err(ShelfError::UnsupportedProperty(id.to_string())),
            Namespace::Other(_) => Err(ShelfError::UnknownProperty(id.to_string())),
        }
    }

    fn frontmatter(&self) -> &Frontmatter {
        &self.frontmatter
    }

    fn embeds(&self) -> &[String] {
        &self.embeds
    }

    fn inline_tags(&self) -> &[String] {
        &self.inline_tags
    }
}

/// Loads every Markdown note under `root`, in path order.
///
/// Hidden files and directories (leading `.`) are skipped. A note with broken frontmatter
/// fails the whole load, naming the file.
pub fn load_vault(root: &Path) -> Result<Vec<VaultEntry>> {
    let mut files: Vec<PathBuf> = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'));

    for dent in walker {
        let dent = dent.map_err(|e| {
            ShelfError::Io(
                e.into_io_error()
                    .unwrap_or_else(|| std::io::Error::other("directory walk failed")),
            )
        })?;
        let path = dent.path();
        if dent.file_type().is_file()
            && path.extension().and_then(|s| s.to_str()) == Some(NOTE_EXTENSION)
        {
            files.push(path.to_path_buf());
        }
    }

    let mut entries = Vec::with_capacity(files.len());
    for path in files {
        let rel = path.strip_prefix(root).unwrap_or(&path);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::InvalidData => {
                tracing::warn!("Skipping non UTF-8 note {}", rel.display());
                continue;
            }
            Err(e) => return Err(e.into()),
        };
        let modified = fs::metadata(&path)?
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());
        entries.push(VaultEntry::from_content(rel, &content, modified)?);
    }

    tracing::debug!("Loaded {} notes from {}", entries.len(), root.display());
    Ok(entries)
}

/// Native grouping by parent folder, in first-seen order.
///
/// Groups are keyed by the vault-relative folder path (`work/notes`), so folders sharing a
/// name under different parents stay apart. Root-level notes form the keyless group.
pub fn partition_by_folder(entries: &[VaultEntry]) -> Vec<NativeGroup<'_, VaultEntry>> {
    let mut buckets: IndexMap<Option<&str>, Vec<&VaultEntry>> = IndexMap::new();
    for entry in entries {
        buckets.entry(entry.folder_path()).or_default().push(entry);
    }
    buckets
        .into_iter()
        .map(|(folder, members)| NativeGroup {
            key: folder.map(str::to_string),
            entries: members,
        })
        .collect()
}

/// Splits content into parsed frontmatter and the remaining body.
///
/// Content without a leading fence has empty frontmatter. An opening fence with no closing
/// fence is treated as plain body text.
fn split_frontmatter(content: &str) -> std::result::Result<(Frontmatter, &str), String> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return Ok((Frontmatter::new(), content));
    };
    if first.trim_end() != FRONTMATTER_FENCE {
        return Ok((Frontmatter::new(), content));
    }

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        if line.trim_end() == FRONTMATTER_FENCE {
            let yaml = &content[yaml_start..offset];
            let body = &content[offset + line.len()..];
            return parse_yaml(yaml).map(|fm| (fm, body));
        }
        offset += line.len();
    }

    Ok((Frontmatter::new(), content))
}

fn parse_yaml(yaml: &str) -> std::result::Result<Frontmatter, String> {
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::new());
    }
    let value: serde_json::Value = serde_yaml::from_str(yaml).map_err(|e| e.to_string())?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        serde_json::Value::Null => Ok(Frontmatter::new()),
        other => Err(format!("expected a mapping, found {}", other)),
    }
}

fn extract_inline_tags(body: &str) -> Vec<String> {
    INLINE_TAG
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

fn extract_embeds(body: &str) -> Vec<String> {
    EMBED
        .captures_iter(body)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect()
}
