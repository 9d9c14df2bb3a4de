//! # Cards
//!
//! A card is the display form of one entry. Every field except the title is optional and
//! simply absent when the entry has nothing to show or the options turn it off.
//!
//! | Field | Shown when | Source |
//! |-------|------------|--------|
//! | title | always | entry name, inline refs stripped |
//! | subtitle | `show_subtitle` | `subtitle_property`, else the parent folder |
//! | preview | `show_preview`, `preview_lines > 0` | `preview_property`, else the first of [`PREVIEW_FIELDS`] |
//! | thumbnail | `show_thumbnails` | the first of [`THUMBNAIL_FIELDS`], else the first image embed |
//! | tags | `show_tags` | `tags` / `tag` fields, then inline tags |
//! | footer | `show_metadata` | relative modified date + word count |
//! | properties | `show_metadata` | the configured property list |
//!
//! Values go through [`display_value`], so they get the same fallbacks as grouping and have
//! inline references stripped.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::RenderOptions;
use crate::host::Entry;
use crate::property::{display_value, resolve_value, PropertyId, PropertyValue, Purpose};
use crate::text::{relative_date, strip_inline_refs, truncate_to_lines};

/// Frontmatter fields tried, in order, for the preview text.
pub const PREVIEW_FIELDS: [&str; 4] = ["description", "summary", "excerpt", "abstract"];

/// Frontmatter fields tried, in order, for the thumbnail.
pub const THUMBNAIL_FIELDS: [&str; 4] = ["image", "cover", "thumbnail", "banner"];

/// Frontmatter fields holding tags.
pub const TAG_FIELDS: [&str; 2] = ["tags", "tag"];

/// Frontmatter fields holding a word count.
pub const WORD_COUNT_FIELDS: [&str; 3] = ["wordCount", "word_count", "words"];

const IMAGE_EXTENSIONS: [&str; 8] = ["png", "jpg", "jpeg", "gif", "webp", "svg", "bmp", "avif"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub path: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<Footer>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<CardProperty>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Footer {
    /// Relative modification date, e.g. `3h ago`.
    pub modified: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub words: Option<u64>,
}

/// One resolved entry of the configured property list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardProperty {
    pub id: PropertyId,
    pub label: String,
    pub value: String,
}

/// Builds the card for `entry`. Never fails.
pub fn build_card<E: Entry + ?Sized>(
    entry: &E,
    options: &RenderOptions,
    now: DateTime<Utc>,
) -> Card {
    Card {
        path: entry.path().to_string(),
        title: strip_inline_refs(entry.name()),
        subtitle: options
            .show_subtitle
            .then(|| subtitle(entry, options))
            .flatten(),
        preview: options
            .wants_preview()
            .then(|| preview(entry, options))
            .flatten(),
        thumbnail: options.show_thumbnails.then(|| thumbnail(entry)).flatten(),
        tags: if options.show_tags {
            tags(entry)
        } else {
            Vec::new()
        },
        footer: options.show_metadata.then(|| Footer {
            modified: relative_date(entry.modified(), now),
            words: word_count(entry),
        }),
        properties: if options.show_metadata {
            properties(entry, options.properties())
        } else {
            Vec::new()
        },
    }
}

fn note_field(field: &str) -> PropertyId {
    PropertyId::new(format!("note.{}", field))
}

fn first_display_value<E: Entry + ?Sized>(entry: &E, fields: &[&str]) -> Option<String> {
    fields
        .iter()
        .find_map(|field| display_value(entry, &note_field(field)))
}

fn subtitle<E: Entry + ?Sized>(entry: &E, options: &RenderOptions) -> Option<String> {
    match &options.subtitle_property {
        Some(id) => display_value(entry, id),
        None => display_value(entry, &PropertyId::from(crate::property::FILE_FOLDER)),
    }
}

fn preview<E: Entry + ?Sized>(entry: &E, options: &RenderOptions) -> Option<String> {
    let source = match &options.preview_property {
        Some(id) => display_value(entry, id),
        None => first_display_value(entry, &PREVIEW_FIELDS),
    }?;
    let text = truncate_to_lines(&source, options.preview_lines);
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn is_image(target: &str) -> bool {
    target
        .rsplit_once('.')
        .map(|(_, ext)| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|image| ext.eq_ignore_ascii_case(image))
        })
        .unwrap_or(false)
}

fn thumbnail<E: Entry + ?Sized>(entry: &E) -> Option<String> {
    // `![[img.png]]` in a field strips to `!img.png`.
    let field = first_display_value(entry, &THUMBNAIL_FIELDS).map(|value| {
        match value.strip_prefix('!') {
            Some(target) => target.trim_start().to_string(),
            None => value,
        }
    });
    field.or_else(|| {
        entry
            .embeds()
            .iter()
            .find(|target| is_image(target))
            .cloned()
    })
}

fn tags<E: Entry + ?Sized>(entry: &E) -> Vec<String> {
    let declared = TAG_FIELDS.iter().flat_map(|field| {
        resolve_value(entry, &note_field(field), Purpose::Display)
            .map(|value| value.to_string_list())
            .unwrap_or_default()
    });
    let inline = entry.inline_tags().iter().cloned();

    let mut tags: Vec<String> = Vec::new();
    for raw in declared.chain(inline) {
        let tag = strip_inline_refs(raw.trim().trim_start_matches('#'));
        if !tag.is_empty() && !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    tags
}

fn word_count<E: Entry + ?Sized>(entry: &E) -> Option<u64> {
    WORD_COUNT_FIELDS.iter().find_map(|field| {
        match resolve_value(entry, &note_field(field), Purpose::Display)? {
            PropertyValue::Number(n) if n >= 0.0 => Some(n as u64),
            PropertyValue::Text(s) => s.trim().parse().ok(),
            _ => None,
        }
    })
}

fn properties<E: Entry + ?Sized>(entry: &E, ids: &[PropertyId]) -> Vec<CardProperty> {
    ids.iter()
        .filter_map(|id| {
            display_value(entry, id).map(|value| CardProperty {
                id: id.clone(),
                label: id.name().to_string(),
                value,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::memory::fixtures::fixed_now;
    use crate::host::memory::MemoryEntry;
    use chrono::Duration;
    use serde_json::json;

    fn options() -> RenderOptions {
        RenderOptions::default()
    }

    #[test]
    fn test_title_strips_refs() {
        let entry = MemoryEntry::new("About [[Rust|rust]]");
        let card = build_card(&entry, &options(), fixed_now());
        assert_eq!(card.title, "About rust");
    }

    #[test]
    fn test_tags_dedupe_declared_and_inline() {
        let entry = MemoryEntry::new("a")
            .with_field("tags", json!(["a", "b"]))
            .with_inline_tags(&["#b"]);
        let card = build_card(&entry, &options(), fixed_now());
        assert_eq!(card.tags, vec!["a", "b"]);
    }

    #[test]
    fn test_tags_from_single_tag_field_and_inline_order() {
        let entry = MemoryEntry::new("a")
            .with_field("tag", "#project")
            .with_inline_tags(&["#idea", "project", "#idea"]);
        let card = build_card(&entry, &options(), fixed_now());
        assert_eq!(card.tags, vec!["project", "idea"]);
    }

    #[test]
    fn test_tags_hidden() {
        let entry = MemoryEntry::new("a").with_field("tags", json!(["a"]));
        let opts = RenderOptions {
            show_tags: false,
            ..options()
        };
        assert!(build_card(&entry, &opts, fixed_now()).tags.is_empty());
    }

    #[test]
    fn test_subtitle_off_by_default() {
        let entry = MemoryEntry::new("a").with_folder("work");
        assert_eq!(build_card(&entry, &options(), fixed_now()).subtitle, None);
    }

    #[test]
    fn test_subtitle_falls_back_to_folder() {
        let opts = RenderOptions {
            show_subtitle: true,
            ..options()
        };
        let nested = MemoryEntry::new("a").with_folder("work");
        assert_eq!(
            build_card(&nested, &opts, fixed_now()).subtitle,
            Some("work".to_string())
        );
        let rooted = MemoryEntry::new("b");
        assert_eq!(build_card(&rooted, &opts, fixed_now()).subtitle, None);
    }

    #[test]
    fn test_subtitle_from_property() {
        let opts = RenderOptions {
            show_subtitle: true,
            subtitle_property: Some("note.author".into()),
            ..options()
        };
        let entry = MemoryEntry::new("a").with_field("author", "[[people/ana|Ana]]");
        assert_eq!(
            build_card(&entry, &opts, fixed_now()).subtitle,
            Some("Ana".to_string())
        );
    }

    #[test]
    fn test_preview_uses_first_available_field() {
        let entry = MemoryEntry::new("a")
            .with_field("summary", "Second choice")
            .with_field("excerpt", "Third choice");
        let card = build_card(&entry, &options(), fixed_now());
        assert_eq!(card.preview, Some("Second choice".to_string()));
    }

    #[test]
    fn test_preview_truncated_and_joined() {
        let entry = MemoryEntry::new("a").with_field("description", "one\n\n<b>two</b>\nthree");
        let card = build_card(&entry, &options(), fixed_now());
        assert_eq!(card.preview, Some("one two".to_string()));
    }

    #[test]
    fn test_preview_property_and_zero_lines() {
        let entry = MemoryEntry::new("a")
            .with_field("description", "desc")
            .with_field("blurb", "custom");
        let custom = RenderOptions {
            preview_property: Some("note.blurb".into()),
            ..options()
        };
        assert_eq!(
            build_card(&entry, &custom, fixed_now()).preview,
            Some("custom".to_string())
        );
        let none = RenderOptions {
            preview_lines: 0,
            ..options()
        };
        assert_eq!(build_card(&entry, &none, fixed_now()).preview, None);
    }

    #[test]
    fn test_thumbnail_from_field_then_embed() {
        let field = MemoryEntry::new("a")
            .with_field("cover", "[[covers/a.png]]")
            .with_embed("other.jpg");
        assert_eq!(
            build_card(&field, &options(), fixed_now()).thumbnail,
            Some("covers/a.png".to_string())
        );

        let embed = MemoryEntry::new("b")
            .with_embed("notes.pdf")
            .with_embed("photo.JPG");
        assert_eq!(
            build_card(&embed, &options(), fixed_now()).thumbnail,
            Some("photo.JPG".to_string())
        );

        let embedded = MemoryEntry::new("d").with_field("cover", "![[img.png]]");
        assert_eq!(
            build_card(&embedded, &options(), fixed_now()).thumbnail,
            Some("img.png".to_string())
        );

        let nothing = MemoryEntry::new("c").with_embed("notes.pdf");
        assert_eq!(build_card(&nothing, &options(), fixed_now()).thumbnail, None);
    }

    #[test]
    fn test_footer() {
        let entry = MemoryEntry::new("a")
            .with_field("wordCount", 1200)
            .with_modified(fixed_now() - Duration::hours(3));
        let footer = build_card(&entry, &options(), fixed_now()).footer.unwrap();
        assert_eq!(footer.modified, "3h ago");
        assert_eq!(footer.words, Some(1200));

        let text_count = MemoryEntry::new("b").with_field("words", "42");
        let footer = build_card(&text_count, &options(), fixed_now())
            .footer
            .unwrap();
        assert_eq!(footer.words, Some(42));
    }

    #[test]
    fn test_metadata_off_hides_footer_and_properties() {
        let entry = MemoryEntry::new("a").with_field("owner", "ana");
        let opts = RenderOptions {
            show_metadata: false,
            properties: Some(vec!["note.owner".into()]),
            ..options()
        };
        let card = build_card(&entry, &opts, fixed_now());
        assert!(card.footer.is_none());
        assert!(card.properties.is_empty());
    }

    #[test]
    fn test_properties_in_configured_order() {
        let entry = MemoryEntry::new("a")
            .with_field("owner", "ana")
            .with_field("status", "done")
            .with_folder("work");
        let opts = RenderOptions {
            properties: Some(vec![
                "note.status".into(),
                "note.missing".into(),
                "file.folder".into(),
                "note.owner".into(),
            ]),
            ..options()
        };
        let card = build_card(&entry, &opts, fixed_now());
        let pairs: Vec<_> = card
            .properties
            .iter()
            .map(|p| (p.label.as_str(), p.value.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("status", "done"), ("folder", "work"), ("owner", "ana")]
        );
    }

    #[test]
    fn test_card_json_omits_absent_fields() {
        let entry = MemoryEntry::new("a");
        let opts = RenderOptions {
            show_metadata: false,
            ..options()
        };
        let json = serde_json::to_value(build_card(&entry, &opts, fixed_now())).unwrap();
        assert_eq!(json, json!({"path": "a.md", "title": "a"}));
    }
}
