//! # Rendering Module
//!
//! Lays a [`RenderTree`] out as indented text. The library already decided what is visible;
//! this module only decides where it goes and how it looks.
//!
//! ```text
//! ▾ done (2)
//!     Note 1                                               3h ago
//!     First line of the preview
//!     #rust #cli
//! ▸ todo (1)
//! ```
//!
//! Width math stays here because it has to be Unicode-aware: titles are truncated to the
//! space left next to the timestamp, measured with `unicode-width`.

use super::styles::Palette;
use shelfapp::card::Card;
use shelfapp::render::{RenderGroup, RenderTree};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
pub const INDENT: &str = "  ";
pub const EXPANDED_MARKER: &str = "▾";
pub const COLLAPSED_MARKER: &str = "▸";
pub const ELLIPSIS: &str = "…";
pub const EMPTY_MESSAGE: &str = "No notes found.";

/// Renders the tree, letting the terminal decide on colors.
pub fn render_tree(tree: &RenderTree) -> String {
    render_tree_internal(tree, None)
}

fn render_tree_internal(tree: &RenderTree, use_color: Option<bool>) -> String {
    if tree.is_empty() {
        return format!("{}\n", EMPTY_MESSAGE);
    }
    let palette = Palette::resolve(use_color);
    let mut out = String::new();
    for group in &tree.groups {
        render_group(&mut out, group, 0, &palette);
    }
    out
}

fn render_group(out: &mut String, group: &RenderGroup, depth: usize, palette: &Palette) {
    // The ungrouped bucket has no header; its cards sit at the top level.
    let card_depth = if group.key.is_some() {
        render_header(out, group, depth, palette);
        depth + 1
    } else {
        depth
    };

    for card in &group.cards {
        render_card(out, card, card_depth, palette);
    }
    for child in &group.children {
        render_group(out, child, depth + 1, palette);
    }
}

fn render_header(out: &mut String, group: &RenderGroup, depth: usize, palette: &Palette) {
    let marker = if group.collapsed {
        COLLAPSED_MARKER
    } else {
        EXPANDED_MARKER
    };
    out.push_str(&INDENT.repeat(depth));
    out.push_str(&palette.marker.apply_to(marker).to_string());
    out.push(' ');
    out.push_str(&palette.header.apply_to(&group.label).to_string());
    if let Some(count) = group.count {
        out.push(' ');
        out.push_str(&palette.count.apply_to(format!("({})", count)).to_string());
    }
    out.push('\n');
}

fn render_card(out: &mut String, card: &Card, depth: usize, palette: &Palette) {
    let indent = INDENT.repeat(depth * 2);
    let body_width = LINE_WIDTH.saturating_sub(indent.width());

    let right = card
        .footer
        .as_ref()
        .map(|footer| match footer.words {
            Some(words) => format!("{} · {} words", footer.modified, words),
            None => footer.modified.clone(),
        })
        .unwrap_or_default();
    let right_width = if right.is_empty() {
        0
    } else {
        right.width() + 2
    };
    let title = truncate_to_width(&card.title, body_width.saturating_sub(right_width));
    let padding = " ".repeat(body_width.saturating_sub(title.width() + right.width()));

    out.push_str(&indent);
    out.push_str(&palette.title.apply_to(&title).to_string());
    if !right.is_empty() {
        out.push_str(&padding);
        out.push_str(&palette.time.apply_to(&right).to_string());
    }
    out.push('\n');

    let mut line = |text: String, style: &console::Style| {
        out.push_str(&indent);
        out.push_str(&style.apply_to(truncate_to_width(&text, body_width)).to_string());
        out.push('\n');
    };

    if let Some(subtitle) = &card.subtitle {
        line(subtitle.clone(), &palette.subtitle);
    }
    if let Some(preview) = &card.preview {
        line(preview.clone(), &palette.preview);
    }
    if !card.tags.is_empty() {
        let tags: Vec<String> = card.tags.iter().map(|t| format!("#{}", t)).collect();
        line(tags.join(" "), &palette.tag);
    }
    if !card.properties.is_empty() {
        let props: Vec<String> = card
            .properties
            .iter()
            .map(|p| format!("{}: {}", p.label, p.value))
            .collect();
        line(props.join(" · "), &palette.property);
    }
    if let Some(thumbnail) = &card.thumbnail {
        line(format!("[{}]", thumbnail), &palette.faint);
    }
}

/// Cuts `text` to at most `width` display columns, ending in an ellipsis when cut.
fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    let budget = width.saturating_sub(ELLIPSIS.width());
    let mut used = 0;
    let mut cut = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        cut.push(c);
    }
    if width >= ELLIPSIS.width() {
        cut.push_str(ELLIPSIS);
    }
    cut
}
