//! Inline references.
//!
//! Notes link to each other with `[[target]]` or `[[target|alias]]`. When a value ends up in
//! a group header we want the human text only, so [`strip_inline_refs`] collapses every
//! reference to its alias (or target). Presentation layers that want clickable references
//! use [`split_inline_refs`] instead, which keeps the surrounding literal text intact.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::borrow::Cow;

static INLINE_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\[([^\[\]|]+)(?:\|([^\[\]]*))?\]\]").expect("inline ref pattern is valid")
});

/// A piece of text produced by [`split_inline_refs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'t> {
    /// Literal text between references, verbatim.
    Text(&'t str),
    /// One reference. `raw` is the full `[[...]]` span as it appeared in the input.
    Ref {
        raw: &'t str,
        target: &'t str,
        display: &'t str,
    },
}

impl<'t> Segment<'t> {
    /// The original text this segment covers.
    pub fn as_source(&self) -> &'t str {
        match self {
            Segment::Text(text) => text,
            Segment::Ref { raw, .. } => raw,
        }
    }
}

/// Replaces every inline reference with its alias, or with its target when there is no
/// alias.
///
/// Stripping runs until nothing matches, so the result never contains a reference and
/// stripping again is a no-op.
pub fn strip_inline_refs(text: &str) -> String {
    let mut current = text.to_string();
    loop {
        let next = match INLINE_REF.replace_all(&current, |caps: &Captures| {
            display_text(caps).to_string()
        }) {
            Cow::Borrowed(_) => None,
            Cow::Owned(replaced) => Some(replaced),
        };
        match next {
            Some(replaced) => current = replaced,
            None => return current,
        }
    }
}

/// Splits `text` into literal and reference segments, left to right.
///
/// The iterator is lazy and `Clone`, so a caller can walk it again from the start.
///
/// ```
/// use shelfapp::text::links::{split_inline_refs, Segment};
///
/// let segments: Vec<_> = split_inline_refs("see [[Home|the start]]!").collect();
/// assert_eq!(segments[0], Segment::Text("see "));
/// assert!(matches!(segments[1], Segment::Ref { target: "Home", display: "the start", .. }));
/// assert_eq!(segments[2], Segment::Text("!"));
/// ```
pub fn split_inline_refs(text: &str) -> InlineRefs<'_> {
    InlineRefs { text, pos: 0 }
}

/// Iterator returned by [`split_inline_refs`].
#[derive(Debug, Clone)]
pub struct InlineRefs<'t> {
    text: &'t str,
    pos: usize,
}

impl<'t> Iterator for InlineRefs<'t> {
    type Item = Segment<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.text.len() {
            return None;
        }

        let Some(caps) = INLINE_REF.captures_at(self.text, self.pos) else {
            let rest = &self.text[self.pos..];
            self.pos = self.text.len();
            return Some(Segment::Text(rest));
        };

        let whole = caps.get(0)?;
        if whole.start() > self.pos {
            // Literal text first; the reference is found again on the next call.
            let literal = &self.text[self.pos..whole.start()];
            self.pos = whole.start();
            return Some(Segment::Text(literal));
        }

        self.pos = whole.end();
        let target = caps.get(1).map_or("", |m| m.as_str());
        Some(Segment::Ref {
            raw: whole.as_str(),
            target,
            display: caps
                .get(2)
                .map(|m| m.as_str())
                .filter(|alias| !alias.is_empty())
                .unwrap_or(target),
        })
    }
}

fn display_text<'c>(caps: &'c Captures) -> &'c str {
    caps.get(2)
        .map(|m| m.as_str())
        .filter(|alias| !alias.is_empty())
        .or_else(|| caps.get(1).map(|m| m.as_str()))
        .unwrap_or("")
}
