//! # Text Formatting
//!
//! Pure string helpers used when turning resolved property values into something a card can
//! show. None of these functions know about entries or grouping.
//!
//! - [`links`]: Wikilink-style inline references (`[[target]]`, `[[target|alias]]`)
//! - [`preview`]: Line-limited preview text
//! - [`time`]: Compact relative dates ("3h ago", "Yesterday")

pub mod links;
pub mod preview;
pub mod time;

pub use links::{split_inline_refs, strip_inline_refs, InlineRefs, Segment};
pub use preview::truncate_to_lines;
pub use time::relative_date;
