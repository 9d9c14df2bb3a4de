//! Compact relative dates for card footers.
//!
//! | Age                      | Output       |
//! |--------------------------|--------------|
//! | under a minute (or future) | `Just now` |
//! | under an hour            | `{m}m ago`   |
//! | under 24 hours           | `{h}h ago`   |
//! | 24 whole hours           | `Yesterday`  |
//! | under 7 days             | `{d}d ago`   |
//! | under 30 days            | `{d/7}w ago` |
//! | under 365 days           | `{d/30}mo ago` |
//! | otherwise                | `{d/365}y ago` |
//!
//! Every unit is a floored count of whole elapsed units, not a calendar difference.

use chrono::{DateTime, Utc};

pub fn relative_date(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(then);

    let minutes = elapsed.num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{}m ago", minutes);
    }

    let hours = elapsed.num_hours();
    if hours < 24 {
        return format!("{}h ago", hours);
    }
    if hours == 24 {
        return "Yesterday".to_string();
    }

    let days = elapsed.num_days();
    match days {
        d if d < 7 => format!("{}d ago", d),
        d if d < 30 => format!("{}w ago", d / 7),
        d if d < 365 => format!("{}mo ago", d / 30),
        d => format!("{}y ago", d / 365),
    }
}
