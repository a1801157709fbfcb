//! Human-readable time labels for the editor header and the sidebar.
//!
//! Day boundaries are calendar days in the given time zone; the plain
//! functions use the local zone, the `_in` variants take one explicitly.

use crate::model::Note;
use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;

/// "Created just now", "Last edited 5 minutes ago", "Last edited on Monday", ...
pub fn activity_label(note: &Note, now: DateTime<Utc>) -> String {
    activity_label_in(note, now, &Local)
}

pub fn activity_label_in<Tz>(note: &Note, now: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let prefix = if note.has_been_edited() {
        "Last edited"
    } else {
        "Created"
    };
    let at = note.last_activity();
    let elapsed = now.signed_duration_since(at);

    if elapsed.num_minutes() < 1 {
        return format!("{} just now", prefix);
    }
    if elapsed.num_hours() < 24 {
        // Minutes below an hour, whole hours above; same floor as the sidebar.
        let formatter = timeago::Formatter::new();
        let ago = formatter.convert(elapsed.to_std().unwrap_or_default());
        return format!("{} {}", prefix, ago);
    }

    let local = at.with_timezone(tz);
    match days_between(at, now, tz) {
        1 => format!("{} yesterday", prefix),
        days if days < 7 => format!("{} on {}", prefix, local.format("%A")),
        days if days > 365 => format!("{} on {}", prefix, local.format("%b %-d, %Y")),
        _ => format!("{} on {}", prefix, local.format("%b %-d")),
    }
}

/// Short date for a sidebar row: time today, "Yesterday", weekday this week, else "Jan 5".
pub fn sidebar_date_label(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    sidebar_date_label_in(at, now, &Local)
}

pub fn sidebar_date_label_in<Tz>(at: DateTime<Utc>, now: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let local = at.with_timezone(tz);
    match days_between(at, now, tz) {
        0 => local.format("%-I:%M %p").to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => local.format("%A").to_string(),
        _ => local.format("%b %-d").to_string(),
    }
}

fn days_between<Tz: TimeZone>(at: DateTime<Utc>, now: DateTime<Utc>, tz: &Tz) -> i64 {
    let then = at.with_timezone(tz).date_naive();
    let today = now.with_timezone(tz).date_naive();
    today.signed_duration_since(then).num_days()
}
