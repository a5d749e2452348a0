//! Display helpers shared by every renderer.

use chrono::{DateTime, Local, Utc};

use crate::model::normalize_code;
use crate::timeline::REMARK_UPDATED;

/// Human label for an entry type. Unknown codes are humanized.
#[must_use]
pub fn type_label(kind: &str) -> String {
    let label = match normalize_code(kind).as_str() {
        "STAGE_CHANGE" => "Stage Change",
        "STATUS_CHANGE" => "Status Change",
        "CALL" => "Call",
        "MEETING" => "Meeting",
        "EMAIL" => "Email",
        "MESSAGE" => "Message",
        "NOTE" => "Note",
        "FOLLOW_UP" => "Follow-up",
        REMARK_UPDATED => "Remark",
        _ => return humanize_code(kind),
    };
    label.to_string()
}

/// `LEAD_CREATED` → `Lead Created`.
#[must_use]
pub fn humanize_code(code: &str) -> String {
    code.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Local wall-clock time, minute precision.
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

/// Cut `s` to `max` characters, marking the cut with `…`.
#[must_use]
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max).collect();
    out.push('…');
    out
}
