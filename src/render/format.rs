
use chrono::{Utc, DateTime};

pub fn format_date_time(datetime: &DateTime<Utc>) -> String {
    format_since(datetime, Utc::now())
}

fn format_since(datetime: &DateTime<Utc>, now: DateTime<Utc>) -> String {
    let d = now.signed_duration_since(*datetime);
    if d.num_days() > 365 {
        datetime.format("%b %d %Y").to_string()
    } else if d.num_days() > 0 {
        datetime.format("%b %d").to_string()
    } else if d.num_hours() > 0 {
        format!("{}h ago", d.num_hours())
    } else if d.num_minutes() > 0 {
        format!("{}m ago", d.num_minutes())
    } else {
        "now".to_string()
    }
}

/// Replaces every `{{key}}` in one pass, so substituted text is never
/// scanned for placeholders again. Unknown keys stay as they are.
pub fn fill(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let key = &after[..end];
                match values.iter().find(|(k, _)| *k == key) {
                    Some((_, value)) => out.push_str(value),
                    None => {
                        out.push_str("{{");
                        out.push_str(key);
                        out.push_str("}}");
                    },
                }
                rest = &after[end + 2..];
            },
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            },
        }
    }
    out.push_str(rest);
    out
}
