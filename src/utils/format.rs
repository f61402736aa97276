use chrono::{DateTime, Utc};

/// Truncate a string to a maximum length, adding ellipsis if needed
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{}...", truncated)
    }
}

/// Case-insensitive substring check for search filtering
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Short avatar tag for an anonymous ID: "#4782" -> "A4"
///
/// Anonymous IDs are a '#' followed by digits; the tag is 'A' plus the
/// first digit. Falls back to "??" for anything else.
pub fn avatar_tag(anonymous_id: &str) -> String {
    let first = anonymous_id.trim_start_matches('#').chars().next();
    match first {
        Some(c) if c.is_ascii_alphanumeric() => format!("A{}", c),
        _ => "??".to_string(),
    }
}

/// Format how long ago a session started: "just now", "5m", "2h", "3d"
pub fn format_session_age(started_at: DateTime<Utc>) -> String {
    let minutes = (Utc::now() - started_at).num_minutes();
    if minutes < 1 {
        "just now".to_string()
    } else if minutes < 60 {
        format!("{}m", minutes)
    } else if minutes < 1440 {
        format!("{}h", minutes / 60)
    } else {
        format!("{}d", minutes / 1440)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello", 10), "Hello");
        assert_eq!(truncate("Hello World", 8), "Hello...");
        assert_eq!(truncate("Hi", 2), "Hi");
    }

    #[test]
    fn test_contains_ignore_case() {
        assert!(contains_ignore_case("Anonymous #4782", "anon"));
        assert!(contains_ignore_case("Anonymous #4782", "4782"));
        assert!(!contains_ignore_case("Anonymous #4782", "9999"));
    }

    #[test]
    fn test_avatar_tag() {
        assert_eq!(avatar_tag("#4782"), "A4");
        assert_eq!(avatar_tag("#8932"), "A8");
        assert_eq!(avatar_tag("2341"), "A2");
        assert_eq!(avatar_tag(""), "??");
        assert_eq!(avatar_tag("#"), "??");
    }

    #[test]
    fn test_format_session_age() {
        assert_eq!(format_session_age(Utc::now()), "just now");
        assert_eq!(format_session_age(Utc::now() - Duration::minutes(5)), "5m");
        assert_eq!(format_session_age(Utc::now() - Duration::hours(3)), "3h");
        assert_eq!(format_session_age(Utc::now() - Duration::days(2)), "2d");
    }
}
