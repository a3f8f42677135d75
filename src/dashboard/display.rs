use chrono::{DateTime, Utc};

/// Short age label for list rows: "Just now", "12 min ago", "2 hours ago",
/// "3 days ago". Timestamps in the future read as "Just now".
pub fn relative_age(now: DateTime<Utc>, then: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes();
    if minutes < 1 {
        return "Just now".to_string();
    }
    if minutes < 60 {
        return format!("{minutes} min ago");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{hours} hour{} ago", plural(hours));
    }

    let days = hours / 24;
    format!("{days} day{} ago", plural(days))
}

fn plural(n: i64) -> &'static str {
    if n > 1 {
        "s"
    } else {
        ""
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_relative_age_labels() {
        let now = Utc::now();
        let cases = [
            (Duration::seconds(20), "Just now"),
            (Duration::minutes(1), "1 min ago"),
            (Duration::minutes(59), "59 min ago"),
            (Duration::minutes(60), "1 hour ago"),
            (Duration::minutes(150), "2 hours ago"),
            (Duration::hours(24), "1 day ago"),
            (Duration::hours(80), "3 days ago"),
            (Duration::minutes(-5), "Just now"),
        ];
        for (age, expected) in cases {
            assert_eq!(relative_age(now, now - age), expected, "{age:?}");
        }
    }
}
