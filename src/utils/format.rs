// src/utils/format.rs
use chrono::{DateTime, Utc};

// Format a duration for display
pub fn format_time_ago(time: DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(time);

    let seconds = duration.num_seconds();

    if seconds < 60 {
        format!("{} seconds ago", seconds)
    } else if seconds < 3600 {
        format!("{} minutes ago", duration.num_minutes())
    } else if seconds < 86400 {
        format!("{} hours ago", duration.num_hours())
    } else {
        format!("{} days ago", duration.num_days())
    }
}

/// First few characters of a secret, for logs.
pub fn preview(secret: &str) -> String {
    secret.chars().take(10).collect::<String>() + "..."
}

// Generate a random signing secret
pub fn generate_secret() -> String {
    use rand::{thread_rng, RngCore};
    use base64::{engine::general_purpose, Engine as _};

    let mut secret = [0u8; 32];
    thread_rng().fill_bytes(&mut secret);

    general_purpose::STANDARD.encode(secret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_format_time_ago() {
        assert_eq!(format_time_ago(Utc::now() - Duration::minutes(5)), "5 minutes ago");
        assert_eq!(format_time_ago(Utc::now() - Duration::hours(3)), "3 hours ago");
        assert_eq!(format_time_ago(Utc::now() - Duration::days(2)), "2 days ago");
    }

    #[test]
    fn test_preview_never_reveals_whole_secret() {
        assert_eq!(preview("abcdefghijklmnop"), "abcdefghij...");
        assert_eq!(preview("short"), "short...");
    }

    #[test]
    fn test_generated_secrets_differ() {
        assert_ne!(generate_secret(), generate_secret());
    }
}
