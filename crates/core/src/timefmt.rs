use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 3_600;
const DAY: i64 = 86_400;

/// Formats the distance between two instants as a Spanish relative label.
///
/// Thresholds are fixed: under a minute, minutes, hours, then days.
/// A timestamp in the future (clock skew between backend and client) is
/// treated as "just now".
#[must_use]
pub fn relative_label(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let secs = now.signed_duration_since(at).num_seconds().max(0);

    if secs < MINUTE {
        "hace unos segundos".to_string()
    } else if secs < HOUR {
        format!("hace {} min", secs / MINUTE)
    } else if secs < DAY {
        format!("hace {} h", secs / HOUR)
    } else {
        format!("hace {} días", secs / DAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;
    use chrono::Duration;

    #[test]
    fn seconds_ago_is_just_now() {
        let now = fixed_now();
        assert_eq!(relative_label(now - Duration::seconds(5), now), "hace unos segundos");
        assert_eq!(relative_label(now - Duration::seconds(59), now), "hace unos segundos");
    }

    #[test]
    fn minutes_and_hours_use_integer_division() {
        let now = fixed_now();
        assert_eq!(relative_label(now - Duration::seconds(60), now), "hace 1 min");
        assert_eq!(relative_label(now - Duration::minutes(59), now), "hace 59 min");
        assert_eq!(relative_label(now - Duration::minutes(90), now), "hace 1 h");
        assert_eq!(relative_label(now - Duration::hours(23), now), "hace 23 h");
    }

    #[test]
    fn days_beyond_24_hours() {
        let now = fixed_now();
        assert_eq!(relative_label(now - Duration::hours(24), now), "hace 1 días");
        assert_eq!(relative_label(now - Duration::days(10), now), "hace 10 días");
    }

    #[test]
    fn future_timestamp_clamps_to_just_now() {
        let now = fixed_now();
        assert_eq!(relative_label(now + Duration::hours(2), now), "hace unos segundos");
    }
}
