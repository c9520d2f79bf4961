//! Human-friendly durations such as `5s`, `500ms`, `2m`.

use std::time::Duration;

use serde::{de, Deserialize, Deserializer};

/// Shortest accepted poll interval.
pub const MIN_INTERVAL: Duration = Duration::from_millis(100);

/// Longest accepted poll interval.
pub const MAX_INTERVAL: Duration = Duration::from_secs(7 * 86400);

/// Parse an interval string like "500ms", "5s", "30m", "1h", "1d" or a raw
/// number of seconds. The result lies within [`MIN_INTERVAL`, `MAX_INTERVAL`].
pub fn parse_interval(s: &str) -> Result<Duration, String> {
    let s = s.trim().to_lowercase();

    let (digits, unit_ms, unit) = if let Some(ms) = s.strip_suffix("ms") {
        (ms, 1, "milliseconds")
    } else if let Some(secs) = s.strip_suffix('s') {
        (secs, 1_000, "seconds")
    } else if let Some(minutes) = s.strip_suffix('m') {
        (minutes, 60_000, "minutes")
    } else if let Some(hours) = s.strip_suffix('h') {
        (hours, 3_600_000, "hours")
    } else if let Some(days) = s.strip_suffix('d') {
        (days, 86_400_000, "days")
    } else {
        (s.as_str(), 1_000, "interval")
    };

    let count = digits.trim().parse::<u64>().map_err(|_| {
        if unit == "interval" {
            format!("Invalid interval: {}. Use format like '5s', '500ms', '1m'", s)
        } else {
            format!("Invalid {}: {}", unit, digits)
        }
    })?;

    let interval = count
        .checked_mul(unit_ms)
        .map(Duration::from_millis)
        .filter(|d| *d <= MAX_INTERVAL)
        .ok_or_else(|| {
            format!(
                "Interval {} is too long, the maximum is {}",
                s,
                format_interval(MAX_INTERVAL)
            )
        })?;

    if interval < MIN_INTERVAL {
        return Err(format!(
            "Interval {} is too short, the minimum is {}",
            s,
            format_interval(MIN_INTERVAL)
        ));
    }
    Ok(interval)
}

/// Format an interval for display, using the largest exact unit.
pub fn format_interval(interval: Duration) -> String {
    let millis = interval.as_millis();
    if millis % 1000 != 0 {
        return format!("{}ms", millis);
    }

    let secs = interval.as_secs();
    if secs >= 86400 && secs.is_multiple_of(86400) {
        format!("{}d", secs / 86400)
    } else if secs >= 3600 && secs.is_multiple_of(3600) {
        format!("{}h", secs / 3600)
    } else if secs >= 60 && secs.is_multiple_of(60) {
        format!("{}m", secs / 60)
    } else {
        format!("{}s", secs)
    }
}

pub(crate) fn deserialize_interval<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_interval(&s).map_err(de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_interval() {
        assert_eq!(parse_interval("5s").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_interval("500ms").unwrap(), Duration::from_millis(500));
        assert_eq!(parse_interval("30m").unwrap(), Duration::from_secs(1800));
        assert_eq!(parse_interval("1h").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_interval("1d").unwrap(), Duration::from_secs(86400));
        assert_eq!(parse_interval("60").unwrap(), Duration::from_secs(60));
        assert_eq!(parse_interval(" 10S ").unwrap(), Duration::from_secs(10));
        assert!(parse_interval("invalid").is_err());
        assert!(parse_interval("5x").is_err());
    }

    #[test]
    fn test_zero_and_tiny_intervals_are_rejected() {
        assert!(parse_interval("0").is_err());
        assert!(parse_interval("0s").is_err());
        assert!(parse_interval("50ms").is_err());
        assert_eq!(parse_interval("100ms").unwrap(), MIN_INTERVAL);
    }

    #[test]
    fn test_huge_intervals_are_rejected() {
        assert_eq!(parse_interval("7d").unwrap(), MAX_INTERVAL);
        assert!(parse_interval("8d").is_err());
        assert!(parse_interval("18446744073709551615").is_err());
        assert!(parse_interval("18446744073709551615d").is_err());
        assert!(parse_interval("307445734561825861m").is_err());
    }

    #[test]
    fn test_format_interval() {
        assert_eq!(format_interval(Duration::from_secs(5)), "5s");
        assert_eq!(format_interval(Duration::from_millis(1500)), "1500ms");
        assert_eq!(format_interval(Duration::from_secs(1800)), "30m");
        assert_eq!(format_interval(Duration::from_secs(86400)), "1d");
        assert_eq!(format_interval(Duration::from_secs(7200)), "2h");
        assert_eq!(format_interval(Duration::from_secs(90)), "90s");
    }
}
