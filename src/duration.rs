//! Human-readable duration fields for config ("10m", "6h", "1d").

use std::time::Duration;

use anyhow::{Context, Result};
use serde::{de, Deserialize, Deserializer};

/// Parse a duration like "90s", "15m", "6h" or "2d".
///
/// The unit suffix is required; bare numbers are rejected so a config
/// typo fails loudly instead of silently meaning seconds.
pub fn parse_duration(s: &str) -> Result<Duration> {
    let trimmed = s.trim();
    let (digits, multiplier) = if let Some(d) = trimmed.strip_suffix(['d', 'D']) {
        (d, 24 * 60 * 60)
    } else if let Some(h) = trimmed.strip_suffix(['h', 'H']) {
        (h, 60 * 60)
    } else if let Some(m) = trimmed.strip_suffix(['m', 'M']) {
        (m, 60)
    } else if let Some(secs) = trimmed.strip_suffix(['s', 'S']) {
        (secs, 1)
    } else {
        anyhow::bail!("duration {trimmed:?} must end with s, m, h, or d");
    };

    let count: u64 = digits
        .trim()
        .parse()
        .with_context(|| format!("invalid number in duration {trimmed:?}"))?;
    let secs = count
        .checked_mul(multiplier)
        .with_context(|| format!("duration {trimmed:?} overflows"))?;

    Ok(Duration::from_secs(secs))
}

/// Serde deserializer for duration fields expressed as "10m"-style strings.
pub fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_duration(&s).map_err(de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_each_unit() {
        assert_eq!(parse_duration("90s").unwrap(), Duration::from_secs(90));
        assert_eq!(parse_duration("15m").unwrap(), Duration::from_secs(15 * 60));
        assert_eq!(parse_duration("6h").unwrap(), Duration::from_secs(6 * 3600));
        assert_eq!(parse_duration("2d").unwrap(), Duration::from_secs(2 * 86400));
    }

    #[test]
    fn accepts_uppercase_and_whitespace() {
        assert_eq!(parse_duration(" 10M ").unwrap(), Duration::from_secs(600));
    }

    #[test]
    fn rejects_bare_numbers_and_garbage() {
        assert!(parse_duration("600").is_err());
        assert!(parse_duration("soon").is_err());
        assert!(parse_duration("h").is_err());
    }
}
