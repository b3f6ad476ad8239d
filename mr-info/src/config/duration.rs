//! Parsing of `24h` / `1h30m` style durations.

use serde::{Deserialize, Deserializer};
use std::time::Duration;

/// Parses a duration made of `<number><unit>` parts with units `h`, `m`, `s`.
///
/// Returns `None` for empty input, unknown units or a number without a unit.
pub fn parse_duration(input: &str) -> Option<Duration> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    let mut total = 0u64;
    let mut digits = String::new();
    for c in input.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        let factor = match c {
            'h' => 3600,
            'm' => 60,
            's' => 1,
            _ => return None,
        };
        let value: u64 = digits.parse().ok()?;
        total = total.checked_add(value.checked_mul(factor)?)?;
        digits.clear();
    }

    digits.is_empty().then(|| Duration::from_secs(total))
}

/// Serde adapter for [`parse_duration`].
pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_duration(&raw).ok_or_else(|| {
        serde::de::Error::custom(format!(
            "invalid duration '{raw}', expected e.g. '24h', '90m' or '1h30m'"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_parse_single_unit() {
        assert_eq!(parse_duration("24h"), Some(Duration::from_secs(86_400)));
        assert_eq!(parse_duration("90m"), Some(Duration::from_secs(5_400)));
        assert_eq!(parse_duration("45s"), Some(Duration::from_secs(45)));
    }

    #[test]
    fn can_parse_combined_units() {
        assert_eq!(parse_duration("1h30m"), Some(Duration::from_secs(5_400)));
        assert_eq!(parse_duration(" 2h0m10s "), Some(Duration::from_secs(7_210)));
    }

    #[test]
    fn rejects_malformed_durations() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("24"), None);
        assert_eq!(parse_duration("h"), None);
        assert_eq!(parse_duration("3d"), None);
        assert_eq!(parse_duration("-1h"), None);
    }
}
