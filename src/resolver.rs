//! Effective-week resolution.
//!
//! A publication reference like "LNM 08/11, 11th Dist" carries the notice
//! week and two-digit year. The resolver normalizes it into a "20YYwWW"
//! identifier used to place the change on a time axis. The raw text reads
//! week-then-year; the identifier is built year-then-week. That swap is
//! deliberate and matches the surrounding report, which treats the first
//! captured group as a week number.

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static PUBLISHED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^LNM (?P<ww>[0-9]{2})/(?P<yy>[0-9]{2}), 11th Dist")
        .expect("publication reference pattern is valid")
});

/// Derives the optional "20YYwWW" effective-week identifier from a raw
/// publication reference.
///
/// Returns `None` when the reference does not match the expected pattern,
/// or when the captured two-digit year is strictly greater than the
/// two-digit year of `reference` (a different century; the listing data
/// starts in 2000, so all resolvable years are 2000+).
///
/// The reference time is injected rather than read from the wall clock so
/// resolution stays deterministic.
pub fn resolve_effective(published: &str, reference: DateTime<Utc>) -> Option<String> {
    let caps = PUBLISHED_RE.captures(published)?;
    let ww = caps.name("ww").map(|m| m.as_str())?;
    let yy = caps.name("yy").map(|m| m.as_str())?;

    let year: u8 = yy.parse().ok()?;
    if year > reference_two_digit_year(reference) {
        return None;
    }

    Some(format!("20{yy}w{ww}"))
}

fn reference_two_digit_year(reference: DateTime<Utc>) -> u8 {
    reference
        .format("%y")
        .to_string()
        .parse()
        .unwrap_or(u8::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(year: i32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, 6, 15, 12, 0, 0).unwrap()
    }

    #[test]
    fn resolves_week_and_year_in_swapped_order() {
        // Raw text is week/year; the identifier is year-then-week.
        let effective = resolve_effective("LNM 08/11, 11th Dist", at(2025));
        assert_eq!(effective.as_deref(), Some("2011w08"));
    }

    #[test]
    fn resolved_identifier_is_seven_characters() {
        let effective = resolve_effective("LNM 51/07, 11th Dist", at(2025)).unwrap();
        assert_eq!(effective.len(), 7);
        assert_eq!(&effective[4..5], "w");
    }

    #[test]
    fn current_year_is_accepted() {
        let effective = resolve_effective("LNM 22/25, 11th Dist", at(2025));
        assert_eq!(effective.as_deref(), Some("2025w22"));
    }

    #[test]
    fn future_year_is_rejected() {
        // Captured year 50 > current two-digit year 25: a different century.
        assert_eq!(resolve_effective("LNM 99/50, 11th Dist", at(2025)), None);
    }

    #[test]
    fn year_just_past_reference_is_rejected() {
        assert_eq!(resolve_effective("LNM 01/26, 11th Dist", at(2025)), None);
    }

    #[test]
    fn non_matching_text_is_unresolved() {
        let reference = at(2025);
        assert_eq!(resolve_effective("garbage text", reference), None);
        assert_eq!(resolve_effective("", reference), None);
        assert_eq!(resolve_effective("LNM 8/11, 11th Dist", reference), None);
        assert_eq!(resolve_effective("LNM 08/11", reference), None);
        // The pattern is anchored at the start.
        assert_eq!(
            resolve_effective("see LNM 08/11, 11th Dist", reference),
            None
        );
    }

    #[test]
    fn resolution_is_idempotent() {
        let reference = at(2025);
        let first = resolve_effective("LNM 08/11, 11th Dist", reference);
        let second = resolve_effective("LNM 08/11, 11th Dist", reference);
        assert_eq!(first, second);
    }
}
