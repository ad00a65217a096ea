use once_cell::sync::Lazy;
use regex_lite::Regex;

/// Longest duration, in seconds, that still counts as a short.
pub const SHORT_MAX_SECONDS: u64 = 60;

static ISO_DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"P(?:(\d+)D)?T(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").expect("valid duration regex")
});

/// Converts an ISO-8601 duration such as `PT1H2M3S` into seconds.
///
/// Anything that does not look like a duration, or that overflows `u64`, yields 0.
pub fn parse_iso_duration(iso: &str) -> u64 {
    let caps = match ISO_DURATION.captures(iso) {
        Some(c) => c,
        None => return 0,
    };
    let part = |i: usize| -> Option<u64> {
        caps.get(i).map_or(Some(0), |m| m.as_str().parse().ok())
    };
    let total = || -> Option<u64> {
        part(1)?
            .checked_mul(86_400)?
            .checked_add(part(2)?.checked_mul(3600)?)?
            .checked_add(part(3)?.checked_mul(60)?)?
            .checked_add(part(4)?)
    };
    total().unwrap_or(0)
}

pub fn is_short_duration(seconds: u64) -> bool {
    seconds <= SHORT_MAX_SECONDS
}
