use once_cell::sync::Lazy;
use regex::Regex;

static HOURS: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9]+)H").unwrap());
static MINUTES: Lazy<Regex> = Lazy::new(|| Regex::new(r"([0-9]+)M").unwrap());

/// Convert an ISO 8601-like duration token to whole minutes
///
/// e.g., PT30M -> 30, PT1H30M -> 90, PT2H -> 120
///
/// The hour and minute components are looked up independently, so their order
/// in the token does not matter. Anything unrecognisable counts as 0: empty
/// strings, tokens without units, and digit runs too large for a `u32`.
pub fn parse_minutes(token: &str) -> u32 {
    let token = token.strip_prefix("PT").unwrap_or(token);

    let hours = capture_number(&HOURS, token);
    let minutes = capture_number(&MINUTES, token);

    hours.saturating_mul(60).saturating_add(minutes)
}

/// Like [`parse_minutes`], but for a field that may be missing altogether
pub fn parse_optional_minutes(token: Option<&str>) -> u32 {
    token.map(parse_minutes).unwrap_or(0)
}

fn capture_number(pattern: &Regex, haystack: &str) -> u32 {
    pattern
        .captures(haystack)
        .and_then(|caps| caps.get(1))
        .and_then(|digits| digits.as_str().parse().ok())
        .unwrap_or(0)
}
