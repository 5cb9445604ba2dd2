//! Parsing of duration cells exported by the timing provider.

/// Parse a duration cell into seconds.
///
/// Accepted forms:
/// - plain seconds: `81.046`
/// - clock notation: `1:21.046`, `00:01:21.046`
/// - pandas timedelta: `0 days 00:01:21.046000`
///
/// Returns `None` for anything else, including non-finite values.
#[must_use]
pub fn parse_seconds(raw: &str) -> Option<f64> {
    let s = raw.trim();
    let (days, clock) = match s.split_once(" day") {
        Some((d, rest)) => (d.trim().parse::<f64>().ok()?, rest.trim_start_matches('s').trim()),
        None => (0.0, s),
    };

    let parts: Vec<&str> = clock.split(':').collect();
    if parts.len() > 3 {
        return None;
    }
    let mut total = 0.0;
    for part in parts {
        let value: f64 = part.trim().parse().ok()?;
        total = total * 60.0 + value;
    }
    let seconds = days * 86_400.0 + total;
    seconds.is_finite().then_some(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 1e-9)
    }

    #[test]
    fn plain_seconds() {
        assert!(approx(parse_seconds("81.046"), 81.046));
        assert!(approx(parse_seconds(" 0.25 "), 0.25));
    }

    #[test]
    fn clock_notation() {
        assert!(approx(parse_seconds("1:21.046"), 81.046));
        assert!(approx(parse_seconds("00:01:21.046"), 81.046));
    }

    #[test]
    fn pandas_timedelta() {
        assert!(approx(parse_seconds("0 days 00:01:21.046000"), 81.046));
        assert!(approx(parse_seconds("1 day 00:00:01"), 86_401.0));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_seconds(""), None);
        assert_eq!(parse_seconds("NaT"), None);
        assert_eq!(parse_seconds("1:2:3:4"), None);
        assert_eq!(parse_seconds("inf"), None);
    }
}
