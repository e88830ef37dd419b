//! Filing-period helpers

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Parse the leading integer of a string.
///
/// Leading whitespace and a single sign are accepted and parsing stops at the
/// first non-digit, so `"2023"`, `" 7"` and `"12.0"` all yield a number while
/// `"N/A"` and `""` yield `None`.
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return None;
    }

    let magnitude: i64 = rest[..digits_len].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Render a month number as its English name.
///
/// `"1"` is January and `"12"` is December; anything outside that range or
/// non-numeric renders as `N/A`.
pub fn month_name(month: &str) -> &'static str {
    match parse_leading_int(month) {
        Some(n @ 1..=12) => MONTH_NAMES[(n - 1) as usize],
        _ => "N/A",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_names_cover_the_year() {
        assert_eq!(month_name("1"), "January");
        assert_eq!(month_name("06"), "June");
        assert_eq!(month_name("12"), "December");
    }

    #[test]
    fn test_out_of_range_month_is_na() {
        assert_eq!(month_name("0"), "N/A");
        assert_eq!(month_name("13"), "N/A");
        assert_eq!(month_name("-1"), "N/A");
        assert_eq!(month_name("N/A"), "N/A");
        assert_eq!(month_name(""), "N/A");
    }

    #[test]
    fn test_parse_leading_int_stops_at_non_digit() {
        assert_eq!(parse_leading_int("2023"), Some(2023));
        assert_eq!(parse_leading_int("  7"), Some(7));
        assert_eq!(parse_leading_int("12.5"), Some(12));
        assert_eq!(parse_leading_int("-4x"), Some(-4));
        assert_eq!(parse_leading_int("x4"), None);
        assert_eq!(parse_leading_int("-"), None);
    }
}
