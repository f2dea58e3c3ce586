//! Engineering-notation values ("4.7k", "10u", "1meg").

/// SI prefixes accepted after a number, longest first so "meg" wins over "m".
const PREFIXES: &[(&str, f64)] = &[
    ("meg", 1e6),
    ("t", 1e12),
    ("g", 1e9),
    ("k", 1e3),
    ("m", 1e-3),
    ("u", 1e-6),
    ("µ", 1e-6),
    ("n", 1e-9),
    ("p", 1e-12),
    ("f", 1e-15),
];

/// Parse a number with an optional SI prefix.
///
/// Plain floats (including exponent form such as `1e-3`) parse as-is. Prefix
/// letters are case-insensitive, so `M` means milli, not mega; use `meg`.
pub fn parse_value(s: &str) -> Option<f64> {
    let s = s.trim();
    if let Ok(v) = s.parse::<f64>() {
        return Some(v);
    }

    let lower = s.to_lowercase();
    for (prefix, multiplier) in PREFIXES {
        if let Some(number) = lower.strip_suffix(prefix) {
            return number.trim_end().parse::<f64>().ok().map(|v| v * multiplier);
        }
    }
    None
}

/// Format a value with an SI prefix and three significant decimals.
pub fn format_value(value: f64) -> String {
    let abs_value = value.abs();
    let (scaled, suffix) = if abs_value == 0.0 || !abs_value.is_finite() {
        (value, "")
    } else if abs_value >= 1e9 {
        (value / 1e9, "G")
    } else if abs_value >= 1e6 {
        (value / 1e6, "M")
    } else if abs_value >= 1e3 {
        (value / 1e3, "k")
    } else if abs_value >= 1.0 {
        (value, "")
    } else if abs_value >= 1e-3 {
        (value * 1e3, "m")
    } else if abs_value >= 1e-6 {
        (value * 1e6, "u")
    } else if abs_value >= 1e-9 {
        (value * 1e9, "n")
    } else if abs_value >= 1e-12 {
        (value * 1e12, "p")
    } else {
        (value, "")
    };
    format!("{:.3}{}", scaled, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_plain() {
        assert_eq!(parse_value("100"), Some(100.0));
        assert_eq!(parse_value(" 1e-3 "), Some(1e-3));
        assert_eq!(parse_value("-5.5"), Some(-5.5));
    }

    #[test]
    fn test_parse_prefixes() {
        assert_relative_eq!(parse_value("4.7k").unwrap(), 4700.0);
        assert_relative_eq!(parse_value("10u").unwrap(), 10e-6);
        assert_relative_eq!(parse_value("10µ").unwrap(), 10e-6);
        assert_relative_eq!(parse_value("1meg").unwrap(), 1e6);
        assert_relative_eq!(parse_value("1MEG").unwrap(), 1e6);
        assert_relative_eq!(parse_value("2M").unwrap(), 2e-3);
        assert_relative_eq!(parse_value("33n").unwrap(), 33e-9);
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("abc"), None);
        assert_eq!(parse_value("k"), None);
        assert_eq!(parse_value("1x"), None);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(4700.0), "4.700k");
        assert_eq!(format_value(1e-3), "1.000m");
        assert_eq!(format_value(0.0), "0.000");
        assert_eq!(format_value(-2.2e-6), "-2.200u");
    }
}
