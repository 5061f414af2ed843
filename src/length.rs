//! Utilities for parsing inline-style and legacy attribute sizes.
//!
//! Cells carry their size either as an inline style (`width: 120px`) or as a
//! legacy attribute (`width="120"` / `width="25%"`). Both are read the same
//! lenient way: a leading number, optionally followed by a unit.

/// A declared size on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Length {
    /// Absolute size in CSS pixels (unitless legacy values land here too).
    Px(f32),
    /// Percentage of the table's extent on the same axis.
    Percent(f32),
}

impl Length {
    /// Resolve to pixels, converting percentages against `table_extent`.
    ///
    /// Percentages are floored to whole pixels.
    pub fn to_px(self, table_extent: f32) -> f32 {
        match self {
            Length::Px(px) => px,
            Length::Percent(pct) => (pct / 100.0 * table_extent).floor(),
        }
    }
}

/// Parse a size string like `"120px"`, `"120"`, `"33.5%"` or `" 80px "`.
///
/// Returns `None` when there is no leading number. Any unit other than `%`
/// is treated as pixels.
pub fn parse_length(value: &str) -> Option<Length> {
    let trimmed = value.trim();
    let number_len = leading_number_len(trimmed.as_bytes());
    if number_len == 0 {
        return None;
    }
    let number: f32 = trimmed.get(..number_len)?.parse().ok()?;
    if !number.is_finite() {
        return None;
    }
    if trimmed.ends_with('%') {
        Some(Length::Percent(number))
    } else {
        Some(Length::Px(number))
    }
}

/// Parse a span attribute (`rowspan` / `colspan`), clamped to `max`.
///
/// Absent, non-numeric or non-positive values default to 1. Values too
/// large to represent clamp to `max` as well.
pub fn parse_span(value: Option<&str>, max: usize) -> usize {
    value
        .and_then(|v| {
            let trimmed = v.trim();
            let digits = trimmed
                .bytes()
                .take_while(|b| b.is_ascii_digit())
                .count();
            let number = trimmed.get(..digits).filter(|d| !d.is_empty())?;
            Some(number.parse::<usize>().unwrap_or(max))
        })
        .filter(|&span| span >= 1)
        .map_or(1, |span| span.min(max))
}

/// Length in bytes of the numeric prefix (`-?digits(.digits)?`).
fn leading_number_len(bytes: &[u8]) -> usize {
    let mut len = 0;
    if matches!(bytes.first(), Some(b'-' | b'+')) {
        len += 1;
    }
    let int_start = len;
    while bytes.get(len).is_some_and(u8::is_ascii_digit) {
        len += 1;
    }
    let mut saw_digit = len > int_start;
    if bytes.get(len) == Some(&b'.') {
        let frac_start = len + 1;
        let mut end = frac_start;
        while bytes.get(end).is_some_and(u8::is_ascii_digit) {
            end += 1;
        }
        if end > frac_start {
            len = end;
            saw_digit = true;
        }
    }
    if saw_digit {
        len
    } else {
        0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pixel_lengths() {
        assert_eq!(parse_length("120px"), Some(Length::Px(120.0)));
        assert_eq!(parse_length("120"), Some(Length::Px(120.0)));
        assert_eq!(parse_length(" 80.5px "), Some(Length::Px(80.5)));
        assert_eq!(parse_length("3em"), Some(Length::Px(3.0)));
    }

    #[test]
    fn test_parse_percent_lengths() {
        assert_eq!(parse_length("25%"), Some(Length::Percent(25.0)));
        assert_eq!(parse_length("12.5%"), Some(Length::Percent(12.5)));
    }

    #[test]
    fn test_parse_invalid_lengths() {
        assert_eq!(parse_length(""), None);
        assert_eq!(parse_length("auto"), None);
        assert_eq!(parse_length("px"), None);
        assert_eq!(parse_length("-"), None);
        assert_eq!(parse_length("."), None);
    }

    #[test]
    fn test_percent_to_px_floors() {
        assert_eq!(Length::Percent(25.0).to_px(401.0), 100.0);
        assert_eq!(Length::Percent(50.0).to_px(300.0), 150.0);
        assert_eq!(Length::Px(42.0).to_px(1000.0), 42.0);
    }

    #[test]
    fn test_parse_span() {
        assert_eq!(parse_span(None, 1000), 1);
        assert_eq!(parse_span(Some("3"), 1000), 3);
        assert_eq!(parse_span(Some(" 2 "), 1000), 2);
        assert_eq!(parse_span(Some("0"), 1000), 1);
        assert_eq!(parse_span(Some("-2"), 1000), 1);
        assert_eq!(parse_span(Some("abc"), 1000), 1);
        assert_eq!(parse_span(Some("4abc"), 1000), 4);
    }

    #[test]
    fn test_parse_span_clamps_huge_values() {
        assert_eq!(parse_span(Some("1000000000"), 1000), 1000);
        assert_eq!(parse_span(Some("1001"), 1000), 1000);
        assert_eq!(parse_span(Some("70000"), 65534), 65534);
        assert_eq!(parse_span(Some("99999999999999999999999999"), 1000), 1000);
    }
}
