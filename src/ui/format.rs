//! Small parsing/display helpers shared by the pages.

use std::time::SystemTime;

use time::OffsetDateTime;

/// Form boundary rule: blank or unreadable fields are 0, never an error.
/// Negative entries are treated the same way.
pub fn parse_field(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .unwrap_or(0.0)
}

/// Initial text for an amount field: zero renders as an empty box.
pub fn field_text(value: f64) -> String {
    if value == 0.0 {
        String::new()
    } else {
        trim_num(value)
    }
}

/// Float display without a trailing `.0`.
pub fn trim_num(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// KRW amounts are shown rounded with thousands separators (ko-KR style).
pub fn format_krw(value: f64) -> String {
    let rounded = value.round() as i64;
    let negative = rounded < 0;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Margins are shown with one decimal place.
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// History timestamps (unix seconds) as a plain date.
pub fn format_unix_date(unix_seconds: u64) -> String {
    OffsetDateTime::from_unix_timestamp(unix_seconds as i64)
        .map(|dt| {
            format!(
                "{:04}-{:02}-{:02}",
                dt.year(),
                u8::from(dt.month()),
                dt.day()
            )
        })
        .unwrap_or_else(|_| "unknown".to_string())
}

pub fn humanize_age(fetched_at: SystemTime) -> String {
    let age = SystemTime::now()
        .duration_since(fetched_at)
        .unwrap_or_default()
        .as_secs();
    if age < 60 {
        format!("{age}s ago")
    } else if age < 3_600 {
        format!("{}m ago", age / 60)
    } else if age < 86_400 {
        format!("{}h ago", age / 3_600)
    } else {
        format!("{}d ago", age / 86_400)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_and_garbage_fields_become_zero() {
        assert_eq!(parse_field(""), 0.0);
        assert_eq!(parse_field("  "), 0.0);
        assert_eq!(parse_field("abc"), 0.0);
        assert_eq!(parse_field("-5"), 0.0);
        assert_eq!(parse_field("12.5"), 12.5);
    }

    #[test]
    fn field_text_hides_zero() {
        assert_eq!(field_text(0.0), "");
        assert_eq!(field_text(40_000.0), "40000");
        assert_eq!(field_text(2.4), "2.4");
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_krw(0.0), "0");
        assert_eq!(format_krw(999.0), "999");
        assert_eq!(format_krw(1_000.0), "1,000");
        assert_eq!(format_krw(40_000.4), "40,000");
        assert_eq!(format_krw(1_234_567.0), "1,234,567");
    }

    #[test]
    fn negative_amounts_keep_the_sign_outside_grouping() {
        assert_eq!(format_krw(-6_748.0), "-6,748");
        assert_eq!(format_krw(-999.6), "-1,000");
    }

    #[test]
    fn percents_have_one_decimal() {
        assert_eq!(format_percent(16.874), "16.9%");
        assert_eq!(format_percent(-3.0), "-3.0%");
    }

    #[test]
    fn unix_dates_render_as_ymd() {
        assert_eq!(format_unix_date(0), "1970-01-01");
        assert_eq!(format_unix_date(1_767_225_600), "2026-01-01");
    }
}
