//! Human-readable cell formatting for CSV reports.

/// Formats whole dollars with thousands separators: `$1,234,567`,
/// `-$1,234`.
pub fn format_money(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if amount < 0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

/// Formats seconds as `<hours>h <minutes>m`, dropping leftover seconds.
pub fn format_duration_hm(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
}

pub(crate) fn minutes_one_decimal(seconds: i64) -> String {
    format!("{:.1}", seconds as f64 / 60.0)
}

pub(crate) fn yes_no(value: Option<bool>) -> &'static str {
    if value == Some(true) {
        "Yes"
    } else {
        "No"
    }
}

/// Earnings per hour, zero for empty durations.
pub(crate) fn per_hour(amount: i64, seconds: i64) -> i64 {
    if seconds <= 0 {
        return 0;
    }
    (amount as f64 * 3600.0 / seconds as f64).round() as i64
}

#[cfg(test)]
mod tests {
    use super::{format_duration_hm, format_money, minutes_one_decimal, per_hour, yes_no};

    #[test]
    fn money_is_grouped_by_thousands() {
        assert_eq!(format_money(0), "$0");
        assert_eq!(format_money(999), "$999");
        assert_eq!(format_money(1_000), "$1,000");
        assert_eq!(format_money(1_234_567), "$1,234,567");
        assert_eq!(format_money(-25_000), "-$25,000");
    }

    #[test]
    fn durations_render_hours_and_minutes() {
        assert_eq!(format_duration_hm(0), "0h 0m");
        assert_eq!(format_duration_hm(3_725), "1h 2m");
        assert_eq!(minutes_one_decimal(90), "1.5");
    }

    #[test]
    fn per_hour_handles_empty_duration() {
        assert_eq!(per_hour(500_000, 0), 0);
        assert_eq!(per_hour(500_000, 1_800), 1_000_000);
        assert_eq!(yes_no(None), "No");
    }
}
