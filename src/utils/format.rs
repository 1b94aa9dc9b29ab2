// file: src/utils/format.rs
// description: number, currency and flag formatting shared by pdfs and tables
// reference: thousands separators, currency and percent display

/// Insert thousands separators into an unsigned digit string.
fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let lead = digits.len() % 3;

    for (i, ch) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - lead) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// `1234567` -> `1,234,567`
pub fn format_thousands(value: i64) -> String {
    let grouped = group_digits(&value.unsigned_abs().to_string());
    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// `1234.5` with 2 decimals -> `1,234.50`
pub fn format_decimal(value: f64, decimals: usize) -> String {
    let rendered = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rendered.as_str(), None),
    };

    let mut out = String::new();
    if value < 0.0 && rendered.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// `$1,234.56`
pub fn format_usd(value: f64) -> String {
    let body = format_decimal(value, 2);
    match body.strip_prefix('-') {
        Some(positive) => format!("-${}", positive),
        None => format!("${}", body),
    }
}

/// `$1,235` (no decimals)
pub fn format_usd_whole(value: f64) -> String {
    let body = format_decimal(value, 0);
    match body.strip_prefix('-') {
        Some(positive) => format!("-${}", positive),
        None => format!("${}", body),
    }
}

/// Ratio in [0, 1] as a percentage: `0.875` -> `87.50%`
pub fn format_ratio_percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

pub fn format_amount(value: Option<f64>) -> String {
    value.map(format_usd).unwrap_or_else(|| "N/A".to_string())
}

pub fn format_confidence(value: Option<f64>) -> String {
    value
        .map(format_ratio_percent)
        .unwrap_or_else(|| "N/A".to_string())
}

pub fn review_flag(needs_review: bool) -> &'static str {
    if needs_review { "⚠️ Yes" } else { "✅ No" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(45210), "45,210");
        assert_eq!(format_thousands(1234567), "1,234,567");
        assert_eq!(format_thousands(-1234), "-1,234");
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0.0), "$0.00");
        assert_eq!(format_usd(150.0), "$150.00");
        assert_eq!(format_usd(6000.0), "$6,000.00");
        assert_eq!(format_usd(18144.0), "$18,144.00");
        assert_eq!(format_usd(1234567.891), "$1,234,567.89");
        assert_eq!(format_usd(-42.5), "-$42.50");
    }

    #[test]
    fn test_format_usd_whole() {
        assert_eq!(format_usd_whole(1230000.0), "$1,230,000");
        assert_eq!(format_usd_whole(99.4), "$99");
    }

    #[test]
    fn test_confidence_and_flags() {
        assert_eq!(format_confidence(Some(0.875)), "87.50%");
        assert_eq!(format_confidence(None), "N/A");
        assert_eq!(format_amount(None), "N/A");
        assert_eq!(review_flag(true), "⚠️ Yes");
        assert_eq!(review_flag(false), "✅ No");
    }
}
