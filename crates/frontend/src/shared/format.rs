//! Display formatting for the dashboard metrics.
//!
//! Currency renders as `$X,XXX.XX`, margins as `XX.XX%`; negative amounts
//! keep the sign between the `$` and the digits, matching the metric cards.

fn group_thousands(digits: &str) -> String {
    let mut result = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// `1234.5` -> `"$1,234.50"`, `-383.03` -> `"$-383.03"`
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 { "-" } else { "" };
    format!("${}{}.{}", sign, group_thousands(int_part), frac_part)
}

/// `6.6666` -> `"6.67%"`
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value)
}

/// Delta annotation: `13.333` -> `"+13.33%"`, `-6.7` -> `"-6.70%"`
pub fn format_signed_percent(value: f64) -> String {
    if value >= 0.0 {
        format!("+{:.2}%", value)
    } else {
        format!("{:.2}%", value)
    }
}
