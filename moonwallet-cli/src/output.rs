//! Output formatting utilities

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};
use rust_decimal::Decimal;

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Format an amount with thousands separators, e.g. 68300.12 -> "68,300.12"
///
/// Sub-unit prices keep up to six decimal places so small-cap coins don't
/// render as 0.00.
pub fn format_amount(amount: &Decimal) -> String {
    let rounded = if amount.abs() < Decimal::ONE {
        amount.round_dp(6)
    } else {
        amount.round_dp(2)
    };

    let raw = rounded.to_string();
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (raw, None),
    };

    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part.as_str()),
    };

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}

/// Format an amount in the configured quote currency
pub fn format_price(amount: &Decimal, vs_currency: &str) -> String {
    match vs_currency {
        "usd" => format!("${}", format_amount(amount)),
        "eur" => format!("€{}", format_amount(amount)),
        other => format!("{} {}", format_amount(amount), other.to_uppercase()),
    }
}

/// Format a signed 24h change, e.g. "+2.07%"
pub fn format_percent(percent: f64) -> String {
    format!("{:+.2}%", percent)
}

/// Render a price series as a one-line unicode sparkline
pub fn sparkline(values: &[f64]) -> String {
    const BARS: [char; 8] = ['▁', '▂', '▃', '▄', '▅', '▆', '▇', '█'];

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if values.is_empty() || !min.is_finite() || !max.is_finite() {
        return String::new();
    }

    let range = max - min;
    values
        .iter()
        .map(|v| {
            if range == 0.0 {
                BARS[0]
            } else {
                let idx = ((v - min) / range * (BARS.len() - 1) as f64).round() as usize;
                BARS[idx.min(BARS.len() - 1)]
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_format_amount_grouping() {
        assert_eq!(format_amount(&dec("68300.12")), "68,300.12");
        assert_eq!(format_amount(&dec("1345000000000")), "1,345,000,000,000");
        assert_eq!(format_amount(&dec("160")), "160");
        assert_eq!(format_amount(&dec("-2847.63")), "-2,847.63");
    }

    #[test]
    fn test_format_amount_sub_unit() {
        assert_eq!(format_amount(&dec("0.00001234")), "0.000012");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(2.068), "+2.07%");
        assert_eq!(format_percent(-1.24), "-1.24%");
    }

    #[test]
    fn test_sparkline() {
        assert_eq!(sparkline(&[]), "");
        assert_eq!(sparkline(&[1.0, 1.0]), "▁▁");
        let line = sparkline(&[1.0, 2.0, 3.0]);
        assert_eq!(line.chars().count(), 3);
        assert!(line.ends_with('█'));
    }
}
