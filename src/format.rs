//! Display formatting for market figures
//!
//! Every helper renders an absent figure as [`NOT_AVAILABLE`], never as zero
//! or an empty string.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Token rendered in place of an absent figure
pub const NOT_AVAILABLE: &str = "N/A";

/// Token rendered for an unbounded maximum supply
pub const UNBOUNDED: &str = "∞";

const SCALES: &[(f64, &str)] = &[(1e12, "T"), (1e9, "B"), (1e6, "M"), (1e3, "K")];

/// Formats a figure with a magnitude suffix and two decimals
///
/// ```
/// use crypto_market_board::format::format_number;
///
/// assert_eq!(format_number(Some(1_500_000.0)), "1.50M");
/// assert_eq!(format_number(Some(999.0)), "999.00");
/// assert_eq!(format_number(None), "N/A");
/// ```
pub fn format_number(value: Option<f64>) -> String {
    format_scaled(value, "", "")
}

/// Same as [`format_number`] with a currency prefix, e.g. `$1.50M`
pub fn format_amount(value: Option<f64>, prefix: &str) -> String {
    format_scaled(value, prefix, "")
}

/// Formats a figure with a magnitude suffix, wrapping it in `prefix`/`suffix`
pub fn format_scaled(value: Option<f64>, prefix: &str, suffix: &str) -> String {
    let Some(value) = value else {
        return NOT_AVAILABLE.to_string();
    };

    for (threshold, unit) in SCALES {
        if value >= *threshold {
            let scaled = round_half_up(value / threshold, 2);
            return format!("{}{:.2}{}{}", prefix, scaled, unit, suffix);
        }
    }

    format!("{}{:.2}{}", prefix, round_half_up(value, 2), suffix)
}

/// Formats a price in the reference currency
///
/// Prices of at least one unit get thousands grouping and two decimals;
/// smaller prices keep six decimals so sub-cent assets stay readable.
pub fn format_price(price: f64) -> String {
    if price >= 1.0 {
        let rounded = round_half_up(price, 2);
        format!("${}", group_thousands(&format!("{:.2}", rounded)))
    } else {
        format!("${:.6}", round_half_up(price, 6))
    }
}

/// [`format_price`] for a figure that may be absent
pub fn format_optional_price(price: Option<f64>) -> String {
    price
        .map(format_price)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Formats a percentage change with an explicit sign, e.g. `+2.45%`
pub fn format_percent(change: Option<f64>) -> String {
    match change {
        Some(change) if change > 0.0 => format!("+{:.2}%", round_half_up(change, 2)),
        Some(change) if change == 0.0 => "0.00%".to_string(),
        Some(change) => format!("{:.2}%", round_half_up(change, 2)),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Formats `numerator / denominator` as a percentage
///
/// Absent operands and a zero denominator render as N/A.
pub fn format_ratio(numerator: Option<f64>, denominator: Option<f64>) -> String {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d != 0.0 => {
            format!("{:.2}%", round_half_up(n / d * 100.0, 2))
        }
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Formats a timestamp as a calendar date
pub fn format_date(date: Option<DateTime<Utc>>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Rounds to `decimals` places with ties away from zero (`1.125` -> `1.13`)
fn round_half_up(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let rounded = (value * factor).round() / factor;
    if rounded.is_finite() {
        rounded
    } else {
        value
    }
}

/// Inserts `,` every three digits in the integer part of a decimal string
fn group_thousands(decimal: &str) -> String {
    let (sign, unsigned) = match decimal.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", decimal),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match frac_part {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Color category for a signed change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeTone {
    Positive,
    Negative,
    Neutral,
}

impl ChangeTone {
    /// Style class used by the rendering layer
    pub fn color_class(&self) -> &'static str {
        match self {
            ChangeTone::Positive => "text-web3-green",
            ChangeTone::Negative => "text-red-500",
            ChangeTone::Neutral => "text-muted-foreground",
        }
    }
}

/// Strictly positive is positive, strictly negative is negative,
/// zero and absent are neutral.
pub fn change_tone(change: Option<f64>) -> ChangeTone {
    match change {
        Some(c) if c > 0.0 => ChangeTone::Positive,
        Some(c) if c < 0.0 => ChangeTone::Negative,
        _ => ChangeTone::Neutral,
    }
}
