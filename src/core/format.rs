//! Number formatting in the es-CL convention (`.` groups thousands, `,` separates decimals).

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Formats with exactly `decimals` fraction digits, e.g. `0,11` or `45.000`.
pub fn format_fixed(value: f64, decimals: u32) -> String {
    format_number(value, decimals, decimals)
}

/// Formats an input amount: grouped, up to two decimals, trailing zeros dropped.
pub fn format_amount(value: f64) -> String {
    format_number(value, 0, 2)
}

pub fn format_number(value: f64, min_fraction: u32, max_fraction: u32) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    let plain = match Decimal::from_f64(value) {
        Some(decimal) => decimal
            .round_dp_with_strategy(max_fraction, RoundingStrategy::MidpointAwayFromZero)
            .to_string(),
        // Beyond Decimal's range there are no fraction digits left to round.
        None => format!("{value:.0}"),
    };

    let (negative, magnitude) = match plain.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, plain.as_str()),
    };
    let (integer, fraction) = magnitude.split_once('.').unwrap_or((magnitude, ""));

    let mut fraction = fraction.trim_end_matches('0').to_string();
    let is_zero = fraction.is_empty() && integer.chars().all(|c| c == '0');
    while fraction.len() < min_fraction as usize {
        fraction.push('0');
    }

    let mut out = String::new();
    if negative && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(integer));
    if !fraction.is_empty() {
        out.push(',');
        out.push_str(&fraction);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped
}
