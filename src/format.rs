//! Display-side formatting of currency values.
//!
//! The valuation pipeline emits raw decimals; everything about how they
//! look (rounding, thousands grouping, currency symbol) is decided here,
//! at the rendering edge.

/// Round a value to `decimals` places, half away from zero.
fn round_dp(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

fn group_integer_digits(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        grouped.push(ch);
        let remaining = len - i - 1;
        if remaining > 0 && remaining % 3 == 0 {
            grouped.push(',');
        }
    }
    grouped
}

/// Format a currency value for human display.
///
/// `decimals` controls rounding (0 renders whole currency units, the
/// usual setting for KRW). Grouping inserts thousands separators and
/// `symbol` prefixes the magnitude, after the sign.
pub fn format_currency(
    value: f64,
    decimals: u32,
    grouping: bool,
    symbol: Option<&str>,
) -> String {
    let rounded = round_dp(value, decimals);
    let negative = rounded < 0.0;
    let magnitude = format!("{:.*}", decimals as usize, rounded.abs());

    let magnitude = if grouping {
        match magnitude.split_once('.') {
            Some((int_part, frac)) => format!("{}.{frac}", group_integer_digits(int_part)),
            None => group_integer_digits(&magnitude),
        }
    } else {
        magnitude
    };

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    if let Some(sym) = symbol {
        out.push_str(sym);
    }
    out.push_str(&magnitude);
    out
}
