//! Amount display helpers.

/// Format a decimal APT amount with a fixed number of decimals and the unit.
///
/// `NaN` amounts (unreadable on-chain values) render as `"? APT"`.
pub fn format_apt(amount: f64, decimals: usize) -> String {
    if amount.is_nan() {
        return "? APT".to_string();
    }
    format!("{:.*} APT", decimals, amount)
}

/// Format a wallet balance: thousands separators, at most 8 decimals, trailing
/// zeros dropped (`1234.5` → `"1,234.5"`).
pub fn format_balance(amount: f64) -> String {
    if !amount.is_finite() {
        return "0".to_string();
    }
    let fixed = format!("{:.8}", amount.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    if frac.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac}")
    }
}
