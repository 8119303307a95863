use crate::config::COIN_DECIMALS;

/// Format an atomic amount with the given number of decimals.
pub fn format_coin(amount: u64, decimals: u8) -> String {
    if decimals == 0 {
        return amount.to_string();
    }
    let scale = 10u64.pow(decimals as u32);
    format!(
        "{}.{:0width$}",
        amount / scale,
        amount % scale,
        width = decimals as usize
    )
}

/// Format an atomic amount of the native coin.
pub fn format_native(amount: u64) -> String {
    format_coin(amount, COIN_DECIMALS)
}

/// Parse a decimal coin string ("12.5") into atomic units.
///
/// Returns None when the value is malformed, has more fractional digits than
/// `decimals`, or would not fit in a u64.
pub fn from_coin(value: &str, decimals: u8) -> Option<u64> {
    let value = value.trim();
    let (whole, fraction) = match value.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (value, ""),
    };

    if fraction.len() > decimals as usize {
        return None;
    }

    let scale = 10u64.checked_pow(decimals as u32)?;
    let whole: u64 = whole.parse().ok()?;
    let fraction_value = if fraction.is_empty() {
        0
    } else {
        let parsed: u64 = fraction.parse().ok()?;
        parsed.checked_mul(10u64.pow((decimals as usize - fraction.len()) as u32))?
    };

    whole
        .checked_mul(scale)?
        .checked_add(fraction_value)
}
