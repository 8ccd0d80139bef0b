//! Parsing of monetary amounts entered into forms.

/// The notice shown when an amount field does not hold a usable number.
pub const INVALID_AMOUNT_MSG: &str = "Please enter a valid amount.";

/// Parse the text of an amount field.
///
/// A blank field counts as zero. Thousands separators are accepted, e.g. "1,000.50".
/// Returns `None` if the text is not a finite number.
pub fn parse_amount(raw_amount: &str) -> Option<f64> {
    let raw_amount = raw_amount.trim();

    if raw_amount.is_empty() {
        return Some(0.0);
    }

    raw_amount
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
}

/// Round `amount` to the nearest cent, the precision amounts are shown with.
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
