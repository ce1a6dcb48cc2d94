//! Prices are stored as the formatted string the artisan typed; these helpers
//! move between that form and numbers.

/// Currency prefix used for totals when none is known.
pub const DEFAULT_CURRENCY: &str = "₹";

/// Extracts the numeric value of a formatted price.
///
/// Every character other than digits, `.` and `-` is dropped, then the longest
/// leading run that parses as a float is used (`"₹8,999"` -> `8999.0`,
/// `"$1.5.0"` -> `1.5`). Returns `None` when nothing parseable remains.
///
/// A `.` inside a currency label is kept too, so `"Rs. 450"` reads as `.450`
/// (`0.45`), the same result as a lenient float-prefix parse. Store prices with a
/// symbol prefix such as `"₹450"`.
pub fn parse_price(price: &str) -> Option<f64> {
    let cleaned: String = price
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    // `cleaned` is ASCII, so every index is a char boundary.
    (1..=cleaned.len())
        .rev()
        .find_map(|end| cleaned[..end].parse::<f64>().ok())
}

/// Joins a currency symbol and the amount the artisan entered, as the product form does.
pub fn format_price(currency: &str, amount: &str) -> String {
    format!("{}{}", currency, amount.trim())
}

/// Renders a computed total with two decimals.
pub fn format_amount(currency: &str, value: f64) -> String {
    format!("{}{:.2}", currency, value)
}
