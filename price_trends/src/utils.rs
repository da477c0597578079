//! Formatting helpers for presenting prices

/// Round to a whole number and group thousands with commas
///
/// Halves round to the even neighbour.
///
/// ```
/// use price_trends::utils::format_thousands;
///
/// assert_eq!(format_thousands(8123.567), "8,124");
/// assert_eq!(format_thousands(8124.5), "8,124");
/// assert_eq!(format_thousands(-1234567.0), "-1,234,567");
/// ```
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let digits = format!("{:.0}", value.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if value < 0.0 && digits != "0" {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

/// Price in Swiss francs, e.g. `CHF 8,124`
pub fn format_chf(value: f64) -> String {
    format!("CHF {}", format_thousands(value))
}
