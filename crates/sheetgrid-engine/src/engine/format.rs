/// Format a number for display.
///
/// Integral values print without a fractional part and other finite values
/// use the shortest decimal that round-trips. Non-finite values print as
/// `Infinity`, `-Infinity` and `NaN`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else if n == 0.0 {
        // Covers -0.0 as well.
        "0".to_string()
    } else {
        n.to_string()
    }
}
