//! Utility functions for string and number handling.

/// Case-fold a string for matching.
///
/// Plain Unicode lower-casing, no diacritic stripping: `"Ålesund"` folds to
/// `"ålesund"`, not `"alesund"`.
#[inline]
pub fn fold_case(value: &str) -> String {
    value.to_lowercase()
}

/// Parse a leaf or operand as a float.
///
/// Surrounding whitespace is ignored. Only decimal notation parses: empty
/// strings, `NaN` and spelled-out infinities (`inf`, `Infinity`) do not, so a
/// non-numeric value can never satisfy a numeric comparison.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let digits = trimmed.trim_start_matches(['+', '-']);
    if !digits.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Render a float the way JavaScript's `String(x)` does.
///
/// Integral values drop the fraction (`30.0` → `"30"`, `-0.0` → `"0"`).
/// Magnitudes from `1e21` up, or below `1e-6`, use exponent notation with an
/// explicit sign (`"1e+21"`, `"1.5e-7"`).
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let magnitude = n.abs();
    if !(1e-6..1e21).contains(&magnitude) {
        let exp = format!("{:e}", n);
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{}e+{}", mantissa, power)
            }
            _ => exp,
        };
    }
    if n.fract() == 0.0 {
        // Exact for every integral f64 below 1e21.
        return format!("{}", n as i128);
    }
    format!("{}", n)
}
