//! Float text for scalar nodes built from Rust literals.

use num_traits::float::FloatCore;
use zmij::Float;

/// Shortest round-trip text of `f` that still reads back as a YAML float.
///
/// zmij may print `4e-6` or `3`; both would resolve as something other than a
/// float fraction, so a `.0` is spliced in before the exponent or appended.
/// Non-finite values use `.nan`, `.inf` and `-.inf`.
pub(crate) fn float_to_yaml_string<F: Float + FloatCore>(f: F) -> String {
    if f.is_nan() {
        return ".nan".to_owned();
    }
    if f.is_infinite() {
        let text = if f.is_sign_positive() { ".inf" } else { "-.inf" };
        return text.to_owned();
    }

    let mut buf = zmij::Buffer::new();
    let digits = buf.format_finite(f);
    if digits.contains('.') {
        return digits.to_owned();
    }
    match digits.find(['e', 'E']) {
        Some(exp) => format!("{}.0{}", &digits[..exp], &digits[exp..]),
        None => format!("{digits}.0"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_values_keep_a_fraction() {
        assert_eq!(float_to_yaml_string(0.0_f64), "0.0");
        assert_eq!(float_to_yaml_string(1.5_f64), "1.5");
        assert_eq!(float_to_yaml_string(-3.0_f32), "-3.0");
    }

    #[test]
    fn exponent_gets_a_fraction_before_it() {
        let text = float_to_yaml_string(4e-6_f64);
        assert!(text.contains('.'), "{text}");
        assert_eq!(text.parse::<f64>().unwrap(), 4e-6);
    }

    #[test]
    fn non_finite_values_use_yaml_spellings() {
        assert_eq!(float_to_yaml_string(f64::NAN), ".nan");
        assert_eq!(float_to_yaml_string(f64::INFINITY), ".inf");
        assert_eq!(float_to_yaml_string(f64::NEG_INFINITY), "-.inf");
    }
}
