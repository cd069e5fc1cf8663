//! Result formatting.

use crate::bench::BenchResult;

/// Significant digits of `format_general`.
const PRECISION: i32 = 6;

/// Format `x` like C's `%g`: six significant digits, trailing zeros
/// stripped, scientific notation for exponents below -4 or from 6 on.
pub fn format_general(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if x == 0.0 {
        return if x.is_sign_negative() { "-0" } else { "0" }.to_string();
    }

    // The exponent after rounding to the target precision.
    let sci = format!("{:.*e}", (PRECISION - 1) as usize, x);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exp < -4 || exp >= PRECISION {
        let sign = if exp < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            strip_trailing_zeros(mantissa),
            sign,
            exp.abs()
        )
    } else {
        let decimals = (PRECISION - 1 - exp) as usize;
        strip_trailing_zeros(&format!("{:.*}", decimals, x)).to_string()
    }
}

fn strip_trailing_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// The three report lines of one scenario, newline terminated.
pub fn format_report(name: &str, result: &BenchResult) -> String {
    format!(
        "{}\n  total time:    \t{} s\n  normalized time:\t{} s/Mgs\n",
        name,
        format_general(result.elapsed_time),
        format_general(result.normalized_time())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_general_fixed() {
        assert_eq!(format_general(2.0), "2");
        assert_eq!(format_general(0.5), "0.5");
        assert_eq!(format_general(1.23456789), "1.23457");
        assert_eq!(format_general(123456.0), "123456");
        assert_eq!(format_general(0.0001), "0.0001");
        assert_eq!(format_general(-3.25), "-3.25");
        assert_eq!(format_general(0.0), "0");
    }

    #[test]
    fn test_format_general_scientific() {
        assert_eq!(format_general(1234567.0), "1.23457e+06");
        assert_eq!(format_general(1e6), "1e+06");
        assert_eq!(format_general(0.00001234), "1.234e-05");
        assert_eq!(format_general(2.5e-10), "2.5e-10");
        assert_eq!(format_general(1e100), "1e+100");
    }

    #[test]
    fn test_format_general_rounding_carries_into_exponent() {
        assert_eq!(format_general(999999.5), "1e+06");
        assert_eq!(format_general(9.999999), "10");
    }

    #[test]
    fn test_format_general_non_finite() {
        assert_eq!(format_general(f64::NAN), "nan");
        assert_eq!(format_general(f64::INFINITY), "inf");
        assert_eq!(format_general(f64::NEG_INFINITY), "-inf");
    }

    #[test]
    fn test_format_report() {
        let report = format_report("Periodic 6x4 ", &BenchResult::new(2.0, 1e6));
        assert_eq!(
            report,
            "Periodic 6x4 \n  total time:    \t2 s\n  normalized time:\t2 s/Mgs\n"
        );
    }

    #[test]
    fn test_format_report_normalizes_by_million_grid_steps() {
        let report = format_report("Flux 1D 100", &BenchResult::new(1.5, 20_200_000.0));
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Flux 1D 100");
        assert_eq!(lines[1], "  total time:    \t1.5 s");
        assert_eq!(lines[2], "  normalized time:\t0.0742574 s/Mgs");
    }
}
