//! Number formatting in the style of C's `%g`.

/// Format `x` with `precision` significant digits, `%g`-style: scientific
/// notation when the exponent is below -4 or at least `precision`, trailing
/// zeros removed. Non-finite values render as `NaN`, `+Inf` and `-Inf`.
pub fn format_g(x: f64, precision: usize) -> String {
    if x.is_nan() {
        return "NaN".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }
    if x == 0.0 {
        return "0".to_string();
    }

    let p = precision.max(1);
    // Round to `p` significant digits first so the exponent reflects carries
    // (9999.7 at 4 digits is 1e+04).
    let sci = format!("{:.*e}", p - 1, x);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exp < -4 || exp >= p as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", trim_zeros(mantissa), sign, exp.unsigned_abs())
    } else {
        let decimals = (p as i32 - 1 - exp).max(0) as usize;
        trim_zeros(&format!("{:.*}", decimals, x)).to_string()
    }
}

/// Fixed-width console cell (`%10.4g`).
pub fn format_cell(x: f64) -> String {
    format!("{:>10}", format_g(x, 4))
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
