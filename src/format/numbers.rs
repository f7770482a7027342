//! Number rendering shared by the spec formatters.

/// Treats `None`, zero and NaN as "no value", the way the stored data uses them.
pub(crate) fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}

/// Renders a number without a trailing `.0` for integral values.
pub fn display_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// Renders a number with en-US thousands separators and at most three
/// fraction digits.
pub fn locale_number(value: f64) -> String {
    if !value.is_finite() {
        return display_number(value);
    }

    let fixed = format!("{:.3}", value.abs());
    let (int_digits, frac_digits) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_digits = frac_digits.trim_end_matches('0');

    let mut out = String::new();
    if value < 0.0 && (int_digits != "0" || !frac_digits.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_thousands(int_digits));
    if !frac_digits.is_empty() {
        out.push('.');
        out.push_str(frac_digits);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
