/// Trim whitespace, then drop every `"` in the field.
///
/// Quotes are removed wherever they appear, so a quoted field containing a
/// comma is not reassembled.
pub fn clean_str(raw: &str) -> String {
    raw.trim().replace('"', "")
}

/// Parse a decimal number, accepting only finite values.
pub fn parse_finite(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Lenient integer parse: leading whitespace, an optional sign, then the
/// longest run of ASCII digits. Anything after the digits is ignored, so
/// `"2020x"` yields `2020` while `"x2020"` yields `None`. Digit runs too large
/// for `i64` saturate.
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let (negative, rest) = split_sign(s.trim_start());
    let digits = digit_run(rest);
    if digits == 0 {
        return None;
    }
    let magnitude = rest[..digits].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Lenient decimal parse over the longest numeric prefix: optional sign,
/// digits, an optional `.` fraction and an optional exponent. `"12 TWh"`
/// yields `12.0` and `"3.5x"` yields `3.5`. Only finite results are returned.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let (_, unsigned) = split_sign(s);
    let sign_len = s.len() - unsigned.len();

    let int_digits = digit_run(unsigned);
    let mut end = int_digits;
    let mut frac_digits = 0;
    if unsigned[end..].starts_with('.') {
        frac_digits = digit_run(&unsigned[end + 1..]);
        end += 1 + frac_digits;
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if let Some(after_e) = unsigned[end..]
        .strip_prefix('e')
        .or_else(|| unsigned[end..].strip_prefix('E'))
    {
        let (_, exp_digits) = split_sign(after_e);
        let exp_len = digit_run(exp_digits);
        if exp_len > 0 {
            end += 1 + (after_e.len() - exp_digits.len()) + exp_len;
        }
    }

    s[..sign_len + end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

fn split_sign(s: &str) -> (bool, &str) {
    match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    }
}

fn digit_run(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}
