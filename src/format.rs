use crate::process::Cell;

/// Format a number the way `es-ES` locales print it: `.` groups thousands,
/// `,` separates decimals, trailing fractional zeros dropped. Four-digit
/// integers are not grouped (`1234`, but `12.345`). Non-finite values print
/// as the `N/A` sentinel.
pub fn format_es(value: f64, max_fraction_digits: usize) -> String {
    if !value.is_finite() {
        return Cell::MISSING.to_string();
    }

    let rendered = format!("{:.*}", max_fraction_digits, value.abs());
    let (int_part, frac_part) = match rendered.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (rendered.as_str(), ""),
    };

    let grouped = if int_part.len() >= 5 {
        group_thousands(int_part, '.')
    } else {
        int_part.to_string()
    };

    let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();
    let mut out = String::with_capacity(grouped.len() + frac_part.len() + 2);
    if value < 0.0 && !is_zero {
        out.push('-');
    }
    out.push_str(&grouped);
    if !frac_part.is_empty() {
        out.push(',');
        out.push_str(frac_part);
    }
    out
}

fn group_thousands(digits: &str, separator: char) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(c);
    }
    out
}

/// `12.34%` with two decimals, or `N/A` when not finite.
pub fn format_percent(value: f64) -> String {
    if value.is_finite() {
        format!("{:.2}%", value)
    } else {
        Cell::MISSING.to_string()
    }
}

/// Table rendering of a cell: numbers in `es-ES` style with at most two decimals.
pub fn format_cell(cell: &Cell) -> String {
    match cell {
        Cell::Number(n) => format_es(*n, 2),
        other => other.to_string(),
    }
}
