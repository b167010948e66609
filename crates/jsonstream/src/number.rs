/// Formats a float as plain decimal text, independent of any locale.
///
/// - shortest digits that round-trip (ryu)
/// - no exponent notation
/// - no trailing fractional zeros, no dangling `.`
/// - `-0` becomes `0`
///
/// Returns `None` for NaN and the infinities, which have no decimal form.
pub(crate) fn format_f64(value: f64) -> Option<String> {
    if !value.is_finite() {
        return None;
    }
    if value == 0.0 {
        return Some(String::from("0"));
    }

    let mut buf = ryu::Buffer::new();
    let raw = buf.format_finite(value.abs());
    let body = match raw.find(['e', 'E']) {
        Some(at) => {
            let exp: i32 = raw[at + 1..].parse().ok()?;
            shift_point(&raw[..at], exp)
        }
        None => String::from(raw),
    };
    let body = trim_fraction(body);

    if value.is_sign_negative() {
        let mut out = String::with_capacity(body.len() + 1);
        out.push('-');
        out.push_str(&body);
        Some(out)
    } else {
        Some(body)
    }
}

/// Moves the decimal point of `mantissa` by `exp` places, padding with zeros.
fn shift_point(mantissa: &str, exp: i32) -> String {
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let digits: String = [int_part, frac_part].concat();
    let point = int_part.len() as i64 + exp as i64;

    if point <= 0 {
        let zeros = (-point) as usize;
        let mut out = String::with_capacity(digits.len() + zeros + 2);
        out.push_str("0.");
        out.extend(core::iter::repeat_n('0', zeros));
        out.push_str(&digits);
        out
    } else if point as usize >= digits.len() {
        let zeros = point as usize - digits.len();
        let mut out = String::with_capacity(point as usize);
        out.push_str(&digits);
        out.extend(core::iter::repeat_n('0', zeros));
        out
    } else {
        let (head, tail) = digits.split_at(point as usize);
        format!("{}.{}", head, tail)
    }
}

fn trim_fraction(mut s: String) -> String {
    if s.contains('.') {
        let kept = s.trim_end_matches('0').trim_end_matches('.').len();
        s.truncate(kept);
    }
    s
}
