use super::target::{CounterTarget, NumberStyle};

pub fn group_thousands(n: u64, separator: &str) -> String {
    group_digits(&n.to_string(), separator)
}

/// Groups a plain run of ASCII digits; anything else comes back unchanged.
pub fn group_digits(digits: &str, separator: &str) -> String {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return digits.to_string();
    }
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push_str(separator);
        }
        out.push(ch);
    }
    out
}

/// Text for an intermediate tick: the floored running value.
pub fn render_progress(current: f64, style: NumberStyle, separator: &str) -> String {
    // f64 Display never switches to exponent form, so huge values stay digits.
    let whole = if current > 0.0 { current.floor() } else { 0.0 }.to_string();
    match style {
        NumberStyle::Plain => group_digits(&whole, separator),
        NumberStyle::Percentage => format!("{whole}%"),
    }
}

/// Text for the terminal tick: the declared target, never the accumulated value.
pub fn render_final(target: &CounterTarget, separator: &str) -> String {
    let literal = target.value.to_string();
    match target.style {
        NumberStyle::Percentage => format!("{literal}%"),
        NumberStyle::Plain => match literal.split_once('.') {
            Some((whole, fraction)) => format!("{}.{fraction}", group_digits(whole, separator)),
            None => group_digits(&literal, separator),
        },
    }
}
