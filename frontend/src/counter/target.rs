/// How a counter's number is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberStyle {
    /// Grouped digits, e.g. `1,500`.
    Plain,
    /// Ungrouped digits followed by `%`.
    Percentage,
}

/// The value a display surface counts up to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CounterTarget {
    pub value: f64,
    pub style: NumberStyle,
    pub duration_ms: f64,
}

impl CounterTarget {
    /// Reads a `data-target` style value. Only the leading integer counts,
    /// so `"1500+"` targets 1500.
    pub fn from_data_attribute(raw: &str, duration_ms: f64) -> Option<Self> {
        let value = leading_integer(raw)?;
        Self::accept(value, style_of(raw), duration_ms)
    }

    /// Reads the number already shown on the surface, e.g. `"98%"` or `"4.9"`.
    pub fn from_display_text(text: &str, duration_ms: f64) -> Option<Self> {
        let value = leading_float(text)?;
        Self::accept(value, style_of(text), duration_ms)
    }

    pub fn is_percentage(&self) -> bool {
        self.style == NumberStyle::Percentage
    }

    fn accept(value: f64, style: NumberStyle, duration_ms: f64) -> Option<Self> {
        // Zero has nothing to animate towards.
        if !value.is_finite() || value <= 0.0 {
            return None;
        }
        Some(Self {
            value,
            style,
            duration_ms,
        })
    }
}

/// Longest count-up accepted from markup or config.
pub const MAX_DURATION_MS: f64 = 60_000.0;

/// Parses a `data-duration` override; anything unusable yields `default_ms`.
/// Overrides longer than [`MAX_DURATION_MS`] are cut down to it.
pub fn duration_or(raw: Option<&str>, default_ms: f64) -> f64 {
    raw.and_then(leading_float)
        .filter(|ms| ms.is_finite() && *ms > 0.0)
        .map(|ms| ms.min(MAX_DURATION_MS))
        .unwrap_or(default_ms)
}

fn style_of(raw: &str) -> NumberStyle {
    if raw.contains('%') {
        NumberStyle::Percentage
    } else {
        NumberStyle::Plain
    }
}

/// Length of an optional sign followed by at least one digit, or None.
fn signed_digits(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let sign = usize::from(matches!(bytes.first(), Some(b'+') | Some(b'-')));
    let digits = bytes[sign..].iter().take_while(|b| b.is_ascii_digit()).count();
    (digits > 0).then_some(sign + digits)
}

fn leading_integer(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let end = signed_digits(s)?;
    s[..end].parse().ok()
}

fn leading_float(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+') | Some(b'-')));
    let int_digits = bytes[end..].iter().take_while(|b| b.is_ascii_digit()).count();
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = bytes[end + 1..].iter().take_while(|b| b.is_ascii_digit()).count();
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        if let Some(exp) = signed_digits(&s[end + 1..]) {
            end += 1 + exp;
        }
    }

    s[..end].parse().ok()
}
