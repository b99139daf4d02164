/// Format a floating-point number with thousands separators and a fixed number
/// of decimal places.
///
/// # Examples
///
/// ```
/// use dashboard_core::formatting::format_number;
///
/// assert_eq!(format_number(1234.5,  1), "1,234.5");
/// assert_eq!(format_number(1234567.0, 0), "1,234,567");
/// assert_eq!(format_number(-9876.5, 1), "-9,876.5");
/// ```
pub fn format_number(value: f64, decimals: u32) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let negative = value < 0.0;
    let abs_value = value.abs();

    // Nudge by half an ULP at the target precision so exact midpoints such as
    // 1.005 round away from zero.
    let factor = 10_f64.powi(decimals as i32);
    let epsilon = f64::EPSILON * abs_value * factor;
    let rounded = ((abs_value * factor) + epsilon).round() / factor;

    let integer_part = rounded.trunc() as u64;
    let grouped = group_thousands(&integer_part.to_string());

    let result = if decimals == 0 {
        grouped
    } else {
        let frac_str = format!("{:.prec$}", rounded.fract(), prec = decimals as usize);
        // "0.50" -> ".50"
        format!("{}{}", grouped, &frac_str[1..])
    };

    if negative && rounded != 0.0 {
        format!("-{}", result)
    } else {
        result
    }
}

/// Format a chart value for display next to a bar or on an axis.
///
/// Whole numbers print without decimals, everything else with up to two
/// decimals (trailing zeros dropped).
///
/// ```
/// use dashboard_core::formatting::format_value;
///
/// assert_eq!(format_value(1500.0), "1,500");
/// assert_eq!(format_value(2.5), "2.5");
/// assert_eq!(format_value(0.125), "0.13");
/// ```
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        return format_number(value, 0);
    }
    let text = format_number(value, 2);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Short axis label: `1.2k`, `3.4M`, or the plain value below a thousand.
///
/// ```
/// use dashboard_core::formatting::format_compact;
///
/// assert_eq!(format_compact(950.0), "950");
/// assert_eq!(format_compact(1_240.0), "1.2k");
/// assert_eq!(format_compact(-2_000_000.0), "-2M");
/// ```
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1_000_000.0 {
        (value / 1_000_000.0, "M")
    } else if abs >= 1_000.0 {
        (value / 1_000.0, "k")
    } else {
        return format_value((value * 100.0).round() / 100.0);
    };
    let text = format!("{:.1}", scaled);
    format!("{}{}", text.trim_end_matches('0').trim_end_matches('.'), suffix)
}

/// Upper-case the first character of every space-separated word.
///
/// The rest of each word is left untouched and runs of spaces are kept.
///
/// ```
/// use dashboard_core::formatting::title_case;
///
/// assert_eq!(title_case("total quantity"), "Total Quantity");
/// assert_eq!(title_case("netAmt"), "NetAmt");
/// ```
pub fn title_case(value: &str) -> String {
    value
        .split(' ')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// Insert commas every three digits from the right of an integer string.
fn group_thousands(s: &str) -> String {
    if s.len() <= 3 {
        return s.to_string();
    }
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    let remainder = s.len() % 3;
    for (i, c) in s.chars().enumerate() {
        if i != 0 && (i % 3 == remainder) {
            result.push(',');
        }
        result.push(c);
    }
    result
}

// ── Tests ──────────────────────────────────────────────────────────────────────
