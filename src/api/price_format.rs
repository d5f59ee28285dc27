/// Formats an axis label with `decimals` places.
///
/// Axes off the chart panel condense large magnitudes (`12.5k`, `3.1m`,
/// `2b`) so study values stay within the axis width.
#[must_use]
pub fn format_axis_price(price: f64, decimals: u32, condense: bool) -> String {
    if !price.is_finite() {
        return String::new();
    }
    if condense && price.abs() >= 1000.0 {
        return condense_value(price);
    }
    let text = format!("{price:.*}", decimals as usize);
    strip_negative_zero(text)
}

/// Short magnitude form with at most two decimals.
#[must_use]
pub fn condense_value(value: f64) -> String {
    let magnitude = value.abs();
    let (scaled, suffix) = if magnitude >= 1e12 {
        (value / 1e12, "t")
    } else if magnitude >= 1e9 {
        (value / 1e9, "b")
    } else if magnitude >= 1e6 {
        (value / 1e6, "m")
    } else if magnitude >= 1e3 {
        (value / 1e3, "k")
    } else {
        (value, "")
    };
    let text = format!("{scaled:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{}{suffix}", strip_negative_zero(text.to_owned()))
}

fn strip_negative_zero(text: String) -> String {
    match text.strip_prefix('-') {
        Some(rest) if rest.chars().all(|ch| ch == '0' || ch == '.') => rest.to_owned(),
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::{condense_value, format_axis_price};

    #[test]
    fn decimals_follow_tick_precision() {
        assert_eq!(format_axis_price(101.5, 2, false), "101.50");
        assert_eq!(format_axis_price(7.0, 0, false), "7");
        assert_eq!(format_axis_price(-0.000_000_1, 2, false), "0.00");
    }

    #[test]
    fn large_study_values_are_condensed() {
        assert_eq!(format_axis_price(12_500.0, 0, true), "12.5k");
        assert_eq!(format_axis_price(12_500.0, 0, false), "12500");
        assert_eq!(condense_value(3_000_000.0), "3m");
        assert_eq!(condense_value(-2_250_000_000.0), "-2.25b");
        assert_eq!(format_axis_price(950.0, 0, true), "950");
    }
}
