//! Currency, percentage, and duration formatting for reports

/// Group the integer part of a non-negative amount with thousands separators
fn with_separators(dollars: i64) -> String {
    let dollars_str = dollars.to_string();
    let mut result = String::new();
    for (i, c) in dollars_str.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a currency value with cents, e.g. `-$1,234.50`
pub fn format_currency(value: f64) -> String {
    let abs_value = value.abs();
    let mut dollars = abs_value as i64;
    let mut cents = ((abs_value - dollars as f64) * 100.0).round() as i64;
    if cents == 100 {
        dollars += 1;
        cents = 0;
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}${}.{cents:02}", with_separators(dollars))
}

/// Format a currency value without cents, e.g. `$10,000`
pub fn format_currency_short(value: f64) -> String {
    let dollars = value.abs().round() as i64;
    let sign = if value < 0.0 && dollars != 0 { "-" } else { "" };
    format!("{sign}${}", with_separators(dollars))
}

/// Format a fraction as a percentage, e.g. `0.25` as `25.00%`
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Format a duration given in years; under a year it is shown in months
pub fn format_years(years: f64) -> String {
    if years.abs() < 1.0 {
        format!("{:.1} mo", years * 12.0)
    } else {
        format!("{years:.2} yrs")
    }
}

/// Format a signed month difference, e.g. `+3.2` or `-1.0`
pub fn format_month_delta(months: f64) -> String {
    format!("{months:+.1}")
}
