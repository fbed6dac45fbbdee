//! Length formatting for display.
//!
//! Rope runs are measured in inches; anything a yard or longer reads better
//! in feet. Tie and cursor positions use carpenter-style feet-and-inches with
//! quarter-inch resolution.

/// Format a rope length for display: feet with two decimals from 36 in up,
/// otherwise inches with one decimal. Non-finite values render as zero.
pub fn format_length(value_in: f64) -> String {
    if !value_in.is_finite() {
        return "0 in".to_string();
    }
    if value_in >= 36.0 {
        format!("{:.2} ft", value_in / 12.0)
    } else {
        format!("{:.1} in", value_in)
    }
}

/// Format a position as feet and inches, rounded to the nearest quarter inch
/// (e.g. `3' 4 1/2"`). Zero renders as `0`.
pub fn format_feet_inches(value_in: f64) -> String {
    let rounded = (value_in * 4.0).round() / 4.0;
    let feet = (rounded / 12.0).floor();
    let mut inches = rounded - feet * 12.0;
    let quarter = ((inches - inches.floor()) * 4.0).round() as i64;
    inches = inches.floor();

    let fraction = match quarter {
        1 => "1/4",
        2 => "1/2",
        3 => "3/4",
        _ => "",
    };

    if feet == 0.0 && inches == 0.0 && fraction.is_empty() {
        return "0".to_string();
    }

    let mut parts = Vec::new();
    if feet > 0.0 {
        parts.push(format!("{}'", feet as i64));
    }
    if inches > 0.0 || !fraction.is_empty() {
        if fraction.is_empty() {
            parts.push(format!("{}\"", inches as i64));
        } else {
            parts.push(format!("{} {}\"", inches as i64, fraction));
        }
    }
    parts.join(" ")
}
