//! Formatting helpers for presenting sleep values.

pub fn format_hours(value: f64) -> String {
    format!("{value:.1}")
}

pub fn format_percent(value: u8) -> String {
    format!("{value}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hours_use_one_decimal() {
        assert_eq!(format_hours(8.0), "8.0");
        assert_eq!(format_hours(1.0 / 60.0), "0.0");
        assert_eq!(format_hours(23.5), "23.5");
    }

    #[test]
    fn percent_has_no_space() {
        assert_eq!(format_percent(85), "85%");
    }
}
