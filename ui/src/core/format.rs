//! Formatting helpers for presenting regional figures.

use time::{macros::format_description, Date, OffsetDateTime};

/// One decimal place, the way axis ticks and averages are shown.
pub fn format_average(value: f64) -> String {
    format!("{value:.1}")
}

pub fn format_share(value: f64) -> String {
    format!("{value:.1}%")
}

/// Drops a trailing ".0" so "20.0" reads as "20" in legend labels.
pub fn format_compact(value: f64) -> String {
    if value.fract().abs() < f64::EPSILON {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// `YYYY-MM-DD`, used in export filenames.
pub fn format_iso_date(date: Date) -> String {
    date.format(&format_description!("[year]-[month]-[day]"))
        .unwrap_or_else(|_| "export".into())
}

/// "October 16, 2026", shown in the footer after a refresh.
pub fn format_long_date(date: Date) -> String {
    date.format(&format_description!(
        "[month repr:long] [day padding:none], [year]"
    ))
    .unwrap_or_else(|_| "—".to_string())
}

pub fn format_generated_at(at: OffsetDateTime) -> String {
    at.format(&format_description!(
        "[year]-[month]-[day] [hour]:[minute]:[second] UTC"
    ))
    .unwrap_or_else(|_| at.date().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn averages_keep_one_decimal() {
        assert_eq!(format_average(3.0), "3.0");
        assert_eq!(format_average(5.6), "5.6");
    }

    #[test]
    fn compact_trims_whole_numbers_only() {
        assert_eq!(format_compact(20.0), "20");
        assert_eq!(format_compact(37.3), "37.3");
    }

    #[test]
    fn dates_render_for_filenames_and_footer() {
        assert_eq!(format_iso_date(date!(2026 - 03 - 07)), "2026-03-07");
        assert_eq!(format_long_date(date!(2026 - 03 - 07)), "March 7, 2026");
        assert_eq!(
            format_generated_at(datetime!(2026-03-07 09:05:00 UTC)),
            "2026-03-07 09:05:00 UTC"
        );
    }
}
