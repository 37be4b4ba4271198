//! Page sections and scroll-position tracking for the navbar.

/// Distance below the top edge at which a section counts as current.
pub const SCROLL_OFFSET: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub id: &'static str,
    pub label: &'static str,
}

pub const SECTIONS: [Section; 4] = [
    Section {
        id: "overview",
        label: "Overview",
    },
    Section {
        id: "regions",
        label: "Regions",
    },
    Section {
        id: "distribution",
        label: "Distribution",
    },
    Section {
        id: "comparison",
        label: "Comparison",
    },
];

/// Section containing `scroll_y + SCROLL_OFFSET`. `bounds` yields a section's
/// offset-top and height, or `None` when it is not mounted. Later sections
/// win when bounds overlap.
pub fn active_section(
    scroll_y: f64,
    bounds: impl Fn(&str) -> Option<(f64, f64)>,
) -> Option<&'static str> {
    let point = scroll_y + SCROLL_OFFSET;
    SECTIONS
        .iter()
        .rev()
        .find(|section| {
            bounds(section.id).is_some_and(|(top, height)| point >= top && point < top + height)
        })
        .map(|section| section.id)
}

/// Next highlighted section given the current one. Until any section has been
/// laid out there is nothing to measure, so `current` is kept.
pub fn track_section(
    current: Option<&'static str>,
    scroll_y: f64,
    bounds: impl Fn(&str) -> Option<(f64, f64)>,
) -> Option<&'static str> {
    if SECTIONS.iter().all(|section| bounds(section.id).is_none()) {
        return current;
    }
    active_section(scroll_y, bounds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(id: &str) -> Option<(f64, f64)> {
        match id {
            "overview" => Some((0.0, 600.0)),
            "regions" => Some((600.0, 400.0)),
            "distribution" => Some((1000.0, 500.0)),
            _ => None,
        }
    }

    #[test]
    fn offset_shifts_the_scroll_point() {
        assert_eq!(active_section(0.0, layout), Some("overview"));
        assert_eq!(active_section(499.0, layout), Some("overview"));
        assert_eq!(active_section(500.0, layout), Some("regions"));
    }

    #[test]
    fn unmounted_or_out_of_range_is_none() {
        assert_eq!(active_section(5_000.0, layout), None);
        assert_eq!(active_section(0.0, |_| None), None);
    }

    #[test]
    fn highlight_survives_until_sections_are_laid_out() {
        assert_eq!(track_section(Some("overview"), 0.0, |_| None), Some("overview"));
        assert_eq!(track_section(Some("overview"), 500.0, layout), Some("regions"));
        assert_eq!(track_section(Some("regions"), 5_000.0, layout), None);
    }
}
