//! Static regional vacancy sample data.
//!
//! Everything the dashboard draws or exports is derived from [`REGIONS`].
//! The table is fixed at compile time; nothing in the crate mutates it.

use serde::Serialize;

/// Stable identifier for one of the three regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKey {
    Northern,
    Central,
    Southern,
}

impl RegionKey {
    pub fn as_str(self) -> &'static str {
        match self {
            RegionKey::Northern => "northern",
            RegionKey::Central => "central",
            RegionKey::Southern => "southern",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    pub key: RegionKey,
    /// Long display name, e.g. "Northern Region".
    pub name: &'static str,
    /// Short name used in legends and spreadsheet rows.
    pub short_name: &'static str,
    /// Main city the region's adverts cluster around.
    pub area: &'static str,
    pub monthly_average: f64,
    pub range_label: &'static str,
    /// Share of all adverts, in percent.
    pub market_share: f64,
    pub description: &'static str,
    pub performance: &'static str,
    pub growth_potential: &'static str,
    /// Adverts per week over the last four weeks (sparkline series).
    pub weekly: [f64; 4],
    /// Scores (0–10) along [`COMPARISON_AXES`].
    pub comparison: [f64; 5],
}

impl Region {
    /// "Northern (Mzuzu)"
    pub fn labelled_area(&self) -> String {
        format!("{} ({})", self.short_name, self.area)
    }
}

pub const WEEK_LABELS: [&str; 4] = ["W1", "W2", "W3", "W4"];

pub const COMPARISON_AXES: [&str; 5] = [
    "Vacancy Rate",
    "Consistency",
    "Growth Potential",
    "Market Share",
    "Regional Impact",
];

pub const DATA_SOURCE: &str = "Malawi Job Vacancies Advert Sharing";

pub static REGIONS: [Region; 3] = [
    Region {
        key: RegionKey::Northern,
        name: "Northern Region",
        short_name: "Northern",
        area: "Mzuzu",
        monthly_average: 3.0,
        range_label: "0-10",
        market_share: 20.0,
        description: "Mzuzu & surrounding areas (0-10 range, 20% market share)",
        performance: "Limited",
        growth_potential: "High",
        weekly: [1.0, 0.0, 2.0, 0.0],
        comparison: [3.0, 2.0, 8.0, 2.0, 3.0],
    },
    Region {
        key: RegionKey::Central,
        name: "Central Region",
        short_name: "Central",
        area: "Lilongwe",
        monthly_average: 5.6,
        range_label: "5-6",
        market_share: 37.3,
        description: "Lilongwe & areas (5.6 average, 37.3% market share)",
        performance: "Stable",
        growth_potential: "Medium",
        weekly: [2.0, 1.0, 1.0, 2.0],
        comparison: [5.6, 6.0, 5.0, 5.8, 6.0],
    },
    Region {
        key: RegionKey::Southern,
        name: "Southern Region",
        short_name: "Southern",
        area: "Blantyre",
        monthly_average: 6.4,
        range_label: "6-7",
        market_share: 42.7,
        description: "Blantyre & areas (6.4 average, 42.7% market share)",
        performance: "Strong",
        growth_potential: "Low",
        weekly: [2.0, 2.0, 1.0, 2.0],
        comparison: [6.4, 7.0, 3.0, 6.5, 7.0],
    },
];

pub fn regions() -> &'static [Region] {
    &REGIONS
}

pub fn region(key: RegionKey) -> &'static Region {
    match key {
        RegionKey::Northern => &REGIONS[0],
        RegionKey::Central => &REGIONS[1],
        RegionKey::Southern => &REGIONS[2],
    }
}

pub fn total_market_share() -> f64 {
    REGIONS.iter().map(|r| r.market_share).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn market_shares_sum_to_one_hundred() {
        assert_relative_eq!(total_market_share(), 100.0, epsilon = 1e-9);
    }

    #[test]
    fn lookup_matches_table_order() {
        for r in regions() {
            assert_eq!(region(r.key), r);
        }
    }

    #[test]
    fn comparison_scores_fit_radial_scale() {
        for r in regions() {
            assert!(r.comparison.iter().all(|v| (0.0..=10.0).contains(v)));
        }
    }
}
