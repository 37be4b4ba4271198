//! The dashboard as one self-contained SVG, used as the capture source.
//!
//! Layout is fixed at 1200 CSS pixels wide so exports look the same whatever
//! the window size was.

use time::Date;

use crate::charts::builder::{colors, ChartSurface, MUTED_TEXT, TEXT_COLOR};
use crate::charts::render::{escape, render_nested};
use crate::charts::ChartConfig;
use crate::core::format::{format_average, format_long_date, format_share};
use crate::core::region::{regions, DATA_SOURCE};

pub const SCENE_WIDTH: f64 = 1200.0;
const GUTTER: f64 = 24.0;
const HEADER_H: f64 = 110.0;
const REGION_CARD_H: f64 = 210.0;
const PRIMARY_CARD_H: f64 = 440.0;
const PAIR_CARD_H: f64 = 390.0;
const FOOTER_H: f64 = 60.0;
const CARD_FILL: &str = "#ffffff";
const CARD_STROKE: &str = "#e9ecef";

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardScene {
    pub svg: String,
    pub width: f64,
    pub height: f64,
}

/// Chart configurations that are currently mounted, by surface.
pub trait SceneCharts {
    fn config_for(&self, surface: ChartSurface) -> Option<&ChartConfig>;
}

fn card(out: &mut String, x: f64, y: f64, w: f64, h: f64, title: &str) {
    out.push_str(&format!(
        "<rect x='{x:.1}' y='{y:.1}' width='{w:.1}' height='{h:.1}' rx='12' fill='{CARD_FILL}' stroke='{CARD_STROKE}'/>"
    ));
    out.push_str(&format!(
        "<text x='{:.1}' y='{:.1}' font-size='18' font-weight='bold' fill='{TEXT_COLOR}'>{}</text>",
        x + 20.0,
        y + 34.0,
        escape(title)
    ));
}

fn text(out: &mut String, x: f64, y: f64, size: f64, fill: &str, bold: bool, content: &str) {
    let weight = if bold { " font-weight='bold'" } else { "" };
    out.push_str(&format!(
        "<text x='{x:.1}' y='{y:.1}' font-size='{size:.1}' fill='{fill}'{weight}>{}</text>",
        escape(content)
    ));
}

pub fn compose(charts: &impl SceneCharts, updated: Date) -> DashboardScene {
    let inner_w = SCENE_WIDTH - 2.0 * GUTTER;
    let region_y = HEADER_H + GUTTER;
    let primary_y = region_y + REGION_CARD_H + GUTTER;
    let pair_y = primary_y + PRIMARY_CARD_H + GUTTER;
    let footer_y = pair_y + PAIR_CARD_H + GUTTER;
    let height = footer_y + FOOTER_H;

    let mut body = String::new();
    body.push_str(&format!(
        "<rect width='{SCENE_WIDTH}' height='{height:.1}' fill='#f8f9fa'/>"
    ));

    // Header band.
    body.push_str(&format!(
        "<rect width='{SCENE_WIDTH}' height='{HEADER_H}' fill='#2c3e50'/>"
    ));
    text(&mut body, GUTTER, 52.0, 30.0, "#ffffff", true, "Malawi Job Vacancies Dashboard");
    text(
        &mut body,
        GUTTER,
        84.0,
        15.0,
        "rgba(255, 255, 255, 0.8)",
        false,
        "Regional distribution of job advertisements",
    );

    // Region cards with sparklines.
    let card_w = (inner_w - 2.0 * GUTTER) / 3.0;
    for (i, region) in regions().iter().enumerate() {
        let x = GUTTER + i as f64 * (card_w + GUTTER);
        card(&mut body, x, region_y, card_w, REGION_CARD_H, region.name);
        let palette = colors(region.key);
        body.push_str(&format!(
            "<rect x='{x:.1}' y='{region_y:.1}' width='6' height='{REGION_CARD_H}' rx='3' fill='{}'/>",
            palette.primary
        ));
        text(&mut body, x + 20.0, region_y + 56.0, 13.0, MUTED_TEXT, false, region.area);
        text(
            &mut body,
            x + 20.0,
            region_y + 96.0,
            32.0,
            palette.dark,
            true,
            &format_average(region.monthly_average),
        );
        text(
            &mut body,
            x + 20.0,
            region_y + 120.0,
            13.0,
            MUTED_TEXT,
            false,
            &format!(
                "Range {} · {} share · {}",
                region.range_label,
                format_share(region.market_share),
                region.performance
            ),
        );
        if let Some(config) = charts.config_for(ChartSurface::Sparkline(region.key)) {
            body.push_str(&render_nested(
                config,
                x + 12.0,
                region_y + 130.0,
                card_w - 24.0,
                70.0,
            ));
        }
    }

    card(
        &mut body,
        GUTTER,
        primary_y,
        inner_w,
        PRIMARY_CARD_H,
        "Monthly Advertisement Average by Region",
    );
    if let Some(config) = charts.config_for(ChartSurface::Main) {
        body.push_str(&render_nested(
            config,
            GUTTER + 12.0,
            primary_y + 50.0,
            inner_w - 24.0,
            PRIMARY_CARD_H - 62.0,
        ));
    }

    let half_w = (inner_w - GUTTER) / 2.0;
    for (i, (surface, title)) in [
        (ChartSurface::Distribution, "Market Share Distribution"),
        (ChartSurface::Comparison, "Regional Comparison"),
    ]
    .into_iter()
    .enumerate()
    {
        let x = GUTTER + i as f64 * (half_w + GUTTER);
        card(&mut body, x, pair_y, half_w, PAIR_CARD_H, title);
        if let Some(config) = charts.config_for(surface) {
            body.push_str(&render_nested(
                config,
                x + 12.0,
                pair_y + 50.0,
                half_w - 24.0,
                PAIR_CARD_H - 62.0,
            ));
        }
    }

    text(
        &mut body,
        GUTTER,
        footer_y + 26.0,
        13.0,
        MUTED_TEXT,
        false,
        &format!(
            "Data Source: {DATA_SOURCE} · Last updated: {}",
            format_long_date(updated)
        ),
    );

    let svg = format!(
        "<svg xmlns='http://www.w3.org/2000/svg' width='{SCENE_WIDTH}' height='{height:.0}' viewBox='0 0 {SCENE_WIDTH} {height:.0}' font-family=\"'Segoe UI', Tahoma, Geneva, Verdana, sans-serif\">{body}</svg>"
    );
    DashboardScene {
        svg,
        width: SCENE_WIDTH,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::builder::{build, Viewport};
    use std::collections::HashMap;
    use time::macros::date;

    struct Fixed(HashMap<ChartSurface, ChartConfig>);

    impl SceneCharts for Fixed {
        fn config_for(&self, surface: ChartSurface) -> Option<&ChartConfig> {
            self.0.get(&surface)
        }
    }

    #[test]
    fn scene_nests_every_mounted_chart() {
        let viewport = Viewport::new(1280.0);
        let charts = Fixed(
            ChartSurface::ALL
                .into_iter()
                .map(|s| (s, build(s, viewport)))
                .collect(),
        );
        let scene = compose(&charts, date!(2026 - 03 - 07));
        assert_eq!(scene.width, SCENE_WIDTH);
        assert_eq!(scene.svg.matches("class='chart chart--").count(), 6);
        assert!(scene.svg.contains("Last updated: March 7, 2026"));
    }

    #[test]
    fn missing_charts_leave_empty_cards() {
        let scene = compose(&Fixed(HashMap::new()), date!(2026 - 03 - 07));
        assert_eq!(scene.svg.matches("class='chart chart--").count(), 0);
        assert!(scene.svg.contains("Regional Comparison"));
    }
}
