//! Builds a fresh [`ChartConfig`] for every chart surface on the dashboard.
//!
//! Builders read the static region table and the viewport width; they never
//! cache anything, so calling one twice yields two equal, independent configs.

use crate::core::format::{format_compact, format_share};
use crate::core::region::{regions, Region, RegionKey, COMPARISON_AXES, WEEK_LABELS};

use super::config::{
    AnimationOptions, AxisOptions, ChartConfig, ChartData, ChartKind, ChartOptions, Dataset,
    LegendOptions, LegendPosition, Paint, RadialScale, Scales, TooltipOptions,
};

const COMPACT_BREAKPOINT: f64 = 768.0;
const FONT_FAMILY: &str = "'Segoe UI', Tahoma, Geneva, Verdana, sans-serif";
pub const TEXT_COLOR: &str = "#2c3e50";
pub const MUTED_TEXT: &str = "#6c757d";
pub const TOOLTIP_FOOTER: &str = "Based on Advert Shared Data";

/// The slice of window state chart builders depend on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
}

impl Viewport {
    pub fn new(width: f64) -> Self {
        Self { width }
    }

    pub fn is_compact(self) -> bool {
        self.width < COMPACT_BREAKPOINT
    }

    /// `compact` below the breakpoint, `wide` otherwise.
    pub fn pick(self, compact: f64, wide: f64) -> f64 {
        if self.is_compact() {
            compact
        } else {
            wide
        }
    }
}

/// Region palette: primary fill, translucent fill and darker border.
#[derive(Debug, Clone, Copy)]
pub struct RegionColors {
    pub primary: &'static str,
    pub light: &'static str,
    pub dark: &'static str,
}

pub fn colors(key: RegionKey) -> RegionColors {
    match key {
        RegionKey::Northern => RegionColors {
            primary: "rgb(52, 152, 219)",
            light: "rgba(52, 152, 219, 0.2)",
            dark: "rgb(41, 128, 185)",
        },
        RegionKey::Central => RegionColors {
            primary: "rgb(46, 204, 113)",
            light: "rgba(46, 204, 113, 0.2)",
            dark: "rgb(39, 174, 96)",
        },
        RegionKey::Southern => RegionColors {
            primary: "rgb(231, 76, 60)",
            light: "rgba(231, 76, 60, 0.2)",
            dark: "rgb(192, 57, 43)",
        },
    }
}

fn per_region(pick: impl Fn(RegionColors) -> &'static str) -> Paint {
    Paint::PerPoint(
        regions()
            .iter()
            .map(|r| pick(colors(r.key)).to_string())
            .collect(),
    )
}

/// Anchor elements a chart can be mounted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartSurface {
    Main,
    Sparkline(RegionKey),
    Distribution,
    Comparison,
}

impl ChartSurface {
    pub const ALL: [ChartSurface; 6] = [
        ChartSurface::Main,
        ChartSurface::Sparkline(RegionKey::Northern),
        ChartSurface::Sparkline(RegionKey::Central),
        ChartSurface::Sparkline(RegionKey::Southern),
        ChartSurface::Distribution,
        ChartSurface::Comparison,
    ];

    pub fn element_id(self) -> &'static str {
        match self {
            ChartSurface::Main => "mainChart",
            ChartSurface::Sparkline(RegionKey::Northern) => "northernChart",
            ChartSurface::Sparkline(RegionKey::Central) => "centralChart",
            ChartSurface::Sparkline(RegionKey::Southern) => "southernChart",
            ChartSurface::Distribution => "distributionChart",
            ChartSurface::Comparison => "comparisonChart",
        }
    }

    /// Nominal drawing size in CSS pixels at a wide viewport.
    pub fn nominal_size(self) -> (f64, f64) {
        match self {
            ChartSurface::Main => (760.0, 380.0),
            ChartSurface::Sparkline(_) => (220.0, 70.0),
            ChartSurface::Distribution => (520.0, 320.0),
            ChartSurface::Comparison => (520.0, 320.0),
        }
    }
}

pub fn build(surface: ChartSurface, viewport: Viewport) -> ChartConfig {
    match surface {
        ChartSurface::Main => primary_chart(viewport),
        ChartSurface::Sparkline(key) => sparkline(key),
        ChartSurface::Distribution => distribution_chart(viewport),
        ChartSurface::Comparison => comparison_chart(viewport),
    }
}

fn base_options(legend: LegendOptions, tooltip: TooltipOptions, scales: Scales) -> ChartOptions {
    ChartOptions {
        responsive: true,
        maintain_aspect_ratio: false,
        legend,
        tooltip,
        scales,
        animation: AnimationOptions::default(),
        cutout: None,
        font_family: FONT_FAMILY.into(),
    }
}

pub fn primary_chart(viewport: Viewport) -> ChartConfig {
    const LABEL: &str = "Monthly Advertisement Average";

    let mut dataset = Dataset::new(
        Some(LABEL),
        regions().iter().map(|r| r.monthly_average).collect(),
        per_region(|c| c.primary),
        per_region(|c| c.dark),
    );
    dataset.border_radius = 6.0;
    dataset.hover_background_color = Some(per_region(|c| c.dark));

    let legend = LegendOptions {
        display: true,
        position: LegendPosition::Top,
        font_size: viewport.pick(12.0, 14.0),
        padding: 15.0,
        color: TEXT_COLOR.into(),
        use_point_style: false,
    };

    let tooltip = TooltipOptions {
        enabled: true,
        title_font_size: viewport.pick(12.0, 14.0),
        body_font_size: viewport.pick(11.0, 13.0),
        labels: regions()
            .iter()
            .map(|r| format!("{LABEL}: {} | {}", r.range_label, r.description))
            .collect(),
        footer: Some(TOOLTIP_FOOTER.into()),
    };

    let y = AxisOptions {
        display: true,
        begin_at_zero: true,
        title: Some(LABEL.into()),
        title_font_size: viewport.pick(12.0, 14.0),
        tick_font_size: viewport.pick(11.0, 12.0),
        tick_decimals: 1,
        grid: true,
        grid_color: "rgba(0, 0, 0, 0.05)".into(),
    };
    let x = AxisOptions {
        display: true,
        begin_at_zero: false,
        title: Some("Regions of Malawi".into()),
        title_font_size: viewport.pick(12.0, 14.0),
        tick_font_size: viewport.pick(11.0, 13.0),
        tick_decimals: 0,
        grid: false,
        grid_color: "rgba(0, 0, 0, 0.05)".into(),
    };

    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: regions().iter().map(|r| r.name.to_string()).collect(),
            datasets: vec![dataset],
        },
        options: base_options(legend, tooltip, Scales { x, y, r: None }),
    }
}

pub fn sparkline(key: RegionKey) -> ChartConfig {
    let region = crate::core::region::region(key);
    let palette = colors(key);

    let mut dataset = Dataset::new(
        None,
        region.weekly.to_vec(),
        Paint::Single(palette.light.into()),
        Paint::Single(palette.primary.into()),
    );
    dataset.tension = 0.4;
    dataset.fill = true;

    let mut options = base_options(
        LegendOptions::hidden(),
        TooltipOptions::disabled(),
        Scales::hidden(),
    );
    options.scales.y.begin_at_zero = true;

    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: WEEK_LABELS.iter().map(|w| w.to_string()).collect(),
            datasets: vec![dataset],
        },
        options,
    }
}

fn distribution_label(region: &Region) -> String {
    format!(
        "{} ({}%)",
        region.short_name,
        format_compact(region.market_share)
    )
}

pub fn distribution_chart(viewport: Viewport) -> ChartConfig {
    let labels: Vec<String> = regions().iter().map(distribution_label).collect();

    let mut dataset = Dataset::new(
        None,
        regions().iter().map(|r| r.market_share).collect(),
        per_region(|c| c.primary),
        per_region(|c| c.dark),
    );
    dataset.hover_offset = 10.0;

    let legend = LegendOptions {
        display: true,
        position: if viewport.is_compact() {
            LegendPosition::Bottom
        } else {
            LegendPosition::Right
        },
        font_size: viewport.pick(11.0, 12.0),
        padding: 15.0,
        color: TEXT_COLOR.into(),
        use_point_style: true,
    };

    let tooltip = TooltipOptions {
        enabled: true,
        title_font_size: viewport.pick(12.0, 14.0),
        body_font_size: viewport.pick(11.0, 13.0),
        labels: regions()
            .iter()
            .zip(&labels)
            .map(|(r, label)| {
                format!(
                    "{label}: {} market share ({}: {} area)",
                    format_share(r.market_share),
                    r.short_name,
                    r.area
                )
            })
            .collect(),
        footer: None,
    };

    let mut options = base_options(legend, tooltip, Scales::hidden());
    options.cutout = Some(0.55);
    options.animation.animate_rotate = true;
    options.animation.animate_scale = true;

    ChartConfig {
        kind: ChartKind::Doughnut,
        data: ChartData {
            labels,
            datasets: vec![dataset],
        },
        options,
    }
}

pub fn comparison_chart(viewport: Viewport) -> ChartConfig {
    let datasets = regions()
        .iter()
        .map(|r| {
            let palette = colors(r.key);
            let mut dataset = Dataset::new(
                Some(r.name),
                r.comparison.to_vec(),
                Paint::Single(palette.light.into()),
                Paint::Single(palette.primary.into()),
            );
            dataset.point_radius = 4.0;
            dataset.tension = 0.3;
            dataset
        })
        .collect();

    let legend = LegendOptions {
        display: true,
        position: LegendPosition::Top,
        font_size: viewport.pick(11.0, 12.0),
        padding: 10.0,
        color: TEXT_COLOR.into(),
        use_point_style: false,
    };

    let mut scales = Scales::hidden();
    scales.r = Some(RadialScale {
        begin_at_zero: true,
        max: Some(10.0),
        step_size: 2.0,
        show_ticks: false,
        grid_color: "rgba(0, 0, 0, 0.1)".into(),
        point_label_font_size: viewport.pick(10.0, 12.0),
    });

    let tooltip = TooltipOptions {
        enabled: true,
        title_font_size: viewport.pick(12.0, 14.0),
        body_font_size: viewport.pick(11.0, 13.0),
        labels: Vec::new(),
        footer: None,
    };

    ChartConfig {
        kind: ChartKind::Radar,
        data: ChartData {
            labels: COMPARISON_AXES.iter().map(|a| a.to_string()).collect(),
            datasets,
        },
        options: base_options(legend, tooltip, scales),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WIDE: Viewport = Viewport { width: 1280.0 };
    const PHONE: Viewport = Viewport { width: 390.0 };

    #[test]
    fn primary_chart_binds_region_averages() {
        let config = primary_chart(WIDE);
        assert_eq!(config.kind, ChartKind::Bar);
        assert_eq!(config.data.datasets[0].data, vec![3.0, 5.6, 6.4]);
        assert_eq!(config.data.labels[1], "Central Region");
        assert!(!config.options.animation.animate_rotate);
    }

    #[test]
    fn fonts_shrink_on_compact_viewports() {
        assert_eq!(primary_chart(WIDE).options.legend.font_size, 14.0);
        assert_eq!(primary_chart(PHONE).options.legend.font_size, 12.0);
        assert_eq!(
            distribution_chart(PHONE).options.legend.position,
            LegendPosition::Bottom
        );
        assert_eq!(
            distribution_chart(WIDE).options.legend.position,
            LegendPosition::Right
        );
    }

    #[test]
    fn primary_tooltips_carry_range_and_description() {
        let config = primary_chart(WIDE);
        let text = config
            .options
            .tooltip
            .text_for(0, "")
            .unwrap_or_default();
        assert!(text.contains("0-10 | Mzuzu & surrounding areas"));
        assert!(text.ends_with(TOOLTIP_FOOTER));
    }

    #[test]
    fn sparklines_are_bare_filled_lines() {
        let config = sparkline(RegionKey::Southern);
        assert_eq!(config.kind, ChartKind::Line);
        assert_eq!(config.data.datasets[0].data, vec![2.0, 2.0, 1.0, 2.0]);
        assert!(config.data.datasets[0].fill);
        assert!(!config.options.legend.display);
        assert!(!config.options.tooltip.enabled);
        assert!(!config.options.scales.x.display);
    }

    #[test]
    fn distribution_uses_market_share_with_cutout() {
        let config = distribution_chart(WIDE);
        assert_eq!(config.data.labels[0], "Northern (20%)");
        assert_eq!(config.data.labels[1], "Central (37.3%)");
        assert_eq!(config.options.cutout, Some(0.55));
        assert!(config.options.animation.animate_scale);
    }

    #[test]
    fn comparison_has_one_dataset_per_region_on_fixed_scale() {
        let config = comparison_chart(WIDE);
        assert_eq!(config.data.datasets.len(), 3);
        assert_eq!(config.data.labels.len(), 5);
        assert_eq!(config.options.scales.r.as_ref().and_then(|r| r.max), Some(10.0));
    }

    #[test]
    fn builders_are_pure() {
        assert_eq!(primary_chart(WIDE), primary_chart(WIDE));
    }

    #[test]
    fn config_serialises_with_type_tag() {
        let json = primary_chart(WIDE).to_json().unwrap();
        assert!(json.contains("\"type\": \"bar\""));
        assert!(json.contains("\"maintainAspectRatio\": false"));
    }
}
