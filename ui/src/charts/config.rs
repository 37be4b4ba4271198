//! Chart configuration data.
//!
//! The shape follows the data/options split common to canvas charting
//! libraries so a config can be serialised and inspected as JSON. Anything
//! that would be a callback elsewhere (tooltip text, tick formatting) is
//! precomputed into plain strings here.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Pie,
    Doughnut,
    Radar,
}

impl ChartKind {
    pub const ALL: [ChartKind; 5] = [
        ChartKind::Bar,
        ChartKind::Line,
        ChartKind::Pie,
        ChartKind::Doughnut,
        ChartKind::Radar,
    ];

    /// Pie-family charts animate by rotating and scaling their arcs.
    pub fn is_circular(self) -> bool {
        matches!(self, ChartKind::Pie | ChartKind::Doughnut)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Pie => "pie",
            ChartKind::Doughnut => "doughnut",
            ChartKind::Radar => "radar",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChartKind::Bar => "Bar",
            ChartKind::Line => "Line",
            ChartKind::Pie => "Pie",
            ChartKind::Doughnut => "Doughnut",
            ChartKind::Radar => "Radar",
        }
    }

    pub fn parse(tag: &str) -> Option<Self> {
        ChartKind::ALL.into_iter().find(|k| k.as_str() == tag)
    }
}

/// One color for the whole dataset, or one per data point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Paint {
    Single(String),
    PerPoint(Vec<String>),
}

impl Paint {
    pub fn at(&self, index: usize) -> &str {
        match self {
            Paint::Single(color) => color,
            Paint::PerPoint(colors) => colors
                .get(index)
                .or_else(|| colors.last())
                .map(String::as_str)
                .unwrap_or("#999"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub data: Vec<f64>,
    pub background_color: Paint,
    pub border_color: Paint,
    pub border_width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hover_background_color: Option<Paint>,
    pub border_radius: f64,
    pub hover_offset: f64,
    pub tension: f64,
    pub fill: bool,
    pub point_radius: f64,
}

impl Dataset {
    pub fn new(label: Option<&str>, data: Vec<f64>, background: Paint, border: Paint) -> Self {
        Self {
            label: label.map(str::to_string),
            data,
            background_color: background,
            border_color: border,
            border_width: 2.0,
            hover_background_color: None,
            border_radius: 0.0,
            hover_offset: 0.0,
            tension: 0.0,
            fill: false,
            point_radius: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Top,
    Right,
    Bottom,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LegendOptions {
    pub display: bool,
    pub position: LegendPosition,
    pub font_size: f64,
    pub padding: f64,
    pub color: String,
    /// Circles instead of boxes as legend swatches.
    pub use_point_style: bool,
}

impl LegendOptions {
    pub fn hidden() -> Self {
        Self {
            display: false,
            position: LegendPosition::Top,
            font_size: 12.0,
            padding: 10.0,
            color: "#2c3e50".into(),
            use_point_style: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TooltipOptions {
    pub enabled: bool,
    pub title_font_size: f64,
    pub body_font_size: f64,
    /// Label line per data index, already formatted.
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

impl TooltipOptions {
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            title_font_size: 12.0,
            body_font_size: 11.0,
            labels: Vec::new(),
            footer: None,
        }
    }

    /// Full tooltip text for one point, joined the way it is shown on hover.
    pub fn text_for(&self, index: usize, fallback: &str) -> Option<String> {
        if !self.enabled {
            return None;
        }
        let mut text = self
            .labels
            .get(index)
            .cloned()
            .unwrap_or_else(|| fallback.to_string());
        if let Some(footer) = &self.footer {
            text.push('\n');
            text.push_str(footer);
        }
        Some(text)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisOptions {
    pub display: bool,
    pub begin_at_zero: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub title_font_size: f64,
    pub tick_font_size: f64,
    pub tick_decimals: usize,
    pub grid: bool,
    pub grid_color: String,
}

impl AxisOptions {
    pub fn hidden() -> Self {
        Self {
            display: false,
            begin_at_zero: true,
            title: None,
            title_font_size: 12.0,
            tick_font_size: 11.0,
            tick_decimals: 0,
            grid: false,
            grid_color: "rgba(0, 0, 0, 0.05)".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadialScale {
    pub begin_at_zero: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub step_size: f64,
    pub show_ticks: bool,
    pub grid_color: String,
    pub point_label_font_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Scales {
    pub x: AxisOptions,
    pub y: AxisOptions,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r: Option<RadialScale>,
}

impl Scales {
    pub fn hidden() -> Self {
        Self {
            x: AxisOptions::hidden(),
            y: AxisOptions::hidden(),
            r: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimationOptions {
    pub duration_ms: u32,
    pub easing: String,
    pub animate_rotate: bool,
    pub animate_scale: bool,
}

impl Default for AnimationOptions {
    fn default() -> Self {
        Self {
            duration_ms: 1000,
            easing: "easeOutQuart".into(),
            animate_rotate: false,
            animate_scale: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub legend: LegendOptions,
    pub tooltip: TooltipOptions,
    pub scales: Scales,
    pub animation: AnimationOptions,
    /// Inner radius of doughnut charts as a fraction of the outer radius.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cutout: Option<f64>,
    /// Font family used for every text element.
    pub font_family: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

impl ChartConfig {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
