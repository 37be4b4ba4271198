//! SVG rendering for [`ChartConfig`].
//!
//! The same markup is injected into the page and composed into the export
//! scene, so what gets captured is exactly what is on screen. Hover text is
//! carried by `<title>` children, which both browsers and desktop webviews
//! show as native tooltips.

use std::f64::consts::{FRAC_PI_2, TAU};

use super::builder::{MUTED_TEXT, TEXT_COLOR};
use super::config::{ChartConfig, ChartKind, Dataset, LegendPosition};
use super::fonts::{self, FontWeight};

const PAD: f64 = 8.0;
const SWATCH: f64 = 12.0;
const DEFAULT_DOUGHNUT_CUTOUT: f64 = 0.5;

/// Render a standalone chart document sized `width`×`height` CSS pixels.
pub fn render_svg(config: &ChartConfig, width: f64, height: f64) -> String {
    let mut svg = Svg::default();
    svg.open_root(config, None, width, height);
    draw(&mut svg, config, width, height);
    svg.close("svg");
    svg.finish()
}

/// Render a chart as a nested `<svg>` placed at (`x`, `y`) inside a larger scene.
pub fn render_nested(config: &ChartConfig, x: f64, y: f64, width: f64, height: f64) -> String {
    let mut svg = Svg::default();
    svg.open_root(config, Some((x, y)), width, height);
    draw(&mut svg, config, width, height);
    svg.close("svg");
    svg.finish()
}

fn draw(svg: &mut Svg, config: &ChartConfig, width: f64, height: f64) {
    let area = Rect {
        x: PAD,
        y: PAD,
        w: (width - 2.0 * PAD).max(1.0),
        h: (height - 2.0 * PAD).max(1.0),
    };
    let area = draw_legend(svg, config, area);
    match config.kind {
        ChartKind::Bar | ChartKind::Line => draw_cartesian(svg, config, area),
        ChartKind::Pie | ChartKind::Doughnut => draw_arcs(svg, config, area),
        ChartKind::Radar => draw_radar(svg, config, area),
    }
}

#[derive(Debug, Clone, Copy)]
struct Rect {
    x: f64,
    y: f64,
    w: f64,
    h: f64,
}

impl Rect {
    fn bottom(&self) -> f64 {
        self.y + self.h
    }

    fn right(&self) -> f64 {
        self.x + self.w
    }
}

#[derive(Default)]
struct Svg {
    out: String,
}

impl Svg {
    fn open_root(&mut self, config: &ChartConfig, origin: Option<(f64, f64)>, w: f64, h: f64) {
        let placement = origin
            .map(|(x, y)| format!(" x='{x:.1}' y='{y:.1}'"))
            .unwrap_or_else(|| " xmlns='http://www.w3.org/2000/svg'".to_string());
        self.out.push_str(&format!(
            "<svg{placement} width='{w:.1}' height='{h:.1}' viewBox='0 0 {w:.1} {h:.1}' font-family=\"{}\" class='chart chart--{}'>",
            escape(&config.options.font_family),
            config.kind.as_str(),
        ));
    }

    fn raw(&mut self, fragment: &str) {
        self.out.push_str(fragment);
    }

    fn close(&mut self, tag: &str) {
        self.out.push_str(&format!("</{tag}>"));
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str) {
        self.out.push_str(&format!(
            "<line x1='{x1:.2}' y1='{y1:.2}' x2='{x2:.2}' y2='{y2:.2}' stroke='{stroke}' stroke-width='1'/>"
        ));
    }

    #[allow(clippy::too_many_arguments)]
    fn text(
        &mut self,
        x: f64,
        y: f64,
        size: f64,
        anchor: &str,
        fill: &str,
        bold: bool,
        content: &str,
    ) {
        let weight = if bold { " font-weight='bold'" } else { "" };
        self.out.push_str(&format!(
            "<text x='{x:.2}' y='{y:.2}' font-size='{size:.1}' text-anchor='{anchor}' fill='{fill}'{weight}>{}</text>",
            escape(content)
        ));
    }

    /// Opens a shape element whose `<title>` child carries hover text.
    fn shape_with_title(&mut self, element: &str, attrs: &str, title: Option<&str>) {
        match title {
            Some(title) => self.out.push_str(&format!(
                "<{element} {attrs}><title>{}</title></{element}>",
                escape(title)
            )),
            None => self.out.push_str(&format!("<{element} {attrs}/>")),
        }
    }

    fn finish(self) -> String {
        self.out
    }
}

pub(crate) fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

struct LegendItem {
    label: String,
    color: String,
}

fn legend_items(config: &ChartConfig) -> Vec<LegendItem> {
    if config.kind.is_circular() {
        let Some(dataset) = config.data.datasets.first() else {
            return Vec::new();
        };
        config
            .data
            .labels
            .iter()
            .enumerate()
            .map(|(i, label)| LegendItem {
                label: label.clone(),
                color: dataset.background_color.at(i).to_string(),
            })
            .collect()
    } else {
        config
            .data
            .datasets
            .iter()
            .filter_map(|d| {
                d.label.as_ref().map(|label| LegendItem {
                    label: label.clone(),
                    color: d.background_color.at(0).to_string(),
                })
            })
            .collect()
    }
}

/// Draws the legend and returns the area left for the plot.
fn draw_legend(svg: &mut Svg, config: &ChartConfig, area: Rect) -> Rect {
    let legend = &config.options.legend;
    let items = legend_items(config);
    if !legend.display || items.is_empty() {
        return area;
    }

    let size = legend.font_size;
    let line_h = fonts::measure(FontWeight::Regular, size).line_h.max(SWATCH);
    let item_width = |item: &LegendItem| {
        SWATCH + 6.0 + fonts::text_width(&item.label, FontWeight::Regular, size) + legend.padding
    };

    let swatch = |svg: &mut Svg, x: f64, y: f64, color: &str| {
        if legend.use_point_style {
            let r = SWATCH / 2.0;
            svg.raw(&format!(
                "<circle cx='{:.2}' cy='{:.2}' r='{r:.2}' fill='{color}'/>",
                x + r,
                y + r
            ));
        } else {
            svg.raw(&format!(
                "<rect x='{x:.2}' y='{y:.2}' width='{SWATCH}' height='{SWATCH}' fill='{color}'/>"
            ));
        }
    };

    match legend.position {
        LegendPosition::Top | LegendPosition::Bottom => {
            let total: f64 = items.iter().map(item_width).sum::<f64>() - legend.padding;
            let mut x = area.x + ((area.w - total) / 2.0).max(0.0);
            let block = line_h + legend.padding;
            let y = if legend.position == LegendPosition::Top {
                area.y
            } else {
                area.bottom() - line_h
            };
            for item in &items {
                swatch(svg, x, y + (line_h - SWATCH) / 2.0, &item.color);
                svg.text(
                    x + SWATCH + 6.0,
                    y + line_h * 0.75,
                    size,
                    "start",
                    &legend.color,
                    false,
                    &item.label,
                );
                x += item_width(item);
            }
            if legend.position == LegendPosition::Top {
                Rect {
                    y: area.y + block,
                    h: (area.h - block).max(1.0),
                    ..area
                }
            } else {
                Rect {
                    h: (area.h - block).max(1.0),
                    ..area
                }
            }
        }
        LegendPosition::Right => {
            let widest = items
                .iter()
                .map(item_width)
                .fold(0.0_f64, f64::max)
                .min(area.w * 0.45);
            let x = area.right() - widest;
            let rows = items.len() as f64;
            let mut y = area.y + ((area.h - rows * (line_h + 6.0)) / 2.0).max(0.0);
            for item in &items {
                swatch(svg, x, y + (line_h - SWATCH) / 2.0, &item.color);
                svg.text(
                    x + SWATCH + 6.0,
                    y + line_h * 0.75,
                    size,
                    "start",
                    &legend.color,
                    false,
                    &item.label,
                );
                y += line_h + 6.0;
            }
            Rect {
                w: (area.w - widest - legend.padding).max(1.0),
                ..area
            }
        }
    }
}

/// Tick step of 1, 2 or 5 × 10ⁿ giving roughly `target` intervals.
pub(crate) fn nice_step(span: f64, target: f64) -> f64 {
    if !(span.is_finite() && span > 0.0) {
        return 1.0;
    }
    let raw = span / target.max(1.0);
    let magnitude = 10f64.powf(raw.log10().floor());
    let residual = raw / magnitude;
    let nice = if residual <= 1.0 {
        1.0
    } else if residual <= 2.0 {
        2.0
    } else if residual <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

fn value_range(config: &ChartConfig) -> (f64, f64) {
    let values = config.data.datasets.iter().flat_map(|d| d.data.iter().copied());
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() {
        return (0.0, 1.0);
    }
    let lo = if config.options.scales.y.begin_at_zero {
        lo.min(0.0)
    } else {
        lo
    };
    if (hi - lo).abs() < f64::EPSILON {
        (lo, lo + 1.0)
    } else {
        (lo, hi)
    }
}

fn draw_cartesian(svg: &mut Svg, config: &ChartConfig, area: Rect) {
    let scales = &config.options.scales;
    let (lo, hi) = value_range(config);
    let step = nice_step(hi - lo, 5.0);
    let min = (lo / step).floor() * step;
    let max = (hi / step).ceil() * step;

    let y_axis = &scales.y;
    let x_axis = &scales.x;

    let mut plot = area;
    if y_axis.display {
        let tick_w = fonts::text_width(
            &format!("{:.*}", y_axis.tick_decimals, max),
            FontWeight::Regular,
            y_axis.tick_font_size,
        );
        let title_w = if y_axis.title.is_some() {
            y_axis.title_font_size + 12.0
        } else {
            0.0
        };
        plot.x += tick_w + title_w + 8.0;
        plot.w -= tick_w + title_w + 8.0;
    }
    if x_axis.display {
        let title_h = if x_axis.title.is_some() {
            x_axis.title_font_size + 14.0
        } else {
            0.0
        };
        plot.h -= x_axis.tick_font_size + 10.0 + title_h;
    }
    plot.w = plot.w.max(1.0);
    plot.h = plot.h.max(1.0);

    let to_y = |v: f64| plot.bottom() - (v - min) / (max - min) * plot.h;

    if y_axis.display {
        let mut tick = min;
        while tick <= max + step * 0.5 {
            let y = to_y(tick);
            if y_axis.grid {
                svg.line(plot.x, y, plot.right(), y, &y_axis.grid_color);
            }
            svg.text(
                plot.x - 6.0,
                y + y_axis.tick_font_size * 0.35,
                y_axis.tick_font_size,
                "end",
                MUTED_TEXT,
                false,
                &format!("{:.*}", y_axis.tick_decimals, tick),
            );
            tick += step;
        }
        if let Some(title) = &y_axis.title {
            let cx = area.x + y_axis.title_font_size;
            let cy = plot.y + plot.h / 2.0;
            svg.raw(&format!(
                "<text transform='translate({cx:.2} {cy:.2}) rotate(-90)' font-size='{:.1}' text-anchor='middle' fill='{TEXT_COLOR}' font-weight='bold'>{}</text>",
                y_axis.title_font_size,
                escape(title)
            ));
        }
    }

    let n = config.data.labels.len().max(1);
    let band = plot.w / n as f64;
    let is_bar = config.kind == ChartKind::Bar;

    if x_axis.display {
        for (i, label) in config.data.labels.iter().enumerate() {
            let x = if is_bar {
                plot.x + band * (i as f64 + 0.5)
            } else {
                line_x(plot, n, i)
            };
            svg.text(
                x,
                plot.bottom() + x_axis.tick_font_size + 4.0,
                x_axis.tick_font_size,
                "middle",
                TEXT_COLOR,
                true,
                label,
            );
        }
        if let Some(title) = &x_axis.title {
            svg.text(
                plot.x + plot.w / 2.0,
                area.bottom() - 4.0,
                x_axis.title_font_size,
                "middle",
                TEXT_COLOR,
                true,
                title,
            );
        }
        svg.line(plot.x, to_y(min.max(0.0)), plot.right(), to_y(min.max(0.0)), "rgba(0, 0, 0, 0.1)");
    }

    if is_bar {
        draw_bars(svg, config, plot, band, &to_y, min);
    } else {
        for dataset in &config.data.datasets {
            draw_line_series(svg, config, dataset, plot, n, &to_y, min);
        }
    }
}

fn line_x(plot: Rect, n: usize, i: usize) -> f64 {
    if n <= 1 {
        plot.x + plot.w / 2.0
    } else {
        plot.x + plot.w * i as f64 / (n - 1) as f64
    }
}

fn draw_bars(
    svg: &mut Svg,
    config: &ChartConfig,
    plot: Rect,
    band: f64,
    to_y: &dyn Fn(f64) -> f64,
    min: f64,
) {
    let sets = config.data.datasets.len().max(1);
    // Category and bar percentages of 0.8 and 0.9.
    let group = band * 0.8;
    let bar_w = group / sets as f64 * 0.9;
    let base = to_y(min.max(0.0));

    for (s, dataset) in config.data.datasets.iter().enumerate() {
        for (i, value) in dataset.data.iter().enumerate() {
            let x = plot.x + band * i as f64 + (band - group) / 2.0
                + group / sets as f64 * s as f64
                + (group / sets as f64 - bar_w) / 2.0;
            let top = to_y(*value);
            let h = (base - top).max(0.0);
            let r = dataset.border_radius.min(bar_w / 2.0).min(h);
            let path = format!(
                "M{x:.2},{base:.2} L{x:.2},{:.2} Q{x:.2},{top:.2} {:.2},{top:.2} L{:.2},{top:.2} Q{:.2},{top:.2} {:.2},{:.2} L{:.2},{base:.2} Z",
                top + r,
                x + r,
                x + bar_w - r,
                x + bar_w,
                x + bar_w,
                top + r,
                x + bar_w,
            );
            let label = config.data.labels.get(i).map(String::as_str).unwrap_or("");
            let title = config
                .options
                .tooltip
                .text_for(i, &format!("{label}: {value}"));
            svg.shape_with_title(
                "path",
                &format!(
                    "d='{path}' fill='{}' stroke='{}' stroke-width='{:.1}' class='chart__bar'",
                    dataset.background_color.at(i),
                    dataset.border_color.at(i),
                    dataset.border_width
                ),
                title.as_deref(),
            );
        }
    }
}

type Point = (f64, f64);

/// Bezier control points for a smoothed polyline with the given tension.
fn spline_controls(points: &[Point], tension: f64, plot: Rect) -> Vec<(Point, Point)> {
    let clamp = |(x, y): Point| (x.clamp(plot.x, plot.right()), y.clamp(plot.y, plot.bottom()));
    (0..points.len())
        .map(|i| {
            let cur = points[i];
            let prev = if i == 0 { cur } else { points[i - 1] };
            let next = points.get(i + 1).copied().unwrap_or(cur);
            let d01 = ((cur.0 - prev.0).powi(2) + (cur.1 - prev.1).powi(2)).sqrt();
            let d12 = ((next.0 - cur.0).powi(2) + (next.1 - cur.1).powi(2)).sqrt();
            let total = d01 + d12;
            let (s01, s12) = if total > 0.0 {
                (d01 / total, d12 / total)
            } else {
                (0.0, 0.0)
            };
            let fa = tension * s01;
            let fb = tension * s12;
            let before = clamp((
                cur.0 - fa * (next.0 - prev.0),
                cur.1 - fa * (next.1 - prev.1),
            ));
            let after = clamp((
                cur.0 + fb * (next.0 - prev.0),
                cur.1 + fb * (next.1 - prev.1),
            ));
            (before, after)
        })
        .collect()
}

fn line_path(points: &[Point], tension: f64, plot: Rect) -> String {
    let Some(first) = points.first() else {
        return String::new();
    };
    let mut d = format!("M{:.2},{:.2}", first.0, first.1);
    if tension <= 0.0 {
        for p in &points[1..] {
            d.push_str(&format!(" L{:.2},{:.2}", p.0, p.1));
        }
        return d;
    }
    let controls = spline_controls(points, tension, plot);
    for i in 1..points.len() {
        let (_, c1) = controls[i - 1];
        let (c2, _) = controls[i];
        let p = points[i];
        d.push_str(&format!(
            " C{:.2},{:.2} {:.2},{:.2} {:.2},{:.2}",
            c1.0, c1.1, c2.0, c2.1, p.0, p.1
        ));
    }
    d
}

fn draw_line_series(
    svg: &mut Svg,
    config: &ChartConfig,
    dataset: &Dataset,
    plot: Rect,
    n: usize,
    to_y: &dyn Fn(f64) -> f64,
    min: f64,
) {
    // Keep point markers inside the drawing when axes are hidden.
    let inset = dataset.point_radius + dataset.border_width;
    let inner = Rect {
        x: plot.x + inset,
        y: plot.y,
        w: (plot.w - 2.0 * inset).max(1.0),
        h: plot.h,
    };
    let points: Vec<Point> = dataset
        .data
        .iter()
        .enumerate()
        .map(|(i, v)| (line_x(inner, n, i), to_y(*v).clamp(plot.y + inset, plot.bottom())))
        .collect();
    let stroke = dataset.border_color.at(0);
    let path = line_path(&points, dataset.tension, plot);

    if dataset.fill && !points.is_empty() {
        let base = to_y(min.max(0.0));
        let last = points[points.len() - 1];
        svg.raw(&format!(
            "<path d='{path} L{:.2},{base:.2} L{:.2},{base:.2} Z' fill='{}' stroke='none'/>",
            last.0,
            points[0].0,
            dataset.background_color.at(0)
        ));
    }
    svg.raw(&format!(
        "<path d='{path}' fill='none' stroke='{stroke}' stroke-width='{:.1}' class='chart__line'/>",
        dataset.border_width
    ));

    for (i, (x, y)) in points.iter().enumerate() {
        let label = config.data.labels.get(i).map(String::as_str).unwrap_or("");
        let value = dataset.data[i];
        let title = config
            .options
            .tooltip
            .text_for(i, &format!("{label}: {value}"));
        svg.shape_with_title(
            "circle",
            &format!(
                "cx='{x:.2}' cy='{y:.2}' r='{:.1}' fill='{}' stroke='white' stroke-width='1'",
                dataset.point_radius,
                dataset.border_color.at(i)
            ),
            title.as_deref(),
        );
    }
}

fn polar(cx: f64, cy: f64, r: f64, angle: f64) -> Point {
    (cx + r * angle.cos(), cy + r * angle.sin())
}

fn draw_arcs(svg: &mut Svg, config: &ChartConfig, area: Rect) {
    let Some(dataset) = config.data.datasets.first() else {
        return;
    };
    let total: f64 = dataset.data.iter().filter(|v| **v > 0.0).sum();
    if total <= 0.0 {
        return;
    }

    let cx = area.x + area.w / 2.0;
    let cy = area.y + area.h / 2.0;
    let outer = (area.w.min(area.h) / 2.0 - dataset.hover_offset.max(2.0)).max(1.0);
    let cutout = match config.kind {
        ChartKind::Doughnut => config.options.cutout.unwrap_or(DEFAULT_DOUGHNUT_CUTOUT),
        _ => 0.0,
    };
    let inner = outer * cutout;

    let mut start = -FRAC_PI_2;
    for (i, value) in dataset.data.iter().enumerate() {
        if *value <= 0.0 {
            continue;
        }
        let sweep = value / total * TAU;
        let end = start + sweep;
        let large = if sweep > std::f64::consts::PI { 1 } else { 0 };
        let (ox1, oy1) = polar(cx, cy, outer, start);
        let (ox2, oy2) = polar(cx, cy, outer, end);

        // A single full slice cannot be expressed as one arc.
        let path = if (sweep - TAU).abs() < 1e-9 {
            if inner > 0.0 {
                format!(
                    "M{:.2},{cy:.2} a{outer:.2},{outer:.2} 0 1,0 {:.2},0 a{outer:.2},{outer:.2} 0 1,0 {:.2},0 M{:.2},{cy:.2} a{inner:.2},{inner:.2} 0 1,1 {:.2},0 a{inner:.2},{inner:.2} 0 1,1 {:.2},0 Z",
                    cx - outer,
                    outer * 2.0,
                    -outer * 2.0,
                    cx - inner,
                    inner * 2.0,
                    -inner * 2.0
                )
            } else {
                format!(
                    "M{:.2},{cy:.2} a{outer:.2},{outer:.2} 0 1,0 {:.2},0 a{outer:.2},{outer:.2} 0 1,0 {:.2},0 Z",
                    cx - outer,
                    outer * 2.0,
                    -outer * 2.0
                )
            }
        } else if inner > 0.0 {
            let (ix1, iy1) = polar(cx, cy, inner, end);
            let (ix2, iy2) = polar(cx, cy, inner, start);
            format!(
                "M{ox1:.2},{oy1:.2} A{outer:.2},{outer:.2} 0 {large},1 {ox2:.2},{oy2:.2} L{ix1:.2},{iy1:.2} A{inner:.2},{inner:.2} 0 {large},0 {ix2:.2},{iy2:.2} Z"
            )
        } else {
            format!(
                "M{cx:.2},{cy:.2} L{ox1:.2},{oy1:.2} A{outer:.2},{outer:.2} 0 {large},1 {ox2:.2},{oy2:.2} Z"
            )
        };

        let label = config.data.labels.get(i).map(String::as_str).unwrap_or("");
        let title = config
            .options
            .tooltip
            .text_for(i, &format!("{label}: {value}"));
        svg.shape_with_title(
            "path",
            &format!(
                "d='{path}' fill='{}' stroke='{}' stroke-width='{:.1}' fill-rule='evenodd' class='chart__arc'",
                dataset.background_color.at(i),
                dataset.border_color.at(i),
                dataset.border_width
            ),
            title.as_deref(),
        );
        start = end;
    }
}

fn draw_radar(svg: &mut Svg, config: &ChartConfig, area: Rect) {
    let axes = config.data.labels.len();
    if axes < 3 {
        return;
    }
    let scale = config.options.scales.r.as_ref();
    let label_size = scale.map(|s| s.point_label_font_size).unwrap_or(12.0);
    let grid_color = scale
        .map(|s| s.grid_color.as_str())
        .unwrap_or("rgba(0, 0, 0, 0.1)");

    let data_max = config
        .data
        .datasets
        .iter()
        .flat_map(|d| d.data.iter().copied())
        .fold(0.0_f64, f64::max);
    let max = scale.and_then(|s| s.max).unwrap_or_else(|| {
        let step = nice_step(data_max, 5.0);
        (data_max / step).ceil().max(1.0) * step
    });
    let step = scale
        .map(|s| s.step_size)
        .filter(|s| *s > 0.0)
        .unwrap_or_else(|| nice_step(max, 5.0));

    let cx = area.x + area.w / 2.0;
    let cy = area.y + area.h / 2.0;
    let radius = (area.w.min(area.h) / 2.0 - label_size * 1.6).max(1.0);
    let angle = |i: usize| -FRAC_PI_2 + TAU * i as f64 / axes as f64;

    let mut level = step;
    while level <= max + step * 0.5 {
        let r = radius * level / max;
        let ring: Vec<String> = (0..axes)
            .map(|i| {
                let (x, y) = polar(cx, cy, r, angle(i));
                format!("{x:.2},{y:.2}")
            })
            .collect();
        svg.raw(&format!(
            "<polygon points='{}' fill='none' stroke='{grid_color}' stroke-width='1'/>",
            ring.join(" ")
        ));
        if scale.map(|s| s.show_ticks).unwrap_or(true) {
            svg.text(cx + 2.0, cy - r + 10.0, 9.0, "start", MUTED_TEXT, false, &format!("{level}"));
        }
        level += step;
    }

    for (i, label) in config.data.labels.iter().enumerate() {
        let a = angle(i);
        let (x, y) = polar(cx, cy, radius, a);
        svg.line(cx, cy, x, y, grid_color);
        let (lx, ly) = polar(cx, cy, radius + label_size * 0.8, a);
        let anchor = if a.cos().abs() < 0.2 {
            "middle"
        } else if a.cos() > 0.0 {
            "start"
        } else {
            "end"
        };
        svg.text(lx, ly + label_size * 0.35, label_size, anchor, TEXT_COLOR, false, label);
    }

    for dataset in &config.data.datasets {
        let points: Vec<Point> = dataset
            .data
            .iter()
            .take(axes)
            .enumerate()
            .map(|(i, v)| polar(cx, cy, radius * (v / max).clamp(0.0, 1.0), angle(i)))
            .collect();
        let joined: Vec<String> = points.iter().map(|(x, y)| format!("{x:.2},{y:.2}")).collect();
        let fill = dataset.background_color.at(0);
        let stroke = dataset.border_color.at(0);
        svg.raw(&format!(
            "<polygon points='{}' fill='{fill}' stroke='{stroke}' stroke-width='{:.1}' class='chart__radar-area'/>",
            joined.join(" "),
            dataset.border_width
        ));
        let series = dataset.label.as_deref().unwrap_or("");
        for (i, (x, y)) in points.iter().enumerate() {
            let axis = config.data.labels.get(i).map(String::as_str).unwrap_or("");
            let fallback = format!("{series}: {} ({axis})", dataset.data[i]);
            let title = config.options.tooltip.text_for(i, &fallback).map(|t| {
                if config.options.tooltip.labels.is_empty() {
                    fallback.clone()
                } else {
                    t
                }
            });
            svg.shape_with_title(
                "circle",
                &format!(
                    "cx='{x:.2}' cy='{y:.2}' r='{:.1}' fill='{stroke}' stroke='white' stroke-width='2'",
                    dataset.point_radius
                ),
                title.as_deref(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::builder::{
        comparison_chart, distribution_chart, primary_chart, sparkline, Viewport,
    };
    use crate::core::region::RegionKey;

    const WIDE: Viewport = Viewport { width: 1280.0 };

    #[test]
    fn nice_steps_snap_to_1_2_5() {
        assert_eq!(nice_step(6.4, 5.0), 2.0);
        assert_eq!(nice_step(10.0, 5.0), 2.0);
        assert_eq!(nice_step(35.0, 5.0), 10.0);
        assert_eq!(nice_step(0.0, 5.0), 1.0);
    }

    #[test]
    fn bar_chart_draws_one_bar_per_region() {
        let svg = render_svg(&primary_chart(WIDE), 760.0, 380.0);
        assert!(svg.starts_with("<svg xmlns="));
        assert_eq!(svg.matches("class='chart__bar'").count(), 3);
        assert!(svg.contains("Regions of Malawi"));
        assert!(svg.contains("Based on Advert Shared Data"));
    }

    #[test]
    fn doughnut_draws_three_arcs_with_escaped_labels() {
        let svg = render_svg(&distribution_chart(WIDE), 520.0, 320.0);
        assert_eq!(svg.matches("class='chart__arc'").count(), 3);
        assert!(svg.contains("Mzuzu area"));
    }

    #[test]
    fn sparkline_is_a_single_smoothed_path() {
        let svg = render_svg(&sparkline(RegionKey::Northern), 220.0, 70.0);
        assert_eq!(svg.matches("class='chart__line'").count(), 1);
        assert!(svg.contains(" C"));
        assert!(!svg.contains("<title>"));
    }

    #[test]
    fn radar_draws_area_per_dataset() {
        let svg = render_svg(&comparison_chart(WIDE), 520.0, 320.0);
        assert_eq!(svg.matches("class='chart__radar-area'").count(), 3);
        assert!(svg.contains("Growth Potential"));
    }

    #[test]
    fn primary_chart_renders_in_every_kind() {
        for kind in ChartKind::ALL {
            let mut config = primary_chart(WIDE);
            config.kind = kind;
            let svg = render_svg(&config, 760.0, 380.0);
            assert!(svg.ends_with("</svg>"), "{kind:?} markup not closed");
        }
    }

    #[test]
    fn nested_chart_is_positioned() {
        let svg = render_nested(&primary_chart(WIDE), 10.0, 20.0, 300.0, 200.0);
        assert!(svg.starts_with("<svg x='10.0' y='20.0'"));
    }

    #[test]
    fn escape_handles_markup_characters() {
        assert_eq!(escape("Mzuzu & <north>"), "Mzuzu &amp; &lt;north&gt;");
    }
}
