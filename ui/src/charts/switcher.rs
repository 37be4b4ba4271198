//! Live chart handles and the primary chart's type selector.

use tracing::debug;

use super::builder::{ChartSurface, Viewport};
use super::config::{ChartConfig, ChartKind};
use super::render::render_svg;

/// A mounted chart: its configuration plus the markup last rendered from it.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartInstance {
    surface: ChartSurface,
    config: ChartConfig,
    width: f64,
    height: f64,
    revision: u64,
    markup: String,
}

impl ChartInstance {
    pub fn new(surface: ChartSurface, config: ChartConfig) -> Self {
        let (width, height) = surface.nominal_size();
        let markup = render_svg(&config, width, height);
        Self {
            surface,
            config,
            width,
            height,
            revision: 0,
            markup,
        }
    }

    pub fn surface(&self) -> ChartSurface {
        self.surface
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Edits take effect on the next [`ChartInstance::update`].
    pub fn config_mut(&mut self) -> &mut ChartConfig {
        &mut self.config
    }

    pub fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Re-render from the current configuration.
    pub fn update(&mut self) {
        self.markup = render_svg(&self.config, self.width, self.height);
        self.revision += 1;
    }

    /// Fit the chart to a new container width; unchanged sizes skip the redraw.
    pub fn resize(&mut self, container_width: f64) {
        let (nominal_w, nominal_h) = self.surface.nominal_size();
        let width = container_width.clamp(160.0, nominal_w);
        let height = if Viewport::new(container_width).is_compact() {
            (nominal_h * 0.8).round()
        } else {
            nominal_h
        };
        if (width - self.width).abs() < 0.5 && (height - self.height).abs() < 0.5 {
            return;
        }
        self.width = width;
        self.height = height;
        self.update();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorButton {
    pub kind: ChartKind,
    pub active: bool,
}

/// Mutually exclusive buttons choosing how the primary chart is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartTypeSelector {
    buttons: Vec<SelectorButton>,
}

impl Default for ChartTypeSelector {
    fn default() -> Self {
        Self {
            buttons: ChartKind::ALL
                .into_iter()
                .map(|kind| SelectorButton {
                    kind,
                    active: kind == ChartKind::Bar,
                })
                .collect(),
        }
    }
}

impl ChartTypeSelector {
    pub fn buttons(&self) -> &[SelectorButton] {
        &self.buttons
    }

    pub fn active(&self) -> Option<ChartKind> {
        self.buttons.iter().find(|b| b.active).map(|b| b.kind)
    }

    pub fn active_count(&self) -> usize {
        self.buttons.iter().filter(|b| b.active).count()
    }

    /// Switch the primary chart to `kind`. Returns `false` and leaves the
    /// buttons untouched when there is no primary chart.
    pub fn select(&mut self, primary: Option<&mut ChartInstance>, kind: ChartKind) -> bool {
        let Some(chart) = primary else {
            debug!("chart type {} ignored: no primary chart", kind.as_str());
            return false;
        };

        for button in &mut self.buttons {
            button.active = button.kind == kind;
        }

        let config = chart.config_mut();
        config.kind = kind;
        config.options.animation.animate_rotate = kind.is_circular();
        config.options.animation.animate_scale = kind.is_circular();
        chart.update();

        debug!("primary chart switched to {}", kind.as_str());
        true
    }
}
