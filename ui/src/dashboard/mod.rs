//! Dashboard state: the mounted charts, the type selector, the chosen export
//! format and the "last updated" date. One controller per page, held in a
//! signal by the view.

pub mod nav;
pub mod scene;

use time::Date;
use tracing::{info, warn};

use crate::charts::{build, ChartConfig, ChartInstance, ChartKind, ChartSurface, ChartTypeSelector, Viewport};
use crate::export::ExportFormat;

pub use scene::{compose, DashboardScene, SceneCharts};

/// Element ids the page cannot work without; missing ones are logged at startup.
pub const REQUIRED_ELEMENTS: [&str; 3] = ["mainChart", "exportBtn", "refreshBtn"];

/// Side padding subtracted from the window width when fitting the primary chart.
const PAGE_PADDING: f64 = 64.0;

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardController {
    viewport: Viewport,
    primary: Option<ChartInstance>,
    secondary: Vec<ChartInstance>,
    selector: ChartTypeSelector,
    export_format: ExportFormat,
    updated: Date,
}

impl DashboardController {
    /// Build every chart whose surface `is_present` reports as mounted.
    pub fn new(viewport: Viewport, is_present: impl Fn(ChartSurface) -> bool, today: Date) -> Self {
        let mut primary = None;
        let mut secondary = Vec::new();

        for surface in ChartSurface::ALL {
            if !is_present(surface) {
                warn!("chart surface #{} not found; skipping", surface.element_id());
                continue;
            }
            let instance = ChartInstance::new(surface, build(surface, viewport));
            match surface {
                ChartSurface::Main => primary = Some(instance),
                _ => secondary.push(instance),
            }
        }
        info!(
            "dashboard initialised with {} chart(s)",
            secondary.len() + usize::from(primary.is_some())
        );

        let mut controller = Self {
            viewport,
            primary,
            secondary,
            selector: ChartTypeSelector::default(),
            export_format: ExportFormat::default(),
            updated: today,
        };
        controller.resize(viewport.width);
        controller
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn primary(&self) -> Option<&ChartInstance> {
        self.primary.as_ref()
    }

    pub fn chart(&self, surface: ChartSurface) -> Option<&ChartInstance> {
        match surface {
            ChartSurface::Main => self.primary.as_ref(),
            _ => self.secondary.iter().find(|c| c.surface() == surface),
        }
    }

    pub fn charts(&self) -> impl Iterator<Item = &ChartInstance> {
        self.primary.iter().chain(self.secondary.iter())
    }

    pub fn selector(&self) -> &ChartTypeSelector {
        &self.selector
    }

    pub fn select_chart_type(&mut self, kind: ChartKind) -> bool {
        self.selector.select(self.primary.as_mut(), kind)
    }

    pub fn export_format(&self) -> ExportFormat {
        self.export_format
    }

    pub fn select_export_format(&mut self, format: ExportFormat) {
        self.export_format = format;
    }

    /// Refit the primary chart after the window settled at `window_width`.
    pub fn resize(&mut self, window_width: f64) {
        self.viewport = Viewport::new(window_width);
        if let Some(primary) = self.primary.as_mut() {
            primary.resize((window_width - PAGE_PADDING).max(0.0));
        }
    }

    pub fn updated(&self) -> Date {
        self.updated
    }

    pub fn refresh(&mut self, today: Date) {
        self.updated = today;
        info!("dashboard refreshed");
    }

    pub fn scene(&self) -> DashboardScene {
        compose(self, self.updated)
    }
}

impl SceneCharts for DashboardController {
    fn config_for(&self, surface: ChartSurface) -> Option<&ChartConfig> {
        self.chart(surface).map(ChartInstance::config)
    }
}

/// Log a warning for each required element missing from the page.
#[cfg(target_arch = "wasm32")]
pub fn check_required_elements() {
    let mut missing = 0;
    for id in REQUIRED_ELEMENTS {
        if !crate::core::platform::element_exists(&format!("#{id}")) {
            warn!("required element #{id} not found");
            missing += 1;
        }
    }
    if missing > 0 {
        warn!("some required elements not found; dashboard may not work correctly");
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn check_required_elements() {}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn controller(present: impl Fn(ChartSurface) -> bool) -> DashboardController {
        DashboardController::new(Viewport::new(1280.0), present, date!(2026 - 03 - 07))
    }

    #[test]
    fn builds_all_present_surfaces() {
        let dashboard = controller(|_| true);
        assert_eq!(dashboard.charts().count(), 6);
        assert!(dashboard.primary().is_some());
        assert_eq!(dashboard.export_format(), ExportFormat::Png);
    }

    #[test]
    fn absent_surfaces_are_skipped() {
        let dashboard = controller(|s| s != ChartSurface::Main && s != ChartSurface::Comparison);
        assert_eq!(dashboard.charts().count(), 4);
        assert!(dashboard.primary().is_none());
        assert!(dashboard.chart(ChartSurface::Comparison).is_none());
    }

    #[test]
    fn switching_without_primary_keeps_selection() {
        let mut dashboard = controller(|s| s != ChartSurface::Main);
        assert!(!dashboard.select_chart_type(ChartKind::Pie));
        assert_eq!(dashboard.selector().active(), Some(ChartKind::Bar));
    }

    #[test]
    fn scene_reflects_the_switched_primary_chart() {
        let mut dashboard = controller(|_| true);
        dashboard.select_chart_type(ChartKind::Radar);
        assert!(dashboard.scene().svg.contains("chart--radar"));
        // Comparison is a radar too, so check the primary directly.
        assert_eq!(
            dashboard.primary().map(|p| p.config().kind),
            Some(ChartKind::Radar)
        );
    }

    #[test]
    fn refresh_moves_the_footer_date() {
        let mut dashboard = controller(|_| true);
        dashboard.refresh(date!(2026 - 10 - 16));
        assert!(dashboard.scene().svg.contains("October 16, 2026"));
    }

    #[test]
    fn resize_refits_only_the_primary_chart() {
        let mut dashboard = controller(|_| true);
        let before = dashboard.primary().map(ChartInstance::revision);
        dashboard.resize(400.0);
        assert!(dashboard.viewport().is_compact());
        assert!(dashboard.primary().map(ChartInstance::revision) > before);
        assert_eq!(
            dashboard
                .chart(ChartSurface::Distribution)
                .map(ChartInstance::revision),
            Some(0)
        );
    }
}
