//! Chart configuration, rendering and the primary chart switcher.

pub mod builder;
pub mod config;
pub mod fonts;
pub mod render;
pub mod switcher;

pub use builder::{build, ChartSurface, Viewport};
pub use config::{ChartConfig, ChartKind};
pub use switcher::{ChartInstance, ChartTypeSelector};
