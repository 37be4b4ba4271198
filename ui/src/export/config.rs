//! Fixed export settings. There are no config files; these defaults are the
//! configuration.

use std::time::Duration;

/// How the dashboard scene is rasterised.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureConfig {
    /// Device pixels per CSS pixel.
    pub scale: f32,
    pub background: &'static str,
    /// Allow images from other origins into the capture surface.
    pub allow_cross_origin: bool,
    /// Render through `<foreignObject>` instead of plain SVG.
    pub foreign_object: bool,
    pub timeout: Duration,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            scale: 2.0,
            background: "#ffffff",
            allow_cross_origin: true,
            foreign_object: false,
            timeout: Duration::from_secs(15),
        }
    }
}

/// A4 portrait page with the capture placed at a fixed width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub width_mm: f32,
    pub height_mm: f32,
    pub margin_mm: f32,
    pub image_width_mm: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            width_mm: 210.0,
            height_mm: 297.0,
            margin_mm: 10.0,
            image_width_mm: 190.0,
        }
    }
}

impl PageLayout {
    /// Image height in millimetres for a `px_w`×`px_h` capture at the fixed width.
    pub fn image_height_mm(&self, px_w: u32, px_h: u32) -> f32 {
        if px_w == 0 {
            return 0.0;
        }
        px_h as f32 * self.image_width_mm / px_w as f32
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExportConfig {
    /// Leading part of every exported filename.
    pub subject: &'static str,
    pub title: &'static str,
    pub capture: CaptureConfig,
    pub page: PageLayout,
    /// Spreadsheet column widths in character units, columns A..F.
    pub column_widths: [f64; 6],
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            subject: "Malawi-Vacancies",
            title: "Malawi Job Vacancies Dashboard",
            capture: CaptureConfig::default(),
            page: PageLayout::default(),
            column_widths: [25.0, 20.0, 15.0, 15.0, 15.0, 15.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn image_height_preserves_aspect() {
        let page = PageLayout::default();
        assert_relative_eq!(page.image_height_mm(2400, 1200), 95.0);
        assert_eq!(page.image_height_mm(0, 100), 0.0);
    }

    #[test]
    fn capture_defaults() {
        let capture = CaptureConfig::default();
        assert_eq!(capture.scale, 2.0);
        assert_eq!(capture.timeout, Duration::from_secs(15));
        assert!(capture.allow_cross_origin);
        assert!(!capture.foreign_object);
    }
}
