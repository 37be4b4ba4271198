//! Text measurement for chart layout.
//!
//! Legends, axis gutters and KPI cards are laid out before any text is drawn,
//! so the renderer needs widths and line heights up front.
//!
//! With the `embed_inter` feature the Inter variable font is embedded and
//! measured through `fontdue`. Without it a per-character heuristic tuned for
//! the dashboard's sans-serif stack is used; layouts differ by a few pixels at
//! most between the two.
//!
//! Expected font locations (relative to this file) when the feature is on:
//! - ../../assets/Inter-Variable.ttf

use std::fmt;

use once_cell::sync::Lazy;

#[cfg(feature = "embed_inter")]
use fontdue::Font;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FontWeight::Regular => "Regular",
            FontWeight::Bold => "Bold",
        })
    }
}

#[derive(Clone, Copy, Debug)]
pub struct TextMetrics {
    /// Vertical line height for layout rhythm.
    pub line_h: f64,
    /// Ascender distance above baseline.
    pub asc: f64,
    /// Descender distance below baseline (positive).
    pub desc: f64,
}

#[cfg(feature = "embed_inter")]
pub struct Fonts {
    variable: Option<Font>,
}

#[cfg(not(feature = "embed_inter"))]
pub struct Fonts;

impl Fonts {
    pub fn load() -> Self {
        #[cfg(feature = "embed_inter")]
        {
            const VAR_BYTES: &[u8] = include_bytes!("../../assets/Inter-Variable.ttf");
            let variable = match Font::from_bytes(VAR_BYTES, Default::default()) {
                Ok(font) => Some(font),
                Err(err) => {
                    tracing::warn!("embedded Inter font failed to parse: {err}");
                    None
                }
            };
            Fonts { variable }
        }
        #[cfg(not(feature = "embed_inter"))]
        {
            Fonts
        }
    }

    pub fn metrics(&self, _weight: FontWeight, size_px: f64) -> TextMetrics {
        #[cfg(feature = "embed_inter")]
        if let Some(font) = &self.variable {
            let m = font.metrics('M', size_px as f32);
            let line_h = (m.height as f64).max(size_px * 1.24).ceil();
            let asc = (size_px * 0.90).round();
            let desc = (line_h - asc).max(size_px * 0.08).round();
            return TextMetrics { line_h, asc, desc };
        }

        let line_h = (size_px * 1.28).round();
        let asc = (size_px * 0.92).round();
        let desc = (line_h - asc).max(size_px * 0.08).round();
        TextMetrics { line_h, asc, desc }
    }

    /// Advance width of `text` in pixels.
    pub fn width(&self, text: &str, weight: FontWeight, size_px: f64) -> f64 {
        #[cfg(feature = "embed_inter")]
        if let Some(font) = &self.variable {
            let regular: f64 = text
                .chars()
                .map(|c| font.metrics(c, size_px as f32).advance_width as f64)
                .sum();
            // One variable file serves every weight; bold runs about 5% wider.
            return match weight {
                FontWeight::Regular => regular,
                FontWeight::Bold => regular * 1.05,
            };
        }

        let em: f64 = text.chars().map(char_em).sum();
        let bold = match weight {
            FontWeight::Regular => 1.0,
            FontWeight::Bold => 1.07,
        };
        em * size_px * bold
    }
}

/// Rough advance of one character in ems for a humanist sans-serif.
fn char_em(c: char) -> f64 {
    match c {
        'i' | 'j' | 'l' | '.' | ',' | ':' | ';' | '\'' | '|' | '!' => 0.28,
        'f' | 't' | 'r' | '(' | ')' | '-' | ' ' => 0.36,
        'm' | 'w' | 'M' | 'W' | '%' => 0.86,
        c if c.is_ascii_digit() => 0.56,
        c if c.is_uppercase() => 0.66,
        _ => 0.53,
    }
}

static FONTS: Lazy<Fonts> = Lazy::new(Fonts::load);

pub fn measure(weight: FontWeight, size_px: f64) -> TextMetrics {
    FONTS.metrics(weight, size_px)
}

pub fn text_width(text: &str, weight: FontWeight, size_px: f64) -> f64 {
    FONTS.width(text, weight, size_px)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_increase_with_size() {
        let small = measure(FontWeight::Regular, 12.0);
        let large = measure(FontWeight::Regular, 48.0);
        assert!(large.line_h > small.line_h);
        assert!(large.asc > small.asc);
    }

    #[test]
    fn baseline_consistency_ratio() {
        let m = measure(FontWeight::Bold, 32.0);
        let baseline_ratio = m.asc / 32.0;
        assert!(baseline_ratio > 0.80 && baseline_ratio < 1.05);
    }

    #[test]
    fn widths_scale_with_text_and_weight() {
        let short = text_width("Central", FontWeight::Regular, 12.0);
        let long = text_width("Central Region", FontWeight::Regular, 12.0);
        assert!(long > short);
        assert!(text_width("Central", FontWeight::Bold, 12.0) > short);
        assert_eq!(text_width("", FontWeight::Regular, 12.0), 0.0);
    }
}
