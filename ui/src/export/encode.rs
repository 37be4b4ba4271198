//! Format encoders. Each takes already-captured or static data and produces
//! the bytes (or data URI) of one export; nothing here touches the platform.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use time::OffsetDateTime;

use super::{Artifact, ArtifactBody, CapturedImage, ExportConfig, ExportFormat, PageLayout};
use crate::core::format::{format_average, format_compact, format_generated_at, format_share};
use crate::core::region::{regions, Region, DATA_SOURCE};

const PNG_PREFIX: &str = "data:image/png;base64,";

pub fn png_data_uri(png: &[u8]) -> String {
    format!("{PNG_PREFIX}{}", STANDARD.encode(png))
}

pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>, String> {
    let (_, payload) = uri
        .split_once(";base64,")
        .ok_or_else(|| "Malformed data URL".to_string())?;
    STANDARD
        .decode(payload)
        .map_err(|err| format!("data URL payload: {err}"))
}

pub fn encode_png(image: &CapturedImage, filename: String) -> Result<Artifact, String> {
    if image.png.is_empty() {
        return Err("captured surface is empty".into());
    }
    Ok(Artifact {
        filename,
        mime: ExportFormat::Png.mime(),
        body: ArtifactBody::DataUri(png_data_uri(&image.png)),
    })
}

/// Single A4 portrait page with the capture at the layout's fixed width.
#[cfg(feature = "pdf")]
pub fn encode_pdf(image: &CapturedImage, layout: PageLayout, title: &str) -> Result<Vec<u8>, String> {
    use printpdf::{image_crate, Image, ImageTransform, Mm, PdfDocument};

    let decoded = image_crate::load_from_memory(&image.png).map_err(|err| err.to_string())?;
    let rgb = image_crate::DynamicImage::ImageRgb8(decoded.to_rgb8());
    let (px_w, px_h) = (rgb.width(), rgb.height());
    if px_w == 0 || px_h == 0 {
        return Err("captured surface is empty".into());
    }

    let (doc, page, layer) = PdfDocument::new(
        title,
        Mm(layout.width_mm),
        Mm(layout.height_mm),
        "Dashboard",
    );
    let layer = doc.get_page(page).get_layer(layer);

    let image_h = layout.image_height_mm(px_w, px_h);
    // PDF origin is bottom-left; place the top edge at the margin.
    let translate_y = layout.height_mm - layout.margin_mm - image_h;
    let dpi = px_w as f32 * 25.4 / layout.image_width_mm;

    Image::from_dynamic_image(&rgb).add_to_layer(
        layer,
        ImageTransform {
            translate_x: Some(Mm(layout.margin_mm)),
            translate_y: Some(Mm(translate_y)),
            dpi: Some(dpi),
            ..Default::default()
        },
    );

    doc.save_to_bytes().map_err(|err| err.to_string())
}

#[cfg(not(feature = "pdf"))]
pub fn encode_pdf(_image: &CapturedImage, _layout: PageLayout, _title: &str) -> Result<Vec<u8>, String> {
    Err("built without the `pdf` feature".into())
}

/// One worksheet row; empty rows are spacers.
pub type SheetRow = Vec<String>;

pub const SHEET_NAME: &str = "Regional Data";
pub const SHEET_HEADER: [&str; 6] = [
    "Region",
    "Monthly Average",
    "Range",
    "Market Share",
    "Performance",
    "Growth Potential",
];

fn range_bounds(label: &str) -> Option<(f64, f64)> {
    let (lo, hi) = label.split_once('-')?;
    Some((lo.trim().parse().ok()?, hi.trim().parse().ok()?))
}

/// Regions with a wide range report the range as their average and the
/// average as the typical count.
fn average_and_range_cells(region: &Region) -> (String, String) {
    let wide = range_bounds(region.range_label).is_some_and(|(lo, hi)| hi - lo > 1.0);
    if wide {
        (
            format!(
                "{} (Avg: {})",
                region.range_label,
                format_compact(region.monthly_average)
            ),
            format!("{} vacancies", format_compact(region.monthly_average)),
        )
    } else {
        (
            format_average(region.monthly_average),
            format!("{} vacancies", region.range_label),
        )
    }
}

pub fn sheet_rows(config: &ExportConfig, generated_at: OffsetDateTime) -> Vec<SheetRow> {
    let mut rows: Vec<SheetRow> = vec![
        vec![format!("{} - Regional Distribution", config.title)],
        vec![format!("Generated: {}", format_generated_at(generated_at))],
        Vec::new(),
        SHEET_HEADER.iter().map(|h| h.to_string()).collect(),
    ];

    for region in regions() {
        let (average, range) = average_and_range_cells(region);
        rows.push(vec![
            region.labelled_area(),
            average,
            range,
            format_share(region.market_share),
            region.performance.to_string(),
            region.growth_potential.to_string(),
        ]);
    }

    let total: f64 = regions().iter().map(|r| r.market_share).sum();
    rows.push(Vec::new());
    rows.push(vec![format!(
        "Total Market Distribution: {}%",
        format_compact(total.round())
    )]);
    rows.push(vec![format!("Data Source: {DATA_SOURCE}")]);
    rows
}

#[cfg(feature = "xlsx")]
pub fn encode_xlsx(rows: &[SheetRow], column_widths: &[f64]) -> Result<Vec<u8>, String> {
    use rust_xlsxwriter::{Format, Workbook};

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME).map_err(|err| err.to_string())?;

    let last_col = column_widths.len().saturating_sub(1) as u16;
    let title = Format::new().set_bold().set_font_size(14);
    let plain = Format::new();
    let header = Format::new().set_bold();

    for (r, row) in rows.iter().enumerate() {
        let r = r as u32;
        match r {
            // Title and timestamp span every column.
            0 | 1 => {
                let text = row.first().map(String::as_str).unwrap_or("");
                let format = if r == 0 { &title } else { &plain };
                sheet
                    .merge_range(r, 0, r, last_col, text, format)
                    .map_err(|err| err.to_string())?;
            }
            3 => {
                for (c, cell) in row.iter().enumerate() {
                    sheet
                        .write_string_with_format(r, c as u16, cell, &header)
                        .map_err(|err| err.to_string())?;
                }
            }
            _ => {
                for (c, cell) in row.iter().enumerate() {
                    sheet
                        .write_string(r, c as u16, cell)
                        .map_err(|err| err.to_string())?;
                }
            }
        }
    }

    for (c, width) in column_widths.iter().enumerate() {
        sheet
            .set_column_width(c as u16, *width)
            .map_err(|err| err.to_string())?;
    }

    workbook.save_to_buffer().map_err(|err| err.to_string())
}

#[cfg(not(feature = "xlsx"))]
pub fn encode_xlsx(_rows: &[SheetRow], _column_widths: &[f64]) -> Result<Vec<u8>, String> {
    Err("built without the `xlsx` feature".into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn tiny_png() -> Vec<u8> {
        let mut buffer = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut buffer, 2, 1);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            encoder
                .write_header()
                .unwrap()
                .write_image_data(&[255; 8])
                .unwrap();
        }
        buffer
    }

    #[test]
    fn data_uri_round_trips() {
        let uri = png_data_uri(&[1, 2, 3, 250]);
        assert!(uri.starts_with("data:image/png;base64,"));
        assert_eq!(decode_data_uri(&uri).unwrap(), vec![1, 2, 3, 250]);
        assert!(decode_data_uri("not a uri").is_err());
    }

    #[test]
    fn png_artifact_is_a_data_uri() {
        let image = CapturedImage {
            width: 2,
            height: 1,
            png: tiny_png(),
        };
        let artifact = encode_png(&image, "a.png".into()).unwrap();
        assert_eq!(artifact.mime, "image/png");
        assert!(matches!(artifact.body, ArtifactBody::DataUri(_)));
        assert_eq!(artifact.bytes().unwrap(), tiny_png());
    }

    #[test]
    fn empty_capture_is_rejected() {
        let image = CapturedImage {
            width: 0,
            height: 0,
            png: Vec::new(),
        };
        assert!(encode_png(&image, "a.png".into()).is_err());
    }

    #[test]
    fn sheet_rows_follow_the_fixed_layout() {
        let rows = sheet_rows(&ExportConfig::default(), datetime!(2026-03-07 09:30:00 UTC));
        assert_eq!(rows.len(), 10);
        assert_eq!(
            rows[0][0],
            "Malawi Job Vacancies Dashboard - Regional Distribution"
        );
        assert_eq!(rows[1][0], "Generated: 2026-03-07 09:30:00 UTC");
        assert!(rows[2].is_empty());
        assert_eq!(rows[3], SHEET_HEADER.map(String::from).to_vec());
        assert_eq!(
            rows[4],
            vec!["Northern (Mzuzu)", "0-10 (Avg: 3)", "3 vacancies", "20.0%", "Limited", "High"]
        );
        assert_eq!(
            rows[5],
            vec!["Central (Lilongwe)", "5.6", "5-6 vacancies", "37.3%", "Stable", "Medium"]
        );
        assert_eq!(rows[8][0], "Total Market Distribution: 100%");
        assert_eq!(
            rows[9][0],
            "Data Source: Malawi Job Vacancies Advert Sharing"
        );
    }

    #[cfg(feature = "pdf")]
    #[test]
    fn pdf_is_a_single_document() {
        let image = CapturedImage {
            width: 2,
            height: 1,
            png: tiny_png(),
        };
        let bytes = encode_pdf(&image, PageLayout::default(), "Dashboard").unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[cfg(feature = "xlsx")]
    #[test]
    fn xlsx_is_a_zip_container() {
        let rows = sheet_rows(&ExportConfig::default(), datetime!(2026-03-07 09:30:00 UTC));
        let bytes = encode_xlsx(&rows, &ExportConfig::default().column_widths).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
