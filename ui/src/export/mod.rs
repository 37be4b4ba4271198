//! Dashboard export: capture the scene, encode it, save it, report back.
//!
//! [`orchestrator::Exporter`] owns the sequencing and is generic over an
//! [`orchestrator::ExportBackend`], so the whole flow can be driven headless in
//! tests. [`backend::LiveBackend`] is the Dioxus/platform implementation.

pub mod backend;
pub mod config;
pub mod dialog;
pub mod encode;
pub mod error;
pub mod orchestrator;

use std::fmt;

use time::Date;

use crate::core::format::format_iso_date;

pub use config::{CaptureConfig, ExportConfig, PageLayout};
pub use dialog::ExportDialog;
pub use error::ExportError;
pub use orchestrator::{ExportBackend, Exporter};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    #[default]
    Png,
    Pdf,
    Xlsx,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Png, ExportFormat::Pdf, ExportFormat::Xlsx];

    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    /// Name used in user-facing messages.
    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Png => "PNG",
            ExportFormat::Pdf => "PDF",
            ExportFormat::Xlsx => "Excel",
        }
    }

    /// Image and document exports rasterise the dashboard; spreadsheets do not.
    pub fn needs_capture(self) -> bool {
        !matches!(self, ExportFormat::Xlsx)
    }

    pub fn filename(self, subject: &str, date: Date) -> String {
        let kind = match self {
            ExportFormat::Png | ExportFormat::Pdf => "Dashboard",
            ExportFormat::Xlsx => "Data",
        };
        format!(
            "{subject}-{kind}-{}.{}",
            format_iso_date(date),
            self.extension()
        )
    }

    pub fn progress_message(self) -> Option<&'static str> {
        match self {
            ExportFormat::Png => Some("Generating PNG image..."),
            ExportFormat::Pdf => Some("Generating PDF document..."),
            ExportFormat::Xlsx => None,
        }
    }

    pub fn success_message(self) -> &'static str {
        match self {
            ExportFormat::Png => "Dashboard exported as PNG successfully!",
            ExportFormat::Pdf => "Dashboard exported as PDF successfully!",
            ExportFormat::Xlsx => "Data exported as Excel successfully!",
        }
    }

    /// Title and blurb for the format picker.
    pub fn option_text(self) -> (&'static str, &'static str) {
        match self {
            ExportFormat::Png => ("PNG Image", "High-resolution snapshot of the dashboard"),
            ExportFormat::Pdf => ("PDF Document", "Printable A4 page with every chart"),
            ExportFormat::Xlsx => ("Excel Spreadsheet", "Regional figures as a worksheet"),
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ExportFormat::Png => "file-image",
            ExportFormat::Pdf => "file-pdf",
            ExportFormat::Xlsx => "file-excel",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ExportFormat::Png => "PNG",
            ExportFormat::Pdf => "PDF",
            ExportFormat::Xlsx => "XLSX",
        })
    }
}

/// A rasterised dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct CapturedImage {
    pub width: u32,
    pub height: u32,
    /// PNG-encoded RGBA pixels.
    pub png: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ArtifactBody {
    /// `data:` URI, downloaded as-is on the web.
    DataUri(String),
    Bytes(Vec<u8>),
}

/// An encoded export ready to be written or downloaded.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub filename: String,
    pub mime: &'static str,
    pub body: ArtifactBody,
}

impl Artifact {
    pub fn bytes(&self) -> Result<Vec<u8>, String> {
        match &self.body {
            ArtifactBody::Bytes(bytes) => Ok(bytes.clone()),
            ArtifactBody::DataUri(uri) => encode::decode_data_uri(uri),
        }
    }
}
