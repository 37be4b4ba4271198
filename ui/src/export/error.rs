use std::time::Duration;

use thiserror::Error;

use super::ExportFormat;
use crate::notifications::Severity;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    #[error("an export is already in progress")]
    Busy,
    #[error("dashboard root is not mounted")]
    MissingDashboard,
    #[error("PDF engine is not available in this build")]
    DocumentUnavailable,
    #[error("{format} capture failed: {reason}")]
    Capture { format: ExportFormat, reason: String },
    #[error("{format} capture timed out after {after:?}")]
    CaptureTimeout { format: ExportFormat, after: Duration },
    #[error("{format} encoding failed: {reason}")]
    Encode { format: ExportFormat, reason: String },
    #[error("saving {format} failed: {reason}")]
    Save { format: ExportFormat, reason: String },
}

impl ExportError {
    pub fn severity(&self) -> Severity {
        match self {
            ExportError::Busy => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Text shown to the user; the `Display` form is for logs.
    pub fn user_message(&self) -> String {
        match self {
            ExportError::Busy => "An export is already in progress.".into(),
            ExportError::MissingDashboard => "Dashboard element not found".into(),
            ExportError::DocumentUnavailable => {
                "PDF library not loaded. Please refresh the page.".into()
            }
            ExportError::Capture { format, .. } | ExportError::CaptureTimeout { format, .. } => {
                match format {
                    ExportFormat::Pdf => "Error generating PDF. Please try again.".into(),
                    _ => "Error generating image. Please try again.".into(),
                }
            }
            ExportError::Encode { format, .. } | ExportError::Save { format, .. } => {
                format!("Error exporting {}. Please try again.", format.label())
            }
        }
    }
}
