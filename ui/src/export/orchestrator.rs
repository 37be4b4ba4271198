//! Capture → encode → save → notify, with one export in flight at a time.

use std::cell::Cell;
use std::future::Future;
use std::time::Duration;

use futures::future::{self, Either};
use time::OffsetDateTime;
use tracing::{error, info, warn};

use super::encode::{encode_pdf, encode_png, encode_xlsx, sheet_rows};
use super::{
    Artifact, ArtifactBody, CaptureConfig, CapturedImage, ExportConfig, ExportError, ExportFormat,
};
use crate::dashboard::DashboardScene;
use crate::notifications::Severity;

/// Everything the export flow needs from the page and the platform.
pub trait ExportBackend {
    /// The dashboard as a drawable scene, or `None` when its root is not mounted.
    fn dashboard(&self) -> Option<DashboardScene>;

    fn document_engine_ready(&self) -> bool {
        cfg!(feature = "pdf")
    }

    fn capture(
        &self,
        scene: &DashboardScene,
        config: &CaptureConfig,
    ) -> impl Future<Output = Result<CapturedImage, String>>;

    /// Persist or download `artifact`; returns the written path when there is one.
    fn save(&self, artifact: Artifact) -> impl Future<Output = Result<Option<String>, String>>;

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()>;

    fn lock_scroll(&self);
    fn unlock_scroll(&self);

    fn notify(&self, message: &str, severity: Severity);
}

/// Resets the in-flight flag on every exit.
struct InFlight<'a>(&'a Cell<bool>);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Option<Self> {
        if flag.replace(true) {
            None
        } else {
            Some(Self(flag))
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Holds one page scroll lock until dropped.
pub struct ScrollGuard<'a, B: ExportBackend> {
    backend: &'a B,
}

impl<'a, B: ExportBackend> ScrollGuard<'a, B> {
    pub fn lock(backend: &'a B) -> Self {
        backend.lock_scroll();
        Self { backend }
    }
}

impl<B: ExportBackend> Drop for ScrollGuard<'_, B> {
    fn drop(&mut self) {
        self.backend.unlock_scroll();
    }
}

pub struct Exporter<B: ExportBackend> {
    backend: B,
    config: ExportConfig,
    in_flight: Cell<bool>,
}

impl<B: ExportBackend> Exporter<B> {
    pub fn new(backend: B, config: ExportConfig) -> Self {
        Self {
            backend,
            config,
            in_flight: Cell::new(false),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.get()
    }

    /// Run one export and report its outcome through a single notification.
    pub async fn export(
        &self,
        format: ExportFormat,
        at: OffsetDateTime,
    ) -> Result<Option<String>, ExportError> {
        let outcome = self.run(format, at).await;
        match &outcome {
            Ok(location) => {
                info!(
                    "{format} export saved{}",
                    location
                        .as_deref()
                        .map(|path| format!(" to {path}"))
                        .unwrap_or_default()
                );
                self.backend
                    .notify(format.success_message(), Severity::Success);
            }
            Err(err @ ExportError::Busy) => {
                warn!("{format} export rejected: {err}");
                self.backend.notify(&err.user_message(), err.severity());
            }
            Err(err) => {
                error!("{format} export failed: {err}");
                self.backend.notify(&err.user_message(), err.severity());
            }
        }
        outcome
    }

    async fn run(
        &self,
        format: ExportFormat,
        at: OffsetDateTime,
    ) -> Result<Option<String>, ExportError> {
        let _flight = InFlight::acquire(&self.in_flight).ok_or(ExportError::Busy)?;

        // Preconditions are checked before any suspension point.
        let scene = self
            .backend
            .dashboard()
            .ok_or(ExportError::MissingDashboard)?;
        if format == ExportFormat::Pdf && !self.backend.document_engine_ready() {
            return Err(ExportError::DocumentUnavailable);
        }

        info!("{format} export started");
        if let Some(progress) = format.progress_message() {
            self.backend.notify(progress, Severity::Info);
        }

        let _scroll = ScrollGuard::lock(&self.backend);
        let filename = format.filename(self.config.subject, at.date());
        let artifact = match format {
            ExportFormat::Png => {
                let image = self.capture(&scene, format).await?;
                encode_png(&image, filename).map_err(|reason| ExportError::Encode { format, reason })?
            }
            ExportFormat::Pdf => {
                let image = self.capture(&scene, format).await?;
                let bytes = encode_pdf(&image, self.config.page, self.config.title)
                    .map_err(|reason| ExportError::Encode { format, reason })?;
                Artifact {
                    filename,
                    mime: format.mime(),
                    body: ArtifactBody::Bytes(bytes),
                }
            }
            ExportFormat::Xlsx => {
                let rows = sheet_rows(&self.config, at);
                let bytes = encode_xlsx(&rows, &self.config.column_widths)
                    .map_err(|reason| ExportError::Encode { format, reason })?;
                Artifact {
                    filename,
                    mime: format.mime(),
                    body: ArtifactBody::Bytes(bytes),
                }
            }
        };

        self.backend
            .save(artifact)
            .await
            .map_err(|reason| ExportError::Save { format, reason })
    }

    async fn capture(
        &self,
        scene: &DashboardScene,
        format: ExportFormat,
    ) -> Result<CapturedImage, ExportError> {
        let config = &self.config.capture;
        let capture = self.backend.capture(scene, config);
        let deadline = self.backend.sleep(config.timeout);
        futures::pin_mut!(capture, deadline);

        match future::select(capture, deadline).await {
            Either::Left((result, _)) => {
                result.map_err(|reason| ExportError::Capture { format, reason })
            }
            Either::Right(((), _)) => Err(ExportError::CaptureTimeout {
                format,
                after: config.timeout,
            }),
        }
    }
}
