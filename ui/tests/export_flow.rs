use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::executor::block_on;
use futures::future;
use time::macros::datetime;
use time::OffsetDateTime;

use ui::dashboard::DashboardScene;
use ui::export::{
    Artifact, CaptureConfig, CapturedImage, ExportBackend, ExportConfig, ExportError,
    ExportFormat, Exporter,
};
use ui::notifications::Severity;

const NOW: OffsetDateTime = datetime!(2026-03-07 09:30 UTC);

#[derive(Clone, Copy, PartialEq)]
enum CaptureMode {
    Succeed,
    Fail,
    Hang,
}

/// Returns `Pending` once so a concurrent caller gets a turn.
struct YieldNow(bool);

impl Future for YieldNow {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        if self.0 {
            Poll::Ready(())
        } else {
            self.0 = true;
            cx.waker().wake_by_ref();
            Poll::Pending
        }
    }
}

struct FakeBackend {
    mounted: bool,
    engine: bool,
    mode: CaptureMode,
    save_fails: bool,
    captures: Cell<u32>,
    locks: Cell<i32>,
    max_locks: Cell<i32>,
    saved: RefCell<Vec<Artifact>>,
    notes: RefCell<Vec<(String, Severity)>>,
}

impl FakeBackend {
    fn new() -> Self {
        Self {
            mounted: true,
            engine: true,
            mode: CaptureMode::Succeed,
            save_fails: false,
            captures: Cell::new(0),
            locks: Cell::new(0),
            max_locks: Cell::new(0),
            saved: RefCell::new(Vec::new()),
            notes: RefCell::new(Vec::new()),
        }
    }

    fn notes_with(&self, severity: Severity) -> Vec<String> {
        self.notes
            .borrow()
            .iter()
            .filter(|(_, s)| *s == severity)
            .map(|(m, _)| m.clone())
            .collect()
    }
}

fn tiny_png(width: u32, height: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        let pixels = vec![255u8; (width * height * 4) as usize];
        writer.write_image_data(&pixels).unwrap();
    }
    bytes
}

impl ExportBackend for FakeBackend {
    fn dashboard(&self) -> Option<DashboardScene> {
        self.mounted.then(|| DashboardScene {
            svg: "<svg xmlns='http://www.w3.org/2000/svg' width='4' height='2'/>".into(),
            width: 4.0,
            height: 2.0,
        })
    }

    fn document_engine_ready(&self) -> bool {
        self.engine
    }

    async fn capture(
        &self,
        _scene: &DashboardScene,
        config: &CaptureConfig,
    ) -> Result<CapturedImage, String> {
        self.captures.set(self.captures.get() + 1);
        match self.mode {
            CaptureMode::Succeed => {
                YieldNow(false).await;
                let width = (4.0 * config.scale) as u32;
                let height = (2.0 * config.scale) as u32;
                Ok(CapturedImage {
                    width,
                    height,
                    png: tiny_png(width, height),
                })
            }
            CaptureMode::Fail => Err("canvas tainted".into()),
            CaptureMode::Hang => future::pending().await,
        }
    }

    async fn save(&self, artifact: Artifact) -> Result<Option<String>, String> {
        if self.save_fails {
            return Err("disk full".into());
        }
        let name = artifact.filename.clone();
        self.saved.borrow_mut().push(artifact);
        Ok(Some(format!("/tmp/{name}")))
    }

    async fn sleep(&self, _duration: Duration) {
        if self.mode != CaptureMode::Hang {
            future::pending::<()>().await;
        }
    }

    fn lock_scroll(&self) {
        let locks = self.locks.get() + 1;
        self.locks.set(locks);
        self.max_locks.set(self.max_locks.get().max(locks));
    }

    fn unlock_scroll(&self) {
        self.locks.set(self.locks.get() - 1);
    }

    fn notify(&self, message: &str, severity: Severity) {
        self.notes.borrow_mut().push((message.to_string(), severity));
    }
}

fn exporter(backend: FakeBackend) -> Exporter<FakeBackend> {
    Exporter::new(backend, ExportConfig::default())
}

#[test]
fn every_format_saves_one_named_artifact() {
    let cases = [
        (ExportFormat::Png, "Malawi-Vacancies-Dashboard-2026-03-07.png", &b"\x89PNG"[..]),
        (ExportFormat::Pdf, "Malawi-Vacancies-Dashboard-2026-03-07.pdf", &b"%PDF"[..]),
        (ExportFormat::Xlsx, "Malawi-Vacancies-Data-2026-03-07.xlsx", &b"PK"[..]),
    ];

    for (format, filename, magic) in cases {
        let exporter = exporter(FakeBackend::new());
        let outcome = block_on(exporter.export(format, NOW));
        assert_eq!(outcome.unwrap(), Some(format!("/tmp/{filename}")));

        let backend = exporter.backend();
        let saved = backend.saved.borrow();
        assert_eq!(saved.len(), 1, "{format}");
        assert_eq!(saved[0].filename, filename);
        assert_eq!(saved[0].mime, format.mime());
        assert!(saved[0].bytes().unwrap().starts_with(magic), "{format}");

        assert_eq!(
            backend.notes_with(Severity::Success),
            vec![format.success_message().to_string()]
        );
        assert!(backend.notes_with(Severity::Error).is_empty());
        assert_eq!(backend.locks.get(), 0);
        assert!(!exporter.is_busy());
    }
}

#[test]
fn spreadsheet_export_skips_capture() {
    let exporter = exporter(FakeBackend::new());
    block_on(exporter.export(ExportFormat::Xlsx, NOW)).unwrap();
    assert_eq!(exporter.backend().captures.get(), 0);
    assert!(exporter.backend().notes_with(Severity::Info).is_empty());
}

#[test]
fn image_exports_announce_progress_first() {
    let exporter = exporter(FakeBackend::new());
    block_on(exporter.export(ExportFormat::Pdf, NOW)).unwrap();
    let notes = exporter.backend().notes.borrow();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0], ("Generating PDF document...".to_string(), Severity::Info));
    assert_eq!(notes[1].1, Severity::Success);
}

#[test]
fn missing_dashboard_aborts_before_capture() {
    for format in ExportFormat::ALL {
        let mut backend = FakeBackend::new();
        backend.mounted = false;
        let exporter = exporter(backend);

        let err = block_on(exporter.export(format, NOW)).unwrap_err();
        assert!(matches!(err, ExportError::MissingDashboard));

        let backend = exporter.backend();
        assert_eq!(backend.captures.get(), 0);
        assert!(backend.saved.borrow().is_empty());
        assert_eq!(backend.max_locks.get(), 0);
        assert_eq!(
            backend.notes_with(Severity::Error),
            vec!["Dashboard element not found".to_string()]
        );
        assert_eq!(backend.notes.borrow().len(), 1);
    }
}

#[test]
fn pdf_without_document_engine_reports_and_stops() {
    let mut backend = FakeBackend::new();
    backend.engine = false;
    let exporter = exporter(backend);

    let err = block_on(exporter.export(ExportFormat::Pdf, NOW)).unwrap_err();
    assert!(matches!(err, ExportError::DocumentUnavailable));
    let errors = exporter.backend().notes_with(Severity::Error);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("PDF library"));
    assert_eq!(exporter.backend().captures.get(), 0);
}

#[test]
fn png_ignores_document_engine_state() {
    let mut backend = FakeBackend::new();
    backend.engine = false;
    let exporter = exporter(backend);
    assert!(block_on(exporter.export(ExportFormat::Png, NOW)).is_ok());
}

#[test]
fn capture_failure_restores_scroll_and_notifies_once() {
    let mut backend = FakeBackend::new();
    backend.mode = CaptureMode::Fail;
    let exporter = exporter(backend);

    let err = block_on(exporter.export(ExportFormat::Png, NOW)).unwrap_err();
    assert!(matches!(err, ExportError::Capture { .. }));

    let backend = exporter.backend();
    assert_eq!(backend.max_locks.get(), 1);
    assert_eq!(backend.locks.get(), 0);
    assert!(backend.saved.borrow().is_empty());
    assert_eq!(
        backend.notes_with(Severity::Error),
        vec!["Error generating image. Please try again.".to_string()]
    );
    assert!(!exporter.is_busy());
}

#[test]
fn save_failure_restores_scroll_and_reports_format() {
    let cases = [
        (ExportFormat::Png, "Error exporting PNG. Please try again."),
        (ExportFormat::Xlsx, "Error exporting Excel. Please try again."),
    ];

    for (format, message) in cases {
        let mut backend = FakeBackend::new();
        backend.save_fails = true;
        let exporter = exporter(backend);

        let err = block_on(exporter.export(format, NOW)).unwrap_err();
        assert!(matches!(err, ExportError::Save { .. }), "{format}");

        let backend = exporter.backend();
        assert_eq!(backend.max_locks.get(), 1);
        assert_eq!(backend.locks.get(), 0);
        assert_eq!(backend.notes_with(Severity::Error), vec![message.to_string()]);
        assert!(backend.notes_with(Severity::Success).is_empty());
        assert!(!exporter.is_busy());
    }
}

#[test]
fn hung_capture_times_out() {
    let mut backend = FakeBackend::new();
    backend.mode = CaptureMode::Hang;
    let exporter = exporter(backend);

    let err = block_on(exporter.export(ExportFormat::Pdf, NOW)).unwrap_err();
    match err {
        ExportError::CaptureTimeout { format, after } => {
            assert_eq!(format, ExportFormat::Pdf);
            assert_eq!(after, Duration::from_secs(15));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(exporter.backend().locks.get(), 0);
    assert_eq!(
        exporter.backend().notes_with(Severity::Error),
        vec!["Error generating PDF. Please try again.".to_string()]
    );
}

#[test]
fn second_export_while_busy_is_rejected() {
    let exporter = exporter(FakeBackend::new());

    let (first, second) = block_on(future::join(
        exporter.export(ExportFormat::Png, NOW),
        exporter.export(ExportFormat::Pdf, NOW),
    ));

    assert!(first.is_ok());
    assert!(matches!(second, Err(ExportError::Busy)));

    let backend = exporter.backend();
    assert_eq!(backend.captures.get(), 1);
    assert_eq!(backend.saved.borrow().len(), 1);
    assert_eq!(backend.notes_with(Severity::Warning).len(), 1);
    assert_eq!(backend.locks.get(), 0);

    // The guard is released once the first export finishes.
    assert!(block_on(exporter.export(ExportFormat::Xlsx, NOW)).is_ok());
}
