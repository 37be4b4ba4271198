//! The running app's export backend: signals for page state, the platform for
//! rasterising and saving.

use std::time::Duration;

use dioxus::prelude::*;

use super::{Artifact, CaptureConfig, CapturedImage, ExportBackend};
use crate::core::platform;
use crate::dashboard::{DashboardController, DashboardScene};
use crate::notifications::{notify, NotificationCenter, Severity};

#[derive(Clone, Copy)]
pub struct LiveBackend {
    pub dashboard: Signal<DashboardController>,
    /// Set once the dashboard root element has mounted.
    pub root_mounted: Signal<bool>,
    pub notifications: Signal<NotificationCenter>,
    /// Outstanding scroll locks; the page scrolls only at zero.
    pub scroll_locks: Signal<u32>,
}

impl ExportBackend for LiveBackend {
    fn dashboard(&self) -> Option<DashboardScene> {
        if !(self.root_mounted)() {
            return None;
        }
        Some(self.dashboard.read().scene())
    }

    async fn capture(
        &self,
        scene: &DashboardScene,
        config: &CaptureConfig,
    ) -> Result<CapturedImage, String> {
        rasterize(scene, config).await
    }

    async fn save(&self, artifact: Artifact) -> Result<Option<String>, String> {
        save_artifact(artifact).await
    }

    async fn sleep(&self, duration: Duration) {
        platform::sleep(duration).await;
    }

    fn lock_scroll(&self) {
        let mut locks = self.scroll_locks;
        *locks.write() += 1;
        platform::set_body_scroll_locked(true);
    }

    fn unlock_scroll(&self) {
        let mut locks = self.scroll_locks;
        let remaining = {
            let mut count = locks.write();
            *count = count.saturating_sub(1);
            *count
        };
        platform::set_body_scroll_locked(remaining > 0);
    }

    fn notify(&self, message: &str, severity: Severity) {
        notify(self.notifications, message, severity);
    }
}

#[cfg(not(target_arch = "wasm32"))]
async fn rasterize(scene: &DashboardScene, config: &CaptureConfig) -> Result<CapturedImage, String> {
    let svg = scene.svg.clone();
    let scale = config.scale;
    let background = config.background;
    tokio::task::spawn_blocking(move || rasterize_native(&svg, scale, background))
        .await
        .map_err(|err| format!("capture task failed: {err}"))?
}

#[cfg(not(target_arch = "wasm32"))]
fn parse_hex_color(hex: &str) -> Option<tiny_skia::Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(tiny_skia::Color::from_rgba8(channel(0)?, channel(2)?, channel(4)?, 255))
}

#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn rasterize_native(
    svg: &str,
    scale: f32,
    background: &str,
) -> Result<CapturedImage, String> {
    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(svg, &options).map_err(|err| err.to_string())?;

    let size = tree.size();
    let width = (size.width() * scale).ceil() as u32;
    let height = (size.height() * scale).ceil() as u32;
    let mut pixmap = tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| format!("cannot allocate a {width}x{height} surface"))?;
    pixmap.fill(parse_hex_color(background).unwrap_or(tiny_skia::Color::WHITE));
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    // The background is opaque, so premultiplied and straight alpha agree.
    let mut png_bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_bytes, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder
            .write_header()
            .map_err(|err| err.to_string())?
            .write_image_data(pixmap.data())
            .map_err(|err| err.to_string())?;
    }

    Ok(CapturedImage {
        width,
        height,
        png: png_bytes,
    })
}

#[cfg(target_arch = "wasm32")]
async fn rasterize(scene: &DashboardScene, config: &CaptureConfig) -> Result<CapturedImage, String> {
    use wasm_bindgen::{JsCast, JsValue};
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{
        Blob, BlobPropertyBag, CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement, Url,
    };

    let mut opts = BlobPropertyBag::new();
    opts.type_("image/svg+xml");
    let parts = js_sys::Array::new();
    parts.push(&JsValue::from_str(&scene.svg));
    let blob = Blob::new_with_str_sequence_and_options(&parts, &opts)
        .map_err(|_| "Unable to build SVG blob".to_string())?;
    let url = Url::create_object_url_with_blob(&blob)
        .map_err(|_| "Unable to create SVG URL".to_string())?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("Document unavailable")?;

    let scale = config.scale as f64;
    let width = (scene.width * scale).ceil() as u32;
    let height = (scene.height * scale).ceil() as u32;

    let canvas: HtmlCanvasElement = document
        .create_element("canvas")
        .map_err(|_| "Unable to create canvas")?
        .dyn_into()
        .map_err(|_| "Canvas cast failed")?;
    canvas.set_width(width);
    canvas.set_height(height);

    let context: CanvasRenderingContext2d = canvas
        .get_context("2d")
        .map_err(|_| "Canvas context unavailable")?
        .ok_or("Canvas context missing")?
        .dyn_into()
        .map_err(|_| "Context cast failed")?;
    context.set_fill_style(&JsValue::from_str(config.background));
    context.fill_rect(0.0, 0.0, width as f64, height as f64);
    context.scale(scale, scale).map_err(|_| "Unable to scale canvas")?;

    let image = HtmlImageElement::new().map_err(|_| "Unable to create image")?;
    if config.allow_cross_origin {
        image.set_cross_origin(Some("anonymous"));
    }
    let decode = image.decode();
    image.set_src(&url);
    let decoded = JsFuture::from(decode).await;
    Url::revoke_object_url(&url).ok();
    decoded.map_err(|_| "Image decode failed")?;

    context
        .draw_image_with_html_image_element(&image, 0.0, 0.0)
        .map_err(|_| "Unable to draw image")?;

    let data_url = canvas
        .to_data_url_with_type("image/png")
        .map_err(|_| "Unable to serialise canvas")?;
    let png = super::encode::decode_data_uri(&data_url)?;

    Ok(CapturedImage { width, height, png })
}

#[cfg(target_arch = "wasm32")]
async fn save_artifact(artifact: Artifact) -> Result<Option<String>, String> {
    use super::ArtifactBody;
    use wasm_bindgen::JsCast;
    use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or("Document unavailable")?;
    let anchor: HtmlAnchorElement = document
        .create_element("a")
        .map_err(|_| "Unable to create anchor")?
        .dyn_into()
        .map_err(|_| "Anchor cast failed")?;

    let object_url = match &artifact.body {
        ArtifactBody::DataUri(uri) => {
            anchor.set_href(uri);
            None
        }
        ArtifactBody::Bytes(bytes) => {
            let array = js_sys::Uint8Array::from(bytes.as_slice());
            let parts = js_sys::Array::new();
            parts.push(&array.buffer());
            let mut opts = BlobPropertyBag::new();
            opts.type_(artifact.mime);
            let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
                .map_err(|_| "Failed to create blob".to_string())?;
            let url = Url::create_object_url_with_blob(&blob)
                .map_err(|_| "Unable to create download".to_string())?;
            anchor.set_href(&url);
            Some(url)
        }
    };
    anchor.set_download(&artifact.filename);
    anchor.style().set_property("display", "none").ok();

    document
        .body()
        .ok_or("Missing body")?
        .append_child(&anchor)
        .map_err(|_| "Unable to attach anchor")?;
    anchor.click();
    anchor.remove();
    if let Some(url) = object_url {
        Url::revoke_object_url(&url).ok();
    }

    Ok(None)
}

#[cfg(not(target_arch = "wasm32"))]
async fn save_artifact(artifact: Artifact) -> Result<Option<String>, String> {
    use std::fs;

    let bytes = artifact.bytes()?;
    let dir = desktop_export_dir()?;
    fs::create_dir_all(&dir).map_err(|err| err.to_string())?;
    let path = dir.join(&artifact.filename);
    fs::write(&path, bytes).map_err(|err| err.to_string())?;
    Ok(Some(path.to_string_lossy().to_string()))
}

#[cfg(not(target_arch = "wasm32"))]
fn desktop_export_dir() -> Result<std::path::PathBuf, String> {
    if let Some(downloads) = directories::UserDirs::new()
        .as_ref()
        .and_then(|dirs| dirs.download_dir())
    {
        return Ok(downloads.to_path_buf());
    }
    let dirs = directories::ProjectDirs::from("mw", "Malawi Vacancies", "Vacancies Dashboard")
        .ok_or("Unable to determine export directory")?;
    Ok(dirs.data_dir().join("exports"))
}
