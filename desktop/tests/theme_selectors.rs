#![cfg(test)]
/*!
Theme selector lint for the desktop build.

Purpose:
- Ensure that CSS selectors the dashboard markup relies on (cards, chart surfaces,
  notifications and the export dialog) remain present in the unified shared theme:
  ui/assets/theme/main.css
- Fail fast if a refactor accidentally drops or renames core classes, preventing a
  silent styling regression in packaged (embedded) desktop builds.

If you intentionally rename or remove a selector, update the component markup and
this test's REQUIRED_SELECTORS together.
*/

const THEME_CSS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
));

/// Core selectors / tokens that must exist in the shared theme for desktop.
const REQUIRED_SELECTORS: &[&str] = &[
    // Global / layout
    ":root",
    "body {",
    ".app--scroll-locked",
    // Buttons & shared UI
    ".button {",
    ".button--primary",
    ".button--ghost",
    ".rotating",
    // Dashboard sections
    ".dashboard {",
    ".dashboard__header",
    ".dashboard__footer",
    ".kpi-card",
    ".region-card",
    ".region-card__stats",
    // Charts
    ".chart-card",
    ".chart-surface",
    ".btn-chart-action",
    ".btn-chart-action.active",
    // Notifications
    ".notifications {",
    ".notification--success",
    ".notification--info",
    ".notification--warning",
    ".notification--error",
    ".notification--leaving",
    // Export dialog
    ".modal {",
    ".modal--active",
    ".modal__content",
    ".export-option",
    ".export-option--selected",
    // Media query token (sanity check responsive block exists)
    "@media (max-width: 720px)",
];

#[test]
fn unified_theme_contains_required_selectors() {
    let mut missing = Vec::new();
    for sel in REQUIRED_SELECTORS {
        if !THEME_CSS.contains(sel) {
            missing.push(*sel);
        }
    }

    if !missing.is_empty() {
        panic!(
            "Missing {} required CSS selectors/tokens in unified theme:\n{}",
            missing.len(),
            missing.join("\n")
        );
    }
}

#[test]
fn embedded_theme_is_present() {
    assert!(
        !THEME_CSS.trim().is_empty(),
        "ui/assets/theme/main.css is empty; the desktop build would render unstyled"
    );
}

#[test]
fn unified_theme_not_trivially_empty() {
    let non_ws_len = THEME_CSS.chars().filter(|c| !c.is_whitespace()).count();
    assert!(
        non_ws_len > 4_000,
        "Embedded theme appears unexpectedly small ({} non-whitespace chars) – \
         did the file get truncated or path change?",
        non_ws_len
    );
}

#[test]
fn notification_severities_are_paired() {
    for severity in ["success", "info", "warning", "error"] {
        let selector = format!(".notification--{severity}");
        assert!(
            THEME_CSS.contains(&selector),
            "Missing notification style for severity `{severity}`"
        );
    }
}
