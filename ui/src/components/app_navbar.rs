use dioxus::prelude::*;

use crate::core::platform;
use crate::dashboard::nav::{track_section, SECTIONS};

const NAVBAR_CSS: Asset = asset!("/assets/styling/navbar.css");
const NAVBAR_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/styling/navbar.css"
));

/// Fixed top bar with in-page section links.
///
/// The current section follows the scroll position (web only; the desktop
/// webview does not forward window scroll events) and clicks. On narrow
/// screens the links collapse behind a toggle that closes again after a link
/// is chosen.
#[component]
pub fn AppNavbar() -> Element {
    let mut active = use_signal(|| Some(SECTIONS[0].id));
    let mut menu_open = use_signal(|| false);

    let mut track = move || {
        let current = *active.peek();
        let next = track_section(current, platform::scroll_y(), platform::element_bounds);
        if next != current {
            active.set(next);
        }
    };
    use_hook(move || platform::on_window_event("scroll", track));
    // First measurement once the routed sections below have mounted.
    use_effect(move || track());

    let menu_class = if menu_open() {
        "navbar__links navbar__links--open"
    } else {
        "navbar__links"
    };
    let toggle_class = if menu_open() {
        "navbar__toggle navbar__toggle--open"
    } else {
        "navbar__toggle"
    };

    rsx! {
        document::Link { rel: "stylesheet", href: NAVBAR_CSS }
        if cfg!(all(not(debug_assertions), not(target_arch = "wasm32"))) {
            document::Style { "{NAVBAR_CSS_INLINE}" }
        }

        header {
            id: "navbar",
            class: "navbar",
            div { class: "navbar__inner",
                div { class: "navbar__brand",
                    span { class: "navbar__brand-mark", "Malawi Vacancies" }
                    span { class: "navbar__brand-subtitle", "Regional job advert insights" }
                }

                button {
                    id: "mobileMenuBtn",
                    class: "{toggle_class}",
                    r#type: "button",
                    "aria-label": "Toggle navigation",
                    "aria-expanded": "{menu_open()}",
                    onclick: move |_| menu_open.set(!menu_open()),
                    span {}
                    span {}
                    span {}
                }

                nav { id: "navMenu", class: "{menu_class}",
                    for section in SECTIONS {
                        a {
                            key: "{section.id}",
                            class: if active() == Some(section.id) { "navbar__link navbar__link--active" } else { "navbar__link" },
                            href: "#{section.id}",
                            onclick: move |_| {
                                active.set(Some(section.id));
                                menu_open.set(false);
                            },
                            "{section.label}"
                        }
                    }
                }
            }
        }
    }
}
