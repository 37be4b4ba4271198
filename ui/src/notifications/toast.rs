use dioxus::prelude::*;

use super::{NotificationCenter, NotificationId, Severity, AUTO_DISMISS, EXIT_TRANSITION};
use crate::core::{platform, timing};

/// Present a message and schedule its auto-dismiss and removal.
pub fn notify(mut center: Signal<NotificationCenter>, message: impl Into<String>, severity: Severity) {
    center.write().present(message, severity, timing::now());
    platform::spawn_future(async move {
        platform::sleep(AUTO_DISMISS).await;
        center.write().tick(timing::now());
        platform::sleep(EXIT_TRANSITION).await;
        center.write().tick(timing::now());
    });
}

fn dismiss(mut center: Signal<NotificationCenter>, id: NotificationId) {
    if !center.write().dismiss(id, timing::now()) {
        return;
    }
    platform::spawn_future(async move {
        platform::sleep(EXIT_TRANSITION).await;
        center.write().tick(timing::now());
    });
}

#[component]
pub fn NotificationHost(center: Signal<NotificationCenter>) -> Element {
    let entries = center.read().rendered().to_vec();

    rsx! {
        div { class: "notifications", role: "status", "aria-live": "polite",
            for entry in entries {
                {
                    let id = entry.id;
                    let leaving = if entry.is_leaving() { " notification--leaving" } else { "" };
                    rsx! {
                        div {
                            key: "{id:?}",
                            class: "notification notification--{entry.severity.as_str()}{leaving}",
                            span {
                                class: "notification__icon fa-{entry.severity.icon()}",
                                "aria-hidden": "true",
                                "{entry.severity.glyph()}"
                            }
                            span { class: "notification__message", "{entry.message}" }
                            button {
                                class: "notification__close",
                                r#type: "button",
                                "aria-label": "Dismiss notification",
                                onclick: move |_| dismiss(center, id),
                                "×"
                            }
                        }
                    }
                }
            }
        }
    }
}
