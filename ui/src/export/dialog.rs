use dioxus::prelude::*;

use super::ExportFormat;

/// Format picker. Exactly one option is selected; confirming hands it back.
#[component]
pub fn ExportDialog(
    selected: ExportFormat,
    on_select: EventHandler<ExportFormat>,
    on_confirm: EventHandler<ExportFormat>,
    on_close: EventHandler<()>,
) -> Element {
    rsx! {
        div {
            id: "exportModal",
            class: "modal modal--active",
            // Clicks on the backdrop itself close the dialog.
            onclick: move |_| on_close.call(()),
            div {
                class: "modal__content",
                role: "dialog",
                "aria-modal": "true",
                "aria-labelledby": "exportModalTitle",
                onclick: move |evt| evt.stop_propagation(),
                div { class: "modal__header",
                    h3 { id: "exportModalTitle", "Export Dashboard" }
                    button {
                        class: "modal-close",
                        r#type: "button",
                        "aria-label": "Close export dialog",
                        onclick: move |_| on_close.call(()),
                        "×"
                    }
                }
                div { class: "modal__body",
                    for format in ExportFormat::ALL {
                        {
                            let (title, blurb) = format.option_text();
                            let class = if format == selected {
                                "export-option export-option--selected"
                            } else {
                                "export-option"
                            };
                            rsx! {
                                button {
                                    key: "{format.extension()}",
                                    class: "{class}",
                                    r#type: "button",
                                    "data-format": "{format.extension()}",
                                    "aria-pressed": "{format == selected}",
                                    onclick: move |_| on_select.call(format),
                                    span { class: "export-option__icon fa-{format.icon()}", "{format.extension().to_uppercase()}" }
                                    span { class: "export-option__text",
                                        strong { "{title}" }
                                        small { "{blurb}" }
                                    }
                                }
                            }
                        }
                    }
                }
                div { class: "modal__footer",
                    button {
                        class: "button button--ghost modal-close",
                        r#type: "button",
                        onclick: move |_| on_close.call(()),
                        "Cancel"
                    }
                    button {
                        id: "confirmExport",
                        class: "button button--primary",
                        r#type: "button",
                        onclick: move |_| on_confirm.call(selected),
                        "Export"
                    }
                }
            }
        }
    }
}
