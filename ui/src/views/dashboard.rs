use std::rc::Rc;
use std::time::Duration;

use dioxus::prelude::*;
use tracing::info;

use crate::charts::{ChartKind, ChartSurface, Viewport};
use crate::core::format::{format_average, format_long_date, format_share};
use crate::core::region::{regions, RegionKey, DATA_SOURCE};
use crate::core::platform;
use crate::core::timing::Debounce;
use crate::dashboard::{check_required_elements, DashboardController};
use crate::export::backend::LiveBackend;
use crate::export::{ExportConfig, ExportDialog, ExportFormat, Exporter};
use crate::notifications::{notify, NotificationCenter, NotificationHost, Severity};

const RESIZE_DEBOUNCE: Duration = Duration::from_millis(250);
const REFRESH_SPIN: Duration = Duration::from_secs(1);

const CONTACT_NAME: &str = "Christopher Gama";
const CONTACT_PHONE: &str = "+265 990 373 438";
const CONTACT_EMAIL: &str = "macdalfchristopher@gmail.com";

#[component]
pub fn Dashboard() -> Element {
    let dashboard = use_signal(|| {
        DashboardController::new(
            Viewport::new(platform::viewport_width()),
            |_| true,
            platform::wall_clock().date(),
        )
    });
    let notifications = use_signal(NotificationCenter::new);
    let mut scroll_locks = use_signal(|| 0u32);
    let mut root_mounted = use_signal(|| false);
    let mut dialog_open = use_signal(|| false);
    let mut refreshing = use_signal(|| false);

    let exporter = use_hook(|| {
        Rc::new(Exporter::new(
            LiveBackend {
                dashboard,
                root_mounted,
                notifications,
                scroll_locks,
            },
            ExportConfig::default(),
        ))
    });

    let resize_debounce = use_hook(|| Rc::new(Debounce::default()));
    let on_resize = move |evt: Event<ResizeData>| {
        let Ok(size) = evt.data().get_border_box_size() else {
            return;
        };
        let width = size.width;
        let ticket = resize_debounce.arm();
        let debounce = resize_debounce.clone();
        let mut dashboard = dashboard;
        platform::spawn_future(async move {
            platform::sleep(RESIZE_DEBOUNCE).await;
            if debounce.is_current(ticket) {
                dashboard.write().resize(width);
            }
        });
    };

    let mut set_locked = move |locked: bool| {
        let count = {
            let mut locks = scroll_locks.write();
            *locks = if locked {
                *locks + 1
            } else {
                locks.saturating_sub(1)
            };
            *locks
        };
        platform::set_body_scroll_locked(count > 0);
    };

    let open_dialog = move |_| {
        if !dialog_open() {
            dialog_open.set(true);
            set_locked(true);
        }
    };
    let mut close_dialog = move || {
        if dialog_open() {
            dialog_open.set(false);
            set_locked(false);
        }
    };

    let confirm_export = {
        let exporter = exporter.clone();
        move |format: ExportFormat| {
            close_dialog();
            let exporter = exporter.clone();
            platform::spawn_future(async move {
                // Outcome is reported through a notification.
                let _ = exporter.export(format, platform::wall_clock()).await;
            });
        }
    };

    let refresh = move |_| {
        if refreshing() {
            return;
        }
        refreshing.set(true);
        let mut dashboard = dashboard;
        platform::spawn_future(async move {
            platform::sleep(REFRESH_SPIN).await;
            dashboard.write().refresh(platform::wall_clock().date());
            refreshing.set(false);
            notify(notifications, "Dashboard refreshed successfully!", Severity::Success);
        });
    };

    let state = dashboard.read();
    let markup = |surface: ChartSurface| {
        state
            .chart(surface)
            .map(|chart| chart.markup().to_string())
            .unwrap_or_default()
    };
    let main_markup = markup(ChartSurface::Main);
    let distribution_markup = markup(ChartSurface::Distribution);
    let comparison_markup = markup(ChartSurface::Comparison);
    let sparklines: Vec<(RegionKey, String)> = regions()
        .iter()
        .map(|r| (r.key, markup(ChartSurface::Sparkline(r.key))))
        .collect();
    let buttons = state.selector().buttons().to_vec();
    let selected_format = state.export_format();
    let updated = format_long_date(state.updated());
    drop(state);

    let leader = regions()
        .iter()
        .max_by(|a, b| a.market_share.total_cmp(&b.market_share));
    let refresh_class = if refreshing() {
        "button button--ghost rotating"
    } else {
        "button button--ghost"
    };
    let app_class = if scroll_locks() > 0 {
        "app app--scroll-locked"
    } else {
        "app"
    };

    rsx! {
        div { class: "{app_class}", onresize: on_resize,
            main {
                class: "dashboard",
                onmounted: move |_| {
                    root_mounted.set(true);
                    check_required_elements();
                },

                section { id: "overview", class: "dashboard__section",
                    div { class: "dashboard__header",
                        div {
                            h1 { "Malawi Job Vacancies Dashboard" }
                            p { class: "dashboard__subtitle", "Regional distribution of job advertisements across Malawi" }
                        }
                        div { class: "dashboard__actions",
                            button {
                                id: "refreshBtn",
                                class: "{refresh_class}",
                                r#type: "button",
                                disabled: refreshing(),
                                onclick: refresh,
                                "⟳ Refresh"
                            }
                            button {
                                id: "exportBtn",
                                class: "button button--primary",
                                r#type: "button",
                                onclick: open_dialog,
                                "Export"
                            }
                        }
                    }

                    div { class: "kpi-grid",
                        div { class: "kpi-card",
                            span { class: "kpi-card__label", "Regions covered" }
                            strong { class: "kpi-card__value", "{regions().len()}" }
                        }
                        for region in regions() {
                            div { key: "{region.key.as_str()}", class: "kpi-card kpi-card--{region.key.as_str()}",
                                span { class: "kpi-card__label", "{region.name}" }
                                strong { class: "kpi-card__value", "{format_average(region.monthly_average)}" }
                                span { class: "kpi-card__meta", "monthly adverts · {region.range_label} range" }
                            }
                        }
                        if let Some(leader) = leader {
                            div { class: "kpi-card kpi-card--accent",
                                span { class: "kpi-card__label", "Largest market share" }
                                strong { class: "kpi-card__value", "{format_share(leader.market_share)}" }
                                span { class: "kpi-card__meta", "{leader.short_name} ({leader.area})" }
                            }
                        }
                    }

                    div { class: "chart-card chart-card--primary",
                        div { class: "chart-card__header",
                            h2 { "Monthly Advertisement Average by Region" }
                            div { class: "chart-actions", role: "group", "aria-label": "Chart type",
                                for choice in buttons {
                                    {
                                        let kind: ChartKind = choice.kind;
                                        let mut dashboard = dashboard;
                                        rsx! {
                                            button {
                                                key: "{kind.as_str()}",
                                                class: if choice.active { "btn-chart-action active" } else { "btn-chart-action" },
                                                r#type: "button",
                                                "data-chart": "{kind.as_str()}",
                                                "aria-pressed": "{choice.active}",
                                                onclick: move |_| {
                                                    dashboard.write().select_chart_type(kind);
                                                },
                                                "{kind.label()}"
                                            }
                                        }
                                    }
                                }
                            }
                        }
                        div { id: "mainChart", class: "chart-surface chart-surface--main", dangerous_inner_html: "{main_markup}" }
                    }
                }

                section { id: "regions", class: "dashboard__section",
                    h2 { class: "dashboard__section-title", "Regional Breakdown" }
                    div { class: "region-grid",
                        for (region, (key, spark)) in regions().iter().zip(sparklines) {
                            div { key: "{key.as_str()}", class: "region-card region-card--{key.as_str()}",
                                div { class: "region-card__header",
                                    h3 { "{region.name}" }
                                    span { class: "region-card__badge", "{region.performance}" }
                                }
                                p { class: "region-card__area", "{region.area}" }
                                div { class: "region-card__stats",
                                    div {
                                        span { class: "region-card__stat-label", "Monthly average" }
                                        strong { "{format_average(region.monthly_average)}" }
                                    }
                                    div {
                                        span { class: "region-card__stat-label", "Range" }
                                        strong { "{region.range_label}" }
                                    }
                                    div {
                                        span { class: "region-card__stat-label", "Market share" }
                                        strong { "{format_share(region.market_share)}" }
                                    }
                                }
                                div {
                                    id: "{ChartSurface::Sparkline(key).element_id()}",
                                    class: "chart-surface chart-surface--sparkline",
                                    dangerous_inner_html: "{spark}"
                                }
                                p { class: "region-card__description", "{region.description}" }
                                p { class: "region-card__meta", "Growth potential: {region.growth_potential}" }
                            }
                        }
                    }
                }

                section { id: "distribution", class: "dashboard__section",
                    div { class: "chart-card",
                        div { class: "chart-card__header",
                            h2 { "Market Share Distribution" }
                        }
                        div { id: "distributionChart", class: "chart-surface", dangerous_inner_html: "{distribution_markup}" }
                    }
                }

                section { id: "comparison", class: "dashboard__section",
                    div { class: "chart-card",
                        div { class: "chart-card__header",
                            h2 { "Regional Comparison" }
                        }
                        div { id: "comparisonChart", class: "chart-surface", dangerous_inner_html: "{comparison_markup}" }
                    }
                }

                footer { class: "dashboard__footer",
                    p { "Data Source: {DATA_SOURCE}" }
                    p { "Last updated: " span { id: "currentDate", "{updated}" } }
                    div { class: "dashboard__contacts",
                        span { "Contact {CONTACT_NAME}:" }
                        a {
                            href: "https://wa.me/265990373438",
                            target: "_blank",
                            rel: "noopener",
                            onclick: move |_| info!("WhatsApp contact clicked: {CONTACT_NAME} ({CONTACT_PHONE})"),
                            "WhatsApp"
                        }
                        a {
                            href: "mailto:{CONTACT_EMAIL}",
                            onclick: move |_| info!("Email contact clicked: {CONTACT_EMAIL}"),
                            "Email"
                        }
                        a {
                            href: "tel:+265990373438",
                            onclick: move |_| info!("Phone contact clicked: {CONTACT_PHONE}"),
                            "Call"
                        }
                    }
                }
            }

            if dialog_open() {
                ExportDialog {
                    selected: selected_format,
                    on_select: move |format: ExportFormat| {
                        let mut dashboard = dashboard;
                        dashboard.write().select_export_format(format);
                    },
                    on_confirm: confirm_export,
                    on_close: move |_| close_dialog(),
                }
            }

            NotificationHost { center: notifications }
        }
    }
}
