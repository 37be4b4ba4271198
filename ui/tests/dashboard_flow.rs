use time::macros::date;

use ui::charts::{ChartKind, ChartSurface, Viewport};
use ui::core::timing::InstantStamp;
use ui::dashboard::DashboardController;
use ui::notifications::{NotificationCenter, Severity};

fn dashboard() -> DashboardController {
    DashboardController::new(Viewport::new(1280.0), |_| true, date!(2026 - 03 - 07))
}

#[test]
fn cycling_through_every_chart_type_keeps_one_button_active() {
    let mut dashboard = dashboard();
    for kind in ChartKind::ALL {
        assert!(dashboard.select_chart_type(kind));
        assert_eq!(dashboard.selector().active_count(), 1);
        assert_eq!(dashboard.selector().active(), Some(kind));

        let primary = dashboard.primary().expect("primary chart");
        assert_eq!(primary.config().kind, kind);
        assert!(primary.markup().contains(&format!("chart--{}", kind.as_str())));

        let json = primary.config().to_json().unwrap();
        assert!(json.contains(&format!("\"type\": \"{}\"", kind.as_str())));
    }
}

#[test]
fn switching_leaves_secondary_charts_alone() {
    let mut dashboard = dashboard();
    dashboard.select_chart_type(ChartKind::Line);
    let distribution = dashboard.chart(ChartSurface::Distribution).unwrap();
    assert_eq!(distribution.config().kind, ChartKind::Doughnut);
    assert_eq!(distribution.revision(), 0);
}

#[test]
fn scene_carries_every_mounted_chart() {
    let dashboard = dashboard();
    let scene = dashboard.scene();
    assert!(scene.width > 0.0 && scene.height > 0.0);
    assert!(scene.svg.starts_with("<svg"));
    assert!(scene.svg.contains("March 7, 2026"));
    for kind in ["bar", "line", "doughnut", "radar"] {
        assert!(scene.svg.contains(&format!("chart--{kind}")), "{kind}");
    }
}

#[test]
fn refresh_and_export_notifications_replace_each_other() {
    let at = InstantStamp::from_millis;
    let mut center = NotificationCenter::new();

    center.present("Generating PNG image...", Severity::Info, at(0.0));
    center.present(
        "Dashboard exported as PNG successfully!",
        Severity::Success,
        at(800.0),
    );
    let visible: Vec<_> = center.visible().collect();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].severity, Severity::Success);

    // The progress notification's timer would have fired here.
    center.tick(at(5_000.0));
    assert_eq!(center.visible().count(), 1);

    center.tick(at(5_800.0));
    assert_eq!(center.visible().count(), 0);
    center.tick(at(6_101.0));
    assert!(center.rendered().is_empty());
}
