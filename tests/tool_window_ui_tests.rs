//! UI tests for tool windows driven through egui_kittest
//!
//! Each test registers a few labelled tabs, draws the window inside a harness and
//! checks what ends up on screen after clicks and API calls.

use eframe::egui;
use egui_kittest::kittest::Queryable;
use egui_kittest::Harness;
use lazytools::app::tool_window::{
    TabParent, TabRegistry, ToolWindow, ToolWindowTab, ToolWindowWarning, WindowLayout,
};
use pretty_assertions::assert_eq;
use std::sync::Arc;

struct LabelTab {
    window: &'static str,
    name: &'static str,
    parent: &'static str,
}

impl ToolWindowTab for LabelTab {
    fn window_name(&self) -> &str {
        self.window
    }

    fn tab_name(&self) -> &str {
        self.name
    }

    fn parent(&self) -> TabParent {
        TabParent::from_name(self.parent)
    }

    fn ui(&mut self, ui: &mut egui::Ui) {
        ui.label(format!("Content of {}", self.name));
    }
}

fn registry(tabs: &[(&'static str, &'static str, &'static str)]) -> Arc<TabRegistry> {
    let mut registry = TabRegistry::new();
    for &(window, name, parent) in tabs {
        registry.register(name, move || {
            Ok(Box::new(LabelTab {
                window,
                name,
                parent,
            }) as Box<dyn ToolWindowTab>)
        });
    }
    Arc::new(registry)
}

const ALPHA_BETA_GAMMA: &[(&str, &str, &str)] = &[
    ("W", "Alpha", ""),
    ("W", "Beta", "Alpha"),
    ("W", "Gamma", ""),
];

fn harness(window: ToolWindow) -> Harness<'static, ToolWindow> {
    let mut harness = Harness::new_ui_state(|ui, window: &mut ToolWindow| window.ui(ui), window);
    harness.run();
    harness
}

#[test]
fn test_sidebar_shows_tree_and_selected_parent() {
    let mut harness = harness(ToolWindow::new(
        "W",
        WindowLayout::Sidebar,
        registry(ALPHA_BETA_GAMMA),
    ));

    harness.get_by_label("Alpha");
    harness.get_by_label("Beta");
    harness.get_by_label("Gamma");
    harness.get_by_label("Select a tab to view its content.");
    assert_eq!(harness.state().selected_key(), None);

    // A parent row shows its own tab; its children stay listed in the tree
    harness.get_by_label("Alpha").click();
    harness.run();
    harness.get_by_label("Content of Alpha");
    assert!(harness.query_by_label("Content of Beta").is_none());
    assert!(harness.query_by_label("Content of Gamma").is_none());
    harness.get_by_label("Beta");

    harness.get_by_label("Gamma").click();
    harness.run();

    assert_eq!(harness.state().selected_key().as_deref(), Some("Gamma"));
    harness.get_by_label("Content of Gamma");
    assert!(harness.query_by_label("Content of Alpha").is_none());
}

#[test]
fn test_sidebar_child_selection_shows_only_child() {
    let mut harness = harness(ToolWindow::new(
        "W",
        WindowLayout::Sidebar,
        registry(ALPHA_BETA_GAMMA),
    ));

    harness.get_by_label("Beta").click();
    harness.run();

    assert_eq!(harness.state().selected_key().as_deref(), Some("Beta"));
    harness.get_by_label("Content of Beta");
    assert!(harness.query_by_label("Content of Alpha").is_none());
}

#[test]
fn test_tree_click_matches_change_tab() {
    let mut clicked = harness(ToolWindow::new(
        "W",
        WindowLayout::Sidebar,
        registry(ALPHA_BETA_GAMMA),
    ));
    clicked.get_by_label("Gamma").click();
    clicked.run();

    let mut changed = harness(ToolWindow::new(
        "W",
        WindowLayout::Sidebar,
        registry(ALPHA_BETA_GAMMA),
    ));
    changed.state_mut().change_tab("Gamma");
    changed.run();

    assert_eq!(clicked.state().selected_key(), changed.state().selected_key());
    assert_eq!(
        clicked.state().selection().selected_tree_key,
        changed.state().selection().selected_tree_key
    );
    assert_eq!(
        clicked.state().tree_view().and_then(|tree| tree.selected_id()),
        changed.state().tree_view().and_then(|tree| tree.selected_id())
    );
}

#[test]
fn test_empty_window_shows_placeholder() {
    for layout in [WindowLayout::Tabs, WindowLayout::Sidebar] {
        let mut harness = harness(ToolWindow::new("X", layout, registry(ALPHA_BETA_GAMMA)));

        harness.get_by_label("No tools found for X!");
        assert_eq!(
            harness.state_mut().take_warnings(),
            vec![ToolWindowWarning::EmptyHierarchy {
                window: "X".to_string()
            }]
        );
    }
}

#[test]
fn test_tabs_layout_switches_between_top_level_tabs() {
    let mut harness = harness(ToolWindow::new(
        "W",
        WindowLayout::Tabs,
        registry(ALPHA_BETA_GAMMA),
    ));

    harness.get_by_label("Content of Alpha");
    harness.get_by_label("Content of Beta");

    harness.get_by_label("Gamma").click();
    harness.run();

    assert_eq!(harness.state().selection().selected_flat_index, 1);
    harness.get_by_label("Content of Gamma");
    assert!(harness.query_by_label("Content of Alpha").is_none());
}

#[test]
fn test_tabs_selector_hidden_for_single_entry() {
    let harness = harness(ToolWindow::new(
        "W",
        WindowLayout::Tabs,
        registry(&[("W", "Alpha", ""), ("W", "Beta", "Alpha")]),
    ));

    assert!(harness.query_by_label("Alpha").is_none());
    harness.get_by_label("Content of Alpha");
    harness.get_by_label("Content of Beta");
}

#[test]
fn test_unknown_change_tab_warns_once_and_falls_back() {
    let mut harness = harness(ToolWindow::new(
        "W",
        WindowLayout::Sidebar,
        registry(ALPHA_BETA_GAMMA),
    ));

    harness.state_mut().change_tab("Nope");
    harness.run();

    assert_eq!(harness.state().selected_key().as_deref(), Some("Alpha"));
    assert_eq!(
        harness.state_mut().take_warnings(),
        vec![ToolWindowWarning::UnknownTab {
            requested: "Nope".to_string(),
            fallback: Some("Alpha".to_string()),
        }]
    );
    harness.get_by_label("Content of Alpha");
}

#[test]
fn test_refresh_keeps_selection() {
    let mut harness = harness(ToolWindow::new(
        "W",
        WindowLayout::Sidebar,
        registry(ALPHA_BETA_GAMMA),
    ));
    harness.get_by_label("Gamma").click();
    harness.run();

    harness.state_mut().refresh();
    harness.run();

    assert_eq!(harness.state().selected_key().as_deref(), Some("Gamma"));
    assert!(harness.state_mut().take_warnings().is_empty());
    harness.get_by_label("Content of Gamma");
}

#[test]
fn test_layout_switch_keeps_tab_visible() {
    let mut harness = harness(ToolWindow::new(
        "W",
        WindowLayout::Sidebar,
        registry(ALPHA_BETA_GAMMA),
    ));
    harness.get_by_label("Gamma").click();
    harness.run();

    harness.state_mut().set_layout(WindowLayout::Tabs);
    harness.run();

    assert_eq!(harness.state().layout(), WindowLayout::Tabs);
    assert_eq!(harness.state().selection().selected_flat_index, 1);
    harness.get_by_label("Content of Gamma");
}

#[test]
fn test_failing_factory_is_reported_and_skipped() {
    let mut registry = TabRegistry::new();
    registry.register("Alpha", || {
        Ok(Box::new(LabelTab {
            window: "W",
            name: "Alpha",
            parent: "",
        }) as Box<dyn ToolWindowTab>)
    });
    registry.register("Broken", || Err(anyhow::anyhow!("no such device")));

    let mut harness = harness(ToolWindow::new(
        "W",
        WindowLayout::Tabs,
        Arc::new(registry),
    ));

    harness.get_by_label("Content of Alpha");
    assert_eq!(
        harness.state_mut().take_warnings(),
        vec![ToolWindowWarning::ConstructionFailed {
            type_name: "Broken".to_string(),
            reason: "no such device".to_string(),
        }]
    );
}
