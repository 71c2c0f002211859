//! End-to-end tests of the host application
//!
//! The app is built from default configuration and a git directory that is not a
//! repository, then driven frame by frame through egui_kittest.

use egui_kittest::kittest::Queryable;
use egui_kittest::Harness;
use lazytools::app::config::ToolsConfig;
use lazytools::app::dashui::MenuAction;
use lazytools::app::git_info::GitInfo;
use lazytools::app::tool_window::WindowLayout;
use lazytools::app::linker::LINK_XML_PATH;
use lazytools::app::tools::{
    COMMIT_LOG_TAB, LAZY_TOOLS_WINDOW, LINK_XML_TAB, TITLE_MODIFIER_WINDOW,
};
use lazytools::ToolsApp;
use pretty_assertions::assert_eq;

fn app_harness(dir: &tempfile::TempDir) -> Harness<'static, ToolsApp> {
    let app = ToolsApp::with_config(ToolsConfig::default(), GitInfo::new(dir.path()));
    let mut harness = Harness::new_state(|ctx, app: &mut ToolsApp| app.frame(ctx), app);
    step(&mut harness, 2);
    harness
}

fn step(harness: &mut Harness<'static, ToolsApp>, frames: usize) {
    for _ in 0..frames {
        harness.step();
    }
}

fn dispatch(harness: &mut Harness<'static, ToolsApp>, action: MenuAction) {
    let ctx = harness.ctx.clone();
    harness.state_mut().handle_menu_action(&ctx, action);
    step(harness, 3);
}

#[test]
fn test_builtin_windows_start_closed() {
    let dir = tempfile::tempdir().unwrap();
    let harness = app_harness(&dir);

    let app = harness.state();
    let names: Vec<&str> = app.tool_windows.iter().map(|w| w.window_name()).collect();
    assert_eq!(names, vec![LAZY_TOOLS_WINDOW, TITLE_MODIFIER_WINDOW]);
    assert!(app.tool_windows.iter().all(|w| !w.open && !w.is_ready()));
    assert_eq!(
        app.tool_window(LAZY_TOOLS_WINDOW).map(|w| w.layout()),
        Some(WindowLayout::Sidebar)
    );
}

#[test]
fn test_log_commits_opens_commit_log_tab() {
    let dir = tempfile::tempdir().unwrap();
    let mut harness = app_harness(&dir);

    dispatch(
        &mut harness,
        MenuAction::OpenToolTab {
            window: LAZY_TOOLS_WINDOW.to_string(),
            tab: COMMIT_LOG_TAB.to_string(),
        },
    );

    let window = harness
        .state()
        .tool_window(LAZY_TOOLS_WINDOW)
        .expect("Lazy Tools window is registered");
    assert!(window.open);
    assert_eq!(window.selected_key().as_deref(), Some(COMMIT_LOG_TAB));
    assert_eq!(harness.state().notification_manager.get_warning_count(), 0);
}

#[test]
fn test_unknown_tab_becomes_one_warning_toast() {
    let dir = tempfile::tempdir().unwrap();
    let mut harness = app_harness(&dir);

    dispatch(
        &mut harness,
        MenuAction::OpenToolTab {
            window: TITLE_MODIFIER_WINDOW.to_string(),
            tab: "Nope".to_string(),
        },
    );

    assert_eq!(harness.state().notification_manager.get_warning_count(), 1);
    harness.get_by_label("Tab not found");
}

#[test]
fn test_set_layout_from_menu() {
    let dir = tempfile::tempdir().unwrap();
    let mut harness = app_harness(&dir);

    dispatch(
        &mut harness,
        MenuAction::OpenToolWindow(LAZY_TOOLS_WINDOW.to_string()),
    );
    dispatch(
        &mut harness,
        MenuAction::SetLayout {
            window: LAZY_TOOLS_WINDOW.to_string(),
            layout: WindowLayout::Tabs,
        },
    );

    let window = harness.state().tool_window(LAZY_TOOLS_WINDOW).unwrap();
    assert_eq!(window.layout(), WindowLayout::Tabs);
    assert!(window.open);
}

#[test]
fn test_status_bar_reports_missing_repository() {
    let dir = tempfile::tempdir().unwrap();
    let harness = app_harness(&dir);

    harness.get_by_label("⎇ no git repository");
}

#[test]
fn test_link_xml_editor_updates_project_file() {
    let dir = tempfile::tempdir().unwrap();
    let asmdef = dir.path().join("Assets/Scripts/MyName.Core.asmdef");
    std::fs::create_dir_all(asmdef.parent().unwrap()).unwrap();
    std::fs::write(&asmdef, r#"{ "name": "MyName.Core" }"#).unwrap();
    let mut harness = app_harness(&dir);

    dispatch(
        &mut harness,
        MenuAction::OpenToolTab {
            window: LAZY_TOOLS_WINDOW.to_string(),
            tab: LINK_XML_TAB.to_string(),
        },
    );
    let window = harness.state().tool_window(LAZY_TOOLS_WINDOW).unwrap();
    assert_eq!(window.selected_key().as_deref(), Some(LINK_XML_TAB));

    harness.get_by_label("Update link.xml").click();
    step(&mut harness, 3);

    let written = std::fs::read_to_string(dir.path().join(LINK_XML_PATH)).unwrap();
    assert!(written.contains(r#"fullname="MyName.Core""#));
    harness.get_by_label("link.xml updated");
    assert_eq!(harness.state().notification_manager.get_error_count(), 0);
}

#[test]
fn test_focus_unknown_window_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    let mut harness = app_harness(&dir);

    harness.state_mut().focus_window("Nope");
    step(&mut harness, 2);

    assert!(harness.state().tool_windows.iter().all(|w| !w.open));
    assert_eq!(harness.state().notification_manager.get_warning_count(), 0);
}
