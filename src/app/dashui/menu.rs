use crate::app::dashui::app::ThemeChoice;
use crate::app::tool_window::WindowLayout;
use crate::app::tools::{COMMIT_LOG_TAB, LAZY_TOOLS_WINDOW, LINK_XML_TAB};
use eframe::egui;
use egui::RichText;

#[derive(Debug, PartialEq)]
pub enum MenuAction {
    None,
    ThemeChanged,
    /// Open (or focus) the named tool window
    OpenToolWindow(String),
    /// Open a tool window on a specific tab
    OpenToolTab { window: String, tab: String },
    SetLayout { window: String, layout: WindowLayout },
    RefreshToolWindows,
    ApplyTitle,
    SetDebugLogging(bool),
    SaveConfig,
    ShowHelp,
    Quit,
}

/// Name and current layout of each tool window, for the Tools menu
pub struct ToolWindowEntry<'a> {
    pub name: &'a str,
    pub layout: WindowLayout,
}

pub fn build_menu(
    ui: &mut egui::Ui,
    ctx: &egui::Context,
    theme: &mut ThemeChoice,
    debug_logging: &mut bool,
    tool_windows: &[ToolWindowEntry<'_>],
) -> MenuAction {
    let mut menu_action = MenuAction::None;
    let original_theme = *theme;

    ui.menu_button("Tools", |ui| {
        for entry in tool_windows {
            if ui.button(entry.name).clicked() {
                menu_action = MenuAction::OpenToolWindow(entry.name.to_string());
                ui.close();
            }
        }

        ui.separator();
        ui.menu_button("Git", |ui| {
            if ui.button("Log Commits").clicked() {
                menu_action = MenuAction::OpenToolTab {
                    window: LAZY_TOOLS_WINDOW.to_string(),
                    tab: COMMIT_LOG_TAB.to_string(),
                };
                ui.close();
            }
        });

        ui.menu_button("Linker", |ui| {
            if ui.button(LINK_XML_TAB).clicked() {
                menu_action = MenuAction::OpenToolTab {
                    window: LAZY_TOOLS_WINDOW.to_string(),
                    tab: LINK_XML_TAB.to_string(),
                };
                ui.close();
            }
        });

        ui.menu_button("Layout", |ui| {
            for entry in tool_windows {
                ui.label(RichText::new(entry.name).strong());
                for layout in [WindowLayout::Tabs, WindowLayout::Sidebar] {
                    if ui
                        .radio(entry.layout == layout, layout.to_string())
                        .clicked()
                        && entry.layout != layout
                    {
                        menu_action = MenuAction::SetLayout {
                            window: entry.name.to_string(),
                            layout,
                        };
                    }
                }
                ui.add_space(4.0);
            }
        });

        ui.separator();
        if ui.button("Refresh Tool Windows").clicked() {
            menu_action = MenuAction::RefreshToolWindows;
            ui.close();
        }
        if ui.button("Apply Window Title").clicked() {
            menu_action = MenuAction::ApplyTitle;
            ui.close();
        }
        if ui.button("Save Settings").clicked() {
            menu_action = MenuAction::SaveConfig;
            ui.close();
        }
        ui.separator();
        if ui.button("Quit").clicked() {
            menu_action = MenuAction::Quit;
        }
    });

    ui.menu_button(RichText::new("🎨").size(18.0), |ui| {
        for choice in ThemeChoice::ALL {
            if ui.button(choice.to_string()).clicked() {
                choice.apply(ctx);
                *theme = choice;
            }
        }

        ui.separator();
        let logging_response = ui.checkbox(debug_logging, "Debug Logging");
        if logging_response.changed() {
            menu_action = MenuAction::SetDebugLogging(*debug_logging);
        }
        logging_response.on_hover_text("Log tool window activity at debug level");
    });

    if ui.button("Help").clicked() {
        menu_action = MenuAction::ShowHelp;
    }

    if original_theme != *theme && menu_action == MenuAction::None {
        menu_action = MenuAction::ThemeChanged;
    }

    menu_action
}
