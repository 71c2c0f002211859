//! UI rendering for the top menu, status bar and central panel

use super::ToolsApp;
use crate::app::dashui::menu::{self, MenuAction, ToolWindowEntry};
use crate::app::title_template::APP_NAME;
use crate::app::tools::lock;
use crate::{log_info, log_warn, trace_info};
use eframe::egui;
use egui::RichText;

impl ToolsApp {
    pub(super) fn render_top_menu_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                let entries: Vec<ToolWindowEntry<'_>> = self
                    .tool_windows
                    .iter()
                    .map(|window| ToolWindowEntry {
                        name: window.window_name(),
                        layout: window.layout(),
                    })
                    .collect();
                let menu_action = menu::build_menu(
                    ui,
                    ctx,
                    &mut self.theme,
                    &mut self.debug_logging,
                    &entries,
                );
                drop(entries);

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(window_id) = self.window_selector.show_menu(ui) {
                        self.focus_window(&window_id);
                    }
                });

                self.handle_menu_action(ctx, menu_action);
            });
        });
    }

    /// Apply a menu selection
    pub fn handle_menu_action(&mut self, ctx: &egui::Context, action: MenuAction) {
        match action {
            MenuAction::None => {}
            MenuAction::ThemeChanged => {
                trace_info!("Theme changed to {}", self.theme);
            }
            MenuAction::OpenToolWindow(name) => {
                self.focus_window(&name);
            }
            MenuAction::OpenToolTab { window, tab } => {
                self.focus_window(&window);
                if let Some(tool_window) = self.tool_window_mut(&window) {
                    tool_window.change_tab(&tab);
                }
            }
            MenuAction::SetLayout { window, layout } => {
                if let Some(tool_window) = self.tool_window_mut(&window) {
                    log_info!("{} layout set to {}", window, layout);
                    tool_window.set_layout(layout);
                }
            }
            MenuAction::RefreshToolWindows => {
                lock(&self.git).refresh();
                for window in &mut self.tool_windows {
                    if window.is_ready() {
                        window.refresh();
                    }
                }
            }
            MenuAction::ApplyTitle => {
                lock(&self.title_state).apply_requested = true;
            }
            MenuAction::SetDebugLogging(enabled) => {
                let filter = if enabled {
                    crate::DEBUG_LOG_FILTER
                } else {
                    crate::DEFAULT_LOG_FILTER
                };
                if let Err(e) = crate::set_log_filter(filter) {
                    log_warn!("Could not change log filter: {:#}", e);
                }
            }
            MenuAction::SaveConfig => {
                self.save_config();
            }
            MenuAction::ShowHelp => {
                self.focus_window("help_window");
            }
            MenuAction::Quit => {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                log_info!("Quit requested from Tools menu");
            }
        }
    }

    pub(super) fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(24.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let branch = lock(&self.git).branch();
                    ui.label(RichText::new(format!("⎇ {}", branch)).weak());
                    ui.separator();
                    ui.label(
                        RichText::new(format!(
                            "v{} ({})",
                            env!("CARGO_PKG_VERSION"),
                            env!("GIT_COMMIT")
                        ))
                        .weak(),
                    );
                    self.notification_manager.render_status_bar_indicator(ui);
                });
            });
    }

    pub(super) fn render_central_panel(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() / 3.0);
                ui.heading(APP_NAME);
                ui.add_space(10.0);

                let mut clicked = None;
                for window in &self.tool_windows {
                    if ui.button(window.window_name()).clicked() {
                        clicked = Some(window.window_name().to_string());
                    }
                }
                if let Some(name) = clicked {
                    self.focus_window(&name);
                }
            });
        });
    }
}
