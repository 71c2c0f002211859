use super::window_focus::impl_simple_focusable_window;
use crate::app::title_template::PLACEHOLDERS;
use eframe::egui;
use egui::{Context, RichText, Ui};

#[derive(Default)]
pub struct HelpWindow {
    pub open: bool,
}

impl HelpWindow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self, ctx: &Context) {
        self.show_with_focus(ctx, false);
    }

    pub fn show_with_focus(&mut self, ctx: &Context, bring_to_front: bool) {
        if !self.open {
            return;
        }

        let central_panel_size = ctx.available_rect().size();
        let window_width = central_panel_size.x.min(520.0);
        let window_height = central_panel_size.y.min(420.0);

        let mut open = self.open;
        let mut window = egui::Window::new("Help")
            .open(&mut open)
            .fixed_size([window_width, window_height])
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .resizable(false)
            .collapsible(false);

        if bring_to_front {
            window = window.order(egui::Order::Foreground);
        }

        window.show(ctx, |ui| {
            self.ui_content(ui);
        });
        self.open = open;
    }

    fn ui_content(&self, ui: &mut Ui) {
        egui::ScrollArea::vertical().show(ui, |ui| {
            ui.add_space(5.0);

            ui.heading("Tool Windows");
            ui.add_space(5.0);
            ui.label("Open tool windows from the Tools menu. Each window collects every tool registered for it.");
            ui.add_space(5.0);

            ui.horizontal(|ui| {
                ui.label(RichText::new("Tabs").strong());
                ui.label("- one row of tabs; a tab's sub-tools are shown below it");
            });
            ui.horizontal(|ui| {
                ui.label(RichText::new("Sidebar").strong());
                ui.label("- tree of tools on the left, drag the divider to resize");
            });

            ui.add_space(15.0);

            ui.heading("Window Title");
            ui.add_space(5.0);
            ui.label("The title template accepts these placeholders:");
            for placeholder in PLACEHOLDERS {
                ui.label(RichText::new(placeholder).monospace());
            }

            ui.add_space(15.0);

            ui.heading("Link XML Editor");
            ui.add_space(5.0);
            ui.label("Assemblies defined by .asmdef files whose name starts with one of the prefixes are added to Assets/link.xml. Editor assemblies are skipped and ignored assemblies are removed from the file.");

            ui.add_space(15.0);

            ui.heading("Configuration");
            ui.add_space(5.0);
            ui.label("Layouts, sidebar widths, the title template and the link.xml lists are read from config.toml in the application config directory.");

            ui.add_space(20.0);
        });
    }
}

impl_simple_focusable_window!(HelpWindow, "help_window", "Help", open, show_with_focus);
