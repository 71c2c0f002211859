use super::lock;
use super::SharedTitleState;
use crate::app::title_template::{render_title, TitleContext, TitleSettings, PLACEHOLDERS};
use crate::app::tool_window::ToolWindowTab;
use eframe::egui;
use egui::RichText;

/// Title settings shared between the title editors and the host application
#[derive(Debug, Clone, PartialEq)]
pub struct TitleState {
    pub settings: TitleSettings,
    /// Values the host last used, for the editor preview
    pub preview_context: TitleContext,
    pub apply_requested: bool,
    pub save_requested: bool,
}

impl TitleState {
    pub fn new(settings: TitleSettings) -> Self {
        Self {
            settings,
            preview_context: TitleContext::default(),
            apply_requested: false,
            save_requested: false,
        }
    }

    /// Take the pending apply request, if any
    pub fn take_apply_request(&mut self) -> bool {
        std::mem::take(&mut self.apply_requested)
    }

    /// Take the pending save request, if any
    pub fn take_save_request(&mut self) -> bool {
        std::mem::take(&mut self.save_requested)
    }
}

/// Editor for the main window title template
pub struct WindowTitleTab {
    window_name: String,
    tab_name: String,
    state: SharedTitleState,
}

impl WindowTitleTab {
    pub fn new(
        window_name: impl Into<String>,
        tab_name: impl Into<String>,
        state: SharedTitleState,
    ) -> Self {
        Self {
            window_name: window_name.into(),
            tab_name: tab_name.into(),
            state,
        }
    }
}

impl ToolWindowTab for WindowTitleTab {
    fn window_name(&self) -> &str {
        &self.window_name
    }

    fn tab_name(&self) -> &str {
        &self.tab_name
    }

    fn ui(&mut self, ui: &mut egui::Ui) {
        let mut state = lock(&self.state);

        ui.heading("Window Title");
        ui.add_space(5.0);

        ui.label("Template");
        ui.add(
            egui::TextEdit::singleline(&mut state.settings.template)
                .desired_width(f32::INFINITY)
                .font(egui::TextStyle::Monospace),
        );

        ui.horizontal_wrapped(|ui| {
            ui.label(RichText::new("Placeholders:").weak());
            for placeholder in PLACEHOLDERS {
                if ui.small_button(placeholder).clicked() {
                    state.settings.template.push_str(placeholder);
                }
            }
        });

        ui.add_space(5.0);
        let preview = render_title(&state.settings.template, &state.preview_context);
        ui.horizontal(|ui| {
            ui.label("Preview:");
            ui.label(RichText::new(preview).strong());
        });

        ui.add_space(5.0);
        ui.checkbox(&mut state.settings.auto_update, "Update title automatically");

        ui.horizontal(|ui| {
            if ui.button("Apply").clicked() {
                state.apply_requested = true;
            }
            if ui.button("Save").clicked() {
                state.save_requested = true;
            }
            if ui.button("Reset").clicked() {
                state.settings = TitleSettings::default();
                state.apply_requested = true;
            }
        });
    }
}
