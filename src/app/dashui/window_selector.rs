use eframe::egui::{self, Color32, RichText};
use std::collections::BTreeMap;

#[derive(Clone, Debug)]
pub struct WindowInfo {
    pub id: String,
    pub title: String,
    pub is_visible: bool,
    pub window_type: WindowType,
}

#[derive(Clone, Debug, PartialEq)]
pub enum WindowType {
    ToolWindow,
    HelpWindow,
    Other(String),
}

impl WindowType {
    pub fn icon(&self) -> &'static str {
        match self {
            WindowType::ToolWindow => "🛠",
            WindowType::HelpWindow => "❓",
            WindowType::Other(_) => "🪟",
        }
    }

    pub fn color(&self) -> Color32 {
        match self {
            WindowType::ToolWindow => Color32::from_rgb(100, 170, 255),
            WindowType::HelpWindow => Color32::from_rgb(240, 130, 130),
            WindowType::Other(_) => Color32::from_rgb(180, 180, 180),
        }
    }
}

/// Menu listing the known windows, visible ones first
#[derive(Default)]
pub struct WindowSelector {
    windows: BTreeMap<String, WindowInfo>,
}

impl WindowSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_window(&mut self, id: String, title: String, window_type: WindowType) {
        self.windows.insert(
            id.clone(),
            WindowInfo {
                id,
                title,
                is_visible: true,
                window_type,
            },
        );
    }

    pub fn unregister_window(&mut self, id: &str) {
        self.windows.remove(id);
    }

    pub fn update_window_visibility(&mut self, id: &str, is_visible: bool) {
        if let Some(window_info) = self.windows.get_mut(id) {
            window_info.is_visible = is_visible;
        }
    }

    pub fn get_windows(&self) -> &BTreeMap<String, WindowInfo> {
        &self.windows
    }

    /// Draw the selector menu; returns the id of the window picked this frame
    pub fn show_menu(&mut self, ui: &mut egui::Ui) -> Option<String> {
        let mut selected_window = None;

        ui.menu_button(RichText::new("🪟").size(16.0), |ui| {
            ui.set_min_width(220.0);

            if self.windows.is_empty() {
                ui.label(RichText::new("No windows").weak());
                return;
            }

            let (visible, hidden): (Vec<&WindowInfo>, Vec<&WindowInfo>) =
                self.windows.values().partition(|info| info.is_visible);

            if !visible.is_empty() {
                ui.label(RichText::new("Visible Windows").strong());
                ui.separator();
                for info in &visible {
                    if window_entry(ui, info, false) {
                        selected_window = Some(info.id.clone());
                        ui.close();
                    }
                }
            }

            if !hidden.is_empty() {
                if !visible.is_empty() {
                    ui.add_space(8.0);
                }
                ui.label(RichText::new("Hidden Windows").weak());
                ui.separator();
                for info in &hidden {
                    if window_entry(ui, info, true) {
                        selected_window = Some(info.id.clone());
                        ui.close();
                    }
                }
            }
        });

        selected_window
    }
}

fn window_entry(ui: &mut egui::Ui, info: &WindowInfo, weak: bool) -> bool {
    ui.horizontal(|ui| {
        let icon = RichText::new(info.window_type.icon())
            .size(16.0)
            .color(info.window_type.color());
        ui.label(if weak { icon.weak() } else { icon });

        let title = RichText::new(&info.title);
        ui.button(if weak { title.weak() } else { title }).clicked()
    })
    .inner
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_visibility() {
        let mut selector = WindowSelector::new();
        selector.register_window(
            "Lazy Tools".to_string(),
            "Lazy Tools".to_string(),
            WindowType::ToolWindow,
        );
        selector.register_window(
            "help_window".to_string(),
            "Help".to_string(),
            WindowType::HelpWindow,
        );

        selector.update_window_visibility("help_window", false);
        assert!(!selector.get_windows()["help_window"].is_visible);
        assert!(selector.get_windows()["Lazy Tools"].is_visible);

        selector.unregister_window("help_window");
        assert_eq!(selector.get_windows().len(), 1);
    }
}
