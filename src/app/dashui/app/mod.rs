//! Host application for the tool windows
//!
//! `ToolsApp` is split into:
//! - initialization: app creation, configuration and tool window construction
//! - theme: Catppuccin theme handling
//! - rendering: top menu bar, status bar and central panel
//! - window_rendering: tool windows, help window, title and warning handling

use super::help_window::HelpWindow;
use super::window_focus::WindowFocusManager;
use super::window_selector::WindowSelector;
use crate::app::config::ToolsConfig;
use crate::app::notifications::NotificationManager;
use crate::app::title_template::TitleApplier;
use crate::app::tool_window::ToolWindow;
use crate::app::tools::{SharedGitInfo, SharedLinkXmlState, SharedTitleState};
use eframe::egui;

mod initialization;
mod rendering;
mod theme;
mod window_rendering;

#[derive(serde::Deserialize, serde::Serialize, Clone, Copy, Debug, PartialEq, Default)]
pub enum ThemeChoice {
    #[default]
    Latte,
    Frappe,
    Macchiato,
    Mocha,
}

impl std::fmt::Display for ThemeChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeChoice::Latte => write!(f, "Latte"),
            ThemeChoice::Frappe => write!(f, "Frappe"),
            ThemeChoice::Macchiato => write!(f, "Macchiato"),
            ThemeChoice::Mocha => write!(f, "Mocha"),
        }
    }
}

#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
pub struct ToolsApp {
    pub theme: ThemeChoice,
    /// Tool windows that were open when the app last exited
    pub open_tool_windows: Vec<String>,

    #[serde(skip)]
    pub config: ToolsConfig,
    #[serde(skip)]
    pub tool_windows: Vec<ToolWindow>,
    #[serde(skip)]
    pub help_window: HelpWindow,
    #[serde(skip)]
    pub notification_manager: NotificationManager,
    #[serde(skip)]
    pub window_selector: WindowSelector,
    #[serde(skip)]
    window_focus_manager: WindowFocusManager,
    #[serde(skip)]
    git: SharedGitInfo,
    #[serde(skip)]
    title_state: SharedTitleState,
    #[serde(skip)]
    link_xml_state: SharedLinkXmlState,
    #[serde(skip)]
    title_applier: TitleApplier,
    #[serde(skip)]
    /// Tool window most recently opened or focused, for `{activeWindow}`
    active_window: Option<String>,
    #[serde(skip)]
    restored_open_windows: bool,
    #[serde(skip)]
    debug_logging: bool,
}

impl Default for ToolsApp {
    fn default() -> Self {
        Self::with_config(
            ToolsConfig::default(),
            crate::app::git_info::GitInfo::for_current_dir(),
        )
    }
}

impl eframe::App for ToolsApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.open_tool_windows = self
            .tool_windows
            .iter()
            .filter(|window| window.open)
            .map(|window| window.window_name().to_string())
            .collect();
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.frame(ctx);
    }
}

impl ToolsApp {
    /// One frame of the application, independent of `eframe::Frame`
    pub fn frame(&mut self, ctx: &egui::Context) {
        if !self.restored_open_windows {
            self.restore_open_windows();
        }

        self.render_top_menu_bar(ctx);
        self.render_status_bar(ctx);
        self.render_central_panel(ctx);

        self.handle_tool_windows(ctx);
        self.handle_help_window(ctx);
        self.collect_tool_window_warnings();

        self.handle_title(ctx);
        self.handle_link_xml_requests();
        self.notification_manager.show_toasts(ctx);
    }
}
