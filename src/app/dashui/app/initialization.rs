//! App creation, configuration and tool window construction

use super::super::help_window::HelpWindow;
use super::super::window_focus::{FocusableWindow, WindowFocusManager};
use super::super::window_selector::{WindowSelector, WindowType};
use super::{ThemeChoice, ToolsApp};
use crate::app::config::ToolsConfig;
use crate::app::git_info::GitInfo;
use crate::app::notifications::NotificationManager;
use crate::app::title_template::TitleApplier;
use crate::app::tool_window::{ToolWindow, WindowLayout};
use crate::app::tools::{
    builtin_registry, lock, shared_link_xml_state, shared_title_state, LAZY_TOOLS_WINDOW,
    TITLE_MODIFIER_WINDOW,
};
use crate::{log_error, log_info};
use std::sync::{Arc, Mutex};

impl ToolsApp {
    /// Create the app, restoring persisted state and reading `config.toml`
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let persisted: Option<ToolsApp> = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY));

        let mut app = Self::with_config(ToolsConfig::load(), GitInfo::for_current_dir());
        if let Some(persisted) = persisted {
            app.theme = persisted.theme;
            app.open_tool_windows = persisted.open_tool_windows;
        }

        app.apply_theme(&cc.egui_ctx);
        app
    }

    /// Create the app from explicit configuration, without touching storage
    pub fn with_config(config: ToolsConfig, git: GitInfo) -> Self {
        let project_dir = git.path().to_path_buf();
        let git = Arc::new(Mutex::new(git));
        let title_state = shared_title_state(config.title.clone());
        let link_xml_state = shared_link_xml_state(config.linker.clone(), project_dir);
        let registry = Arc::new(builtin_registry(
            git.clone(),
            title_state.clone(),
            link_xml_state.clone(),
        ));

        let tool_windows = vec![
            ToolWindow::with_settings(
                LAZY_TOOLS_WINDOW,
                WindowLayout::Sidebar,
                registry.clone(),
                config.window_settings(LAZY_TOOLS_WINDOW),
            ),
            ToolWindow::with_settings(
                TITLE_MODIFIER_WINDOW,
                WindowLayout::Tabs,
                registry,
                config.window_settings(TITLE_MODIFIER_WINDOW),
            ),
        ];

        let mut app = Self {
            theme: ThemeChoice::default(),
            open_tool_windows: Vec::new(),
            config,
            tool_windows,
            help_window: HelpWindow::new(),
            notification_manager: NotificationManager::new(),
            window_selector: WindowSelector::new(),
            window_focus_manager: WindowFocusManager::new(),
            git,
            title_state,
            link_xml_state,
            title_applier: TitleApplier::new(),
            active_window: None,
            restored_open_windows: false,
            debug_logging: false,
        };
        app.register_windows();
        app
    }

    fn register_windows(&mut self) {
        for window in &self.tool_windows {
            self.window_selector.register_window(
                window.window_id().to_string(),
                window.window_title(),
                WindowType::ToolWindow,
            );
        }
        self.window_selector.register_window(
            self.help_window.window_id().to_string(),
            self.help_window.window_title(),
            WindowType::HelpWindow,
        );
    }

    pub(super) fn restore_open_windows(&mut self) {
        self.restored_open_windows = true;
        for name in std::mem::take(&mut self.open_tool_windows) {
            if let Some(window) = self.tool_window_mut(&name) {
                window.open();
            }
        }
    }

    pub fn tool_window(&self, name: &str) -> Option<&ToolWindow> {
        self.tool_windows
            .iter()
            .find(|window| window.window_name() == name)
    }

    pub fn tool_window_mut(&mut self, name: &str) -> Option<&mut ToolWindow> {
        self.tool_windows
            .iter_mut()
            .find(|window| window.window_name() == name)
    }

    /// Write the current title settings, link.xml lists and window layouts to `config.toml`
    pub fn save_config(&mut self) {
        self.config.title = lock(&self.title_state).settings.clone();
        self.config.linker = lock(&self.link_xml_state).settings.clone();
        for window in &self.tool_windows {
            let settings = self
                .config
                .windows
                .entry(window.window_name().to_string())
                .or_insert_with(|| window.settings().clone());
            settings.layout = Some(window.layout());
            settings.sidebar_width = window.selection().resize.width();
        }

        match self.config.save() {
            Ok(()) => {
                log_info!("Configuration saved");
                self.notification_manager
                    .add_info("Configuration", "Settings saved", "Saved to config.toml");
            }
            Err(e) => {
                log_error!("Failed to save configuration: {:#}", e);
                self.notification_manager.add_error(
                    "Configuration",
                    "Failed to save settings",
                    format!("{:#}", e),
                );
            }
        }
    }
}
