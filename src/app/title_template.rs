//! Main window title templates.
//!
//! A template is plain text with `{placeholder}` tokens, e.g.
//! `"{activeWindow} - {appName} - {gitBranch}"`. Unknown tokens are kept verbatim.

use eframe::egui;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TEMPLATE: &str =
    "{activeWindow} - {appName} - {platform} - {version} - {gitBranch}";

pub const APP_NAME: &str = "Lazy Tools";

/// Placeholders understood by [`render_title`], for display in the editor
pub const PLACEHOLDERS: [&str; 5] = [
    "{activeWindow}",
    "{appName}",
    "{platform}",
    "{version}",
    "{gitBranch}",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleSettings {
    pub template: String,
    /// Re-apply the title every frame instead of only on request
    pub auto_update: bool,
}

impl Default for TitleSettings {
    fn default() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            auto_update: true,
        }
    }
}

/// Values substituted into a template
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleContext {
    pub active_window: String,
    pub app_name: String,
    pub platform: String,
    pub version: String,
    pub git_branch: String,
}

impl TitleContext {
    pub fn current(active_window: impl Into<String>, git_branch: impl Into<String>) -> Self {
        Self {
            active_window: active_window.into(),
            app_name: APP_NAME.to_string(),
            platform: std::env::consts::OS.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            git_branch: git_branch.into(),
        }
    }
}

pub fn render_title(template: &str, context: &TitleContext) -> String {
    template
        .replace("{activeWindow}", &context.active_window)
        .replace("{appName}", &context.app_name)
        .replace("{platform}", &context.platform)
        .replace("{version}", &context.version)
        .replace("{gitBranch}", &context.git_branch)
}

/// Sends the viewport title only when it differs from the last one sent
#[derive(Debug, Default)]
pub struct TitleApplier {
    last_applied: Option<String>,
}

impl TitleApplier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` when a viewport command was issued
    pub fn apply(&mut self, ctx: &egui::Context, title: String) -> bool {
        if self.last_applied.as_deref() == Some(title.as_str()) {
            return false;
        }
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
        self.last_applied = Some(title);
        true
    }

    pub fn last_applied(&self) -> Option<&str> {
        self.last_applied.as_deref()
    }

    /// Forget the last title so the next `apply` always sends
    pub fn invalidate(&mut self) {
        self.last_applied = None;
    }
}
