//! Tab contract implemented by every pluggable tool.
//!
//! A tool declares which window it belongs to, the label it is listed under and,
//! optionally, the parent entry it nests beneath in the sidebar tree. The window
//! calls [`ToolWindowTab::ui`] once per frame while the tool is selected.

use eframe::egui;

/// Where a tab sits in its window's hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum TabParent {
    /// Top-level entry, listed under its own tab name.
    #[default]
    Root,
    /// Nested beneath the named parent entry.
    Child(String),
}

impl TabParent {
    /// Map a plain parent name to a [`TabParent`]; the empty string means top-level.
    pub fn from_name(name: &str) -> Self {
        if name.is_empty() {
            TabParent::Root
        } else {
            TabParent::Child(name.to_string())
        }
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            TabParent::Root => None,
            TabParent::Child(parent) => Some(parent),
        }
    }

    pub fn is_child(&self) -> bool {
        matches!(self, TabParent::Child(_))
    }
}

/// A pluggable tool rendered inside a [`ToolWindow`](super::ToolWindow).
///
/// # Example
/// ```rust
/// use lazytools::app::tool_window::{TabParent, ToolWindowTab};
///
/// struct BranchInfo;
///
/// impl ToolWindowTab for BranchInfo {
///     fn window_name(&self) -> &str { "Lazy Tools" }
///     fn tab_name(&self) -> &str { "Branch Info" }
///     fn parent(&self) -> TabParent { TabParent::Child("Git".to_string()) }
///
///     fn ui(&mut self, ui: &mut eframe::egui::Ui) {
///         ui.label("main");
///     }
/// }
/// ```
pub trait ToolWindowTab {
    /// Name of the window this tool belongs to
    fn window_name(&self) -> &str;

    /// Label of the tab the tool is listed under
    fn tab_name(&self) -> &str;

    /// Parent entry in the sidebar tree, `Root` for top-level tools
    fn parent(&self) -> TabParent {
        TabParent::Root
    }

    /// Draw the tool for the current frame
    fn ui(&mut self, ui: &mut egui::Ui);
}
