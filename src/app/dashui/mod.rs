//! Desktop user interface hosting the tool windows.
//!
//! # Window Management
//! - **Trait-based Windows**: windows implement [`window_focus::FocusableWindow`]
//! - **Focus Coordination**: [`window_focus::WindowFocusManager`] brings the window picked in
//!   the [`window_selector::WindowSelector`] to the front
//! - **Persistent State**: theme and open tool windows survive restarts through eframe storage
//!
//! # Components
//! - [`app::ToolsApp`] - application coordinator (`eframe::App`)
//! - [`menu`] - Tools, theme and Help menus
//! - [`help_window::HelpWindow`] - usage notes
//!
//! The tool windows themselves live in [`crate::app::tool_window`].

pub mod app;
pub mod help_window;
pub mod menu;
pub mod window_focus;
pub mod window_selector;

pub use app::{ThemeChoice, ToolsApp};
pub use help_window::HelpWindow;
pub use menu::MenuAction;
pub use window_focus::{FocusableWindow, SimpleShowParams, WindowFocusManager};
pub use window_selector::{WindowInfo, WindowSelector, WindowType};
