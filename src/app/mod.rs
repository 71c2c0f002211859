//! Core application modules for Lazy Tools.
//!
//! # Module Organization
//!
//! ## Tool windows
//! - [`tool_window`] - tab discovery, hierarchy, selection tree and window layouts
//! - [`tools`] - the tools shipped with the application
//!
//! ## Supporting services
//! - [`config`] - `config.toml` settings
//! - [`git_info`] - branch and commit queries through the `git` executable
//! - [`linker`] - `link.xml` updates from assembly definitions
//! - [`title_template`] - main window title templates
//!
//! ## UI and Infrastructure
//! - [`dashui`] - host application, menus and window management
//! - [`notifications`] - warning and status toasts

pub mod config;
pub mod dashui;
pub mod git_info;
pub mod linker;
pub mod notifications;
pub mod title_template;
pub mod tool_window;
pub mod tools;

pub use dashui::app::ToolsApp;
