//! Lazy Tools - a desktop host for small developer tools
//!
//! Tools are independent units, each implementing
//! [`app::tool_window::ToolWindowTab`], that declare which window they belong to and,
//! optionally, a parent entry. Tool windows discover their tools through a
//! [`app::tool_window::TabRegistry`], group them into a two-level hierarchy and show
//! them either as a row of tabs or as a resizable sidebar tree next to the selected
//! tool.
//!
//! # Architecture Overview
//!
//! - **Tool windows** ([`app::tool_window`]): discovery, hierarchy, selection and layouts
//! - **Built-in tools** ([`app::tools`]): git branch and log viewers, window title editor
//! - **Host UI** ([`app::dashui`]): egui application with menus, window focus and toasts
//! - **Configuration** ([`app::config`]): TOML settings per window and for the title
//!
//! # Getting Started
//!
//! The application entry point is [`ToolsApp`], an `eframe::App`.

#![warn(clippy::all, rust_2018_idioms)]

// Include logging macros first
#[macro_use]
pub mod logging_macros;

pub mod app;
pub use app::ToolsApp;

use once_cell::sync::OnceCell;
use tracing_subscriber::{reload, EnvFilter, Registry};

/// Filter installed at start-up
pub const DEFAULT_LOG_FILTER: &str =
    "lazytools=info,eframe=info,egui=warn,egui_glow=warn,wgpu=warn,wgpu_core=warn,wgpu_hal=warn,winit=warn";

/// Filter used while debug logging is switched on from the menu
pub const DEBUG_LOG_FILTER: &str =
    "lazytools=debug,eframe=info,egui=warn,egui_glow=warn,wgpu=warn,wgpu_core=warn,wgpu_hal=warn,winit=warn";

pub type TracingReloadHandle = reload::Handle<EnvFilter, Registry>;

static TRACING_RELOAD_HANDLE: OnceCell<TracingReloadHandle> = OnceCell::new();

/// Store the filter handle installed by `main` so the log level can change at runtime
pub fn set_tracing_reload_handle(handle: TracingReloadHandle) {
    if TRACING_RELOAD_HANDLE.set(handle).is_err() {
        log_warn!("Tracing reload handle already set");
    }
}

/// Replace the active tracing filter, e.g. `"lazytools=debug"`
pub fn set_log_filter(directives: &str) -> anyhow::Result<()> {
    let handle = TRACING_RELOAD_HANDLE
        .get()
        .ok_or_else(|| anyhow::anyhow!("Tracing is not initialized"))?;
    let filter = EnvFilter::builder().parse(directives)?;
    handle.reload(filter)?;
    log_info!("Log filter changed to {}", directives);
    Ok(())
}
