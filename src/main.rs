#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use tracing_subscriber::prelude::*;

fn init_logging() {
    let Some(proj_dirs) = directories::ProjectDirs::from("com", "", "lazytools") else {
        eprintln!("Could not determine data directory, file logging disabled");
        return;
    };

    let log_dir = proj_dirs.data_dir().join("logs");
    let _ = std::fs::create_dir_all(&log_dir);
    let log_path = log_dir.join("lazytools.log");

    let file = match std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(&log_path)
    {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Failed to open log file {:?}: {}", log_path, e);
            return;
        }
    };

    // Owner read/write only
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = file.metadata() {
            let mut perms = metadata.permissions();
            perms.set_mode(0o600);
            if let Err(e) = std::fs::set_permissions(&log_path, perms) {
                eprintln!("Failed to set log file permissions: {}", e);
            }
        }
    }

    // RUST_LOG overrides the built-in filter
    let filter = std::env::var("RUST_LOG")
        .ok()
        .and_then(|directives| tracing_subscriber::EnvFilter::builder().parse(directives).ok())
        .unwrap_or_else(|| {
            tracing_subscriber::EnvFilter::builder()
                .parse_lossy(lazytools::DEFAULT_LOG_FILTER)
        });

    let (filter, reload_handle) = tracing_subscriber::reload::Layer::new(filter);

    // 1. Filter layer (reloadable from the menu)
    // 2. Fmt layer writing everything to lazytools.log
    let subscriber = tracing_subscriber::registry().with(filter).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false),
    );

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return;
    }

    // Bridge log crate events (eframe, egui, winit) to tracing.
    // Must run after the subscriber is installed.
    if let Err(e) = tracing_log::LogTracer::init() {
        eprintln!("Failed to initialize log-to-tracing bridge: {}", e);
    }

    lazytools::set_tracing_reload_handle(reload_handle);

    tracing::info!("Logging initialized to: {:?}", log_path);
}

fn setup_panic_handler() {
    // Writes to crash.log even when logging is not initialized yet
    std::panic::set_hook(Box::new(|panic_info| {
        // Caught by tab discovery and reported as a warning toast
        if lazytools::app::tool_window::registry::is_constructing_tab() {
            tracing::warn!("Tool construction panicked: {}", panic_info);
            return;
        }

        let crash_msg = format!(
            "Lazy Tools crashed!\n\
             Panic occurred at: {}\n\
             Details: {}\n\
             Backtrace:\n{:?}\n",
            panic_info
                .location()
                .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
                .unwrap_or_else(|| "unknown location".to_string()),
            panic_info
                .payload()
                .downcast_ref::<&str>()
                .copied()
                .or_else(|| panic_info.payload().downcast_ref::<String>().map(|s| s.as_str()))
                .unwrap_or("unknown panic"),
            std::backtrace::Backtrace::force_capture()
        );

        if let Some(proj_dirs) = directories::ProjectDirs::from("com", "", "lazytools") {
            let log_dir = proj_dirs.data_dir().join("logs");
            let _ = std::fs::create_dir_all(&log_dir);
            let crash_log_path = log_dir.join("crash.log");

            if let Ok(mut file) = std::fs::OpenOptions::new()
                .append(true)
                .create(true)
                .open(&crash_log_path)
            {
                use std::io::Write;
                let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S");
                let _ = writeln!(file, "\n=== CRASH at {} ===\n{}", timestamp, crash_msg);
            }

            eprintln!("\n{}", crash_msg);
            eprintln!("Crash log written to: {:?}", crash_log_path);
        } else {
            eprintln!("\n{}", crash_msg);
        }
    }));
}

fn main() -> eframe::Result<()> {
    setup_panic_handler();
    init_logging();

    tracing::info!(
        "lazytools {} starting (branch {}, commit {})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_BRANCH"),
        env!("GIT_COMMIT")
    );

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 640.0])
            .with_min_inner_size([480.0, 360.0]),
        ..Default::default()
    };

    eframe::run_native(
        lazytools::app::title_template::APP_NAME,
        native_options,
        Box::new(|cc| Ok(Box::new(lazytools::ToolsApp::new(cc)))),
    )
}
