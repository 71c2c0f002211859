//! Recoverable warnings raised by tool windows.
//!
//! None of these stop a frame from rendering. The window logs each one when it is
//! raised and queues it so the host can surface it to the user.

/// A recoverable problem encountered while discovering or selecting tabs
#[derive(Debug, Clone, PartialEq)]
pub enum ToolWindowWarning {
    /// The selected key disappeared after a refresh
    StaleSelection {
        key: String,
        fallback: Option<String>,
    },
    /// `change_tab` was called with a name the window does not know
    UnknownTab {
        requested: String,
        fallback: Option<String>,
    },
    /// No registered tab targets this window
    EmptyHierarchy { window: String },
    /// A tab factory failed or panicked; the remaining tabs were still discovered
    ConstructionFailed { type_name: String, reason: String },
}

impl ToolWindowWarning {
    /// Short title used for notifications
    pub fn title(&self) -> &'static str {
        match self {
            ToolWindowWarning::StaleSelection { .. } => "Selection reset",
            ToolWindowWarning::UnknownTab { .. } => "Tab not found",
            ToolWindowWarning::EmptyHierarchy { .. } => "No tools found",
            ToolWindowWarning::ConstructionFailed { .. } => "Tool failed to load",
        }
    }
}

fn describe_fallback(fallback: &Option<String>) -> String {
    match fallback {
        Some(key) => format!("defaulting to '{}'", key),
        None => "nothing left to select".to_string(),
    }
}

impl std::fmt::Display for ToolWindowWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolWindowWarning::StaleSelection { key, fallback } => write!(
                f,
                "Tab '{}' no longer exists, {}",
                key,
                describe_fallback(fallback)
            ),
            ToolWindowWarning::UnknownTab {
                requested,
                fallback,
            } => write!(
                f,
                "Tab '{}' not found, {}",
                requested,
                describe_fallback(fallback)
            ),
            ToolWindowWarning::EmptyHierarchy { window } => {
                write!(f, "No tools found for {}", window)
            }
            ToolWindowWarning::ConstructionFailed { type_name, reason } => {
                write!(f, "Failed to create tab {}: {}", type_name, reason)
            }
        }
    }
}

impl std::error::Error for ToolWindowWarning {}
