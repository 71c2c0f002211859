//! Tools shipped with the application.
//!
//! | Window                  | Tab            | Parent |
//! |-------------------------|----------------|--------|
//! | `Lazy Tools`            | `Branch Info`  | `Git`  |
//! | `Lazy Tools`            | `Commit Log`   | `Git`  |
//! | `Lazy Tools`            | `Link XML Editor` |     |
//! | `Lazy Tools`            | `Window Title` |        |
//! | `Window Title Modifier` | `Title Template` |      |

use crate::app::git_info::GitInfo;
use crate::app::linker::LinkXmlSettings;
use crate::app::title_template::TitleSettings;
use crate::app::tool_window::{TabParent, TabRegistry, ToolWindowTab};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

pub mod git_branch_tab;
pub mod git_log_tab;
pub mod link_xml_tab;
pub mod window_title_tab;

pub use git_branch_tab::GitBranchTab;
pub use git_log_tab::GitLogTab;
pub use link_xml_tab::{LinkXmlState, LinkXmlTab};
pub use window_title_tab::{TitleState, WindowTitleTab};

pub const LAZY_TOOLS_WINDOW: &str = "Lazy Tools";
pub const TITLE_MODIFIER_WINDOW: &str = "Window Title Modifier";
pub const GIT_GROUP: &str = "Git";
pub const BRANCH_INFO_TAB: &str = "Branch Info";
pub const COMMIT_LOG_TAB: &str = "Commit Log";
pub const LINK_XML_TAB: &str = "Link XML Editor";

pub type SharedGitInfo = Arc<Mutex<GitInfo>>;
pub type SharedTitleState = Arc<Mutex<TitleState>>;
pub type SharedLinkXmlState = Arc<Mutex<LinkXmlState>>;

pub fn shared_title_state(settings: TitleSettings) -> SharedTitleState {
    Arc::new(Mutex::new(TitleState::new(settings)))
}

pub fn shared_link_xml_state(
    settings: LinkXmlSettings,
    project_dir: impl Into<PathBuf>,
) -> SharedLinkXmlState {
    Arc::new(Mutex::new(LinkXmlState::new(settings, project_dir)))
}

/// Lock shared tool state; a panic in another tab must not take the window down
pub(crate) fn lock<T>(shared: &Mutex<T>) -> MutexGuard<'_, T> {
    shared.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

pub(crate) fn git_parent() -> TabParent {
    TabParent::Child(GIT_GROUP.to_string())
}

/// Registry holding every built-in tool
pub fn builtin_registry(
    git: SharedGitInfo,
    title: SharedTitleState,
    linker: SharedLinkXmlState,
) -> TabRegistry {
    let mut registry = TabRegistry::new();

    let branch_git = git.clone();
    registry.register("GitBranchTab", move || {
        Ok(Box::new(GitBranchTab::new(branch_git.clone())) as Box<dyn ToolWindowTab>)
    });

    registry.register("GitLogTab", move || {
        Ok(Box::new(GitLogTab::new(git.clone())) as Box<dyn ToolWindowTab>)
    });

    registry.register("LinkXmlTab", move || {
        Ok(Box::new(LinkXmlTab::new(linker.clone())) as Box<dyn ToolWindowTab>)
    });

    let sidebar_title = title.clone();
    registry.register("WindowTitleTab", move || {
        Ok(Box::new(WindowTitleTab::new(
            LAZY_TOOLS_WINDOW,
            "Window Title",
            sidebar_title.clone(),
        )) as Box<dyn ToolWindowTab>)
    });

    registry.register("TitleTemplateTab", move || {
        Ok(Box::new(WindowTitleTab::new(
            TITLE_MODIFIER_WINDOW,
            "Title Template",
            title.clone(),
        )) as Box<dyn ToolWindowTab>)
    });

    registry
}
