use super::{git_parent, lock, SharedGitInfo, BRANCH_INFO_TAB, LAZY_TOOLS_WINDOW};
use crate::app::git_info::{self, BranchState};
use crate::app::tool_window::{TabParent, ToolWindowTab};
use crate::trace_info;
use eframe::egui;
use egui::RichText;

/// Current branch of the working directory and its closest local base branch
pub struct GitBranchTab {
    git: SharedGitInfo,
    closest_base: Option<Result<Option<String>, git_info::GitError>>,
}

impl GitBranchTab {
    pub fn new(git: SharedGitInfo) -> Self {
        Self {
            git,
            closest_base: None,
        }
    }
}

impl ToolWindowTab for GitBranchTab {
    fn window_name(&self) -> &str {
        LAZY_TOOLS_WINDOW
    }

    fn tab_name(&self) -> &str {
        BRANCH_INFO_TAB
    }

    fn parent(&self) -> TabParent {
        git_parent()
    }

    fn ui(&mut self, ui: &mut egui::Ui) {
        let mut git = lock(&self.git);
        let path = git.path().display().to_string();

        ui.heading("Branch");
        ui.label(RichText::new(&path).weak());
        ui.add_space(5.0);

        let branch = match git.state().clone() {
            BranchState::Branch(branch) => {
                ui.horizontal(|ui| {
                    ui.label("Current branch:");
                    ui.label(RichText::new(&branch).strong().monospace());
                });
                Some(branch)
            }
            BranchState::NotARepository => {
                ui.label(RichText::new("Not inside a git repository").weak());
                None
            }
        };

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            if ui.button("Refresh").clicked() {
                trace_info!("Refreshing git branch for {}", path);
                git.refresh();
                self.closest_base = None;
            }

            if let Some(branch) = &branch {
                if ui.button("Find closest base branch").clicked() {
                    self.closest_base = Some(git_info::closest_base_branch(git.path(), branch));
                }
            }
        });

        match &self.closest_base {
            Some(Ok(Some(base))) => {
                ui.label(format!("Closest base branch: {}", base));
            }
            Some(Ok(None)) => {
                ui.label(RichText::new("No other local branch shares history").weak());
            }
            Some(Err(e)) => {
                ui.colored_label(ui.visuals().error_fg_color, e.to_string());
            }
            None => {}
        }
    }
}
