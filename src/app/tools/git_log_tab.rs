use super::{git_parent, lock, SharedGitInfo, COMMIT_LOG_TAB, LAZY_TOOLS_WINDOW};
use crate::app::git_info::{CommitSummary, GitError};
use crate::app::tool_window::{TabParent, ToolWindowTab};
use crate::log_warn;
use eframe::egui;
use egui::RichText;

/// Commits made on the current branch since it left the base branch.
///
/// The log is read the first time the tab is drawn and again on "Reload".
pub struct GitLogTab {
    git: SharedGitInfo,
    commits: Option<Result<Vec<CommitSummary>, GitError>>,
}

impl GitLogTab {
    pub fn new(git: SharedGitInfo) -> Self {
        Self { git, commits: None }
    }

    fn load(&mut self) {
        let result = lock(&self.git).commits_since_branch_point();
        if let Err(e) = &result {
            log_warn!("Could not read commit log: {}", e);
        }
        self.commits = Some(result);
    }
}

impl ToolWindowTab for GitLogTab {
    fn window_name(&self) -> &str {
        LAZY_TOOLS_WINDOW
    }

    fn tab_name(&self) -> &str {
        COMMIT_LOG_TAB
    }

    fn parent(&self) -> TabParent {
        git_parent()
    }

    fn ui(&mut self, ui: &mut egui::Ui) {
        if self.commits.is_none() {
            self.load();
        }

        ui.horizontal(|ui| {
            ui.heading("Commits since branch point");
            if ui.small_button("Reload").clicked() {
                self.load();
            }
        });
        ui.add_space(5.0);

        match &self.commits {
            Some(Ok(commits)) if commits.is_empty() => {
                ui.label(RichText::new("No commits since the branch point").weak());
            }
            Some(Ok(commits)) => {
                egui::Grid::new("commit_log_grid")
                    .num_columns(2)
                    .striped(true)
                    .show(ui, |ui| {
                        for commit in commits {
                            ui.label(RichText::new(&commit.hash).monospace());
                            ui.label(&commit.subject);
                            ui.end_row();
                        }
                    });
            }
            Some(Err(e)) => {
                ui.colored_label(ui.visuals().error_fg_color, e.to_string());
            }
            None => {}
        }
    }
}
