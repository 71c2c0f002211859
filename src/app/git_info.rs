//! Git branch and commit queries.
//!
//! Everything shells out to the `git` executable found on `PATH`, the same way the
//! build script stamps the branch into the binary. No query panics; a missing
//! executable, a directory outside a work tree or a failed command all come back as
//! [`GitError`].

use crate::{log_warn, trace_debug};
use std::path::{Path, PathBuf};
use std::process::Command;

const REMOTE_HEAD_PREFIX: &str = "refs/remotes/origin/";

/// Branches tried, in order, when `origin/HEAD` is not set
pub const FALLBACK_BASE_BRANCHES: [&str; 3] = ["main", "master", "dev"];

#[derive(Debug, Clone, PartialEq)]
pub enum GitError {
    /// `git` could not be started
    Spawn(String),
    /// `git` ran and exited unsuccessfully
    CommandFailed { args: String, stderr: String },
    NotARepository(PathBuf),
    /// None of the candidate base branches exist
    NoBaseBranch,
}

impl std::fmt::Display for GitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GitError::Spawn(reason) => write!(f, "Failed to run git: {}", reason),
            GitError::CommandFailed { args, stderr } => {
                if stderr.is_empty() {
                    write!(f, "git {} failed", args)
                } else {
                    write!(f, "git {} failed: {}", args, stderr)
                }
            }
            GitError::NotARepository(path) => {
                write!(f, "{} is not inside a git repository", path.display())
            }
            GitError::NoBaseBranch => write!(
                f,
                "Could not determine a base branch (tried origin/HEAD, {})",
                FALLBACK_BASE_BRANCHES.join(", ")
            ),
        }
    }
}

impl std::error::Error for GitError {}

/// One line of `git log --oneline`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    pub hash: String,
    pub subject: String,
}

/// Run `git <args>` in `dir` and return trimmed stdout
pub fn run_git_command(dir: &Path, args: &[&str]) -> Result<String, GitError> {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| GitError::Spawn(e.to_string()))?;

    if !output.status.success() {
        return Err(GitError::CommandFailed {
            args: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

pub fn is_git_repository(dir: &Path) -> bool {
    matches!(
        run_git_command(dir, &["rev-parse", "--is-inside-work-tree"]).as_deref(),
        Ok("true")
    )
}

pub fn current_branch(dir: &Path) -> Result<String, GitError> {
    if !is_git_repository(dir) {
        return Err(GitError::NotARepository(dir.to_path_buf()));
    }
    run_git_command(dir, &["rev-parse", "--abbrev-ref", "HEAD"])
}

/// The remote default branch, or the first fallback that exists on `origin`
pub fn default_base_branch(dir: &Path) -> Result<String, GitError> {
    match run_git_command(dir, &["symbolic-ref", "refs/remotes/origin/HEAD"]) {
        Ok(output) => {
            if let Some(branch) = strip_remote_head(&output) {
                return Ok(branch.to_string());
            }
        }
        Err(e) => {
            trace_debug!("origin/HEAD not available: {}", e);
        }
    }

    FALLBACK_BASE_BRANCHES
        .iter()
        .find(|branch| {
            let remote_ref = format!("origin/{}", branch);
            run_git_command(dir, &["rev-parse", "--verify", "--quiet", &remote_ref]).is_ok()
        })
        .map(|branch| branch.to_string())
        .ok_or(GitError::NoBaseBranch)
}

/// Commits on the current branch that are not on the base branch
pub fn commits_since_branch_point(dir: &Path) -> Result<Vec<CommitSummary>, GitError> {
    let branch = current_branch(dir)?;
    let base = default_base_branch(dir)?;
    let base_ref = format!("origin/{}", base);

    let merge_base = run_git_command(dir, &["merge-base", &branch, &base_ref])?;
    let log = run_git_command(dir, &["log", &branch, "--oneline", "--not", &merge_base])?;
    Ok(parse_oneline_log(&log))
}

/// The local branch whose merge-base with `current` is the most recent commit
pub fn closest_base_branch(dir: &Path, current: &str) -> Result<Option<String>, GitError> {
    let branches = run_git_command(
        dir,
        &["for-each-ref", "--format=%(refname:short)", "refs/heads/"],
    )?;

    let mut closest: Option<(i64, String)> = None;
    for branch in parse_branch_list(&branches) {
        if branch == current {
            continue;
        }

        let merge_base = match run_git_command(dir, &["merge-base", current, &branch]) {
            Ok(merge_base) => merge_base,
            Err(e) => {
                trace_debug!("No merge-base between {} and {}: {}", current, branch, e);
                continue;
            }
        };
        let Some(time) = run_git_command(dir, &["show", "-s", "--format=%ct", &merge_base])
            .ok()
            .and_then(|output| output.parse::<i64>().ok())
        else {
            continue;
        };

        if closest.as_ref().map_or(true, |(best, _)| time > *best) {
            closest = Some((time, branch));
        }
    }

    Ok(closest.map(|(_, branch)| branch))
}

pub fn strip_remote_head(output: &str) -> Option<&str> {
    output
        .trim()
        .strip_prefix(REMOTE_HEAD_PREFIX)
        .filter(|branch| !branch.is_empty())
}

pub fn parse_branch_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn parse_oneline_log(output: &str) -> Vec<CommitSummary> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let (hash, subject) = line.trim().split_once(' ').unwrap_or((line.trim(), ""));
            CommitSummary {
                hash: hash.to_string(),
                subject: subject.to_string(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum BranchState {
    Branch(String),
    NotARepository,
}

/// Cached branch of one working directory
#[derive(Debug)]
pub struct GitInfo {
    path: PathBuf,
    state: Option<BranchState>,
}

impl GitInfo {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            state: None,
        }
    }

    /// Info for the process working directory
    pub fn for_current_dir() -> Self {
        Self::new(std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Branch state, queried on first use
    pub fn state(&mut self) -> &BranchState {
        let path = &self.path;
        self.state.get_or_insert_with(|| match current_branch(path) {
            Ok(branch) => BranchState::Branch(branch),
            Err(e) => {
                log_warn!("Git branch unavailable: {}", e);
                BranchState::NotARepository
            }
        })
    }

    /// Branch name, or a readable stand-in outside a repository
    pub fn branch(&mut self) -> String {
        match self.state() {
            BranchState::Branch(branch) => branch.clone(),
            BranchState::NotARepository => "no git repository".to_string(),
        }
    }

    /// Forget the cached state so the next query runs git again
    pub fn refresh(&mut self) {
        self.state = None;
    }

    pub fn commits_since_branch_point(&self) -> Result<Vec<CommitSummary>, GitError> {
        commits_since_branch_point(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_strip_remote_head() {
        assert_eq!(strip_remote_head("refs/remotes/origin/main\n"), Some("main"));
        assert_eq!(
            strip_remote_head("refs/remotes/origin/release/2.0"),
            Some("release/2.0")
        );
        assert_eq!(strip_remote_head("refs/remotes/origin/"), None);
        assert_eq!(strip_remote_head("refs/heads/main"), None);
    }

    #[test]
    fn test_parse_oneline_log() {
        let commits = parse_oneline_log("a1b2c3d Add sidebar layout\n\n9f8e7d6 Fix divider\n");
        assert_eq!(
            commits,
            vec![
                CommitSummary {
                    hash: "a1b2c3d".to_string(),
                    subject: "Add sidebar layout".to_string(),
                },
                CommitSummary {
                    hash: "9f8e7d6".to_string(),
                    subject: "Fix divider".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_parse_branch_list_skips_blank_lines() {
        assert_eq!(
            parse_branch_list("main\n  feature/tabs \n\n"),
            vec!["main".to_string(), "feature/tabs".to_string()]
        );
    }

    #[test]
    fn test_outside_repository() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!is_git_repository(dir.path()));
        assert!(current_branch(dir.path()).is_err());
        assert_eq!(default_base_branch(dir.path()), Err(GitError::NoBaseBranch));

        let mut info = GitInfo::new(dir.path());
        assert_eq!(info.state(), &BranchState::NotARepository);
        assert_eq!(info.branch(), "no git repository");
    }

    #[test]
    fn test_error_messages() {
        let error = GitError::CommandFailed {
            args: "merge-base a b".to_string(),
            stderr: String::new(),
        };
        assert_eq!(error.to_string(), "git merge-base a b failed");
        assert_eq!(
            GitError::NoBaseBranch.to_string(),
            "Could not determine a base branch (tried origin/HEAD, main, master, dev)"
        );
    }
}
