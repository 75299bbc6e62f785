//! Synchronization of the local titledb mirror.
//!
//! The mirror is a shallow, sparse git checkout: titledb is several gigabytes,
//! and only a handful of its documents are needed.

pub mod error;

use exn::ResultExt;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::instrument;

use crate::error::{ErrorKind, Result};

/// One git invocation of a sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitStep {
    /// Short name, used in logs and errors.
    pub name: &'static str,
    pub args: Vec<String>,
    /// Whether the step runs inside the mirror (everything but the clone).
    pub in_mirror: bool,
}
impl GitStep {
    fn new(name: &'static str, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            name,
            args: args.into_iter().map(Into::into).collect(),
            in_mirror: true,
        }
    }
}

/// A titledb git mirror on disk.
#[derive(Debug, Clone)]
pub struct TitleDbMirror {
    git: PathBuf,
    dir: PathBuf,
    url: String,
}
impl TitleDbMirror {
    /// Creates a mirror handle, discovering `git` on the `PATH`.
    pub fn new(dir: impl Into<PathBuf>, url: impl Into<String>) -> Result<Self> {
        let git = which::which("git").or_raise(|| ErrorKind::GitNotFound)?;
        tracing::trace!(git = %git.display(), "Discovered git");
        Ok(Self::with_git(git, dir, url))
    }

    /// Creates a mirror handle with an explicit `git` executable.
    pub fn with_git(git: impl Into<PathBuf>, dir: impl Into<PathBuf>, url: impl Into<String>) -> Self {
        Self {
            git: git.into(),
            dir: dir.into(),
            url: url.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The git invocations needed to bring the mirror up to date.
    ///
    /// Clones (shallow, without checkout) only when the mirror directory
    /// doesn't exist yet. The sparse checkout is always reset to `files` plus
    /// the localized title document for the region/language.
    pub fn plan(&self, files: &[impl AsRef<str>], region: &str, language: &str) -> Vec<GitStep> {
        let mut steps = Vec::with_capacity(6);
        if !self.dir.is_dir() {
            let dir = self.dir.to_string_lossy().into_owned();
            steps.push(GitStep {
                in_mirror: false,
                ..GitStep::new("clone", ["clone", "--depth=1", "--no-checkout", self.url.as_str(), dir.as_str()])
            });
        }
        let mut set = vec!["sparse-checkout".to_string(), "set".to_string(), "--no-cone".to_string()];
        set.extend(files.iter().map(|file| file.as_ref().to_string()));
        steps.push(GitStep::new("sparse-checkout set", set));
        steps.push(GitStep::new("sparse-checkout add", [
            "sparse-checkout".to_string(),
            "add".to_string(),
            format!("{region}.{language}.json"),
        ]));
        steps.push(GitStep::new("checkout", ["checkout", "master"]));
        steps.push(GitStep::new("fetch", ["fetch"]));
        steps.push(GitStep::new("pull", ["pull"]));
        steps
    }

    /// Clones (if needed) and updates the mirror.
    #[instrument(skip(self, files), fields(dir = %self.dir.display()))]
    pub fn sync(&self, files: &[impl AsRef<str>], region: &str, language: &str) -> Result<()> {
        let steps = self.plan(files, region, language);
        if steps.first().is_some_and(|step| step.name == "clone") {
            tracing::info!(url = %self.url, "Retrieving titledb for the first time");
        }
        for step in &steps {
            self.run(step)?;
        }
        tracing::info!("titledb mirror is up to date");
        Ok(())
    }

    fn run(&self, step: &GitStep) -> Result<()> {
        let mut command = Command::new(&self.git);
        command.args(&step.args);
        if step.in_mirror {
            command.current_dir(&self.dir);
        }
        tracing::debug!(step = step.name, args = ?step.args, "Running git");
        let output = command.output().or_raise(|| ErrorKind::Spawn(step.name))?;
        if !output.status.success() {
            let code = output.status.code().unwrap_or(-1);
            tracing::warn!(
                step = step.name,
                code,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "git step failed"
            );
            exn::bail!(ErrorKind::GitFailed { step: step.name, code });
        }
        Ok(())
    }
}
