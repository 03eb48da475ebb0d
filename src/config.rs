use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};

const DEFAULT_CONFIG_FILE: &str = ".ghreviews/config.yml";

const TEMPLATE: &str = r#"# ghreviews configuration
#
# Personal access token with `repo` read scope. Leave empty to fall back to
# GITHUB_TOKEN or `gh auth token`.
token: ""
# Your GitHub login; review requests addressed to it are reported.
username: ""
# Repositories to poll, reported in this order.
repos:
  - name: hello-world
    owner: octocat
"#;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoRef {
    pub name: String,
    pub owner: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub token: String,
    pub username: String,
    pub repos: Vec<RepoRef>,
}

pub fn default_config_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("failed to resolve home dir")?;
    Ok(home.join(DEFAULT_CONFIG_FILE))
}

/// The `-c` flag when given, otherwise `~/.ghreviews/config.yml`.
pub fn resolve_config_path(flag: Option<PathBuf>) -> Result<PathBuf> {
    match flag {
        Some(path) => Ok(path),
        None => default_config_path(),
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let cfg: Config = serde_yaml::from_str(&raw)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        cfg.validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(anyhow!("`username` must not be empty"));
        }
        for (i, repo) in self.repos.iter().enumerate() {
            if repo.name.trim().is_empty() || repo.owner.trim().is_empty() {
                return Err(anyhow!("repos[{i}] needs both `name` and `owner`"));
            }
        }
        Ok(())
    }

    pub fn template() -> &'static str {
        TEMPLATE
    }

    /// Write the starter config. Refuses to clobber an existing file unless `force`.
    pub fn write_template(path: impl AsRef<Path>, force: bool) -> Result<()> {
        let path = path.as_ref();
        if path.exists() && !force {
            return Err(anyhow!(
                "config {} already exists (use --force to overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create config dir {}", parent.display()))?;
        }
        std::fs::write(path, Self::template())
            .with_context(|| format!("failed to write config {}", path.display()))?;
        Ok(())
    }
}
