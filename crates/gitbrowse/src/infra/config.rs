//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::model::Replacement;

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
static DEFAULT_WORKSPACE_CONFIG_PATH: &str = ".gitbrowse/config.toml";

/// Layered configuration loaded from defaults, user, workspace, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub git: Git,
    #[serde(default)]
    pub remotes: Remotes,
    #[serde(default)]
    pub browser: Browser,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Git {
    /// Time budget for a single git invocation, in seconds.
    #[serde(default = "Git::default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Git {
    fn default_timeout_secs() -> u64 {
        5
    }
}

impl Default for Git {
    fn default() -> Self {
        Self {
            timeout_secs: Self::default_timeout_secs(),
        }
    }
}

/// Remote URL translation extensions beyond the built-in rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Remotes {
    /// Ordered prefix replacement table; the first matching prefix wins.
    #[serde(default)]
    pub replacements: Vec<Replacement>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Browser {
    /// When false the resolved URL is printed instead of opened.
    #[serde(default = "Browser::default_open")]
    pub open: bool,
}

impl Browser {
    fn default_open() -> bool {
        true
    }
}

impl Default for Browser {
    fn default() -> Self {
        Self {
            open: Self::default_open(),
        }
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    timeout_secs: Option<u64>,
    no_open: bool,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            timeout_secs: env::var("GITBROWSE_TIMEOUT_SECS")
                .ok()
                .and_then(|value| value.parse().ok()),
            no_open: env::var("GITBROWSE_NO_OPEN").is_ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(timeout_secs: u64, no_open: bool) -> Self {
        Self {
            timeout_secs: Some(timeout_secs),
            no_open,
        }
    }
}

impl Config {
    /// Load configuration from defaults, user/global config, workspace config, and env overrides.
    pub fn load() -> Result<Self> {
        let env = EnvOverrides::from_env();
        let global = global_config_path();
        let workspace = workspace_config_path()?;
        Self::load_with_layers(global, workspace, env)
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        workspace: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(workspace_path) = workspace.filter(|path| path.exists()) {
            layers.push(Self::from_file(&workspace_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        Ok(apply_env_overrides(merged, env_overrides))
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            git: merge_git(self.git, other.git),
            remotes: merge_remotes(self.remotes, other.remotes),
            browser: merge_browser(self.browser, other.browser),
        }
    }
}

fn merge_git(base: Git, overlay: Git) -> Git {
    Git {
        timeout_secs: if overlay.timeout_secs != Git::default_timeout_secs() {
            overlay.timeout_secs
        } else {
            base.timeout_secs
        },
    }
}

/// Later layers are consulted first, so a workspace entry can shadow a global
/// one for the same prefix while keeping relative order within each layer.
fn merge_remotes(base: Remotes, overlay: Remotes) -> Remotes {
    let mut replacements = overlay.replacements;
    for entry in base.replacements {
        if !replacements.iter().any(|r| r.prefix == entry.prefix) {
            replacements.push(entry);
        }
    }
    Remotes { replacements }
}

fn merge_browser(base: Browser, overlay: Browser) -> Browser {
    Browser {
        open: if overlay.open != Browser::default_open() {
            overlay.open
        } else {
            base.open
        },
    }
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("gitbrowse/config.toml"))
}

fn workspace_config_path() -> Result<Option<PathBuf>> {
    let cwd = env::current_dir()?;
    let root = find_repo_root(&cwd).unwrap_or(cwd);
    Ok(Some(root.join(DEFAULT_WORKSPACE_CONFIG_PATH)))
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Config {
    if let Some(timeout_secs) = env.timeout_secs {
        config.git.timeout_secs = timeout_secs;
    }
    if env.no_open {
        config.browser.open = false;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_uses_defaults_when_no_files() {
        let config = Config::load_with_layers(None, None, EnvOverrides::default())
            .expect("load default config");
        assert_eq!(config.git.timeout_secs, 5);
        assert!(config.remotes.replacements.is_empty());
        assert!(config.browser.open);
    }

    #[test]
    fn merge_global_and_workspace() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let global = temp.path().join("config.toml");
        fs::write(
            &global,
            r#"
[git]
timeout_secs = 10

[[remotes.replacements]]
prefix = "https://git.corp.example.com/"
replacement = "https://github.example.com/"
"#,
        )?;

        let workspace_dir = temp.path().join("repo");
        fs::create_dir_all(workspace_dir.join(".gitbrowse"))?;
        fs::create_dir_all(workspace_dir.join(".git"))?;
        fs::write(
            workspace_dir.join(".gitbrowse/config.toml"),
            r#"
[browser]
open = false

[[remotes.replacements]]
prefix = "ssh://mirror.example.com/"
replacement = "https://mirror.example.com/"
"#,
        )?;

        let global_path = Some(global);
        let workspace_path = Some(workspace_dir.join(".gitbrowse/config.toml"));

        let config =
            Config::load_with_layers(global_path, workspace_path, EnvOverrides::default())?;

        assert_eq!(config.git.timeout_secs, 10);
        assert!(!config.browser.open);
        // Workspace entries are consulted before global ones.
        assert_eq!(
            config.remotes.replacements[0].prefix,
            "ssh://mirror.example.com/"
        );
        assert_eq!(config.remotes.replacements.len(), 2);

        Ok(())
    }

    #[test]
    fn env_overrides_take_precedence() -> Result<()> {
        let overrides = EnvOverrides::for_tests(30, true);
        let config = Config::load_with_layers(None, None, overrides)?;
        assert_eq!(config.git.timeout_secs, 30);
        assert!(!config.browser.open);
        Ok(())
    }

    #[test]
    fn invalid_config_returns_error() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let file = temp.path().join("broken.toml");
        fs::write(&file, "this is not toml")?;
        let result = Config::from_file(&file);
        assert!(result.is_err());
        Ok(())
    }
}
