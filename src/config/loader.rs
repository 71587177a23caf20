//! Configuration file discovery and loading.
//!
//! This module handles finding and loading configuration files from
//! various locations in the correct priority order.

use crate::config::merger::merge_configs;
use crate::config::schema::ReceptConfig;
use crate::error::{ReceptError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory holding recept configuration, both per-project and per-user.
pub const CONFIG_DIR: &str = ".recept";

/// Paths to configuration files in priority order (later overrides earlier).
///
/// Merge order:
/// 1. User global config (`~/.recept/config.yml`)
/// 2. Project config (`.recept/config.yml`)
/// 3. Local overrides (`.recept/config.local.yml`)
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// User's global config: ~/.recept/config.yml
    pub user_global: Option<PathBuf>,

    /// Project config: .recept/config.yml
    pub project: Option<PathBuf>,

    /// Local overrides: .recept/config.local.yml
    pub project_local: Option<PathBuf>,
}

impl ConfigPaths {
    /// Discover config files for the given project root.
    pub fn discover(project_root: &Path) -> Self {
        Self {
            user_global: Self::find_user_global(),
            project: existing(project_root.join(CONFIG_DIR).join("config.yml")),
            project_local: existing(project_root.join(CONFIG_DIR).join("config.local.yml")),
        }
    }

    fn find_user_global() -> Option<PathBuf> {
        existing(dirs::home_dir()?.join(CONFIG_DIR).join("config.yml"))
    }

    /// Returns all existing config paths in merge order.
    pub fn all_existing(&self) -> Vec<&PathBuf> {
        [&self.user_global, &self.project, &self.project_local]
            .into_iter()
            .flatten()
            .collect()
    }
}

fn existing(path: PathBuf) -> Option<PathBuf> {
    if path.exists() {
        Some(path)
    } else {
        None
    }
}

/// Find the project root by walking up from `start`.
///
/// Looks for a `.recept` directory first, then falls back to `.git`.
pub fn find_project_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        if current.join(CONFIG_DIR).is_dir() || current.join(".git").exists() {
            return Some(current);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load a single config file and parse it into `ReceptConfig`.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ReceptConfig> {
    let value = load_config_value(path)?;
    if value.is_null() {
        return Ok(ReceptConfig::default());
    }

    serde_yaml::from_value(value).map_err(|e| ReceptError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load a config file as a raw YAML value (for merging).
pub fn load_config_value(path: &Path) -> Result<serde_yaml::Value> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ReceptError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ReceptError::Io(e)
        }
    })?;

    serde_yaml::from_str(&content).map_err(|e| ReceptError::ConfigParseError {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load and merge every config file that exists for a project.
///
/// Having no config at all is not an error: the result is the default
/// config, which registers no tools beyond the built-ins.
pub fn load_merged_config(project_root: &Path) -> Result<ReceptConfig> {
    load_paths(&ConfigPaths::discover(project_root), project_root)
}

fn load_paths(paths: &ConfigPaths, project_root: &Path) -> Result<ReceptConfig> {
    let mut configs = Vec::new();

    for path in paths.all_existing() {
        tracing::debug!("loading config {}", path.display());
        configs.push(load_config_value(path)?);
    }

    let merged = merge_configs(&configs);

    let mut config: ReceptConfig =
        serde_yaml::from_value(merged).map_err(|e| ReceptError::ConfigParseError {
            path: project_root.join(CONFIG_DIR).join("config.yml"),
            message: format!("Failed to parse merged config: {}", e),
        })?;
    config.anchor_paths(project_root);
    Ok(config)
}

/// Load config with optional path override.
///
/// If `config_override` is provided, loads only that file without merging.
/// Otherwise, discovers and merges all config files. Either way, relative
/// tool directories are taken from `project_root`.
pub fn load_config(project_root: &Path, config_override: Option<&Path>) -> Result<ReceptConfig> {
    if let Some(override_path) = config_override {
        let mut config = load_config_file(override_path)?;
        config.anchor_paths(project_root);
        Ok(config)
    } else {
        load_merged_config(project_root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(root: &Path, file: &str, content: &str) {
        let dir = root.join(CONFIG_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(file), content).unwrap();
    }

    #[test]
    fn discover_finds_project_and_local_config() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "tools: {}");
        write_config(temp.path(), "config.local.yml", "tools: {}");

        let paths = ConfigPaths::discover(temp.path());
        assert!(paths.project.is_some());
        assert!(paths.project_local.is_some());
    }

    #[test]
    fn discover_without_config_finds_nothing_in_project() {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::discover(temp.path());
        assert!(paths.project.is_none());
        assert!(paths.project_local.is_none());
    }

    #[test]
    fn all_existing_keeps_merge_order() {
        let paths = ConfigPaths {
            user_global: Some(PathBuf::from("/home/u/.recept/config.yml")),
            project: None,
            project_local: Some(PathBuf::from("/p/.recept/config.local.yml")),
        };
        let all = paths.all_existing();
        assert_eq!(all.len(), 2);
        assert!(all[0].starts_with("/home/u"));
        assert!(all[1].ends_with("config.local.yml"));
    }

    #[test]
    fn local_overrides_project_tool_fields() {
        let temp = TempDir::new().unwrap();
        write_config(
            temp.path(),
            "config.yml",
            "tools:\n  lint:\n    command: flake8\n    ok_codes: [0, 1]\n",
        );
        write_config(
            temp.path(),
            "config.local.yml",
            "tools:\n  lint:\n    args: [--exit-zero]\n",
        );

        let paths = ConfigPaths {
            user_global: None,
            ..ConfigPaths::discover(temp.path())
        };
        let config = load_paths(&paths, temp.path()).unwrap();

        let lint = &config.tools["lint"];
        assert_eq!(lint.command.as_deref(), Some("flake8"));
        assert_eq!(lint.ok_codes, Some(vec![0, 1]));
        assert_eq!(lint.args, vec!["--exit-zero"]);
    }

    #[test]
    fn no_config_files_yields_default() {
        let temp = TempDir::new().unwrap();
        let config = load_paths(&ConfigPaths::default(), temp.path()).unwrap();
        assert_eq!(config, ReceptConfig::default());
    }

    #[test]
    fn load_config_file_missing_is_not_found() {
        let temp = TempDir::new().unwrap();
        let result = load_config_file(&temp.path().join("absent.yml"));
        assert!(matches!(result, Err(ReceptError::ConfigNotFound { .. })));
    }

    #[test]
    fn load_config_file_empty_is_default() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.yml");
        fs::write(&path, "").unwrap();
        assert_eq!(load_config_file(&path).unwrap(), ReceptConfig::default());
    }

    #[test]
    fn load_config_file_invalid_yaml_is_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("broken.yml");
        fs::write(&path, "tools: [unterminated").unwrap();
        assert!(matches!(
            load_config_file(&path),
            Err(ReceptError::ConfigParseError { .. })
        ));
    }

    #[test]
    fn load_config_prefers_override() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "config.yml", "tools:\n  a: {}\n");
        let explicit = temp.path().join("other.yml");
        fs::write(&explicit, "tools:\n  b: {}\n").unwrap();

        let config = load_config(temp.path(), Some(&explicit)).unwrap();
        assert!(config.tools.contains_key("b"));
        assert!(!config.tools.contains_key("a"));
    }

    #[cfg(unix)]
    #[test]
    fn relative_tool_cwd_is_taken_from_project_root() {
        let temp = TempDir::new().unwrap();
        write_config(
            temp.path(),
            "config.yml",
            "tools:\n  docs:\n    cwd: docs\n  abs:\n    cwd: /srv\n",
        );

        let paths = ConfigPaths {
            user_global: None,
            ..ConfigPaths::discover(temp.path())
        };
        let config = load_paths(&paths, temp.path()).unwrap();

        assert_eq!(config.tools["docs"].cwd, Some(temp.path().join("docs")));
        assert_eq!(config.tools["abs"].cwd, Some(PathBuf::from("/srv")));
    }

    #[test]
    fn override_config_cwd_is_taken_from_project_root() {
        let temp = TempDir::new().unwrap();
        let explicit = temp.path().join("other.yml");
        fs::write(&explicit, "tools:\n  docs:\n    cwd: docs\n").unwrap();
        let root = temp.path().join("project");

        let config = load_config(&root, Some(&explicit)).unwrap();
        assert_eq!(config.tools["docs"].cwd, Some(root.join("docs")));
    }

    #[test]
    fn find_project_root_walks_up() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join(CONFIG_DIR)).unwrap();
        let nested = temp.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_project_root(&nested), Some(temp.path().to_path_buf()));
    }
}
