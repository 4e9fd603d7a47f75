//! Settings types (compdb.toml format).

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Default name of the configuration file.
pub const CONFIG_FILE: &str = "compdb.toml";

/// Generator settings loaded from `compdb.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Bazel target labels to index. Required and non-empty.
    #[serde(default)]
    pub targets: Vec<String>,

    /// Bazel executable (name or path).
    #[serde(default = "default_tool")]
    pub tool: String,

    /// Directory the build runs in (default: the current directory).
    #[serde(default)]
    pub working_directory: Option<PathBuf>,

    /// Root of the compdb support repository holding the aspect definition
    /// and the post-processing script.
    #[serde(default)]
    pub repository_root: Option<PathBuf>,

    /// Extra environment variables for the spawned processes.
    #[serde(default)]
    pub env: BTreeMap<String, String>,
}

fn default_tool() -> String {
    "bazel".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            targets: Vec::new(),
            tool: default_tool(),
            working_directory: None,
            repository_root: None,
            env: BTreeMap::new(),
        }
    }
}

impl Settings {
    /// Load and validate settings from a TOML file.
    ///
    /// A missing file is reported as [`ConfigError::MissingTargets`]: an
    /// absent configuration and an empty target list abort the flow the
    /// same way, before any command is built.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::MissingTargets);
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate settings from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<()> {
        if self.targets.is_empty() {
            return Err(ConfigError::MissingTargets);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_full_config() {
        let toml = r#"
targets = ["//foo:bar", "//baz:qux"]
tool = "/usr/local/bin/bazel"
working_directory = "/src/project"
repository_root = "/src/project/compdb"

[env]
CC = "clang"
"#;

        let settings = Settings::from_toml(toml).unwrap();

        assert_eq!(settings.targets, vec!["//foo:bar", "//baz:qux"]);
        assert_eq!(settings.tool, "/usr/local/bin/bazel");
        assert_eq!(
            settings.working_directory,
            Some(PathBuf::from("/src/project"))
        );
        assert_eq!(
            settings.repository_root,
            Some(PathBuf::from("/src/project/compdb"))
        );
        assert_eq!(settings.env.get("CC"), Some(&"clang".to_string()));
    }

    #[test]
    fn defaults() {
        let settings = Settings::from_toml(r#"targets = ["//foo:bar"]"#).unwrap();

        assert_eq!(settings.tool, "bazel");
        assert_eq!(settings.working_directory, None);
        assert_eq!(settings.repository_root, None);
        assert!(settings.env.is_empty());
    }

    #[test]
    fn empty_targets_rejected() {
        let err = Settings::from_toml("targets = []").unwrap_err();
        assert!(matches!(err, ConfigError::MissingTargets));
        assert!(err.to_string().contains("\"targets\""));
    }

    #[test]
    fn absent_targets_rejected() {
        let err = Settings::from_toml(r#"tool = "bazel""#).unwrap_err();
        assert!(matches!(err, ConfigError::MissingTargets));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"targets = ["//foo:bar"]"#).unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.targets, vec!["//foo:bar"]);
    }

    #[test]
    fn missing_file_means_unconfigured() {
        let dir = tempfile::tempdir().unwrap();
        let err = Settings::load(&dir.path().join("compdb.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingTargets));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = Settings::from_toml("targets = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
