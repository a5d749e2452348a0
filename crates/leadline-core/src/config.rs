use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::io::IsTerminal;
use std::path::Path;

use crate::lifecycle::StagePolicy;
use crate::timeline::UNKNOWN_AUTHOR;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub lifecycle: LifecycleConfig,
    #[serde(default)]
    pub timeline: TimelineConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LifecycleConfig {
    /// Reject moves back into `NEW_LEAD`/`FIRST_TALK_DONE` after progress.
    #[serde(default)]
    pub reject_stage_regression: bool,
}

impl LifecycleConfig {
    #[must_use]
    pub const fn policy(&self) -> StagePolicy {
        StagePolicy {
            reject_regression: self.reject_stage_regression,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineConfig {
    #[serde(default = "default_unknown_author")]
    pub unknown_author: String,
    /// Default cap on printed entries. `None` prints everything.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            unknown_author: default_unknown_author(),
            limit: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UserConfig {
    #[serde(default)]
    pub output: Option<String>,
    #[serde(default)]
    pub viewer_id: Option<String>,
    #[serde(default)]
    pub viewer_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
    pub project: ProjectConfig,
    pub user: UserConfig,
    pub resolved_output: String,
}

/// Load `.leadline/config.toml` under `project_root`.
///
/// # Errors
///
/// Fails when the file exists but cannot be read or parsed.
pub fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
    let path = project_root.join(".leadline/config.toml");
    if !path.exists() {
        return Ok(ProjectConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<ProjectConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load `<config_dir>/leadline/config.toml`.
///
/// # Errors
///
/// Fails when the file exists but cannot be read or parsed.
pub fn load_user_config() -> Result<UserConfig> {
    let Some(config_dir) = dirs::config_dir() else {
        return Ok(UserConfig::default());
    };

    let path = config_dir.join("leadline/config.toml");
    if !path.exists() {
        return Ok(UserConfig::default());
    }

    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<UserConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Merge project config, user config and environment.
///
/// `cli_format` is the output mode requested on the command line, if any.
///
/// # Errors
///
/// Propagates config read/parse failures.
pub fn resolve_config(project_root: &Path, cli_format: Option<&str>) -> Result<EffectiveConfig> {
    let project = load_project_config(project_root)?;
    let user = load_user_config()?;

    let env_format = env::var("FORMAT").ok();
    let resolved_output = resolve_output(cli_format, user.output.as_deref(), env_format.as_deref());

    Ok(EffectiveConfig {
        project,
        user,
        resolved_output,
    })
}

fn normalize_output_mode(raw: &str) -> Option<&'static str> {
    match raw.trim().to_ascii_lowercase().as_str() {
        // canonical values
        "pretty" => Some("pretty"),
        "text" => Some("text"),
        "json" => Some("json"),
        // legacy compatibility
        "human" => Some("pretty"),
        "table" => Some("text"),
        _ => None,
    }
}

fn resolve_output(
    cli_format: Option<&str>,
    user_output: Option<&str>,
    env_format: Option<&str>,
) -> String {
    let chosen = [cli_format, env_format, user_output]
        .into_iter()
        .flatten()
        .find_map(normalize_output_mode);

    if let Some(mode) = chosen {
        return mode.to_string();
    }

    if std::io::stdout().is_terminal() {
        "pretty".to_string()
    } else {
        "text".to_string()
    }
}

fn default_unknown_author() -> String {
    UNKNOWN_AUTHOR.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_project_config_uses_defaults() {
        let root = tempfile::tempdir().expect("temp dir must be created");
        let cfg = load_project_config(root.path()).expect("load should succeed");
        assert!(!cfg.lifecycle.reject_stage_regression);
        assert_eq!(cfg.timeline.unknown_author, UNKNOWN_AUTHOR);
        assert_eq!(cfg.timeline.limit, None);
        assert_eq!(cfg.lifecycle.policy(), StagePolicy::default());
    }

    #[test]
    fn project_config_overrides_defaults() {
        let root = tempfile::tempdir().expect("temp dir must be created");
        std::fs::create_dir_all(root.path().join(".leadline")).expect("create config dir");
        std::fs::write(
            root.path().join(".leadline/config.toml"),
            r#"
[lifecycle]
reject_stage_regression = true

[timeline]
unknown_author = "System"
limit = 25
"#,
        )
        .expect("write config");

        let cfg = load_project_config(root.path()).expect("load should succeed");
        assert!(cfg.lifecycle.policy().reject_regression);
        assert_eq!(cfg.timeline.unknown_author, "System");
        assert_eq!(cfg.timeline.limit, Some(25));
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let cfg: ProjectConfig = toml::from_str("[timeline]\nlimit = 5\n").expect("parse");
        assert_eq!(cfg.timeline.unknown_author, UNKNOWN_AUTHOR);
        assert!(!cfg.lifecycle.reject_stage_regression);
    }

    #[test]
    fn malformed_project_config_is_an_error() {
        let root = tempfile::tempdir().expect("temp dir must be created");
        std::fs::create_dir_all(root.path().join(".leadline")).expect("create config dir");
        std::fs::write(root.path().join(".leadline/config.toml"), "[lifecycle\n")
            .expect("write config");

        let err = load_project_config(root.path()).expect_err("parse should fail");
        assert!(err.to_string().contains("Failed to parse"));
    }

    #[test]
    fn cli_format_overrides_env_and_config() {
        let output = resolve_output(Some("json"), Some("pretty"), Some("text"));
        assert_eq!(output, "json");
    }

    #[test]
    fn env_beats_user_config() {
        assert_eq!(resolve_output(None, Some("json"), Some("text")), "text");
        assert_eq!(resolve_output(None, Some("json"), None), "json");
    }

    #[test]
    fn legacy_aliases_are_normalized() {
        assert_eq!(resolve_output(None, Some("table"), Some("human")), "pretty");
        assert_eq!(resolve_output(None, Some("human"), Some("table")), "text");
    }

    #[test]
    fn unknown_values_fall_through() {
        assert_eq!(resolve_output(None, Some("json"), Some("yaml")), "json");
    }

    #[test]
    fn user_config_parses_viewer() {
        let cfg: UserConfig = toml::from_str(
            r#"
output = "json"
viewer_id = "u-42"
viewer_name = "Asha Rao"
"#,
        )
        .expect("parse");

        assert_eq!(cfg.output.as_deref(), Some("json"));
        assert_eq!(cfg.viewer_id.as_deref(), Some("u-42"));
        assert_eq!(cfg.viewer_name.as_deref(), Some("Asha Rao"));
    }
}
