//! Viewer identity resolution for CLI commands.
//!
//! Each field resolves independently: `--viewer-id`/`--viewer-name` flag >
//! `LEADLINE_VIEWER_ID`/`LEADLINE_VIEWER_NAME` env > user config. Without an
//! id there is no viewer, and timeline author fallback skips straight to the
//! unknown-author label.

use leadline_core::config::UserConfig;
use leadline_core::lifecycle::Actor;
use leadline_core::timeline::Viewer;
use std::env;

/// Environment reader trait for dependency injection in tests.
trait EnvReader {
    fn get(&self, key: &str) -> Option<String>;
}

/// Real environment reader.
struct RealEnv;

impl EnvReader for RealEnv {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

fn first_non_blank<I>(candidates: I) -> Option<String>
where
    I: IntoIterator<Item = Option<String>>,
{
    candidates
        .into_iter()
        .flatten()
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
}

fn resolve_viewer_with(
    id_flag: Option<&str>,
    name_flag: Option<&str>,
    user: &UserConfig,
    env: &dyn EnvReader,
) -> Option<Viewer> {
    let id = first_non_blank([
        id_flag.map(str::to_string),
        env.get("LEADLINE_VIEWER_ID"),
        user.viewer_id.clone(),
    ])?;
    let name = first_non_blank([
        name_flag.map(str::to_string),
        env.get("LEADLINE_VIEWER_NAME"),
        user.viewer_name.clone(),
    ])
    .unwrap_or_default();

    Some(Viewer::new(id, name))
}

/// Resolve the current viewer from flags, environment, and user config.
pub fn resolve_viewer(
    id_flag: Option<&str>,
    name_flag: Option<&str>,
    user: &UserConfig,
) -> Option<Viewer> {
    resolve_viewer_with(id_flag, name_flag, user, &RealEnv)
}

/// The actor recorded on events the viewer creates.
pub fn actor_for(viewer: Option<&Viewer>) -> Actor {
    viewer.map_or_else(Actor::default, |v| Actor {
        id: Some(v.id.clone()),
        name: Some(v.name.clone()).filter(|n| !n.is_empty()),
        email: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Test environment reader with configurable values.
    struct MockEnv {
        vars: HashMap<String, String>,
    }

    impl MockEnv {
        fn new() -> Self {
            Self {
                vars: HashMap::new(),
            }
        }

        fn var(mut self, key: &str, val: &str) -> Self {
            self.vars.insert(key.to_string(), val.to_string());
            self
        }
    }

    impl EnvReader for MockEnv {
        fn get(&self, key: &str) -> Option<String> {
            self.vars.get(key).cloned()
        }
    }

    fn user(id: Option<&str>, name: Option<&str>) -> UserConfig {
        UserConfig {
            output: None,
            viewer_id: id.map(str::to_string),
            viewer_name: name.map(str::to_string),
        }
    }

    #[test]
    fn flags_take_priority() {
        let env = MockEnv::new()
            .var("LEADLINE_VIEWER_ID", "env-id")
            .var("LEADLINE_VIEWER_NAME", "Env Name");
        let viewer = resolve_viewer_with(
            Some("flag-id"),
            Some("Flag Name"),
            &user(Some("cfg-id"), Some("Cfg Name")),
            &env,
        );
        assert_eq!(viewer, Some(Viewer::new("flag-id", "Flag Name")));
    }

    #[test]
    fn env_beats_user_config() {
        let env = MockEnv::new().var("LEADLINE_VIEWER_ID", "env-id");
        let viewer =
            resolve_viewer_with(None, None, &user(Some("cfg-id"), Some("Cfg Name")), &env);
        assert_eq!(viewer, Some(Viewer::new("env-id", "Cfg Name")));
    }

    #[test]
    fn blank_values_fall_through() {
        let env = MockEnv::new().var("LEADLINE_VIEWER_ID", "   ");
        let viewer = resolve_viewer_with(Some(""), None, &user(Some("cfg-id"), None), &env);
        assert_eq!(viewer, Some(Viewer::new("cfg-id", "")));
    }

    #[test]
    fn no_id_means_no_viewer() {
        let viewer = resolve_viewer_with(
            None,
            Some("Name Only"),
            &UserConfig::default(),
            &MockEnv::new(),
        );
        assert_eq!(viewer, None);
    }

    #[test]
    fn actor_skips_blank_name() {
        let viewer = Viewer::new("u-1", "");
        let actor = actor_for(Some(&viewer));
        assert_eq!(actor.id.as_deref(), Some("u-1"));
        assert_eq!(actor.name, None);
        assert_eq!(actor_for(None), Actor::default());
    }
}
