//! Locating the transmissions file.

use std::path::PathBuf;

/// Environment variable overriding the default transmissions file.
pub const CONFIG_ENV: &str = "JOINTSPACE_CONFIG";

/// File used when neither `--config` nor [`CONFIG_ENV`] is given.
pub const DEFAULT_CONFIG: &str = "transmissions.toml";

/// Resolve the transmissions file: `--config`, then `JOINTSPACE_CONFIG`,
/// then `./transmissions.toml`.
pub fn config_path(flag: Option<PathBuf>) -> PathBuf {
    config_path_with_env(flag, std::env::var(CONFIG_ENV).ok())
}

/// Extracted for testability without mutating environment variables.
pub(crate) fn config_path_with_env(flag: Option<PathBuf>, env: Option<String>) -> PathBuf {
    flag.or_else(|| env.filter(|v| !v.is_empty()).map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_wins_over_env() {
        let p = config_path_with_env(Some("a.toml".into()), Some("b.toml".to_string()));
        assert_eq!(p, PathBuf::from("a.toml"));
    }

    #[test]
    fn env_overrides_default() {
        let p = config_path_with_env(None, Some("/etc/robot/transmissions.toml".to_string()));
        assert_eq!(p, PathBuf::from("/etc/robot/transmissions.toml"));
    }

    #[test]
    fn empty_env_falls_back_to_default() {
        assert_eq!(config_path_with_env(None, Some(String::new())), PathBuf::from(DEFAULT_CONFIG));
        assert_eq!(config_path_with_env(None, None), PathBuf::from(DEFAULT_CONFIG));
    }
}
