//! Console configuration
//!
//! Sources, lowest to highest precedence: built-in defaults, an optional TOML
//! file, `GST_*` environment variables (a `.env` file is loaded into the
//! environment first), then command-line flags.

use crate::error::ConsoleError;
use gst_client::{RefreshPolicy, DEFAULT_TIMEOUT};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

pub const ENV_API_URL: &str = "GST_API_URL";
pub const ENV_SESSION_FILE: &str = "GST_SESSION_FILE";
pub const ENV_EXPORT_DIR: &str = "GST_EXPORT_DIR";

/// Shape of the optional TOML file
///
/// ```toml
/// api_url = "https://gst.example.com"
/// export_dir = "reports"
/// request_timeout_ms = 10000
///
/// [refresh]
/// attempts = 6
/// initial_delay_ms = 250
/// max_delay_ms = 4000
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub session_file: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
    pub request_timeout_ms: Option<u64>,
    #[serde(default)]
    pub refresh: Option<RefreshPolicy>,
}

impl FileConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConsoleError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ConsoleError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        content.parse()
    }
}

impl std::str::FromStr for FileConfig {
    type Err = ConsoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        toml::from_str(s).map_err(|e| ConsoleError::Config(format!("Invalid TOML: {}", e)))
    }
}

/// Values given on the command line; `None` means not given
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_url: Option<String>,
    pub session_file: Option<PathBuf>,
    pub export_dir: Option<PathBuf>,
}

/// Fully resolved configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_url: String,
    pub session_file: PathBuf,
    pub export_dir: PathBuf,
    pub request_timeout: Duration,
    pub refresh: RefreshPolicy,
}

impl Settings {
    /// Merge every source in precedence order.
    ///
    /// `env` looks up a variable; pass `|k| std::env::var(k).ok()` in the binary.
    pub fn resolve<E>(file: FileConfig, env: E, overrides: Overrides) -> Self
    where
        E: Fn(&str) -> Option<String>,
    {
        let env_nonempty = |key: &str| env(key).filter(|v| !v.trim().is_empty());

        let api_url = overrides
            .api_url
            .or_else(|| env_nonempty(ENV_API_URL))
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let session_file = overrides
            .session_file
            .or_else(|| env_nonempty(ENV_SESSION_FILE).map(PathBuf::from))
            .or(file.session_file)
            .unwrap_or_else(default_session_file);

        let export_dir = overrides
            .export_dir
            .or_else(|| env_nonempty(ENV_EXPORT_DIR).map(PathBuf::from))
            .or(file.export_dir)
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            api_url,
            session_file,
            export_dir,
            request_timeout: file
                .request_timeout_ms
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_TIMEOUT),
            refresh: file.refresh.unwrap_or_default(),
        }
    }
}

/// `<data dir>/gst-console/session.json`
pub fn default_session_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("gst-console")
        .join("session.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::resolve(FileConfig::default(), env_of(&[]), Overrides::default());
        assert_eq!(settings.api_url, DEFAULT_API_URL);
        assert_eq!(settings.request_timeout, Duration::from_secs(30));
        assert_eq!(settings.refresh, RefreshPolicy::default());
        assert_eq!(settings.export_dir, PathBuf::from("."));
        assert!(settings.session_file.ends_with("gst-console/session.json"));
    }

    #[test]
    fn test_parses_toml() {
        let file: FileConfig = r#"
            api_url = "https://gst.example.com"
            request_timeout_ms = 1500

            [refresh]
            attempts = 3
        "#
        .parse()
        .unwrap();

        assert_eq!(file.api_url.as_deref(), Some("https://gst.example.com"));
        let refresh = file.refresh.unwrap();
        assert_eq!(refresh.attempts, 3);
        assert_eq!(refresh.initial_delay_ms, RefreshPolicy::default().initial_delay_ms);
    }

    #[test]
    fn test_unknown_key_is_config_error() {
        let result = "api_ur = 'typo'".parse::<FileConfig>();
        assert!(matches!(result, Err(ConsoleError::Config(_))));
    }

    #[test]
    fn test_precedence_flag_over_env_over_file() {
        let file = FileConfig {
            api_url: Some("http://file".into()),
            export_dir: Some("file-dir".into()),
            session_file: Some("file-session.json".into()),
            ..FileConfig::default()
        };
        let env = env_of(&[(ENV_API_URL, "http://env"), (ENV_EXPORT_DIR, "env-dir")]);
        let overrides = Overrides {
            api_url: Some("http://flag".into()),
            ..Overrides::default()
        };

        let settings = Settings::resolve(file, env, overrides);
        assert_eq!(settings.api_url, "http://flag");
        assert_eq!(settings.export_dir, PathBuf::from("env-dir"));
        assert_eq!(settings.session_file, PathBuf::from("file-session.json"));
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let settings = Settings::resolve(
            FileConfig::default(),
            env_of(&[(ENV_API_URL, "  ")]),
            Overrides::default(),
        );
        assert_eq!(settings.api_url, DEFAULT_API_URL);
    }
}
