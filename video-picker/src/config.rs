//! Configuration of a picker run.
//!
//! [`Settings`] is what lives in the YAML configuration file (and environment). It is combined
//! with the command-line arguments into a [`PickerConfig`], which is the only thing
//! [`crate::run`] looks at.

use crate::scoring::{DEFAULT_HIDDEN_SUBSCRIBER_COUNT, DEFAULT_VIEWS_THRESHOLD, ScoringConfig};
use crate::youtube_api::client::{DEFAULT_BASE_URL, MAX_SEARCH_RESULTS};
use eyre::Context;
use serde::Deserialize;
use std::path::Path;

/// How many days back to search unless told otherwise.
pub const DEFAULT_SEARCH_PERIOD_DAYS: u32 = 7;

/// How many videos to print per leaderboard.
pub const DEFAULT_NUM_TO_PRINT: usize = 5;

/// Prefix of environment variables that override the configuration file.
pub const ENV_PREFIX: &str = "VIDEO_PICKER";

/// Contents of the configuration file.
///
/// ```yaml
/// api_key: AIza...
/// views_threshold: 5000
/// num_to_print: 5
/// hidden_subscriber_count: 1000000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// YouTube Data API key.
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_views_threshold")]
    pub views_threshold: u64,
    #[serde(default = "default_num_to_print")]
    pub num_to_print: usize,
    /// Subscriber count assumed for channels that hide theirs.
    #[serde(default = "default_hidden_subscriber_count")]
    pub hidden_subscriber_count: u64,
    #[serde(default = "default_max_results")]
    pub max_results: u32,
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
}

fn default_views_threshold() -> u64 {
    DEFAULT_VIEWS_THRESHOLD
}

fn default_num_to_print() -> usize {
    DEFAULT_NUM_TO_PRINT
}

fn default_hidden_subscriber_count() -> u64 {
    DEFAULT_HIDDEN_SUBSCRIBER_COUNT
}

fn default_max_results() -> u32 {
    MAX_SEARCH_RESULTS
}

fn default_api_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            views_threshold: default_views_threshold(),
            num_to_print: default_num_to_print(),
            hidden_subscriber_count: default_hidden_subscriber_count(),
            max_results: default_max_results(),
            api_base_url: default_api_base_url(),
        }
    }
}

impl Settings {
    /// Reads settings from the YAML file at `path`, overridden by `VIDEO_PICKER_*` variables.
    ///
    /// A missing file is not an error; the environment and defaults still apply.
    pub fn load(path: &Path) -> eyre::Result<Self> {
        Self::load_with_env(path, config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Like [`Self::load`], but takes the environment source to read overrides from.
    pub fn load_with_env(path: &Path, env: config::Environment) -> eyre::Result<Self> {
        Self::build(Some(path), env)
            .with_context(|| format!("load configuration from {}", path.display()))
    }

    /// Like [`Self::load`], but reports a broken configuration file and carries on without it.
    ///
    /// Environment overrides still apply. If they hold no API key either, the run fails later
    /// with a clearer message about what is missing.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load_or_default_with_env(path, config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Like [`Self::load_or_default`], but takes the environment source to read overrides from.
    pub fn load_or_default_with_env(path: &Path, env: config::Environment) -> Self {
        match Self::load_with_env(path, env.clone()) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::error!(path = %path.display(), "ignoring unusable configuration: {e:#}");
                Self::build(None, env).unwrap_or_else(|e| {
                    tracing::error!("ignoring unusable environment overrides: {e:#}");
                    Self::default()
                })
            }
        }
    }

    fn build(file: Option<&Path>, env: config::Environment) -> eyre::Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(
                config::File::new(&path.to_string_lossy(), config::FileFormat::Yaml)
                    .required(false),
            );
        }
        builder
            .add_source(env.try_parsing(true))
            .build()
            .context("read configuration sources")?
            .try_deserialize()
            .context("parse configuration")
    }
}

/// Everything a picker run needs, resolved up front.
#[derive(Clone, PartialEq, Eq)]
pub struct PickerConfig {
    /// Search terms in the order they were given.
    pub search_terms: Vec<String>,
    pub search_period_days: u32,
    pub api_key: String,
    pub api_base_url: String,
    pub scoring: ScoringConfig,
    pub num_to_print: usize,
}

impl std::fmt::Debug for PickerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickerConfig")
            .field("search_terms", &self.search_terms)
            .field("search_period_days", &self.search_period_days)
            .field("api_key", &"<redacted>")
            .field("api_base_url", &self.api_base_url)
            .field("scoring", &self.scoring)
            .field("num_to_print", &self.num_to_print)
            .finish()
    }
}

impl PickerConfig {
    /// Combines search terms and the search period with the loaded settings.
    ///
    /// Terms are trimmed and blank ones dropped; at least one must remain. Fails if the
    /// settings hold no API key, since no request could be authenticated.
    pub fn new<I, S>(
        search_terms: I,
        search_period_days: u32,
        settings: Settings,
    ) -> eyre::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let search_terms: Vec<String> = search_terms
            .into_iter()
            .map(|term| term.as_ref().trim().to_string())
            .filter(|term| !term.is_empty())
            .collect();
        if search_terms.is_empty() {
            eyre::bail!("at least one non-empty search term is required");
        }

        let Some(api_key) = settings.api_key.filter(|key| !key.trim().is_empty()) else {
            eyre::bail!(
                "no YouTube API key configured; set `api_key` in the configuration file \
                 or {ENV_PREFIX}_API_KEY"
            );
        };

        Ok(Self {
            search_terms,
            search_period_days,
            api_key,
            api_base_url: settings.api_base_url,
            scoring: ScoringConfig {
                views_threshold: settings.views_threshold,
                hidden_subscriber_count: settings.hidden_subscriber_count,
                max_results: settings.max_results,
            },
            num_to_print: settings.num_to_print,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn with_key(key: &str) -> Settings {
        Settings {
            api_key: Some(key.to_string()),
            ..Settings::default()
        }
    }

    fn write_config(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!(
            "video-picker-{}-{name}.yaml",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn load_yaml_with_defaults() {
        let path = write_config("minimal", "api_key: secret-key\n");
        let settings = Settings::load_with_env(&path, env(&[])).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(
            settings,
            Settings {
                api_key: Some("secret-key".to_string()),
                ..Settings::default()
            }
        );
    }

    #[test]
    fn load_yaml_with_overrides() {
        let path = write_config(
            "full",
            "api_key: k\nviews_threshold: 100\nnum_to_print: 3\nhidden_subscriber_count: 42\n",
        );
        let settings = Settings::load_with_env(&path, env(&[])).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.views_threshold, 100);
        assert_eq!(settings.num_to_print, 3);
        assert_eq!(settings.hidden_subscriber_count, 42);
        assert_eq!(settings.max_results, MAX_SEARCH_RESULTS);
    }

    fn env(vars: &[(&str, &str)]) -> config::Environment {
        let vars = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        config::Environment::with_prefix(ENV_PREFIX).source(Some(vars))
    }

    #[test]
    fn malformed_yaml_falls_back_to_defaults() {
        let path = write_config("broken", "api_key: [unterminated\n");
        assert!(Settings::load_with_env(&path, env(&[])).is_err());
        let settings = Settings::load_or_default_with_env(&path, env(&[]));
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings, Settings::default());
        assert!(settings.api_key.is_none());
    }

    #[test]
    fn missing_file_is_not_an_error() {
        let path = std::env::temp_dir().join("video-picker-does-not-exist.yaml");
        assert_eq!(
            Settings::load_with_env(&path, env(&[])).unwrap(),
            Settings::default()
        );
        assert_eq!(
            Settings::load_or_default_with_env(&path, env(&[])),
            Settings::default()
        );
    }

    #[test]
    fn environment_overrides_file() {
        let path = write_config("env-override", "api_key: from-file\nviews_threshold: 100\n");
        let settings = Settings::load_with_env(
            &path,
            env(&[
                ("VIDEO_PICKER_API_KEY", "from-env"),
                ("VIDEO_PICKER_VIEWS_THRESHOLD", "250"),
            ]),
        )
        .unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.api_key.as_deref(), Some("from-env"));
        assert_eq!(settings.views_threshold, 250);
        assert_eq!(settings.num_to_print, DEFAULT_NUM_TO_PRINT);
    }

    #[test]
    fn environment_alone_supplies_api_key() {
        let path = std::env::temp_dir().join("video-picker-no-such-config.yaml");
        let settings =
            Settings::load_or_default_with_env(&path, env(&[("VIDEO_PICKER_API_KEY", "from-env")]));
        assert_eq!(settings.api_key.as_deref(), Some("from-env"));
        assert!(PickerConfig::new(["cats"], 7, settings).is_ok());
    }

    #[test]
    fn environment_survives_malformed_file() {
        let path = write_config("broken-with-env", "api_key: [unterminated\n");
        let settings =
            Settings::load_or_default_with_env(&path, env(&[("VIDEO_PICKER_API_KEY", "from-env")]));
        std::fs::remove_file(&path).unwrap();

        assert_eq!(settings.api_key.as_deref(), Some("from-env"));
    }

    #[test]
    fn terms_are_normalized_in_order() {
        let config = PickerConfig::new(["  dogs ", "", "cats", "   "], 7, with_key("k")).unwrap();
        assert_eq!(config.search_terms, ["dogs", "cats"]);
        assert_eq!(config.search_period_days, 7);
        assert_eq!(config.scoring, ScoringConfig::default());
        assert_eq!(config.num_to_print, DEFAULT_NUM_TO_PRINT);
    }

    #[test]
    fn single_term_is_a_list_of_one() {
        let config = PickerConfig::new(["cats"], 1, with_key("k")).unwrap();
        assert_eq!(config.search_terms, ["cats"]);
    }

    #[test]
    fn no_terms_is_an_error() {
        assert!(PickerConfig::new(Vec::<String>::new(), 7, with_key("k")).is_err());
        assert!(PickerConfig::new([" "], 7, with_key("k")).is_err());
    }

    #[test]
    fn missing_api_key_is_an_error() {
        let err = PickerConfig::new(["cats"], 7, Settings::default()).unwrap_err();
        assert!(err.to_string().contains("API key"));
        assert!(PickerConfig::new(["cats"], 7, with_key("  ")).is_err());
    }

    #[test]
    fn debug_output_hides_api_key() {
        let config = PickerConfig::new(["cats"], 7, with_key("super-secret")).unwrap();
        assert!(!format!("{config:?}").contains("super-secret"));
    }
}
