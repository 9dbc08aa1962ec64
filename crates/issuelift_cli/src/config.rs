//! Configuration file support for issuelift.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (prefixed with `ISSUELIFT_`, `__` between nested keys,
//!    e.g., `ISSUELIFT_GITHUB__TOKEN`, `ISSUELIFT_IMPORT__DELAY_SECS`)
//! 3. Config file (./issuelift.toml, then ~/.config/issuelift/config.toml)
//! 4. Built-in defaults
//!
//! Example config file:
//! ```toml
//! [github]
//! token = "ghp_..."  # or use ISSUELIFT_GITHUB__TOKEN env var
//! api_url = "https://api.github.com"
//!
//! [import]
//! delay_secs = 10
//! labels = ["gitlab"]
//! exclusion_filter = ["mentioned in", "assigned to"]  # optional
//!
//! [users]  # github handle = gitlab user id
//! alice = 482361
//!
//! [[rewrite]]
//! pattern = '\(/uploads/(\w{32}/.*)\)'
//! replacement = '(https://gitlab.com/acme/app/uploads/$1)'
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config as ConfigBuilder, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use issuelift::github::GITHUB_API_URL;
use issuelift::replay::DEFAULT_DELAY;
use issuelift::{ExclusionFilter, TextRewriteRule, UserId};
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GitHub configuration.
    pub github: GitHubConfig,
    /// Defaults for the import and post commands.
    pub import: ImportConfig,
    /// GitHub handle to GitLab user id.
    pub users: BTreeMap<String, UserId>,
    /// Ordered text rewrite rules.
    pub rewrite: Vec<RewriteConfig>,
}

/// GitHub configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// GitHub API token.
    /// Can also be set via ISSUELIFT_GITHUB__TOKEN environment variable.
    pub token: Option<String>,
    /// REST endpoint, for GitHub Enterprise.
    pub api_url: Option<String>,
}

/// Import defaults.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Seconds to wait between creation calls.
    pub delay_secs: u64,
    /// Labels attached to every created issue.
    pub labels: Vec<String>,
    /// Note prefixes to drop. The built-in system-note set when absent.
    pub exclusion_filter: Option<Vec<String>>,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            delay_secs: DEFAULT_DELAY.as_secs(),
            labels: Vec::new(),
            exclusion_filter: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RewriteConfig {
    pub pattern: String,
    pub replacement: String,
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/issuelift/config.toml)
    /// 3. Local config file (./issuelift.toml)
    /// 4. Environment variables with ISSUELIFT_ prefix
    ///
    /// A source that exists but cannot be parsed is an error, never skipped.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(
            Self::default_config_path(),
            Path::new("issuelift.toml"),
            Self::environment(),
        )
    }

    /// `ISSUELIFT_` prefix, `__` between nested keys.
    ///
    /// e.g., ISSUELIFT_GITHUB__TOKEN -> github.token,
    /// ISSUELIFT_IMPORT__DELAY_SECS -> import.delay_secs
    fn environment() -> Environment {
        Environment::with_prefix("ISSUELIFT")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("import.labels")
            .with_list_parse_key("import.exclusion_filter")
    }

    fn load_from(
        xdg_config: Option<PathBuf>,
        local_config: &Path,
        environment: Environment,
    ) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        if let Some(xdg_config) = xdg_config
            && xdg_config.exists()
        {
            tracing::debug!("Loading config from {:?}", xdg_config);
            builder = builder.add_source(File::from(xdg_config).format(FileFormat::Toml));
        }

        if local_config.exists() {
            tracing::debug!("Loading config from {:?}", local_config);
            builder = builder.add_source(File::from(local_config).format(FileFormat::Toml));
        }

        builder.add_source(environment).build()?.try_deserialize()
    }

    /// Token from the command line, falling back to configuration.
    pub fn github_token(&self, flag: Option<&str>) -> Option<String> {
        flag.map(str::to_string)
            .or_else(|| self.github.token.clone())
            .filter(|t| !t.trim().is_empty())
    }

    pub fn api_url(&self) -> &str {
        self.github.api_url.as_deref().unwrap_or(GITHUB_API_URL)
    }

    /// Delay from the command line, falling back to configuration.
    pub fn delay(&self, flag: Option<Duration>) -> Duration {
        flag.unwrap_or(Duration::from_secs(self.import.delay_secs))
    }

    /// Labels from the command line, falling back to configuration.
    pub fn labels(&self, flag: &[String]) -> Vec<String> {
        if flag.is_empty() {
            self.import.labels.clone()
        } else {
            flag.to_vec()
        }
    }

    /// Exclusion prefixes from the command line, then configuration, then the built-in set.
    pub fn exclusion_filter(&self, flag: &[String]) -> ExclusionFilter {
        if !flag.is_empty() {
            return ExclusionFilter::new(flag.iter().cloned());
        }
        match &self.import.exclusion_filter {
            Some(prefixes) => ExclusionFilter::new(prefixes.iter().cloned()),
            None => ExclusionFilter::default(),
        }
    }

    /// Configured user pairs followed by command-line pairs.
    ///
    /// A command-line entry for a handle already in the file replaces it.
    pub fn user_pairs(&self, flag: &[(String, UserId)]) -> Vec<(String, UserId)> {
        let mut pairs: BTreeMap<String, UserId> = self.users.clone();
        for (handle, id) in flag {
            pairs.insert(handle.trim_start_matches('@').to_string(), *id);
        }
        pairs.into_iter().collect()
    }

    /// Configured rewrite rules followed by command-line rules.
    pub fn rewrite_rules(&self, flag: &[TextRewriteRule]) -> Vec<TextRewriteRule> {
        self.rewrite
            .iter()
            .map(|r| TextRewriteRule::new(&r.pattern, &r.replacement))
            .chain(flag.iter().cloned())
            .collect()
    }

    /// Get the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "issuelift").map(|dirs| dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_toml(content: &str) -> Config {
        ConfigBuilder::builder()
            .add_source(config::File::from_str(content, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.github.token.is_none());
        assert_eq!(config.api_url(), GITHUB_API_URL);
        assert_eq!(config.import.delay_secs, 10);
        assert!(config.import.labels.is_empty());
        assert!(config.users.is_empty());
        assert!(config.rewrite.is_empty());
    }

    #[test]
    fn test_full_config_parsing() {
        let config = from_toml(
            r#"
            [github]
            token = "ghp_test123"
            api_url = "https://ghe.example/api/v3"

            [import]
            delay_secs = 2
            labels = ["gitlab", "imported"]
            exclusion_filter = ["mentioned in"]

            [users]
            alice = 482361
            bob = 17

            [[rewrite]]
            pattern = 'foo'
            replacement = 'bar'

            [[rewrite]]
            pattern = 'bar'
            replacement = 'baz'
            "#,
        );

        assert_eq!(config.github_token(None), Some("ghp_test123".to_string()));
        assert_eq!(config.api_url(), "https://ghe.example/api/v3");
        assert_eq!(config.delay(None), Duration::from_secs(2));
        assert_eq!(config.labels(&[]), vec!["gitlab", "imported"]);
        assert_eq!(config.exclusion_filter(&[]).prefixes(), ["mentioned in"]);
        assert_eq!(config.users.get("alice"), Some(&482361));

        let rules = config.rewrite_rules(&[]);
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0], TextRewriteRule::new("foo", "bar"));
        assert_eq!(rules[1], TextRewriteRule::new("bar", "baz"));
    }

    #[test]
    fn test_config_builder_partial_override() {
        let config = from_toml(
            r#"
            [import]
            labels = ["gitlab"]
            "#,
        );

        assert_eq!(config.import.labels, vec!["gitlab"]);
        assert_eq!(config.import.delay_secs, 10);
        assert!(config.import.exclusion_filter.is_none());
    }

    #[test]
    fn test_flags_take_precedence() {
        let config = from_toml(
            r#"
            [github]
            token = "from-file"

            [import]
            delay_secs = 30
            labels = ["gitlab"]

            [users]
            alice = 1
            "#,
        );

        assert_eq!(
            config.github_token(Some("from-flag")),
            Some("from-flag".to_string())
        );
        assert_eq!(
            config.delay(Some(Duration::from_millis(500))),
            Duration::from_millis(500)
        );
        assert_eq!(config.labels(&["other".to_string()]), vec!["other"]);
        assert_eq!(
            config.user_pairs(&[("@alice".to_string(), 2), ("carol".to_string(), 3)]),
            vec![("alice".to_string(), 2), ("carol".to_string(), 3)]
        );
    }

    #[test]
    fn test_blank_token_is_absent() {
        let config = from_toml(
            r#"
            [github]
            token = "  "
            "#,
        );
        assert!(config.github_token(None).is_none());
    }

    #[test]
    fn test_exclusion_filter_fallbacks() {
        let config = Config::default();
        assert_eq!(config.exclusion_filter(&[]), ExclusionFilter::default());
        assert_eq!(
            config.exclusion_filter(&["bot:".to_string()]).prefixes(),
            ["bot:"]
        );
    }

    #[test]
    fn test_flag_rules_follow_file_rules() {
        let config = from_toml(
            r#"
            [[rewrite]]
            pattern = 'a'
            replacement = 'b'
            "#,
        );
        let rules = config.rewrite_rules(&[TextRewriteRule::new("b", "c")]);
        assert_eq!(
            rules,
            vec![TextRewriteRule::new("a", "b"), TextRewriteRule::new("b", "c")]
        );
    }

    #[test]
    fn test_config_invalid_toml() {
        let result = ConfigBuilder::builder()
            .add_source(config::File::from_str("[import\ndelay_secs = 1", FileFormat::Toml))
            .build();

        assert!(result.is_err());
    }

    fn env(vars: &[(&str, &str)]) -> Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::environment().source(Some(map))
    }

    #[test]
    fn test_load_rejects_invalid_local_file() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("issuelift.toml");
        std::fs::write(
            &local,
            r#"
            [import]
            delay_secs = "5s"

            [users]
            alice = 42

            [[rewrite]]
            pattern = 'a'
            replacement = 'b'
            "#,
        )
        .unwrap();

        assert!(Config::load_from(None, &local, env(&[])).is_err());
    }

    #[test]
    fn test_load_rejects_unparseable_xdg_file() {
        let dir = tempfile::tempdir().unwrap();
        let xdg = dir.path().join("config.toml");
        std::fs::write(&xdg, "[import\ndelay_secs = 1").unwrap();

        let result = Config::load_from(Some(xdg), &dir.path().join("missing.toml"), env(&[]));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_layers_local_file_and_environment() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("issuelift.toml");
        std::fs::write(
            &local,
            r#"
            [import]
            delay_secs = 3
            labels = ["file"]

            [users]
            alice = 42
            "#,
        )
        .unwrap();

        let config = Config::load_from(
            None,
            &local,
            env(&[
                ("ISSUELIFT_IMPORT__DELAY_SECS", "1"),
                ("ISSUELIFT_IMPORT__LABELS", "gitlab,imported"),
                ("ISSUELIFT_GITHUB__API_URL", "https://ghe.example/api/v3"),
                ("ISSUELIFT_GITHUB__TOKEN", "ghp_env"),
            ]),
        )
        .unwrap();

        assert_eq!(config.delay(None), Duration::from_secs(1));
        assert_eq!(config.labels(&[]), vec!["gitlab", "imported"]);
        assert_eq!(config.api_url(), "https://ghe.example/api/v3");
        assert_eq!(config.github_token(None), Some("ghp_env".to_string()));
        assert_eq!(config.users.get("alice"), Some(&42));
    }

    #[test]
    fn test_load_without_sources_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            Config::load_from(None, &dir.path().join("issuelift.toml"), env(&[])).unwrap();
        assert_eq!(config.import.delay_secs, 10);
        assert!(config.users.is_empty());
    }

    #[test]
    fn test_default_config_path_names_the_tool() {
        if let Some(path) = Config::default_config_path() {
            assert!(path.to_string_lossy().contains("issuelift"));
            assert!(path.ends_with("config.toml"));
        }
    }
}
