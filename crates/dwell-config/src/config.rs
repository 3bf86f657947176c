//! Configuration types and loading for the dwell system.
//!
//! The main entry point is [`DwellConfig`], resolved by [`load_config`] from
//! three layers, lowest priority first:
//!
//! 1. built-in defaults,
//! 2. the `.dwell.yaml` file (see [`crate::config_file`]),
//! 3. environment variables: `JIRA_URL`, `JIRA_USER_EMAIL`,
//!    `JIRA_USER_API_TOKEN` and `JIRA_PROJECT` for the Jira section, and
//!    `DWELL_*` for top-level keys (e.g. `DWELL_DATA_FILE`).

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::debug;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur during configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration layer could not be read or did not match the schema.
    #[error("failed to load configuration: {0}")]
    Load(#[from] Box<figment::Error>),

    /// The configuration could not be rendered as YAML.
    #[error("failed to render configuration: {0}")]
    Render(#[from] serde_yaml::Error),

    /// Required Jira settings are absent or empty.
    #[error("missing required settings: {} (set them in the environment or .env)", .0.join(", "))]
    MissingSettings(Vec<&'static str>),
}

/// A specialized `Result` type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Shown in place of secrets when printing configuration.
pub const REDACTED: &str = "********";

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Jira connection section. Every value may come from the environment.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct JiraConfig {
    /// Site URL, e.g. `https://example.atlassian.net`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: Option<String>,

    /// Account email used for basic authentication.
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_email: Option<String>,

    /// API token paired with `user_email`.
    #[serde(default, deserialize_with = "lenient_string")]
    pub user_api_token: Option<String>,

    /// Project key (or numeric id) used for date-range searches.
    #[serde(default, deserialize_with = "lenient_string")]
    pub project: Option<String>,
}

/// A scalar read where a string is expected.
///
/// Environment values are parsed, so `JIRA_PROJECT=10200` arrives as a
/// number and `JIRA_USER_API_TOKEN=true` as a boolean.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    UInt(u64),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl From<Scalar> for String {
    fn from(value: Scalar) -> Self {
        match value {
            Scalar::Str(s) => s,
            Scalar::UInt(n) => n.to_string(),
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(n) => n.to_string(),
            Scalar::Bool(b) => b.to_string(),
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(String::from))
}

fn lenient_path<'de, D>(deserializer: D) -> std::result::Result<PathBuf, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(PathBuf::from(String::from(Scalar::deserialize(deserializer)?)))
}

/// Validated Jira connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JiraCredentials {
    pub url: String,
    pub email: String,
    pub api_token: String,
    pub project: String,
}

impl JiraConfig {
    /// Returns the connection settings, or the names of the missing
    /// environment variables.
    pub fn credentials(&self) -> Result<JiraCredentials> {
        let fields = [
            ("JIRA_URL", &self.url),
            ("JIRA_USER_EMAIL", &self.user_email),
            ("JIRA_USER_API_TOKEN", &self.user_api_token),
            ("JIRA_PROJECT", &self.project),
        ];
        let missing: Vec<&'static str> = fields
            .iter()
            .filter(|(_, value)| value.as_deref().is_none_or(|v| v.trim().is_empty()))
            .map(|(name, _)| *name)
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingSettings(missing));
        }

        let get = |v: &Option<String>| v.as_deref().unwrap_or_default().trim().to_string();
        Ok(JiraCredentials {
            url: get(&self.url).trim_end_matches('/').to_string(),
            email: get(&self.user_email),
            api_token: get(&self.user_api_token),
            project: get(&self.project),
        })
    }
}

/// Defaults for `dwell search`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchConfig {
    /// Page size requested from Jira.
    #[serde(default = "default_max_results")]
    pub max_results: u32,

    /// Value of the `fields` query parameter.
    #[serde(default = "default_fields")]
    pub fields: String,

    /// Value of the `expand` query parameter.
    #[serde(default = "default_expand")]
    pub expand: String,

    /// Status names left out of date-range searches (work still in flight).
    #[serde(default = "default_excluded_statuses")]
    pub excluded_statuses: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            fields: default_fields(),
            expand: default_expand(),
            excluded_statuses: default_excluded_statuses(),
        }
    }
}

fn default_max_results() -> u32 {
    100
}

fn default_fields() -> String {
    "*all".to_string()
}

fn default_expand() -> String {
    "changelog".to_string()
}

fn default_excluded_statuses() -> Vec<String> {
    [
        "To Do",
        "To Be Prepared",
        "Ready for Development",
        "In Code Review",
        "in progress",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

// ---------------------------------------------------------------------------
// Main config struct
// ---------------------------------------------------------------------------

/// The full dwell configuration.
///
/// All fields use `serde` defaults so that a partially-specified YAML file
/// will be deserialized correctly with sensible default values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DwellConfig {
    /// Jira connection settings.
    #[serde(default)]
    pub jira: JiraConfig,

    /// Status aliases accepted by `dwell report --status`, mapped to ids.
    #[serde(default = "default_statuses")]
    pub statuses: BTreeMap<String, String>,

    /// Where `dwell search` saves results and other commands read them.
    #[serde(default = "default_data_file", deserialize_with = "lenient_path")]
    pub data_file: PathBuf,

    /// Search defaults.
    #[serde(default)]
    pub search: SearchConfig,
}

impl Default for DwellConfig {
    fn default() -> Self {
        Self {
            jira: JiraConfig::default(),
            statuses: default_statuses(),
            data_file: default_data_file(),
            search: SearchConfig::default(),
        }
    }
}

fn default_statuses() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("development".to_string(), "10111".to_string()),
        ("review".to_string(), "10359".to_string()),
    ])
}

fn default_data_file() -> PathBuf {
    PathBuf::from("search.json")
}

impl DwellConfig {
    /// Maps a status alias to its id. Anything that is not an alias is
    /// taken to be an id already.
    pub fn resolve_status<'a>(&'a self, alias_or_id: &'a str) -> &'a str {
        self.statuses
            .get(alias_or_id)
            .map(String::as_str)
            .unwrap_or(alias_or_id)
    }

    /// Returns a copy safe to print: the API token is masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.jira.user_api_token.is_some() {
            copy.jira.user_api_token = Some(REDACTED.to_string());
        }
        copy
    }

    /// Renders the configuration as YAML with secrets masked.
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(&self.redacted())?)
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Resolves the configuration from defaults, `file` (if any) and the
/// environment.
///
/// A `file` that does not exist contributes nothing.
///
/// # Errors
///
/// Returns [`ConfigError::Load`] if the file is not valid YAML or a value has
/// the wrong type.
pub fn load_config(file: Option<&Path>) -> Result<DwellConfig> {
    let figment = file_figment(file)
        .merge(
            Env::prefixed("JIRA_")
                .map(|key| format!("jira.{}", key.as_str().to_ascii_lowercase()).into()),
        )
        .merge(Env::prefixed("DWELL_").ignore(&["config"]));
    extract(figment, file)
}

/// Defaults plus the YAML file, without the environment layer.
fn file_figment(file: Option<&Path>) -> Figment {
    let figment = Figment::from(Serialized::defaults(DwellConfig::default()));
    match file {
        Some(path) => figment.merge(Yaml::file(path)),
        None => figment,
    }
}

fn extract(figment: Figment, file: Option<&Path>) -> Result<DwellConfig> {
    let config: DwellConfig = figment.extract().map_err(Box::new)?;
    debug!(
        file = ?file,
        data_file = %config.data_file.display(),
        aliases = config.statuses.len(),
        "resolved configuration"
    );
    Ok(config)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn from_yaml(yaml: &str) -> Result<DwellConfig> {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".dwell.yaml");
        std::fs::write(&path, yaml).unwrap();
        extract(file_figment(Some(&path)), Some(&path))
    }

    #[test]
    fn test_default_config() {
        let cfg = DwellConfig::default();
        assert_eq!(cfg.data_file, PathBuf::from("search.json"));
        assert_eq!(cfg.search.max_results, 100);
        assert_eq!(cfg.search.fields, "*all");
        assert_eq!(cfg.search.expand, "changelog");
        assert_eq!(cfg.search.excluded_statuses.len(), 5);
        assert_eq!(cfg.resolve_status("development"), "10111");
        assert_eq!(cfg.resolve_status("review"), "10359");
    }

    #[test]
    fn test_unknown_alias_is_an_id() {
        let cfg = DwellConfig::default();
        assert_eq!(cfg.resolve_status("10042"), "10042");
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");
        let cfg = extract(file_figment(Some(&path)), Some(&path)).unwrap();
        assert_eq!(cfg, DwellConfig::default());
    }

    #[test]
    fn test_partial_yaml_merges_with_defaults() {
        let cfg = from_yaml(
            "jira:\n  url: https://example.atlassian.net\nstatuses:\n  qa: \"10400\"\nsearch:\n  max_results: 50\n",
        )
        .unwrap();
        assert_eq!(cfg.jira.url.as_deref(), Some("https://example.atlassian.net"));
        assert_eq!(cfg.resolve_status("qa"), "10400");
        // Built-in aliases survive the merge.
        assert_eq!(cfg.resolve_status("development"), "10111");
        assert_eq!(cfg.search.max_results, 50);
        assert_eq!(cfg.search.expand, "changelog");
    }

    #[test]
    fn test_alias_can_be_overridden() {
        let cfg = from_yaml("statuses:\n  development: \"3\"\n").unwrap();
        assert_eq!(cfg.resolve_status("development"), "3");
    }

    #[test]
    fn test_invalid_yaml_type_is_error() {
        let err = from_yaml("search:\n  max_results: lots\n").unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn test_numeric_env_values_are_strings() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("JIRA_URL", "https://example.atlassian.net");
            jail.set_env("JIRA_PROJECT", "10200");
            jail.set_env("JIRA_USER_API_TOKEN", "123456");
            jail.set_env("DWELL_DATA_FILE", "123");
            let cfg = load_config(None).unwrap();
            assert_eq!(cfg.jira.project.as_deref(), Some("10200"));
            assert_eq!(cfg.jira.user_api_token.as_deref(), Some("123456"));
            assert_eq!(cfg.data_file, PathBuf::from("123"));
            Ok(())
        });
    }

    #[test]
    fn test_numeric_yaml_project_is_string() {
        let cfg = from_yaml("jira:\n  project: 10200\n").unwrap();
        assert_eq!(cfg.jira.project.as_deref(), Some("10200"));
        assert_eq!(cfg.data_file, PathBuf::from("search.json"));
    }

    #[test]
    fn test_credentials_report_missing() {
        let jira = JiraConfig {
            url: Some("https://x".into()),
            user_email: Some("  ".into()),
            user_api_token: None,
            project: Some("DW".into()),
        };
        match jira.credentials() {
            Err(ConfigError::MissingSettings(missing)) => {
                assert_eq!(missing, vec!["JIRA_USER_EMAIL", "JIRA_USER_API_TOKEN"]);
            }
            other => panic!("expected missing settings, got {:?}", other),
        }
    }

    #[test]
    fn test_credentials_trim_url() {
        let jira = JiraConfig {
            url: Some("https://example.atlassian.net/".into()),
            user_email: Some("a@example.com".into()),
            user_api_token: Some("tok".into()),
            project: Some("DW".into()),
        };
        let creds = jira.credentials().unwrap();
        assert_eq!(creds.url, "https://example.atlassian.net");
        assert_eq!(creds.project, "DW");
    }

    #[test]
    fn test_yaml_output_masks_token() {
        let mut cfg = DwellConfig::default();
        cfg.jira.user_api_token = Some("secret-token".into());
        let yaml = cfg.to_yaml().unwrap();
        assert!(!yaml.contains("secret-token"));
        assert!(yaml.contains(REDACTED));
    }
}
