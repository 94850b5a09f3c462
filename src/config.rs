//! Configuration management for drug-pages.
//!
//! Supports layered configuration: defaults → project → user → env.
//! Command-line flags are applied on top by the binaries.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the project-level configuration file
pub const PROJECT_CONFIG_FILE: &str = ".drug-pages.toml";

/// Environment variable prefix (`DRUG_PAGES__HTTP__TIMEOUT_SECONDS=10`)
const ENV_PREFIX: &str = "DRUG_PAGES";

/// Fallback environment variable for the extraction API key
const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub git: GitConfig,
    #[serde(default)]
    pub extraction: ExtractionConfig,
}

impl ProjectConfig {
    /// Load configuration with hierarchy: defaults → project → user → env
    ///
    /// `explicit` replaces the project file lookup and must exist.
    pub fn load(explicit: Option<&Path>, project_root: Option<&Path>) -> Result<Self, ConfigError> {
        use config::{Config, Environment, File};

        // .env is only consulted for the extraction credentials
        let _ = dotenvy::dotenv();

        let mut builder = Config::builder();

        // 1. Start with defaults
        builder = builder.add_source(
            File::from_str(
                include_str!("../default_config.toml"),
                config::FileFormat::Toml,
            )
            .required(false),
        );

        // 2. Project-specific config (explicit path, or .drug-pages.toml in project root)
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            builder = builder.add_source(File::from(path.to_path_buf()).required(true));
        } else if let Some(root) = project_root {
            let project_config = root.join(PROJECT_CONFIG_FILE);
            if project_config.exists() {
                builder = builder.add_source(File::from(project_config).required(false));
            }
        }

        // 3. User config (~/.config/drug-pages/config.toml)
        if let Some(config_dir) = directories::ProjectDirs::from("org", "saverx", "drug-pages") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                builder = builder.add_source(File::from(user_config).required(false));
            }
        }

        // 4. Environment variables (DRUG_PAGES__*)
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        let mut loaded: Self = config
            .try_deserialize()
            .map_err(|e| ConfigError::Parse(e.to_string()))?;

        if loaded.extraction.api_key.is_none() {
            loaded.extraction.api_key = std::env::var(API_KEY_ENV).ok().filter(|k| !k.is_empty());
        }

        loaded.validate()?;
        Ok(loaded)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        validate_entry_filename(&self.output.entry_filename)?;
        if self.http.timeout_seconds == 0 {
            return Err(ConfigError::Invalid(
                "http.timeout_seconds must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Reject entry file names that would leave `<drugs-dir>/<slug>/`
pub fn validate_entry_filename(name: &str) -> Result<(), ConfigError> {
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return Err(ConfigError::Invalid(format!(
            "output.entry_filename must be a plain file name, got {:?}",
            name
        )));
    }
    Ok(())
}

/// Output layout configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Template used for every page
    #[serde(default = "default_template")]
    pub template: PathBuf,
    /// Base directory pages are written under
    #[serde(default = "default_drugs_dir")]
    pub drugs_dir: PathBuf,
    /// File name written inside each slug directory
    #[serde(default = "default_entry_filename")]
    pub entry_filename: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
            drugs_dir: default_drugs_dir(),
            entry_filename: default_entry_filename(),
        }
    }
}

fn default_template() -> PathBuf {
    PathBuf::from("templates/index.html")
}

fn default_drugs_dir() -> PathBuf {
    PathBuf::from("drugs")
}

fn default_entry_filename() -> String {
    "index.html".to_string()
}

/// Outbound HTTP configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_user_agent() -> String {
    concat!("drug-pages/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Version-control configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitConfig {
    /// Prefix of the generated commit message
    #[serde(default = "default_commit_prefix")]
    pub commit_prefix: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            commit_prefix: default_commit_prefix(),
        }
    }
}

fn default_commit_prefix() -> String {
    "chore(drugs):".to_string()
}

/// Credentials and endpoint for the text-extraction collaborator
#[derive(Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Base URL of an OpenAI-compatible API
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Chat model name
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

// Keeps the key out of debug logs.
impl std::fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionConfig")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
        }
    }
}

fn default_endpoint() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_model() -> String {
    "gpt-3.5-turbo".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = ProjectConfig::default();
        assert_eq!(config.output.template, PathBuf::from("templates/index.html"));
        assert_eq!(config.output.drugs_dir, PathBuf::from("drugs"));
        assert_eq!(config.output.entry_filename, "index.html");
        assert_eq!(config.http.timeout_seconds, 30);
        assert_eq!(config.http.timeout(), Duration::from_secs(30));
        assert_eq!(config.git.commit_prefix, "chore(drugs):");
        assert_eq!(config.extraction.model, "gpt-3.5-turbo");
    }

    #[test]
    fn test_project_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(PROJECT_CONFIG_FILE),
            "[output]\ndrugs_dir = \"public/drugs\"\n\n[git]\ncommit_prefix = \"pages:\"\n",
        )
        .unwrap();

        let config = ProjectConfig::load(None, Some(temp.path())).unwrap();
        assert_eq!(config.output.drugs_dir, PathBuf::from("public/drugs"));
        assert_eq!(config.output.entry_filename, "index.html");
        assert_eq!(config.git.commit_prefix, "pages:");
    }

    #[test]
    fn test_explicit_config_must_exist() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.toml");

        let err = ProjectConfig::load(Some(&missing), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(p) if p == missing));
    }

    #[test]
    fn test_rejects_nested_entry_filename() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("custom.toml");
        std::fs::write(&path, "[output]\nentry_filename = \"a/index.html\"\n").unwrap();

        let err = ProjectConfig::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ExtractionConfig {
            api_key: Some("sk-secret".to_string()),
            ..ExtractionConfig::default()
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
