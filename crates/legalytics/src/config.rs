//! Configuration management for legalytics using the prefer crate.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::llm::LlmConfig;

/// Default OpenSearch index holding parsed regulations.
pub const DEFAULT_INDEX: &str = "law_analyzer_new4";

/// Errors raised while loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse {format} config {path}: {message}")]
    Parse {
        path: PathBuf,
        format: &'static str,
        message: String,
    },
}

/// Where documents are fetched from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Opensearch,
    File,
}

impl SourceKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "opensearch" | "elasticsearch" => Some(Self::Opensearch),
            "file" | "json" => Some(Self::File),
            _ => None,
        }
    }
}

/// Which annotation backend the record processor uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationStrategy {
    #[default]
    None,
    Ner,
    LlmInsight,
}

impl AnnotationStrategy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "none" | "off" => Some(Self::None),
            "ner" => Some(Self::Ner),
            "llm_insight" | "llm" | "insight" => Some(Self::LlmInsight),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Ner => "ner",
            Self::LlmInsight => "llm_insight",
        }
    }
}

/// Document source settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default)]
    pub kind: SourceKind,
    /// OpenSearch host, combined with `port` and `use_ssl` when `endpoint` is unset.
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_true")]
    pub use_ssl: bool,
    /// Full base URL; takes precedence over host/port.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    #[serde(default = "default_index")]
    pub index: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// The production cluster uses self-signed certificates.
    #[serde(default = "default_true")]
    pub accept_invalid_certs: bool,
    /// Directory of `<id>.json` documents for the file source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    #[serde(default = "default_source_timeout")]
    pub timeout_secs: u64,
}

/// Annotation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationConfig {
    #[serde(default)]
    pub strategy: AnnotationStrategy,
    /// Maximum characters per annotated chunk.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    /// Per-chunk timeout.
    #[serde(default = "default_annotation_timeout")]
    pub timeout_secs: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ner_endpoint: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ner_api_key: Option<String>,
    #[serde(default = "LlmConfig::base_default")]
    pub llm: LlmConfig,
}

/// Document aggregation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationConfig {
    /// Number of word-cloud entries kept.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_true")]
    pub strip_digits: bool,
    #[serde(default = "default_true")]
    pub strip_punctuation: bool,
    /// Stopword list in the Tala format.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stopwords_path: Option<PathBuf>,
}

/// Configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "SourceConfig::base_default")]
    pub source: SourceConfig,
    #[serde(default = "AnnotationConfig::base_default")]
    pub annotation: AnnotationConfig,
    #[serde(default = "AggregationConfig::base_default")]
    pub aggregation: AggregationConfig,
    /// Path to the config file this was loaded from (not serialized).
    #[serde(skip)]
    pub source_path: Option<PathBuf>,
}

fn default_true() -> bool {
    true
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    9200
}

fn default_index() -> String {
    DEFAULT_INDEX.to_string()
}

fn default_source_timeout() -> u64 {
    30
}

fn default_chunk_size() -> usize {
    crate::chunker::DEFAULT_CHUNK_CHARS
}

fn default_annotation_timeout() -> u64 {
    60
}

fn default_top_k() -> usize {
    30
}

fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn env_bool(name: &str) -> Option<bool> {
    std::env::var(name)
        .ok()
        .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self::base_default().with_env_overrides()
    }
}

impl SourceConfig {
    pub(crate) fn base_default() -> Self {
        Self {
            kind: SourceKind::default(),
            host: default_host(),
            port: default_port(),
            use_ssl: true,
            endpoint: None,
            index: default_index(),
            username: None,
            password: None,
            accept_invalid_certs: true,
            data_dir: None,
            timeout_secs: default_source_timeout(),
        }
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars: `LEGALYTICS_SOURCE`, `LEGALYTICS_DATA_DIR`,
    /// `OPENSEARCH_HOST`, `OPENSEARCH_PORT`, `OPENSEARCH_USE_SSL`,
    /// `OPENSEARCH_ENDPOINT`, `OPENSEARCH_INDEX`, `OPENSEARCH_USERNAME`,
    /// `OPENSEARCH_PASSWORD`.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(kind) = std::env::var("LEGALYTICS_SOURCE")
            .ok()
            .as_deref()
            .and_then(SourceKind::parse)
        {
            self.kind = kind;
        }
        if let Ok(dir) = std::env::var("LEGALYTICS_DATA_DIR") {
            self.data_dir = Some(PathBuf::from(dir));
        }
        if let Ok(host) = std::env::var("OPENSEARCH_HOST") {
            self.host = host;
        }
        if let Some(port) = env_parse("OPENSEARCH_PORT") {
            self.port = port;
        }
        if let Some(ssl) = env_bool("OPENSEARCH_USE_SSL") {
            self.use_ssl = ssl;
        }
        if let Ok(endpoint) = std::env::var("OPENSEARCH_ENDPOINT") {
            self.endpoint = Some(endpoint);
        }
        if let Ok(index) = std::env::var("OPENSEARCH_INDEX") {
            self.index = index;
        }
        if let Ok(user) = std::env::var("OPENSEARCH_USERNAME") {
            self.username = Some(user);
        }
        if let Ok(pass) = std::env::var("OPENSEARCH_PASSWORD") {
            self.password = Some(pass);
        }
        self
    }

    /// Base URL of the OpenSearch cluster, without a trailing slash.
    pub fn base_url(&self) -> String {
        match self.endpoint {
            Some(ref endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => {
                let scheme = if self.use_ssl { "https" } else { "http" };
                format!("{}://{}:{}", scheme, self.host, self.port)
            }
        }
    }
}

impl Default for AnnotationConfig {
    fn default() -> Self {
        Self::base_default().with_env_overrides()
    }
}

impl AnnotationConfig {
    pub(crate) fn base_default() -> Self {
        Self {
            strategy: AnnotationStrategy::default(),
            chunk_size: default_chunk_size(),
            timeout_secs: default_annotation_timeout(),
            ner_endpoint: None,
            ner_api_key: None,
            llm: LlmConfig::base_default(),
        }
    }

    /// Apply environment variable overrides.
    ///
    /// Supported env vars: `LEGALYTICS_STRATEGY`, `LEGALYTICS_CHUNK_SIZE`,
    /// `LEGALYTICS_ANNOTATION_TIMEOUT`, `NER_ENDPOINT`, `NER_API_KEY`, and
    /// the `LLM_*` family handled by `LlmConfig`.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(strategy) = std::env::var("LEGALYTICS_STRATEGY")
            .ok()
            .as_deref()
            .and_then(AnnotationStrategy::parse)
        {
            self.strategy = strategy;
        }
        if let Some(size) = env_parse("LEGALYTICS_CHUNK_SIZE") {
            self.chunk_size = size;
        }
        if let Some(secs) = env_parse("LEGALYTICS_ANNOTATION_TIMEOUT") {
            self.timeout_secs = secs;
        }
        if let Ok(endpoint) = std::env::var("NER_ENDPOINT") {
            self.ner_endpoint = Some(endpoint);
        }
        if let Ok(key) = std::env::var("NER_API_KEY") {
            self.ner_api_key = Some(key);
        }
        self.llm = self.llm.with_env_overrides();
        self
    }
}

impl Default for AggregationConfig {
    fn default() -> Self {
        Self::base_default().with_env_overrides()
    }
}

impl AggregationConfig {
    pub(crate) fn base_default() -> Self {
        Self {
            top_k: default_top_k(),
            strip_digits: true,
            strip_punctuation: true,
            stopwords_path: None,
        }
    }

    /// Apply environment variable overrides (`STOPWORDS_PATH`, `LEGALYTICS_TOP_K`).
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(path) = std::env::var("STOPWORDS_PATH") {
            self.stopwords_path = Some(PathBuf::from(path));
        }
        if let Some(k) = env_parse("LEGALYTICS_TOP_K") {
            self.top_k = k;
        }
        self
    }
}

impl Config {
    /// Built-in defaults, ignoring the environment.
    pub fn base_default() -> Self {
        Self {
            source: SourceConfig::base_default(),
            annotation: AnnotationConfig::base_default(),
            aggregation: AggregationConfig::base_default(),
            source_path: None,
        }
    }

    /// Load configuration using prefer crate for discovery.
    /// Automatically discovers legalytics config files in standard locations.
    pub async fn load() -> Self {
        match prefer::load("legalytics").await {
            Ok(pref_config) => match pref_config.source_path() {
                Some(path) => match Self::load_from_path(path).await {
                    Ok(config) => config,
                    Err(e) => {
                        warn!("{}; using defaults", e);
                        Self::default()
                    }
                },
                None => Self::default(),
            },
            Err(_) => {
                debug!("No legalytics config file found, using defaults");
                Self::default()
            }
        }
    }

    /// Load configuration from a specific file path.
    /// Supports JSON, TOML, and YAML based on file extension.
    ///
    /// Environment variables override values from the file.
    pub async fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        let mut config = Self::parse(path, &contents)?;
        config.source = config.source.with_env_overrides();
        config.annotation = config.annotation.with_env_overrides();
        config.aggregation = config.aggregation.with_env_overrides();
        config.source_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse config text, picking the format from the path's extension.
    pub fn parse(path: &Path, contents: &str) -> Result<Self, ConfigError> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        let parse_err = |format: &'static str, message: String| ConfigError::Parse {
            path: path.to_path_buf(),
            format,
            message,
        };

        match ext {
            "toml" => toml::from_str(contents).map_err(|e| parse_err("TOML", e.to_string())),
            "yaml" | "yml" => {
                serde_yaml::from_str(contents).map_err(|e| parse_err("YAML", e.to_string()))
            }
            _ => serde_json::from_str(contents).map_err(|e| parse_err("JSON", e.to_string())),
        }
    }

    /// Get the base directory for resolving relative paths.
    pub fn base_dir(&self) -> Option<PathBuf> {
        self.source_path
            .as_ref()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    /// Resolve a possibly relative path against the config file's directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            return path.to_path_buf();
        }
        match self.base_dir() {
            Some(base) => base.join(path),
            None => path.to_path_buf(),
        }
    }
}
