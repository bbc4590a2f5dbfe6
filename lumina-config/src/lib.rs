//! Loader for verification service configuration with YAML + environment
//! overlays.
//!
//! The backend is chosen here exactly once, at process start: downstream
//! code receives an injected strategy instead of consulting an env toggle on
//! every call. `${VAR}` placeholders are expanded recursively (depth-capped)
//! so secrets can live in the environment rather than the file.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

#[derive(Debug, Deserialize)]
pub struct LuminaConfig {
    pub version: Option<String>,
    pub backend: BackendConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
}

/// Which verification backend to run behind the action boundary.
///
/// `canned` replaces the original deployment's "mock mode": a fixed verdict
/// served without any model call, for demos and offline development.
#[derive(Debug, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum BackendConfig {
    Gemini {
        model: String,
        api_key: String,
    },
    Openai {
        model: String,
        api_key: String,
        #[serde(default = "default_openai_endpoint")]
        endpoint: String,
    },
    Canned,
}

/// Knobs for the page fetch performed when a submission carries a URL.
#[derive(Debug, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_fetch_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_fetch_timeout_secs(),
        }
    }
}

fn default_openai_endpoint() -> String {
    "https://api.openai.com/v1".into()
}
fn default_fetch_timeout_secs() -> u64 {
    30
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Builder hiding the `config` crate wiring (YAML + env overrides).
pub struct LuminaConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for LuminaConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl LuminaConfigLoader {
    /// Start with sensible defaults: YAML file + `LUMINA_` env overrides.
    ///
    /// ```
    /// use lumina_config::{BackendConfig, LuminaConfigLoader};
    ///
    /// let config = LuminaConfigLoader::new()
    ///     .with_yaml_str("version: '1'\nbackend:\n  provider: canned")
    ///     .load()
    ///     .expect("valid config");
    ///
    /// assert_eq!(config.version.as_deref(), Some("1"));
    /// assert!(matches!(config.backend, BackendConfig::Canned));
    /// assert_eq!(config.fetch.timeout_secs, 30);
    /// ```
    pub fn new() -> Self {
        let builder =
            Config::builder().add_source(Environment::with_prefix("LUMINA").separator("__"));
        Self { builder }
    }

    /// Attach a YAML/TOML/JSON file; the `config` crate infers format by suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Allow tests/CLI to merge inline YAML snippets.
    ///
    /// ```
    /// use lumina_config::{BackendConfig, LuminaConfigLoader};
    ///
    /// unsafe { std::env::set_var("GEMINI_API_KEY", "injected-from-env"); }
    ///
    /// let config = LuminaConfigLoader::new()
    ///     .with_yaml_str(r#"
    /// version: "1"
    /// backend:
    ///   provider: "gemini"
    ///   model: "gemini-1.5-flash"
    ///   api_key: "${GEMINI_API_KEY}"
    /// "#)
    ///     .load()
    ///     .expect("valid configuration");
    ///
    /// match &config.backend {
    ///     BackendConfig::Gemini { model, api_key } => {
    ///         assert_eq!(model, "gemini-1.5-flash");
    ///         assert_eq!(api_key, "injected-from-env");
    ///     }
    ///     _ => panic!("expected Gemini configuration"),
    /// }
    ///
    /// unsafe { std::env::remove_var("GEMINI_API_KEY"); }
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, config::FileFormat::Yaml));
        self
    }

    /// Consume the builder and deserialize the merged sources into strongly
    /// typed config.
    pub fn load(self) -> Result<LuminaConfig, ConfigError> {
        let cfg = self.builder.build()?;

        // Convert to serde_json::Value first
        let mut v: Value = cfg.try_deserialize()?;
        // Recursively expand environment variables
        expand_env_in_value(&mut v);

        let typed: LuminaConfig =
            serde_json::from_value(v).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        Ok(typed)
    }
}
