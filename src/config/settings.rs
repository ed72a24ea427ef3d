//! TOML-based configuration for sqlgen.
//!
//! Supports a config file (sqlgen.toml) with environment variable expansion
//! in `runtime_path`.
//!
//! Example configuration:
//! ```toml
//! [generator]
//! dialect = "postgres"
//! runtime_path = "${DB_RUNTIME}"
//! indent_width = 4
//! use_tabs = false
//! unsupported = "error"
//! output_dir = "src/gen"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::compile::CompileOptions;
use crate::dsl::UnsupportedPolicy;
use crate::emitter::{Indent, DEFAULT_RUNTIME_PATH};
use crate::sql::Dialect;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "SQLGEN_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG: &str = "sqlgen.toml";

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Code generation settings.
    pub generator: GeneratorSettings,
}

/// Code generation settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// SQL dialect for rendered statements.
    pub dialect: Dialect,

    /// Path generated code imports the runtime from (supports ${ENV_VAR}).
    pub runtime_path: String,

    /// Spaces per indentation level.
    pub indent_width: usize,

    /// Indent with tabs instead of spaces.
    pub use_tabs: bool,

    /// What to do with calls outside the builder vocabulary.
    pub unsupported: UnsupportedPolicy,

    /// Output directory used when the CLI gets none.
    pub output_dir: Option<PathBuf>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            dialect: Dialect::default(),
            runtime_path: DEFAULT_RUNTIME_PATH.to_string(),
            indent_width: 4,
            use_tabs: false,
            unsupported: UnsupportedPolicy::default(),
            output_dir: None,
        }
    }
}

impl GeneratorSettings {
    pub fn indent(&self) -> Indent {
        if self.use_tabs {
            Indent::Tabs
        } else {
            Indent::Spaces(self.indent_width)
        }
    }

    /// Runtime path with environment variables expanded.
    pub fn resolved_runtime_path(&self) -> Result<String, SettingsError> {
        let path = expand_env_vars(&self.runtime_path)?;
        if syn::parse_str::<syn::Path>(&path).is_err() {
            return Err(SettingsError::InvalidConfig(format!(
                "runtime_path `{}` is not a Rust path",
                path
            )));
        }
        Ok(path)
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `SQLGEN_CONFIG`
    /// 2. `./sqlgen.toml`
    /// 3. `~/.config/sqlgen/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        // Check environment variable first
        if let Ok(path) = env::var(CONFIG_ENV) {
            return Self::from_file(&path);
        }

        // Check local directory
        let local_config = PathBuf::from(LOCAL_CONFIG);
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        // Check user config directory
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("sqlgen").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        // Return defaults if no config file found
        Ok(Settings::default())
    }

    /// Compile options described by these settings.
    pub fn compile_options(&self) -> Result<CompileOptions, SettingsError> {
        let generator = &self.generator;
        Ok(CompileOptions::default()
            .with_dialect(generator.dialect)
            .with_unsupported(generator.unsupported)
            .with_runtime_path(generator.resolved_runtime_path()?)
            .with_indent(generator.indent()))
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }
        let mut var_name = String::new();
        if chars.peek() == Some(&'{') {
            chars.next(); // consume '{'
            for ch in chars.by_ref() {
                if ch == '}' {
                    break;
                }
                var_name.push(ch);
            }
        } else {
            // $VAR (ends at non-alphanumeric/underscore)
            while let Some(ch) = chars.next_if(|ch| ch.is_alphanumeric() || *ch == '_') {
                var_name.push(ch);
            }
            if var_name.is_empty() {
                // Just a lone $, keep it
                result.push('$');
                continue;
            }
        }
        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
