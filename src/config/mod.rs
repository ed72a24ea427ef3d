//! Configuration module for sqlgen.
//!
//! Handles the generator config file and environment variable expansion.

mod settings;

pub use settings::{
    expand_env_vars, GeneratorSettings, Settings, SettingsError, CONFIG_ENV, LOCAL_CONFIG,
};
