use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::template::{RegistryOptions, DEFAULT_EXTENSION, DEFAULT_VIEW_LOCATIONS};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub templates: TemplatesConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TemplatesConfig {
    /// Template root directory (defaults to the working directory)
    pub root: Option<String>,
    /// Template file extension, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,
    /// Search-path location formats, `{0}` is the view name
    #[serde(default = "default_view_locations")]
    pub view_locations: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

fn default_view_locations() -> Vec<String> {
    DEFAULT_VIEW_LOCATIONS.iter().map(|s| s.to_string()).collect()
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        // Load .env file if exists
        let _ = dotenvy::dotenv();

        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", i64::from(default_port()))?
            .set_default("templates.extension", default_extension())?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // SERVER_HOST, SERVER_PORT, TEMPLATES_ROOT, TEMPLATES_EXTENSION
            .add_source(Environment::default().separator("_").try_parsing(true))
            // The "_" separator would nest this one as templates.view.locations
            .set_override_option(
                "templates.view_locations",
                env::var("TEMPLATES_VIEW_LOCATIONS")
                    .ok()
                    .map(|value| split_list(&value)),
            )?;

        builder.build()?.try_deserialize()
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// Split a comma-separated env value, dropping blank entries
fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

impl TemplatesConfig {
    pub fn registry_options(&self) -> RegistryOptions {
        RegistryOptions {
            root: self
                .root
                .as_deref()
                .filter(|root| !root.is_empty())
                .map(PathBuf::from),
            extension: self.extension.trim_start_matches('.').to_string(),
            view_locations: self.view_locations.clone(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            root: None,
            extension: default_extension(),
            view_locations: default_view_locations(),
        }
    }
}
