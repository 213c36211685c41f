use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub carriers: CarriersConfig,
    #[serde(default)]
    pub printer: PrinterConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CarriersConfig {
    pub transmission: CarrierEndpoint,
    pub gls: CarrierEndpoint,
}

/// Credentials and root URL of one carrier API.
#[derive(Debug, Deserialize, Clone)]
pub struct CarrierEndpoint {
    pub root_url: String,
    pub user: String,
    pub password: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PrinterConfig {
    #[serde(default = "default_printer_port")]
    pub port: u16,
}

impl Default for PrinterConfig {
    fn default() -> Self {
        Self {
            port: default_printer_port(),
        }
    }
}

// Raw-socket port most label printers listen on.
fn default_printer_port() -> u16 {
    9100
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            // Start off by merging in the "default" configuration file
            .add_source(config::File::with_name("config/default"))
            // Layer the per-environment file on top; it is optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Local overrides, not checked in to git
            .add_source(config::File::with_name("config/local").required(false))
            // Finally environment variables with a TMS prefix,
            // e.g. `TMS__SERVER__PORT=8400`
            .add_source(config::Environment::with_prefix("TMS").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}
