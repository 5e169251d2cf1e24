//! Layered settings.
//!
//! Sources, lowest precedence first:
//!
//! 1. built-in defaults,
//! 2. an optional `kiosk.toml` (or `.json`, `.yaml`, … by extension),
//! 3. `KIOSK_*` environment variables, with `__` between nested keys:
//!    `KIOSK_SERVER__PORT=9000`, `KIOSK_ENDPOINTS__PUBLIC_IP=http://…`.

use config::{Config, ConfigError, Environment, File, Map};
use serde::Deserialize;

pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 8000;

pub const IPIFY_URL: &str = "https://api.ipify.org";
pub const BARCELONA_STATION_INFORMATION_URL: &str =
    "https://barcelona.publicbikesystem.net/customer/gbfs/v2/en/station_information";
pub const CITYBIKES_URL: &str = "https://api.citybik.es/v2";

/// Everything the service and its clients read at startup.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub server: ServerConfig,
    pub endpoints: Endpoints,
}

/// Where the IP-echo server listens.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Base URLs of the public services the clients talk to.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Endpoints {
    pub public_ip: String,
    pub gbfs_station_information: String,
    pub citybikes: String,
}

impl Settings {
    /// Loads `kiosk.*` from the working directory (if present) and the
    /// process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("kiosk", env_source(None))
    }

    fn load_from(file: &str, env: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("endpoints.public_ip", IPIFY_URL)?
            .set_default("endpoints.gbfs_station_information", BARCELONA_STATION_INFORMATION_URL)?
            .set_default("endpoints.citybikes", CITYBIKES_URL)?
            .add_source(File::with_name(file).required(false))
            .add_source(env)
            .build()?
            .try_deserialize()
    }
}

fn env_source(vars: Option<Map<String, String>>) -> Environment {
    Environment::with_prefix("KIOSK")
        .prefix_separator("_")
        .separator("__")
        .source(vars)
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self { host: host.into(), port }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            public_ip: IPIFY_URL.to_owned(),
            gbfs_station_information: BARCELONA_STATION_INFORMATION_URL.to_owned(),
            citybikes: CITYBIKES_URL.to_owned(),
        }
    }
}
