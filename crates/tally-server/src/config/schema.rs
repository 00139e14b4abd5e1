use std::collections::HashSet;
use std::path::PathBuf;

use serde::Deserialize;
use tally_core::error::{Result, TallyError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub storage: StorageSection,

    #[serde(default)]
    pub counters: CountersSection,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            version: 1,
            server: ServerSection::default(),
            storage: StorageSection::default(),
            counters: CountersSection::default(),
        }
    }
}

impl ServiceConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(TallyError::BadConfig(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.server.validate()?;
        self.storage.validate()?;
        self.counters.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_service_name")]
    pub service_name: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            service_name: default_service_name(),
        }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(TallyError::BadConfig("server.port must not be 0".into()));
        }
        if self.host.is_empty() {
            return Err(TallyError::BadConfig("server.host must not be empty".into()));
        }
        Ok(())
    }

    /// Address handed to the listener. `host` may be an IP literal or a
    /// hostname; hostnames are resolved at bind time.
    pub fn bind_target(&self) -> (&str, u16) {
        (self.host.as_str(), self.port)
    }
}

fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_port() -> u16 {
    8000
}
fn default_service_name() -> String {
    "Mirth Compare Counter API".into()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageSection {
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
        }
    }
}

impl StorageSection {
    pub fn validate(&self) -> Result<()> {
        if self.snapshot_path.as_os_str().is_empty() {
            return Err(TallyError::BadConfig(
                "storage.snapshot_path must not be empty".into(),
            ));
        }
        Ok(())
    }
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("counters.json")
}

/// Counter names exposed as `/api/{name}/hit` and `/api/{name}/get`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CountersSection {
    #[serde(default = "default_counter_names")]
    pub names: Vec<String>,
}

impl Default for CountersSection {
    fn default() -> Self {
        Self {
            names: default_counter_names(),
        }
    }
}

impl CountersSection {
    pub fn validate(&self) -> Result<()> {
        if self.names.is_empty() {
            return Err(TallyError::BadConfig("counters.names must not be empty".into()));
        }
        let mut seen = HashSet::new();
        for name in &self.names {
            let ok = !name.is_empty()
                && name
                    .bytes()
                    .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-');
            if !ok {
                return Err(TallyError::BadConfig(format!(
                    "counters.names: invalid counter name {name:?} (allowed: a-z 0-9 _ -)"
                )));
            }
            if !seen.insert(name.as_str()) {
                return Err(TallyError::BadConfig(format!(
                    "counters.names: duplicate counter name {name:?}"
                )));
            }
        }
        Ok(())
    }
}

fn default_counter_names() -> Vec<String> {
    vec!["visitas".into(), "descargas".into()]
}
