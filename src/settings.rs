use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::error::{Result, ServiceControlError, SettingsSource};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(60_000);

/// Settings for the `install` verb of a Topshelf-style executable.
///
/// Every string field is optional; empty or whitespace-only values are
/// treated as absent when the command line is rendered. Loaded from JSON
/// with camelCase keys, e.g. `{"instanceName": "A", "autostart": true, "timeoutMs": 5000}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceSettings {
    pub username: String,
    pub password: String,
    pub instance_name: String,
    /// `--autostart` when set, `--manual` otherwise.
    pub autostart: bool,
    pub disabled: bool,
    pub delayed_start: bool,
    pub run_as_local_system: bool,
    pub run_as_local_service: bool,
    pub run_as_network_service: bool,
    pub service_name: String,
    pub description: String,
    pub display_name: String,
    #[serde(rename = "timeoutMs", deserialize_with = "duration_from_millis")]
    pub timeout: Duration,
    /// Pre-built fragment the structured flags are appended to.
    pub extra_arguments: Option<String>,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            instance_name: String::new(),
            autostart: false,
            disabled: false,
            delayed_start: false,
            run_as_local_system: false,
            run_as_local_service: false,
            run_as_network_service: false,
            service_name: String::new(),
            description: String::new(),
            display_name: String::new(),
            timeout: DEFAULT_TIMEOUT,
            extra_arguments: None,
        }
    }
}

impl ServiceSettings {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let settings_error = |source: SettingsSource| ServiceControlError::Settings {
            path: path.to_path_buf(),
            source,
        };
        let contents = fs::read_to_string(path).map_err(|e| settings_error(e.into()))?;
        serde_json::from_str(&contents).map_err(|e| settings_error(e.into()))
    }
}

/// Options for the verbs that take no settings: uninstall, start and stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationOptions {
    /// Instance name appended after the verb. Default: none.
    pub instance_name: Option<String>,
    /// How long to wait for the executable to exit. Default: 60 seconds.
    pub timeout: Duration,
}

impl Default for OperationOptions {
    fn default() -> Self {
        Self {
            instance_name: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl OperationOptions {
    pub fn with_instance(mut self, instance_name: impl Into<String>) -> Self {
        self.instance_name = Some(instance_name.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Install,
    Uninstall,
    Start,
    Stop,
}

impl Operation {
    pub fn verb(&self) -> &'static str {
        match self {
            Operation::Install => "install",
            Operation::Uninstall => "uninstall",
            Operation::Start => "start",
            Operation::Stop => "stop",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.verb())
    }
}

fn duration_from_millis<'de, D>(deserializer: D) -> std::result::Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_millis)
}
