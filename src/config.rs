//! Configuration module for the surfacemap scanner

use crate::scanner::{MAX_PORT, MIN_PORT};
use crate::ScanError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default number of concurrent probe workers
pub const DEFAULT_THREADS: usize = 200;

/// Default per-probe connect timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 500;

const CONFIG_FILE_NAME: &str = ".surfacemap.toml";

/// Main configuration structure for scanning operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Number of concurrent probe workers
    pub threads: usize,

    /// Timeout for each connection attempt in milliseconds
    pub timeout: u64,

    /// First port of the scanned range (inclusive)
    pub start_port: u16,

    /// Last port of the scanned range (inclusive)
    pub end_port: u16,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            threads: DEFAULT_THREADS,
            timeout: DEFAULT_TIMEOUT_MS,
            start_port: 1,
            end_port: 1024,
        }
    }
}

impl ScanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of workers
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Set the timeout in milliseconds
    pub fn with_timeout(mut self, timeout: u64) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the inclusive port range
    pub fn with_ports(mut self, start_port: u16, end_port: u16) -> Self {
        self.start_port = start_port;
        self.end_port = end_port;
        self
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_millis(self.timeout)
    }

    /// Number of ports the configured range covers
    pub fn port_count(&self) -> usize {
        if self.end_port < self.start_port {
            0
        } else {
            (self.end_port - self.start_port) as usize + 1
        }
    }

    /// Load configuration from TOML file
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ScanError::ConfigError(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let config: ScanConfig = toml::from_str(&content)
            .map_err(|e| ScanError::ConfigError(format!("Failed to parse TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Location of the per-user config file
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from `~/.surfacemap.toml`, falling back to defaults
    pub fn load_default_config() -> Self {
        let path = match Self::default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Self::default(),
        };

        match Self::from_toml_file(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> crate::Result<()> {
        if self.threads == 0 {
            return Err(ScanError::ConfigError("Thread count must be greater than 0".to_string()));
        }

        if self.timeout == 0 {
            return Err(ScanError::ConfigError("Timeout must be greater than 0 ms".to_string()));
        }

        if self.start_port < MIN_PORT {
            return Err(ScanError::PortRangeError(format!(
                "start_port must be >= {}",
                MIN_PORT
            )));
        }

        // u16 already caps end_port at MAX_PORT
        debug_assert!(self.end_port <= MAX_PORT);

        if self.start_port > self.end_port {
            return Err(ScanError::PortRangeError(format!(
                "start_port ({}) must not exceed end_port ({})",
                self.start_port, self.end_port
            )));
        }

        Ok(())
    }
}
