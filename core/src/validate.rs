//! Target and port validation.
//!
//! # Design
//! Patterns are configuration, not constants, so one process can run several
//! policies and tests can build their own. The defaults keep the restrictive
//! `8080`-only port rule. The ip-address default escapes its dots; the
//! unescaped legacy form `[0-9]+.[0-9]+.[0-9]+` still works if configured,
//! along with everything it accepts.

use regex::Regex;
use serde::Deserialize;

use crate::endpoint::Endpoint;
use crate::error::ValidationError;

/// Patterns used by `TargetValidator`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ValidatorConfig {
    #[serde(default = "default_hostname_pattern")]
    pub hostname_pattern: String,
    #[serde(default = "default_ip_address_pattern")]
    pub ip_address_pattern: String,
    #[serde(default = "default_port_pattern")]
    pub port_pattern: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            hostname_pattern: default_hostname_pattern(),
            ip_address_pattern: default_ip_address_pattern(),
            port_pattern: default_port_pattern(),
        }
    }
}

fn default_hostname_pattern() -> String {
    r"\.[a-z]+$".to_string()
}

fn default_ip_address_pattern() -> String {
    r"^[0-9]+\.[0-9]+\.[0-9]+\.[0-9]+$".to_string()
}

fn default_port_pattern() -> String {
    "^8080$".to_string()
}

/// Compiled form of a `ValidatorConfig`.
#[derive(Debug, Clone)]
pub struct TargetValidator {
    hostname: Regex,
    ip_address: Regex,
    port: Regex,
}

impl TargetValidator {
    pub fn new(config: &ValidatorConfig) -> Result<Self, ValidationError> {
        Ok(Self {
            hostname: compile(&config.hostname_pattern)?,
            ip_address: compile(&config.ip_address_pattern)?,
            port: compile(&config.port_pattern)?,
        })
    }

    /// Check `host` and `port` and produce the endpoint to dial.
    ///
    /// The host passes if it matches either the hostname or the ip-address
    /// pattern. The target is checked before the port.
    pub fn validate(&self, host: &str, port: &str) -> Result<Endpoint, ValidationError> {
        if !self.hostname.is_match(host) && !self.ip_address.is_match(host) {
            return Err(ValidationError::InvalidTarget);
        }
        if !self.port.is_match(port) {
            return Err(ValidationError::InvalidPort);
        }
        Ok(Endpoint::new(host, port))
    }
}

fn compile(pattern: &str) -> Result<Regex, ValidationError> {
    Regex::new(pattern).map_err(|e| ValidationError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: e.to_string(),
    })
}
