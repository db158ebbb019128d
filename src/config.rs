//! Runtime configuration.
//!
//! Settings are read from `LEAVE_*` environment variables once at
//! startup.  Every variable is optional.

use crate::engine::LeavePolicy;
use crate::error::LeaveError;
use crate::quota::ConsumptionBasis;
use std::net::SocketAddr;

pub const BIND_ADDR_VAR: &str = "LEAVE_BIND_ADDR";
pub const LOG_VAR: &str = "LEAVE_LOG";
pub const LOG_FORMAT_VAR: &str = "LEAVE_LOG_FORMAT";
pub const TRAILING_MONTH_BASIS_VAR: &str = "LEAVE_TRAILING_MONTH_BASIS";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_LOG: &str = "info";

/// Output format for log events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    /// `tracing_subscriber::EnvFilter` directive, e.g. `info` or
    /// `leave_engine=debug`.
    pub log_filter: String,
    pub log_format: LogFormat,
    pub policy: LeavePolicy,
}

impl Settings {
    pub fn from_env() -> Result<Self, LeaveError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LeaveError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_raw = lookup(BIND_ADDR_VAR).unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw
            .parse::<SocketAddr>()
            .map_err(|e| LeaveError::InvalidConfig {
                key: BIND_ADDR_VAR,
                value: bind_raw.clone(),
                reason: e.to_string(),
            })?;

        let log_filter = lookup(LOG_VAR)
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG.to_string());

        let log_format = match lookup(LOG_FORMAT_VAR) {
            None => LogFormat::default(),
            Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
                "pretty" | "" => LogFormat::Pretty,
                "json" => LogFormat::Json,
                _ => {
                    return Err(LeaveError::InvalidConfig {
                        key: LOG_FORMAT_VAR,
                        value: raw,
                        reason: "expected pretty or json".to_string(),
                    })
                }
            },
        };

        let trailing_month_basis = match lookup(TRAILING_MONTH_BASIS_VAR) {
            None => ConsumptionBasis::default(),
            Some(raw) => raw
                .parse::<ConsumptionBasis>()
                .map_err(|reason| LeaveError::InvalidConfig {
                    key: TRAILING_MONTH_BASIS_VAR,
                    value: raw.clone(),
                    reason,
                })?,
        };

        Ok(Self {
            bind_addr,
            log_filter,
            log_format,
            policy: LeavePolicy {
                trailing_month_basis,
            },
        })
    }
}
