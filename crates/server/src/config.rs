use std::net::SocketAddr;

use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:5000";

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ServerConfigError {
    #[error("invalid QUIZ_BIND_ADDR `{raw}`: {source}")]
    InvalidBindAddr {
        raw: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Read `QUIZ_BIND_ADDR` from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ServerConfigError` when the address does not parse.
    pub fn from_env() -> Result<Self, ServerConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// # Errors
    ///
    /// Returns `ServerConfigError` when the address does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ServerConfigError> {
        let raw = lookup("QUIZ_BIND_ADDR")
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
        let bind_addr = raw
            .trim()
            .parse()
            .map_err(|source| ServerConfigError::InvalidBindAddr { raw, source })?;
        Ok(Self { bind_addr })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_local_port_5000() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.bind_addr.to_string(), DEFAULT_BIND_ADDR);
    }

    #[test]
    fn rejects_garbage_address() {
        let err = ServerConfig::from_lookup(|_| Some("nowhere".into())).unwrap_err();
        assert!(matches!(err, ServerConfigError::InvalidBindAddr { .. }));
    }
}
