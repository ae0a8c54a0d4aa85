//! Server configuration.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;

/// Environment variable naming the fare log.
pub const FARES_PATH_VAR: &str = "FARES_PATH";
/// Environment variable holding the HTTP port.
pub const PORT_VAR: &str = "PORT";
/// Environment variable that turns the command-line advisor off when `0` or `false`.
pub const ADVISOR_VAR: &str = "FARE_ADVISOR";

const DEFAULT_FARES_PATH: &str = "fares.csv";
const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid port {0:?}")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Durable fare log, replayed at startup
    pub fares_path: PathBuf,

    /// Address the HTTP server listens on
    pub addr: SocketAddr,

    /// Whether to run the interactive advisor on stdin
    pub advisor: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            fares_path: PathBuf::from(DEFAULT_FARES_PATH),
            addr: SocketAddr::from((Ipv4Addr::LOCALHOST, DEFAULT_PORT)),
            advisor: true,
        }
    }
}

impl ServerConfig {
    /// Build the configuration from the process arguments and environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_args_and_env(std::env::args().skip(1), |key| std::env::var(key).ok())
    }

    /// Build the configuration from `args` (program name already skipped)
    /// and an environment lookup.
    ///
    /// The first argument is the fare log path and the second the port.
    /// Either falls back to the environment, then to the default.
    pub fn from_args_and_env<I, F>(args: I, env: F) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = String>,
        F: Fn(&str) -> Option<String>,
    {
        let mut args = args.into_iter();
        let mut config = Self::default();

        if let Some(path) = args.next().or_else(|| env(FARES_PATH_VAR)) {
            config.fares_path = PathBuf::from(path);
        }

        if let Some(port) = args.next().or_else(|| env(PORT_VAR)) {
            let port = port
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
            config.addr.set_port(port);
        }

        if let Some(flag) = env(ADVISOR_VAR) {
            config.advisor = !matches!(flag.trim().to_ascii_lowercase().as_str(), "0" | "false");
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(args: &[&str], env: &[(&str, &str)]) -> Result<ServerConfig, ConfigError> {
        let env: HashMap<String, String> = env
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_args_and_env(args.iter().map(|a| a.to_string()), |key| {
            env.get(key).cloned()
        })
    }

    #[test]
    fn defaults() {
        let config = config(&[], &[]).unwrap();
        assert_eq!(config, ServerConfig::default());
        assert_eq!(config.fares_path, PathBuf::from("fares.csv"));
        assert_eq!(config.addr.to_string(), "127.0.0.1:3000");
        assert!(config.advisor);
    }

    #[test]
    fn positional_arguments() {
        let config = config(&["input-routes.csv", "8080"], &[]).unwrap();
        assert_eq!(config.fares_path, PathBuf::from("input-routes.csv"));
        assert_eq!(config.addr.port(), 8080);
    }

    #[test]
    fn environment_fallback() {
        let config = config(
            &[],
            &[
                (FARES_PATH_VAR, "/var/lib/fares.csv"),
                (PORT_VAR, "9000"),
                (ADVISOR_VAR, "false"),
            ],
        )
        .unwrap();
        assert_eq!(config.fares_path, PathBuf::from("/var/lib/fares.csv"));
        assert_eq!(config.addr.port(), 9000);
        assert!(!config.advisor);
    }

    #[test]
    fn arguments_win_over_environment() {
        let config = config(
            &["a.csv"],
            &[(FARES_PATH_VAR, "b.csv"), (PORT_VAR, "9000")],
        )
        .unwrap();
        assert_eq!(config.fares_path, PathBuf::from("a.csv"));
        assert_eq!(config.addr.port(), 9000);
    }

    #[test]
    fn advisor_flag_values() {
        assert!(!config(&[], &[(ADVISOR_VAR, "0")]).unwrap().advisor);
        assert!(!config(&[], &[(ADVISOR_VAR, "FALSE")]).unwrap().advisor);
        assert!(config(&[], &[(ADVISOR_VAR, "1")]).unwrap().advisor);
    }

    #[test]
    fn invalid_port() {
        assert_eq!(
            config(&["fares.csv", "http"], &[]),
            Err(ConfigError::InvalidPort("http".into()))
        );
        assert_eq!(
            config(&[], &[(PORT_VAR, "70000")]),
            Err(ConfigError::InvalidPort("70000".into()))
        );
    }
}
