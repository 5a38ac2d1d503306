//! Runtime configuration loaded from environment variables.
//!
//! - `AGENT_RESULT_STYLE` = `pretty` (default) | `compact`
//! - `AGENT_LOG_LEVEL`    = level for the agent crates (default `warn`)
//! - `AGENT_SPINNER`      = show the loading spinner (default `true`)
//!
//! The backend address is fixed and deliberately absent from this list.

use std::str::FromStr;

use ask_client::error_handler::{ConfigError, env_opt, env_opt_bool};
use tracing::Level;

use crate::cli::Cli;

/// How JSON results are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultStyle {
    #[default]
    Pretty,
    Compact,
}

impl FromStr for ResultStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            other => Err(ConfigError::UnsupportedValue {
                var: "AGENT_RESULT_STYLE",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub result_style: ResultStyle,
    pub log_level: Level,
    pub spinner: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            result_style: ResultStyle::Pretty,
            log_level: Level::WARN,
            spinner: true,
        }
    }
}

impl AgentConfig {
    /// Build from environment variables; unset variables keep their defaults.
    ///
    /// # Errors
    /// [`ConfigError::UnsupportedValue`] for a set but unrecognised value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(
            env_opt("AGENT_RESULT_STYLE"),
            env_opt("AGENT_LOG_LEVEL"),
            env_opt_bool("AGENT_SPINNER")?,
        )
    }

    fn from_lookup(
        style: Option<String>,
        level: Option<String>,
        spinner: Option<bool>,
    ) -> Result<Self, ConfigError> {
        let dflt = Self::default();

        let result_style = match style {
            Some(s) => s.parse()?,
            None => dflt.result_style,
        };
        let log_level = match level {
            Some(l) => l.parse::<Level>().map_err(|_| ConfigError::UnsupportedValue {
                var: "AGENT_LOG_LEVEL",
                value: l,
            })?,
            None => dflt.log_level,
        };

        Ok(Self {
            result_style,
            log_level,
            spinner: spinner.unwrap_or(dflt.spinner),
        })
    }

    /// Command-line flags win over the environment.
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if cli.compact {
            self.result_style = ResultStyle::Compact;
        }
        if cli.no_spinner {
            self.spinner = false;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let cfg = AgentConfig::from_lookup(None, None, None).unwrap();
        assert_eq!(cfg.result_style, ResultStyle::Pretty);
        assert_eq!(cfg.log_level, Level::WARN);
        assert!(cfg.spinner);
    }

    #[test]
    fn parses_values() {
        let cfg = AgentConfig::from_lookup(Some("Compact".into()), Some("debug".into()), Some(false))
            .unwrap();
        assert_eq!(cfg.result_style, ResultStyle::Compact);
        assert_eq!(cfg.log_level, Level::DEBUG);
        assert!(!cfg.spinner);
    }

    #[test]
    fn rejects_unknown_style() {
        let err = AgentConfig::from_lookup(Some("fancy".into()), None, None).unwrap_err();
        assert!(err.to_string().contains("AGENT_RESULT_STYLE"));
    }

    #[test]
    fn cli_overrides_env() {
        let cli = Cli {
            query: None,
            compact: true,
            no_spinner: true,
        };
        let cfg = AgentConfig::default().with_cli(&cli);
        assert_eq!(cfg.result_style, ResultStyle::Compact);
        assert!(!cfg.spinner);
    }
}
