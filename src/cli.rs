//! Command-line interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::core::ConfigOverrides;

/// MCP server exposing read-only KB Cloud resources.
#[derive(Parser, Debug)]
#[command(name = "kb-cloud-mcp-server", version, about)]
pub struct Cli {
    /// Config file (default: ./.kb-cloud-mcp-server.json, then $HOME/.kb-cloud-mcp-server.json).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// KB Cloud API key name.
    #[arg(long = "api-key", global = true, value_name = "NAME")]
    pub api_key: Option<String>,

    /// KB Cloud API key secret.
    #[arg(long = "api-secret", global = true, value_name = "SECRET")]
    pub api_secret: Option<String>,

    /// KB Cloud site URL.
    #[arg(long = "site-url", global = true, value_name = "URL")]
    pub site_url: Option<String>,

    /// Append JSON logs to this file instead of stderr.
    #[arg(long = "log-file", global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long = "log-level", global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Serve MCP over stdin/stdout.
    Stdio,
}

impl Cli {
    /// Flag values, as the last configuration layer.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config_file: self.config.clone(),
            api_key: self.api_key.clone(),
            api_secret: self.api_secret.clone(),
            site_url: self.site_url.clone(),
            log_file: self.log_file.clone(),
            log_level: self.log_level.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_stdio_with_flags() {
        let cli = Cli::try_parse_from([
            "kb-cloud-mcp-server",
            "--api-key",
            "key",
            "stdio",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(cli.command, Command::Stdio);
        let overrides = cli.overrides();
        assert_eq!(overrides.api_key.as_deref(), Some("key"));
        assert_eq!(overrides.log_level.as_deref(), Some("debug"));
        assert!(overrides.api_secret.is_none());
        assert!(overrides.config_file.is_none());
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["kb-cloud-mcp-server"]).is_err());
    }

    #[test]
    fn test_unknown_subcommand_rejected() {
        assert!(Cli::try_parse_from(["kb-cloud-mcp-server", "http"]).is_err());
    }
}
