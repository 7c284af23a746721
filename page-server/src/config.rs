//! Server configuration.

use std::path::PathBuf;

use clap::Parser;
use page_core::history::DEFAULT_HISTORY_LIMIT;
use page_core::TrustPolicy;

/// Default port for the page server.
pub const DEFAULT_PORT: u16 = 9474;

/// Command-line arguments for the pagecraft server.
#[derive(Debug, Clone, Parser)]
#[command(name = "pagecraft")]
#[command(about = "Pagecraft page builder server")]
#[command(version)]
pub struct CliArgs {
    /// Port to listen on (localhost only)
    #[arg(long, env = "PAGECRAFT_PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Directory for page JSON files; pages are kept in memory only if unset
    #[arg(long, env = "PAGECRAFT_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Whether rendered pages may contain raw HTML and custom CSS
    #[arg(long, env = "PAGECRAFT_TRUST", default_value = "untrusted")]
    pub trust: TrustPolicy,

    /// Undo history length handed to editor sessions
    #[arg(long, env = "PAGECRAFT_HISTORY_LIMIT", default_value_t = DEFAULT_HISTORY_LIMIT)]
    pub history_limit: usize,
}

/// Resolved server configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Listen port.
    pub port: u16,
    /// Persistence directory.
    pub data_dir: Option<PathBuf>,
    /// Trust policy for rendered output.
    pub trust: TrustPolicy,
    /// Editor undo history length.
    pub history_limit: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_dir: None,
            trust: TrustPolicy::Untrusted,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl From<CliArgs> for ServerConfig {
    fn from(args: CliArgs) -> Self {
        Self {
            port: args.port,
            data_dir: args.data_dir,
            trust: args.trust,
            history_limit: args.history_limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let args = CliArgs::try_parse_from(["pagecraft"]).expect("parse");
        let config = ServerConfig::from(args);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.trust, TrustPolicy::Untrusted);
        assert!(config.data_dir.is_none());
    }

    #[test]
    fn test_cli_overrides() {
        let args = CliArgs::try_parse_from([
            "pagecraft",
            "--port",
            "8100",
            "--trust",
            "trusted",
            "--data-dir",
            "/tmp/pages",
            "--history-limit",
            "20",
        ])
        .expect("parse");
        let config = ServerConfig::from(args);
        assert_eq!(config.port, 8100);
        assert_eq!(config.trust, TrustPolicy::Trusted);
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/pages")));
        assert_eq!(config.history_limit, 20);
    }

    #[test]
    fn test_cli_rejects_bad_trust() {
        assert!(CliArgs::try_parse_from(["pagecraft", "--trust", "sometimes"]).is_err());
    }
}
