use camino::Utf8PathBuf;
use clap::builder::NonEmptyStringValueParser;
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, ValueEnum};
use core::fmt;
use reqwest::Url;

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

/// Default organization whose members are tracked
pub const DEFAULT_MEMBERS_URL: &str = "https://api.github.com/orgs/ufcg-lsd/members";

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Process configuration, from the command line or the environment
#[derive(Parser)]
#[command(name = "org-pulse", author, version, long_about = None)]
#[command(about = "Track daily commit and push activity across a GitHub organization")]
#[command(styles = CLAP_STYLES)]
pub struct Config {
    /// GitHub access token used for every API request
    #[arg(long, value_name = "TOKEN", env = "ACCESS_TOKEN", hide_env_values = true, value_parser = NonEmptyStringValueParser::new())]
    pub access_token: String,

    /// Port the static file server listens on
    #[arg(long, value_name = "PORT", env = "PORT")]
    pub port: u16,

    /// Organization members endpoint
    #[arg(long, value_name = "URL", env = "MEMBERS_URL", default_value = DEFAULT_MEMBERS_URL, value_parser = Url::parse)]
    pub members_url: Url,

    /// Directory holding the series files, served over HTTP
    #[arg(long, value_name = "PATH", env = "ASSETS_DIR", default_value = "assets")]
    pub assets_dir: Utf8PathBuf,

    /// File where per-user etags are kept between cycles
    #[arg(long, value_name = "PATH", env = "ETAGS_PATH", default_value = "etags.json")]
    pub etags_path: Utf8PathBuf,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    pub log_level: LogLevel,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("access_token", &"<redacted>")
            .field("port", &self.port)
            .field("members_url", &self.members_url.as_str())
            .field("assets_dir", &self.assets_dir)
            .field("etags_path", &self.etags_path)
            .field("log_level", &self.log_level)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["org-pulse", "--access-token", "secret", "--port", "8080"]).unwrap();

        assert_eq!(config.access_token, "secret");
        assert_eq!(config.port, 8080);
        assert_eq!(config.members_url.as_str(), DEFAULT_MEMBERS_URL);
        assert_eq!(config.assets_dir, "assets");
        assert_eq!(config.etags_path, "etags.json");
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_overrides() {
        let config = Config::try_parse_from([
            "org-pulse",
            "--access-token",
            "secret",
            "--port",
            "9000",
            "--members-url",
            "http://localhost/orgs/acme/members",
            "--assets-dir",
            "/srv/pulse",
            "--etags-path",
            "/var/lib/pulse/etags.json",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(config.members_url.as_str(), "http://localhost/orgs/acme/members");
        assert_eq!(config.assets_dir, "/srv/pulse");
        assert_eq!(config.etags_path, "/var/lib/pulse/etags.json");
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_empty_token_is_rejected() {
        let _ = Config::try_parse_from(["org-pulse", "--access-token", "", "--port", "8080"]).unwrap_err();
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let _ = Config::try_parse_from(["org-pulse", "--access-token", "secret", "--port", "http"]).unwrap_err();
    }

    #[test]
    fn test_invalid_members_url_is_rejected() {
        let result = Config::try_parse_from([
            "org-pulse",
            "--access-token",
            "secret",
            "--port",
            "8080",
            "--members-url",
            "not a url at all",
        ]);

        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = Config::try_parse_from(["org-pulse", "--access-token", "hunter2", "--port", "8080"]).unwrap();
        let debug = format!("{config:?}");

        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_command_is_well_formed() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
