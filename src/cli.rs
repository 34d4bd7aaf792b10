//! Command-line options
//!
//! Every option is optional here; defaults live in the config layer so a
//! config file can still set what the command line leaves out.

use clap::{ArgAction, Parser};

#[derive(Debug, Parser)]
#[command(
    name = "notes-server",
    version,
    about = "HTTP service storing plain-text notes as files",
    disable_help_flag = true
)]
pub struct Cli {
    /// Address of the server [default: 0.0.0.0]
    #[arg(short = 'h', long)]
    pub host: Option<String>,

    /// Port of the server [default: 3000]
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Path to cache directory [default: cache]
    #[arg(short, long, value_name = "PATH")]
    pub cache: Option<String>,

    /// Upload form served at /UploadForm.html [default: UploadForm.html]
    #[arg(long, value_name = "PATH")]
    pub form: Option<String>,

    /// Configuration file, extension optional; missing is fine
    #[arg(long, value_name = "PATH", default_value = "config")]
    pub config: String,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_flags() {
        let cli = Cli::parse_from(["notes-server", "-h", "localhost", "-p", "8080", "-c", "notes"]);
        assert_eq!(cli.host.as_deref(), Some("localhost"));
        assert_eq!(cli.port, Some(8080));
        assert_eq!(cli.cache.as_deref(), Some("notes"));
        assert_eq!(cli.config, "config");
    }

    #[test]
    fn test_nothing_given() {
        let cli = Cli::parse_from(["notes-server"]);
        assert!(cli.host.is_none());
        assert!(cli.port.is_none());
        assert!(cli.cache.is_none());
        assert!(cli.form.is_none());
    }

    #[test]
    fn test_invalid_port() {
        assert!(Cli::try_parse_from(["notes-server", "--port", "99999"]).is_err());
    }

    #[test]
    fn test_command_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
