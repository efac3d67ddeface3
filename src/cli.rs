//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Output directory used when `--output` is not given.
pub const DEFAULT_OUTPUT_DIR: &str = "newshelf-out";

/// Render a "new books" cover grid for a library catalog.
///
/// Fetches titles added in the last days, looks up a cover for each and
/// writes a static page (index.html plus covers/) into the output
/// directory. Options left unset fall back to the config file, then to
/// built-in defaults.
#[derive(Parser, Debug)]
#[command(name = "newshelf")]
#[command(author, version, about)]
pub struct Args {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,

    /// Directory the page is written to
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output: PathBuf,

    /// Config file (default: $XDG_CONFIG_HOME/newshelf/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// API client id
    #[arg(long, env = "NEWSHELF_CLIENT_ID", hide_env_values = true)]
    pub client_id: Option<String>,

    /// API client secret
    #[arg(long, env = "NEWSHELF_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// Maximum titles requested from the catalog (1-50)
    #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..=50))]
    pub limit: Option<u32>,

    /// Only titles added within this many days (1-365)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=365))]
    pub lookback_days: Option<u32>,

    /// Grid rows (1-100)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..=100))]
    pub rows: Option<u16>,

    /// Grid columns (1-100)
    #[arg(long, value_parser = clap::value_parser!(u16).range(1..=100))]
    pub columns: Option<u16>,

    /// Skip the primary cover lookup and use only the secondary service
    #[arg(long)]
    pub secondary_only: bool,

    /// Records whose covers are resolved at once (1-16)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=16))]
    pub cover_concurrency: Option<u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_args_parses_successfully() {
        let args = Args::try_parse_from(["newshelf"]).unwrap();
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
        assert_eq!(args.output, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert!(args.config.is_none());
        assert!(args.limit.is_none());
        assert!(!args.secondary_only);
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["newshelf", "-v"]).unwrap();
        assert_eq!(args.verbose, 1);

        let args = Args::try_parse_from(["newshelf", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_quiet_flag_sets_quiet() {
        let args = Args::try_parse_from(["newshelf", "--quiet"]).unwrap();
        assert!(args.quiet);
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        let err = Args::try_parse_from(["newshelf", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_invalid_flag_returns_error() {
        let err = Args::try_parse_from(["newshelf", "--invalid-flag"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_cli_grid_and_limit_flags() {
        let args = Args::try_parse_from([
            "newshelf", "--rows", "8", "--columns", "6", "-n", "48", "-o", "/tmp/site",
        ])
        .unwrap();
        assert_eq!(args.rows, Some(8));
        assert_eq!(args.columns, Some(6));
        assert_eq!(args.limit, Some(48));
        assert_eq!(args.output, PathBuf::from("/tmp/site"));
    }

    #[test]
    fn test_cli_limit_above_max_rejected() {
        let err = Args::try_parse_from(["newshelf", "--limit", "51"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_zero_columns_rejected() {
        let err = Args::try_parse_from(["newshelf", "--columns", "0"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_credentials_flags() {
        let args = Args::try_parse_from([
            "newshelf",
            "--client-id",
            "id",
            "--client-secret",
            "secret",
        ])
        .unwrap();
        assert_eq!(args.client_id.as_deref(), Some("id"));
        assert_eq!(args.client_secret.as_deref(), Some("secret"));
    }

    #[test]
    fn test_cli_secondary_only_and_concurrency() {
        let args =
            Args::try_parse_from(["newshelf", "--secondary-only", "--cover-concurrency", "4"])
                .unwrap();
        assert!(args.secondary_only);
        assert_eq!(args.cover_concurrency, Some(4));
    }
}
