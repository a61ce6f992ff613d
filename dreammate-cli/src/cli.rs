use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "dream-mate")]
#[command(about = "A conversation to discover your dream")]
#[command(version)]
pub struct Cli {
    /// Use plain terminal prompts instead of the full-screen interface
    #[arg(long)]
    pub plain: bool,

    /// How long Dream Mate "types" before each prompt, in milliseconds
    #[arg(long, value_name = "MS")]
    pub typing_delay_ms: Option<u64>,

    /// Directory exported journals are written to
    #[arg(long, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Configuration file to read instead of the default location
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log file, truncated on every run
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Print the effective configuration as TOML
    Config,
    /// List every section and its prompts
    Prompts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_starts_a_journey() {
        let cli = Cli::try_parse_from(["dream-mate"]).unwrap();
        assert!(!cli.plain);
        assert!(cli.command.is_none());
        assert!(cli.typing_delay_ms.is_none());
    }

    #[test]
    fn flags_are_parsed() {
        let cli = Cli::try_parse_from([
            "dream-mate",
            "--plain",
            "--typing-delay-ms",
            "0",
            "--export-dir",
            "journals",
            "--log-file",
            "dm.log",
        ])
        .unwrap();
        assert!(cli.plain);
        assert_eq!(cli.typing_delay_ms, Some(0));
        assert_eq!(cli.export_dir, Some(PathBuf::from("journals")));
        assert_eq!(cli.log_file, Some(PathBuf::from("dm.log")));
    }

    #[test]
    fn subcommands_are_parsed() {
        let cli = Cli::try_parse_from(["dream-mate", "prompts"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Prompts));

        let cli = Cli::try_parse_from(["dream-mate", "--config", "x.toml", "config"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Config));
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn rejects_non_numeric_delay() {
        assert!(Cli::try_parse_from(["dream-mate", "--typing-delay-ms", "soon"]).is_err());
    }
}
