use std::path::PathBuf;
use clap::Parser;

#[derive(Clone, Debug, Eq, Parser, PartialEq)]
#[command(version, author, about)]
pub struct CliConfig {
    /// TOML file layered over the built-in defaults; `EXTREMENOTES_*`
    /// environment variables take precedence over it.
    #[arg(long)]
    pub config_file: Option<PathBuf>,
}
