use std::path::PathBuf;
use clap::{Parser, Subcommand};
use extremenotes::bin_constants::{DEFAULT_API_URL, DEFAULT_TOKEN_FILE};
use time::macros::format_description;
use time::Date;

#[derive(Clone, Debug, Eq, Parser, PartialEq)]
#[command(version, author, about)]
pub struct CliConfig {
    #[arg(long, env = "EXTREMENOTES_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Where the session token is kept between runs.
    #[arg(long, env = "EXTREMENOTES_TOKEN_FILE", default_value = DEFAULT_TOKEN_FILE)]
    pub token_file: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Clone, Debug, Eq, PartialEq, Subcommand)]
pub enum Command {
    Login {
        username: String,

        /// Asked for on the terminal when not given.
        #[arg(long, env = "EXTREMENOTES_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    Logout,

    List {
        /// Case-insensitive part of the sport name.
        #[arg(long)]
        sport: Option<String>,

        /// Creation day in UTC, YYYY-MM-DD.
        #[arg(long, value_parser = parse_date)]
        date: Option<Date>,

        #[arg(long, default_value_t = 1)]
        page: usize,
    },

    Show {
        id: String,
    },

    Create {
        #[arg(long)]
        title: String,

        #[arg(long)]
        content: Option<String>,

        #[arg(long)]
        sport: Option<String>,
    },

    /// Only the given fields change; pass an empty string to clear one.
    Edit {
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        content: Option<String>,

        #[arg(long)]
        sport: Option<String>,
    },

    Delete {
        id: String,
    },
}

fn parse_date(value: &str) -> Result<Date, time::error::Parse> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
}
