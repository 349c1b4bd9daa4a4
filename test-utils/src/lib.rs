mod background_reader;
mod constants;
mod daemon;
mod kill_on_drop;
mod kill_term;
mod mock;
mod ports;
mod reqwest;

pub use background_reader::{BackgroundReader, BackgroundReaderError};
pub use constants::ROCKET_STARTED_STRING;
pub use daemon::{new_configured_command, shutdown_assert_no_errors, spawn_daemon, DaemonError};
pub use kill_on_drop::{ChildKillOnDropExt, KillOnDropChild};
pub use kill_term::ChildKillTermExt;
pub use mock::{setup_config, setup_config_with_data, TestSetup};
pub use ports::next_port;
pub use crate::reqwest::*;
