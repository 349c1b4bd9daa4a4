use std::time::Duration;

pub const TERM_WAIT: Duration = Duration::from_millis(5000);
pub const KILL_CHECK_INTERVAL: Duration = Duration::from_millis(100);
pub const BACKGROUND_READER_CHECK_INTERVAL: Duration = Duration::from_millis(50);
pub const DAEMON_START_TIMEOUT: Duration = Duration::from_secs(30);

pub const ROCKET_STARTED_STRING: &str = "Rocket has launched from";

pub const CONFIG_FILE_PATH: &str = "etc/extremenotes/extremenotesd.toml";
pub const DATA_DIRECTORY_PATH: &str = "var/extremenotes";
