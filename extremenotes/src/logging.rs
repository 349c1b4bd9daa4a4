use log::LevelFilter;

pub fn init_daemon_logging() {
    init_logging_env(
        if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        }
    )
}

pub fn init_tool_logging() {
    init_logging_env(LevelFilter::Warn)
}

// RUST_LOG, when set, takes precedence over the default level
fn init_logging_env(default_level: LevelFilter) {
    env_logger::builder()
        .filter_level(default_level)
        .parse_default_env()
        .init()
}
