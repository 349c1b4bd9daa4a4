use std::path::Path;
use std::process::{Child, Command, Stdio};
use thiserror::Error;
use crate::background_reader::{BackgroundReader, BackgroundReaderError};
use crate::constants::{DAEMON_START_TIMEOUT, ROCKET_STARTED_STRING};
use crate::kill_on_drop::{ChildKillOnDropExt, KillOnDropChild};
use crate::kill_term::ChildKillTermExt;
use crate::mock::TestSetup;

pub fn new_configured_command(
    bin_path: impl AsRef<Path>,
    setup: &TestSetup,
) -> Command {
    let mut command = Command::new(bin_path.as_ref());
    command
        .arg(format!("--config-file={}", setup.config_file().display()))
        .env("RUST_LOG", "info")
        .env_remove("EXTREMENOTES_PORT")
        .env_remove("EXTREMENOTES_DATA_DIRECTORY")
        .env_remove("EXTREMENOTES_MEMORY_FALLBACK")
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped());
    command
}

/// Starts the daemon and waits until Rocket reports it is listening.
pub fn spawn_daemon(
    bin_path: impl AsRef<Path>,
    setup: &TestSetup,
) -> Result<(KillOnDropChild, BackgroundReader), DaemonError> {
    let mut child = new_configured_command(bin_path, setup)
        .spawn()?
        .kill_on_drop();
    let stderr = child.stderr.take()
        .ok_or(DaemonError::MissingStderr)?;
    let mut reader = BackgroundReader::new(stderr, DAEMON_START_TIMEOUT);
    reader.wait_until(ROCKET_STARTED_STRING)?;
    Ok((child, reader))
}

pub fn shutdown_assert_no_errors(
    child: &mut Child,
    reader: BackgroundReader,
) -> Result<(), DaemonError> {
    child.kill_term()?;
    let log = reader.read_to_end()?;
    assert!(
        !log.contains("ERROR"),
        "errors in the log: {log}",
    );
    assert!(child.wait()?.success());
    Ok(())
}

#[derive(Debug, Error)]
pub enum DaemonError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Reader(#[from] BackgroundReaderError),

    #[error("no stderr for the child process")]
    MissingStderr,
}
