//! Happy path tests

use std::error::Error;
use std::fs;
use api_data::model::{HealthResponse, ServiceDescriptor};
use test_utils::{new_configured_command, setup_config, setup_config_with_data, shutdown_assert_no_errors, spawn_daemon, ReqwestClientExt, RQ, ROCKET_STARTED_STRING};
use crate::common::DAEMON_BIN_PATH;

mod common;

#[test]
fn launch_and_stop() -> Result<(), Box<dyn Error>> {
    let setup = setup_config();
    let (mut child, reader) = spawn_daemon(DAEMON_BIN_PATH, &setup)?;
    shutdown_assert_no_errors(&mut child, reader)?;
    Ok(())
}

#[test]
fn launch_with_document_store() -> Result<(), Box<dyn Error>> {
    let setup = setup_config_with_data();
    let (mut child, reader) = spawn_daemon(DAEMON_BIN_PATH, &setup)?;
    let descriptor: ServiceDescriptor = RQ.get_json_successfully(setup.url(""))?;
    assert_eq!(descriptor.store, "document");
    assert!(setup.data_directory().join("notes").is_dir());
    shutdown_assert_no_errors(&mut child, reader)?;
    Ok(())
}

#[test]
fn request_processed_without_errors() -> Result<(), Box<dyn Error>> {
    let setup = setup_config();
    let (mut child, reader) = spawn_daemon(DAEMON_BIN_PATH, &setup)?;

    let health: HealthResponse = RQ.get_json_successfully(setup.url("health"))?;
    assert_eq!(health.status, "ok");

    let descriptor: ServiceDescriptor = RQ.get_json_successfully(setup.url(""))?;
    assert_eq!(descriptor.service, "notes");
    assert_eq!(descriptor.status, "running");
    assert_eq!(descriptor.store, "memory");
    assert_eq!(descriptor.version, env!("CARGO_PKG_VERSION"));

    shutdown_assert_no_errors(&mut child, reader)?;
    Ok(())
}

#[test]
fn missing_config_file_stops_startup() -> Result<(), Box<dyn Error>> {
    let setup = setup_config();
    fs::remove_file(setup.config_file())?;
    let output = new_configured_command(DAEMON_BIN_PATH, &setup).output()?;
    assert!(!output.status.success());
    let log = String::from_utf8_lossy(&output.stderr);
    assert!(log.contains("does not exist"), "{log}");
    Ok(())
}

#[test]
fn missing_data_directory_without_fallback_stops_startup() -> Result<(), Box<dyn Error>> {
    let setup = setup_config_with_data();
    fs::remove_dir(setup.data_directory())?;
    let output = new_configured_command(DAEMON_BIN_PATH, &setup).output()?;
    assert!(!output.status.success());
    let log = String::from_utf8_lossy(&output.stderr);
    assert!(!log.contains(ROCKET_STARTED_STRING), "{log}");
    Ok(())
}
