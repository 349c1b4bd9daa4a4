#![allow(dead_code)]

use std::error::Error;
use api_data::model::Note;
use test_utils::{ReqwestClientExt, TestSetup, RQ};

pub const DAEMON_BIN_PATH: &str = env!("CARGO_BIN_EXE_extremenotesd");

pub fn list_notes(setup: &TestSetup) -> Result<Vec<Note>, Box<dyn Error>> {
    RQ.get_json_successfully(setup.url("notes"))
}
