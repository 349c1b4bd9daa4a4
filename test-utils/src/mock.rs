use std::path::PathBuf;
use assert_fs::prelude::*;
use assert_fs::TempDir;
use crate::constants::{CONFIG_FILE_PATH, DATA_DIRECTORY_PATH};
use crate::ports::next_port;

/// A scratch root holding the daemon's configuration and, optionally,
/// its document store.
pub struct TestSetup {
    pub root: TempDir,
    pub port: u16,
}

impl TestSetup {
    pub fn config_file(&self) -> PathBuf {
        self.root.child(CONFIG_FILE_PATH).path().to_owned()
    }

    pub fn data_directory(&self) -> PathBuf {
        self.root.child(DATA_DIRECTORY_PATH).path().to_owned()
    }

    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn url(&self, endpoint: &str) -> String {
        format!("{}/{endpoint}", self.base_url())
    }
}

/// Configuration without a data directory: the daemon keeps notes in memory.
pub fn setup_config() -> TestSetup {
    setup_config_impl(false)
}

/// Configuration with an empty data directory and no memory fallback.
pub fn setup_config_with_data() -> TestSetup {
    setup_config_impl(true)
}

fn setup_config_impl(with_data: bool) -> TestSetup {
    let root = TempDir::new().unwrap();
    let port = next_port();
    let data_directory_extra = if with_data {
        let data_dir = root.child(DATA_DIRECTORY_PATH);
        data_dir.create_dir_all().unwrap();
        format!(
            "data_directory = \"{}\"\nmemory_fallback = false\n",
            data_dir.path().display(),
        )
    } else {
        String::new()
    };
    let config = format!(
        r#"address = "127.0.0.1"
port = {port}
cli_colors = false
{data_directory_extra}"#,
    );
    let config_file = root.child(CONFIG_FILE_PATH);
    config_file.write_str(&config).unwrap();
    TestSetup {
        root,
        port,
    }
}
