use std::path::Path;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use crate::bin_constants::{APP_CONFIG_ENV_PREFIX, DEFAULT_PORT};
use crate::config::app_config::AppConfig;

pub trait FigmentExt {
    fn setup_app_config(
        self,
        config_file: Option<impl AsRef<Path>>,
    ) -> Figment;
}

impl FigmentExt for Figment {
    fn setup_app_config(self, config_file: Option<impl AsRef<Path>>) -> Figment {
        let figment = self
            .merge(Serialized::default("port", DEFAULT_PORT))
            .merge(Serialized::defaults(AppConfig::default()));
        let figment = match config_file {
            Some(config_file) => figment.merge(Toml::file_exact(config_file.as_ref())),
            None => figment,
        };
        figment.merge(Env::prefixed(APP_CONFIG_ENV_PREFIX).global())
    }
}
