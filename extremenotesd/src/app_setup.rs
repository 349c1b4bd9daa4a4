use crate::metrics::RequestMetricsFairing;
use crate::routes::{ApiRocketBuildExt, ServiceRocketBuildExt};
use async_trait::async_trait;
use extremenotes::config::app_config::AppConfig;
use extremenotes::storage::{open_note_store, NoteStore};
use figment::Figment;
use log::{error, info};
use rocket::fairing::{Fairing, Info};
use rocket::{Build, Orbit, Rocket};

pub fn build_rocket(figment: Figment, app_config: AppConfig) -> Rocket<Build> {
    rocket::custom(figment)
        .attach(AppSetupFairing::new(app_config))
        .attach(RequestMetricsFairing::new())
}

pub struct AppSetupFairing {
    app_config: AppConfig,
}

impl AppSetupFairing {
    pub fn new(app_config: AppConfig) -> Self {
        AppSetupFairing {
            app_config,
        }
    }
}

macro_rules! ok_or_bail {
    ($rocket:ident, $expr:expr, |$e:ident| $error_logger:expr) => ({
        match $expr {
            std::result::Result::Ok(ok) => ok,
            std::result::Result::Err(e) => {
                let $e = e;
                $error_logger;
                return std::result::Result::Err($rocket);
            },
        }
    });
}

#[async_trait]
impl Fairing for AppSetupFairing {
    fn info(&self) -> Info {
        use rocket::fairing::Kind;
        Info {
            name: "app setup",
            kind: Kind::Ignite | Kind::Liftoff,
        }
    }

    async fn on_ignite(
        &self,
        rocket: Rocket<Build>,
    ) -> rocket::fairing::Result {
        let store: Box<dyn NoteStore> = ok_or_bail!(
            rocket,
            open_note_store(&self.app_config).await,
            |e| error!("note store initialization failed: {e}")
        );

        Ok(
            rocket
                .manage(store)
                .install_notes_api()
                .install_service_routes()
        )
    }

    async fn on_liftoff(
        &self,
        rocket: &Rocket<Orbit>,
    ) {
        if let Some(store) = rocket.state::<Box<dyn NoteStore>>() {
            info!("serving notes from the {} store", store.kind());
        }
    }
}
