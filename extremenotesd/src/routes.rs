mod api;
mod catchers;
mod service;

use rocket::{catchers, Build, Rocket};

pub trait ApiRocketBuildExt {
    fn install_notes_api(self) -> Self;
}

impl ApiRocketBuildExt for Rocket<Build> {
    fn install_notes_api(self) -> Self {
        self.mount("/", api::api_routes())
    }
}

pub trait ServiceRocketBuildExt {
    fn install_service_routes(self) -> Self;
}

impl ServiceRocketBuildExt for Rocket<Build> {
    fn install_service_routes(self) -> Self {
        self
            .mount("/", service::service_routes())
            .register(
                "/",
                catchers![
                    catchers::bad_request,
                    catchers::not_found,
                    catchers::unprocessable_entity,
                    catchers::internal_error,
                ],
            )
    }
}
