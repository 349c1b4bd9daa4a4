use std::fmt::Write;
use api_data::constants::HEALTH_STATUS_OK;
use api_data::model::{HealthResponse, ServiceDescriptor};
use extremenotes::storage::NoteStore;
use rocket::response::content::RawText;
use rocket::serde::json::Json;
use rocket::{get, routes, Route, State};
use crate::app_constants::{ENDPOINTS, SERVICE_NAME, SERVICE_STATUS_RUNNING};
use crate::metrics::{escape_label, RequestCounters};
use crate::routes::api::ApiError;

#[get("/")]
fn index(store: &State<Box<dyn NoteStore>>) -> Json<ServiceDescriptor> {
    Json(ServiceDescriptor {
        service: SERVICE_NAME.to_owned(),
        status: SERVICE_STATUS_RUNNING.to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        store: store.kind().to_string(),
        endpoints: ENDPOINTS.iter().map(|e| e.to_string()).collect(),
    })
}

#[get("/health")]
fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: HEALTH_STATUS_OK.to_owned(),
    })
}

#[get("/metrics")]
async fn metrics(
    store: &State<Box<dyn NoteStore>>,
    counters: &State<RequestCounters>,
) -> Result<RawText<String>, ApiError> {
    let notes_total = store.count().await?;
    let mut out = String::with_capacity(1024);
    counters.render(&mut out);
    let _ = write!(
        out,
        "# HELP notes_total Total number of notes\n\
            # TYPE notes_total gauge\n\
            notes_total {notes_total}\n\
            # HELP notes_service_info Service information\n\
            # TYPE notes_service_info gauge\n\
            notes_service_info{{service=\"{}\",store=\"{}\"}} 1\n",
        escape_label(SERVICE_NAME),
        store.kind(),
    );
    Ok(RawText(out))
}

pub fn service_routes() -> Vec<Route> {
    routes![
        index,
        health,
        metrics,
    ]
}
