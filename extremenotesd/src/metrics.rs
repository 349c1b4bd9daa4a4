use std::collections::BTreeMap;
use std::fmt::Write;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use async_trait::async_trait;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::{Build, Request, Response, Rocket};
use crate::app_constants::UNMATCHED_ROUTE_LABEL;

/// Per-route request counters, shared between the fairing that fills them
/// and the metrics route that renders them.
#[derive(Clone, Debug, Default)]
pub struct RequestCounters(Arc<Mutex<BTreeMap<RequestKey, u64>>>);

#[derive(Clone, Debug, Eq, Ord, PartialEq, PartialOrd)]
struct RequestKey {
    method: String,
    route: String,
    code: u16,
}

impl RequestCounters {
    fn record(&self, method: &str, route: &str, code: u16) {
        *self.lock()
            .entry(RequestKey {
                method: method.to_owned(),
                route: route.to_owned(),
                code,
            })
            .or_default() += 1;
    }

    pub fn render(&self, out: &mut String) {
        out.push_str("# HELP http_requests_total Total number of HTTP requests\n");
        out.push_str("# TYPE http_requests_total counter\n");
        for (key, count) in self.lock().iter() {
            let _ = writeln!(
                out,
                "http_requests_total{{method=\"{}\",route=\"{}\",code=\"{}\"}} {count}",
                escape_label(&key.method),
                escape_label(&key.route),
                key.code,
            );
        }
    }

    // a panic while holding the lock cannot leave a counter half-written
    fn lock(&self) -> MutexGuard<'_, BTreeMap<RequestKey, u64>> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub fn escape_label(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

pub struct RequestMetricsFairing {
    counters: RequestCounters,
}

impl RequestMetricsFairing {
    pub fn new() -> Self {
        RequestMetricsFairing {
            counters: RequestCounters::default(),
        }
    }
}

#[async_trait]
impl Fairing for RequestMetricsFairing {
    fn info(&self) -> Info {
        Info {
            name: "request metrics",
            kind: Kind::Ignite | Kind::Response,
        }
    }

    async fn on_ignite(
        &self,
        rocket: Rocket<Build>,
    ) -> rocket::fairing::Result {
        Ok(rocket.manage(self.counters.clone()))
    }

    async fn on_response<'r>(
        &self,
        request: &'r Request<'_>,
        response: &mut Response<'r>,
    ) {
        let route = request.route()
            .map(|route| route.uri.as_str())
            .unwrap_or(UNMATCHED_ROUTE_LABEL);
        self.counters.record(
            request.method().as_str(),
            route,
            response.status().code,
        );
    }
}
