pub const SERVICE_NAME: &str = "notes";
pub const SERVICE_STATUS_RUNNING: &str = "running";

pub const ENDPOINTS: &[&str] = &[
    "GET /health",
    "GET /metrics",
    "GET /notes",
    "POST /notes",
    "GET /notes/<id>",
    "PUT /notes/<id>",
    "DELETE /notes/<id>",
];

pub const UNMATCHED_ROUTE_LABEL: &str = "unmatched";
