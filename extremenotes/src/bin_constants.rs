pub const APP_CONFIG_ENV_PREFIX: &str = "EXTREMENOTES_";
pub const DEFAULT_PORT: u16 = 4000;

pub const DEFAULT_API_URL: &str = "http://localhost:8080";
pub const DEFAULT_TOKEN_FILE: &str = ".extremenotes-token";
