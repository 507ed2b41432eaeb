//! Application-wide constants

pub const DEFAULT_HTTP_PORT: u16 = 8080;
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;
pub const DEFAULT_JWT_SECRET: &str = "supersecretkey";
pub const DEFAULT_STREAM: &str = "companies-mutations";
pub const DEFAULT_BATCH_SIZE: usize = 3;
pub const DEFAULT_BATCH_TIMEOUT_MS: u64 = 10_000;
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;
pub const SHUTDOWN_TIMEOUT_SECS: u64 = 5;
