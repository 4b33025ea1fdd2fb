//! Structured logging schema and field name constants.
//!
//! All crates use these constants for consistent structured logging fields,
//! so log aggregation tools can query by standardized names across every
//! subsystem.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service or lost side effect, requires operator attention |
//! | WARN  | Recoverable issue, message dropped or requeued |
//! | INFO  | Lifecycle events (startup, shutdown), per-item completions |
//! | DEBUG | Decision points (filter verdicts, policy decisions) |

/// Subsystem originating the log event.
/// Values: "broker", "db", "discovery", "process", "submit", "clients"
pub const SUBSYSTEM: &str = "subsystem";

/// Component within a subsystem.
/// Examples: "connection", "pool", "rate_limiter", "consumer"
pub const COMPONENT: &str = "component";

/// Logical operation name.
/// Examples: "connect", "publish", "upsert_if_new", "submit"
pub const OPERATION: &str = "op";

/// External vacancy identifier being operated on.
pub const HH_ID: &str = "hh_id";

/// Queue name for broker operations.
pub const QUEUE: &str = "queue";

/// Wall-clock duration in milliseconds.
pub const DURATION_MS: &str = "duration_ms";

/// Boolean success/failure indicator.
pub const SUCCESS: &str = "success";

/// Error message when an operation fails.
pub const ERROR_MSG: &str = "error";
