//! Observability for the trivia service
//!
//! Logging goes through `tracing`; this module only installs the
//! subscriber. Request spans come from tower-http's `TraceLayer`.

mod logger;

pub use logger::{init_logging, parse_filter, LoggingError};
