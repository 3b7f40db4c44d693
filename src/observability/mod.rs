// Observability module - structured logging setup

pub mod tracing;

pub use tracing::{init_tracing, ObservabilityError};
