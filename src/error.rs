//! Crate-level error type for startup and serving.
//!
//! Routing itself never fails: unmatched paths get the 404 handler and
//! duplicate registrations overwrite. Errors only come from the outside world.

use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("logging setup failed: {0}")]
    Logging(#[from] tracing_subscriber::util::TryInitError),

    #[error("template error: {0}")]
    Template(#[from] tera::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
