#![allow(clippy::module_inception)]

mod protocol;
mod server;

pub mod cli;
pub mod client;
pub mod config;
pub mod core;
pub mod error;

pub use crate::error::KurierdError;
pub type Result<T, E = crate::error::KurierdError> = std::result::Result<T, E>;

pub use crate::core::routes::{Route, RoutePoint};

pub(crate) mod common {
    pub(crate) type Result<T, E = crate::error::internal::Error> = std::result::Result<T, E>;

    pub(crate) type Error = crate::error::internal::Error;
    pub(crate) type ErrorKind = crate::error::internal::ErrorKind;

    pub use crate::error::KurierdError;

    pub(crate) type Time = chrono::DateTime<chrono::Utc>;

    pub use tracing::{debug, error, info, trace, warn};
}
