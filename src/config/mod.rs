mod initialize;
pub use initialize::Initializer;

mod config;
pub use config::Config;

pub mod env {
    // Tracing env-filter directive, e.g. "kurierd=debug".
    pub const LOG_DIRECTIVE: &str = "KURIERD_LOG";
}
