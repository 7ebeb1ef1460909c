pub mod login;
pub mod ping;
pub mod remove;
mod root;
pub mod routes;
pub mod server;

pub use root::{authenticate, parse, ClientOptions, Command, KurierdCommand};
