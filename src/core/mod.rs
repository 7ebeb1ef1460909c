mod backend;
pub(crate) use self::backend::Builder;

mod config;
pub use self::config::{Config, UserEntry};

mod principal;
pub(crate) use self::principal::Principal;

pub(crate) mod session;

pub mod routes;

mod uow;
pub(crate) use self::uow::{ListRoutes, RemoveRoute, UnitOfWork};

mod middleware;
