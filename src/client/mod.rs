use async_trait::async_trait;

use chrono::NaiveDate;

use crate::{Result, Route};

pub mod tcp;

#[async_trait]
pub trait Api {
    // Round trip latency.
    async fn ping(&mut self) -> Result<chrono::Duration>;
    // Routes scheduled for the date (the server's current date when None).
    async fn routes(&mut self, date: Option<NaiveDate>) -> Result<Vec<Route>>;
    // Remove the route, returning it when it existed.
    async fn remove_route(&mut self, id: u64) -> Result<Option<Route>>;
    // The session token issued at login.
    fn token(&self) -> &str;
}
