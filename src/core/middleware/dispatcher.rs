use async_trait::async_trait;

use chrono::Utc;
use tokio::sync::mpsc::Sender;

use crate::common::{info, Result};
use crate::core::middleware::Middleware;
use crate::core::UnitOfWork;

// Terminal middleware. Answers ping in place and forwards route units of
// work to the route store task.
pub(crate) struct Dispatcher {
    routes: Sender<UnitOfWork>,
}

impl Dispatcher {
    pub(crate) fn new(routes: Sender<UnitOfWork>) -> Self {
        Self { routes }
    }
}

#[async_trait]
impl Middleware for Dispatcher {
    async fn apply(&mut self, uow: UnitOfWork) -> Result<()> {
        match uow {
            UnitOfWork::Ping(mut ping) => {
                info!("Ping");
                ping.send_response(Ok(Utc::now()))
            }
            uow @ (UnitOfWork::ListRoutes(_) | UnitOfWork::RemoveRoute(_)) => {
                self.routes.send(uow).await.map_err(Into::into)
            }
            // Login terminates at the authenticator.
            UnitOfWork::Login(_) => unreachable!(),
        }
    }
}
