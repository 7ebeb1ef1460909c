use tokio::sync::mpsc::{self, Receiver, Sender};

use crate::common::{error, info, Result};
use crate::core::middleware::{Dispatcher, MiddlewareChain};
use crate::core::routes::{demo_routes, RouteStore};
use crate::core::{Config, UnitOfWork};

#[derive(Default)]
pub(crate) struct Builder {
    config: Option<Config>,
    request_channel_buffer: usize,
}

impl Builder {
    pub(crate) fn from_config(config: Config) -> Self {
        let mut builder = Builder::new();
        builder.config = Some(config);
        builder
    }

    pub(crate) fn build(mut self) -> Result<Backend> {
        let (send, recv) = mpsc::channel(self.request_channel_buffer);

        let config = self.config.take().unwrap_or_default();

        let dispatcher = Builder::build_dispatcher(&config);

        let mw = MiddlewareChain::new(&config, dispatcher)?;

        Ok(Backend {
            request_send: send,
            request_recv: recv,
            middlewares: mw,
        })
    }

    fn build_dispatcher(config: &Config) -> Dispatcher {
        let (tx, rx) = mpsc::channel(1024);

        let routes = config.routes.clone().unwrap_or_else(demo_routes);
        info!(routes = routes.len(), "Route store loaded");

        let store = RouteStore::new(rx, routes);

        tokio::spawn(store.run());

        Dispatcher::new(tx)
    }

    fn new() -> Self {
        Self {
            request_channel_buffer: 1024,
            ..Default::default()
        }
    }
}

pub(crate) struct Backend {
    request_recv: Receiver<UnitOfWork>,
    request_send: Sender<UnitOfWork>,
    middlewares: MiddlewareChain,
}

impl Backend {
    pub fn request_channel(&self) -> Sender<UnitOfWork> {
        self.request_send.clone()
    }

    pub(crate) async fn run(mut self) {
        info!("Backend running");

        while let Some(request) = self.request_recv.recv().await {
            if let Err(err) = self.handle_request(request).await {
                error!("Handle request {}", err);
            }
        }
    }

    pub(crate) async fn handle_request(&mut self, uow: UnitOfWork) -> Result<()> {
        self.middlewares.apply(uow).await
    }
}
