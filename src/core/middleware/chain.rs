use crate::common::Result;
use crate::core::middleware::{Authenticator, Dispatcher, Logger, Middleware};
use crate::core::{session, Config, Principal, UnitOfWork};

pub(crate) struct MiddlewareChain {
    root: Logger<Authenticator<Dispatcher>>,
}

impl MiddlewareChain {
    pub(crate) fn new(config: &Config, dispatcher: Dispatcher) -> Result<Self> {
        // Hash configured credentials once; the registry is immutable afterwards.
        let principals = config
            .users
            .iter()
            .map(Principal::from_entry)
            .collect::<Result<Vec<_>>>()?;

        let authenticator = Authenticator::new(session::Authenticator::new(principals), dispatcher);

        let logger = Logger::new(authenticator);

        Ok(Self { root: logger })
    }

    pub(crate) async fn apply(&mut self, uow: UnitOfWork) -> Result<()> {
        self.root.apply(uow).await
    }
}
