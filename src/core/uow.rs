mod list;
pub(crate) use self::list::ListRoutes;

mod remove;
pub(crate) use self::remove::RemoveRoute;

use std::fmt;

use tokio::sync::oneshot;

use crate::common::{ErrorKind, Result, Time};
use crate::core::routes::Route;
use crate::core::session::Credential;

pub(crate) enum UnitOfWork {
    Login(Work<Credential, Option<String>>),
    Ping(Work<(), Time>),
    ListRoutes(Work<ListRoutes, Vec<Route>>),
    RemoveRoute(Work<RemoveRoute, Option<Route>>),
}

pub(crate) struct Work<Req, Res> {
    // Bearer token presented with the request. None only for login, which is
    // the operation that issues tokens in the first place.
    pub(crate) token: Option<String>,
    pub(crate) request: Req,
    // Wrap with option so that response can be sent via mut reference.
    pub(crate) response_sender: Option<oneshot::Sender<Result<Res>>>,
}

impl<Req, Res> Work<Req, Res> {
    pub(crate) fn send_response(&mut self, response: Result<Res>) -> Result<()> {
        self.response_sender
            .take()
            .expect("response already sent")
            .send(response)
            .map_err(|_| ErrorKind::Internal("send to resp channel".to_owned()).into())
    }
}

impl UnitOfWork {
    pub(crate) fn new_login(
        credential: Credential,
    ) -> (UnitOfWork, oneshot::Receiver<Result<Option<String>>>) {
        let (tx, rx) = oneshot::channel();
        (
            UnitOfWork::Login(Work {
                token: None,
                request: credential,
                response_sender: Some(tx),
            }),
            rx,
        )
    }

    pub(crate) fn new_ping(token: String) -> (UnitOfWork, oneshot::Receiver<Result<Time>>) {
        let (tx, rx) = oneshot::channel();
        (
            UnitOfWork::Ping(Work {
                token: Some(token),
                request: (),
                response_sender: Some(tx),
            }),
            rx,
        )
    }

    pub(crate) fn new_list_routes(
        token: String,
        list: ListRoutes,
    ) -> (UnitOfWork, oneshot::Receiver<Result<Vec<Route>>>) {
        let (tx, rx) = oneshot::channel();
        (
            UnitOfWork::ListRoutes(Work {
                token: Some(token),
                request: list,
                response_sender: Some(tx),
            }),
            rx,
        )
    }

    pub(crate) fn new_remove_route(
        token: String,
        remove: RemoveRoute,
    ) -> (UnitOfWork, oneshot::Receiver<Result<Option<Route>>>) {
        let (tx, rx) = oneshot::channel();
        (
            UnitOfWork::RemoveRoute(Work {
                token: Some(token),
                request: remove,
                response_sender: Some(tx),
            }),
            rx,
        )
    }
}

impl fmt::Debug for UnitOfWork {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnitOfWork::Login(_) => write!(f, "Login"),
            UnitOfWork::Ping(_) => write!(f, "Ping"),
            UnitOfWork::ListRoutes(list) => write!(f, "{}", list.request),
            UnitOfWork::RemoveRoute(remove) => write!(f, "{}", remove.request),
        }
    }
}
