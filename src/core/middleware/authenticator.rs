use async_trait::async_trait;

use crate::common::{info, ErrorKind, Result};
use crate::core::middleware::Middleware;
use crate::core::{session, UnitOfWork};

// Guards protected units of work behind session token validation and handles
// login itself. Owns the session authenticator; since middlewares run on the
// single backend worker, each whole login/validate operation is serialized.
pub(crate) struct Authenticator<MW> {
    sessions: session::Authenticator,
    next: MW,
}

impl<MW> Authenticator<MW> {
    pub(crate) fn new(sessions: session::Authenticator, next: MW) -> Self {
        Self { sessions, next }
    }

    fn reject() -> crate::common::Error {
        ErrorKind::Unauthorized("invalid or expired token".to_owned()).into()
    }
}

#[async_trait]
impl<MW> Middleware for Authenticator<MW>
where
    MW: Middleware + Send + 'static,
{
    async fn apply(&mut self, uow: UnitOfWork) -> Result<()> {
        match uow {
            UnitOfWork::Login(mut login) => {
                info!(user = %login.request.username, "Try authenticate");

                let result = self.sessions.login(&login.request);
                login.send_response(result)
            }
            UnitOfWork::Ping(mut ping) => {
                if !self.sessions.validate(ping.token.as_deref().unwrap_or_default()) {
                    return ping.send_response(Err(Self::reject()));
                }
                self.next.apply(UnitOfWork::Ping(ping)).await
            }
            UnitOfWork::ListRoutes(mut list) => {
                if !self.sessions.validate(list.token.as_deref().unwrap_or_default()) {
                    return list.send_response(Err(Self::reject()));
                }
                self.next.apply(UnitOfWork::ListRoutes(list)).await
            }
            UnitOfWork::RemoveRoute(mut remove) => {
                if !self.sessions.validate(remove.token.as_deref().unwrap_or_default()) {
                    return remove.send_response(Err(Self::reject()));
                }
                self.next.apply(UnitOfWork::RemoveRoute(remove)).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::Credential;
    use crate::core::{ListRoutes, Principal, UserEntry};

    // Records whether anything got past the authenticator.
    struct Terminal {
        applied: usize,
    }

    #[async_trait]
    impl Middleware for Terminal {
        async fn apply(&mut self, mut uow: UnitOfWork) -> Result<()> {
            self.applied += 1;
            match &mut uow {
                UnitOfWork::ListRoutes(list) => list.send_response(Ok(Vec::new())),
                _ => unreachable!(),
            }
        }
    }

    fn authenticator() -> Authenticator<Terminal> {
        let principals = vec![Principal::from_entry(&UserEntry {
            username: "kurier".into(),
            password: "kurier".into(),
        })
        .unwrap()];

        Authenticator::new(
            session::Authenticator::new(principals),
            Terminal { applied: 0 },
        )
    }

    #[tokio::test]
    async fn login_then_protected_request() {
        let mut mw = authenticator();

        let (login, rx) = UnitOfWork::new_login(Credential {
            username: "kurier".into(),
            password: "kurier".into(),
        });
        mw.apply(login).await.unwrap();
        let token = rx.await.unwrap().unwrap().unwrap();

        let (list, rx) = UnitOfWork::new_list_routes(token, ListRoutes { date: None });
        mw.apply(list).await.unwrap();

        assert!(rx.await.unwrap().is_ok());
        assert_eq!(mw.next.applied, 1);
    }

    #[tokio::test]
    async fn unknown_token_is_rejected_before_dispatch() {
        let mut mw = authenticator();

        let (list, rx) = UnitOfWork::new_list_routes("garbage".into(), ListRoutes { date: None });
        mw.apply(list).await.unwrap();

        let err = rx.await.unwrap().unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(mw.next.applied, 0);
    }

    #[tokio::test]
    async fn failed_login_issues_no_token() {
        let mut mw = authenticator();

        let (login, rx) = UnitOfWork::new_login(Credential {
            username: "kurier".into(),
            password: "wrong".into(),
        });
        mw.apply(login).await.unwrap();

        assert!(rx.await.unwrap().unwrap().is_none());
    }
}
