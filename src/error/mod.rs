pub(crate) mod internal;

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum KurierdError {
    Io(io::Error),
    // Credential or token was rejected. Deliberately carries no detail about
    // the cause so callers cannot distinguish unknown user, wrong password,
    // unknown token and expired token.
    Unauthenticated,
    Internal(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl fmt::Display for KurierdError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            KurierdError::Io(err) => err.fmt(f),
            KurierdError::Unauthenticated => write!(f, "unauthenticated"),
            KurierdError::Internal(err) => write!(f, "internal error: {}", err),
        }
    }
}

impl std::error::Error for KurierdError {}

impl From<io::Error> for KurierdError {
    fn from(err: io::Error) -> Self {
        KurierdError::Io(err)
    }
}

impl From<internal::Error> for KurierdError {
    fn from(err: internal::Error) -> Self {
        if err.is_unauthorized() {
            KurierdError::Unauthenticated
        } else {
            KurierdError::Internal(Box::new(err))
        }
    }
}
