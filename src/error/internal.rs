use std::error;
use std::fmt;
use std::io;

use backtrace::Backtrace;

use tokio::sync::{mpsc, oneshot};

#[derive(Debug)]
pub(crate) struct Error {
    kind: ErrorKind,
    #[allow(dead_code)]
    backtrace: Option<Backtrace>,
}

#[derive(Debug)]
pub(crate) enum ErrorKind {
    Io(io::Error),
    NetworkFraming(String),
    UnknownMessageType { message_type: u8 },
    ConnectionResetByPeer,
    Unauthorized(String),
    Internal(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind() {
            ErrorKind::Io(err) => err.fmt(f),
            ErrorKind::NetworkFraming(description) => {
                write!(f, "network framing error. {}", description)
            }
            ErrorKind::UnknownMessageType { message_type } => {
                write!(f, "unknown message type {}", message_type)
            }
            ErrorKind::ConnectionResetByPeer => write!(f, "connection reset by peer"),
            ErrorKind::Unauthorized(description) => write!(f, "unauthorized. {}", description),
            ErrorKind::Internal(description) => write!(f, "internal error. {}", description),
        }
    }
}

impl Error {
    pub(crate) fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    pub(crate) fn is_unauthorized(&self) -> bool {
        matches!(self.kind(), ErrorKind::Unauthorized(_))
    }

    fn with_backtrace(kind: ErrorKind) -> Self {
        Self {
            kind,
            backtrace: Some(Backtrace::new()),
        }
    }
}

impl error::Error for Error {}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Self {
        Error::with_backtrace(kind)
    }
}

impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::from(ErrorKind::Io(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::from(ErrorKind::Internal(format!("json encode. {}", err)))
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::from(ErrorKind::Internal(format!("config decode. {}", err)))
    }
}

// Request channel closed means the backend worker is gone.
impl<T> From<mpsc::error::SendError<T>> for Error {
    fn from(_: mpsc::error::SendError<T>) -> Self {
        Error::from(ErrorKind::Internal("request channel closed".to_owned()))
    }
}

impl From<oneshot::error::RecvError> for Error {
    fn from(_: oneshot::error::RecvError) -> Self {
        Error::from(ErrorKind::Internal("response channel closed".to_owned()))
    }
}
