use std::convert::TryFrom;
use std::fmt;

use crate::common::{ErrorKind, Result};
use crate::protocol::message::{MessageFrames, MessageType, Parse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FailCode {
    Unauthenticated = 1,
    UnexpectedMessage = 2,
}

impl fmt::Display for FailCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FailCode::Unauthenticated => write!(f, "unauthenticated"),
            FailCode::UnexpectedMessage => write!(f, "unexpected message"),
        }
    }
}

impl TryFrom<u64> for FailCode {
    type Error = crate::common::Error;
    fn try_from(n: u64) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(FailCode::Unauthenticated),
            2 => Ok(FailCode::UnexpectedMessage),
            _ => Err(ErrorKind::NetworkFraming(format!("unknown fail code {}", n)).into()),
        }
    }
}

// Negative server response. The code is deliberately coarse; authentication
// failures are never detailed.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Fail {
    code: FailCode,
    message: Option<String>,
}

impl Fail {
    pub(crate) fn new(code: FailCode) -> Self {
        Self {
            code,
            message: None,
        }
    }

    pub(crate) fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub(crate) fn code(&self) -> FailCode {
        self.code
    }

    pub(crate) fn parse_frames(parse: &mut Parse) -> Result<Self> {
        let code = FailCode::try_from(parse.next_uint()?)?;
        let message = parse.next_string_or_null()?;

        parse.expect_consumed()?;

        Ok(Fail { code, message })
    }
}

impl From<Fail> for MessageFrames {
    fn from(fail: Fail) -> Self {
        let mut frames = MessageFrames::with_capacity(MessageType::Fail, 2);

        frames.push_uint(fail.code as u64);
        frames.push_string_or_null(fail.message);

        frames
    }
}
