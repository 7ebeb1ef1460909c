use std::fmt;

use crate::common::Result;
use crate::core::session::Credential;
use crate::protocol::message::{MessageFrames, MessageType, Parse};

// Login is a message in which client requests the server to verify the
// credential and issue a session token.
#[derive(Clone, PartialEq)]
pub(crate) struct Login {
    username: String,
    password: String,
}

impl Login {
    pub(crate) fn new<S1, S2>(username: S1, password: S2) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
    {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub(crate) fn parse_frames(parse: &mut Parse) -> Result<Self> {
        let username = parse.next_string()?;
        let password = parse.next_string()?;

        parse.expect_consumed()?;

        Ok(Login::new(username, password))
    }

    pub(crate) fn into_credential(self) -> Credential {
        Credential {
            username: self.username,
            password: self.password,
        }
    }
}

impl From<Login> for MessageFrames {
    fn from(login: Login) -> Self {
        let mut frames = MessageFrames::with_capacity(MessageType::Login, 2);

        frames.push_string(login.username);
        frames.push_string(login.password);

        frames
    }
}

// Mask the password.
impl fmt::Debug for Login {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Login")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
