mod frame;
pub(crate) use self::frame::{frameprefix, Error as FrameError, Frame, MessageFrames};

mod parse;
pub(crate) use self::parse::Parse;

mod login;
pub(crate) use self::login::Login;

mod ping;
pub(crate) use self::ping::Ping;

mod routes;
pub(crate) use self::routes::Routes;

mod remove;
pub(crate) use self::remove::Remove;

mod success;
pub(crate) use self::success::Success;

mod fail;
pub(crate) use self::fail::{Fail, FailCode};

use std::convert::TryFrom;

use crate::common::{Error, ErrorKind, Result};

pub(crate) const DELIMITER: &[u8] = b"\r\n";

// Date frames travel as strings in this format.
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum MessageType {
    Ping = 1,
    Login = 2,
    Success = 3,
    Fail = 4,
    Routes = 5,
    Remove = 6,
}

impl From<MessageType> for u8 {
    fn from(mt: MessageType) -> u8 {
        mt as u8
    }
}

impl TryFrom<u8> for MessageType {
    type Error = Error;
    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            1 => Ok(MessageType::Ping),
            2 => Ok(MessageType::Login),
            3 => Ok(MessageType::Success),
            4 => Ok(MessageType::Fail),
            5 => Ok(MessageType::Routes),
            6 => Ok(MessageType::Remove),
            _ => Err(Error::from(ErrorKind::UnknownMessageType {
                message_type: n,
            })),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Message {
    Ping(Ping),
    Login(Login),
    Success(Success),
    Fail(Fail),
    Routes(Routes),
    Remove(Remove),
}

impl Message {
    pub(crate) fn from_frames(frames: MessageFrames) -> Result<Message> {
        let mut parse = Parse::new(frames);
        let message_type = parse
            .message_type()
            .ok_or_else(|| ErrorKind::NetworkFraming("message type not found".into()))?;

        let message = match message_type {
            MessageType::Ping => Message::Ping(Ping::parse_frames(&mut parse)?),
            MessageType::Login => Message::Login(Login::parse_frames(&mut parse)?),
            MessageType::Success => Message::Success(Success::parse_frames(&mut parse)?),
            MessageType::Fail => Message::Fail(Fail::parse_frames(&mut parse)?),
            MessageType::Routes => Message::Routes(Routes::parse_frames(&mut parse)?),
            MessageType::Remove => Message::Remove(Remove::parse_frames(&mut parse)?),
        };

        Ok(message)
    }
}

impl From<Message> for MessageFrames {
    fn from(message: Message) -> MessageFrames {
        match message {
            Message::Ping(m) => m.into(),
            Message::Login(m) => m.into(),
            Message::Success(m) => m.into(),
            Message::Fail(m) => m.into(),
            Message::Routes(m) => m.into(),
            Message::Remove(m) => m.into(),
        }
    }
}
