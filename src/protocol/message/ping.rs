use chrono::Utc;

use crate::common::{Result, Time};
use crate::protocol::message::{MessageFrames, MessageType, Parse};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Ping {
    token: String,
    client_time: Option<Time>,
    server_time: Option<Time>,
}

impl Ping {
    pub(crate) fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            client_time: None,
            server_time: None,
        }
    }

    pub(crate) fn token(&self) -> &str {
        &self.token
    }

    pub(crate) fn record_client_time(mut self) -> Self {
        self.client_time = Some(Utc::now());
        self
    }

    pub(crate) fn record_server_time(&mut self, time: Time) {
        self.server_time = Some(time);
    }

    pub(crate) fn client_time(&self) -> Option<Time> {
        self.client_time
    }

    pub(crate) fn parse_frames(parse: &mut Parse) -> Result<Self> {
        let token = parse.next_string()?;
        let client_time = parse.next_time_or_null()?;
        let server_time = parse.next_time_or_null()?;

        parse.expect_consumed()?;

        Ok(Ping {
            token,
            client_time,
            server_time,
        })
    }
}

impl From<Ping> for MessageFrames {
    fn from(ping: Ping) -> Self {
        let mut frames = MessageFrames::with_capacity(MessageType::Ping, 3);

        frames.push_string(ping.token);
        frames.push_time_or_null(ping.client_time);
        frames.push_time_or_null(ping.server_time);

        frames
    }
}
