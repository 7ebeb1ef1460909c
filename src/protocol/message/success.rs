use crate::common::Result;
use crate::protocol::message::{MessageFrames, MessageType, Parse};

// Positive server response. Login success carries the issued token; route
// operations carry a JSON body; a bare success means "done, nothing to
// return".
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Success {
    token: Option<String>,
    body: Option<Vec<u8>>,
}

impl Success {
    pub(crate) fn new() -> Success {
        Self {
            token: None,
            body: None,
        }
    }

    pub(crate) fn with_token(token: impl Into<String>) -> Success {
        Self {
            token: Some(token.into()),
            body: None,
        }
    }

    pub(crate) fn with_body(body: impl Into<Vec<u8>>) -> Success {
        Self {
            token: None,
            body: Some(body.into()),
        }
    }

    pub(crate) fn token(self) -> Option<String> {
        self.token
    }

    pub(crate) fn into_body(self) -> Option<Vec<u8>> {
        self.body
    }

    pub(crate) fn parse_frames(parse: &mut Parse) -> Result<Self> {
        let token = parse.next_string_or_null()?;
        let body = parse.next_bytes_or_null()?;

        parse.expect_consumed()?;

        Ok(Success { token, body })
    }
}

impl From<Success> for MessageFrames {
    fn from(success: Success) -> Self {
        let mut frames = MessageFrames::with_capacity(MessageType::Success, 2);

        frames.push_string_or_null(success.token);
        frames.push_bytes_or_null(success.body);

        frames
    }
}
